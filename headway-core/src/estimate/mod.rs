mod estimate_error;
mod estimate_ops;
mod knn;

pub use estimate_error::EstimateError;
pub use estimate_ops::{predict_stop_times, REGRESSION_NEIGHBORS};
pub use knn::KnnRegressor;
