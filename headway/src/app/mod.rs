mod app_error;
mod headway_app;
mod operation;

pub use app_error::AppError;
pub use headway_app::HeadwayApp;
pub use operation::Operation;
