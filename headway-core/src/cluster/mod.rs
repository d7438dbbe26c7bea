mod cluster_error;
mod cluster_ops;
mod distance;
mod neighborhood;

pub use cluster_error::ClusterError;
pub use cluster_ops::build_connections;
pub use distance::{great_circle_meters, EARTH_RADIUS_KM};
pub use neighborhood::{find_neighborhood_thresholds, NeighborhoodThresholds};
