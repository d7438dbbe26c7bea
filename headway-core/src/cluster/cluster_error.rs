use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClusterError {
    #[error("cluster distance must be a positive, finite number of meters, found {0}")]
    InvalidClusterDistance(f64),
    #[error(
        "neighborhood threshold search along the {axis} axis exceeded {limit} increments \
         without clearing the cluster distance of {cluster_distance_meters}m"
    )]
    ThresholdSearchDiverged {
        axis: String,
        limit: usize,
        cluster_distance_meters: f64,
    },
}
