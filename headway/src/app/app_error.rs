use headway_core::cluster::ClusterError;
use headway_core::config::ConfigError;
use headway_core::estimate::EstimateError;
use headway_core::graph::GraphError;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("failure reading run configuration: {source}")]
    ConfigError {
        #[from]
        source: ConfigError,
    },
    #[error("failure clustering stops: {source}")]
    ClusterError {
        #[from]
        source: ClusterError,
    },
    #[error("failure assembling transit graph: {source}")]
    GraphError {
        #[from]
        source: GraphError,
    },
    #[error("failure estimating stop visit times: {source}")]
    EstimateError {
        #[from]
        source: EstimateError,
    },
    #[error("storage failure: {source}")]
    StoreError {
        #[from]
        source: StoreError,
    },
    #[error("failure configuring thread pool: {0}")]
    ThreadPoolError(String),
}
