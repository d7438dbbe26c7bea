use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cluster distance must be a positive, finite number of meters, found {0}")]
    InvalidClusterDistance(f64),
    #[error("agency tag must not be empty")]
    EmptyAgencyTag,
    #[error("failure reading run configuration: {0}")]
    ConfigurationError(String),
    #[error("unsupported configuration file type: {0}")]
    UnsupportedFileType(String),
}
