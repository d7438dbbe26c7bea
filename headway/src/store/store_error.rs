use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failure reading '{path}': {source}")]
    ReadError { path: String, source: csv::Error },
    #[error("failure writing '{path}': {source}")]
    WriteError { path: String, source: csv::Error },
    #[error("failure accessing '{path}': {source}")]
    IoError {
        path: String,
        source: std::io::Error,
    },
    #[error("relation '{path}' not found; run the '{operation}' operation first")]
    MissingRelation { path: String, operation: String },
}
