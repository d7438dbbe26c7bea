use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error(
        "duplicate transit graph edge key '{0}'; edge keys must be unique across \
         sequential and connection edges, so this snapshot is internally inconsistent"
    )]
    DuplicateEdgeKey(String),
}
