use thiserror::Error;

#[derive(Error, Debug)]
pub enum EstimateError {
    #[error("cannot fit a {k}-nearest-neighbor regressor on {n} samples")]
    InsufficientSamples { k: usize, n: usize },
    #[error("nearest-neighbor regression requires at least one neighbor")]
    ZeroNeighbors,
    #[error("regressed timestamp {0} is outside the representable datetime range")]
    TimestampOutOfRange(f64),
}
