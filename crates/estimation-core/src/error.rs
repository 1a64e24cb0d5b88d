use thiserror::Error;

#[derive(Error, Debug)]
pub enum EstimationError {
    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),
}
