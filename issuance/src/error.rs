use thiserror::Error;
use veriseal_transport::TransportError;

#[derive(Debug, Error)]
pub enum IssuanceError {
    #[error("batch size must be at least 1")]
    EmptyBatch,

    #[error("could not find an unused identifier after {attempts} attempts")]
    IdSpaceExhausted { attempts: u32 },

    #[error("registry rejected a registration for an unexpected reason: {0}")]
    UnexpectedRejection(String),

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("artifact sink error: {0}")]
    Sink(String),

    #[error("manifest error: {0}")]
    Manifest(String),
}
