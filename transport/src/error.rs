use thiserror::Error;

/// Infrastructure failures on the way to the registry.
///
/// None of these carry a verdict: a session that hits one must surface a
/// retryable error, never "fake".
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("registry unreachable: {0}")]
    Unreachable(String),

    #[error("registry request failed: {0}")]
    RequestFailed(String),

    #[error("invalid registry response: {0}")]
    InvalidResponse(String),

    #[error("unknown call id: {0}")]
    UnknownCall(String),
}
