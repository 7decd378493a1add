use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("token not found: {0}")]
    NotFound(String),

    #[error("duplicate token identifier: {0}")]
    Duplicate(String),

    #[error("token already consumed: {0}")]
    AlreadyConsumed(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}
