use thiserror::Error;

#[derive(Debug, Error)]
pub enum TypeError {
    #[error("token identifier must not be empty")]
    EmptyIdentifier,

    #[error("token identifier contains control or whitespace characters: {0:?}")]
    MalformedIdentifier(String),

    #[error("caller identity must not be empty")]
    EmptyIdentity,

    #[error("caller identity contains control or whitespace characters: {0:?}")]
    MalformedIdentity(String),
}
