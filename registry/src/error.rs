use thiserror::Error;

/// Business outcomes of registry operations.
///
/// A closed set: callers classify on the variant, never on message text.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("identifier {0} is already registered")]
    DuplicateIdentifier(String),

    #[error("identifier {0} was never registered")]
    NotRegistered(String),

    #[error("token {0} has already been consumed")]
    AlreadyConsumed(String),

    #[error("store error: {0}")]
    Store(String),
}
