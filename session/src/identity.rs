//! Identity provider boundary.
//!
//! Key custody, approval UX, and network switching live behind this
//! interface; the session only sees the resulting principal or a refusal.

use async_trait::async_trait;
use thiserror::Error;
use veriseal_types::{CallerIdentity, NetworkDescriptor};

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("the user declined the identity request")]
    Declined,

    #[error("identity provider unreachable: {0}")]
    Unreachable(String),

    #[error("could not switch to network {0}: {1}")]
    NetworkSwitch(String, String),
}

/// Externally verified principal acquisition.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Ask the holder to approve identity use. May wait on an external
    /// approval for an arbitrary time.
    async fn request_identity(&self) -> Result<CallerIdentity, IdentityError>;

    /// Ensure the provider operates against the given network.
    /// Idempotent when already on it.
    async fn switch_network(&self, network: &NetworkDescriptor) -> Result<(), IdentityError>;
}
