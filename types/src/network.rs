//! Network descriptor for the identity provider's switch-network call.

use serde::{Deserialize, Serialize};

/// Describes the ledger network a session must operate against.
///
/// The identity provider is asked to switch to this network before any
/// submission; the call is idempotent if the provider is already on it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkDescriptor {
    /// Numeric chain identifier.
    pub chain_id: u64,
    /// Human-readable network name.
    pub name: String,
    /// Transport endpoint for the authoritative registry.
    pub endpoint: String,
}

impl NetworkDescriptor {
    /// Local development network, matching the default daemon bind address.
    pub fn local_dev() -> Self {
        Self {
            chain_id: 31337,
            name: "Local Dev".to_string(),
            endpoint: "http://127.0.0.1:7450".to_string(),
        }
    }
}
