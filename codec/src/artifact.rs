//! Scannable artifact — the encoded form of exactly one token identifier.

use serde::{Deserialize, Serialize};
use veriseal_types::TokenId;

/// A rendering-ready payload for one token.
///
/// Produced once at issuance and read-only afterwards. Physical copies of
/// the rendered artifact can proliferate freely — single-use enforcement
/// lives in the registry, never in the artifact itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    id: TokenId,
    payload: String,
}

impl Artifact {
    pub(crate) fn new(id: TokenId, payload: String) -> Self {
        Self { id, payload }
    }

    /// The identifier this artifact encodes.
    pub fn id(&self) -> &TokenId {
        &self.id
    }

    /// The checksummed payload string handed to the renderer.
    pub fn payload(&self) -> &str {
        &self.payload
    }
}
