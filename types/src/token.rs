//! Token identifier, status, and the record the registry keeps per token.

use crate::error::TypeError;
use crate::identity::CallerIdentity;
use crate::receipt::TxRef;
use crate::time::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, globally unique identifier for a single issued token.
///
/// The protocol treats the identifier as format-free: any non-empty string
/// without control characters is acceptable. Uniqueness is the issuance
/// pipeline's job; the registry only enforces that no identifier is ever
/// registered twice.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TokenId(String);

impl TokenId {
    /// Parse a raw string into a `TokenId`.
    ///
    /// Rejects empty strings and strings containing control characters or
    /// whitespace — those can never have come from a well-formed artifact.
    pub fn parse(raw: impl Into<String>) -> Result<Self, TypeError> {
        let s = raw.into();
        if s.is_empty() {
            return Err(TypeError::EmptyIdentifier);
        }
        if s.chars().any(|c| c.is_control() || c.is_whitespace()) {
            return Err(TypeError::MalformedIdentifier(s));
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of a registered token.
///
/// A token that was never registered has no status — it is simply absent
/// from the store. The only transition is `Registered → Consumed`, and
/// `Consumed` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenStatus {
    /// Issued and available for exactly one consumption.
    Registered,
    /// Consumed — the terminal state. Identifiers are never recycled.
    Consumed,
}

impl TokenStatus {
    pub fn is_consumed(&self) -> bool {
        matches!(self, Self::Consumed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Registered => "registered",
            Self::Consumed => "consumed",
        }
    }
}

/// Everything the registry persists about one token.
///
/// The consumption fields form the audit trail: who consumed it, when, and
/// under which receipt. They are `None` exactly while `status` is
/// `Registered`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenRecord {
    pub id: TokenId,
    pub status: TokenStatus,
    pub registered_at: Timestamp,
    pub consumed_at: Option<Timestamp>,
    pub consumed_by: Option<CallerIdentity>,
    pub receipt: Option<TxRef>,
}

impl TokenRecord {
    /// A freshly registered token with no consumption history.
    pub fn registered(id: TokenId, registered_at: Timestamp) -> Self {
        Self {
            id,
            status: TokenStatus::Registered,
            registered_at,
            consumed_at: None,
            consumed_by: None,
            receipt: None,
        }
    }
}
