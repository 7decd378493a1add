//! Caller identity — the externally verified principal behind a request.

use crate::error::TypeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The principal (wallet address or equivalent) performing a registration
/// or consumption.
///
/// Identity acquisition and verification happen at the identity-provider
/// boundary; by the time a `CallerIdentity` exists it is assumed valid.
/// The registry records it for audit but never uses it to gate consumption
/// — any valid identity may consume any registered token (bearer model).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallerIdentity(String);

impl CallerIdentity {
    /// Parse a raw principal string.
    ///
    /// Rejects empty strings and embedded whitespace; the concrete address
    /// format belongs to the identity provider, not the protocol.
    pub fn parse(raw: impl Into<String>) -> Result<Self, TypeError> {
        let s = raw.into();
        if s.is_empty() {
            return Err(TypeError::EmptyIdentity);
        }
        if s.chars().any(|c| c.is_control() || c.is_whitespace()) {
            return Err(TypeError::MalformedIdentity(s));
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Shortened form for logs and UI: first six and last four characters.
    pub fn abbreviated(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 12 {
            self.0.clone()
        } else {
            let head: String = chars[..6].iter().collect();
            let tail: String = chars[chars.len() - 4..].iter().collect();
            format!("{head}…{tail}")
        }
    }
}

impl fmt::Display for CallerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
