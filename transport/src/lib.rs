//! Transport to the authoritative registry.
//!
//! Every registry call is two-phase: a submission is *acknowledged* (the
//! caller holds a `PendingCall`), then later *confirmed* or finally
//! failed. Callers must treat the two as distinct — a verdict may only be
//! derived from a confirmed outcome, never from the acknowledgment.
//!
//! Business rejections (`RejectReason`) form a closed set and travel
//! inside a successful confirmation; transport failures are a different
//! channel entirely and are never verdict-bearing.

pub mod error;
pub mod http;
pub mod in_process;
pub mod wire;

pub use error::TransportError;
pub use http::HttpRegistryClient;
pub use in_process::InProcessTransport;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use veriseal_types::{CallerIdentity, ConsumeReceipt, Timestamp, TokenId};

/// Acknowledgment of a submitted registry call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingCall {
    pub call_id: String,
    pub submitted_at: Timestamp,
}

/// Confirmed outcome of a registry call.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum CallOutcome {
    /// Registration confirmed.
    Registered,
    /// Consumption confirmed, with its receipt.
    Consumed(ConsumeReceipt),
    /// The registry rejected the call for a business reason.
    Rejected(RejectReason),
}

/// Closed set of business rejections.
///
/// Classification happens on these variants — never by matching on
/// message wording.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    DuplicateIdentifier,
    NotRegistered,
    AlreadyConsumed,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DuplicateIdentifier => "duplicate_identifier",
            Self::NotRegistered => "not_registered",
            Self::AlreadyConsumed => "already_consumed",
        }
    }
}

/// Request/response access to the authoritative registry.
///
/// Implementations: `InProcessTransport` (engine-backed, for tests and
/// single-process deployments) and `HttpRegistryClient` (remote node).
#[async_trait]
pub trait RegistryTransport: Send + Sync {
    /// Submit a registration. Acknowledgment only — not yet confirmed.
    async fn submit_register(&self, id: &TokenId) -> Result<PendingCall, TransportError>;

    /// Submit a consume-request. Acknowledgment only — not yet confirmed.
    async fn submit_consume(
        &self,
        id: &TokenId,
        caller: &CallerIdentity,
    ) -> Result<PendingCall, TransportError>;

    /// Wait for the confirmed outcome of a previously submitted call.
    async fn confirm(&self, call: &PendingCall) -> Result<CallOutcome, TransportError>;
}
