//! Verification outcomes.

use serde::{Deserialize, Serialize};
use veriseal_types::ConsumeReceipt;

/// Classification of a finished verification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeKind {
    /// Registry confirmed the consumption — the item is genuine and is
    /// now marked used.
    Authentic,
    /// The token was never issued, or the artifact could not be decoded.
    Fake,
    /// The token was genuine once but has already been used.
    AlreadyConsumed,
    /// No verdict could be derived; communication failed and the attempt
    /// is retryable without penalty.
    Indeterminate,
}

/// The immutable product of one verification session.
///
/// Only `Authentic` carries a receipt — proof that the confirmation
/// actually happened. The constructors keep that pairing impossible to
/// get wrong.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerificationOutcome {
    kind: OutcomeKind,
    diagnostic: String,
    receipt: Option<ConsumeReceipt>,
}

impl VerificationOutcome {
    pub fn authentic(receipt: ConsumeReceipt) -> Self {
        Self {
            kind: OutcomeKind::Authentic,
            diagnostic: "Verified and consumed. This artifact is now invalid.".into(),
            receipt: Some(receipt),
        }
    }

    pub fn fake(diagnostic: impl Into<String>) -> Self {
        Self {
            kind: OutcomeKind::Fake,
            diagnostic: diagnostic.into(),
            receipt: None,
        }
    }

    pub fn already_consumed(diagnostic: impl Into<String>) -> Self {
        Self {
            kind: OutcomeKind::AlreadyConsumed,
            diagnostic: diagnostic.into(),
            receipt: None,
        }
    }

    pub fn indeterminate(diagnostic: impl Into<String>) -> Self {
        Self {
            kind: OutcomeKind::Indeterminate,
            diagnostic: diagnostic.into(),
            receipt: None,
        }
    }

    pub fn kind(&self) -> OutcomeKind {
        self.kind
    }

    pub fn diagnostic(&self) -> &str {
        &self.diagnostic
    }

    pub fn receipt(&self) -> Option<&ConsumeReceipt> {
        self.receipt.as_ref()
    }
}
