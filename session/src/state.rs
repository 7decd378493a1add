//! Session state — one discriminated value, not independently settable
//! flags, so illegal combinations are unrepresentable.

use crate::outcome::VerificationOutcome;

/// Phase of a verification session.
#[derive(Clone, Debug)]
pub enum SessionState {
    /// No identity, no work in flight.
    Idle,
    /// Waiting on the identity provider's external approval.
    AcquiringIdentity,
    /// Identity held; ready for an image.
    AwaitingImage,
    /// Extracting a payload from the submitted image.
    Decoding,
    /// Consume-request submitted, awaiting ledger confirmation.
    Submitting,
    /// Finished with a verdict.
    Resolved(VerificationOutcome),
    /// Finished without a verdict: recoverable, retry after reset.
    Errored { message: String },
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::AcquiringIdentity => "acquiring_identity",
            Self::AwaitingImage => "awaiting_image",
            Self::Decoding => "decoding",
            Self::Submitting => "submitting",
            Self::Resolved(_) => "resolved",
            Self::Errored { .. } => "errored",
        }
    }

    /// Whether the session has finished (verdict or error).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Resolved(_) | Self::Errored { .. })
    }
}
