//! Verification session — the interactive half of the token lifecycle.
//!
//! A session acquires a caller identity, decodes a token from a provided
//! image, submits a one-shot verify-and-consume request to the
//! authoritative registry, and resolves a verdict from the registry's
//! confirmed response. The verdict is derived only from registry-confirmed
//! state — never from anything cached on the client side.

pub mod error;
pub mod identity;
pub mod image;
pub mod outcome;
pub mod presenter;
pub mod session;
pub mod state;

pub use error::SessionError;
pub use identity::{IdentityError, IdentityProvider};
pub use image::{DecodeFailure, ImageDecoder};
pub use outcome::{OutcomeKind, VerificationOutcome};
pub use presenter::{present, Presentation, Severity};
pub use session::VerificationSession;
pub use state::SessionState;
