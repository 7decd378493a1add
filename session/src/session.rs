//! The verification session state machine.
//!
//! ```text
//! Idle → AcquiringIdentity → AwaitingImage → Decoding → Submitting
//!      → Resolved(outcome) | Errored
//! ```
//!
//! The session holds no locks and coordinates purely through registry
//! responses. Verdict-bearing registry rejections resolve the session;
//! infrastructure failures produce `Errored`, which is retryable without
//! penalty and never presented as evidence of counterfeiting.

use crate::error::SessionError;
use crate::identity::{IdentityError, IdentityProvider};
use crate::image::ImageDecoder;
use crate::outcome::VerificationOutcome;
use crate::state::SessionState;
use std::sync::Arc;
use veriseal_transport::{CallOutcome, RegistryTransport, RejectReason};
use veriseal_types::{CallerIdentity, NetworkDescriptor, TokenId};

pub struct VerificationSession {
    transport: Arc<dyn RegistryTransport>,
    identity_provider: Arc<dyn IdentityProvider>,
    decoder: Arc<dyn ImageDecoder>,
    network: NetworkDescriptor,
    state: SessionState,
    identity: Option<CallerIdentity>,
}

impl VerificationSession {
    pub fn new(
        transport: Arc<dyn RegistryTransport>,
        identity_provider: Arc<dyn IdentityProvider>,
        decoder: Arc<dyn ImageDecoder>,
        network: NetworkDescriptor,
    ) -> Self {
        Self {
            transport,
            identity_provider,
            decoder,
            network,
            state: SessionState::Idle,
            identity: None,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn identity(&self) -> Option<&CallerIdentity> {
        self.identity.as_ref()
    }

    /// Explicit connect action: acquire a caller identity.
    ///
    /// Must complete before scanning is permitted. On failure the session
    /// lands in `Errored` with no other state disturbed.
    pub async fn connect(&mut self) -> Result<&SessionState, SessionError> {
        if !matches!(self.state, SessionState::Idle) {
            return Err(SessionError::InvalidTransition {
                from: self.state.name(),
                action: "connect",
            });
        }
        self.state = SessionState::AcquiringIdentity;
        tracing::debug!("acquiring caller identity");

        match self.identity_provider.request_identity().await {
            Ok(identity) => {
                if let Err(e) = self.identity_provider.switch_network(&self.network).await {
                    tracing::warn!(error = %e, "network switch failed");
                    self.state = SessionState::Errored {
                        message: format!("Could not switch to {}: {e}", self.network.name),
                    };
                    return Ok(&self.state);
                }
                tracing::info!(caller = %identity.abbreviated(), "identity acquired");
                self.identity = Some(identity);
                self.state = SessionState::AwaitingImage;
            }
            Err(IdentityError::Declined) => {
                tracing::info!("identity request declined");
                self.state = SessionState::Errored {
                    message: "Identity request declined. Connect to verify.".into(),
                };
            }
            Err(e) => {
                tracing::warn!(error = %e, "identity provider unavailable");
                self.state = SessionState::Errored {
                    message: format!("Identity provider unavailable: {e}"),
                };
            }
        }
        Ok(&self.state)
    }

    /// Submit one image for verification.
    ///
    /// Each upload is decoded afresh — no identifier survives from a
    /// previous attempt.
    pub async fn submit_image(&mut self, image: &[u8]) -> Result<&SessionState, SessionError> {
        if !matches!(self.state, SessionState::AwaitingImage) {
            return Err(SessionError::InvalidTransition {
                from: self.state.name(),
                action: "submit an image",
            });
        }
        self.state = SessionState::Decoding;

        // An unreadable or garbled artifact is treated as a proven
        // counterfeit, not a transient error: a genuine artifact at the
        // point of use is expected to decode reliably.
        let payload = match self.decoder.decode(image) {
            Ok(payload) => payload,
            Err(failure) => {
                tracing::info!(reason = %failure, "image decode failed");
                self.state = SessionState::Resolved(VerificationOutcome::fake(format!(
                    "Could not read the artifact ({failure}). Treat the item as counterfeit."
                )));
                return Ok(&self.state);
            }
        };

        let token = match veriseal_codec::decode_payload(&payload) {
            Ok(token) => token,
            Err(e) => {
                tracing::info!(error = %e, "payload failed validation");
                self.state = SessionState::Resolved(VerificationOutcome::fake(format!(
                    "The scanned payload is not a valid token ({e}). Treat the item as counterfeit."
                )));
                return Ok(&self.state);
            }
        };

        // Re-checked here, never cached-trusted.
        let Some(caller) = self.identity.clone() else {
            self.state = SessionState::Errored {
                message: "Connect your identity first, then scan again.".into(),
            };
            return Ok(&self.state);
        };

        self.submit_consume(token, caller).await;
        Ok(&self.state)
    }

    async fn submit_consume(&mut self, token: TokenId, caller: CallerIdentity) {
        self.state = SessionState::Submitting;
        tracing::debug!(token = %token, "submitting consume-request");

        let call = match self.transport.submit_consume(&token, &caller).await {
            Ok(call) => call,
            Err(e) => {
                tracing::warn!(error = %e, "consume submission failed");
                self.state = SessionState::Errored {
                    message: format!("Registry unreachable ({e}). Try again."),
                };
                return;
            }
        };

        // Acknowledged is not confirmed: only a confirmed outcome may
        // resolve the session.
        match self.transport.confirm(&call).await {
            Ok(CallOutcome::Consumed(receipt)) => {
                tracing::info!(token = %token, receipt = %receipt.tx_ref, "verified authentic");
                self.state = SessionState::Resolved(VerificationOutcome::authentic(receipt));
            }
            Ok(CallOutcome::Rejected(RejectReason::AlreadyConsumed)) => {
                tracing::info!(token = %token, "token already consumed");
                self.state = SessionState::Resolved(VerificationOutcome::already_consumed(
                    "This token was already used. Do not trust the item.",
                ));
            }
            Ok(CallOutcome::Rejected(RejectReason::NotRegistered)) => {
                tracing::info!(token = %token, "token never registered");
                self.state = SessionState::Resolved(VerificationOutcome::fake(
                    "This token is not recognized by the registry. Do not trust the item.",
                ));
            }
            Ok(other) => {
                tracing::error!(?other, "protocol violation: unexpected consume outcome");
                self.state = SessionState::Errored {
                    message: "The registry returned an unexpected response. Try again.".into(),
                };
            }
            Err(e) => {
                tracing::warn!(error = %e, "confirmation failed");
                self.state = SessionState::Errored {
                    message: format!("Could not confirm the result ({e}). Try again."),
                };
            }
        }
    }

    /// Return to `AwaitingImage` for another attempt with the identity
    /// kept. Valid only once a terminal state is reached and an identity
    /// is held.
    pub fn rescan(&mut self) -> Result<&SessionState, SessionError> {
        if !self.state.is_terminal() || self.identity.is_none() {
            return Err(SessionError::InvalidTransition {
                from: self.state.name(),
                action: "rescan",
            });
        }
        self.state = SessionState::AwaitingImage;
        Ok(&self.state)
    }

    /// Full reset to `Idle`. No residual state survives — identity,
    /// outcome, and any transaction reference are all dropped.
    pub fn reset(&mut self) {
        tracing::debug!(from = self.state.name(), "session reset");
        self.state = SessionState::Idle;
        self.identity = None;
    }
}
