//! In-process transport — engine-backed, same two-phase semantics as the
//! remote client.
//!
//! The registry transition itself is applied atomically at submit time;
//! the outcome is parked in a confirmation ledger and read back by
//! `confirm`. A session cancelled between submit and confirm therefore
//! never leaves the registry half-written, and the submitted/confirmed
//! distinction stays observable to callers. Confirmation is a
//! non-destructive read: a caller whose confirmation response was lost in
//! transit can poll the same call again and still receive its receipt.

use crate::error::TransportError;
use crate::{CallOutcome, PendingCall, RegistryTransport, RejectReason};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use veriseal_registry::{RegistryEngine, RegistryError};
use veriseal_store::TokenStore;
use veriseal_types::{CallerIdentity, Timestamp, TokenId};

pub struct InProcessTransport<S> {
    engine: Arc<RegistryEngine<S>>,
    confirmations: Mutex<HashMap<String, CallOutcome>>,
}

impl<S: TokenStore> InProcessTransport<S> {
    pub fn new(engine: Arc<RegistryEngine<S>>) -> Self {
        Self {
            engine,
            confirmations: Mutex::new(HashMap::new()),
        }
    }

    pub fn engine(&self) -> &RegistryEngine<S> {
        &self.engine
    }

    fn park(&self, outcome: CallOutcome) -> Result<PendingCall, TransportError> {
        let call_id = uuid::Uuid::new_v4().to_string();
        self.confirmations
            .lock()
            .map_err(|e| TransportError::RequestFailed(e.to_string()))?
            .insert(call_id.clone(), outcome);
        Ok(PendingCall {
            call_id,
            submitted_at: Timestamp::now(),
        })
    }
}

#[async_trait]
impl<S: TokenStore + 'static> RegistryTransport for InProcessTransport<S> {
    async fn submit_register(&self, id: &TokenId) -> Result<PendingCall, TransportError> {
        let outcome = match self.engine.register(id) {
            Ok(_) => CallOutcome::Registered,
            Err(RegistryError::DuplicateIdentifier(_)) => {
                CallOutcome::Rejected(RejectReason::DuplicateIdentifier)
            }
            Err(e) => return Err(TransportError::RequestFailed(e.to_string())),
        };
        self.park(outcome)
    }

    async fn submit_consume(
        &self,
        id: &TokenId,
        caller: &CallerIdentity,
    ) -> Result<PendingCall, TransportError> {
        let outcome = match self.engine.consume_if_registered(id, caller) {
            Ok(receipt) => CallOutcome::Consumed(receipt),
            Err(RegistryError::NotRegistered(_)) => {
                CallOutcome::Rejected(RejectReason::NotRegistered)
            }
            Err(RegistryError::AlreadyConsumed(_)) => {
                CallOutcome::Rejected(RejectReason::AlreadyConsumed)
            }
            Err(e) => return Err(TransportError::RequestFailed(e.to_string())),
        };
        self.park(outcome)
    }

    async fn confirm(&self, call: &PendingCall) -> Result<CallOutcome, TransportError> {
        self.confirmations
            .lock()
            .map_err(|e| TransportError::RequestFailed(e.to_string()))?
            .get(&call.call_id)
            .cloned()
            .ok_or_else(|| TransportError::UnknownCall(call.call_id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veriseal_store::MemoryTokenStore;

    fn transport() -> InProcessTransport<MemoryTokenStore> {
        InProcessTransport::new(Arc::new(RegistryEngine::new(MemoryTokenStore::new())))
    }

    fn id(s: &str) -> TokenId {
        TokenId::parse(s).unwrap()
    }

    fn caller() -> CallerIdentity {
        CallerIdentity::parse("0xcaller").unwrap()
    }

    #[tokio::test]
    async fn register_then_consume_confirms() {
        let t = transport();
        let call = t.submit_register(&id("uuid-1")).await.unwrap();
        assert!(matches!(
            t.confirm(&call).await.unwrap(),
            CallOutcome::Registered
        ));

        let call = t.submit_consume(&id("uuid-1"), &caller()).await.unwrap();
        match t.confirm(&call).await.unwrap() {
            CallOutcome::Consumed(receipt) => assert!(!receipt.tx_ref.is_zero()),
            other => panic!("expected consumption, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn rejections_ride_inside_confirmation() {
        let t = transport();
        let call = t.submit_consume(&id("ghost"), &caller()).await.unwrap();
        assert!(matches!(
            t.confirm(&call).await.unwrap(),
            CallOutcome::Rejected(RejectReason::NotRegistered)
        ));

        t.submit_register(&id("dup")).await.unwrap();
        let call = t.submit_register(&id("dup")).await.unwrap();
        assert!(matches!(
            t.confirm(&call).await.unwrap(),
            CallOutcome::Rejected(RejectReason::DuplicateIdentifier)
        ));
    }

    #[tokio::test]
    async fn unknown_call_id_is_a_transport_error() {
        let t = transport();
        let bogus = PendingCall {
            call_id: "nope".into(),
            submitted_at: Timestamp::EPOCH,
        };
        assert!(matches!(
            t.confirm(&bogus).await,
            Err(TransportError::UnknownCall(_))
        ));
    }

    #[tokio::test]
    async fn confirmation_can_be_repolled() {
        let t = transport();
        t.submit_register(&id("uuid-1")).await.unwrap();
        let call = t.submit_consume(&id("uuid-1"), &caller()).await.unwrap();

        // A dropped confirmation response must be recoverable: polling the
        // same call again yields the same receipt, not FAKE/USED.
        let first = match t.confirm(&call).await.unwrap() {
            CallOutcome::Consumed(receipt) => receipt,
            other => panic!("expected consumption, got {other:?}"),
        };
        let second = match t.confirm(&call).await.unwrap() {
            CallOutcome::Consumed(receipt) => receipt,
            other => panic!("expected consumption, got {other:?}"),
        };
        assert_eq!(first.tx_ref, second.tx_ref);
    }
}
