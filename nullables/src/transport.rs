//! Fault-injecting transport wrapper.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use veriseal_transport::{
    CallOutcome, PendingCall, RegistryTransport, TransportError,
};
use veriseal_types::{CallerIdentity, TokenId};

/// Wraps any transport and makes the next N calls fail as unreachable.
///
/// The wrapped registry is untouched by a failed call — exactly the
/// behavior of a network that dropped the request on the floor.
pub struct FlakyTransport {
    inner: Arc<dyn RegistryTransport>,
    failures_remaining: AtomicU32,
}

impl FlakyTransport {
    pub fn new(inner: Arc<dyn RegistryTransport>, failures: u32) -> Self {
        Self {
            inner,
            failures_remaining: AtomicU32::new(failures),
        }
    }

    /// Arm another batch of failures.
    pub fn fail_next(&self, failures: u32) {
        self.failures_remaining.store(failures, Ordering::SeqCst);
    }

    fn try_fail(&self) -> Result<(), TransportError> {
        let mut remaining = self.failures_remaining.load(Ordering::SeqCst);
        while remaining > 0 {
            match self.failures_remaining.compare_exchange(
                remaining,
                remaining - 1,
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => {
                    return Err(TransportError::Unreachable(
                        "injected transport failure".into(),
                    ))
                }
                Err(actual) => remaining = actual,
            }
        }
        Ok(())
    }
}

#[async_trait]
impl RegistryTransport for FlakyTransport {
    async fn submit_register(&self, id: &TokenId) -> Result<PendingCall, TransportError> {
        self.try_fail()?;
        self.inner.submit_register(id).await
    }

    async fn submit_consume(
        &self,
        id: &TokenId,
        caller: &CallerIdentity,
    ) -> Result<PendingCall, TransportError> {
        self.try_fail()?;
        self.inner.submit_consume(id, caller).await
    }

    async fn confirm(&self, call: &PendingCall) -> Result<CallOutcome, TransportError> {
        self.try_fail()?;
        self.inner.confirm(call).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veriseal_registry::RegistryEngine;
    use veriseal_store::MemoryTokenStore;
    use veriseal_transport::InProcessTransport;

    #[tokio::test]
    async fn fails_exactly_n_times_then_recovers() {
        let inner = Arc::new(InProcessTransport::new(Arc::new(RegistryEngine::new(
            MemoryTokenStore::new(),
        ))));
        let flaky = FlakyTransport::new(inner, 2);
        let id = TokenId::parse("uuid-1").unwrap();

        assert!(matches!(
            flaky.submit_register(&id).await,
            Err(TransportError::Unreachable(_))
        ));
        assert!(matches!(
            flaky.submit_register(&id).await,
            Err(TransportError::Unreachable(_))
        ));

        let call = flaky.submit_register(&id).await.unwrap();
        assert!(matches!(
            flaky.confirm(&call).await.unwrap(),
            CallOutcome::Registered
        ));
    }
}
