//! The registry engine — register and consume over an abstract store.

use crate::error::RegistryError;
use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use veriseal_store::{StoreError, TokenStore};
use veriseal_types::{CallerIdentity, ConsumeReceipt, Timestamp, TokenId, TokenRecord, TxRef};

/// Authoritative registry over any `TokenStore` backend.
///
/// Registration and consumption are the only two state-changing
/// operations in the protocol; everything else reads. The engine never
/// caches token status — every answer comes from the store.
pub struct RegistryEngine<S> {
    store: S,
    /// Monotonic sequence folded into receipt derivation so that two
    /// consumptions can never share a `TxRef`, even across identifiers.
    sequence: AtomicU64,
}

impl<S: TokenStore> RegistryEngine<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            sequence: AtomicU64::new(1),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Register a fresh identifier.
    ///
    /// Fails with `DuplicateIdentifier` if the identifier exists in any
    /// status — a consumed token's slot is never recycled by a later
    /// batch.
    pub fn register(&self, id: &TokenId) -> Result<TokenRecord, RegistryError> {
        let record = TokenRecord::registered(id.clone(), Timestamp::now());
        match self.store.insert_new(&record) {
            Ok(()) => {
                tracing::info!(token = %id, "token registered");
                Ok(record)
            }
            Err(StoreError::Duplicate(_)) => {
                tracing::warn!(token = %id, "registration rejected: duplicate identifier");
                Err(RegistryError::DuplicateIdentifier(id.to_string()))
            }
            Err(e) => Err(RegistryError::Store(e.to_string())),
        }
    }

    /// Atomically consume a registered token.
    ///
    /// Exactly one concurrent caller for a given identifier observes
    /// `Ok`; everyone else gets `AlreadyConsumed`. The caller identity is
    /// recorded for audit but does not gate consumption — this is a
    /// bearer-token model, not access control.
    pub fn consume_if_registered(
        &self,
        id: &TokenId,
        caller: &CallerIdentity,
    ) -> Result<ConsumeReceipt, RegistryError> {
        let now = Timestamp::now();
        let receipt = self.derive_receipt(id, caller, now);
        match self.store.consume(id, caller, receipt, now) {
            Ok(record) => {
                tracing::info!(
                    token = %id,
                    caller = %caller.abbreviated(),
                    receipt = %receipt,
                    "token consumed"
                );
                Ok(ConsumeReceipt {
                    tx_ref: receipt,
                    consumed_at: record.consumed_at.unwrap_or(now),
                    consumed_by: caller.clone(),
                })
            }
            Err(StoreError::NotFound(_)) => {
                tracing::warn!(token = %id, "consume rejected: never registered");
                Err(RegistryError::NotRegistered(id.to_string()))
            }
            Err(StoreError::AlreadyConsumed(_)) => {
                tracing::warn!(token = %id, "consume rejected: already consumed");
                Err(RegistryError::AlreadyConsumed(id.to_string()))
            }
            Err(e) => Err(RegistryError::Store(e.to_string())),
        }
    }

    /// Read a token's record without touching its state.
    pub fn token_info(&self, id: &TokenId) -> Result<Option<TokenRecord>, RegistryError> {
        self.store
            .get(id)
            .map_err(|e| RegistryError::Store(e.to_string()))
    }

    /// Registry-wide counters.
    pub fn summary(&self) -> Result<RegistrySummary, RegistryError> {
        Ok(RegistrySummary {
            registered: self
                .store
                .token_count()
                .map_err(|e| RegistryError::Store(e.to_string()))?,
            consumed: self
                .store
                .consumed_count()
                .map_err(|e| RegistryError::Store(e.to_string()))?,
        })
    }

    /// Receipt = Blake2b-256(id ‖ 0x00 ‖ caller ‖ timestamp ‖ sequence).
    fn derive_receipt(&self, id: &TokenId, caller: &CallerIdentity, at: Timestamp) -> TxRef {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        let mut hasher = Blake2b::<U32>::new();
        hasher.update(id.as_bytes());
        hasher.update([0u8]);
        hasher.update(caller.as_str().as_bytes());
        hasher.update(at.as_secs().to_be_bytes());
        hasher.update(seq.to_be_bytes());
        TxRef::new(hasher.finalize().into())
    }
}

/// Summary statistics for the registry.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct RegistrySummary {
    pub registered: u64,
    pub consumed: u64,
}
