//! In-memory token store.
//!
//! The authoritative store for tests and single-process deployments.
//! A single mutex around the map makes every operation one critical
//! section, which is how the linearizable consume guarantee is met:
//! concurrent consumers of the same identifier are totally ordered by
//! lock acquisition, and exactly one sees `Registered`.

use crate::{StoreError, TokenStore};
use std::collections::HashMap;
use std::sync::Mutex;
use veriseal_types::{CallerIdentity, Timestamp, TokenId, TokenRecord, TokenStatus, TxRef};

/// Thread-safe in-memory token store.
pub struct MemoryTokenStore {
    tokens: Mutex<HashMap<String, TokenRecord>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self {
            tokens: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemoryTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStore for MemoryTokenStore {
    fn insert_new(&self, record: &TokenRecord) -> Result<(), StoreError> {
        let mut tokens = self
            .tokens
            .lock()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        if tokens.contains_key(record.id.as_str()) {
            return Err(StoreError::Duplicate(record.id.to_string()));
        }
        tokens.insert(record.id.as_str().to_string(), record.clone());
        Ok(())
    }

    fn consume(
        &self,
        id: &TokenId,
        caller: &CallerIdentity,
        receipt: TxRef,
        at: Timestamp,
    ) -> Result<TokenRecord, StoreError> {
        let mut tokens = self
            .tokens
            .lock()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        let record = tokens
            .get_mut(id.as_str())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if record.status.is_consumed() {
            return Err(StoreError::AlreadyConsumed(id.to_string()));
        }
        record.status = TokenStatus::Consumed;
        record.consumed_at = Some(at);
        record.consumed_by = Some(caller.clone());
        record.receipt = Some(receipt);
        Ok(record.clone())
    }

    fn get(&self, id: &TokenId) -> Result<Option<TokenRecord>, StoreError> {
        let tokens = self
            .tokens
            .lock()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(tokens.get(id.as_str()).cloned())
    }

    fn exists(&self, id: &TokenId) -> Result<bool, StoreError> {
        let tokens = self
            .tokens
            .lock()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(tokens.contains_key(id.as_str()))
    }

    fn token_count(&self) -> Result<u64, StoreError> {
        let tokens = self
            .tokens
            .lock()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(tokens.len() as u64)
    }

    fn consumed_count(&self) -> Result<u64, StoreError> {
        let tokens = self
            .tokens
            .lock()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(tokens.values().filter(|r| r.status.is_consumed()).count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> TokenRecord {
        TokenRecord::registered(TokenId::parse(id).unwrap(), Timestamp::new(1000))
    }

    fn caller() -> CallerIdentity {
        CallerIdentity::parse("0xabc123").unwrap()
    }

    #[test]
    fn insert_then_get() {
        let store = MemoryTokenStore::new();
        store.insert_new(&record("uuid-1")).unwrap();
        let got = store.get(&TokenId::parse("uuid-1").unwrap()).unwrap().unwrap();
        assert_eq!(got.status, TokenStatus::Registered);
        assert!(got.consumed_at.is_none());
    }

    #[test]
    fn duplicate_insert_rejected() {
        let store = MemoryTokenStore::new();
        store.insert_new(&record("uuid-1")).unwrap();
        assert!(matches!(
            store.insert_new(&record("uuid-1")),
            Err(StoreError::Duplicate(_))
        ));
    }

    #[test]
    fn duplicate_insert_rejected_even_after_consume() {
        let store = MemoryTokenStore::new();
        let id = TokenId::parse("uuid-1").unwrap();
        store.insert_new(&record("uuid-1")).unwrap();
        store
            .consume(&id, &caller(), TxRef::new([7u8; 32]), Timestamp::new(2000))
            .unwrap();
        // Consumed identifiers are never recycled.
        assert!(matches!(
            store.insert_new(&record("uuid-1")),
            Err(StoreError::Duplicate(_))
        ));
    }

    #[test]
    fn consume_transitions_once() {
        let store = MemoryTokenStore::new();
        let id = TokenId::parse("uuid-1").unwrap();
        store.insert_new(&record("uuid-1")).unwrap();

        let consumed = store
            .consume(&id, &caller(), TxRef::new([7u8; 32]), Timestamp::new(2000))
            .unwrap();
        assert_eq!(consumed.status, TokenStatus::Consumed);
        assert_eq!(consumed.consumed_at, Some(Timestamp::new(2000)));
        assert_eq!(consumed.consumed_by, Some(caller()));

        assert!(matches!(
            store.consume(&id, &caller(), TxRef::new([8u8; 32]), Timestamp::new(2001)),
            Err(StoreError::AlreadyConsumed(_))
        ));
    }

    #[test]
    fn consume_unregistered_not_found() {
        let store = MemoryTokenStore::new();
        let id = TokenId::parse("ghost").unwrap();
        assert!(matches!(
            store.consume(&id, &caller(), TxRef::ZERO, Timestamp::new(1)),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn counts_track_status() {
        let store = MemoryTokenStore::new();
        store.insert_new(&record("a")).unwrap();
        store.insert_new(&record("b")).unwrap();
        assert_eq!(store.token_count().unwrap(), 2);
        assert_eq!(store.consumed_count().unwrap(), 0);

        store
            .consume(
                &TokenId::parse("a").unwrap(),
                &caller(),
                TxRef::new([1u8; 32]),
                Timestamp::new(5),
            )
            .unwrap();
        assert_eq!(store.token_count().unwrap(), 2);
        assert_eq!(store.consumed_count().unwrap(), 1);
    }
}
