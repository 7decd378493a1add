//! Abstract token storage for the Veriseal registry.
//!
//! Any storage backend (in-memory, embedded KV, SQL) implements
//! `TokenStore`; the registry engine depends only on the trait. The
//! backend owns the atomicity guarantee: `consume` is a single
//! check-and-set, so concurrent consumers of one identifier serialize
//! here and exactly one observes success.

pub mod error;
pub mod memory;

pub use error::StoreError;
pub use memory::MemoryTokenStore;

use veriseal_types::{CallerIdentity, Timestamp, TokenId, TokenRecord, TxRef};

/// Storage contract for token records.
///
/// Identifiers are never deleted and never reused: `insert_new` fails on
/// an existing identifier regardless of its status, so a consumed token's
/// slot can never be recycled by a later batch.
pub trait TokenStore: Send + Sync {
    /// Insert a freshly registered token.
    ///
    /// Fails with `StoreError::Duplicate` if the identifier exists in any
    /// status.
    fn insert_new(&self, record: &TokenRecord) -> Result<(), StoreError>;

    /// Atomically transition a token from `Registered` to `Consumed`,
    /// recording the caller, receipt, and time.
    ///
    /// The whole check-and-set runs as one critical section per backend:
    /// `NotFound` if the identifier was never registered, `AlreadyConsumed`
    /// if the transition already happened. Returns the updated record.
    fn consume(
        &self,
        id: &TokenId,
        caller: &CallerIdentity,
        receipt: TxRef,
        at: Timestamp,
    ) -> Result<TokenRecord, StoreError>;

    /// Fetch a token record, if present.
    fn get(&self, id: &TokenId) -> Result<Option<TokenRecord>, StoreError>;

    /// Whether the identifier exists in any status.
    fn exists(&self, id: &TokenId) -> Result<bool, StoreError>;

    /// Total number of tokens ever registered.
    fn token_count(&self) -> Result<u64, StoreError>;

    /// Number of tokens in the `Consumed` status.
    fn consumed_count(&self) -> Result<u64, StoreError>;
}
