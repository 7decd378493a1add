//! Fundamental types shared across the Veriseal protocol crates.
//!
//! Everything here is plain data: identifiers, timestamps, status enums,
//! and the records the registry persists. No I/O, no async.

pub mod error;
pub mod identity;
pub mod network;
pub mod receipt;
pub mod time;
pub mod token;

pub use error::TypeError;
pub use identity::CallerIdentity;
pub use network::NetworkDescriptor;
pub use receipt::{ConsumeReceipt, TxRef};
pub use time::Timestamp;
pub use token::{TokenId, TokenRecord, TokenStatus};
