//! Token registry — the single source of truth for "genuine" and
//! "already used".
//!
//! Per identifier the state machine is:
//!
//! ```text
//! ∅ --register--> Registered --consume_if_registered--> Consumed
//! ```
//!
//! `Consumed` is terminal, no transition is reversible, and identifiers
//! are never reused. Atomicity of the consume transition comes from the
//! backing `TokenStore`; the engine adds receipt derivation, audit
//! logging, and telemetry.

pub mod engine;
pub mod error;

pub use engine::{RegistryEngine, RegistrySummary};
pub use error::RegistryError;
