//! Identifier generation.

use veriseal_types::TokenId;

/// Source of fresh, globally unique identifiers.
///
/// Collision probability must be negligible at realistic batch sizes;
/// the pipeline still retries on a registry-reported duplicate, so a
/// generator only has to be overwhelmingly — not perfectly — unique.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> TokenId;
}

/// Random UUID v4 identifiers: 122 random bits per identifier.
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> TokenId {
        // A hyphenated v4 UUID always satisfies TokenId's character rules.
        TokenId::parse(uuid::Uuid::new_v4().to_string())
            .unwrap_or_else(|_| unreachable!("uuid string form is always a valid TokenId"))
    }
}
