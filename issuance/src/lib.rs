//! Issuance pipeline — mints single-use tokens for legitimate items
//! before distribution.
//!
//! One run: generate N fresh identifiers, register each with the
//! authoritative registry, and emit a scannable artifact per identifier.
//! Runs are additive — a later batch continues the manifest and can never
//! touch prior entries, because the registry refuses to reuse an
//! identifier in any status.

pub mod error;
pub mod generator;
pub mod manifest;
pub mod pipeline;
pub mod sink;

pub use error::IssuanceError;
pub use generator::{IdGenerator, UuidGenerator};
pub use manifest::{Manifest, ManifestEntry};
pub use pipeline::IssuancePipeline;
pub use sink::{ArtifactSink, FsArtifactSink};
