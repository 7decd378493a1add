//! Nullable infrastructure for deterministic testing.
//!
//! All external collaborators of a verification session — the identity
//! provider, the image decoder, the registry transport — are abstracted
//! behind traits. This crate provides test-friendly implementations that
//! return scripted values, can be controlled programmatically, and never
//! touch the network.
//!
//! Usage: swap real implementations for nullables in tests.

pub mod identity;
pub mod image;
pub mod transport;

pub use identity::NullIdentityProvider;
pub use image::NullImageDecoder;
pub use transport::FlakyTransport;
