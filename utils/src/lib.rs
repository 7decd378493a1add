//! Shared utilities.

pub mod logging;

pub use logging::{init_tracing, init_tracing_with};
