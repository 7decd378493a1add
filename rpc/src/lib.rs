//! HTTP server for the token registry.
//!
//! One POST endpoint, an action envelope per request:
//! `register`, `consume`, `call_status`, `token_info`, `telemetry`.
//! Responses carry `{"result": ...}` or `{"error": "..."}`; business
//! rejections travel inside a successful `call_status` result as closed
//! outcome codes.

pub mod error;
pub mod handlers;
pub mod server;

pub use error::RpcError;
pub use server::{registry_router, RpcServer};
