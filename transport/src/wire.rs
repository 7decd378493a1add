//! Wire contract shared by the HTTP client and the rpc server.
//!
//! Requests are a JSON envelope `{"action": ..., ...}`; responses carry
//! either `{"result": ...}` or `{"error": "..."}`. Business rejections
//! ride inside a successful `call_status` result so they are never
//! mistaken for transport failures.

use crate::RejectReason;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub identifier: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConsumeRequest {
    pub identifier: String,
    pub caller: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub call_id: String,
    pub submitted_at: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CallStatusRequest {
    pub call_id: String,
}

/// Confirmed status of a submitted call.
#[derive(Debug, Serialize, Deserialize)]
pub struct CallStatusResponse {
    /// "registered", "consumed", or "rejected".
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reject_reason: Option<RejectReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<ReceiptBody>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReceiptBody {
    /// Hex-encoded 32-byte transaction reference.
    pub tx_ref: String,
    pub consumed_at: u64,
    pub consumed_by: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenInfoRequest {
    pub identifier: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenInfoResponse {
    pub identifier: String,
    pub status: String,
    pub registered_at: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumed_at: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumed_by: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TelemetryResponse {
    pub registered: u64,
    pub consumed: u64,
}
