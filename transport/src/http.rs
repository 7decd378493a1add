//! HTTP client for a remote registry node.
//!
//! Speaks the `{"action": ...}` envelope: every request is a POST to the
//! node's base URL; the response carries `result` on success or `error`
//! for transport-level failures. Business rejections arrive inside a
//! `call_status` result.

use crate::error::TransportError;
use crate::wire::{
    CallStatusRequest, CallStatusResponse, ConsumeRequest, RegisterRequest, SubmitResponse,
    TelemetryResponse, TokenInfoRequest, TokenInfoResponse,
};
use crate::{CallOutcome, PendingCall, RegistryTransport};
use async_trait::async_trait;
use std::time::Duration;
use veriseal_types::{CallerIdentity, ConsumeReceipt, Timestamp, TokenId, TxRef};

/// Default timeout for registry requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connection timeout.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client wrapping `reqwest::Client` with the node's base URL.
#[derive(Clone)]
pub struct HttpRegistryClient {
    http: reqwest::Client,
    node_url: String,
}

impl HttpRegistryClient {
    /// Create a client targeting the given base URL
    /// (e.g. `http://127.0.0.1:7450`).
    pub fn new(node_url: impl Into<String>) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()
            .map_err(|e| TransportError::RequestFailed(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            node_url: node_url.into(),
        })
    }

    /// The configured node URL.
    pub fn node_url(&self) -> &str {
        &self.node_url
    }

    /// Send an action-envelope request and return the `result` field.
    async fn rpc_call(
        &self,
        action: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, TransportError> {
        let mut body = params;
        body.as_object_mut()
            .ok_or_else(|| TransportError::RequestFailed("params must be a JSON object".into()))?
            .insert("action".to_string(), serde_json::json!(action));

        let response = self.http.post(&self.node_url).json(&body).send().await.map_err(|e| {
            if e.is_timeout() {
                tracing::warn!(action, error = %e, "registry request timed out");
                TransportError::Unreachable(format!("request timed out: {e}"))
            } else if e.is_connect() {
                tracing::warn!(action, error = %e, "registry connection failed");
                TransportError::Unreachable(format!("connection failed: {e}"))
            } else {
                tracing::warn!(action, error = %e, "registry request failed");
                TransportError::RequestFailed(e.to_string())
            }
        })?;

        if !response.status().is_success() {
            tracing::warn!(action, status = %response.status(), "node returned an error status");
            return Err(TransportError::RequestFailed(format!(
                "node returned HTTP {}",
                response.status()
            )));
        }

        let json: serde_json::Value = response.json().await.map_err(|e| {
            tracing::warn!(action, error = %e, "node response was not JSON");
            TransportError::InvalidResponse(format!("invalid JSON response: {e}"))
        })?;

        if let Some(err) = json.get("error").and_then(|e| e.as_str()) {
            return Err(TransportError::RequestFailed(format!("node error: {err}")));
        }

        json.get("result")
            .cloned()
            .ok_or_else(|| TransportError::InvalidResponse("missing result field".into()))
    }

    fn pending_from(resp: SubmitResponse) -> PendingCall {
        PendingCall {
            call_id: resp.call_id,
            submitted_at: Timestamp::new(resp.submitted_at),
        }
    }

    /// Read a token's record without touching its state.
    pub async fn token_info(&self, id: &TokenId) -> Result<TokenInfoResponse, TransportError> {
        let request = TokenInfoRequest {
            identifier: id.to_string(),
        };
        let result = self
            .rpc_call("token_info", serde_json::to_value(request).unwrap_or_default())
            .await?;
        serde_json::from_value(result)
            .map_err(|e| TransportError::InvalidResponse(format!("invalid token_info response: {e}")))
    }

    /// Fetch registry-wide counters.
    pub async fn telemetry(&self) -> Result<TelemetryResponse, TransportError> {
        let result = self.rpc_call("telemetry", serde_json::json!({})).await?;
        serde_json::from_value(result)
            .map_err(|e| TransportError::InvalidResponse(format!("invalid telemetry response: {e}")))
    }
}

#[async_trait]
impl RegistryTransport for HttpRegistryClient {
    async fn submit_register(&self, id: &TokenId) -> Result<PendingCall, TransportError> {
        let request = RegisterRequest {
            identifier: id.to_string(),
        };
        let result = self
            .rpc_call("register", serde_json::to_value(request).unwrap_or_default())
            .await?;
        let resp: SubmitResponse = serde_json::from_value(result)
            .map_err(|e| TransportError::InvalidResponse(format!("invalid register response: {e}")))?;
        Ok(Self::pending_from(resp))
    }

    async fn submit_consume(
        &self,
        id: &TokenId,
        caller: &CallerIdentity,
    ) -> Result<PendingCall, TransportError> {
        let request = ConsumeRequest {
            identifier: id.to_string(),
            caller: caller.to_string(),
        };
        let result = self
            .rpc_call("consume", serde_json::to_value(request).unwrap_or_default())
            .await?;
        let resp: SubmitResponse = serde_json::from_value(result)
            .map_err(|e| TransportError::InvalidResponse(format!("invalid consume response: {e}")))?;
        Ok(Self::pending_from(resp))
    }

    async fn confirm(&self, call: &PendingCall) -> Result<CallOutcome, TransportError> {
        let request = CallStatusRequest {
            call_id: call.call_id.clone(),
        };
        let result = self
            .rpc_call("call_status", serde_json::to_value(request).unwrap_or_default())
            .await?;
        let resp: CallStatusResponse = serde_json::from_value(result).map_err(|e| {
            TransportError::InvalidResponse(format!("invalid call_status response: {e}"))
        })?;

        match resp.status.as_str() {
            "registered" => Ok(CallOutcome::Registered),
            "consumed" => {
                let body = resp.receipt.ok_or_else(|| {
                    TransportError::InvalidResponse("consumed status without receipt".into())
                })?;
                let tx_ref = TxRef::from_hex(&body.tx_ref).ok_or_else(|| {
                    TransportError::InvalidResponse("malformed receipt reference".into())
                })?;
                let consumed_by = CallerIdentity::parse(body.consumed_by).map_err(|e| {
                    TransportError::InvalidResponse(format!("malformed receipt identity: {e}"))
                })?;
                Ok(CallOutcome::Consumed(ConsumeReceipt {
                    tx_ref,
                    consumed_at: Timestamp::new(body.consumed_at),
                    consumed_by,
                }))
            }
            "rejected" => {
                let reason = resp.reject_reason.ok_or_else(|| {
                    TransportError::InvalidResponse("rejected status without reason".into())
                })?;
                Ok(CallOutcome::Rejected(reason))
            }
            "unknown_call" => Err(TransportError::UnknownCall(call.call_id.clone())),
            other => Err(TransportError::InvalidResponse(format!(
                "unrecognized call status: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn id(s: &str) -> TokenId {
        TokenId::parse(s).unwrap()
    }

    /// Serve exactly one connection with a canned HTTP response.
    async fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let _ = socket.write_all(response.as_bytes()).await;
            }
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn refused_connection_maps_to_unreachable() {
        // Bind then drop to get a port with nothing listening on it.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = HttpRegistryClient::new(format!("http://{addr}")).unwrap();
        assert!(matches!(
            client.submit_register(&id("uuid-1")).await,
            Err(TransportError::Unreachable(_))
        ));
    }

    #[tokio::test]
    async fn error_status_maps_to_request_failed() {
        let url = serve_once(
            "HTTP/1.1 500 Internal Server Error\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
        )
        .await;
        let client = HttpRegistryClient::new(url).unwrap();
        assert!(matches!(
            client.submit_register(&id("uuid-1")).await,
            Err(TransportError::RequestFailed(_))
        ));
    }

    #[tokio::test]
    async fn non_json_body_maps_to_invalid_response() {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 8\r\nconnection: close\r\n\r\nnot json",
        )
        .await;
        let client = HttpRegistryClient::new(url).unwrap();
        assert!(matches!(
            client.submit_register(&id("uuid-1")).await,
            Err(TransportError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn node_error_field_maps_to_request_failed() {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 31\r\nconnection: close\r\n\r\n{\"error\": \"invalid identifier\"}",
        )
        .await;
        let client = HttpRegistryClient::new(url).unwrap();
        match client.submit_register(&id("uuid-1")).await {
            Err(TransportError::RequestFailed(msg)) => {
                assert!(msg.contains("invalid identifier"));
            }
            other => panic!("expected a request failure, got {other:?}"),
        }
    }
}
