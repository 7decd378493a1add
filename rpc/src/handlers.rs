//! Action handlers — parse the envelope, run the operation, shape the
//! wire response.

use std::sync::Arc;

use serde_json::{json, Value};
use veriseal_store::TokenStore;
use veriseal_transport::wire::{
    CallStatusRequest, CallStatusResponse, ConsumeRequest, ReceiptBody, RegisterRequest,
    SubmitResponse, TelemetryResponse, TokenInfoRequest, TokenInfoResponse,
};
use veriseal_transport::{CallOutcome, InProcessTransport, PendingCall, RegistryTransport, TransportError};
use veriseal_types::{CallerIdentity, Timestamp, TokenId};

/// Shared server state: the engine-backed transport that parks outcomes
/// for `call_status` polling (re-pollable, so a dropped response is
/// recoverable).
pub struct RpcState<S> {
    pub transport: InProcessTransport<S>,
}

fn ok(result: impl serde::Serialize) -> Value {
    json!({ "result": result })
}

fn err(message: impl Into<String>) -> Value {
    json!({ "error": message.into() })
}

fn parse<T: serde::de::DeserializeOwned>(body: &Value) -> Result<T, Value> {
    serde_json::from_value(body.clone()).map_err(|e| err(format!("malformed request: {e}")))
}

pub async fn dispatch<S: TokenStore + 'static>(state: Arc<RpcState<S>>, body: Value) -> Value {
    let Some(action) = body.get("action").and_then(|a| a.as_str()).map(str::to_owned) else {
        return err("missing action field");
    };

    match action.as_str() {
        "register" => register(state, &body).await,
        "consume" => consume(state, &body).await,
        "call_status" => call_status(state, &body).await,
        "token_info" => token_info(state, &body),
        "telemetry" => telemetry(state),
        other => err(format!("unknown action: {other}")),
    }
}

async fn register<S: TokenStore + 'static>(state: Arc<RpcState<S>>, body: &Value) -> Value {
    let request: RegisterRequest = match parse(body) {
        Ok(r) => r,
        Err(e) => return e,
    };
    let id = match TokenId::parse(request.identifier) {
        Ok(id) => id,
        Err(e) => return err(format!("invalid identifier: {e}")),
    };
    match state.transport.submit_register(&id).await {
        Ok(call) => ok(SubmitResponse {
            call_id: call.call_id,
            submitted_at: call.submitted_at.as_secs(),
        }),
        Err(e) => err(e.to_string()),
    }
}

async fn consume<S: TokenStore + 'static>(state: Arc<RpcState<S>>, body: &Value) -> Value {
    let request: ConsumeRequest = match parse(body) {
        Ok(r) => r,
        Err(e) => return e,
    };
    let id = match TokenId::parse(request.identifier) {
        Ok(id) => id,
        Err(e) => return err(format!("invalid identifier: {e}")),
    };
    let caller = match CallerIdentity::parse(request.caller) {
        Ok(c) => c,
        Err(e) => return err(format!("invalid caller: {e}")),
    };
    match state.transport.submit_consume(&id, &caller).await {
        Ok(call) => ok(SubmitResponse {
            call_id: call.call_id,
            submitted_at: call.submitted_at.as_secs(),
        }),
        Err(e) => err(e.to_string()),
    }
}

async fn call_status<S: TokenStore + 'static>(state: Arc<RpcState<S>>, body: &Value) -> Value {
    let request: CallStatusRequest = match parse(body) {
        Ok(r) => r,
        Err(e) => return e,
    };
    let call = PendingCall {
        call_id: request.call_id,
        submitted_at: Timestamp::EPOCH,
    };
    match state.transport.confirm(&call).await {
        Ok(CallOutcome::Registered) => ok(CallStatusResponse {
            status: "registered".into(),
            reject_reason: None,
            receipt: None,
        }),
        Ok(CallOutcome::Consumed(receipt)) => ok(CallStatusResponse {
            status: "consumed".into(),
            reject_reason: None,
            receipt: Some(ReceiptBody {
                tx_ref: receipt.tx_ref.to_string(),
                consumed_at: receipt.consumed_at.as_secs(),
                consumed_by: receipt.consumed_by.to_string(),
            }),
        }),
        Ok(CallOutcome::Rejected(reason)) => ok(CallStatusResponse {
            status: "rejected".into(),
            reject_reason: Some(reason),
            receipt: None,
        }),
        Err(TransportError::UnknownCall(_)) => ok(CallStatusResponse {
            status: "unknown_call".into(),
            reject_reason: None,
            receipt: None,
        }),
        Err(e) => err(e.to_string()),
    }
}

fn token_info<S: TokenStore>(state: Arc<RpcState<S>>, body: &Value) -> Value {
    let request: TokenInfoRequest = match parse(body) {
        Ok(r) => r,
        Err(e) => return e,
    };
    let id = match TokenId::parse(request.identifier) {
        Ok(id) => id,
        Err(e) => return err(format!("invalid identifier: {e}")),
    };
    match state.transport.engine().token_info(&id) {
        Ok(Some(record)) => ok(TokenInfoResponse {
            identifier: record.id.to_string(),
            status: record.status.as_str().into(),
            registered_at: record.registered_at.as_secs(),
            consumed_at: record.consumed_at.map(|t| t.as_secs()),
            consumed_by: record.consumed_by.map(|c| c.to_string()),
        }),
        Ok(None) => err(format!("token not found: {id}")),
        Err(e) => err(e.to_string()),
    }
}

fn telemetry<S: TokenStore>(state: Arc<RpcState<S>>) -> Value {
    match state.transport.engine().summary() {
        Ok(summary) => ok(TelemetryResponse {
            registered: summary.registered,
            consumed: summary.consumed,
        }),
        Err(e) => err(e.to_string()),
    }
}
