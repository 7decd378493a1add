//! Axum-based registry server.

use crate::error::RpcError;
use crate::handlers::{dispatch, RpcState};
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use veriseal_registry::RegistryEngine;
use veriseal_store::TokenStore;
use veriseal_transport::InProcessTransport;

/// Build the router for a registry engine.
///
/// Split out from `RpcServer` so tests can drive the router without
/// binding a socket.
pub fn registry_router<S: TokenStore + 'static>(engine: Arc<RegistryEngine<S>>) -> Router {
    let state = Arc::new(RpcState {
        transport: InProcessTransport::new(engine),
    });
    Router::new()
        .route("/", post(handle::<S>))
        // Scanner front-ends run on other origins.
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn handle<S: TokenStore + 'static>(
    State(state): State<Arc<RpcState<S>>>,
    Json(body): Json<serde_json::Value>,
) -> Json<serde_json::Value> {
    Json(dispatch(state, body).await)
}

pub struct RpcServer {
    pub bind_addr: String,
}

impl RpcServer {
    pub fn new(bind_addr: impl Into<String>) -> Self {
        Self {
            bind_addr: bind_addr.into(),
        }
    }

    /// Bind and serve until the task is cancelled.
    pub async fn start<S: TokenStore + 'static>(
        &self,
        engine: Arc<RegistryEngine<S>>,
    ) -> Result<(), RpcError> {
        let router = registry_router(engine);
        let listener =
            tokio::net::TcpListener::bind(&self.bind_addr)
                .await
                .map_err(|e| RpcError::Bind {
                    addr: self.bind_addr.clone(),
                    source: e,
                })?;
        tracing::info!(addr = %self.bind_addr, "registry rpc listening");
        axum::serve(listener, router).await?;
        Ok(())
    }
}
