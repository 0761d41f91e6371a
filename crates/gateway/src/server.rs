//! HTTP hosting for one entrypoint: `POST /invocations` and `GET /ping`.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use proto::{GatewayError, RequestContext, RequestError};
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::entrypoint::{AgentGateway, Entrypoint};

/// Header carrying the runtime session id.
pub const SESSION_HEADER: &str = "x-amzn-bedrock-agentcore-runtime-session-id";

struct ServerState {
    gateway: AgentGateway,
    entrypoint: Entrypoint,
}

/// Builds the router serving `entrypoint`.
pub fn router(gateway: AgentGateway, entrypoint: Entrypoint) -> Router {
    let state = Arc::new(ServerState {
        gateway,
        entrypoint,
    });
    Router::new()
        .route("/ping", get(ping_handler))
        .route("/invocations", post(invocations_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Binds `host:port` and serves until Ctrl-C.
pub async fn serve(
    gateway: AgentGateway,
    entrypoint: Entrypoint,
    host: &str,
    port: u16,
) -> Result<(), GatewayError> {
    let listener = tokio::net::TcpListener::bind((host, port))
        .await
        .map_err(|e| GatewayError::Bind(format!("{host}:{port}: {e}")))?;
    serve_listener(listener, gateway, entrypoint).await
}

/// Serves on an already bound listener until Ctrl-C.
pub async fn serve_listener(
    listener: tokio::net::TcpListener,
    gateway: AgentGateway,
    entrypoint: Entrypoint,
) -> Result<(), GatewayError> {
    let addr = listener
        .local_addr()
        .map_err(|e| GatewayError::Bind(e.to_string()))?;
    info!(%addr, entrypoint = %entrypoint, "Agent gateway listening");

    axum::serve(listener, router(gateway, entrypoint))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .map_err(|e| GatewayError::Serve(e.to_string()))?;

    info!("Agent gateway stopped");
    Ok(())
}

// ─── Axum handlers ─────────────────────────────────────────

async fn ping_handler() -> Json<Value> {
    Json(json!({"status": "Healthy"}))
}

async fn invocations_handler(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let ctx = request_context(&headers);
    let result = match parse_body(&body) {
        Ok(payload) => state.gateway.dispatch(state.entrypoint, payload, &ctx).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(response) => Json(response).into_response(),
        Err(e) => error_response(&ctx, e),
    }
}

/// Parses the raw body regardless of content type.
fn parse_body(body: &[u8]) -> Result<Value, proto::Error> {
    serde_json::from_slice(body)
        .map_err(|e| RequestError::InvalidPayload(format!("body is not valid JSON: {e}")).into())
}

fn error_response(ctx: &RequestContext, e: proto::Error) -> Response {
    let status = error_status(&e);
    if status.is_server_error() {
        error!(request_id = ctx.request_id().unwrap_or("-"), "Invocation failed: {e}");
    } else {
        warn!(request_id = ctx.request_id().unwrap_or("-"), "Rejected request: {e}");
    }
    (status, Json(json!({"error": e.to_string()}))).into_response()
}

/// Builds the request context from transport headers.
fn request_context(headers: &HeaderMap) -> RequestContext {
    let ctx = RequestContext::new().with_request_id(Uuid::new_v4().to_string());
    match headers.get(SESSION_HEADER).and_then(|v| v.to_str().ok()) {
        Some(session) if !session.is_empty() => ctx.with_session_id(session),
        _ => ctx,
    }
}

/// HTTP status for each error class.
fn error_status(err: &proto::Error) -> StatusCode {
    match err {
        proto::Error::MalformedRequest(_) => StatusCode::BAD_REQUEST,
        proto::Error::Invocation(_) => StatusCode::BAD_GATEWAY,
        proto::Error::Config(_) | proto::Error::Gateway(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
