//! HTTP surface: the platform webhook plus health endpoints.
//!
//! The webhook always answers 200 with a reply object. Bad bodies, bad query
//! strings and even a panicking dialogue turn become an apology reply with the
//! failure recorded in `context.error`.

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, QueryRejection},
        DefaultBodyLimit, Query, State,
    },
    http::{header::CONTENT_TYPE, HeaderMap},
    response::Json,
    routing::get,
    Router,
};
use jester_core::{
    config::ServerConfig, context::ConversationContext, error::JesterError, message::Reply,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, info_span, Instrument};
use uuid::Uuid;

use crate::dialogue::Dialogue;
use crate::extract;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    dialogue: Arc<Dialogue>,
    uptime: Instant,
}

impl ApiState {
    pub fn new(dialogue: Arc<Dialogue>) -> Self {
        Self {
            dialogue,
            uptime: Instant::now(),
        }
    }
}

/// `GET /`: static liveness check.
async fn root() -> &'static str {
    "OK"
}

/// `GET /api/health`: health check with uptime and joke source.
async fn health(State(state): State<ApiState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "uptime_secs": state.uptime.elapsed().as_secs(),
        "source": state.dialogue.source_name(),
    }))
}

/// Whether the body should be read as JSON.
///
/// A missing `Content-Type` is read as JSON. Any other non-JSON type (form
/// posts, `text/plain`) yields an empty body, and the turn goes on.
fn is_json_body(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(CONTENT_TYPE) else {
        return true;
    };
    let mime = value
        .to_str()
        .unwrap_or_default()
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || mime.ends_with("+json")
}

/// Parse an optional JSON body. No body at all reads as `{}`.
fn parse_body(bytes: &[u8]) -> Result<Value, JesterError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Default::default()));
    }
    Ok(serde_json::from_slice(bytes)?)
}

/// `GET|POST /webhook/joke`: one dialogue turn.
async fn joke_webhook(
    State(state): State<ApiState>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Json<Reply> {
    let request_id = Uuid::new_v4();
    let span = info_span!("webhook", %request_id);
    handle_turn(state, query, &headers, body)
        .instrument(span)
        .await
}

async fn handle_turn(
    state: ApiState,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
    headers: &HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Json<Reply> {
    let Query(query) = match query {
        Ok(q) => q,
        Err(e) => {
            let err = JesterError::InvalidRequest(format!("bad query string: {e}"));
            return Json(Dialogue::internal_failure(&err, ConversationContext::new()));
        }
    };

    let body = match body
        .map_err(|e| JesterError::InvalidRequest(format!("unreadable body: {e}")))
        .and_then(|bytes| {
            if is_json_body(headers) {
                parse_body(&bytes)
            } else {
                debug!("webhook: non-JSON content type, ignoring {} body bytes", bytes.len());
                Ok(Value::Object(Default::default()))
            }
        })
    {
        Ok(v) => v,
        Err(e) => return Json(Dialogue::internal_failure(&e, ConversationContext::new())),
    };

    let turn = extract::parse_turn(&query, &body);
    info!(
        "webhook: state={:?} hint_source={} utterance_len={}",
        turn.context.state(),
        turn.hint.source.name(),
        turn.utterance.chars().count()
    );

    // Run the turn on its own task so a panic stays inside this request.
    let context = turn.context.clone();
    let dialogue = Arc::clone(&state.dialogue);
    let task = tokio::spawn(async move { dialogue.handle(turn).await }.in_current_span());
    match task.await {
        Ok(reply) => Json(reply),
        Err(e) => {
            error!("webhook: dialogue task failed: {e}");
            let err = JesterError::Internal(e.to_string());
            Json(Dialogue::internal_failure(&err, context))
        }
    }
}

/// Build the axum router with shared state.
pub fn build_router(state: ApiState, body_limit: usize) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health))
        .route("/webhook/joke", get(joke_webhook).post(joke_webhook))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

/// Serve until Ctrl-C or SIGTERM.
pub async fn serve(config: &ServerConfig, dialogue: Arc<Dialogue>) -> Result<(), JesterError> {
    let app = build_router(ApiState::new(dialogue), config.body_limit_bytes);
    let addr = config.addr();

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("webhook server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("webhook server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
