use crate::domain::MessageId;
use crate::http::error::ApiError;
use crate::http::extractors::RequestId;
use crate::http::types::{MessageDetailOut, MessageOut};
use crate::store::MessageStore;
use crate::Telemetry;
use axum::body::Bytes;
use axum::{extract::Path, extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::info;

/// Path token that makes DELETE clear the whole collection.
pub const DELETE_ALL: &str = "all";

pub struct HttpState {
    pub store: Arc<dyn MessageStore>,
    pub telemetry: Telemetry,
}

impl HttpState {
    pub fn new(store: Arc<dyn MessageStore>, telemetry: Telemetry) -> Self {
        Self { store, telemetry }
    }

    fn failed(&self, err: impl Into<ApiError>) -> ApiError {
        let err = err.into();
        match err {
            ApiError::NotFound => self.telemetry.lookups_missed.inc(),
            _ => self.telemetry.backend_errors.inc(),
        }
        err
    }
}

pub async fn list_messages(
    State(state): State<Arc<HttpState>>,
    RequestId(rid): RequestId,
) -> Result<Json<Vec<MessageOut>>, ApiError> {
    let _timer = state.telemetry.request_hist.start_timer();
    let msgs = state.store.list().await.map_err(|e| state.failed(e))?;
    info!(request_id = %rid, count = msgs.len(), "list messages");
    state.telemetry.messages_listed.inc();
    Ok(Json(msgs.into_iter().map(MessageOut::from).collect()))
}

pub async fn get_message(
    State(state): State<Arc<HttpState>>,
    RequestId(rid): RequestId,
    Path(id): Path<String>,
) -> Result<Json<MessageDetailOut>, ApiError> {
    let _timer = state.telemetry.request_hist.start_timer();
    let id: MessageId = id.parse().map_err(|e| state.failed(e))?;
    let msg = state.store.get(&id).await.map_err(|e| state.failed(e))?;
    let out = MessageDetailOut::from(msg);
    info!(request_id = %rid, %id, ispalindrome = out.ispalindrome, "get message");
    state.telemetry.messages_fetched.inc();
    Ok(Json(out))
}

/// The body is taken verbatim as the message text. Invalid UTF-8 is
/// replaced with U+FFFD rather than rejected.
pub async fn add_message(
    State(state): State<Arc<HttpState>>,
    RequestId(rid): RequestId,
    body: Bytes,
) -> Result<Json<MessageOut>, ApiError> {
    let _timer = state.telemetry.request_hist.start_timer();
    let text = String::from_utf8_lossy(&body).into_owned();
    let msg = state.store.insert(text).await.map_err(|e| state.failed(e))?;
    info!(request_id = %rid, id = %msg.id, "add message");
    state.telemetry.messages_added.inc();
    Ok(Json(MessageOut::from(msg)))
}

pub async fn delete_message(
    State(state): State<Arc<HttpState>>,
    RequestId(rid): RequestId,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let _timer = state.telemetry.request_hist.start_timer();
    if id == DELETE_ALL {
        let n = state.store.delete_all().await.map_err(|e| state.failed(e))?;
        info!(request_id = %rid, deleted = n, "delete all messages");
        state.telemetry.messages_deleted.inc_by(n);
        return Ok(StatusCode::OK);
    }

    let id: MessageId = id.parse().map_err(|e| state.failed(e))?;
    match state.store.delete(&id).await.map_err(|e| state.failed(e))? {
        0 => Err(state.failed(ApiError::NotFound)),
        n => {
            info!(request_id = %rid, %id, "delete message");
            state.telemetry.messages_deleted.inc_by(n);
            Ok(StatusCode::OK)
        }
    }
}

/// Unmatched paths and unsupported methods: 404, empty body.
pub async fn not_found() -> impl IntoResponse {
    StatusCode::NOT_FOUND
}

pub async fn metrics(State(state): State<Arc<HttpState>>) -> impl IntoResponse {
    let body = state.telemetry.gather();
    (StatusCode::OK, body)
}
