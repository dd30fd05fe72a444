use crate::http::handlers::{add_message, delete_message, get_message, list_messages, metrics, not_found, HttpState};
use axum::{routing::get, Router};
use std::sync::Arc;

/// The message API. Only the four `/msg` operations are routed; any other
/// method or path answers 404 rather than axum's default 405.
pub fn router(state: Arc<HttpState>) -> Router {
    Router::new()
        .route("/msg", get(list_messages).post(add_message).fallback(not_found))
        .route("/msg/:id", get(get_message).delete(delete_message).fallback(not_found))
        .fallback(not_found)
        .with_state(state)
}

/// Prometheus scrape endpoint, served on its own listener.
pub fn metrics_router(state: Arc<HttpState>) -> Router {
    Router::new()
        .route("/metrics", get(metrics))
        .fallback(not_found)
        .with_state(state)
}
