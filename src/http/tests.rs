#[cfg(test)]
mod tests {
    use axum::extract::FromRequestParts;
    use crate::http::extractors::RequestId;
    use axum::http::Request;
    use axum::http::header::HeaderName;
    use axum::http::HeaderValue;
    use axum::http::StatusCode;
    use std::sync::Arc;
    use crate::store::{MemoryStore, MessageStore};
    use crate::telemetry::Telemetry;
    use crate::http::handlers::{add_message, delete_message, get_message, list_messages, HttpState};
    use axum::extract::{Path, State as AxState};
    use axum::response::IntoResponse;
    use axum::body::{to_bytes, Bytes};
    use serde_json::Value;

    fn state(store: MemoryStore) -> Arc<HttpState> {
        Arc::new(HttpState::new(Arc::new(store), Telemetry::new()))
    }

    fn rid() -> RequestId {
        RequestId("test".to_string())
    }

    async fn body_json(resp: axum::response::Response) -> Value {
        let bytes = to_bytes(resp.into_body(), 16_384).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn request_id_extractor_generates_uuid_when_missing() {
        let req = Request::builder().uri("/").body(()).unwrap();
        let (mut parts, _body) = req.into_parts();
        let rid = RequestId::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(rid.0.len(), 36);
    }

    #[tokio::test]
    async fn request_id_extractor_uses_header() {
        let req = Request::builder().uri("/").body(()).unwrap();
        let (mut parts, _body) = req.into_parts();
        parts.headers.insert(HeaderName::from_static("x-request-id"), HeaderValue::from_static("testid"));
        let rid = RequestId::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(rid.0, "testid");
    }

    #[tokio::test]
    async fn add_returns_generated_id() {
        let store = MemoryStore::new();
        let state = state(store.clone());
        let resp = add_message(AxState(state.clone()), rid(), Bytes::from_static(b"racecar")).await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        let v = body_json(resp).await;
        assert_eq!(v["message"], "racecar");
        let id = v["_id"].as_str().unwrap();
        assert_eq!(id.len(), 24);
        assert_eq!(store.get(&id.parse().unwrap()).await.unwrap().message, "racecar");
        assert_eq!(state.telemetry.messages_added.get(), 1);
    }

    #[tokio::test]
    async fn add_keeps_empty_body() {
        let state = state(MemoryStore::new());
        let resp = add_message(AxState(state), rid(), Bytes::new()).await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["message"], "");
    }

    #[tokio::test]
    async fn add_replaces_invalid_utf8() {
        let store = MemoryStore::new();
        let state = state(store.clone());
        let resp = add_message(AxState(state), rid(), Bytes::from_static(&[0xff, 0xfe, b'a'])).await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["message"], "\u{FFFD}\u{FFFD}a");
        assert_eq!(store.list().await.unwrap()[0].message, "\u{FFFD}\u{FFFD}a");
    }

    #[tokio::test]
    async fn get_attaches_palindrome_flag() {
        let store = MemoryStore::new();
        let rec = store.insert("noon".to_string()).await.unwrap();
        let resp = get_message(AxState(state(store)), rid(), Path(rec.id.to_hex())).await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        let v = body_json(resp).await;
        assert_eq!(v["_id"], rec.id.to_hex());
        assert_eq!(v["ispalindrome"], true);
    }

    #[tokio::test]
    async fn get_missing_returns_404() {
        let state = state(MemoryStore::new());
        let missing = crate::domain::MessageId::generate().to_hex();
        let resp = get_message(AxState(state.clone()), rid(), Path(missing)).await.into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(to_bytes(resp.into_body(), 1024).await.unwrap().is_empty());
        assert_eq!(state.telemetry.lookups_missed.get(), 1);
    }

    #[tokio::test]
    async fn get_malformed_id_is_server_error() {
        let state = state(MemoryStore::new());
        let resp = get_message(AxState(state.clone()), rid(), Path("nope".to_string())).await.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(state.telemetry.backend_errors.get(), 1);
    }

    #[tokio::test]
    async fn list_empty_is_literal_brackets() {
        let state = state(MemoryStore::new());
        let resp = list_messages(AxState(state), rid()).await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = to_bytes(resp.into_body(), 1024).await.unwrap();
        assert_eq!(&bytes[..], b"[]");
    }

    #[tokio::test]
    async fn list_omits_palindrome_flag() {
        let store = MemoryStore::new();
        store.insert("abba".to_string()).await.unwrap();
        let resp = list_messages(AxState(state(store)), rid()).await.into_response();
        let v = body_json(resp).await;
        assert_eq!(v.as_array().unwrap().len(), 1);
        assert!(v[0].get("ispalindrome").is_none());
    }

    #[tokio::test]
    async fn delete_then_delete_again() {
        let store = MemoryStore::new();
        let rec = store.insert("gone".to_string()).await.unwrap();
        let state = state(store);
        let first = delete_message(AxState(state.clone()), rid(), Path(rec.id.to_hex())).await.into_response();
        assert_eq!(first.status(), StatusCode::OK);
        let second = delete_message(AxState(state.clone()), rid(), Path(rec.id.to_hex())).await.into_response();
        assert_eq!(second.status(), StatusCode::NOT_FOUND);
        assert_eq!(state.telemetry.messages_deleted.get(), 1);
    }

    #[tokio::test]
    async fn delete_all_always_ok() {
        let store = MemoryStore::new();
        store.insert("a".to_string()).await.unwrap();
        store.insert("b".to_string()).await.unwrap();
        let state = state(store.clone());
        let resp = delete_message(AxState(state.clone()), rid(), Path("all".to_string())).await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(store.len().await, 0);
        let resp = delete_message(AxState(state), rid(), Path("all".to_string())).await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
