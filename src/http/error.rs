use crate::domain::DomainError;
use crate::store::StoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{debug, error, warn};

/// Everything a message handler can fail with. Responses never carry a body.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("not found")]
    NotFound,

    #[error(transparent)]
    InvalidId(#[from] DomainError),

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => ApiError::NotFound,
            other => ApiError::Store(other),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::InvalidId(_) | ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::NotFound => debug!("message not found"),
            ApiError::InvalidId(e) => warn!(error = %e, "rejecting request"),
            ApiError::Store(e) => error!(error = %e, "backend failure"),
        }
        self.status().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_not_found_maps_to_404() {
        let e = ApiError::from(StoreError::NotFound);
        assert!(matches!(e, ApiError::NotFound));
        assert_eq!(e.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn bad_id_and_backend_errors_are_500() {
        let e = ApiError::from(DomainError::InvalidId("zz".to_string()));
        assert_eq!(e.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
        let e = ApiError::from(StoreError::Unexpected("weird".to_string()));
        assert_eq!(e.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
