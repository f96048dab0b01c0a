//! HTTP error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use taskboard_core::ErrorKind;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub type RouteError = (StatusCode, Json<ErrorResponse>);

/// Errors returned by route handlers and extractors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Core(#[from] taskboard_core::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Core(err) => match err.kind() {
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::AccessDenied => StatusCode::FORBIDDEN,
                ErrorKind::Validation => StatusCode::BAD_REQUEST,
                ErrorKind::Persistence => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

fn route_error(status: StatusCode, error: impl Into<String>) -> RouteError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Core failures are already logged by the task service
        if status.is_server_error() {
            tracing::debug!("Responding {} for: {}", status, self);
        }
        route_error(status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn maps_core_errors_by_kind() {
        let id = Uuid::new_v4();
        let cases = [
            (taskboard_core::Error::TaskNotFound(id), StatusCode::NOT_FOUND),
            (
                taskboard_core::Error::AccessDenied {
                    task_id: id,
                    user_id: Uuid::new_v4(),
                },
                StatusCode::FORBIDDEN,
            ),
            (
                taskboard_core::Error::InvalidInput("bad".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                taskboard_core::Error::Storage("disk".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn response_carries_message() {
        let response = ApiError::Forbidden("Access denied".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn storage_failure_is_internal_error_with_message() {
        let err = ApiError::from(taskboard_core::Error::Storage("disk full".to_string()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Storage error: disk full");
    }
}
