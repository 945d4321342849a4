use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::detection::DetectError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("detection failed: {0}")]
    Detection(#[from] DetectError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Detection(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match &self {
            AppError::BadRequest(msg) | AppError::NotFound(msg) => msg.clone(),
            AppError::Detection(_) => "detection failed".to_string(),
            AppError::Internal(_) => "internal server error".to_string(),
        };
        if status.is_server_error() {
            error!(error = ?self, "request failed");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_text(err: AppError) -> String {
        let bytes = to_bytes(err.into_response().into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn maps_variants_to_status_codes() {
        assert_eq!(
            AppError::bad_request("x").into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::not_found("x").into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(DetectError::Decode("bad".into()))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::from(anyhow::anyhow!("boom")).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn server_errors_hide_upstream_details() {
        let body = body_text(AppError::from(DetectError::Status {
            status: 500,
            body: "oom at node X".into(),
        }))
        .await;
        assert_eq!(body, r#"{"error":"detection failed"}"#);

        let body = body_text(AppError::from(
            anyhow::anyhow!("connection refused").context("upsert profile"),
        ))
        .await;
        assert_eq!(body, r#"{"error":"internal server error"}"#);
    }

    #[tokio::test]
    async fn client_errors_keep_their_message() {
        let body = body_text(AppError::bad_request("age must be between 0 and 120")).await;
        assert!(body.contains("age must be between 0 and 120"));
    }
}
