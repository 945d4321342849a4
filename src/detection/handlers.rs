use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::post,
    Json, Router,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{info, instrument, warn};

use super::services::{self, DetectedFood};
use crate::{daily_log::services::normalize_user, error::AppError, state::AppState};

#[derive(Debug, Serialize)]
pub struct DetectResponse {
    pub detections: Vec<DetectedFood>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logged: Option<usize>,
}

pub fn routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/detect/", post(detect_food))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}

/// POST /detect/ (multipart)
/// Fields: `file` (image, required), `user` (optional; logs each detection)
#[instrument(skip(state, mp))]
pub async fn detect_food(
    State(state): State<AppState>,
    mut mp: Multipart,
) -> Result<Json<DetectResponse>, AppError> {
    let mut file: Option<Bytes> = None;
    let mut user: Option<String> = None;
    while let Some(field) = mp
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                file = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| AppError::bad_request(e.to_string()))?,
                );
            }
            "user" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::bad_request(e.to_string()))?;
                if !text.trim().is_empty() {
                    user = Some(normalize_user(&text)?);
                }
            }
            _ => {}
        }
    }

    let Some(file) = file.filter(|f| !f.is_empty()) else {
        warn!("upload without file");
        return Err(AppError::bad_request("file is required"));
    };

    let found = services::detect(state.detector.as_ref(), file).await?;
    if found.is_empty() {
        return Ok(Json(DetectResponse {
            detections: found,
            message: Some("no known food detected".into()),
            logged: None,
        }));
    }

    let logged = match user {
        Some(user) => {
            let n = services::log_detections(&state.db, &user, &found).await?;
            info!(%user, count = n, "detections logged");
            Some(n)
        }
        None => None,
    };

    Ok(Json(DetectResponse {
        detections: found,
        message: None,
        logged,
    }))
}
