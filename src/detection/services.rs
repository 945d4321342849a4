use anyhow::Context;
use bytes::Bytes;
use image::RgbImage;
use serde::Serialize;
use sqlx::PgPool;
use time::OffsetDateTime;

use super::client::{Detector, RawDetections};
use super::{labels, DetectError};
use crate::daily_log::{repo as log_repo, repo_types::NewLogEntry};
use crate::foods::{self, MacroFacts};

/// Inclusive lower bound on confidence.
pub const CONFIDENCE_THRESHOLD: f32 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detection {
    pub class_id: i64,
    pub food: &'static str,
    pub confidence: f32,
    #[serde(rename = "box")]
    pub bbox: [f32; 4],
}

#[derive(Debug, Clone, Serialize)]
pub struct DetectedFood {
    #[serde(flatten)]
    pub detection: Detection,
    pub macronutrients: MacroFacts,
}

/// Keeps confident detections of known food classes.
pub fn filter_detections(raw: &RawDetections) -> Vec<Detection> {
    raw.class_ids
        .iter()
        .zip(&raw.scores)
        .zip(&raw.boxes)
        .filter(|((_, score), _)| **score >= CONFIDENCE_THRESHOLD)
        .map(|((class_id, score), bbox)| Detection {
            class_id: *class_id,
            food: labels::label_or_unknown(*class_id),
            confidence: *score,
            bbox: *bbox,
        })
        .filter(|d| d.food != labels::UNKNOWN)
        .collect()
}

pub fn decode_rgb(bytes: &[u8]) -> Result<RgbImage, DetectError> {
    let img = image::load_from_memory(bytes).map_err(|e| DetectError::Decode(e.to_string()))?;
    Ok(img.to_rgb8())
}

/// Decode off the async runtime, run the model and attach macro data.
pub async fn detect(detector: &dyn Detector, body: Bytes) -> Result<Vec<DetectedFood>, DetectError> {
    let image = tokio::task::spawn_blocking(move || decode_rgb(&body)).await??;
    let raw = detector.infer(image).await?;
    Ok(filter_detections(&raw)
        .into_iter()
        .map(|d| DetectedFood {
            macronutrients: foods::lookup(d.food),
            detection: d,
        })
        .collect())
}

/// One log row per detection, all or nothing.
pub async fn log_detections(
    db: &PgPool,
    user: &str,
    found: &[DetectedFood],
) -> anyhow::Result<usize> {
    let logged_at = OffsetDateTime::now_utc();
    let mut tx = db.begin().await.context("begin tx")?;
    for f in found {
        log_repo::insert_entry_tx(
            &mut tx,
            &NewLogEntry {
                user,
                food_name: f.detection.food,
                macros: f.macronutrients.into(),
                logged_at,
            },
        )
        .await?;
    }
    tx.commit().await.context("commit tx")?;
    Ok(found.len())
}
