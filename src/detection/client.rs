use std::time::Duration;

use async_trait::async_trait;
use image::RgbImage;
use serde::{ser::SerializeSeq, Deserialize, Serialize, Serializer};
use tracing::{debug, info};

use super::DetectError;
use crate::config::DetectorConfig;

/// Raw model output, one slot per candidate box.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDetections {
    pub class_ids: Vec<i64>,
    pub scores: Vec<f32>,
    /// `[ymin, xmin, ymax, xmax]`, normalized to the image size.
    pub boxes: Vec<[f32; 4]>,
}

#[async_trait]
pub trait Detector: Send + Sync {
    /// Errors unless the model is loaded and serving.
    async fn ready(&self) -> Result<(), DetectError>;
    async fn infer(&self, image: RgbImage) -> Result<RawDetections, DetectError>;
}

/// Object detector hosted by a TensorFlow Serving instance (REST API).
#[derive(Clone)]
pub struct TfServingDetector {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl TfServingDetector {
    pub fn new(cfg: &DetectorConfig) -> Result<Self, DetectError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: cfg.url.trim_end_matches('/').to_string(),
            model: cfg.model.clone(),
        })
    }

    fn model_url(&self) -> String {
        format!("{}/v1/models/{}", self.base_url, self.model)
    }
}

#[derive(Deserialize)]
struct ModelStatus {
    #[serde(default)]
    model_version_status: Vec<VersionStatus>,
}

#[derive(Deserialize)]
struct VersionStatus {
    state: String,
}

#[derive(Serialize)]
struct PredictRequest<'a> {
    signature_name: &'static str,
    instances: [PixelRows<'a>; 1],
}

/// Serializes an image as nested `[H][W][3]` uint8 arrays.
struct PixelRows<'a>(&'a RgbImage);

impl Serialize for PixelRows<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let img = self.0;
        let mut rows = serializer.serialize_seq(Some(img.height() as usize))?;
        for y in 0..img.height() {
            let row: Vec<[u8; 3]> = (0..img.width()).map(|x| img.get_pixel(x, y).0).collect();
            rows.serialize_element(&row)?;
        }
        rows.end()
    }
}

/// `:predict` request body. Large images produce large bodies, so callers run
/// this off the async runtime.
fn encode_predict_body(image: &RgbImage) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(&PredictRequest {
        signature_name: "serving_default",
        instances: [PixelRows(image)],
    })
}

#[derive(Deserialize)]
struct PredictResponse {
    predictions: Vec<Prediction>,
}

#[derive(Deserialize)]
struct Prediction {
    detection_classes: Vec<f32>,
    detection_scores: Vec<f32>,
    detection_boxes: Vec<[f32; 4]>,
}

impl TryFrom<PredictResponse> for RawDetections {
    type Error = DetectError;

    fn try_from(resp: PredictResponse) -> Result<Self, Self::Error> {
        let p = resp
            .predictions
            .into_iter()
            .next()
            .ok_or_else(|| DetectError::Malformed("no predictions".into()))?;
        let n = p.detection_scores.len();
        if p.detection_classes.len() != n || p.detection_boxes.len() != n {
            return Err(DetectError::Malformed(format!(
                "length mismatch: {} classes, {} scores, {} boxes",
                p.detection_classes.len(),
                n,
                p.detection_boxes.len()
            )));
        }
        Ok(RawDetections {
            // class ids come back as floats; truncate
            class_ids: p.detection_classes.iter().map(|c| *c as i64).collect(),
            scores: p.detection_scores,
            boxes: p.detection_boxes,
        })
    }
}

async fn error_for_status(resp: reqwest::Response) -> Result<reqwest::Response, DetectError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(DetectError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl Detector for TfServingDetector {
    async fn ready(&self) -> Result<(), DetectError> {
        let resp = self.client.get(self.model_url()).send().await?;
        let status: ModelStatus = error_for_status(resp).await?.json().await?;
        if status
            .model_version_status
            .iter()
            .any(|v| v.state == "AVAILABLE")
        {
            info!(model = %self.model, "detector model available");
            Ok(())
        } else {
            Err(DetectError::NotReady(self.model.clone()))
        }
    }

    async fn infer(&self, image: RgbImage) -> Result<RawDetections, DetectError> {
        let body = tokio::task::spawn_blocking(move || encode_predict_body(&image)).await??;
        let resp = self
            .client
            .post(format!("{}:predict", self.model_url()))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;
        let parsed: PredictResponse = error_for_status(resp).await?.json().await?;
        let raw = RawDetections::try_from(parsed)?;
        debug!(candidates = raw.scores.len(), "inference done");
        Ok(raw)
    }
}
