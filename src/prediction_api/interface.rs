use crate::uploaded_image::upload::UploadedImage;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub top1: Classification,
    #[serde(default)]
    pub top5: Vec<Classification>,
    /// An absent `raw` reads as `[]`; an explicit `null` stays `null`.
    #[serde(default = "empty_raw")]
    pub raw: serde_json::Value,
}

fn empty_raw() -> serde_json::Value {
    serde_json::Value::Array(vec![])
}

/// Whatever JSON the service answers on `/health`.
pub type HealthStatus = serde_json::Value;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("{0}")]
    Transport(String),
    #[error("API error {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid response body: {0}")]
    Decode(String),
}

pub trait PredictionApi: Send + Sync {
    /// GET `{base_url}/health`.
    fn check_health(&self, base_url: &str) -> Result<HealthStatus, ApiError>;

    /// POST `{base_url}/predict` with the image as multipart field `file`.
    fn predict(&self, base_url: &str, image: &UploadedImage)
        -> Result<PredictionResult, ApiError>;
}
