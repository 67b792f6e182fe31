use crate::library::logger::interface::Logger;
use crate::prediction_api::interface::{
    ApiError, Classification, HealthStatus, PredictionApi, PredictionResult,
};
use crate::uploaded_image::upload::UploadedImage;
use rand::Rng;
use std::sync::{Arc, Mutex};

const LABELS: [&str; 10] = [
    "Apple Scab",
    "Apple Black Rot",
    "Cedar Apple Rust",
    "Apple Healthy",
    "Corn Common Rust",
    "Grape Black Rot",
    "Potato Early Blight",
    "Potato Late Blight",
    "Tomato Leaf Mold",
    "Tomato Healthy",
];

pub struct PredictionApiFake {
    logger: Arc<dyn Logger + Send + Sync>,
    received_sizes: Mutex<Vec<usize>>,
}

impl PredictionApiFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger,
            received_sizes: Mutex::new(vec![]),
        }
    }

    /// Byte length of every payload passed to `predict`, in call order.
    pub fn received_sizes(&self) -> Vec<usize> {
        self.received_sizes.lock().unwrap().clone()
    }
}

impl PredictionApi for PredictionApiFake {
    fn check_health(&self, base_url: &str) -> Result<HealthStatus, ApiError> {
        self.logger
            .info(&format!("PredictionApiFake::check_health({})", base_url))
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(serde_json::json!({"status": "ok"}))
    }

    fn predict(
        &self,
        base_url: &str,
        image: &UploadedImage,
    ) -> Result<PredictionResult, ApiError> {
        self.logger
            .info(&format!(
                "PredictionApiFake::predict({}, {})",
                base_url, image.filename
            ))
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        self.received_sizes.lock().unwrap().push(image.bytes.len());

        let mut rng = rand::rng();

        let weights: Vec<f64> = LABELS.iter().map(|_| rng.random_range(0.0..1.0)).collect();
        let total: f64 = weights.iter().sum::<f64>().max(f64::EPSILON);

        let mut ranked: Vec<Classification> = LABELS
            .iter()
            .zip(weights)
            .map(|(label, weight)| Classification {
                label: label.to_string(),
                confidence: weight / total,
            })
            .collect();
        ranked.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        let raw = serde_json::to_value(&ranked).map_err(|e| ApiError::Decode(e.to_string()))?;

        Ok(PredictionResult {
            top1: ranked[0].clone(),
            top5: ranked.iter().take(5).cloned().collect(),
            raw,
        })
    }
}
