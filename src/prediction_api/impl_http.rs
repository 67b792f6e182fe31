use crate::config::Config;
use crate::library::logger::interface::Logger;
use crate::prediction_api::interface::{ApiError, HealthStatus, PredictionApi, PredictionResult};
use crate::uploaded_image::upload::UploadedImage;
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::sync::Arc;

pub struct PredictionApiHttp {
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    client: Client,
}

impl PredictionApiHttp {
    pub fn new(config: Config, logger: Arc<dyn Logger + Send + Sync>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            config,
            logger: logger.with_namespace("prediction_api"),
            client,
        })
    }
}

impl PredictionApi for PredictionApiHttp {
    fn check_health(&self, base_url: &str) -> Result<HealthStatus, ApiError> {
        let url = format!("{}/health", base_url);
        let _ = self.logger.info(&format!("GET {}", url));

        let response = self
            .client
            .get(&url)
            .timeout(self.config.health_timeout)
            .send()
            .map_err(transport_error)?;

        let body = response.text().map_err(transport_error)?;

        let health = serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))?;

        let _ = self.logger.info(&format!("GET {} ok", url));

        Ok(health)
    }

    fn predict(
        &self,
        base_url: &str,
        image: &UploadedImage,
    ) -> Result<PredictionResult, ApiError> {
        let url = format!("{}/predict", base_url);
        let _ = self.logger.info(&format!(
            "POST {} file={} type={} bytes={}",
            url,
            image.filename,
            image.content_type,
            image.bytes.len()
        ));

        let part = Part::bytes(image.bytes.clone())
            .file_name(image.filename.clone())
            .mime_str(&image.content_type)
            .map_err(transport_error)?;

        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .timeout(self.config.predict_timeout)
            .send()
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().map_err(transport_error)?;

        if status != StatusCode::OK {
            let _ = self
                .logger
                .error(&format!("POST {} returned {}", url, status.as_u16()));
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let prediction =
            serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))?;

        let _ = self.logger.info(&format!("POST {} ok", url));

        Ok(prediction)
    }
}

fn transport_error(error: reqwest::Error) -> ApiError {
    ApiError::Transport(error.to_string())
}
