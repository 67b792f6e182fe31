use chrono::{Offset, Utc};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub health_timeout: Duration,
    pub predict_timeout: Duration,
    pub accepted_extensions: Vec<String>,
    pub default_content_type: String,
    pub preview_max_side: u32,
    pub poll_rate: Duration,
    pub logger_timezone: chrono::FixedOffset,
    pub window_title: String,
    pub window_size: [f32; 2],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // Leading space kept as shipped; the URL parser strips it.
            api_base_url: " http://127.0.0.1:8000".to_string(),
            health_timeout: Duration::from_secs(10),
            predict_timeout: Duration::from_secs(60),
            accepted_extensions: vec!["jpg".to_string(), "jpeg".to_string(), "png".to_string()],
            default_content_type: "image/jpeg".to_string(),
            preview_max_side: 1024,
            poll_rate: Duration::from_millis(100),
            logger_timezone: Utc.fix(),
            window_title: "Plant Disease Classifier".to_string(),
            window_size: [720.0, 820.0],
        }
    }
}
