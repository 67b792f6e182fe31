use crate::client::core::{HealthState, PredictionState, RequestId, State, UploadState};
use crate::config::Config;
use crate::prediction_api::interface::{ApiError, Classification, PredictionResult};
use crate::uploaded_image::upload::UploadedImage;
use std::sync::Arc;

/// One piece of the page, top to bottom. The GUI maps each element to a widget.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Title(String),
    Caption(String),
    Header(String),
    Subheader(String),
    Text(String),
    Error(String),
    Json(String),
    Spinner(String),
    BaseUrlInput(String),
    HealthButton {
        enabled: bool,
    },
    FilePicker {
        label: String,
        extensions: Vec<String>,
    },
    Preview {
        request_id: RequestId,
        image: Arc<UploadedImage>,
        caption: String,
    },
    PredictButton {
        enabled: bool,
    },
    RawToggle(bool),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct View {
    pub sidebar: Vec<Element>,
    pub main: Vec<Element>,
}

impl View {
    /// Every `Text` element, in order.
    #[cfg(test)]
    pub fn texts(&self) -> Vec<&str> {
        self.sidebar
            .iter()
            .chain(self.main.iter())
            .filter_map(|element| match element {
                Element::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[cfg(test)]
    pub fn errors(&self) -> Vec<&str> {
        self.sidebar
            .iter()
            .chain(self.main.iter())
            .filter_map(|element| match element {
                Element::Error(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

pub fn render(config: &Config, state: &State) -> View {
    View {
        sidebar: render_sidebar(state),
        main: render_main(config, state),
    }
}

fn render_sidebar(state: &State) -> Vec<Element> {
    let mut elements = vec![
        Element::Header("Settings".to_string()),
        Element::BaseUrlInput(state.api_base_url.clone()),
        Element::HealthButton {
            enabled: !matches!(state.health, HealthState::Checking),
        },
    ];

    match &state.health {
        HealthState::Idle => {}
        HealthState::Checking => elements.push(Element::Spinner("Checking API health...".to_string())),
        HealthState::Done(Ok(health)) => elements.push(Element::Json(to_pretty_json(health))),
        HealthState::Done(Err(error)) => {
            elements.push(Element::Error(format!("Health check failed: {}", error)))
        }
    }

    elements
}

fn render_main(config: &Config, state: &State) -> Vec<Element> {
    let mut elements = vec![
        Element::Title(format!("🌿 {}", config.window_title)),
        Element::Caption("Upload an image to get a prediction from the API service.".to_string()),
        Element::FilePicker {
            label: "Choose a plant leaf image".to_string(),
            extensions: config.accepted_extensions.clone(),
        },
    ];

    match &state.upload {
        UploadState::Empty => {}
        UploadState::Loading { .. } => elements.push(Element::Spinner("Loading image...".to_string())),
        UploadState::Failed(error) => {
            elements.push(Element::Error(format!("Could not open image: {}", error)))
        }
        UploadState::Loaded { request_id, image } => {
            elements.push(Element::Preview {
                request_id: *request_id,
                image: image.clone(),
                caption: "Uploaded image".to_string(),
            });
            elements.push(Element::PredictButton {
                enabled: state.can_predict(),
            });
            elements.extend(render_prediction(state));
        }
    }

    elements
}

fn render_prediction(state: &State) -> Vec<Element> {
    match &state.prediction {
        PredictionState::Idle => vec![],
        PredictionState::Predicting { .. } => vec![Element::Spinner("Predicting...".to_string())],
        PredictionState::Done(Ok(result)) => render_result(result, state.show_raw),
        PredictionState::Done(Err(error @ ApiError::Status { .. })) => {
            vec![Element::Error(error.to_string())]
        }
        PredictionState::Done(Err(error)) => {
            vec![Element::Error(format!("Prediction failed: {}", error))]
        }
    }
}

fn render_result(result: &PredictionResult, show_raw: bool) -> Vec<Element> {
    let mut elements = vec![
        Element::Subheader("Top-1 Prediction".to_string()),
        Element::Text(format!("Label: {}", result.top1.label)),
        Element::Text(format!("Confidence: {}", format_confidence(result.top1.confidence))),
        Element::Subheader("Top-5".to_string()),
    ];

    elements.extend(ranked_lines(&result.top5).into_iter().map(Element::Text));

    elements.push(Element::RawToggle(show_raw));
    if show_raw {
        elements.push(Element::Json(to_pretty_json(&result.raw)));
    }

    elements
}

pub fn format_confidence(confidence: f64) -> String {
    format!("{:.4}", confidence)
}

/// One line per entry, ranked from 1 in input order.
pub fn ranked_lines(classifications: &[Classification]) -> Vec<String> {
    classifications
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}. {} — {}", i + 1, c.label, format_confidence(c.confidence)))
        .collect()
}

fn to_pretty_json(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
