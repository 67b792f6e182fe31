use crate::config::Config;
use crate::prediction_api::interface::{ApiError, HealthStatus, PredictionResult};
use crate::uploaded_image::upload::{is_accepted, UploadError, UploadSource, UploadedImage};
use std::sync::Arc;

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum HealthState {
    #[default]
    Idle,
    Checking,
    Done(Result<HealthStatus, ApiError>),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum UploadState {
    #[default]
    Empty,
    Loading {
        request_id: RequestId,
    },
    Loaded {
        request_id: RequestId,
        image: Arc<UploadedImage>,
    },
    Failed(UploadError),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum PredictionState {
    #[default]
    Idle,
    Predicting {
        request_id: RequestId,
    },
    Done(Result<PredictionResult, ApiError>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub api_base_url: String,
    pub health: HealthState,
    pub upload: UploadState,
    pub prediction: PredictionState,
    pub show_raw: bool,
    /// Outlives `prediction` across re-selection; only `PredictDone` clears it.
    pub predict_in_flight: Option<RequestId>,
    pub next_request_id: RequestId,
}

impl State {
    pub fn is_busy(&self) -> bool {
        matches!(self.health, HealthState::Checking)
            || matches!(self.upload, UploadState::Loading { .. })
            || self.predict_in_flight.is_some()
    }

    pub fn can_predict(&self) -> bool {
        matches!(self.upload, UploadState::Loaded { .. }) && self.predict_in_flight.is_none()
    }

    fn take_request_id(&mut self) -> RequestId {
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        request_id
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    ApiBaseUrlChanged(String),
    HealthCheckRequested,
    HealthCheckDone(Result<HealthStatus, ApiError>),
    UploadSelected(UploadSource),
    UploadLoaded {
        request_id: RequestId,
        result: Result<UploadedImage, UploadError>,
    },
    PredictRequested,
    PredictDone {
        request_id: RequestId,
        result: Result<PredictionResult, ApiError>,
    },
    ShowRawToggled(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    CheckHealth {
        base_url: String,
    },
    LoadUpload {
        request_id: RequestId,
        source: UploadSource,
    },
    Predict {
        request_id: RequestId,
        base_url: String,
        image: Arc<UploadedImage>,
    },
}

pub fn init(config: &Config) -> (State, Vec<Effect>) {
    (
        State {
            api_base_url: config.api_base_url.clone(),
            health: HealthState::Idle,
            upload: UploadState::Empty,
            prediction: PredictionState::Idle,
            show_raw: false,
            predict_in_flight: None,
            next_request_id: 0,
        },
        vec![],
    )
}

pub fn transition(config: &Config, state: State, msg: Msg) -> (State, Vec<Effect>) {
    let mut state = state;

    match msg {
        Msg::ApiBaseUrlChanged(api_base_url) => {
            state.api_base_url = api_base_url;
            (state, vec![])
        }

        // Health
        Msg::HealthCheckRequested => {
            if matches!(state.health, HealthState::Checking) {
                return (state, vec![]);
            }
            state.health = HealthState::Checking;
            let base_url = state.api_base_url.clone();
            (state, vec![Effect::CheckHealth { base_url }])
        }
        Msg::HealthCheckDone(result) => {
            state.health = HealthState::Done(result);
            (state, vec![])
        }

        // Upload
        Msg::UploadSelected(source) => {
            state.prediction = PredictionState::Idle;

            let filename = source.filename();
            if !is_accepted(&filename, config) {
                state.upload = UploadState::Failed(UploadError::UnsupportedExtension(filename));
                return (state, vec![]);
            }

            let request_id = state.take_request_id();
            state.upload = UploadState::Loading { request_id };
            (state, vec![Effect::LoadUpload { request_id, source }])
        }
        Msg::UploadLoaded { request_id, result } => match state.upload {
            UploadState::Loading { request_id: pending } if pending == request_id => {
                state.upload = match result {
                    Ok(image) => UploadState::Loaded {
                        request_id,
                        image: Arc::new(image),
                    },
                    Err(error) => UploadState::Failed(error),
                };
                (state, vec![])
            }
            _ => (state, vec![]),
        },

        // Prediction
        Msg::PredictRequested => {
            let image = match &state.upload {
                UploadState::Loaded { image, .. } if state.can_predict() => Some(image.clone()),
                _ => None,
            };
            let Some(image) = image else {
                return (state, vec![]);
            };

            let request_id = state.take_request_id();
            state.prediction = PredictionState::Predicting { request_id };
            state.predict_in_flight = Some(request_id);
            let base_url = state.api_base_url.clone();
            (
                state,
                vec![Effect::Predict {
                    request_id,
                    base_url,
                    image,
                }],
            )
        }
        Msg::PredictDone { request_id, result } => {
            if state.predict_in_flight == Some(request_id) {
                state.predict_in_flight = None;
            }
            match state.prediction {
                PredictionState::Predicting { request_id: pending } if pending == request_id => {
                    state.prediction = PredictionState::Done(result);
                    (state, vec![])
                }
                _ => (state, vec![]),
            }
        }

        Msg::ShowRawToggled(show_raw) => {
            state.show_raw = show_raw;
            (state, vec![])
        }
    }
}
