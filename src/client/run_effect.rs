use crate::client::core::{Effect, Msg};
use crate::config::Config;
use crate::library::logger::interface::Logger;
use crate::prediction_api::interface::PredictionApi;
use crate::uploaded_image::upload::UploadedImage;
use std::sync::mpsc::Sender;
use std::sync::Arc;

#[derive(Clone)]
pub struct RunEffect {
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    prediction_api: Arc<dyn PredictionApi + Send + Sync>,
    msg_sender: Sender<Msg>,
}

impl RunEffect {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        prediction_api: Arc<dyn PredictionApi + Send + Sync>,
        msg_sender: Sender<Msg>,
    ) -> Self {
        Self {
            config,
            logger,
            prediction_api,
            msg_sender,
        }
    }

    pub fn spawn(&self, effects: Vec<Effect>) {
        for effect in effects {
            let self_clone = self.clone();
            std::thread::spawn(move || self_clone.run_effect(effect));
        }
    }

    pub fn run_effect(&self, effect: Effect) {
        let _ = self.logger.info(&format!("Running effect: {:?}", effect));

        match effect {
            Effect::CheckHealth { base_url } => {
                let result = self.prediction_api.check_health(&base_url);
                if let Err(e) = &result {
                    let _ = self.logger.error(&format!("Health check failed: {}", e));
                }
                let _ = self.msg_sender.send(Msg::HealthCheckDone(result));
            }
            Effect::LoadUpload { request_id, source } => {
                let result = UploadedImage::load(&source, &self.config);
                if let Err(e) = &result {
                    let _ = self.logger.error(&format!("Could not open image: {}", e));
                }
                let _ = self.msg_sender.send(Msg::UploadLoaded { request_id, result });
            }
            Effect::Predict {
                request_id,
                base_url,
                image,
            } => {
                let result = self.prediction_api.predict(&base_url, &image);
                if let Err(e) = &result {
                    let _ = self.logger.error(&format!("Prediction failed: {}", e));
                }
                let _ = self.msg_sender.send(Msg::PredictDone { request_id, result });
            }
        }
    }
}
