use crate::client::core::{init, transition, Msg, State};
use crate::client::render::{render, View};
use crate::client::run_effect::RunEffect;
use crate::config::Config;
use crate::library::logger::interface::Logger;
use crate::prediction_api::interface::PredictionApi;
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;

/// Session context: the current state plus everything the handlers need.
pub struct Client {
    pub state: State,
    pub config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    run_effect: RunEffect,
    msg_receiver: Receiver<Msg>,
}

impl Client {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        prediction_api: Arc<dyn PredictionApi + Send + Sync>,
    ) -> Self {
        let (msg_sender, msg_receiver) = channel();
        let logger = logger.with_namespace("client");
        let run_effect = RunEffect::new(
            config.clone(),
            logger.with_namespace("effects"),
            prediction_api,
            msg_sender,
        );

        let (state, effects) = init(&config);
        run_effect.spawn(effects);

        Self {
            state,
            config,
            logger,
            run_effect,
            msg_receiver,
        }
    }

    pub fn dispatch(&mut self, msg: Msg) {
        let _ = self.logger.info(&format!("msg: {:?}", msg));

        let (new_state, effects) = transition(&self.config, self.state.clone(), msg);
        self.state = new_state;

        self.run_effect.spawn(effects);
    }

    /// Applies every message that finished effects have sent so far.
    pub fn poll(&mut self) {
        while let Ok(msg) = self.msg_receiver.try_recv() {
            self.dispatch(msg);
        }
    }

    pub fn view(&self) -> View {
        render(&self.config, &self.state)
    }

    #[cfg(test)]
    pub fn poll_until(
        &mut self,
        timeout: std::time::Duration,
        done: impl Fn(&State) -> bool,
    ) -> bool {
        let deadline = std::time::Instant::now() + timeout;
        while !done(&self.state) {
            let remaining = deadline.saturating_duration_since(std::time::Instant::now());
            match self.msg_receiver.recv_timeout(remaining) {
                Ok(msg) => self.dispatch(msg),
                Err(_) => return false,
            }
        }
        true
    }
}
