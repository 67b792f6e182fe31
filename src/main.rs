use client::gui::ClientWindow;
use client::main::Client;
use config::Config;
use eframe::egui;
use library::logger::{impl_console::LoggerConsole, interface::Logger};
use prediction_api::impl_http::PredictionApiHttp;
use std::sync::Arc;

mod client;
mod config;
mod library;
mod prediction_api;
mod uploaded_image;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();

    let logger = Arc::new(LoggerConsole::new(config.logger_timezone));

    let prediction_api = Arc::new(PredictionApiHttp::new(config.clone(), logger.clone())?);

    let client = Client::new(config.clone(), logger.clone(), prediction_api);

    let _ = logger.info(&format!("Starting {}", config.window_title));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.window_title.clone())
            .with_inner_size(config.window_size),
        ..Default::default()
    };

    let window = ClientWindow::new(client);

    eframe::run_native(
        &config.window_title,
        options,
        Box::new(|_cc| Box::new(window)),
    )
    .map_err(|e| e.to_string())?;

    Ok(())
}
