use eframe::egui;
use png_drop_uploader::{Config, PngUploader};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([600.0, 700.0])
            .with_min_inner_size([400.0, 500.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        "PNG Uploader",
        options,
        Box::new(move |cc| Box::new(PngUploader::new(cc, config))),
    );

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Failed to start the window: {}", e);
            ExitCode::FAILURE
        }
    }
}
