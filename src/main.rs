// src/main.rs
use eframe::egui;
use anyhow::{Result, anyhow};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod analysis;
mod app;
mod config;
mod file;
mod state;
mod ui;

use app::FlightsApp;
use config::DashboardSettings;
use file::FileManager;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

fn main() -> Result<()> {
    init_logging();

    let settings = DashboardSettings::load()?;
    let (store, geography) = FileManager::new(&settings).load_inputs()?;
    let app = FlightsApp::new(store, &geography, &settings)
        .map_err(|e| anyhow!("Failed to build dashboard: {}", e))?;
    info!("dashboard ready");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_title("Flight Delays"),
        ..Default::default()
    };

    eframe::run_native(
        "Flight Delays",
        options,
        Box::new(move |_cc| Box::new(app)),
    ).map_err(|e| anyhow!("Failed to run application: {}", e))
}
