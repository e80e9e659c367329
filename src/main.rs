#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod ui;

use timetracker::config::{config_path, AppConfig};
use timetracker::io::{JsonFileStore, StoreData};
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config_path = config_path();
    let config = AppConfig::load(&config_path);
    let today = chrono::Local::now().date_naive();
    let store = match JsonFileStore::open_or_seed(&config.data_file, || StoreData::sample(today)) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(error = %e, path = %config.data_file.display(), "could not open data file");
            rfd::MessageDialog::new()
                .set_level(rfd::MessageLevel::Error)
                .set_title("TimeTracker")
                .set_description(format!("Could not open data file:\n{}", e))
                .show();
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 400.0])
            .with_title("TimeTracker"),
        ..Default::default()
    };

    eframe::run_native(
        "TimeTracker",
        options,
        Box::new(move |cc| Ok(Box::new(app::TimelineApp::new(cc, store, config, config_path)))),
    )
}
