mod app;
mod color;
mod state;
mod ui;

use app::RustyBuretteApp;
use eframe::egui;
use rusty_burette::config::AppConfig;

fn main() -> eframe::Result {
    env_logger::init();

    let config = AppConfig::from_env().unwrap_or_else(|e| {
        log::error!("Ignoring configuration: {e:#}");
        AppConfig::default()
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rusty Burette – Volume Uncertainty Viewer",
        options,
        Box::new(|_cc| Ok(Box::new(RustyBuretteApp::new(config)))),
    )
}
