//! Chart Studio - CSV Chart Editor
//!
//! Paste or import comma-delimited data, style a bar, line or pie chart and
//! export it as PNG, JPEG or PDF.

mod charts;
mod config;
mod data;
mod editor;
mod export;
mod gui;
mod host;

use config::storage;
use eframe::egui;
use gui::ChartStudioApp;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings_path = storage::settings_path();
    let settings = storage::load_or_default(&settings_path);

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Chart Studio"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Chart Studio",
        options,
        Box::new(|cc| Ok(Box::new(ChartStudioApp::new(cc, settings, settings_path)))),
    )
}
