//! Listing Explorer - Short-term Rental Listings Dashboard
//!
//! Loads a listings CSV and shows filtered price statistics, charts and a
//! point map.

mod charts;
mod config;
mod dashboard;
mod data;
mod gui;
mod stats;

use config::DashboardConfig;
use eframe::egui;
use gui::ExplorerApp;
use std::path::PathBuf;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let config = DashboardConfig::load().unwrap_or_else(|e| {
        log::error!("{:#}; using default settings", e);
        DashboardConfig::default()
    });

    let csv_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| config.data_path.clone());

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 850.0])
            .with_min_inner_size([1100.0, 700.0])
            .with_title("Listing Explorer"),
        ..Default::default()
    };

    eframe::run_native(
        "Listing Explorer",
        options,
        Box::new(move |cc| Ok(Box::new(ExplorerApp::new(cc, config, csv_path)))),
    )
}
