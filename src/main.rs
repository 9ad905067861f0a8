mod app;
mod callbacks;
mod chart;
mod color;
mod config;
mod data;
mod error;
mod layout;
mod reactive;
mod state;
mod ui;

use anyhow::Context;
use app::SpaceXDashApp;
use config::DashboardConfig;
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::from_args(std::env::args_os().skip(1));

    // The dataset is loaded once up front; a missing or malformed file is fatal.
    let dataset = data::loader::load_file(&config.data_path).with_context(|| {
        format!(
            "failed to load launch records from {}",
            config.data_path.display()
        )
    })?;

    let title = config.title.clone();
    let app = SpaceXDashApp::new(config, dataset);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(&title, options, Box::new(|_cc| Ok(Box::new(app))))
        .map_err(|e| anyhow::anyhow!("{e}"))
}
