mod app;
mod classifier;
mod color;
mod config;
mod context;
mod data;
mod error;
mod state;
mod ui;

use anyhow::{anyhow, Context, Result};
use app::WineDashApp;
use config::{CommandLine, DashboardConfig};
use context::AppContext;
use eframe::egui;

fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::try_from(CommandLine::parse_args())?;

    // Data and model are ready before the window opens; a bad file stops here.
    let context = AppContext::from_config(&config).map_err(|e| {
        log::error!("Startup failed: {e:#}");
        e
    })?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Wine Quality Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(WineDashApp::new(context)))),
    )
    .map_err(|e| anyhow!("{e}"))
    .context("running the dashboard window")
}
