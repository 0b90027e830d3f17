//! GDP Explorer - GDP per Capita Dashboard
//!
//! Loads the dataset once at startup and opens the interactive chart window.

use anyhow::{anyhow, Context};
use eframe::egui;
use gdp_explorer::config::{DashboardConfig, CONFIG_FILE};
use gdp_explorer::data::GdpTable;
use gdp_explorer::gui::DashboardApp;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,gdp_explorer=debug")),
        )
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let config = DashboardConfig::load_or_default(Path::new(CONFIG_FILE))
        .context("Failed to read dashboard config")?;

    // The dashboard cannot run on a partially parsed dataset
    let table = GdpTable::load(&config.data_path)
        .inspect_err(|e| error!(error = %e, "failed to load dataset"))
        .with_context(|| format!("Failed to load {}", config.data_path.display()))?;
    info!(countries = table.countries().len(), "dataset ready");

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([900.0, 600.0])
            .with_title(config.window_title.clone()),
        ..Default::default()
    };

    let title = config.window_title.clone();
    let table = Arc::new(table);

    // Run the application
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, table, config)))),
    )
    .map_err(|e| anyhow!("GUI error: {e}"))
}
