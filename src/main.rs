//! C-ID Lookup - Course Equivalency Viewer
//!
//! Loads a C-ID equivalency CSV and shows the equivalent courses at other
//! institutions for a chosen department and course.

mod config;
mod data;
mod gui;

use clap::Parser;
use config::{AppConfig, Cli};
use eframe::egui;
use gui::LookupApp;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// `--debug` forces DEBUG, otherwise `RUST_LOG` applies, defaulting to INFO.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("cid_lookup=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cid_lookup=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let config = AppConfig::from(&cli);
    tracing::debug!("Starting with {:?}", config);

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 650.0])
            .with_min_inner_size([800.0, 500.0])
            .with_title("C-ID Course Equivalency Lookup"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "C-ID Lookup",
        options,
        Box::new(move |cc| Ok(Box::new(LookupApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to start the window: {}", e))
}
