use std::path::PathBuf;

mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::settings::{load_settings, SETTINGS_FILE_NAME};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::{PredictorApp, StartupConfig};

#[derive(Parser, Debug)]
#[command(about = "House price predictor window")]
struct Args {
    /// Prediction service root, overriding the settings file and environment.
    #[arg(long)]
    api_url: Option<String>,
    #[arg(long, default_value = SETTINGS_FILE_NAME)]
    config: PathBuf,
    /// Start with the sample record already filled in.
    #[arg(long)]
    sample: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let settings = load_settings(&args.config)?.with_api_base_url(args.api_url.as_deref())?;
    tracing::info!(api_base_url = %settings.api_base_url, "starting predictor gui");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(settings, cmd_rx, ui_tx);

    let startup = StartupConfig {
        prefill_sample: args.sample,
    };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("House Price Predictor")
            .with_inner_size([640.0, 760.0])
            .with_min_inner_size([480.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "House Price Predictor",
        options,
        Box::new(move |_cc| Ok(Box::new(PredictorApp::bootstrap(cmd_tx, ui_rx, startup)))),
    )
    .map_err(|err| anyhow::anyhow!("failed to run predictor window: {err}"))
}
