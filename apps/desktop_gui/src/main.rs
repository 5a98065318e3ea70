use std::path::PathBuf;

mod backend_bridge;
mod controller;
mod ui;

use anyhow::Context;
use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use fleet_core::{command_channel, load_settings, load_settings_from, RideSettings};
use tracing_subscriber::EnvFilter;

use crate::controller::events::UiEvent;
use crate::ui::RideControlApp;

const UI_EVENT_QUEUE_CAPACITY: usize = 2048;

#[derive(Parser, Debug)]
#[command(about = "Ride vehicle tracker dashboard")]
struct Args {
    /// Settings file; defaults to ./ride.toml or $RIDE_CONFIG.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn resolve_settings(args: &Args) -> anyhow::Result<RideSettings> {
    match &args.config {
        Some(path) => load_settings_from(Some(path.as_path()), |key| std::env::var(key).ok()),
        None => load_settings(),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    let args = Args::parse();
    let settings = resolve_settings(&args).context("failed to load ride settings")?;
    tracing::info!(?settings, "starting ride control dashboard");

    let (cmd_tx, cmd_rx) = command_channel();
    let (ui_tx, ui_rx) = bounded::<UiEvent>(UI_EVENT_QUEUE_CAPACITY);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("🎢 Ride Control System")
            .with_inner_size([1100.0, 800.0])
            .with_min_inner_size([1000.0, 700.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Ride Control System",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
            backend_bridge::runtime::launch(
                settings.clone(),
                cmd_rx,
                ui_tx,
                Some(cc.egui_ctx.clone()),
            );
            Ok(Box::new(RideControlApp::new(cmd_tx, ui_rx, &settings)))
        }),
    )
    .map_err(|err| anyhow::anyhow!("desktop gui exited with error: {err}"))
}
