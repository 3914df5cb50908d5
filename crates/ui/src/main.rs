use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use lamp_grid_core::persist::{FileStorage, SystemClock};
use lamp_grid_core::{LampGridConfig, LampStore};
use lamp_grid_ui::LampApp;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lamp-grid-desktop", about = "A grid of pastel lamps on your desktop")]
struct Args {
    /// Directory holding the saved lamp state.
    #[arg(long)]
    state: Option<PathBuf>,
    /// Seed for lamp generation and randomize.
    #[arg(long)]
    seed: Option<u64>,
    /// TOML settings file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Quiet period before changes are saved.
    #[arg(long)]
    debounce_ms: Option<u64>,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let args = Args::parse();

    let state_dir = match args.state {
        Some(dir) => dir,
        None => dirs::data_dir()
            .map(|d| d.join("lamp-grid"))
            .context("no data directory on this platform, pass --state")?,
    };
    let mut config = match &args.config {
        Some(path) => LampGridConfig::load(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => LampGridConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(ms) = args.debounce_ms {
        config.debounce_ms = ms;
    }
    tracing::info!(state = %state_dir.display(), ?config, "starting desktop session");

    let store = LampStore::initialize(
        &config,
        Box::new(FileStorage::new(&state_dir)),
        Box::new(SystemClock::new()),
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("lamp-grid")
            .with_inner_size([960.0, 760.0])
            .with_min_inner_size([480.0, 400.0]),
        ..Default::default()
    };
    eframe::run_native(
        "lamp-grid",
        options,
        Box::new(|cc| Ok(Box::new(LampApp::new(cc, store)))),
    )
    .map_err(|e| anyhow::anyhow!("window failed: {e}"))
}
