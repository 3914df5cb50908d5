mod canvas;
mod renderer;

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use lamp_grid_core::persist::{FileStorage, SystemClock};
use lamp_grid_core::{LampGridConfig, LampStore};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lamp-grid", about = "A grid of pastel lamps in your terminal")]
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
    /// Log file (defaults to lamp-grid.log in the state directory).
    #[arg(long)]
    log: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let state_dir = match args.state {
        Some(dir) => dir,
        None => dirs::data_dir()
            .map(|d| d.join("lamp-grid"))
            .context("no data directory on this platform, pass --state")?,
    };
    let log_path = args
        .log
        .unwrap_or_else(|| state_dir.join("lamp-grid.log"));
    init_logging(&log_path)?;

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
    tracing::info!(state = %state_dir.display(), ?config, "starting terminal session");

    let store = LampStore::initialize(
        &config,
        Box::new(FileStorage::new(&state_dir)),
        Box::new(SystemClock::new()),
    );
    renderer::run(store)
}

/// Send logs to a file; the terminal belongs to the UI.
fn init_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
