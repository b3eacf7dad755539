//! `sunfleet-tui`: live terminal dashboard for the Sunshine Rides fleet.
//!
//! Built on [ratatui](https://ratatui.rs). Mounting the view starts the
//! simulator; a background data bridge streams vehicle, alert and
//! selection updates into the action loop. Screens are reachable with
//! number keys (1-7): Fleet, Alerts, Drivers, Operations, Tracking,
//! Support and Contact. Quitting unmounts the view and stops the
//! simulator.
//!
//! Logs go to a file so they never corrupt the terminal.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use sunfleet_config::Config;
use sunfleet_core::{FleetController, FleetSeed};

use crate::app::App;

/// Terminal dashboard for the Sunshine Rides fleet simulator.
#[derive(Parser, Debug)]
#[command(name = "sunfleet-tui", version, about)]
struct Cli {
    /// Config file (defaults to ~/.config/sunfleet/config.toml)
    #[arg(short, long, env = "SUNFLEET_CONFIG")]
    config: Option<PathBuf>,

    /// Log file path (overrides `[tui] log_file`)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Seed the simulator RNG for a reproducible session
    #[arg(long)]
    seed: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// File-based tracing. Nothing may log to stdout/stderr while the TUI owns
/// the terminal. Hold the returned guard until exit so logs flush.
fn setup_tracing(log_file: &Path, verbose: u8) -> WorkerGuard {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "sunfleet_tui={log_level},sunfleet_core={log_level}"
        ))
    });

    let log_dir = log_file.parent().unwrap_or(Path::new("/tmp"));
    let log_filename = log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("sunfleet-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

fn load_config(cli: &Cli) -> Result<Config> {
    let cfg = match &cli.config {
        Some(path) => sunfleet_config::load_config_from(path)?,
        None => sunfleet_config::load_config()?,
    };
    Ok(cfg)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Hooks go in before the terminal switches to raw mode
    tui::install_hooks()?;

    let cfg = load_config(&cli)?;
    let log_file = cli.log_file.clone().unwrap_or_else(|| cfg.tui.log_file());
    let _log_guard = setup_tracing(&log_file, cli.verbose);

    let mut sim = cfg.simulation_config()?;
    if cli.seed.is_some() {
        sim.seed = cli.seed;
    }
    info!(
        tick = ?sim.tick_interval,
        seed = ?sim.seed,
        "starting sunfleet-tui"
    );

    let controller = FleetController::new(sim, FleetSeed::sunshine(Utc::now()))?;
    let mut app = App::new(controller, &cfg);
    app.run().await?;

    Ok(())
}
