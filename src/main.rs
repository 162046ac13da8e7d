//! BasicSplit - a stopwatch and speedrun split timer
//!
//! This is the main entry point for the basic-split application.

use std::sync::Arc;
use anyhow::Context;
use tokio::io::{stdin, stdout, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use basic_split::{
    config::Config,
    services::SettingsStore,
    state::{AppState, TimerEngine},
    shell::Console,
    tasks::live_label_task,
    utils::shutdown_signal,
    Shell,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // RUST_LOG wins over --verbose; logs go to stderr to keep the view clean
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("basic_split={}", config.log_level())));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting basic-split v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: config={}, unmatched={}", config.config.display(), config.unmatched);

    let settings = SettingsStore::open(&config.config)
        .with_context(|| format!("failed to load settings from {}", config.config.display()))?;
    info!("Settings loaded from {}", settings.path().display());

    let state = Arc::new(AppState::new(
        TimerEngine::with_system_clock(),
        settings,
        config.unmatched,
    )?);

    let console = Console::new(stdout());
    tokio::spawn(live_label_task(state.subscribe_display(), console.clone()));

    let shell = Shell::new(Arc::clone(&state));

    tokio::select! {
        result = shell.run(BufReader::new(stdin()), console) => {
            result.context("terminal I/O failed")?;
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
            info!("basic-split closed");
            // A pending stdin read sits on a blocking thread that cannot be
            // cancelled; returning would wait on it forever
            std::process::exit(0);
        }
    }

    info!("basic-split closed");
    Ok(())
}
