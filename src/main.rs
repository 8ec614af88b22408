// quire - terminal client for the articles API
//
// Architecture:
// - Session: persisted auth token (file-backed, or in-memory with --ephemeral)
// - API client (reqwest): typed calls to the remote articles server
// - Controller: UI-visible state, runs actions and reconciles responses
// - TUI (ratatui): login and article views rendered from controller state
// - CLI (clap): headless login/list/logout and config management

mod api;
mod cli;
mod config;
mod controller;
mod logging;
mod session;
mod tui;

use anyhow::{Context, Result};
use api::HttpApiClient;
use clap::Parser;
use cli::{Cli, Commands};
use config::{Config, LogRotation};
use controller::Controller;
use logging::{LogBuffer, TuiLogLayer};
use session::{FileSessionStore, MemorySessionStore, SessionStore};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config management never touches the session or the network
    if let Some(command @ Commands::Config { .. }) = cli.command {
        cli::handle_config(command);
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let mut config = Config::from_env();
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }

    let tui_mode = cli.command.is_none();
    let log_buffer = LogBuffer::new();

    // The guard must outlive every log call so the file writer flushes
    let _file_guard = init_tracing(&config, tui_mode, &log_buffer);

    let session: Arc<dyn SessionStore> = if cli.ephemeral {
        tracing::debug!("Using in-memory session");
        Arc::new(MemorySessionStore::new())
    } else {
        let store = FileSessionStore::open(&config.storage_path);
        tracing::debug!("Session file: {}", store.path().display());
        Arc::new(store)
    };

    let api = HttpApiClient::new(&config.api_url, config.request_timeout(), session.clone())
        .context("Failed to build HTTP client")?;
    tracing::debug!("API base: {}", api.base_url());

    let controller = Arc::new(
        Controller::new(Arc::new(api), session)
            .with_stale_list_discard(config.discard_stale_lists),
    );

    match cli.command {
        None => {
            tracing::info!("Starting TUI against {}", config.api_url);
            tui::run_tui(controller, log_buffer, &config).await?;
            tracing::info!("Shutdown complete");
        }
        Some(command) => cli::run_command(command, &controller).await?,
    }

    Ok(())
}

/// Install the global subscriber
///
/// In TUI mode logs go to the in-memory buffer (writing to the terminal would
/// garble the display); otherwise to stderr. File logging is added on top
/// when enabled. Precedence: RUST_LOG env var > config file > default "info".
fn init_tracing(
    config: &Config,
    tui_mode: bool,
    log_buffer: &LogBuffer,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let default_filter = format!("quire={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let tui_layer = tui_mode.then(|| TuiLogLayer::new(log_buffer.clone()));
    let stderr_layer =
        (!tui_mode).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    let mut guard = None;
    let file_layer = if config.logging.file_enabled {
        match std::fs::create_dir_all(&config.logging.file_dir) {
            Ok(()) => {
                let file_appender = match config.logging.file_rotation {
                    LogRotation::Hourly => tracing_appender::rolling::hourly(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                    LogRotation::Daily => tracing_appender::rolling::daily(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                    LogRotation::Never => tracing_appender::rolling::never(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                };

                // Writes happen on a background thread
                let (non_blocking, worker) = tracing_appender::non_blocking(file_appender);
                guard = Some(worker);

                // JSON for structured log parsing
                Some(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking)
                        .with_ansi(false),
                )
            }
            Err(e) => {
                eprintln!(
                    "Warning: Could not create log directory {:?}: {}",
                    config.logging.file_dir, e
                );
                None
            }
        }
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tui_layer)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}
