//! Byakugan: terminal live-feed client for a home video-surveillance appliance.

mod app;
mod app_command;
mod config;
mod error;
mod live_feed_view;

pub(crate) use {
    app::App,
    app_command::{AppCommand, HELP},
    error::{AppError, Result as AppResult},
    live_feed_view::render_live_feed,
};

use crate::config::Config;

use tokio::sync::mpsc;
use tracing::error;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "byakugan=debug,byakugan_core=debug";

/// Application entry point.
#[tokio::main]
async fn main() {
    // Logs go to stderr so they do not interleave with the rendered view.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    let (command_tx, command_rx) = mpsc::channel(32);

    // Detached: the process exits with the runtime even if a read is pending.
    std::thread::spawn(move || app::forward_stdin(command_tx));

    let app = match App::mount(config, command_rx).await {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to start session: {:?}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = app.run().await {
        error!(error = ?e, "App error");
        std::process::exit(1);
    }
}
