#[allow(clippy::module_inception)]
mod config;
mod feed_config;
mod server_config;
mod session_config;

pub(crate) use {
    config::Config, feed_config::FeedConfig, server_config::ServerConfig,
    session_config::SessionConfig,
};

use std::path::PathBuf;

use directories::ProjectDirs;

pub(crate) const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:5000";
pub(crate) const DEFAULT_AUTO_STOP_SECS: u64 = 10;
pub(crate) const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5000;
pub(crate) const DEFAULT_PLACEHOLDER_FILE: &str = "feed-unavailable.png";
pub(crate) const MAX_REQUEST_TIMEOUT_MS: u64 = 120_000;

pub(crate) fn default_server_address() -> String {
    DEFAULT_SERVER_ADDRESS.to_string()
}

pub(crate) fn default_auto_stop_secs() -> u64 {
    DEFAULT_AUTO_STOP_SECS
}

pub(crate) fn default_request_timeout_ms() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_MS
}

pub(crate) fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "byakugan", "Byakugan")
}

/// Placeholder image in the platform data directory, or next to the
/// working directory when the platform has none.
pub(crate) fn default_placeholder_path() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join(DEFAULT_PLACEHOLDER_FILE))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PLACEHOLDER_FILE))
}
