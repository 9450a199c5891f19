//! Configuration management for byakugan.
//!
//! Handles loading and saving TOML configuration files with cross-platform
//! paths and atomic write operations. The server address is the only
//! setting changed at runtime, through [`Config::update_server_address`].

use crate::{
    AppError, AppResult,
    config::{FeedConfig, MAX_REQUEST_TIMEOUT_MS, ServerConfig, SessionConfig, project_dirs},
};

use std::{
    fs,
    io::Write,
    panic::Location,
    path::{Path, PathBuf},
    time::Duration,
};

use byakugan_core::{FeedEndpoints, HttpRecordApi, MAX_AUTO_STOP, SessionSettings};
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Appliance backend location.
    #[serde(default)]
    pub server: ServerConfig,
    /// Recording session tunables.
    #[serde(default)]
    pub session: SessionConfig,
    /// Live feed display settings.
    #[serde(default)]
    pub feed: FeedConfig,
}

impl Config {
    /// Load configuration from the platform config directory, creating a
    /// default file if none exists.
    #[track_caller]
    #[instrument]
    pub fn load() -> AppResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            info!("No config found, creating default");
            Self::create_default()
        }
    }

    /// Load configuration from an explicit file.
    #[track_caller]
    #[instrument]
    pub fn load_from(config_path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(config_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to read config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to parse config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;
        config.validate()?;

        info!(config_path = ?config_path, "Configuration loaded");

        Ok(config)
    }

    /// Save configuration to the platform config directory.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn save(&self) -> AppResult<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    /// Save configuration to `config_path` using atomic write pattern.
    ///
    /// Writes to a temporary file first, then renames to prevent corruption
    /// if the process crashes during the write.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn save_to(&self, config_path: &Path) -> AppResult<()> {
        let contents = toml::to_string_pretty(self).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        // Atomic write: write to temp file then rename
        let temp_path = config_path.with_extension("toml.tmp");

        let mut temp_file = fs::File::create(&temp_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to create temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        temp_file
            .write_all(contents.as_bytes())
            .map_err(|e| AppError::ConfigError {
                reason: format!("Failed to write temp config file: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        temp_file.sync_all().map_err(|e| AppError::ConfigError {
            reason: format!("Failed to sync temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        fs::rename(&temp_path, config_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to rename temp config to final: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(config_path = ?config_path, "Configuration saved (atomic write)");

        Ok(())
    }

    /// Check session tunables are within range.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the auto-stop dwell or request timeout is
    /// zero or above its maximum.
    #[track_caller]
    pub fn validate(&self) -> AppResult<()> {
        let max_auto_stop_secs = MAX_AUTO_STOP.as_secs();
        if !(1..=max_auto_stop_secs).contains(&self.session.auto_stop_secs) {
            return Err(AppError::ConfigError {
                reason: format!(
                    "auto_stop_secs must be between 1 and {}, got {}",
                    max_auto_stop_secs, self.session.auto_stop_secs
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if !(1..=MAX_REQUEST_TIMEOUT_MS).contains(&self.session.request_timeout_ms) {
            return Err(AppError::ConfigError {
                reason: format!(
                    "request_timeout_ms must be between 1 and {}, got {}",
                    MAX_REQUEST_TIMEOUT_MS, self.session.request_timeout_ms
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }

    /// Replace the server address after checking it forms a usable URL.
    ///
    /// Does not persist; call [`Config::save`] afterwards. On error the
    /// current address is kept.
    #[track_caller]
    pub fn update_server_address(&mut self, address: &str) -> AppResult<()> {
        let address = address.trim();
        HttpRecordApi::new(address, self.request_timeout())?;

        debug!(old = %self.server.address, new = %address, "Server address updated");
        self.server.address = address.to_string();

        Ok(())
    }

    /// Build the backend client for the configured server.
    #[track_caller]
    pub fn record_api(&self) -> AppResult<HttpRecordApi> {
        Ok(HttpRecordApi::new(
            &self.server.address,
            self.request_timeout(),
        )?)
    }

    /// Per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.session.request_timeout_ms)
    }

    /// Session tunables derived from this configuration.
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            auto_stop_after: Duration::from_secs(self.session.auto_stop_secs),
        }
    }

    /// Feed display targets for a client built from this configuration.
    pub fn feed_endpoints(&self, api: &HttpRecordApi) -> FeedEndpoints {
        FeedEndpoints {
            live_url: api.live_feed_url(),
            placeholder: self.feed.placeholder_path.clone(),
        }
    }

    #[track_caller]
    fn config_path() -> AppResult<PathBuf> {
        let proj_dirs = project_dirs().ok_or_else(|| AppError::ConfigError {
            reason: "Failed to get project directories".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;
        let config_dir = proj_dirs.config_dir();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
            debug!(config_dir = ?config_dir, "Created config directory");
        }

        Ok(config_dir.join("config.toml"))
    }

    #[track_caller]
    fn create_default() -> AppResult<Self> {
        let config = Config::default();
        config.save()?;

        info!(
            server_address = %config.server.address,
            "Default config created. Set the appliance address if it differs."
        );

        Ok(config)
    }
}
