use crate::config::{default_auto_stop_secs, default_request_timeout_ms};

use serde::{Deserialize, Serialize};

/// Recording session tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Seconds before a started recording is stopped automatically.
    #[serde(default = "default_auto_stop_secs")]
    pub auto_stop_secs: u64,

    /// Timeout for each backend request, in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            auto_stop_secs: default_auto_stop_secs(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}
