use crate::config::default_placeholder_path;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Live feed display configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Image shown instead of the live feed when recording is not allowed.
    #[serde(default = "default_placeholder_path")]
    pub placeholder_path: PathBuf,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            placeholder_path: default_placeholder_path(),
        }
    }
}
