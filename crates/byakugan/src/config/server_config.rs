use crate::config::default_server_address;

use serde::{Deserialize, Serialize};

/// Appliance backend location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// `host:port` or full URL of the appliance.
    #[serde(default = "default_server_address")]
    pub address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_server_address(),
        }
    }
}
