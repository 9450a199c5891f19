//! JSON shapes exchanged with the appliance backend.

use serde::{Deserialize, Serialize};

/// `recording` value of `GET /api/record_status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum CapabilityState {
    Enabled,
    Disabled,
}

/// Recorder on/off value, used by `GET /api/record` and `POST /api/record`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum RecorderState {
    On,
    Off,
}

impl From<bool> for RecorderState {
    fn from(recording: bool) -> Self {
        if recording {
            RecorderState::On
        } else {
            RecorderState::Off
        }
    }
}

/// Body of `GET /api/record_status`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub(crate) struct CapabilityStatusResponse {
    pub(crate) recording: CapabilityState,
}

/// Body of `GET /api/record`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub(crate) struct RecorderStatusResponse {
    pub(crate) recording: RecorderState,
}

/// Body of `POST /api/record`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub(crate) struct NewStateRequest {
    pub(crate) new_state: RecorderState,
}
