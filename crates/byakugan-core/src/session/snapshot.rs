//! Read-only views of a session for display surfaces.

use crate::session::{RecordingCapability, RecordingIntent, SessionPhase};

use std::path::PathBuf;

/// Immutable copy of session state published after every event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionSnapshot {
    /// Recording intent at publish time.
    pub intent: RecordingIntent,
    /// Capability fetched at mount.
    pub capability: RecordingCapability,
    /// Whether the auto-stop timer is scheduled.
    pub auto_stop_armed: bool,
}

/// Where the feed display should point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEndpoints {
    /// Live image stream URL.
    pub live_url: String,
    /// Static asset shown when recording is not allowed.
    pub placeholder: PathBuf,
}

/// What the feed display shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    /// Live stream from the device.
    Live(String),
    /// Static placeholder asset.
    Placeholder(PathBuf),
}

/// Visual style of the recording control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    /// Call-to-action style, used for "start".
    Primary,
    /// Destructive style, used for "stop".
    Cancel,
}

/// Recording control as it should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleButton {
    /// Button caption.
    pub label: &'static str,
    /// Button style.
    pub style: ButtonStyle,
    /// A state change is still waiting on the backend.
    pub busy: bool,
}

impl SessionSnapshot {
    /// Phase derived from `desired`.
    pub fn phase(&self) -> SessionPhase {
        if self.intent.desired {
            SessionPhase::Recording
        } else {
            SessionPhase::Idle
        }
    }

    /// Feed projection: live only when the server allows recording.
    pub fn feed(&self, endpoints: &FeedEndpoints) -> FeedSource {
        if self.capability.allowed {
            FeedSource::Live(endpoints.live_url.clone())
        } else {
            FeedSource::Placeholder(endpoints.placeholder.clone())
        }
    }

    /// Button projection: hidden unless the server allows recording.
    pub fn toggle_button(&self) -> Option<ToggleButton> {
        if !self.capability.allowed {
            return None;
        }

        let (label, style) = match self.phase() {
            SessionPhase::Idle => ("⏺ Start Recording", ButtonStyle::Primary),
            SessionPhase::Recording => ("⏹ Stop Recording", ButtonStyle::Cancel),
        };

        Some(ToggleButton {
            label,
            style,
            busy: self.intent.pending_sync,
        })
    }
}
