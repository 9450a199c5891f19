mod controller;
mod event;
mod intent;
mod snapshot;
mod state;
mod sync;
mod timer;

pub(crate) use {event::SessionEvent, sync::ServerSync, timer::AutoStopTimer};

pub use {
    controller::{SessionController, SessionHandle, SessionSettings},
    intent::{RecordingCapability, RecordingIntent},
    snapshot::{ButtonStyle, FeedEndpoints, FeedSource, SessionSnapshot, ToggleButton},
    state::{SessionPhase, SessionState, Transition},
};

use std::time::Duration;

/// Dwell before a recording started from this client is stopped automatically.
pub const DEFAULT_AUTO_STOP: Duration = Duration::from_secs(10);

/// Longest dwell the auto-stop timer accepts; longer settings are clamped.
pub const MAX_AUTO_STOP: Duration = Duration::from_secs(24 * 60 * 60);

/// Capacity of the session actor's event channel.
pub(crate) const EVENT_CHANNEL_CAPACITY: usize = 32;
