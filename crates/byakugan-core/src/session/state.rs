//! Recording session state machine.
//!
//! Pure transitions over [`RecordingIntent`]. Side effects (network sync,
//! auto-stop scheduling) are decided by the controller from the returned
//! [`Transition`] records.

use crate::session::{RecordingCapability, RecordingIntent};

/// A local change of `desired` that must be pushed to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Value `desired` now holds.
    pub desired: bool,
    /// Value `desired` held before this transition. Restored if the sync fails.
    pub rollback_to: bool,
}

/// Coarse phase of the session, derived from `desired`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Not recording.
    Idle,
    /// Recording.
    Recording,
}

/// Intent plus capability, owned exclusively by the session controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionState {
    intent: RecordingIntent,
    capability: RecordingCapability,
}

impl SessionState {
    /// Fresh session: `Idle`, synced, recording not allowed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Session seeded from values the server reported at mount.
    pub fn mounted(capability: RecordingCapability, recording: bool) -> Self {
        Self {
            intent: RecordingIntent {
                desired: capability.allowed && recording,
                pending_sync: false,
            },
            capability,
        }
    }

    /// Current intent.
    pub fn intent(&self) -> RecordingIntent {
        self.intent
    }

    /// Current capability.
    pub fn capability(&self) -> RecordingCapability {
        self.capability
    }

    /// User flipped the control.
    pub fn toggle(&mut self) -> Transition {
        let rollback_to = self.intent.desired;
        self.intent.desired = !rollback_to;
        self.intent.pending_sync = true;

        Transition {
            desired: self.intent.desired,
            rollback_to,
        }
    }

    /// Auto-stop dwell elapsed. Only meaningful while recording.
    pub fn auto_stop_fired(&mut self) -> Option<Transition> {
        if !self.intent.desired {
            return None;
        }

        self.intent.desired = false;
        self.intent.pending_sync = true;

        Some(Transition {
            desired: false,
            rollback_to: true,
        })
    }

    /// Backend acknowledged a sync.
    pub fn sync_succeeded(&mut self) {
        self.intent.pending_sync = false;
    }

    /// Backend rejected a sync, or it never arrived.
    ///
    /// Applies to whatever `desired` holds at resolution time, so a failure
    /// can overwrite a newer toggle that is still in flight.
    pub fn sync_failed(&mut self, rollback_to: bool) {
        self.intent.desired = rollback_to;
        self.intent.pending_sync = false;
    }
}
