//! Single-shot auto-stop timer.
//!
//! At most one instance is ever scheduled. Every armed instance gets a new
//! generation number; the controller only honours a fire event whose
//! generation matches the instance currently armed, so a fire racing with
//! `cancel()` is dropped instead of acting on a newer session state.

use crate::session::{MAX_AUTO_STOP, SessionEvent};

use std::time::Duration;

use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{Instant, sleep_until},
};
use tracing::{debug, warn};

struct ArmedTimer {
    generation: u64,
    deadline: Instant,
    handle: JoinHandle<()>,
}

/// Deferred "stop recording" action owned by the session controller.
pub(crate) struct AutoStopTimer {
    dwell: Duration,
    generation: u64,
    armed: Option<ArmedTimer>,
}

impl AutoStopTimer {
    /// Create an unarmed timer that fires `dwell` after each `arm()`.
    ///
    /// A dwell above [`MAX_AUTO_STOP`] is clamped to it.
    pub(crate) fn new(dwell: Duration) -> Self {
        if dwell > MAX_AUTO_STOP {
            warn!(
                dwell_secs = dwell.as_secs(),
                max_secs = MAX_AUTO_STOP.as_secs(),
                "Auto-stop dwell clamped"
            );
        }

        Self {
            dwell: dwell.min(MAX_AUTO_STOP),
            generation: 0,
            armed: None,
        }
    }

    /// Dwell interval between arming and firing.
    pub(crate) fn dwell(&self) -> Duration {
        self.dwell
    }

    /// Whether an instance is currently scheduled.
    pub(crate) fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Deadline of the scheduled instance, if any.
    #[cfg(test)]
    pub(crate) fn deadline(&self) -> Option<Instant> {
        self.armed.as_ref().map(|armed| armed.deadline)
    }

    /// Schedule a fire event unless one is already pending.
    ///
    /// Returns `false` (and keeps the original deadline) when already armed.
    /// The task holds only a weak sender, so a pending timer never keeps a
    /// torn-down session alive.
    pub(crate) fn arm(&mut self, events_tx: &mpsc::WeakSender<SessionEvent>) -> bool {
        if let Some(armed) = &self.armed {
            debug!(
                generation = armed.generation,
                "Auto-stop already armed, keeping original deadline"
            );
            return false;
        }

        let Some(deadline) = Instant::now().checked_add(self.dwell) else {
            warn!(
                dwell_ms = self.dwell.as_millis(),
                "Auto-stop deadline out of range, not armed"
            );
            return false;
        };

        self.generation = self.generation.wrapping_add(1);
        let generation = self.generation;
        let events_tx = events_tx.clone();

        let handle = tokio::spawn(async move {
            sleep_until(deadline).await;
            if let Some(events_tx) = events_tx.upgrade() {
                let _ = events_tx
                    .send(SessionEvent::AutoStopFired { generation })
                    .await;
            }
        });

        debug!(
            generation,
            dwell_ms = self.dwell.as_millis(),
            "Auto-stop armed"
        );

        self.armed = Some(ArmedTimer {
            generation,
            deadline,
            handle,
        });

        true
    }

    /// Clear the scheduled instance. Returns `false` if nothing was armed.
    pub(crate) fn cancel(&mut self) -> bool {
        match self.armed.take() {
            Some(armed) => {
                armed.handle.abort();
                debug!(
                    generation = armed.generation,
                    remaining_ms = armed
                        .deadline
                        .saturating_duration_since(Instant::now())
                        .as_millis(),
                    "Auto-stop cancelled"
                );
                true
            }
            None => false,
        }
    }

    /// Consume a fire event. Returns `true` only for the instance still armed.
    pub(crate) fn take_fired(&mut self, generation: u64) -> bool {
        let current = self.armed.as_ref().map(|armed| armed.generation);
        if current != Some(generation) {
            return false;
        }

        // Fired instances have already finished; nothing to abort.
        self.armed = None;
        true
    }
}

impl Drop for AutoStopTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
