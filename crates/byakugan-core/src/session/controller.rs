//! Recording session controller.
//!
//! A single actor task owns [`SessionState`] and the [`AutoStopTimer`] and
//! applies [`SessionEvent`]s one at a time. User commands, timer expiry and
//! sync resolutions all arrive on the same channel, so each event's
//! mutations are atomic relative to every other event. Observers read
//! [`SessionSnapshot`]s from a watch channel and never touch the state.

use crate::{
    CoreResult, SessionError,
    api::RecordApi,
    session::{
        AutoStopTimer, DEFAULT_AUTO_STOP, EVENT_CHANNEL_CAPACITY, RecordingCapability,
        ServerSync, SessionEvent, SessionSnapshot, SessionState, Transition,
    },
};

use std::{panic::Location, sync::Arc, time::Duration};

use error_location::ErrorLocation;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Tunables for a mounted session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    /// Dwell before an active recording is stopped automatically.
    pub auto_stop_after: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            auto_stop_after: DEFAULT_AUTO_STOP,
        }
    }
}

/// Actor owning one recording session.
pub struct SessionController<A: RecordApi> {
    session_id: Uuid,
    state: SessionState,
    timer: AutoStopTimer,
    sync: ServerSync<A>,
    events_tx: mpsc::WeakSender<SessionEvent>,
    events_rx: mpsc::Receiver<SessionEvent>,
    snapshot_tx: watch::Sender<SessionSnapshot>,
}

impl<A: RecordApi> SessionController<A> {
    /// Mount a session: query the backend, publish the first snapshot and
    /// start the actor.
    ///
    /// Never fails. If the capability cannot be confirmed the session mounts
    /// with recording disallowed; if the current recorder state cannot be
    /// read the session starts `Idle`.
    #[instrument(skip(api))]
    pub async fn mount(api: Arc<A>, settings: SessionSettings) -> SessionHandle {
        let session_id = Uuid::new_v4();

        let capability = match api.fetch_capability().await {
            Ok(capability) => capability,
            Err(e) => {
                warn!(session_id = %session_id, error = ?e, "Capability fetch failed, recording disallowed");
                RecordingCapability::DENIED
            }
        };

        let recording = if capability.allowed {
            match api.fetch_recording().await {
                Ok(recording) => recording,
                Err(e) => {
                    warn!(session_id = %session_id, error = ?e, "Recorder state fetch failed, assuming idle");
                    false
                }
            }
        } else {
            false
        };

        let state = SessionState::mounted(capability, recording);
        let (events_tx, events_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let weak_tx = events_tx.downgrade();
        let (snapshot_tx, snapshot_rx) = watch::channel(SessionSnapshot::default());

        let mut controller = Self {
            session_id,
            state,
            timer: AutoStopTimer::new(settings.auto_stop_after),
            sync: ServerSync::new(api, weak_tx.clone(), session_id),
            events_tx: weak_tx,
            events_rx,
            snapshot_tx,
        };

        // A recording already running on the device is bounded too.
        if controller.state.intent().desired {
            controller.timer.arm(&controller.events_tx);
        }
        controller.publish();

        info!(
            session_id = %session_id,
            allowed = capability.allowed,
            recording = controller.state.intent().desired,
            "Session mounted"
        );

        tokio::spawn(controller.run());

        SessionHandle {
            session_id,
            events_tx,
            snapshot_rx,
        }
    }

    #[instrument(skip(self), fields(session_id = %self.session_id))]
    async fn run(mut self) {
        while let Some(event) = self.events_rx.recv().await {
            if matches!(event, SessionEvent::Shutdown) {
                info!("Shutdown requested");
                break;
            }
            self.handle(event);
            self.publish();
        }

        // Must happen before the actor goes away: no deferred stop may
        // outlive the session it belongs to.
        self.timer.cancel();

        info!("Session unmounted");
    }

    fn handle(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Toggle => self.on_toggle(),
            SessionEvent::AutoStopFired { generation } => self.on_auto_stop(generation),
            SessionEvent::SyncResolved {
                transition,
                outcome,
            } => self.on_sync_resolved(transition, outcome),
            SessionEvent::Shutdown => {}
        }
    }

    fn on_toggle(&mut self) {
        if !self.state.capability().allowed {
            warn!("Toggle ignored, recording is not allowed by the server");
            return;
        }

        let transition = self.state.toggle();
        if !transition.desired {
            self.timer.cancel();
        }

        info!(desired = transition.desired, "Recording toggled");
        self.sync.sync(transition);
    }

    fn on_auto_stop(&mut self, generation: u64) {
        if !self.timer.take_fired(generation) {
            debug!(generation, "Stale auto-stop ignored");
            return;
        }

        if let Some(transition) = self.state.auto_stop_fired() {
            info!(
                dwell_ms = self.timer.dwell().as_millis(),
                "Auto-stop fired"
            );
            self.sync.sync(transition);
        }
    }

    fn on_sync_resolved(&mut self, transition: Transition, outcome: CoreResult<()>) {
        match outcome {
            Ok(()) => {
                self.state.sync_succeeded();

                let desired = self.state.intent().desired;
                if transition.desired && desired {
                    self.timer.arm(&self.events_tx);
                } else if !desired {
                    self.timer.cancel();
                }

                info!(desired = transition.desired, "Sync confirmed");
            }
            Err(e) => {
                self.state.sync_failed(transition.rollback_to);

                // A rollback to "off" may land after a newer "on" armed the
                // timer; the timer only lives while recording is desired.
                if !self.state.intent().desired {
                    self.timer.cancel();
                }

                warn!(
                    requested = transition.desired,
                    rolled_back_to = transition.rollback_to,
                    error = ?e,
                    "Sync failed, intent rolled back"
                );
            }
        }
    }

    fn publish(&self) {
        let snapshot = SessionSnapshot {
            intent: self.state.intent(),
            capability: self.state.capability(),
            auto_stop_armed: self.timer.is_armed(),
        };
        self.snapshot_tx.send_replace(snapshot);
    }
}

/// Cloneable handle used by display surfaces to observe and drive a session.
///
/// The session tears itself down once every handle is dropped and no sync
/// is still in flight.
#[derive(Clone)]
pub struct SessionHandle {
    session_id: Uuid,
    events_tx: mpsc::Sender<SessionEvent>,
    snapshot_rx: watch::Receiver<SessionSnapshot>,
}

impl SessionHandle {
    /// Id used to correlate this session's log lines.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Most recently published snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        *self.snapshot_rx.borrow()
    }

    /// Receiver that wakes on every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshot_rx.clone()
    }

    /// Ask the session to flip the recording state.
    #[track_caller]
    pub fn toggle(&self) -> impl Future<Output = CoreResult<()>> + Send + '_ {
        let location = ErrorLocation::from(Location::caller());
        async move {
            self.events_tx
                .send(SessionEvent::Toggle)
                .await
                .map_err(|_| SessionError::SessionClosed { location })
        }
    }

    /// Stop the session and wait until the actor has torn down.
    ///
    /// The auto-stop timer is cancelled before this returns.
    #[track_caller]
    pub fn shutdown(self) -> impl Future<Output = CoreResult<()>> + Send {
        let location = ErrorLocation::from(Location::caller());
        async move {
            let mut snapshot_rx = self.snapshot_rx;
            self.events_tx
                .send(SessionEvent::Shutdown)
                .await
                .map_err(|_| SessionError::SessionClosed { location })?;

            // The watch sender drops with the actor.
            while snapshot_rx.changed().await.is_ok() {}

            Ok(())
        }
    }
}
