//! Bridge between local transitions and the backend.

use crate::{
    api::RecordApi,
    session::{SessionEvent, Transition},
};

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, instrument};
use uuid::Uuid;

/// The only part of a session that performs network I/O.
pub(crate) struct ServerSync<A: RecordApi> {
    api: Arc<A>,
    events_tx: mpsc::WeakSender<SessionEvent>,
    session_id: Uuid,
}

impl<A: RecordApi> ServerSync<A> {
    pub(crate) fn new(
        api: Arc<A>,
        events_tx: mpsc::WeakSender<SessionEvent>,
        session_id: Uuid,
    ) -> Self {
        Self {
            api,
            events_tx,
            session_id,
        }
    }

    /// Push `transition.desired` to the backend without blocking the caller.
    ///
    /// The outcome comes back to the actor as [`SessionEvent::SyncResolved`].
    /// Overlapping calls are independent; each resolves on its own.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub(crate) fn sync(&self, transition: Transition) {
        // Strong sender for the duration of the request: a resolution must
        // reach the actor even if every handle was dropped meanwhile.
        let Some(events_tx) = self.events_tx.upgrade() else {
            debug!("Session already torn down, sync skipped");
            return;
        };
        let api = Arc::clone(&self.api);

        tokio::spawn(async move {
            let outcome = api.set_recording(transition.desired).await;
            let _ = events_tx
                .send(SessionEvent::SyncResolved {
                    transition,
                    outcome,
                })
                .await;
        });
    }
}
