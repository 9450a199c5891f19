use crate::{CoreResult, session::Transition};

/// Messages processed by the session actor, one at a time.
#[derive(Debug)]
pub(crate) enum SessionEvent {
    /// User flipped the recording control.
    Toggle,
    /// An auto-stop timer instance reached its deadline.
    AutoStopFired {
        /// Generation of the timer instance that fired.
        generation: u64,
    },
    /// A state-change request finished.
    SyncResolved {
        /// The local transition the request carried.
        transition: Transition,
        /// Backend outcome.
        outcome: CoreResult<()>,
    },
    /// Tear the session down.
    Shutdown,
}
