//! Byakugan Core Library
//!
//! Recording-session control for a home video-surveillance appliance:
//! local intent, a bounded auto-stop, and reconciliation with the
//! backend's confirmed state.
//!
//! # Example
//!
//! ```no_run
//! use byakugan_core::{CoreResult, HttpRecordApi, SessionController, SessionSettings};
//!
//! use std::{sync::Arc, time::Duration};
//!
//! #[tokio::main]
//! async fn main() -> CoreResult<()> {
//!     let api = Arc::new(HttpRecordApi::new("127.0.0.1:5000", Duration::from_secs(5))?);
//!     let session = SessionController::mount(api, SessionSettings::default()).await;
//!
//!     if session.snapshot().capability.allowed {
//!         session.toggle().await?;
//!     }
//!
//!     session.shutdown().await
//! }
//! ```

mod api;
mod error;
mod session;

pub use {
    api::{HttpRecordApi, RecordApi},
    error::{Result as CoreResult, SessionError},
    session::{
        ButtonStyle, DEFAULT_AUTO_STOP, FeedEndpoints, FeedSource, MAX_AUTO_STOP,
        RecordingCapability, RecordingIntent, SessionController, SessionHandle, SessionPhase,
        SessionSettings, SessionSnapshot, SessionState, ToggleButton, Transition,
    },
};
