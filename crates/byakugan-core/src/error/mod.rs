use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Session and backend errors with source location tracking.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The request never produced an HTTP response (connect, timeout, TLS).
    #[error("Backend unreachable: {source} {location}")]
    Transport {
        /// Underlying error from reqwest.
        #[source]
        source: reqwest::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The backend answered with a non-success status code.
    #[error("Backend rejected request: HTTP {status} {location}")]
    Rejected {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The backend answered, but the body was not the expected JSON shape.
    #[error("Malformed backend response: {reason} {location}")]
    MalformedResponse {
        /// Description of what could not be decoded.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The configured server address cannot form a valid URL.
    #[error("Invalid server address {address:?}: {reason} {location}")]
    InvalidServerAddress {
        /// The address as configured.
        address: String,
        /// Description of the problem.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The session actor is gone and can no longer accept commands.
    #[error("Session closed {location}")]
    SessionClosed {
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

// Manual From with location tracking.
// Cannot use #[from] because it does not support extra fields.
impl From<reqwest::Error> for SessionError {
    #[track_caller]
    fn from(source: reqwest::Error) -> Self {
        SessionError::Transport {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Result type alias using [`SessionError`].
pub type Result<T> = std::result::Result<T, SessionError>;
