//! HTTP client for the appliance's recording endpoints.

use crate::{
    CoreResult, SessionError,
    api::{
        CapabilityState, CapabilityStatusResponse, NewStateRequest, RecordApi, RecorderState,
        RecorderStatusResponse,
    },
    session::RecordingCapability,
};

use std::{panic::Location, time::Duration};

use error_location::ErrorLocation;
use reqwest::{Client, Response, Url};
use serde::{de::DeserializeOwned, de::IgnoredAny};
use tracing::{debug, instrument};

const RECORD_STATUS_PATH: &str = "/api/record_status";
const RECORD_PATH: &str = "/api/record";
const LIVE_FEED_PATH: &str = "/api/live";

/// [`RecordApi`] backed by the appliance's REST endpoints.
#[derive(Debug, Clone)]
pub struct HttpRecordApi {
    client: Client,
    base_url: String,
}

impl HttpRecordApi {
    /// Build a client for `server_address`.
    ///
    /// Accepts a bare `host:port` (as entered in settings) or a full
    /// `http(s)://` URL. A trailing slash is ignored.
    ///
    /// # Errors
    ///
    /// Returns error if the address does not form a valid URL or the HTTP
    /// client cannot be built.
    #[track_caller]
    #[instrument]
    pub fn new(server_address: &str, timeout: Duration) -> CoreResult<Self> {
        let base_url = normalize_base_url(server_address)?;
        let client = Client::builder().timeout(timeout).build()?;

        debug!(base_url = %base_url, "Backend client created");

        Ok(Self { client, base_url })
    }

    /// Base URL every request is built on, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the live image stream.
    pub fn live_feed_url(&self) -> String {
        self.url(LIVE_FEED_PATH)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> CoreResult<T> {
        let response = self.client.get(self.url(path)).send().await?;
        decode(response).await
    }
}

impl RecordApi for HttpRecordApi {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch_capability(&self) -> CoreResult<RecordingCapability> {
        let status: CapabilityStatusResponse = self.get_json(RECORD_STATUS_PATH).await?;

        Ok(RecordingCapability {
            allowed: status.recording == CapabilityState::Enabled,
        })
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch_recording(&self) -> CoreResult<bool> {
        let status: RecorderStatusResponse = self.get_json(RECORD_PATH).await?;

        Ok(status.recording == RecorderState::On)
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn set_recording(&self, desired: bool) -> CoreResult<()> {
        let body = NewStateRequest {
            new_state: RecorderState::from(desired),
        };

        let response = self
            .client
            .post(self.url(RECORD_PATH))
            .json(&body)
            .send()
            .await?;

        // Any JSON body counts as an acknowledgement.
        let _: IgnoredAny = decode(response).await?;

        debug!(desired, "Backend acknowledged state change");

        Ok(())
    }
}

#[track_caller]
fn decode<T: DeserializeOwned>(response: Response) -> impl Future<Output = CoreResult<T>> {
    let location = ErrorLocation::from(Location::caller());
    async move {
        let status = response.status();
        if !status.is_success() {
            return Err(SessionError::Rejected {
                status: status.as_u16(),
                location,
            });
        }

        response.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                SessionError::MalformedResponse {
                    reason: e.to_string(),
                    location,
                }
            } else {
                SessionError::Transport {
                    source: e,
                    location,
                }
            }
        })
    }
}

#[track_caller]
fn normalize_base_url(server_address: &str) -> CoreResult<String> {
    let trimmed = server_address.trim();

    if trimmed.trim_end_matches('/').is_empty() {
        return Err(SessionError::InvalidServerAddress {
            address: server_address.to_string(),
            reason: "address is empty".to_string(),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    // Scheme is detected before any slash is stripped, so "http://" stays a
    // URL with an empty host rather than turning into a bare "http:" host.
    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    };

    let url = Url::parse(&candidate).map_err(|e| SessionError::InvalidServerAddress {
        address: server_address.to_string(),
        reason: e.to_string(),
        location: ErrorLocation::from(Location::caller()),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(SessionError::InvalidServerAddress {
            address: server_address.to_string(),
            reason: format!("unsupported scheme {:?}", url.scheme()),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(SessionError::InvalidServerAddress {
            address: server_address.to_string(),
            reason: "address has no host".to_string(),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    Ok(candidate.trim_end_matches('/').to_string())
}
