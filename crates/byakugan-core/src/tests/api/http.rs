use crate::{HttpRecordApi, RecordApi, SessionController, SessionError, SessionSettings};

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

const TIMEOUT: Duration = Duration::from_secs(2);

/// Serve `router` on an ephemeral local port and return its address.
#[allow(clippy::unwrap_used)]
async fn spawn_backend(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    addr.to_string()
}

/// Backend whose POST handler records every body it receives.
fn recording_backend(capability: &'static str, seen: Arc<Mutex<Vec<Value>>>) -> Router {
    Router::new()
        .route(
            "/api/record_status",
            get(move || async move { Json(json!({ "recording": capability })) }),
        )
        .route(
            "/api/record",
            get(|| async { Json(json!({ "recording": "off" })) }).post(
                move |Json(body): Json<Value>| {
                    let seen = Arc::clone(&seen);
                    async move {
                        #[allow(clippy::unwrap_used)]
                        seen.lock().unwrap().push(body);
                        (
                            StatusCode::CREATED,
                            Json(json!({ "status": "Recording state changed" })),
                        )
                    }
                },
            ),
        )
}

/// WHAT: "enabled" maps to allowed
/// WHY: Mount decides whether the control is shown from this response
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_enabled_status_when_fetching_capability_then_allowed() {
    // Given: A backend reporting recording enabled
    let addr = spawn_backend(recording_backend("enabled", Arc::default())).await;
    let api = HttpRecordApi::new(&addr, TIMEOUT).unwrap();

    // When: Fetching capability
    let capability = api.fetch_capability().await.unwrap();

    // Then: Allowed
    assert!(capability.allowed);
}

/// WHAT: "disabled" maps to not allowed
/// WHY: The operator kill switch must hide the control
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_disabled_status_when_fetching_capability_then_not_allowed() {
    // Given: A backend reporting recording disabled
    let addr = spawn_backend(recording_backend("disabled", Arc::default())).await;
    let api = HttpRecordApi::new(&addr, TIMEOUT).unwrap();

    // When: Fetching capability
    let capability = api.fetch_capability().await.unwrap();

    // Then: Not allowed
    assert!(!capability.allowed);
}

/// WHAT: Unknown capability values are malformed
/// WHY: Anything but an explicit "enabled" must fail closed
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_unknown_status_value_when_fetching_capability_then_malformed_error() {
    // Given: A backend reporting an unexpected value
    let addr = spawn_backend(recording_backend("maybe", Arc::default())).await;
    let api = HttpRecordApi::new(&addr, TIMEOUT).unwrap();

    // When: Fetching capability
    let result = api.fetch_capability().await;

    // Then: MalformedResponse
    assert!(matches!(result, Err(SessionError::MalformedResponse { .. })));
}

/// WHAT: The recorder state query decodes "on"/"off"
/// WHY: Mount seeds the session from this ground truth
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_recorder_off_when_fetching_recording_then_false() {
    // Given: A backend whose recorder is off
    let addr = spawn_backend(recording_backend("enabled", Arc::default())).await;
    let api = HttpRecordApi::new(&addr, TIMEOUT).unwrap();

    // When: Fetching recorder state
    let recording = api.fetch_recording().await.unwrap();

    // Then: Not recording
    assert!(!recording);
}

/// WHAT: State changes post the exact request body
/// WHY: The backend only understands {"new_state": "on"|"off"}
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_backend_when_setting_recording_then_new_state_body_posted() {
    // Given: A backend recording POST bodies
    let seen = Arc::new(Mutex::new(Vec::new()));
    let addr = spawn_backend(recording_backend("enabled", Arc::clone(&seen))).await;
    let api = HttpRecordApi::new(&addr, TIMEOUT).unwrap();

    // When: Turning recording on, then off
    api.set_recording(true).await.unwrap();
    api.set_recording(false).await.unwrap();

    // Then: Both bodies arrived in order
    assert_eq!(
        *seen.lock().unwrap(),
        vec![json!({ "new_state": "on" }), json!({ "new_state": "off" })]
    );
}

/// WHAT: Non-success status codes are rejections
/// WHY: A 400 "already recording" must roll the toggle back
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_bad_request_when_setting_recording_then_rejected_error() {
    // Given: A backend that refuses state changes
    let router = Router::new().route(
        "/api/record",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "status": "The program is already recording" })),
            )
        }),
    );
    let addr = spawn_backend(router).await;
    let api = HttpRecordApi::new(&addr, TIMEOUT).unwrap();

    // When: Turning recording on
    let result = api.set_recording(true).await;

    // Then: Rejected with the status code
    assert!(matches!(
        result,
        Err(SessionError::Rejected { status: 400, .. })
    ));
}

/// WHAT: A success status with a non-JSON body is malformed
/// WHY: Acknowledgement requires a JSON body
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_plain_text_body_when_setting_recording_then_malformed_error() {
    // Given: A backend answering 200 with plain text
    let router = Router::new().route("/api/record", post(|| async { "ok" }));
    let addr = spawn_backend(router).await;
    let api = HttpRecordApi::new(&addr, TIMEOUT).unwrap();

    // When: Turning recording on
    let result = api.set_recording(true).await;

    // Then: MalformedResponse
    assert!(matches!(result, Err(SessionError::MalformedResponse { .. })));
}

/// WHAT: An unreachable backend is a transport error
/// WHY: Network failure is distinct from a rejection in logs
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_closed_port_when_fetching_capability_then_transport_error() {
    // Given: An address nobody listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    drop(listener);
    let api = HttpRecordApi::new(&addr, TIMEOUT).unwrap();

    // When: Fetching capability
    let result = api.fetch_capability().await;

    // Then: Transport error
    assert!(matches!(result, Err(SessionError::Transport { .. })));
}

/// WHAT: Bare and full addresses normalize to one base URL
/// WHY: Settings store "host:port" while URLs need a scheme
#[test]
#[allow(clippy::unwrap_used)]
fn given_server_addresses_when_creating_client_then_base_url_normalized() {
    // Given/When: A bare address and a full URL with trailing slash
    let bare = HttpRecordApi::new("127.0.0.1:5000", TIMEOUT).unwrap();
    let full = HttpRecordApi::new("https://camera.local/", TIMEOUT).unwrap();
    let slashed = HttpRecordApi::new("camera.local:5000//", TIMEOUT).unwrap();

    // Then: Scheme added, trailing slash dropped, live feed derived
    assert_eq!(bare.base_url(), "http://127.0.0.1:5000");
    assert_eq!(bare.live_feed_url(), "http://127.0.0.1:5000/api/live");
    assert_eq!(full.base_url(), "https://camera.local");
    assert_eq!(slashed.base_url(), "http://camera.local:5000");
}

/// WHAT: Empty and non-HTTP addresses are rejected
/// WHY: A bad setting should fail at construction, not at first toggle
#[test]
fn given_invalid_addresses_when_creating_client_then_invalid_server_address() {
    // Given/When/Then: Each bad address is rejected
    for address in ["", "   ", "/", "ftp://camera.local", "http://", "https:///", " http:// "] {
        let result = HttpRecordApi::new(address, TIMEOUT);
        assert!(
            matches!(result, Err(SessionError::InvalidServerAddress { .. })),
            "address {:?} should be rejected",
            address
        );
    }
}

/// WHAT: Full session against a real HTTP backend
/// WHY: Mount, toggle and auto-stop use the wire contract end to end
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_http_backend_when_session_toggled_then_on_and_auto_off_posted() {
    // Given: A session with a short dwell mounted on a fake backend
    let seen = Arc::new(Mutex::new(Vec::new()));
    let addr = spawn_backend(recording_backend("enabled", Arc::clone(&seen))).await;
    let api = Arc::new(HttpRecordApi::new(&addr, TIMEOUT).unwrap());
    let settings = SessionSettings {
        auto_stop_after: Duration::from_millis(50),
    };
    let session = SessionController::mount(api, settings).await;
    assert!(session.snapshot().capability.allowed);

    // When: Toggling once and waiting for the auto-stop
    session.toggle().await.unwrap();
    let observed = Arc::clone(&seen);
    let mut snapshots = session.subscribe();
    tokio::time::timeout(
        Duration::from_secs(5),
        snapshots.wait_for(|s| {
            !s.intent.desired && !s.intent.pending_sync && observed.lock().unwrap().len() == 2
        }),
    )
    .await
    .unwrap()
    .unwrap();

    // Then: "on" then "off" reached the backend
    assert_eq!(
        *seen.lock().unwrap(),
        vec![json!({ "new_state": "on" }), json!({ "new_state": "off" })]
    );
    session.shutdown().await.unwrap();
}

/// WHAT: Rejections carry the location of the request that was refused
/// WHY: Logs must tell a refused status query from a refused state change
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_refusing_backend_when_requests_rejected_then_locations_differ_per_call_site() {
    // Given: A backend refusing every request
    let router = Router::new()
        .route(
            "/api/record_status",
            get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        )
        .route("/api/record", post(|| async { StatusCode::BAD_REQUEST }));
    let addr = spawn_backend(router).await;
    let api = HttpRecordApi::new(&addr, TIMEOUT).unwrap();

    // When: A status query and a state change are both rejected
    let Err(SessionError::Rejected {
        status: query_status,
        location: query_location,
    }) = api.fetch_capability().await
    else {
        unreachable!("status query should be rejected");
    };
    let Err(SessionError::Rejected {
        status: change_status,
        location: change_location,
    }) = api.set_recording(true).await
    else {
        unreachable!("state change should be rejected");
    };

    // Then: Both point into the client, at different call sites
    assert_eq!(query_status, 503);
    assert_eq!(change_status, 400);
    assert!(query_location.file.ends_with("src/api/http.rs"));
    assert!(change_location.file.ends_with("src/api/http.rs"));
    assert_ne!(query_location.line, change_location.line);
}
