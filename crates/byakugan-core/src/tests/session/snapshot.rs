use crate::{
    ButtonStyle, FeedEndpoints, FeedSource, RecordingCapability, RecordingIntent, SessionPhase,
    SessionSnapshot,
};

use std::path::PathBuf;

fn endpoints() -> FeedEndpoints {
    FeedEndpoints {
        live_url: "http://127.0.0.1:5000/api/live".to_string(),
        placeholder: PathBuf::from("assets/no-feed.png"),
    }
}

fn snapshot(allowed: bool, desired: bool, pending_sync: bool) -> SessionSnapshot {
    SessionSnapshot {
        intent: RecordingIntent {
            desired,
            pending_sync,
        },
        capability: RecordingCapability { allowed },
        auto_stop_armed: false,
    }
}

/// WHAT: Allowed sessions show the live feed and a start button
/// WHY: The operator can see the camera and start a recording
#[test]
fn given_allowed_idle_snapshot_when_projected_then_live_feed_and_start_button() {
    // Given: Allowed, idle snapshot
    let snap = snapshot(true, false, false);

    // When: Projecting feed and button
    let feed = snap.feed(&endpoints());
    let button = snap.toggle_button();

    // Then: Live feed and a primary "start" button
    assert_eq!(
        feed,
        FeedSource::Live("http://127.0.0.1:5000/api/live".to_string())
    );
    let button = button.map(|b| (b.label, b.style, b.busy));
    assert_eq!(
        button,
        Some(("⏺ Start Recording", ButtonStyle::Primary, false))
    );
}

/// WHAT: A recording, pending snapshot shows a busy stop button
/// WHY: The user sees the request is still on its way
#[test]
fn given_recording_pending_snapshot_when_projected_then_busy_stop_button() {
    // Given: Allowed, recording, pending
    let snap = snapshot(true, true, true);

    // When: Projecting the button
    let button = snap.toggle_button();

    // Then: Cancel-styled "stop" button marked busy
    assert_eq!(snap.phase(), SessionPhase::Recording);
    let button = button.map(|b| (b.label, b.style, b.busy));
    assert_eq!(button, Some(("⏹ Stop Recording", ButtonStyle::Cancel, true)));
}

/// WHAT: Disallowed sessions show the placeholder and no button
/// WHY: Fail closed when the server does not permit recording
#[test]
fn given_not_allowed_snapshot_when_projected_then_placeholder_and_hidden_button() {
    // Given: Not allowed
    let snap = snapshot(false, false, false);

    // When/Then: Placeholder feed, no button
    assert_eq!(
        snap.feed(&endpoints()),
        FeedSource::Placeholder(PathBuf::from("assets/no-feed.png"))
    );
    assert!(snap.toggle_button().is_none());
}
