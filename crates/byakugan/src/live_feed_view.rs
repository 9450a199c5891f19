//! Terminal rendering of the live feed page.

use byakugan_core::{ButtonStyle, FeedEndpoints, FeedSource, SessionSnapshot};

/// Render one snapshot as the lines of the live feed page.
pub fn render_live_feed(snapshot: &SessionSnapshot, endpoints: &FeedEndpoints) -> String {
    let feed = match snapshot.feed(endpoints) {
        FeedSource::Live(url) => format!("Live Feed: {}", url),
        FeedSource::Placeholder(path) => {
            format!("Live Feed: unavailable (showing {})", path.display())
        }
    };

    let control = match snapshot.toggle_button() {
        Some(button) => {
            let caption = match button.style {
                ButtonStyle::Primary => format!("[ {} ]", button.label),
                ButtonStyle::Cancel => format!("[ {} ]  *REC*", button.label),
            };
            if button.busy {
                format!("{}  (waiting for device)", caption)
            } else {
                caption
            }
        }
        None => "Recording is disabled on the device".to_string(),
    };

    format!("{}\n{}", feed, control)
}
