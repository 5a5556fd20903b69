//! Cumulative tracklist timestamps.
//!
//! A YouTube comment line per track, prefixed with the elapsed time at which
//! that track starts: the running sum of all preceding tracks' durations.

use serde_json::Value;
use tracing::debug;

use crate::models::TrackRecord;

/// Format elapsed seconds as `M:SS`, switching to `H:MM:SS` from one hour.
/// Negative totals clamp to zero.
pub fn format_timestamp(total_seconds: i64) -> String {
    let total = total_seconds.max(0);
    let h = total / 3600;
    let m = (total % 3600) / 60;
    let s = total % 60;
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}", m, s)
    }
}

/// Build a timestamped comment from a tracklist.
///
/// One line per track of the form `0:00 *Title* – Artist`; tracks with
/// neither title nor artist emit no line, but their duration still advances
/// the clock. Missing or malformed durations contribute zero elapsed time,
/// so the next track keeps the same start.
pub fn build_timestamp_comment(tracklist: &[Value]) -> String {
    let mut elapsed: i64 = 0;
    let mut lines = Vec::new();

    for item in tracklist {
        let Some(track) = TrackRecord::from_value(item) else {
            continue;
        };

        if let Some(line) = display_line(&track) {
            lines.push(format!("{} {}", format_timestamp(elapsed), line));
        }

        match track.duration_seconds() {
            Some(seconds) => elapsed += seconds,
            None => debug!("track without usable duration; clock unchanged"),
        }
    }

    lines.join("\n")
}

/// `*Title* – Artist`, degrading to whichever half is present.
fn display_line(track: &TrackRecord<'_>) -> Option<String> {
    let title = track.title();
    let artist = track.artist();

    let mut parts = Vec::new();
    if !title.is_empty() {
        parts.push(format!("*{}*", title));
    }
    if !artist.is_empty() {
        if !parts.is_empty() {
            parts.push("–".to_string());
        }
        parts.push(artist);
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}
