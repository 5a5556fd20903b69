//! Derived episode summaries.
//!
//! Pure functions over a tracklist/episode mapping: the human-readable
//! tracklist block, year span, notable-artist list, hashtag list, slug and
//! URL helpers. Everything degrades to a fallback literal instead of
//! failing on absent data.

use serde_json::Value;

use crate::config::ChannelConfig;
use crate::models::{Episode, TrackRecord};

/// One line per renderable track: `- Artist – Title (year) — Album`,
/// omitting any absent piece. `(none)` when nothing renders.
pub fn format_tracklist(tracklist: &[Value]) -> String {
    let mut lines = Vec::new();
    for item in tracklist {
        let Some(track) = TrackRecord::from_value(item) else {
            continue;
        };
        let title = track.title();
        let artist = track.artist();
        let year = track.year_text();
        let album = track.album();

        let mut parts = Vec::new();
        if !artist.is_empty() && !title.is_empty() {
            parts.push(format!("{} – {}", artist, title));
        } else if !title.is_empty() {
            parts.push(title);
        }
        if !year.is_empty() {
            parts.push(format!("({})", year));
        }
        if !album.is_empty() {
            parts.push(format!("— {}", album));
        }

        let line = parts.join(" ");
        if !line.is_empty() {
            lines.push(format!("- {}", line));
        }
    }
    if lines.is_empty() {
        "(none)".to_string()
    } else {
        lines.join("\n")
    }
}

/// Year span across the tracklist: `min–max` for multiple distinct years,
/// the single year otherwise, `(unknown)` when none are usable.
pub fn year_span(tracklist: &[Value]) -> String {
    let years: Vec<i32> = tracklist
        .iter()
        .filter_map(TrackRecord::from_value)
        .filter_map(|t| t.year())
        .collect();
    if years.is_empty() {
        return "(unknown)".to_string();
    }
    let min = *years.iter().min().unwrap_or(&years[0]);
    let max = *years.iter().max().unwrap_or(&years[0]);
    if min != max {
        format!("{}–{}", min, max)
    } else {
        years[0].to_string()
    }
}

/// Distinct artist names in first-seen order, capped at `limit`.
///
/// Artist credits are split on `/` and `,` so shared billings contribute
/// each name separately.
pub fn notable_artists(tracklist: &[Value], limit: usize) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    'outer: for item in tracklist {
        let Some(track) = TrackRecord::from_value(item) else {
            continue;
        };
        let artist = track.artist();
        if artist.is_empty() {
            continue;
        }
        for part in artist.split(['/', ',']) {
            let name = part.trim();
            if !name.is_empty() && !seen.iter().any(|s| s == name) {
                seen.push(name.to_string());
            }
            if seen.len() >= limit {
                break 'outer;
            }
        }
    }
    seen
}

/// Capped, deduplicated hashtag list from tags/styles/genres plus the first
/// name token of each notable artist. Lowercase, ASCII alphanumerics only,
/// `#`-prefixed, first-seen order.
pub fn hashtags(episode: &Episode, max_tags: usize) -> Vec<String> {
    let mut raw: Vec<String> = Vec::new();
    for key in ["tags", "styles", "genres"] {
        match episode.get(key) {
            Some(Value::Array(items)) => {
                raw.extend(
                    items
                        .iter()
                        .filter_map(|v| v.as_str())
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty()),
                );
            }
            Some(Value::String(s)) if !s.trim().is_empty() => {
                raw.extend(
                    s.split(',')
                        .map(|part| part.trim().to_string())
                        .filter(|part| !part.is_empty()),
                );
            }
            _ => {}
        }
    }
    for artist in notable_artists(episode.tracklist(), 6) {
        if let Some(first) = artist.split_whitespace().next() {
            raw.push(first.to_string());
        }
    }
    let mut out = Vec::new();
    for tag in raw {
        let normalized: String = tag
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        if normalized.is_empty() {
            continue;
        }
        let hashtag = format!("#{}", normalized);
        if out.contains(&hashtag) {
            continue;
        }
        out.push(hashtag);
        if out.len() >= max_tags {
            break;
        }
    }
    out
}

/// URL-safe slug: lowercased, punctuation dropped, whitespace/underscore
/// runs collapsed to single dashes. `episode` when nothing survives.
pub fn slugify(s: &str) -> String {
    let lowered = s.trim().to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut pending_dash = false;
    for c in lowered.chars() {
        if c.is_whitespace() || c == '_' || c == '-' {
            pending_dash = true;
        } else if c.is_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c);
        }
        // other punctuation is dropped without breaking the word
    }
    if out.is_empty() {
        "episode".to_string()
    } else {
        out
    }
}

/// Episode page URL: `{site_base}{shows_path}/{slug}/`, deriving the slug
/// from the title when none is set.
pub fn show_url(episode: &Episode, config: &ChannelConfig) -> String {
    let slug = episode.slug().unwrap_or_else(|| slugify(&episode.title()));
    format!(
        "{}{}/{}/",
        config.site_base.trim_end_matches('/'),
        config.shows_path,
        slug
    )
}

/// YouTube watch URL when a video id exists, else the episode page.
pub fn youtube_url(episode: &Episode, config: &ChannelConfig) -> String {
    match episode.youtube_id() {
        Some(id) => format!("https://youtu.be/{}", id),
        None => show_url(episode, config),
    }
}

/// `DJ: https://instagram.com/handle` lines for each host.
pub fn instagram_lines(hosts: &[String], config: &ChannelConfig) -> Vec<String> {
    hosts
        .iter()
        .map(|dj| format!("{}: https://instagram.com/{}", dj, config.instagram_handle(dj)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_tracklist_omits_absent_pieces() {
        let tracklist = [
            json!({"title": "Jazzy", "artist": "Willie Colón", "year": 1973, "album": "El Juicio"}),
            json!({"title": "Solo Title"}),
            json!({"artist": "Credit Only"}),
            json!({"album": "Album Only"}),
            json!({}),
        ];
        let block = format_tracklist(&tracklist);
        assert_eq!(
            block,
            "- Willie Colón – Jazzy (1973) — El Juicio\n- Solo Title\n- — Album Only"
        );
    }

    #[test]
    fn test_format_tracklist_empty_fallback() {
        assert_eq!(format_tracklist(&[]), "(none)");
        assert_eq!(format_tracklist(&[json!({"notes": "x"})]), "(none)");
    }

    #[test]
    fn test_year_span_mixed_sources() {
        let tracklist = [
            json!({"year": 1975}),
            json!({"year": "1980"}),
            json!({"year": 1975}),
        ];
        assert_eq!(year_span(&tracklist), "1975–1980");
        assert_eq!(year_span(&[]), "(unknown)");
        assert_eq!(year_span(&[json!({"year": 1999})]), "1999");
        assert_eq!(
            year_span(&[json!({"year": 2001}), json!({"year": "2001"})]),
            "2001"
        );
    }

    #[test]
    fn test_notable_artists_split_and_dedupe() {
        let tracklist = [
            json!({"artist": "Tito Puente / Cal Tjader, Machito"}),
            json!({"artist": "Tito Puente"}),
            json!({"artist": "Eddie Palmieri"}),
        ];
        assert_eq!(
            notable_artists(&tracklist, 8),
            vec!["Tito Puente", "Cal Tjader", "Machito", "Eddie Palmieri"]
        );
    }

    #[test]
    fn test_notable_artists_limit() {
        let tracklist = [json!({"artist": "A, B, C, D"})];
        assert_eq!(notable_artists(&tracklist, 2), vec!["A", "B"]);
    }

    #[test]
    fn test_hashtags_normalized_and_capped() {
        let episode = Episode::from_value(json!({
            "tags": ["Latin Jazz", "salsa"],
            "styles": "Boogaloo, latin jazz",
            "tracklist": [{"artist": "Tito Puente"}]
        }));
        let tags = hashtags(&episode, 12);
        assert_eq!(tags, vec!["#latinjazz", "#salsa", "#boogaloo", "#tito"]);

        let capped = hashtags(&episode, 2);
        assert_eq!(capped, vec!["#latinjazz", "#salsa"]);
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("  Noche de Salsa!  Vol. 3 "), "noche-de-salsa-vol-3");
        assert_eq!(slugify("under_score  mix"), "under-score-mix");
        assert_eq!(slugify("!!!"), "episode");
    }

    #[test]
    fn test_show_and_youtube_urls() {
        let config = ChannelConfig::default();
        let episode = Episode::from_value(json!({"title": "Night Session", "youtubeId": "abc"}));
        assert_eq!(
            show_url(&episode, &config),
            "https://publicvinylradio.com/shows/night-session/"
        );
        assert_eq!(youtube_url(&episode, &config), "https://youtu.be/abc");

        let no_video = Episode::from_value(json!({"slug": "set-12"}));
        assert_eq!(
            youtube_url(&no_video, &config),
            "https://publicvinylradio.com/shows/set-12/"
        );
    }

    #[test]
    fn test_instagram_lines_use_config_map() {
        let config = ChannelConfig::default();
        let hosts = vec!["Saegey".to_string(), "New Guest".to_string()];
        assert_eq!(
            instagram_lines(&hosts, &config),
            vec![
                "Saegey: https://instagram.com/saegey",
                "New Guest: https://instagram.com/newguest"
            ]
        );
    }
}
