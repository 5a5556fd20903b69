//! Episode metadata accessors.

use serde_json::{Map, Value};

use crate::config::ChannelConfig;
use crate::models::track::TrackRecord;

/// One episode's metadata: scalar fields plus an ordered `tracklist`.
///
/// Built from JSON or parsed frontmatter; every accessor is best-effort and
/// never fails on absent or oddly-typed fields.
#[derive(Debug, Clone, Default)]
pub struct Episode {
    map: Map<String, Value>,
}

impl Episode {
    /// Wrap a parsed mapping. Non-mapping values become an empty episode.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self { map },
            _ => Self::default(),
        }
    }

    /// The underlying mapping.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.map
    }

    /// Raw field access.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.map.get(key)
    }

    /// True when no fields were loaded at all.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Episode title, trimmed; empty when absent.
    pub fn title(&self) -> String {
        match self.map.get("title") {
            Some(Value::String(s)) => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        }
    }

    /// Explicit slug, if any.
    pub fn slug(&self) -> Option<String> {
        match self.map.get("slug") {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
            _ => None,
        }
    }

    /// Host display names from `host` or `hosts`; accepts a list or a
    /// comma-separated string.
    pub fn hosts(&self) -> Vec<String> {
        let raw = self.map.get("host").or_else(|| self.map.get("hosts"));
        match raw {
            Some(Value::String(s)) => split_comma_list(s),
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|v| v.as_str())
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// YouTube video id from `youtubeId`, `youtube_id`, or `youtube`.
    pub fn youtube_id(&self) -> Option<String> {
        for key in ["youtubeId", "youtube_id", "youtube"] {
            if let Some(Value::String(s)) = self.map.get(key) {
                let s = s.trim();
                if !s.is_empty() {
                    return Some(s.to_string());
                }
            }
        }
        None
    }

    /// First non-empty of `tags`/`styles`/`genres` (list or comma string),
    /// else the configured default styles.
    pub fn styles(&self, config: &ChannelConfig) -> Vec<String> {
        for key in ["tags", "styles", "genres"] {
            match self.map.get(key) {
                Some(Value::Array(items)) if !items.is_empty() => {
                    let picked: Vec<String> = items
                        .iter()
                        .filter_map(|v| v.as_str())
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect();
                    if !picked.is_empty() {
                        return picked;
                    }
                }
                Some(Value::String(s)) if !s.trim().is_empty() => {
                    return split_comma_list(s);
                }
                _ => {}
            }
        }
        config.default_styles.clone()
    }

    /// Ordered tracklist entries; empty when absent or not a list.
    pub fn tracklist(&self) -> &[Value] {
        match self.map.get("tracklist") {
            Some(Value::Array(items)) => items,
            _ => &[],
        }
    }

    /// Tracklist entries that are mappings, wrapped for field access.
    pub fn tracks(&self) -> impl Iterator<Item = TrackRecord<'_>> {
        self.tracklist().iter().filter_map(TrackRecord::from_value)
    }
}

fn split_comma_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}
