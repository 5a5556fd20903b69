//! Field selection for track exports.
//!
//! Takes whatever JSON shape a track dump arrives in (a list of records, a
//! `tracks`-bearing object, or a single record) and reduces each record to an
//! ordered row of selected fields.

use serde_json::{Map, Value};
use tracing::debug;

/// Default expanded field set, used when no `--fields` list is given.
pub const DEFAULT_FIELDS: &[&str] = &[
    // core
    "title",
    "artist",
    "album",
    "year",
    // context / curation
    "local_tags",
    "notes",
    // timing / key / bpm
    "duration",
    "duration_seconds",
    "key",
    "bpm",
    // positions / ids
    "track_id",
    "position",
    "id",
    // links / art
    "soundcloud_url",
    "discogs_url",
    "apple_music_url",
    "spotify_url",
    "youtube_url",
    "album_thumbnail",
    // misc
    "apple_music_persistent_id",
    "local_audio_url",
    "star_rating",
    "username",
    // collections (kept compact)
    "styles",
    "genres",
];

/// Keys never auto-included by `--all-fields` (huge embedding vectors).
pub const BLACKLIST_KEYS: &[&str] = &["embedding"];

/// How the caller wants fields chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSelection {
    /// Explicit ordered list from `--fields`.
    Explicit(Vec<String>),
    /// The hand-curated [`DEFAULT_FIELDS`] list.
    Default,
    /// Union of all keys observed across records, minus the blacklist.
    All,
}

/// Track-like record mappings from a JSON document.
///
/// Accepts a list of mappings, a mapping with a `tracks` list, or a single
/// mapping. Non-mapping list items are skipped.
pub fn iter_records(data: &Value) -> Vec<&Map<String, Value>> {
    match data {
        Value::Array(items) => items.iter().filter_map(|v| v.as_object()).collect(),
        Value::Object(map) => {
            if let Some(Value::Array(tracks)) = map.get("tracks") {
                tracks.iter().filter_map(|v| v.as_object()).collect()
            } else {
                vec![map]
            }
        }
        _ => Vec::new(),
    }
}

/// Resolve a [`FieldSelection`] against the loaded records.
///
/// For [`FieldSelection::All`], observed keys come out with the default
/// list's members first (in default order) then the remainder sorted.
pub fn resolve_fields(selection: &FieldSelection, records: &[&Map<String, Value>]) -> Vec<String> {
    match selection {
        FieldSelection::Explicit(fields) => fields.clone(),
        FieldSelection::Default => DEFAULT_FIELDS.iter().map(|f| f.to_string()).collect(),
        FieldSelection::All => all_fields_from_records(records),
    }
}

fn all_fields_from_records(records: &[&Map<String, Value>]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for record in records {
        for key in record.keys() {
            if BLACKLIST_KEYS.contains(&key.as_str()) {
                continue;
            }
            if !seen.contains(key) {
                seen.push(key.clone());
            }
        }
    }

    let mut ordered: Vec<String> = DEFAULT_FIELDS
        .iter()
        .filter(|f| seen.iter().any(|k| k == *f))
        .map(|f| f.to_string())
        .collect();
    let mut rest: Vec<String> = seen
        .into_iter()
        .filter(|k| !ordered.contains(k))
        .collect();
    rest.sort();
    ordered.extend(rest);
    debug!(fields = ordered.len(), "inferred field list from records");
    ordered
}

/// Restrict a record to `fields`, in order.
///
/// Absent and null values become empty strings so flat formats stay
/// rectangular; lists and mappings pass through for the writer to handle.
pub fn extract_row(record: &Map<String, Value>, fields: &[String]) -> Map<String, Value> {
    let mut row = Map::with_capacity(fields.len());
    for field in fields {
        let value = match record.get(field) {
            None | Some(Value::Null) => Value::String(String::new()),
            Some(v) => v.clone(),
        };
        row.insert(field.clone(), value);
    }
    row
}

/// Parse a `--fields` argument: comma-separated, blanks dropped.
pub fn parse_fields_arg(arg: &str) -> Vec<String> {
    arg.split(',')
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
        .collect()
}
