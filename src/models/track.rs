//! Track record accessors.
//!
//! A track is whatever mapping the source file provides; no field is
//! required. [`TrackRecord`] wraps one such mapping and offers best-effort
//! accessors that degrade to empty/`None` instead of failing.

use serde_json::{Map, Value};

/// Borrow wrapper over a single track mapping.
#[derive(Debug, Clone, Copy)]
pub struct TrackRecord<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> TrackRecord<'a> {
    /// Wrap a JSON value, returning `None` for non-mapping values.
    pub fn from_value(value: &'a Value) -> Option<Self> {
        value.as_object().map(|map| Self { map })
    }

    /// The underlying mapping.
    pub fn as_map(&self) -> &'a Map<String, Value> {
        self.map
    }

    /// Raw field access.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key)
    }

    /// Trimmed string for a scalar field; empty when absent or non-scalar.
    fn scalar_text(&self, key: &str) -> String {
        match self.map.get(key) {
            Some(Value::String(s)) => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => String::new(),
        }
    }

    /// Track title, trimmed; empty when absent.
    pub fn title(&self) -> String {
        self.scalar_text("title")
    }

    /// Artist credit, trimmed; empty when absent.
    pub fn artist(&self) -> String {
        self.scalar_text("artist")
    }

    /// Album title, trimmed; empty when absent.
    pub fn album(&self) -> String {
        self.scalar_text("album")
    }

    /// Release year from an integer or a digits-only string.
    pub fn year(&self) -> Option<i32> {
        match self.map.get("year") {
            Some(Value::Number(n)) => n.as_i64().map(|y| y as i32),
            Some(Value::String(s)) => {
                let s = s.trim();
                if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) {
                    s.parse().ok()
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Year as display text; empty when absent.
    pub fn year_text(&self) -> String {
        self.scalar_text("year")
    }

    /// Duration in whole seconds.
    ///
    /// Accepts an integer, a float (truncated toward zero), or a numeric
    /// string with an optional fractional part. Anything else is `None`;
    /// callers treat that as zero elapsed time.
    pub fn duration_seconds(&self) -> Option<i64> {
        match self.map.get("duration_seconds") {
            Some(Value::Number(n)) => {
                if let Some(i) = n.as_i64() {
                    Some(i)
                } else {
                    n.as_f64().map(|f| f.trunc() as i64)
                }
            }
            Some(Value::String(s)) => parse_duration_string(s),
            _ => None,
        }
    }
}

/// Parse an unsigned decimal string (`"90"`, `"90.7"`) to whole seconds.
fn parse_duration_string(s: &str) -> Option<i64> {
    let s = s.trim();
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (s, None),
    };
    if int_part.is_empty() || !int_part.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if let Some(frac) = frac_part {
        if frac.is_empty() || !frac.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
    }
    int_part.parse().ok()
}
