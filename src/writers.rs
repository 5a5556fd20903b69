//! Row writers: CSV, JSONL, and a minimal YAML emitter.
//!
//! All three preserve field order and row order exactly as selected. The
//! YAML emitter is deliberately small: a root key followed by a block
//! sequence of mappings, strings always double-quoted. No schema validation,
//! no external YAML dependency.

use std::io::Write;

use serde_json::{Map, Value};

use crate::error::Result;

/// Write rows as CSV with a header line.
///
/// List and mapping cells are re-encoded as single-cell JSON text so the
/// table stays rectangular.
pub fn write_csv<W: Write>(out: &mut W, rows: &[Map<String, Value>], fields: &[String]) -> Result<()> {
    let header: Vec<String> = fields.iter().map(|f| csv_escape(f)).collect();
    writeln!(out, "{}", header.join(","))?;

    for row in rows {
        let cells: Vec<String> = fields
            .iter()
            .map(|field| csv_escape(&csv_cell(row.get(field))))
            .collect();
        writeln!(out, "{}", cells.join(","))?;
    }
    Ok(())
}

fn csv_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        // lists/mappings become one JSON-encoded cell
        Some(v @ (Value::Array(_) | Value::Object(_))) => {
            serde_json::to_string(v).unwrap_or_default()
        }
    }
}

/// Minimal quoting: wrap only when the cell contains a comma, quote, or
/// line break; embedded quotes are doubled.
fn csv_escape(cell: &str) -> String {
    if cell.contains(',') || cell.contains('"') || cell.contains('\n') || cell.contains('\r') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

/// Write rows as JSONL: one compact JSON object per line, fields in row
/// order.
pub fn write_jsonl<W: Write>(out: &mut W, rows: &[Map<String, Value>]) -> Result<()> {
    for row in rows {
        let line = serde_json::to_string(&Value::Object(row.clone()))?;
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Write rows as a compact YAML document:
///
/// ```yaml
/// tracklist:
///   -
///     title: "Jazzy"
///     artist: "Willie Colón, Hector Lavoe"
/// ```
pub fn write_yaml<W: Write>(
    out: &mut W,
    rows: &[Map<String, Value>],
    root_key: &str,
) -> Result<()> {
    writeln!(out, "{}:", root_key)?;
    for row in rows {
        write!(out, "  -")?;
        for (key, value) in row {
            write!(out, "\n    {}: {}", key, dump_value(value, 6))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Render one YAML value at the given nesting indent.
///
/// Strings are always double-quoted; null and the empty string both render
/// as `""`; lists and mappings become indented block structures.
fn dump_value(value: &Value, indent: usize) -> String {
    let sp = " ".repeat(indent);
    match value {
        Value::String(s) => yaml_escape(s),
        Value::Bool(b) => b.to_string(),
        Value::Null => "\"\"".to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => {
            if items.is_empty() {
                return "[]".to_string();
            }
            let mut rendered = String::new();
            for item in items {
                match item {
                    Value::Array(_) | Value::Object(_) => {
                        let nested = dump_value(item, indent + 2);
                        rendered.push_str(&format!("\n{}- {}", sp, nested.trim_start()));
                    }
                    _ => {
                        rendered.push_str(&format!("\n{}- {}", sp, dump_value(item, indent + 2)));
                    }
                }
            }
            rendered
        }
        Value::Object(map) => {
            if map.is_empty() {
                return "{}".to_string();
            }
            let mut rendered = String::new();
            for (key, nested) in map {
                rendered.push_str(&format!("\n{}{}: {}", sp, key, dump_value(nested, indent + 2)));
            }
            rendered
        }
    }
}

/// Double-quote a string, escaping backslashes and quotes. Unicode passes
/// through untouched.
fn yaml_escape(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_csv_list_cell_is_json_encoded() {
        let rows = vec![row(json!({"title": "A", "styles": ["jazz", "funk"]}))];
        let mut out = Vec::new();
        write_csv(&mut out, &rows, &fields(&["title", "styles"])).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "title,styles\nA,\"[\"\"jazz\"\",\"\"funk\"\"]\"\n");
    }

    #[test]
    fn test_csv_minimal_quoting() {
        let rows = vec![row(json!({
            "artist": "Willie Colón, Hector Lavoe",
            "notes": "he said \"go\"",
            "year": 1973
        }))];
        let mut out = Vec::new();
        write_csv(&mut out, &rows, &fields(&["artist", "notes", "year"])).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "artist,notes,year\n\"Willie Colón, Hector Lavoe\",\"he said \"\"go\"\"\",1973\n"
        );
    }

    #[test]
    fn test_jsonl_one_object_per_line_in_order() {
        let rows = vec![
            row(json!({"title": "A", "artist": "X"})),
            row(json!({"title": "B", "artist": "Y"})),
        ];
        let mut out = Vec::new();
        write_jsonl(&mut out, &rows).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "{\"title\":\"A\",\"artist\":\"X\"}\n{\"title\":\"B\",\"artist\":\"Y\"}\n"
        );
    }

    #[test]
    fn test_yaml_document_shape() {
        let rows = vec![row(json!({
            "title": "Jazzy",
            "artist": "Willie Colón",
            "year": 1973,
            "live": true,
            "notes": null
        }))];
        let mut out = Vec::new();
        write_yaml(&mut out, &rows, "tracklist").unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "tracklist:\n  -\n    title: \"Jazzy\"\n    artist: \"Willie Colón\"\n    year: 1973\n    live: true\n    notes: \"\"\n"
        );
    }

    #[test]
    fn test_yaml_nested_list_and_empty_containers() {
        let rows = vec![row(json!({
            "styles": ["jazz", "funk"],
            "genres": [],
            "meta": {}
        }))];
        let mut out = Vec::new();
        write_yaml(&mut out, &rows, "tracks").unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "tracks:\n  -\n    styles: \n      - \"jazz\"\n      - \"funk\"\n    genres: []\n    meta: {}\n"
        );
    }

    #[test]
    fn test_yaml_string_escaping() {
        let rows = vec![row(json!({"title": "a \"b\" \\ c"}))];
        let mut out = Vec::new();
        write_yaml(&mut out, &rows, "tracklist").unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "tracklist:\n  -\n    title: \"a \\\"b\\\" \\\\ c\"\n"
        );
    }
}
