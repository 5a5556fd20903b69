//! Frontmatter loading and parsing.
//!
//! Episode pages are Markdown/MDX files opening with a `---` fence around a
//! YAML block; standalone `.yml`/`.yaml` files hold the same data without the
//! fence. [`load`] detects which case applies and hands the text to a
//! recursive parser for the YAML subset frontmatter actually uses: nested
//! block mappings and sequences, quoted and plain scalars, comments.
//!
//! [`parse_flat`] is the degraded mode for strictly flat `key: scalar` /
//! `key:` + `- item` data. It refuses files with a nested `tracklist:` block
//! rather than silently dropping the records.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde_json::{Map, Number, Value};
use tracing::debug;

use crate::error::{Result, VinylError};

/// Load episode metadata from a Markdown/MDX file with a frontmatter fence
/// or from a standalone YAML file.
///
/// Files with neither a fence nor a YAML extension yield an empty mapping.
pub fn load(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            VinylError::InputNotFound(path.display().to_string())
        } else {
            VinylError::IoError(e)
        }
    })?;

    if let Some(raw) = fenced_block(&text) {
        return parse(raw);
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    if matches!(ext.as_deref(), Some("yml") | Some("yaml")) {
        return parse(&text);
    }

    debug!(path = %path.display(), "no frontmatter fence and not a YAML file");
    Ok(Value::Object(Map::new()))
}

/// Extract the interior of a leading `---` fence.
///
/// An unclosed fence is tolerated: everything after the opening line is
/// treated as the block.
fn fenced_block(text: &str) -> Option<&str> {
    let (first, rest) = text.split_once('\n')?;
    if first.trim_end() != "---" {
        return None;
    }

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Some(&rest[..offset]);
        }
        offset += line.len();
    }
    // handle a closing fence with no trailing newline
    if rest[offset..].trim_end() == "---" {
        return Some(&rest[..offset]);
    }
    Some(rest)
}

/// Parse a frontmatter block into a JSON mapping.
pub fn parse(source: &str) -> Result<Value> {
    let lines = scan_lines(source);
    if lines.is_empty() {
        return Ok(Value::Object(Map::new()));
    }

    let mut parser = Parser { lines, pos: 0 };
    let root_indent = parser.lines[0].indent;
    let value = parser.parse_block(root_indent)?;
    if let Some(line) = parser.peek() {
        return Err(VinylError::Frontmatter(format!(
            "unexpected content at line {}",
            line.number
        )));
    }
    match value {
        Value::Object(_) => Ok(value),
        _ => Err(VinylError::Frontmatter(
            "frontmatter root must be a mapping".to_string(),
        )),
    }
}

/// Degraded parser for strictly flat data: `key: scalar` lines and
/// `key:` followed by `- item` scalar lists. All values stay strings.
///
/// Errors out when a `tracklist:` key introduces nested records; flattening
/// those would silently truncate the tracklist.
pub fn parse_flat(source: &str) -> Result<Value> {
    for line in source.lines() {
        if line.trim_end() == "tracklist:" {
            return Err(VinylError::NestedFrontmatter);
        }
    }

    let mut data = Map::new();
    let mut current: Option<String> = None;
    for line in source.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let trimmed = line.trim_start();
        if let Some(item) = trimmed.strip_prefix('-') {
            if let Some(key) = &current {
                let item = strip_matching_quotes(item.trim());
                if !matches!(data.get(key.as_str()), Some(Value::Array(_))) {
                    data.insert(key.clone(), Value::Array(Vec::new()));
                }
                if let Some(Value::Array(list)) = data.get_mut(key.as_str()) {
                    list.push(Value::String(item.to_string()));
                }
                continue;
            }
        }
        if let Some((k, v)) = trimmed.split_once(':') {
            let key = k.trim().to_string();
            let value = strip_matching_quotes(v.trim());
            current = Some(key.clone());
            if value.is_empty() {
                data.insert(key, Value::Array(Vec::new()));
            } else {
                data.insert(key, Value::String(value.to_string()));
            }
        }
    }
    Ok(Value::Object(data))
}

fn strip_matching_quotes(s: &str) -> &str {
    let bytes = s.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return &s[1..s.len() - 1];
        }
    }
    s
}

/// One significant source line.
#[derive(Debug, Clone)]
struct Line {
    indent: usize,
    text: String,
    number: usize,
}

/// Split into significant lines, dropping blanks and comment-only lines.
fn scan_lines(source: &str) -> Vec<Line> {
    let mut lines = Vec::new();
    for (idx, raw) in source.lines().enumerate() {
        let text = raw.trim_end();
        let stripped = text.trim_start_matches(' ');
        if stripped.is_empty() || stripped.starts_with('#') {
            continue;
        }
        lines.push(Line {
            indent: text.len() - stripped.len(),
            text: stripped.to_string(),
            number: idx + 1,
        });
    }
    lines
}

struct Parser {
    lines: Vec<Line>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Line> {
        self.lines.get(self.pos)
    }

    /// Parse the block starting at the current line, which must sit at
    /// `indent`. A leading `-` means a sequence, otherwise a mapping.
    fn parse_block(&mut self, indent: usize) -> Result<Value> {
        match self.peek() {
            Some(line) if is_sequence_item(&line.text) => self.parse_sequence(indent),
            Some(_) => self.parse_mapping(indent),
            None => Ok(Value::Null),
        }
    }

    fn parse_mapping(&mut self, indent: usize) -> Result<Value> {
        let mut map = Map::new();
        while let Some(line) = self.peek() {
            if line.indent < indent {
                break;
            }
            if line.indent > indent {
                return Err(VinylError::Frontmatter(format!(
                    "unexpected indentation at line {}",
                    line.number
                )));
            }
            if is_sequence_item(&line.text) {
                return Err(VinylError::Frontmatter(format!(
                    "unexpected sequence item at line {}",
                    line.number
                )));
            }
            let number = line.number;
            let (key, rest) = split_key(&line.text).ok_or_else(|| {
                VinylError::Frontmatter(format!("expected `key: value` at line {}", number))
            })?;
            let key = strip_matching_quotes(&key).to_string();
            self.pos += 1;

            let value = if rest.is_empty() {
                self.parse_nested(indent)?
            } else {
                scalar_or_empty_flow(&rest)
            };
            map.insert(key, value);
        }
        Ok(Value::Object(map))
    }

    fn parse_sequence(&mut self, indent: usize) -> Result<Value> {
        let mut items = Vec::new();
        while let Some(line) = self.peek() {
            if line.indent != indent || !is_sequence_item(&line.text) {
                break;
            }
            let rest = line.text[1..].trim_start().to_string();
            if rest.is_empty() {
                self.pos += 1;
                items.push(self.parse_nested(indent)?);
            } else if split_key(&rest).is_some() {
                // `- key: value` opens a mapping; re-anchor the line at the
                // rest's column so the following entries line up with it.
                let item_indent = line.indent + (line.text.len() - rest.len());
                let number = line.number;
                self.lines[self.pos] = Line {
                    indent: item_indent,
                    text: rest,
                    number,
                };
                items.push(self.parse_mapping(item_indent)?);
            } else {
                items.push(scalar_or_empty_flow(&rest));
                self.pos += 1;
            }
        }
        Ok(Value::Array(items))
    }

    /// Value introduced by a trailing `:` or bare `-`: a deeper-indented
    /// block, or null when nothing follows.
    fn parse_nested(&mut self, indent: usize) -> Result<Value> {
        match self.peek() {
            Some(line) if line.indent > indent => {
                let nested = line.indent;
                self.parse_block(nested)
            }
            _ => Ok(Value::Null),
        }
    }
}

fn is_sequence_item(text: &str) -> bool {
    text == "-" || text.starts_with("- ")
}

/// Split `key: rest` at the first unquoted colon followed by a space or end
/// of line. Returns `None` when the text is not a mapping entry (so `3:05`
/// stays a scalar).
fn split_key(text: &str) -> Option<(String, String)> {
    let mut in_single = false;
    let mut in_double = false;
    let mut escaped = false;
    let chars: Vec<char> = text.chars().collect();
    for (i, &c) in chars.iter().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_double => escaped = true,
            '\'' if !in_double => in_single = !in_single,
            '"' if !in_single => in_double = !in_double,
            ':' if !in_single && !in_double => {
                let at_end = i + 1 == chars.len();
                if at_end || chars[i + 1] == ' ' {
                    let key: String = chars[..i].iter().collect();
                    let rest: String = if at_end {
                        String::new()
                    } else {
                        chars[i + 1..].iter().collect::<String>().trim().to_string()
                    };
                    return Some((key.trim().to_string(), rest));
                }
            }
            _ => {}
        }
    }
    None
}

fn scalar_or_empty_flow(text: &str) -> Value {
    match text {
        "[]" => Value::Array(Vec::new()),
        "{}" => Value::Object(Map::new()),
        _ => scalar(text),
    }
}

/// Coerce a scalar token: quoted strings keep their text, plain tokens try
/// null/bool/int/float before falling back to a string.
fn scalar(text: &str) -> Value {
    if let Some(inner) = text.strip_prefix('"') {
        return Value::String(unescape_double(inner.strip_suffix('"').unwrap_or(inner)));
    }
    if let Some(inner) = text.strip_prefix('\'') {
        let inner = inner.strip_suffix('\'').unwrap_or(inner);
        return Value::String(inner.replace("''", "'"));
    }

    // plain scalar; a ` #` starts a trailing comment
    let text = match text.find(" #") {
        Some(idx) => text[..idx].trim_end(),
        None => text,
    };

    match text {
        "" | "~" | "null" | "Null" | "NULL" => return Value::Null,
        "true" | "True" => return Value::Bool(true),
        "false" | "False" => return Value::Bool(false),
        _ => {}
    }
    if let Ok(i) = text.parse::<i64>() {
        return Value::Number(i.into());
    }
    if looks_like_float(text) {
        if let Ok(f) = text.parse::<f64>() {
            if let Some(n) = Number::from_f64(f) {
                return Value::Number(n);
            }
        }
    }
    Value::String(text.to_string())
}

fn looks_like_float(text: &str) -> bool {
    let body = text.strip_prefix('-').unwrap_or(text);
    !body.is_empty()
        && body.chars().all(|c| c.is_ascii_digit() || c == '.')
        && body.chars().filter(|&c| c == '.').count() == 1
}

fn unescape_double(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_flat_scalars_and_lists() {
        let doc = "title: My Episode\nslug: my-episode\ntags:\n  - salsa\n  - 'mambo'\n";
        let parsed = parse_flat(doc).unwrap();
        assert_eq!(
            parsed,
            json!({
                "title": "My Episode",
                "slug": "my-episode",
                "tags": ["salsa", "mambo"]
            })
        );
    }

    #[test]
    fn test_parse_flat_rejects_nested_tracklist() {
        let doc = "title: x\ntracklist:\n  - title: A\n    artist: B\n";
        assert!(matches!(
            parse_flat(doc),
            Err(VinylError::NestedFrontmatter)
        ));
    }

    #[test]
    fn test_parse_nested_tracklist() {
        let doc = "\
title: \"Night Session\"
episode: 12
tags:
  - Latin jazz
  - salsa
tracklist:
  - title: Jazzy
    artist: Willie Colón
    year: 1973
    duration_seconds: 312
  - title: \"Mambo: Reloaded\"
    artist: Machito
";
        let parsed = parse(doc).unwrap();
        assert_eq!(parsed["title"], "Night Session");
        assert_eq!(parsed["episode"], 12);
        assert_eq!(parsed["tags"], json!(["Latin jazz", "salsa"]));
        let tracklist = parsed["tracklist"].as_array().unwrap();
        assert_eq!(tracklist.len(), 2);
        assert_eq!(tracklist[0]["artist"], "Willie Colón");
        assert_eq!(tracklist[0]["duration_seconds"], 312);
        assert_eq!(tracklist[1]["title"], "Mambo: Reloaded");
    }

    #[test]
    fn test_parse_scalar_coercion() {
        let doc = "a: true\nb: null\nc: 3.5\nd: 3:05\ne: ~\nf: []\n";
        let parsed = parse(doc).unwrap();
        assert_eq!(parsed["a"], json!(true));
        assert_eq!(parsed["b"], json!(null));
        assert_eq!(parsed["c"], json!(3.5));
        assert_eq!(parsed["d"], json!("3:05"));
        assert_eq!(parsed["e"], json!(null));
        assert_eq!(parsed["f"], json!([]));
    }

    #[test]
    fn test_parse_trailing_comment_and_blank_lines() {
        let doc = "# header comment\ntitle: Hello # not part of the title\n\nyear: 1999\n";
        let parsed = parse(doc).unwrap();
        assert_eq!(parsed["title"], "Hello");
        assert_eq!(parsed["year"], 1999);
    }

    #[test]
    fn test_parse_preserves_key_order() {
        let doc = "zebra: 1\napple: 2\nmiddle: 3\n";
        let parsed = parse(doc).unwrap();
        let keys: Vec<&String> = parsed.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["zebra", "apple", "middle"]);
    }

    #[test]
    fn test_parse_nested_sequence_in_track() {
        let doc = "\
tracklist:
  - title: A
    styles:
      - salsa
      - mambo
";
        let parsed = parse(doc).unwrap();
        assert_eq!(
            parsed["tracklist"][0]["styles"],
            json!(["salsa", "mambo"])
        );
    }

    #[test]
    fn test_load_fenced_mdx() {
        let mut file = NamedTempFile::with_suffix(".mdx").unwrap();
        write!(
            file,
            "---\ntitle: Fenced\ntracklist:\n  - title: A\n---\n\n# Body text\n"
        )
        .unwrap();
        let loaded = load(file.path()).unwrap();
        assert_eq!(loaded["title"], "Fenced");
        assert_eq!(loaded["tracklist"][0]["title"], "A");
    }

    #[test]
    fn test_load_unclosed_fence_reads_to_eof() {
        let mut file = NamedTempFile::with_suffix(".mdx").unwrap();
        write!(file, "---\ntitle: Unclosed\nyear: 2001\n").unwrap();
        let loaded = load(file.path()).unwrap();
        assert_eq!(loaded["title"], "Unclosed");
        assert_eq!(loaded["year"], 2001);
    }

    #[test]
    fn test_load_pure_yaml_file() {
        let mut file = NamedTempFile::with_suffix(".yml").unwrap();
        write!(file, "title: Pure YAML\n").unwrap();
        let loaded = load(file.path()).unwrap();
        assert_eq!(loaded["title"], "Pure YAML");
    }

    #[test]
    fn test_load_plain_file_yields_empty_mapping() {
        let mut file = NamedTempFile::with_suffix(".md").unwrap();
        write!(file, "# Just a heading\n\nBody.\n").unwrap();
        let loaded = load(file.path()).unwrap();
        assert_eq!(loaded, json!({}));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load(Path::new("/nonexistent/episode.mdx")).unwrap_err();
        assert!(matches!(err, VinylError::InputNotFound(_)));
    }

    #[test]
    fn test_parse_root_must_be_mapping() {
        assert!(parse("- a\n- b\n").is_err());
    }
}
