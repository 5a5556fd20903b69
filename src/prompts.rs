//! LLM prompt and caption templates.
//!
//! Fixed text templates with episode data substituted in. The output is
//! meant to be pasted into an LLM (or, for the caption, posted directly);
//! nothing downstream parses it.

use std::collections::HashSet;

use serde_json::Value;

use crate::config::ChannelConfig;
use crate::models::{Episode, TrackRecord};
use crate::summary;

/// Keys stripped from episode JSON before it is injected into the blog
/// prompt, case-insensitively and at any depth.
pub const DEFAULT_DROP_FIELDS: &[&str] = &[
    "embedding",
    "embeddings",
    "vector",
    "vectors",
    "audio_embedding",
    "ml",
    "ai_meta",
    "openai_meta",
    "_meta",
    "_internal",
];

const BLOG_TEMPLATE: &str = r#"You are generating a new blog post in my standard YAML + markdown format for {CHANNEL_NAME}.

### INPUT DATA
Episode JSON:
{EPISODE_JSON}

### OUTPUT FORMAT
1) Start with YAML front matter (between `---`), including:
   - title
   - description
   - episode
   - date
   - tags
   - slug
   - coverImage
   - host
   - youtubeId
   - template
   - tracklist (array of objects with title and artist, same order as input)

2) After the YAML, write:
   - H1 with the episode title
   - 1–2 paragraphs expanding the description (vibe, styles, atmosphere, notable transitions)
   - <ResponsiveYouTube videoId={"<YOUTUBE ID>"} />
   - "Tracklist Deep Dive" section
   - For each track, in order:
     - **<Artist> – <Title>**
       1–2 sentence commentary (texture, groove, instrumentation, energy/mood shift)
   - End with a short wrap-up line.

3) Style:
   - Warm, descriptive, music-focused; concise but vivid.
   - Avoid inventing artists/tracks. Use exactly what's in the input.
   - Keep commentary specific (mention textures/grooves/mood shifts/instrumental details).

4) Do NOT include any extra boilerplate besides the YAML front matter and the markdown body.

Return ONLY the YAML front matter and markdown body (no explanations).
"#;

/// Recursively remove keys (case-insensitive) anywhere in the structure.
pub fn strip_fields(value: &Value, drop: &HashSet<String>) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(k, _)| !drop.contains(&k.to_lowercase()))
                .map(|(k, v)| (k.clone(), strip_fields(v, drop)))
                .collect(),
        ),
        Value::Array(items) => {
            Value::Array(items.iter().map(|v| strip_fields(v, drop)).collect())
        }
        other => other.clone(),
    }
}

/// Build the drop set: defaults plus caller extras, lowercased.
pub fn drop_set(extra: &[String]) -> HashSet<String> {
    DEFAULT_DROP_FIELDS
        .iter()
        .map(|k| k.to_string())
        .chain(extra.iter().map(|k| k.to_lowercase()))
        .collect()
}

/// Blog-post prompt: the fixed template with stripped episode JSON injected.
pub fn blog_prompt(
    data: &Value,
    drop: &HashSet<String>,
    pretty: bool,
    config: &ChannelConfig,
) -> serde_json::Result<String> {
    let cleaned = strip_fields(data, drop);
    let json_text = if pretty {
        serde_json::to_string_pretty(&cleaned)?
    } else {
        serde_json::to_string(&cleaned)?
    };
    Ok(BLOG_TEMPLATE
        .replace("{CHANNEL_NAME}", &config.channel_name)
        .replace("{EPISODE_JSON}", &json_text))
}

fn title_or_untitled(episode: &Episode) -> String {
    let title = episode.title();
    if title.is_empty() {
        "Untitled Set".to_string()
    } else {
        title
    }
}

/// YouTube title + description prompt.
///
/// Per-host Instagram follow blocks are included only when
/// [`ChannelConfig::host_instagram_lines`] is set; the two historical
/// generator variants differed in exactly that line.
pub fn youtube_prompt(episode: &Episode, config: &ChannelConfig) -> String {
    let title = title_or_untitled(episode);
    let show_url = summary::show_url(episode, config);
    let styles = episode.styles(config).join(", ");
    let hosts = episode.hosts();

    let tracklist_block = summary::format_tracklist(episode.tracklist());
    let year_span = summary::year_span(episode.tracklist());
    let notable = summary::notable_artists(episode.tracklist(), config.notable_artist_limit);
    let notable_artists = if notable.is_empty() {
        "(none)".to_string()
    } else {
        notable.join(", ")
    };

    let ig_info = if hosts.is_empty() {
        format!("Channel IG: {}", config.channel_instagram)
    } else {
        summary::instagram_lines(&hosts, config).join("\n")
    };

    let hosts_line = if hosts.is_empty() {
        "(none listed)".to_string()
    } else {
        hosts.join(", ")
    };

    let mut host_blocks = String::new();
    if config.host_instagram_lines {
        for dj in &hosts {
            host_blocks.push_str(&format!(
                "  🎛️ Follow {} on Instagram:\n  https://instagram.com/{}\n\n",
                dj,
                config.instagram_handle(dj)
            ));
        }
    }

    format!(
        r#"You are an expert YouTube copywriter for a vinyl DJ channel called "{channel}".
Write a compelling YouTube TITLE and DESCRIPTION for a DJ vinyl-mix video, using the data below.

# Content Data
- Post Title: {title}
- Show URL: {show_url}
- Channel: {channel}
- Channel IG: {channel_ig}
- Mixcloud: {mixcloud}
- Hosts (DJ names): {hosts_line}
- Host Instagram mapping (use if present; otherwise omit a host line):
{ig_info}
- Styles/Tags (prioritize for SEO + vibe): {styles}
- Tracklist (use to infer era/regions/subgenres; do not invent):
{tracklist_block}
- Year span from tracklist: {year_span}
- Notable artists: {notable_artists}

# Title Requirements
- 70–100 characters when possible.
- Include "All-Vinyl" (or "100% Vinyl") and 1–2 key styles (e.g., "Latin Jazz, Salsa").
- Append "| {channel}".
- No clickbait or ALL CAPS; polished and musical.
- When natural, include a region or era cue inferred from the tracklist (e.g., "West Africa", "70s Highlife").

# Description Requirements
- Open with a refined, mood-forward paragraph (sophisticated but rhythmic); mention that it's all-vinyl and explicitly name the host(s) in the opening sentence.
- Include these link blocks (exact labels):
  🔗 Learn more about this episode, full tracklist, and {channel}:
  {show_url}

  📸 Follow us on Instagram:
  {channel_ig}

{host_blocks}  📻 Stream more vinyl sessions on Mixcloud:
  {mixcloud}

- Add a short "Featured styles" line using {styles} plus any clear styles you infer from the tracklist; end with "All vinyl."
- Include a brief, professional copyright notice.
- Finish with 8–12 relevant hashtags (mix of general and style-specific; no duplicates).

# Tone & SEO
- Sophisticated, musical, and cinematic; no hype spam.
- Naturally include 2–3 primary styles in the body copy.
- Avoid repeating the title verbatim in the first line of the description.

# Constraints
- Do not fabricate tracks, artists, or years. Use only what's listed in the tracklist.

# Output Format (MUST follow exactly)
TITLE:
<one line title>

DESCRIPTION:
<multi-line description, including the blocks and hashtags>
"#,
        channel = config.channel_name,
        title = title,
        show_url = show_url,
        channel_ig = config.channel_instagram,
        mixcloud = config.mixcloud_url,
        hosts_line = hosts_line,
        ig_info = ig_info,
        styles = styles,
        tracklist_block = tracklist_block,
        year_span = year_span,
        notable_artists = notable_artists,
        host_blocks = host_blocks,
    )
}

/// Prompt for drafting an Instagram caption: an instruction plus a DATA
/// block with the frontmatter summary and a numbered tracklist.
pub fn instagram_prompt(episode: &Episode, config: &ChannelConfig) -> String {
    let title = title_or_untitled(episode);
    let hosts = episode.hosts();
    let styles = episode.styles(config);

    let mut fm_lines = vec![format!("title: {}", title)];
    if !hosts.is_empty() {
        fm_lines.push(format!("hosts: {}", hosts.join(", ")));
    }
    if !styles.is_empty() {
        fm_lines.push(format!("styles: {}", styles.join(", ")));
    }
    if let Some(id) = episode.youtube_id() {
        fm_lines.push(format!("youtube: {}", id));
    }

    let mut tl_lines = Vec::new();
    for (i, track) in episode.tracks().enumerate() {
        let duration = track
            .get("duration_seconds")
            .map(scalar_text)
            .unwrap_or_default();
        tl_lines.push(format!(
            "{}. {} — {} ({}) [{}s]",
            i + 1,
            track.title(),
            track.artist(),
            track.year_text(),
            duration
        ));
    }

    let data_block = format!("{}\n\ntracklist:\n{}", fm_lines.join("\n"), tl_lines.join("\n"));

    let instr = "You are an expert social copywriter for a vinyl DJ channel. \
         Using only the DATA provided, write an Instagram post promoting the YouTube episode. \
         Do not invent tracks or artists. Respect copyright and avoid clickbait.";

    let constraints = "Output Format (MUST FOLLOW EXACTLY):\n\
         CAPTION:\n<A single caption block, 1-4 short paragraphs, <= 2200 characters>\n\n\
         HASHTAGS:\n<A single line of space-separated hashtags, 6-14 tags, each starting with #>\n";

    let guidance = "Tone: musical, warm, slightly poetic; use 1-2 emojis maximum.\n\
         Start the caption by naming the host(s) (DJ names) in the opening sentence.\n\
         Do NOT include clickable URLs in the caption; instead instruct readers that the link is in the bio.\n\
         Prefer style and era cues (e.g., 'Afrobeat, Highlife') in the opening sentence.\n";

    [instr, constraints, guidance, "DATA:", data_block.as_str()].join("\n\n")
}

/// Ready-to-post Instagram caption: hook, brief, "link in bio" call to
/// action, hashtag block.
pub fn instagram_caption(episode: &Episode, config: &ChannelConfig) -> String {
    let title = title_or_untitled(episode);
    let hosts = episode.hosts();
    let styles = episode.styles(config);

    let hook = match styles.first() {
        Some(first) => format!("{} — {}", title, first),
        None => title,
    };
    let brief = if hosts.is_empty() {
        format!("A new episode of {}.", config.channel_name)
    } else {
        format!(
            "A new episode of {} with {}.",
            config.channel_name,
            hosts.join(", ")
        )
    };
    // Instagram strips links from captions, so point readers at the bio
    let cta = "Link in bio.";

    let mut parts = vec![hook, brief, cta.to_string()];
    let tags = summary::hashtags(episode, config.hashtag_limit);
    if !tags.is_empty() {
        parts.push(tags.join(" "));
    }
    parts.join("\n\n")
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn episode(value: Value) -> Episode {
        Episode::from_value(value)
    }

    #[test]
    fn test_strip_fields_recursive_case_insensitive() {
        let data = json!({
            "title": "Set",
            "Embedding": [0.1, 0.2],
            "tracklist": [
                {"title": "A", "AI_META": {"x": 1}},
                {"title": "B", "nested": {"_internal": true, "keep": 1}}
            ]
        });
        let cleaned = strip_fields(&data, &drop_set(&[]));
        assert_eq!(
            cleaned,
            json!({
                "title": "Set",
                "tracklist": [
                    {"title": "A"},
                    {"title": "B", "nested": {"keep": 1}}
                ]
            })
        );
    }

    #[test]
    fn test_drop_set_extras_lowercased() {
        let set = drop_set(&["CoverImage".to_string()]);
        assert!(set.contains("coverimage"));
        assert!(set.contains("embedding"));
    }

    #[test]
    fn test_blog_prompt_injects_json() {
        let config = ChannelConfig::default();
        let data = json!({"title": "Set", "embedding": [1.0]});
        let prompt = blog_prompt(&data, &drop_set(&[]), false, &config).unwrap();
        assert!(prompt.contains(r#"{"title":"Set"}"#));
        assert!(!prompt.contains("embedding"));
        assert!(prompt.contains("Public Vinyl Radio"));

        let pretty = blog_prompt(&data, &drop_set(&[]), true, &config).unwrap();
        assert!(pretty.contains("{\n  \"title\": \"Set\"\n}"));
    }

    #[test]
    fn test_youtube_prompt_substitutions() {
        let config = ChannelConfig::default();
        let ep = episode(json!({
            "title": "Noche de Salsa",
            "host": "Saegey",
            "tags": ["salsa", "mambo"],
            "tracklist": [
                {"title": "A", "artist": "Tito Puente", "year": 1958}
            ]
        }));
        let prompt = youtube_prompt(&ep, &config);
        assert!(prompt.contains("- Post Title: Noche de Salsa"));
        assert!(prompt.contains("https://publicvinylradio.com/shows/noche-de-salsa/"));
        assert!(prompt.contains("Saegey: https://instagram.com/saegey"));
        assert!(prompt.contains("- Tito Puente – A (1958)"));
        assert!(prompt.contains("- Year span from tracklist: 1958"));
        assert!(prompt.contains("🎛️ Follow Saegey on Instagram:"));
    }

    #[test]
    fn test_youtube_prompt_host_lines_toggle() {
        let config = ChannelConfig {
            host_instagram_lines: false,
            ..ChannelConfig::default()
        };
        let ep = episode(json!({"title": "Set", "host": "Saegey"}));
        let prompt = youtube_prompt(&ep, &config);
        assert!(!prompt.contains("🎛️ Follow"));
        // the mapping block for the model is unaffected by the toggle
        assert!(prompt.contains("Saegey: https://instagram.com/saegey"));
    }

    #[test]
    fn test_youtube_prompt_empty_episode_fallbacks() {
        let config = ChannelConfig::default();
        let prompt = youtube_prompt(&episode(json!({})), &config);
        assert!(prompt.contains("- Post Title: Untitled Set"));
        assert!(prompt.contains("- Hosts (DJ names): (none listed)"));
        assert!(prompt.contains("Channel IG: https://instagram.com/publicvinylradio"));
        assert!(prompt.contains("(none)"));
        assert!(prompt.contains("- Year span from tracklist: (unknown)"));
        // default styles stand in for missing tags
        assert!(prompt.contains("Latin jazz, salsa, mambo, bolero, cumbia"));
    }

    #[test]
    fn test_instagram_prompt_data_block() {
        let config = ChannelConfig::default();
        let ep = episode(json!({
            "title": "Set 12",
            "hosts": ["Saegey", "TOPYEN"],
            "youtubeId": "abc",
            "tracklist": [
                {"title": "A", "artist": "X", "year": 1975, "duration_seconds": 300},
                {"title": "B", "artist": "Y"}
            ]
        }));
        let prompt = instagram_prompt(&ep, &config);
        assert!(prompt.contains("title: Set 12"));
        assert!(prompt.contains("hosts: Saegey, TOPYEN"));
        assert!(prompt.contains("youtube: abc"));
        assert!(prompt.contains("1. A — X (1975) [300s]"));
        assert!(prompt.contains("2. B — Y () [s]"));
    }

    #[test]
    fn test_instagram_caption_shape() {
        let config = ChannelConfig::default();
        let ep = episode(json!({
            "title": "Set 12",
            "host": "Saegey",
            "tags": ["salsa"]
        }));
        let caption = instagram_caption(&ep, &config);
        let parts: Vec<&str> = caption.split("\n\n").collect();
        assert_eq!(parts[0], "Set 12 — salsa");
        assert_eq!(parts[1], "A new episode of Public Vinyl Radio with Saegey.");
        assert_eq!(parts[2], "Link in bio.");
        assert_eq!(parts[3], "#salsa");
    }
}
