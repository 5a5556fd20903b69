//! Channel configuration.
//!
//! The prompt and summary builders used to read module-level constants;
//! everything channel-specific now lives in an explicit [`ChannelConfig`]
//! passed into them, so tests and multi-channel use don't fight global state.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Channel-wide settings consumed by the summary and prompt builders.
///
/// [`ChannelConfig::default`] carries the Public Vinyl Radio values; a JSON
/// file with any subset of these fields can override them.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    /// Display name of the channel.
    pub channel_name: String,

    /// Base URL of the channel website (no trailing slash required).
    pub site_base: String,

    /// Path under the site where episode pages live.
    pub shows_path: String,

    /// Channel Mixcloud URL.
    pub mixcloud_url: String,

    /// Channel Instagram URL.
    pub channel_instagram: String,

    /// DJ display name -> Instagram handle (no leading `@`).
    ///
    /// Hosts missing from the map fall back to their name, lowercased with
    /// spaces removed.
    pub instagram_handles: BTreeMap<String, String>,

    /// Styles assumed when an episode lists no tags/styles/genres.
    pub default_styles: Vec<String>,

    /// Cap on the notable-artist list.
    pub notable_artist_limit: usize,

    /// Cap on the generated hashtag list.
    pub hashtag_limit: usize,

    /// Include per-host "Follow <DJ> on Instagram" blocks in the YouTube
    /// description prompt.
    pub host_instagram_lines: bool,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        let mut handles = BTreeMap::new();
        handles.insert("Saegey".to_string(), "saegey".to_string());
        handles.insert("TOPYEN".to_string(), "starlustre".to_string());

        Self {
            channel_name: "Public Vinyl Radio".to_string(),
            site_base: "https://publicvinylradio.com".to_string(),
            shows_path: "/shows".to_string(),
            mixcloud_url: "https://mixcloud.com/public-vinyl-radio".to_string(),
            channel_instagram: "https://instagram.com/publicvinylradio".to_string(),
            instagram_handles: handles,
            default_styles: ["Latin jazz", "salsa", "mambo", "bolero", "cumbia"]
                .into_iter()
                .map(String::from)
                .collect(),
            notable_artist_limit: 8,
            hashtag_limit: 12,
            host_instagram_lines: true,
        }
    }
}

impl ChannelConfig {
    /// Load overrides from a JSON file; absent fields keep their defaults.
    pub fn load(path: &std::path::Path) -> crate::error::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Instagram handle for a host, falling back to a lowercased,
    /// space-stripped version of the display name.
    pub fn instagram_handle(&self, host: &str) -> String {
        self.instagram_handles
            .get(host)
            .cloned()
            .unwrap_or_else(|| host.replace(' ', "").to_lowercase())
    }
}
