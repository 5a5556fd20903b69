//! # vinylpress
//!
//! Library behind a small set of command-line tools that turn JSON-described
//! music-episode metadata (track lists for a vinyl-DJ radio show) into other
//! text formats: CSV/JSONL/YAML exports and LLM prompt templates for blog
//! posts, YouTube descriptions, timestamped comments, and social captions.
//!
//! ## Quick Start
//!
//! ```rust
//! use vinylpress::{ChannelConfig, Episode};
//! use vinylpress::timestamps::build_timestamp_comment;
//! use serde_json::json;
//!
//! let episode = Episode::from_value(json!({
//!     "title": "Noche de Salsa",
//!     "tracklist": [
//!         {"title": "A", "artist": "X", "duration_seconds": 90},
//!         {"title": "B", "artist": "Y"}
//!     ]
//! }));
//!
//! let comment = build_timestamp_comment(episode.tracklist());
//! assert_eq!(comment, "0:00 *A* – X\n1:30 *B* – Y");
//!
//! let config = ChannelConfig::default();
//! let prompt = vinylpress::prompts::youtube_prompt(&episode, &config);
//! assert!(prompt.contains("Noche de Salsa"));
//! ```
//!
//! ## Pipelines
//!
//! Two independent pipelines share only the track/episode models:
//!
//! - **Field extractor** ([`extract`] + [`writers`]): JSON records →
//!   selected-field rows → CSV/JSONL/minimal-YAML.
//! - **Prompt generators** ([`frontmatter`] + [`summary`] + [`timestamps`] +
//!   [`prompts`]): episode metadata → derived summary fields → text
//!   templates.

pub mod config;
pub mod error;
pub mod extract;
pub mod frontmatter;
pub mod models;
pub mod prompts;
pub mod summary;
pub mod timestamps;
pub mod writers;

pub use config::ChannelConfig;
pub use error::{Result, VinylError};
pub use models::{Episode, TrackRecord};
