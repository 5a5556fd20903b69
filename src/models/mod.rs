//! Data model wrappers.
//!
//! Episode and track data arrive as free-form JSON/frontmatter mappings with
//! no required fields, so the models here are thin accessor layers over
//! [`serde_json::Value`] rather than fixed structs.

pub mod episode;
pub mod track;

pub use episode::Episode;
pub use track::TrackRecord;
