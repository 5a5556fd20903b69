//! Error types for the episode tools.

use thiserror::Error;

/// Main error type for all vinylpress operations.
#[derive(Debug, Error)]
pub enum VinylError {
    /// Input file does not exist.
    #[error("Input file not found: {0}")]
    InputNotFound(String),

    /// Frontmatter or standalone YAML could not be parsed.
    #[error("Frontmatter parse error: {0}")]
    Frontmatter(String),

    /// Nested structure (a `tracklist:` block) fed to the flat parser.
    ///
    /// This is fatal rather than a downgrade: dropping nested records
    /// would silently truncate the tracklist.
    #[error("Frontmatter contains a nested tracklist; the flat parser cannot represent it")]
    NestedFrontmatter,

    /// A requested derived output (comment, prompt, caption) could not be
    /// built because the data it needs is absent.
    #[error("Missing data: {0}")]
    MissingData(String),

    /// JSON parsing failed.
    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    /// I/O operation failed.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for vinylpress operations.
pub type Result<T> = std::result::Result<T, VinylError>;
