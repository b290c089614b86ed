//! Error types for dataset loading, configuration and font discovery.
//!
//! Nothing in the layout, viewport or render path returns these: those degrade
//! visually instead. Errors only surface while the app is starting up.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TimelineError {
    #[error("failed to parse timeline dataset: {0}")]
    Dataset(#[from] serde_json::Error),

    #[error("civilization id `{0}` appears more than once")]
    DuplicateEntity(String),

    #[error("invalid color token `{0}`")]
    InvalidColor(String),

    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path:?}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config {path:?}: {reason}")]
    InvalidConfig { path: PathBuf, reason: String },

    #[error("failed to load font {path:?}: {source}")]
    Font {
        path: PathBuf,
        #[source]
        source: ab_glyph::InvalidFont,
    },
}

pub type Result<T, E = TimelineError> = std::result::Result<T, E>;
