//! Error types for Gazette
//!
//! Uses `thiserror` for library errors. Cache-strategy failures are not
//! represented here: a strategy that cannot decide declines with `None`
//! and the dispatcher records a warning instead of propagating an error.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Gazette operations
pub type GazetteResult<T> = Result<T, GazetteError>;

/// Main error type for Gazette operations
#[derive(Error, Debug)]
pub enum GazetteError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error tied to a specific file
    #[error("invalid JSON in {file}: {source}")]
    Json {
        file: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Slug contains characters that are unsafe as a file name
    #[error("invalid slug '{slug}' - slugs may only contain lowercase letters, digits, and dashes")]
    InvalidSlug { slug: String },

    /// Upload file name would escape the uploads directory
    #[error("invalid upload file name '{name}'")]
    InvalidFileName { name: String },

    /// Scaffold target exists but is not a directory
    #[error("scaffold target is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}

impl GazetteError {
    /// Wrap a `serde_json::Error` with the file it came from
    pub(crate) fn json(file: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            file: file.into(),
            source,
        }
    }
}
