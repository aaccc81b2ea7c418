//! Core data models for Gazette
//!
//! Defines the content structures stored as JSON files:
//! - `Post`: a single post under `content/posts/`
//! - `UploadMetadata`: sidecar metadata for uploaded files
//! - `ThemeManifest`: a theme's `theme.json`

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A single post, stored as `content/posts/<slug>.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Post title
    pub title: String,

    /// Publication date (`YYYY-MM-DD`)
    pub date: NaiveDate,

    /// URL slug, also the file stem on disk
    pub slug: String,

    /// Body in the block-markup dialect (see [`crate::blocks`])
    pub content: String,
}

impl Post {
    /// Create a new post
    pub fn new(
        title: impl Into<String>,
        date: NaiveDate,
        slug: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            date,
            slug: slug.into(),
            content: content.into(),
        }
    }

    /// File name of this post on disk
    pub fn file_name(&self) -> String {
        format!("{}.json", self.slug)
    }
}

/// Sidecar metadata for an uploaded file, stored as `<filename>.json`
/// next to the upload itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadMetadata {
    /// Stored file name
    pub filename: String,

    /// Name the file had when uploaded
    pub original_name: String,

    /// Size in bytes
    pub size: u64,

    /// MIME type reported at upload time
    pub mime_type: String,

    /// Upload timestamp
    pub uploaded_at: DateTime<Utc>,
}

/// A theme's manifest (`content/themes/<name>/theme.json`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeManifest {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub author: String,
    /// Stylesheets relative to the theme directory
    #[serde(default)]
    pub styles: Vec<String>,
    /// Template names keyed by page kind
    #[serde(default)]
    pub templates: BTreeMap<String, String>,
}
