//! Content snapshot
//!
//! A `ContentSnapshot` maps every file under the content root to a
//! digest, partitioned into the three namespaces the cache compares:
//! post files, the site configuration, and theme files. Capture is
//! deterministic: maps are ordered and paths are normalized to forward
//! slashes, so two captures of an unchanged tree are identical.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::Change;
use crate::config::CONFIG_FILE_NAME;
use crate::error::GazetteResult;
use crate::hash::ContentHash;

/// Digest of the content tree at a point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ContentSnapshot {
    /// Post file name → digest
    #[serde(default)]
    pub posts: BTreeMap<String, ContentHash>,

    /// Digest of `config.json`, when present
    #[serde(default)]
    pub config: Option<ContentHash>,

    /// Theme file path (relative to `themes/`) → digest
    #[serde(default)]
    pub themes: BTreeMap<String, ContentHash>,
}

impl ContentSnapshot {
    /// Capture the current state of a content root
    ///
    /// Missing subdirectories yield empty namespaces; the snapshot
    /// reflects exactly the files that exist right now.
    pub fn capture(content_root: &Path) -> GazetteResult<Self> {
        let mut snapshot = Self::default();

        let posts_dir = content_root.join("posts");
        if posts_dir.is_dir() {
            for entry in std::fs::read_dir(&posts_dir)? {
                let path = entry?.path();
                if path.is_file() && path.extension().map(|e| e == "json").unwrap_or(false) {
                    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                        snapshot
                            .posts
                            .insert(name.to_string(), ContentHash::from_file(&path)?);
                    }
                }
            }
        }

        let config_path = content_root.join(CONFIG_FILE_NAME);
        if config_path.is_file() {
            snapshot.config = Some(ContentHash::from_file(&config_path)?);
        }

        let themes_dir = content_root.join("themes");
        if themes_dir.is_dir() {
            for entry in content_walker(&themes_dir) {
                let entry = entry.map_err(|e| std::io::Error::other(e.to_string()))?;
                let path = entry.path();
                if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                    continue;
                }
                if let Ok(relative) = path.strip_prefix(&themes_dir) {
                    snapshot
                        .themes
                        .insert(normalize_rel_path(relative), ContentHash::from_file(path)?);
                }
            }
        }

        Ok(snapshot)
    }

    /// Compare this (previously stored) snapshot against a fresh one
    ///
    /// Returns the ordered change list; empty means nothing changed.
    pub fn diff(&self, current: &Self) -> Vec<Change> {
        let mut changes = Vec::new();

        for (name, hash) in &current.posts {
            if self.posts.get(name) != Some(hash) {
                changes.push(Change::Post(name.clone()));
            }
        }
        for name in self.posts.keys() {
            if !current.posts.contains_key(name) {
                changes.push(Change::RemovedPost(name.clone()));
            }
        }

        if self.config != current.config {
            changes.push(Change::Config);
        }

        for (path, hash) in &current.themes {
            if self.themes.get(path) != Some(hash) {
                changes.push(Change::Theme(path.clone()));
            }
        }
        for path in self.themes.keys() {
            if !current.themes.contains_key(path) {
                changes.push(Change::RemovedTheme(path.clone()));
            }
        }

        changes
    }

    /// Total number of tracked files
    pub fn len(&self) -> usize {
        self.posts.len() + self.themes.len() + usize::from(self.config.is_some())
    }

    /// Whether the snapshot tracks no files at all
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Walk a content directory: plain recursive walk, hidden files skipped
///
/// Ignore-file handling is disabled on purpose. The cache must see every
/// file that exists, whether or not the surrounding repository ignores
/// it.
pub(crate) fn content_walker(dir: &Path) -> ignore::Walk {
    ignore::WalkBuilder::new(dir)
        .standard_filters(false)
        .hidden(true)
        .build()
}

/// Normalize a relative path for snapshot storage (forward slashes)
pub(crate) fn normalize_rel_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
