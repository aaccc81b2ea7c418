//! Recency strategy
//!
//! Last resort, intended for CI runners where neither the cache record
//! nor the repository marker survives: if the built `index.html` is
//! recent enough, any content file modified after it must have changed
//! since that build. Outside the freshness window the modification
//! times prove nothing, so the strategy declines.

use std::time::SystemTime;

use super::snapshot::{content_walker, normalize_rel_path};
use super::{CacheConfig, CacheStrategy, Change, StrategyKind, StrategyResult};
use crate::error::GazetteResult;

/// Canonical output artifact whose mtime stands in for the build time
const OUTPUT_ARTIFACT: &str = "index.html";

/// Compares content modification times against the output artifact
#[derive(Debug)]
pub struct RecencyStrategy<'a> {
    config: &'a CacheConfig,
}

impl<'a> RecencyStrategy<'a> {
    pub fn new(config: &'a CacheConfig) -> Self {
        Self { config }
    }
}

impl CacheStrategy for RecencyStrategy<'_> {
    fn name(&self) -> &'static str {
        "ci"
    }

    fn attempt(&self) -> GazetteResult<Option<StrategyResult>> {
        let artifact = self.config.output_root.join(OUTPUT_ARTIFACT);
        let Ok(metadata) = std::fs::metadata(&artifact) else {
            return Ok(None);
        };
        let build_time = metadata.modified()?;

        // Mtimes are only trustworthy close to the build; beyond the
        // window, decline instead of guessing.
        let window = self
            .config
            .freshness_window
            .to_std()
            .unwrap_or(std::time::Duration::ZERO);
        let age = SystemTime::now()
            .duration_since(build_time)
            .unwrap_or_default();
        if age > window {
            return Ok(None);
        }

        let mut changes = Vec::new();
        if self.config.content_root.is_dir() {
            for entry in content_walker(&self.config.content_root) {
                let entry = entry.map_err(|e| std::io::Error::other(e.to_string()))?;
                if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                    continue;
                }
                let modified = entry
                    .metadata()
                    .map_err(|e| std::io::Error::other(e.to_string()))?
                    .modified()?;
                if modified > build_time {
                    if let Ok(relative) = entry.path().strip_prefix(&self.config.content_root) {
                        changes.push(Change::Modified(normalize_rel_path(relative)));
                    }
                }
            }
        }
        changes.sort_by_key(|c| c.to_string());

        Ok(Some(StrategyResult::from_changes(StrategyKind::Ci, changes)))
    }
}
