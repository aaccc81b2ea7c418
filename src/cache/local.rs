//! Local-hash strategy
//!
//! Highest-priority strategy: compare a fresh digest of the content
//! tree against the snapshot persisted after the last successful build.

use super::record::CacheRecord;
use super::snapshot::ContentSnapshot;
use super::{CacheConfig, CacheStrategy, StrategyKind, StrategyResult};
use crate::error::GazetteResult;

/// Compares content digests against the persisted cache record
#[derive(Debug)]
pub struct LocalHashStrategy<'a> {
    config: &'a CacheConfig,
}

impl<'a> LocalHashStrategy<'a> {
    pub fn new(config: &'a CacheConfig) -> Self {
        Self { config }
    }
}

impl CacheStrategy for LocalHashStrategy<'_> {
    fn name(&self) -> &'static str {
        "local"
    }

    fn attempt(&self) -> GazetteResult<Option<StrategyResult>> {
        // Without prior output there is nothing to reuse, whatever the
        // hashes say.
        if !self.config.output_root.is_dir() {
            return Ok(None);
        }

        // Missing or corrupt record reads as None: precondition unmet.
        let Some(record) = CacheRecord::load(&self.config.cache_file) else {
            return Ok(None);
        };

        let current = ContentSnapshot::capture(&self.config.content_root)?;
        let changes = record.hashes.diff(&current);

        Ok(Some(StrategyResult::from_changes(
            StrategyKind::Local,
            changes,
        )))
    }
}
