//! Persisted cache state
//!
//! Two artifacts survive between builds: the cache record next to the
//! project (content digests + build time) and, under version control,
//! a marker inside the output directory tying the output to a revision.
//! Both are read tolerantly — a missing, unparsable, or incompatible
//! file reads as "no cache", never as an error.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ContentSnapshot;
use crate::error::GazetteResult;
use crate::fs;

/// Format version written into cache records
pub const CACHE_FORMAT_VERSION: &str = "1";

/// Snapshot of the content tree persisted after a successful build
///
/// Written only by the build process, and only after a build succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheRecord {
    /// When the recorded build finished
    #[serde(rename = "lastBuild")]
    pub last_build: DateTime<Utc>,

    /// Content digests at build time
    pub hashes: ContentSnapshot,

    /// Record format version
    pub version: String,
}

impl CacheRecord {
    /// Create a record for a snapshot taken now
    pub fn new(hashes: ContentSnapshot) -> Self {
        Self {
            last_build: Utc::now(),
            hashes,
            version: CACHE_FORMAT_VERSION.to_string(),
        }
    }

    /// Load a record
    ///
    /// Missing, unparsable, or version-incompatible files all read as
    /// `None` so the caller falls through to a rebuild.
    pub fn load(path: &Path) -> Option<Self> {
        let record: Self = fs::read_json(path).ok()?;
        (record.version == CACHE_FORMAT_VERSION).then_some(record)
    }

    /// Persist the record atomically
    pub fn save(&self, path: &Path) -> GazetteResult<()> {
        fs::write_json(path, self)
    }
}

/// Build marker written into the output directory under version control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VcsMarker {
    /// Revision the output was built from
    pub commit: String,

    /// When the build finished
    #[serde(rename = "buildTime")]
    pub build_time: DateTime<Utc>,

    /// Content digests at that revision
    pub hashes: ContentSnapshot,
}

impl VcsMarker {
    /// File name of the marker inside the output directory
    pub const FILE_NAME: &'static str = ".build-marker.json";

    /// Create a marker for a build finishing now
    pub fn new(commit: impl Into<String>, hashes: ContentSnapshot) -> Self {
        Self {
            commit: commit.into(),
            build_time: Utc::now(),
            hashes,
        }
    }

    /// Marker path for a given output directory
    pub fn path_in(output_root: &Path) -> PathBuf {
        output_root.join(Self::FILE_NAME)
    }

    /// Load the marker from an output directory; tolerant like
    /// [`CacheRecord::load`]
    pub fn load(output_root: &Path) -> Option<Self> {
        fs::read_json(&Self::path_in(output_root)).ok()
    }

    /// Persist the marker atomically
    pub fn save(&self, output_root: &Path) -> GazetteResult<()> {
        fs::write_json(&Self::path_in(output_root), self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn record_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".gazette-cache.json");

        let record = CacheRecord::new(ContentSnapshot::default());
        record.save(&path).unwrap();

        let loaded = CacheRecord::load(&path).unwrap();
        assert_eq!(loaded, record);
    }

    #[test]
    fn missing_record_loads_as_none() {
        let dir = tempdir().unwrap();
        assert!(CacheRecord::load(&dir.path().join("nope.json")).is_none());
    }

    #[test]
    fn corrupt_record_loads_as_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".gazette-cache.json");
        std::fs::write(&path, "{truncated").unwrap();

        assert!(CacheRecord::load(&path).is_none());
    }

    #[test]
    fn incompatible_version_loads_as_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".gazette-cache.json");

        let mut record = CacheRecord::new(ContentSnapshot::default());
        record.version = "999".to_string();
        record.save(&path).unwrap();

        assert!(CacheRecord::load(&path).is_none());
    }

    #[test]
    fn record_uses_original_key_casing() {
        let record = CacheRecord::new(ContentSnapshot::default());
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"lastBuild\""));
        assert!(json.contains("\"hashes\""));
        assert!(json.contains("\"version\""));
    }

    #[test]
    fn marker_round_trips_in_output_dir() {
        let dir = tempdir().unwrap();

        let marker = VcsMarker::new("abc123", ContentSnapshot::default());
        marker.save(dir.path()).unwrap();

        let loaded = VcsMarker::load(dir.path()).unwrap();
        assert_eq!(loaded.commit, "abc123");
        assert!(dir.path().join(VcsMarker::FILE_NAME).exists());
    }

    #[test]
    fn corrupt_marker_loads_as_none() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(VcsMarker::FILE_NAME), "not json").unwrap();

        assert!(VcsMarker::load(dir.path()).is_none());
    }
}
