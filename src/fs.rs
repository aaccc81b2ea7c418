//! Filesystem helpers
//!
//! Atomic JSON persistence shared by the content store, the scaffolder,
//! and the build cache. Writes go through a temp file in the target
//! directory followed by a rename, so readers never observe a partial
//! file.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{GazetteError, GazetteResult};

/// Write bytes to a file atomically (temp file + rename)
pub fn write_atomic(path: &Path, content: &[u8]) -> GazetteResult<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    tmp.write_all(content)?;
    tmp.persist(path).map_err(|e| GazetteError::Io(e.error))?;
    Ok(())
}

/// Serialize a value as pretty JSON and write it atomically
///
/// Output always ends with a trailing newline, matching hand-edited
/// content files.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> GazetteResult<()> {
    let mut content =
        serde_json::to_vec_pretty(value).map_err(|e| GazetteError::json(path, e))?;
    content.push(b'\n');
    write_atomic(path, &content)
}

/// Read and deserialize a JSON file
pub fn read_json<T: DeserializeOwned>(path: &Path) -> GazetteResult<T> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| GazetteError::json(path, e))
}
