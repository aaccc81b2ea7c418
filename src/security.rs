//! Output hardening
//!
//! Admin pages exist only for local editing and must never reach a
//! static deploy. After every build — cache hit or not — the pipeline
//! strips admin artifacts from the output directory.

use std::path::Path;

use crate::error::GazetteResult;

/// Directory inside the output tree that must not be published
pub const ADMIN_DIR_NAME: &str = "admin";

/// Remove admin artifacts from a built output directory
///
/// Returns `true` if an admin subtree was found and removed. A missing
/// output directory or admin subtree is not an error; there is nothing
/// to harden.
pub fn harden_output(output_root: &Path) -> GazetteResult<bool> {
    let admin_dir = output_root.join(ADMIN_DIR_NAME);
    if !admin_dir.exists() {
        return Ok(false);
    }
    std::fs::remove_dir_all(&admin_dir)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn removes_admin_directory() {
        let dir = tempdir().unwrap();
        let admin = dir.path().join("admin");
        std::fs::create_dir_all(admin.join("posts")).unwrap();
        std::fs::write(admin.join("index.html"), "<html>").unwrap();

        assert!(harden_output(dir.path()).unwrap());
        assert!(!admin.exists());
    }

    #[test]
    fn missing_admin_directory_is_fine() {
        let dir = tempdir().unwrap();
        assert!(!harden_output(dir.path()).unwrap());
    }

    #[test]
    fn missing_output_directory_is_fine() {
        let dir = tempdir().unwrap();
        assert!(!harden_output(&dir.path().join("never-built")).unwrap());
    }

    #[test]
    fn leaves_public_output_alone() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("admin")).unwrap();
        std::fs::write(dir.path().join("index.html"), "<html>").unwrap();

        harden_output(dir.path()).unwrap();
        assert!(dir.path().join("index.html").exists());
    }
}
