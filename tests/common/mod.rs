//! Common test utilities for Gazette integration tests.
//!
//! Provides `SiteFixture`: an isolated site in a temp directory with
//! helpers for content edits, fake build output, and throwaway git
//! repositories.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;

use gazette::cache::CacheConfig;
use tempfile::TempDir;

/// Isolated site rooted in a temp directory
pub struct SiteFixture {
    root: TempDir,
}

impl SiteFixture {
    /// Create a fixture with an empty content tree
    pub fn new() -> Self {
        let fixture = Self {
            root: TempDir::new().expect("create temp dir"),
        };
        std::fs::create_dir_all(fixture.content_root().join("posts")).unwrap();
        fixture
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn content_root(&self) -> PathBuf {
        self.root().join("content")
    }

    pub fn output_root(&self) -> PathBuf {
        self.root().join("out")
    }

    /// Cache configuration for this site
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig::new(self.root())
    }

    /// Write a post file directly (raw JSON body)
    pub fn write_post(&self, slug: &str, body: &str) {
        let path = self
            .content_root()
            .join("posts")
            .join(format!("{slug}.json"));
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, body).unwrap();
    }

    /// Remove a post file
    pub fn remove_post(&self, slug: &str) {
        std::fs::remove_file(
            self.content_root()
                .join("posts")
                .join(format!("{slug}.json")),
        )
        .unwrap();
    }

    /// Write the site config file (raw JSON body)
    pub fn write_config(&self, body: &str) {
        std::fs::write(self.content_root().join("config.json"), body).unwrap();
    }

    /// Write a theme file relative to `themes/`
    pub fn write_theme_file(&self, relative: &str, body: &str) {
        let path = self.content_root().join("themes").join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, body).unwrap();
    }

    /// Simulate a rendered build: `out/index.html` plus admin pages
    pub fn render_output(&self) {
        let out = self.output_root();
        std::fs::create_dir_all(out.join("admin")).unwrap();
        std::fs::write(out.join("index.html"), "<html></html>").unwrap();
        std::fs::write(out.join("admin/index.html"), "<admin></admin>").unwrap();
    }

    // === git helpers ===

    /// Run git in the site root; `false` on any failure
    pub fn git(&self, args: &[&str]) -> bool {
        Command::new("git")
            .arg("-C")
            .arg(self.root())
            .args(args)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    /// Initialize a repository in the site root
    ///
    /// Returns `false` when git is unavailable so callers can skip.
    pub fn init_repo(&self) -> bool {
        self.git(&["init", "-q"])
            && self.git(&["config", "user.email", "test@example.com"])
            && self.git(&["config", "user.name", "Test"])
    }

    /// Stage and commit everything
    pub fn commit_all(&self, message: &str) -> bool {
        self.git(&["add", "-A"]) && self.git(&["commit", "-q", "-m", message])
    }
}

impl Default for SiteFixture {
    fn default() -> Self {
        Self::new()
    }
}
