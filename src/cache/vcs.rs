//! Version-control strategy
//!
//! Uses the build marker written into the output directory: if the
//! marker's revision matches `HEAD`, the output is current by
//! definition and no diff is needed. Otherwise git itself reports which
//! content paths changed between the two revisions. Every git failure —
//! no repository, missing binary, unknown revision — makes the strategy
//! decline rather than guess.

use std::path::Path;
use std::process::Command;

use super::record::VcsMarker;
use super::{CacheConfig, CacheStrategy, Change, StrategyKind, StrategyResult};
use crate::error::GazetteResult;

/// Compares the recorded build revision against the working revision
#[derive(Debug)]
pub struct VcsStrategy<'a> {
    config: &'a CacheConfig,
}

impl<'a> VcsStrategy<'a> {
    pub fn new(config: &'a CacheConfig) -> Self {
        Self { config }
    }
}

impl CacheStrategy for VcsStrategy<'_> {
    fn name(&self) -> &'static str {
        "vcs"
    }

    fn attempt(&self) -> GazetteResult<Option<StrategyResult>> {
        if !self.config.output_root.is_dir() {
            return Ok(None);
        }

        // Not a repository (or git unavailable): precondition unmet.
        let Some(revision) = current_revision(&self.config.content_root) else {
            return Ok(None);
        };

        let Some(marker) = VcsMarker::load(&self.config.output_root) else {
            return Ok(None);
        };

        // Same commit, same content: valid without invoking a diff.
        if marker.commit == revision {
            return Ok(Some(StrategyResult::valid(StrategyKind::Vcs)));
        }

        let Some(paths) =
            changed_content_paths(&self.config.content_root, &marker.commit, &revision)
        else {
            // Marker revision unknown to this clone, or the diff failed.
            return Ok(None);
        };

        let changes = paths.into_iter().map(Change::Git).collect();
        Ok(Some(StrategyResult::from_changes(StrategyKind::Vcs, changes)))
    }
}

/// Current `HEAD` revision of the repository containing `dir`
///
/// `None` when `dir` is not inside a work tree, the repository has no
/// commits yet, or git cannot be run at all.
pub(crate) fn current_revision(dir: &Path) -> Option<String> {
    let output = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let revision = String::from_utf8(output.stdout).ok()?.trim().to_string();
    (!revision.is_empty()).then_some(revision)
}

/// Content paths changed between two revisions, relative to `dir`
///
/// Restricted to the content subtree via the pathspec; `--relative`
/// keeps reported paths rooted at the content directory.
fn changed_content_paths(dir: &Path, from: &str, to: &str) -> Option<Vec<String>> {
    let output = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(["diff", "--name-only", "--relative"])
        .arg(format!("{from}..{to}"))
        .args(["--", "."])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let stdout = String::from_utf8(output.stdout).ok()?;
    Some(
        stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect(),
    )
}
