//! Build cache decision engine
//!
//! Decides whether the previous build output can be reused. Three
//! strategies are tried in fixed priority order — content hashes, the
//! version-control marker, then output recency — and the first one whose
//! preconditions hold produces the decision. A strategy that cannot
//! decide declines with `None`; one that fails is downgraded to a
//! decline with a warning. When every strategy declines the engine
//! reports "rebuild": an ambiguous cache check must never serve a stale
//! site.

pub mod local;
pub mod recency;
pub mod record;
pub mod snapshot;
pub mod vcs;

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::Duration;

use crate::config::SiteConfig;
use crate::error::GazetteResult;

pub use local::LocalHashStrategy;
pub use recency::RecencyStrategy;
pub use record::{CacheRecord, VcsMarker, CACHE_FORMAT_VERSION};
pub use snapshot::ContentSnapshot;
pub use vcs::VcsStrategy;

/// File name of the persisted cache record, relative to the project root
pub const CACHE_FILE_NAME: &str = ".gazette-cache.json";

/// Identifies which strategy produced a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    /// Content-hash comparison against the persisted cache record
    Local,
    /// Version-control marker comparison
    Vcs,
    /// Output-artifact recency check
    Ci,
    /// No strategy could decide
    None,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StrategyKind::Local => "local",
            StrategyKind::Vcs => "vcs",
            StrategyKind::Ci => "ci",
            StrategyKind::None => "none",
        };
        write!(f, "{name}")
    }
}

/// One observed difference between the cached and current content state
///
/// Changes are display-only descriptors; nothing re-parses them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// A post file is new or its content changed
    Post(String),
    /// A post file present in the cache record no longer exists
    RemovedPost(String),
    /// The site configuration changed
    Config,
    /// A theme file is new or its content changed
    Theme(String),
    /// A theme file present in the cache record no longer exists
    RemovedTheme(String),
    /// A path reported changed by the version-control diff
    Git(String),
    /// A file modified after the last build artifact was written
    Modified(String),
    /// No strategy could produce a decision
    NoCacheAvailable,
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::Post(name) => write!(f, "post:{name}"),
            Change::RemovedPost(name) => write!(f, "removed-post:{name}"),
            Change::Config => write!(f, "config"),
            Change::Theme(path) => write!(f, "theme:{path}"),
            Change::RemovedTheme(path) => write!(f, "removed-theme:{path}"),
            Change::Git(path) => write!(f, "git:{path}"),
            Change::Modified(path) => write!(f, "modified:{path}"),
            Change::NoCacheAvailable => write!(f, "no-cache-available"),
        }
    }
}

/// Decision produced by a single strategy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyResult {
    /// `true` means the previous build output can be reused
    pub is_valid: bool,
    /// What changed, when `is_valid` is `false`
    pub changes: Vec<Change>,
    /// Strategy that produced this result
    pub strategy: StrategyKind,
}

impl StrategyResult {
    /// A "cache is valid" result with no changes
    pub fn valid(strategy: StrategyKind) -> Self {
        Self {
            is_valid: true,
            changes: Vec::new(),
            strategy,
        }
    }

    /// A result whose validity follows from the change list
    pub fn from_changes(strategy: StrategyKind, changes: Vec<Change>) -> Self {
        Self {
            is_valid: changes.is_empty(),
            changes,
            strategy,
        }
    }
}

/// Uniform contract for cache strategies
///
/// `Ok(None)` means the strategy's preconditions are unmet. `Err` means
/// an unexpected failure; the dispatcher records it and moves on —
/// errors never cross strategy boundaries.
pub trait CacheStrategy {
    /// Short name used in warnings
    fn name(&self) -> &'static str;

    /// Try to produce a decision
    fn attempt(&self) -> GazetteResult<Option<StrategyResult>>;
}

/// Engine configuration
///
/// All paths are explicit; the engine never consults the working
/// directory.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Root of the content tree (`posts/`, `config.json`, `themes/`)
    pub content_root: PathBuf,
    /// Directory the site is built into
    pub output_root: PathBuf,
    /// Location of the persisted cache record
    pub cache_file: PathBuf,
    /// How recent the output artifact must be for the recency strategy
    pub freshness_window: Duration,
}

impl CacheConfig {
    /// Configuration rooted at a project directory with default layout
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        let root = project_root.as_ref();
        Self {
            content_root: root.join("content"),
            output_root: root.join("out"),
            cache_file: root.join(CACHE_FILE_NAME),
            freshness_window: Duration::hours(1),
        }
    }

    /// Configuration honoring the site's build settings
    pub fn for_site(project_root: impl AsRef<Path>, site: &SiteConfig) -> Self {
        let root = project_root.as_ref();
        Self {
            output_root: root.join(&site.build.output_dir),
            ..Self::new(root)
        }
    }

    /// Override the recency strategy's freshness window
    pub fn with_freshness_window(mut self, window: Duration) -> Self {
        self.freshness_window = window;
        self
    }
}

/// Outcome of a cache check, with any warnings from declining strategies
#[derive(Debug, Clone)]
pub struct CacheDecision {
    pub result: StrategyResult,
    pub warnings: Vec<String>,
}

/// The strategy dispatcher
#[derive(Debug, Clone)]
pub struct BuildCache {
    config: CacheConfig,
}

impl BuildCache {
    /// Create an engine for the given configuration
    pub fn new(config: CacheConfig) -> Self {
        Self { config }
    }

    /// The engine's configuration
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Decide whether the previous build can be reused
    ///
    /// Always returns a decision; every failure path degrades toward
    /// "rebuild".
    pub fn check(&self) -> CacheDecision {
        let strategies: Vec<Box<dyn CacheStrategy + '_>> = vec![
            Box::new(LocalHashStrategy::new(&self.config)),
            Box::new(VcsStrategy::new(&self.config)),
            Box::new(RecencyStrategy::new(&self.config)),
        ];

        let mut warnings = Vec::new();
        for strategy in strategies {
            match strategy.attempt() {
                Ok(Some(result)) => return CacheDecision { result, warnings },
                Ok(None) => {}
                Err(err) => {
                    warnings.push(format!("cache strategy '{}' failed: {err}", strategy.name()));
                }
            }
        }

        CacheDecision {
            result: StrategyResult {
                is_valid: false,
                changes: vec![Change::NoCacheAvailable],
                strategy: StrategyKind::None,
            },
            warnings,
        }
    }

    /// Persist cache state after a successful build
    ///
    /// Writes the cache record and, when the content root is under
    /// version control, the build marker inside the output directory.
    /// Failures are reported as warnings, never as errors: a lost cache
    /// write means a rebuild next time, which is the safe direction.
    pub fn record_build(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        let snapshot = match ContentSnapshot::capture(&self.config.content_root) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warnings.push(format!("cache snapshot failed: {err}"));
                return warnings;
            }
        };

        let record = CacheRecord::new(snapshot.clone());
        if let Err(err) = record.save(&self.config.cache_file) {
            warnings.push(format!("cache record write failed: {err}"));
        }

        if let Some(commit) = vcs::current_revision(&self.config.content_root) {
            let marker = VcsMarker::new(commit, snapshot);
            if let Err(err) = marker.save(&self.config.output_root) {
                warnings.push(format!("build marker write failed: {err}"));
            }
        }

        warnings
    }
}
