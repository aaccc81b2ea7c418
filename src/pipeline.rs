//! Build pipeline driver
//!
//! Orchestrates one build run: honor the force override, consult the
//! cache engine, invoke the caller's rebuild action on a miss, persist
//! cache state, and harden the output. The rebuild action itself is
//! supplied by the surrounding generator; Gazette only decides whether
//! it has to run.

use crate::cache::{BuildCache, Change, StrategyKind};
use crate::error::GazetteResult;
use crate::security;

/// Environment variable that forces a rebuild, bypassing the cache
pub const FORCE_BUILD_ENV: &str = "GAZETTE_FORCE_BUILD";

/// Options for a build run
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    /// Skip the cache check entirely and rebuild
    pub force: bool,
}

impl BuildOptions {
    /// Read options from the environment
    ///
    /// `GAZETTE_FORCE_BUILD` set to anything but empty, `0`, or `false`
    /// forces a rebuild.
    pub fn from_env() -> Self {
        let force = std::env::var(FORCE_BUILD_ENV)
            .map(|v| !v.is_empty() && v != "0" && !v.eq_ignore_ascii_case("false"))
            .unwrap_or(false);
        Self { force }
    }
}

/// Summary of one build run
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// Whether the rebuild action ran
    pub rebuilt: bool,
    /// Whether the cache was bypassed by the force override
    pub forced: bool,
    /// Strategy that produced the decision (`None` when forced)
    pub strategy: StrategyKind,
    /// Changes reported by the deciding strategy
    pub changes: Vec<Change>,
    /// Non-fatal problems collected along the way
    pub warnings: Vec<String>,
}

/// Run one build
///
/// On a cache hit the rebuild action is skipped; output hardening runs
/// unconditionally either way. A failing rebuild action is the only
/// fatal path — cache reads and writes degrade to warnings.
pub fn build_site<F>(
    cache: &BuildCache,
    options: BuildOptions,
    rebuild: F,
) -> GazetteResult<BuildReport>
where
    F: FnOnce() -> GazetteResult<()>,
{
    let mut warnings = Vec::new();

    let (needs_rebuild, strategy, changes) = if options.force {
        (true, StrategyKind::None, Vec::new())
    } else {
        let decision = cache.check();
        warnings.extend(decision.warnings);
        (
            !decision.result.is_valid,
            decision.result.strategy,
            decision.result.changes,
        )
    };

    let mut rebuilt = false;
    if needs_rebuild {
        rebuild()?;
        rebuilt = true;
        warnings.extend(cache.record_build());
    }

    // Applied whether or not the cached output was reused.
    if let Err(err) = security::harden_output(&cache.config().output_root) {
        warnings.push(format!("output hardening failed: {err}"));
    }

    Ok(BuildReport {
        rebuilt,
        forced: options.force,
        strategy,
        changes,
        warnings,
    })
}
