//! Gazette - content layer for a static-site generator
//!
//! Gazette owns a site's content tree and its build cache. It stores
//! posts and configuration as JSON files, renders the block-markup
//! dialect used in post bodies, scaffolds new sites, and decides per
//! build — via three fallback strategies — whether the previous output
//! can be reused.
//!
//! Page assembly, theming, plugins, and the CLI are the surrounding
//! generator's job; they call into this crate.

pub mod blocks;
pub mod cache;
pub mod config;
pub mod error;
pub mod fs;
pub mod hash;
pub mod models;
pub mod pipeline;
pub mod scaffold;
pub mod security;
pub mod store;

// Re-exports for convenience
pub use cache::{
    BuildCache, CacheConfig, CacheDecision, CacheRecord, Change, ContentSnapshot, StrategyKind,
    StrategyResult, VcsMarker,
};
pub use config::SiteConfig;
pub use error::{GazetteError, GazetteResult};
pub use hash::ContentHash;
pub use models::{Post, ThemeManifest, UploadMetadata};
pub use pipeline::{build_site, BuildOptions, BuildReport, FORCE_BUILD_ENV};
pub use scaffold::{create_site, ScaffoldOptions, ScaffoldOutcome};
pub use store::{ContentStore, PostListing};
