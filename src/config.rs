//! Site configuration
//!
//! The configuration lives at `<content>/config.json` and is edited both
//! by hand and through the admin surface, so every section is optional on
//! disk and falls back to a sensible default. A missing or unreadable
//! file yields the full default configuration rather than an error; the
//! build cache treats the file as ordinary content and digests it whole.

use std::path::{Path, PathBuf};

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::GazetteResult;
use crate::fs;

/// File name of the site configuration inside the content root
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Length of generated admin passwords
const ADMIN_PASSWORD_LEN: usize = 16;

/// Site identity section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSection {
    pub title: String,
    pub description: String,
    pub url: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: "My Gazette Site".to_string(),
            description: "A site built with Gazette".to_string(),
            url: "http://localhost:3000".to_string(),
            language: default_language(),
            timezone: default_timezone(),
        }
    }
}

fn default_language() -> String {
    "en".to_string()
}

fn default_timezone() -> String {
    "UTC".to_string()
}

/// Admin credentials section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSection {
    pub username: String,
    pub password: String,
}

impl Default for AdminSection {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: generate_password(),
        }
    }
}

/// Build output section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildSection {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default)]
    pub trailing_slash: bool,
    #[serde(default = "default_true")]
    pub generate_sitemap: bool,
    #[serde(default = "default_true", rename = "generateRSS")]
    pub generate_rss: bool,
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            trailing_slash: false,
            generate_sitemap: true,
            generate_rss: true,
        }
    }
}

fn default_output_dir() -> String {
    "out".to_string()
}

fn default_true() -> bool {
    true
}

/// SEO defaults section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoSection {
    #[serde(default)]
    pub meta_title: String,
    #[serde(default)]
    pub meta_description: String,
    #[serde(default)]
    pub og_image: String,
    #[serde(default = "default_twitter_card")]
    pub twitter_card: String,
}

impl Default for SeoSection {
    fn default() -> Self {
        Self {
            meta_title: String::new(),
            meta_description: String::new(),
            og_image: String::new(),
            twitter_card: default_twitter_card(),
        }
    }
}

fn default_twitter_card() -> String {
    "summary_large_image".to_string()
}

/// Main site configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub site: SiteSection,

    #[serde(default = "default_theme")]
    pub theme: String,

    #[serde(default)]
    pub plugins: Vec<String>,

    #[serde(default)]
    pub admin: AdminSection,

    #[serde(default)]
    pub build: BuildSection,

    #[serde(default)]
    pub seo: SeoSection,
}

fn default_theme() -> String {
    "default".to_string()
}

impl Default for SiteConfig {
    /// Full default configuration, admin password included
    fn default() -> Self {
        Self {
            site: SiteSection::default(),
            theme: default_theme(),
            plugins: Vec::new(),
            admin: AdminSection::default(),
            build: BuildSection::default(),
            seo: SeoSection::default(),
        }
    }
}

impl SiteConfig {
    /// Path of the config file for a given content root
    pub fn path_in(content_root: &Path) -> PathBuf {
        content_root.join(CONFIG_FILE_NAME)
    }

    /// Load the configuration from the content root
    ///
    /// A missing or unreadable config file yields the defaults; the site
    /// must stay usable even when the file is damaged.
    pub fn load(content_root: &Path) -> Self {
        let path = Self::path_in(content_root);
        if !path.exists() {
            return Self::default();
        }
        fs::read_json(&path).unwrap_or_default()
    }

    /// Load the configuration, surfacing parse errors
    pub fn load_strict(content_root: &Path) -> GazetteResult<Self> {
        fs::read_json(&Self::path_in(content_root))
    }

    /// Save the configuration into the content root
    pub fn save(&self, content_root: &Path) -> GazetteResult<()> {
        fs::write_json(&Self::path_in(content_root), self)
    }

    /// Load, apply a mutation, and save in one step
    ///
    /// Returns the configuration as persisted.
    pub fn update(
        content_root: &Path,
        mutate: impl FnOnce(&mut Self),
    ) -> GazetteResult<Self> {
        let mut config = Self::load(content_root);
        mutate(&mut config);
        config.save(content_root)?;
        Ok(config)
    }

    /// Validate the configuration, returning any problems found
    ///
    /// An empty vector means the configuration is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.site.title.trim().is_empty() {
            errors.push("site title is required".to_string());
        }
        if self.site.url.trim().is_empty() {
            errors.push("site URL is required".to_string());
        } else if !is_plausible_url(&self.site.url) {
            errors.push("site URL must be a valid URL".to_string());
        }
        if self.theme.trim().is_empty() {
            errors.push("theme is required".to_string());
        }
        if self.admin.username.trim().is_empty() || self.admin.password.is_empty() {
            errors.push("admin credentials are required".to_string());
        }

        errors
    }
}

/// Generate a random admin password
pub fn generate_password() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(ADMIN_PASSWORD_LEN)
        .map(char::from)
        .collect()
}

fn is_plausible_url(url: &str) -> bool {
    let rest = match url.strip_prefix("https://").or_else(|| url.strip_prefix("http://")) {
        Some(rest) => rest,
        None => return false,
    };
    !rest.is_empty() && !rest.starts_with('/')
}
