//! Site scaffolding
//!
//! Creates the skeleton of a new site: the content tree, a default
//! configuration, a welcome post, and the default theme. Scaffolding an
//! already-initialized site is detected and left untouched.

use std::path::Path;

use chrono::Utc;

use crate::config::SiteConfig;
use crate::error::{GazetteError, GazetteResult};
use crate::fs;
use crate::models::{Post, ThemeManifest};
use crate::store::ContentStore;

/// Options for creating a new site
#[derive(Debug, Clone)]
pub struct ScaffoldOptions {
    pub site_name: String,
    pub description: String,
    pub url: String,
}

impl Default for ScaffoldOptions {
    fn default() -> Self {
        Self {
            site_name: "My Gazette Site".to_string(),
            description: "A site built with Gazette".to_string(),
            url: "http://localhost:3000".to_string(),
        }
    }
}

/// What `create_site` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaffoldOutcome {
    /// A fresh skeleton was written
    Created,
    /// The target already holds an initialized site; nothing was touched
    AlreadyInitialized,
}

/// Check whether a site is already initialized at `root`
pub fn is_initialized(root: &Path) -> bool {
    SiteConfig::path_in(&root.join("content")).exists()
}

/// Create a new site skeleton at `root`
pub fn create_site(root: &Path, options: &ScaffoldOptions) -> GazetteResult<ScaffoldOutcome> {
    if root.exists() && !root.is_dir() {
        return Err(GazetteError::NotADirectory {
            path: root.to_path_buf(),
        });
    }
    if is_initialized(root) {
        return Ok(ScaffoldOutcome::AlreadyInitialized);
    }

    let store = ContentStore::new(root.join("content"));
    store.ensure_directories()?;

    let mut config = SiteConfig::default();
    config.site.title = options.site_name.clone();
    config.site.description = options.description.clone();
    config.site.url = options.url.clone();
    config.save(store.content_root())?;

    store.save_post(&welcome_post())?;
    write_default_theme(&store)?;

    Ok(ScaffoldOutcome::Created)
}

fn welcome_post() -> Post {
    Post::new(
        "Welcome to Gazette",
        Utc::now().date_naive(),
        "welcome-to-gazette",
        "<!-- blk:heading {\"level\": 2} -->Welcome to Gazette<!-- /blk:heading -->\
         <!-- blk:paragraph -->This is your first post. Edit it in the admin panel \
         or change the JSON file directly.<!-- /blk:paragraph -->",
    )
}

fn write_default_theme(store: &ContentStore) -> GazetteResult<()> {
    let theme_dir = store.themes_dir().join("default");
    std::fs::create_dir_all(&theme_dir)?;

    let manifest = ThemeManifest {
        name: "Default Theme".to_string(),
        version: "1.0.0".to_string(),
        description: "A simple default theme for Gazette".to_string(),
        author: "Gazette Team".to_string(),
        styles: vec!["style.css".to_string()],
        templates: [
            ("index".to_string(), "index.html".to_string()),
            ("post".to_string(), "post.html".to_string()),
            ("page".to_string(), "page.html".to_string()),
        ]
        .into_iter()
        .collect(),
    };
    fs::write_json(&theme_dir.join("theme.json"), &manifest)?;
    fs::write_atomic(&theme_dir.join("style.css"), DEFAULT_STYLESHEET.as_bytes())?;
    Ok(())
}

const DEFAULT_STYLESHEET: &str = "\
/* Default Gazette theme */
* {
    margin: 0;
    padding: 0;
    box-sizing: border-box;
}

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    line-height: 1.6;
    color: #333;
    background-color: #fff;
}

.container {
    max-width: 800px;
    margin: 0 auto;
    padding: 0 20px;
}

.site-header {
    border-bottom: 1px solid #e9ecef;
    padding: 2rem 0;
    margin-bottom: 2rem;
}

.post-card {
    border: 1px solid #e9ecef;
    border-radius: 8px;
    padding: 1.5rem;
    margin-bottom: 1.5rem;
}

.post-date {
    color: #666;
    font-size: 0.9rem;
}

.site-footer {
    border-top: 1px solid #e9ecef;
    padding: 2rem 0;
    text-align: center;
    color: #666;
}
";

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn create_site_writes_skeleton() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("my-site");

        let outcome = create_site(&root, &ScaffoldOptions::default()).unwrap();
        assert_eq!(outcome, ScaffoldOutcome::Created);

        assert!(root.join("content/posts").is_dir());
        assert!(root.join("content/uploads").is_dir());
        assert!(root.join("content/themes/default/theme.json").exists());
        assert!(root.join("content/themes/default/style.css").exists());
        assert!(root.join("content/config.json").exists());
        assert!(root
            .join("content/posts/welcome-to-gazette.json")
            .exists());
    }

    #[test]
    fn create_site_uses_requested_title() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("my-site");

        let options = ScaffoldOptions {
            site_name: "Field Notes".to_string(),
            ..ScaffoldOptions::default()
        };
        create_site(&root, &options).unwrap();

        let config = SiteConfig::load(&root.join("content"));
        assert_eq!(config.site.title, "Field Notes");
    }

    #[test]
    fn create_site_twice_is_detected() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("my-site");

        create_site(&root, &ScaffoldOptions::default()).unwrap();

        // Make the second call observable: it must not clobber content.
        let store = ContentStore::new(root.join("content"));
        store.delete_post("welcome-to-gazette").unwrap();

        let outcome = create_site(&root, &ScaffoldOptions::default()).unwrap();
        assert_eq!(outcome, ScaffoldOutcome::AlreadyInitialized);
        assert_eq!(store.get_post("welcome-to-gazette").unwrap(), None);
    }

    #[test]
    fn welcome_post_renders_cleanly() {
        let post = welcome_post();
        let rendered = crate::blocks::render(&post.content);

        assert!(rendered.warnings.is_empty());
        assert!(rendered.html.contains("<h2>Welcome to Gazette</h2>"));
    }

    #[test]
    fn scaffold_target_must_be_directory() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("occupied");
        std::fs::write(&root, "a file").unwrap();

        let err = create_site(&root, &ScaffoldOptions::default()).unwrap_err();
        assert!(matches!(err, GazetteError::NotADirectory { .. }));
    }
}
