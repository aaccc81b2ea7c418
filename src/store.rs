//! Content store
//!
//! File-backed CRUD over the content tree: one JSON file per post under
//! `posts/`, uploads with sidecar metadata under `uploads/`, and the
//! directory scaffolding shared by every site. All writes are atomic.

use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::error::{GazetteError, GazetteResult};
use crate::fs;
use crate::models::{Post, UploadMetadata};

/// Result of listing posts
///
/// Files that exist but cannot be parsed are skipped rather than failing
/// the whole listing; their paths are reported so callers can surface a
/// warning.
#[derive(Debug, Clone, Default)]
pub struct PostListing {
    /// Posts sorted by date, newest first
    pub posts: Vec<Post>,
    /// Paths of `.json` files that could not be parsed
    pub skipped: Vec<PathBuf>,
}

/// File-backed content store rooted at a content directory
#[derive(Debug, Clone)]
pub struct ContentStore {
    content_root: PathBuf,
}

impl ContentStore {
    /// Create a store for the given content root (no I/O performed)
    pub fn new(content_root: impl Into<PathBuf>) -> Self {
        Self {
            content_root: content_root.into(),
        }
    }

    /// The content root this store operates on
    pub fn content_root(&self) -> &Path {
        &self.content_root
    }

    /// Directory holding post files
    pub fn posts_dir(&self) -> PathBuf {
        self.content_root.join("posts")
    }

    /// Directory holding uploads and their metadata
    pub fn uploads_dir(&self) -> PathBuf {
        self.content_root.join("uploads")
    }

    /// Directory holding themes
    pub fn themes_dir(&self) -> PathBuf {
        self.content_root.join("themes")
    }

    /// Directory holding plugins
    pub fn plugins_dir(&self) -> PathBuf {
        self.content_root.join("plugins")
    }

    /// Create the content directory tree if any part of it is missing
    pub fn ensure_directories(&self) -> GazetteResult<()> {
        for dir in [
            self.content_root.clone(),
            self.posts_dir(),
            self.uploads_dir(),
            self.themes_dir(),
            self.plugins_dir(),
        ] {
            std::fs::create_dir_all(&dir)?;
        }
        Ok(())
    }

    // === Posts ===

    /// List all posts, newest first
    ///
    /// A missing posts directory yields an empty listing.
    pub fn list_posts(&self) -> GazetteResult<PostListing> {
        let posts_dir = self.posts_dir();
        if !posts_dir.is_dir() {
            return Ok(PostListing::default());
        }

        let mut listing = PostListing::default();
        for entry in std::fs::read_dir(&posts_dir)? {
            let path = entry?.path();
            if path.extension().map(|e| e == "json").unwrap_or(false) {
                match fs::read_json::<Post>(&path) {
                    Ok(post) => listing.posts.push(post),
                    Err(_) => listing.skipped.push(path),
                }
            }
        }

        // Newest first; slug breaks ties so the order is stable.
        listing
            .posts
            .sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));
        listing.skipped.sort();
        Ok(listing)
    }

    /// Load a single post by slug
    pub fn get_post(&self, slug: &str) -> GazetteResult<Option<Post>> {
        validate_slug(slug)?;
        let path = self.post_path(slug);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_json(&path).map(Some)
    }

    /// Save a post, overwriting any existing file with the same slug
    pub fn save_post(&self, post: &Post) -> GazetteResult<()> {
        validate_slug(&post.slug)?;
        fs::write_json(&self.post_path(&post.slug), post)
    }

    /// Delete a post by slug
    ///
    /// Returns `true` if a post file was removed, `false` if none existed.
    pub fn delete_post(&self, slug: &str) -> GazetteResult<bool> {
        validate_slug(slug)?;
        let path = self.post_path(slug);
        if !path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&path)?;
        Ok(true)
    }

    fn post_path(&self, slug: &str) -> PathBuf {
        self.posts_dir().join(format!("{slug}.json"))
    }

    // === Uploads ===

    /// Store an uploaded file and write its sidecar metadata
    pub fn save_upload(
        &self,
        filename: &str,
        original_name: &str,
        mime_type: &str,
        bytes: &[u8],
    ) -> GazetteResult<UploadMetadata> {
        validate_file_name(filename)?;

        let uploads_dir = self.uploads_dir();
        std::fs::create_dir_all(&uploads_dir)?;
        fs::write_atomic(&uploads_dir.join(filename), bytes)?;

        let metadata = UploadMetadata {
            filename: filename.to_string(),
            original_name: original_name.to_string(),
            size: bytes.len() as u64,
            mime_type: mime_type.to_string(),
            uploaded_at: Utc::now(),
        };
        fs::write_json(&uploads_dir.join(format!("{filename}.json")), &metadata)?;
        Ok(metadata)
    }

    /// List upload metadata, newest first
    pub fn list_uploads(&self) -> GazetteResult<Vec<UploadMetadata>> {
        let uploads_dir = self.uploads_dir();
        if !uploads_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut uploads = Vec::new();
        for entry in std::fs::read_dir(&uploads_dir)? {
            let path = entry?.path();
            if path.extension().map(|e| e == "json").unwrap_or(false) {
                if let Ok(metadata) = fs::read_json::<UploadMetadata>(&path) {
                    uploads.push(metadata);
                }
            }
        }

        uploads.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        Ok(uploads)
    }
}

/// Check that a slug is safe to use as a file stem
fn validate_slug(slug: &str) -> GazetteResult<()> {
    let valid = !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if valid {
        Ok(())
    } else {
        Err(GazetteError::InvalidSlug {
            slug: slug.to_string(),
        })
    }
}

/// Check that an upload file name cannot escape the uploads directory
fn validate_file_name(name: &str) -> GazetteResult<()> {
    let valid = !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '\\'])
        && !name.contains("..");
    if valid {
        Ok(())
    } else {
        Err(GazetteError::InvalidFileName {
            name: name.to_string(),
        })
    }
}
