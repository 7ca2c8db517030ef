//! folio: markdown content for a personal portfolio and blog
//!
//! This crate reads a directory of markdown posts with YAML front-matter
//! and exposes them as summaries (for listing pages) and fully rendered
//! posts (for article pages). Page layout and routing belong to whatever
//! presentation layer consumes these values.

pub mod commands;
pub mod config;
pub mod content;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// A portfolio site rooted at a directory
#[derive(Debug, Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding the markdown posts
    pub posts_dir: PathBuf,
}

impl Folio {
    /// Create a new site from a directory, reading `_config.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a site from an already loaded configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let posts_dir = base_dir.join(&config.posts_dir);
        Self {
            config,
            base_dir,
            posts_dir,
        }
    }

    /// Build a content loader for this site's posts
    pub fn loader(&self) -> content::ContentLoader {
        content::ContentLoader::from_site(self)
    }

    /// Browser title for a post page, e.g. `Hello — Jane Doe`
    pub fn page_title(&self, post_title: &str) -> String {
        if self.config.author.is_empty() {
            post_title.to_string()
        } else {
            format!("{} — {}", post_title, self.config.author)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_config_file() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        assert_eq!(folio.posts_dir, dir.path().join("content/posts"));
        assert_eq!(folio.page_title("Hello"), "Hello");
    }

    #[test]
    fn test_config_file_sets_posts_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("_config.yml"),
            "author: Jane Doe\nposts_dir: writing\ndefault_title: No title\n",
        )
        .unwrap();
        fs::create_dir(dir.path().join("writing")).unwrap();
        fs::write(dir.path().join("writing/first.md"), "Hello\n").unwrap();

        let folio = Folio::new(dir.path()).unwrap();
        assert_eq!(folio.page_title("Hello"), "Hello — Jane Doe");

        let loader = folio.loader();
        assert_eq!(loader.posts_dir(), dir.path().join("writing"));
        let post = loader.get_by_slug("first").unwrap();
        assert_eq!(post.title(), "No title");
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("_config.yml"), "posts_dir: [oops\n").unwrap();
        assert!(Folio::new(dir.path()).is_err());
    }
}
