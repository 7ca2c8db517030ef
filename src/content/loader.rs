//! Content loader - loads posts from the posts directory
//!
//! Every post is a `<slug>.md` file directly inside the posts directory.
//! Nothing is cached: each call re-reads the directory and the files it
//! needs, so results always reflect what is on disk at call time.
//!
//! Listings are ordered newest first by comparing `date` as a plain string.
//! That ordering is only meaningful when every post writes its date in the
//! same sortable format, such as `YYYY-MM-DD`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{ContentError, DocumentError, FrontMatter, MarkdownRenderer, Post, PostSummary};
use crate::config::MarkdownConfig;
use crate::Folio;

/// Extension a file must have to be treated as a post
const POST_EXTENSION: &str = "md";

/// Settings for a [`ContentLoader`]
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    /// Title given to posts whose front-matter has none
    pub default_title: String,
    pub markdown: MarkdownConfig,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            default_title: super::DEFAULT_TITLE.to_string(),
            markdown: MarkdownConfig::default(),
        }
    }
}

/// Summaries from a scan that skips malformed posts
#[derive(Debug, Default)]
pub struct Listing {
    /// Parsed posts, newest first
    pub summaries: Vec<PostSummary>,
    /// One `MalformedDocument` error per skipped post, in file order
    pub failures: Vec<ContentError>,
}

impl Listing {
    /// The summaries, or the first failure if any post was skipped
    pub fn into_result(self) -> Result<Vec<PostSummary>, ContentError> {
        match self.failures.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(self.summaries),
        }
    }
}

/// Loads posts from a directory of markdown files
pub struct ContentLoader {
    posts_dir: PathBuf,
    default_title: String,
    renderer: MarkdownRenderer,
}

impl ContentLoader {
    /// Create a loader reading posts from `posts_dir`
    pub fn new<P: Into<PathBuf>>(posts_dir: P, options: LoaderOptions) -> Self {
        Self {
            posts_dir: posts_dir.into(),
            default_title: options.default_title,
            renderer: MarkdownRenderer::from_config(&options.markdown),
        }
    }

    /// Create a loader for a site's configured posts directory
    pub fn from_site(folio: &Folio) -> Self {
        let options = LoaderOptions {
            default_title: folio.config.default_title.clone(),
            markdown: folio.config.markdown.clone(),
        };
        Self::new(folio.posts_dir.clone(), options)
    }

    /// The directory posts are read from
    pub fn posts_dir(&self) -> &Path {
        &self.posts_dir
    }

    /// List the slug of every post, in file name order.
    ///
    /// A missing posts directory is not an error and yields no slugs.
    pub fn list_slugs(&self) -> Result<Vec<String>, ContentError> {
        Ok(self
            .post_files()?
            .into_iter()
            .map(|(slug, _)| slug)
            .collect())
    }

    /// List every post's summary, newest first.
    ///
    /// Fails with the first `MalformedDocument` if any post cannot be
    /// parsed. Every post is still attempted and each failure is logged;
    /// use [`scan_summaries`](Self::scan_summaries) to get the good posts
    /// along with the failures.
    pub fn list_summaries(&self) -> Result<Vec<PostSummary>, ContentError> {
        self.scan_summaries()?.into_result()
    }

    /// Summarize every post, setting malformed ones aside.
    ///
    /// Summaries are sorted by `date` descending; posts with equal dates
    /// keep file name order.
    pub fn scan_summaries(&self) -> Result<Listing, ContentError> {
        let mut listing = Listing::default();

        for (slug, path) in self.post_files()? {
            match self.load_summary(&slug, &path) {
                Ok(summary) => listing.summaries.push(summary),
                Err(e) => {
                    tracing::warn!("Failed to load post {:?}: {}", path, e);
                    listing.failures.push(e);
                }
            }
        }

        // Stable sort, so equal dates stay in file order
        listing.summaries.sort_by(|a, b| b.date.cmp(&a.date));

        tracing::debug!(
            "Scanned {:?}: {} posts, {} malformed",
            self.posts_dir,
            listing.summaries.len(),
            listing.failures.len()
        );

        Ok(listing)
    }

    /// Load a single post with its body rendered to HTML
    pub fn get_by_slug(&self, slug: &str) -> Result<Post, ContentError> {
        if !is_valid_slug(slug) {
            return Err(not_found(slug));
        }

        let path = self.posts_dir.join(format!("{}.{}", slug, POST_EXTENSION));
        if !path.is_file() {
            return Err(not_found(slug));
        }

        self.load_post(slug, &path)
    }

    /// Find post files as (slug, path) pairs, in file name order
    fn post_files(&self) -> Result<Vec<(String, PathBuf)>, ContentError> {
        if !self.posts_dir.is_dir() {
            tracing::debug!("Posts directory {:?} does not exist", self.posts_dir);
            return Ok(Vec::new());
        }

        let mut files = Vec::new();

        for entry in WalkDir::new(&self.posts_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|source| ContentError::Storage {
                path: self.posts_dir.clone(),
                source,
            })?;

            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            if let Some(slug) = slug_from_path(path) {
                files.push((slug, entry.into_path()));
            }
        }

        Ok(files)
    }

    /// Load a summary from the front-matter only; the body is not rendered
    fn load_summary(&self, slug: &str, path: &Path) -> Result<PostSummary, ContentError> {
        let content = fs::read_to_string(path).map_err(|e| malformed(slug, path, e))?;
        let (fm, _) = FrontMatter::parse(&content).map_err(|e| malformed(slug, path, e))?;
        Ok(PostSummary::from_front_matter(slug, fm, &self.default_title))
    }

    fn load_post(&self, slug: &str, path: &Path) -> Result<Post, ContentError> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            // Removed between the lookup and the read
            io::ErrorKind::NotFound => not_found(slug),
            _ => malformed(slug, path, e),
        })?;
        let (fm, body) = FrontMatter::parse(&content).map_err(|e| malformed(slug, path, e))?;

        tracing::debug!("Rendering post {:?}", path);

        Ok(Post {
            summary: PostSummary::from_front_matter(slug, fm, &self.default_title),
            body_html: self.renderer.render(body),
        })
    }
}

fn not_found(slug: &str) -> ContentError {
    ContentError::NotFound {
        slug: slug.to_string(),
    }
}

fn malformed(slug: &str, path: &Path, source: impl Into<DocumentError>) -> ContentError {
    ContentError::MalformedDocument {
        slug: slug.to_string(),
        path: path.to_path_buf(),
        source: source.into(),
    }
}

/// Derive a slug from a post file name (`hello-world.md` -> `hello-world`)
fn slug_from_path(path: &Path) -> Option<String> {
    if path.extension()? != POST_EXTENSION {
        return None;
    }

    match path.file_stem()?.to_str() {
        Some(stem) if is_valid_slug(stem) => Some(stem.to_string()),
        Some(_) => None,
        None => {
            tracing::warn!("Skipping post with non UTF-8 file name: {:?}", path);
            None
        }
    }
}

/// Slugs name a file directly inside the posts directory.
///
/// Listing and lookup share this rule, so every listed slug resolves.
fn is_valid_slug(slug: &str) -> bool {
    !matches!(slug, "" | "." | "..") && !slug.contains(['/', '\\', '\0'])
}
