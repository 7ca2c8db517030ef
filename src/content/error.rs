//! Content errors

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Why a single post file could not be turned into a post
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The file could not be opened or is not valid UTF-8
    #[error("cannot read file: {0}")]
    Read(#[from] io::Error),

    /// The front-matter header is not a valid YAML mapping
    #[error("invalid front-matter: {0}")]
    FrontMatter(#[from] serde_yaml::Error),
}

/// Errors returned by the [`ContentLoader`](super::ContentLoader)
#[derive(Debug, Error)]
pub enum ContentError {
    /// No post file maps to the requested slug
    #[error("post not found: {slug}")]
    NotFound { slug: String },

    /// A post file exists but cannot be parsed
    #[error("malformed post {slug:?} ({}): {source}", .path.display())]
    MalformedDocument {
        slug: String,
        path: PathBuf,
        #[source]
        source: DocumentError,
    },

    /// The posts directory exists but cannot be enumerated
    #[error("cannot read posts directory {}: {source}", .path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

impl ContentError {
    /// Whether the presentation layer should show a "not found" page
    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentError::NotFound { .. })
    }

    /// The slug this error refers to, if any
    pub fn slug(&self) -> Option<&str> {
        match self {
            ContentError::NotFound { slug } | ContentError::MalformedDocument { slug, .. } => {
                Some(slug)
            }
            ContentError::Storage { .. } => None,
        }
    }
}
