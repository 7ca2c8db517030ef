//! Content module - loads posts and renders their markdown

mod error;
mod frontmatter;
pub mod loader;
mod markdown;
mod post;

pub use error::{ContentError, DocumentError};
pub use frontmatter::FrontMatter;
pub use loader::{ContentLoader, Listing, LoaderOptions};
pub use markdown::MarkdownRenderer;
pub use post::{Post, PostSummary, DEFAULT_TITLE};
