//! Post models

use serde::Serialize;

use super::FrontMatter;

/// Title used when a post has none
pub const DEFAULT_TITLE: &str = "Untitled";

/// Listing view of a post, built from its front-matter alone
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    /// File stem of the source file; unique within the posts directory
    pub slug: String,

    /// Display title
    pub title: String,

    /// Publication date as written, compared lexically
    pub date: String,

    /// Short description for listings
    pub excerpt: String,

    /// Post tags in source order
    pub tags: Vec<String>,
}

impl PostSummary {
    /// Build a summary, filling every missing field with its default.
    ///
    /// This is the only place defaults are applied, so listings and
    /// single-post views always agree.
    pub fn from_front_matter(slug: &str, fm: FrontMatter, default_title: &str) -> Self {
        Self {
            slug: slug.to_string(),
            title: fm.title.unwrap_or_else(|| default_title.to_string()),
            date: fm.date.unwrap_or_default(),
            excerpt: fm.excerpt.unwrap_or_default(),
            tags: fm.tags,
        }
    }
}

/// A post with its rendered body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(flatten)]
    pub summary: PostSummary,

    /// Markdown body rendered to an HTML fragment
    pub body_html: String,
}

impl Post {
    pub fn title(&self) -> &str {
        &self.summary.title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let summary = PostSummary::from_front_matter("bare", FrontMatter::default(), DEFAULT_TITLE);
        assert_eq!(summary.slug, "bare");
        assert_eq!(summary.title, "Untitled");
        assert_eq!(summary.date, "");
        assert_eq!(summary.excerpt, "");
        assert!(summary.tags.is_empty());
    }

    #[test]
    fn test_present_fields_kept() {
        let fm = FrontMatter {
            title: Some(String::new()),
            date: Some("2025-01-01".to_string()),
            excerpt: Some("intro".to_string()),
            tags: vec!["go".to_string()],
        };
        let summary = PostSummary::from_front_matter("hello", fm, "Placeholder");
        // An explicit empty title is not replaced
        assert_eq!(summary.title, "");
        assert_eq!(summary.date, "2025-01-01");
        assert_eq!(summary.excerpt, "intro");
        assert_eq!(summary.tags, vec!["go"]);
    }

    #[test]
    fn test_post_serializes_camel_case() {
        let post = Post {
            summary: PostSummary::from_front_matter("a", FrontMatter::default(), DEFAULT_TITLE),
            body_html: "<p>x</p>\n".to_string(),
        };
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["slug"], "a");
        assert_eq!(json["title"], "Untitled");
        assert_eq!(json["tags"], serde_json::json!([]));
        assert_eq!(json["bodyHtml"], "<p>x</p>\n");
    }
}
