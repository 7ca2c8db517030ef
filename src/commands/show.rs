//! Show a single post

use anyhow::Result;

use crate::content::Post;
use crate::Folio;

/// Print one post with its rendered HTML
pub fn run(folio: &Folio, slug: &str, json: bool) -> Result<()> {
    let post = folio.loader().get_by_slug(slug)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&post)?);
    } else {
        print!("{}", format_post(folio, &post));
    }

    Ok(())
}

/// Text view of a post: page title, metadata, then the HTML body
pub fn format_post(folio: &Folio, post: &Post) -> String {
    let summary = &post.summary;
    let mut out = format!("{}\n", folio.page_title(post.title()));
    if !summary.date.is_empty() {
        out.push_str(&format!("Date: {}\n", summary.date));
    }
    if !summary.tags.is_empty() {
        out.push_str(&format!("Tags: {}\n", summary.tags.join(", ")));
    }
    if !summary.excerpt.is_empty() {
        out.push_str(&format!("Excerpt: {}\n", summary.excerpt));
    }
    out.push('\n');
    out.push_str(&post.body_html);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::PostSummary;
    use std::path::PathBuf;

    #[test]
    fn test_format_post() {
        let config = SiteConfig {
            author: "Jane Doe".to_string(),
            ..Default::default()
        };
        let folio = Folio::with_config(PathBuf::from("."), config);
        let post = Post {
            summary: PostSummary {
                slug: "hello".to_string(),
                title: "Hello".to_string(),
                date: "2025-01-01".to_string(),
                excerpt: String::new(),
                tags: vec!["go".to_string(), "testing".to_string()],
            },
            body_html: "<p>Hi</p>\n".to_string(),
        };

        assert_eq!(
            format_post(&folio, &post),
            "Hello — Jane Doe\nDate: 2025-01-01\nTags: go, testing\n\n<p>Hi</p>\n"
        );
    }
}
