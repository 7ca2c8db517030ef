//! List site content

use anyhow::Result;
use indexmap::IndexMap;
use serde::Serialize;

use crate::content::PostSummary;
use crate::Folio;

/// A tag and how many posts use it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub name: String,
    pub count: usize,
}

/// Print every post slug, one per line
pub fn slugs(folio: &Folio, json: bool) -> Result<()> {
    let slugs = folio.loader().list_slugs()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&slugs)?);
    } else {
        for slug in slugs {
            println!("{}", slug);
        }
    }
    Ok(())
}

/// List site content by type
pub fn run(folio: &Folio, content_type: &str, json: bool) -> Result<()> {
    let loader = folio.loader();

    match content_type {
        "post" | "posts" => {
            let posts = loader.list_summaries()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&posts)?);
            } else {
                print!("{}", format_posts(&posts));
            }
        }
        "tag" | "tags" => {
            let tags = tag_counts(&loader.list_summaries()?);
            if json {
                println!("{}", serde_json::to_string_pretty(&tags)?);
            } else {
                println!("Tags ({}):", tags.len());
                for tag in tags {
                    println!("  {} ({})", tag.name, tag.count);
                }
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: post, tag", content_type);
        }
    }

    Ok(())
}

/// Text listing of posts, in the order given
pub fn format_posts(posts: &[PostSummary]) -> String {
    let mut out = format!("Posts ({}):\n", posts.len());
    for post in posts {
        let date = if post.date.is_empty() {
            "undated"
        } else {
            &post.date
        };
        out.push_str(&format!("  {} - {} [{}]\n", date, post.title, post.slug));
    }
    out
}

/// Count posts per tag, most used first; ties keep first-seen order
pub fn tag_counts(posts: &[PostSummary]) -> Vec<TagCount> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for post in posts {
        for tag in &post.tags {
            *counts.entry(tag.as_str()).or_insert(0) += 1;
        }
    }

    let mut tags: Vec<_> = counts
        .into_iter()
        .map(|(name, count)| TagCount {
            name: name.to_string(),
            count,
        })
        .collect();
    tags.sort_by(|a, b| b.count.cmp(&a.count));
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(slug: &str, date: &str, tags: &[&str]) -> PostSummary {
        PostSummary {
            slug: slug.to_string(),
            title: slug.to_uppercase(),
            date: date.to_string(),
            excerpt: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_tag_counts() {
        let posts = vec![
            summary("a", "2025-01-03", &["rust", "web"]),
            summary("b", "2025-01-02", &["go", "web"]),
            summary("c", "2025-01-01", &["rust", "web"]),
        ];

        let tags = tag_counts(&posts);
        let names: Vec<_> = tags.iter().map(|t| (t.name.as_str(), t.count)).collect();
        assert_eq!(names, vec![("web", 3), ("rust", 2), ("go", 1)]);
    }

    #[test]
    fn test_format_posts() {
        let posts = vec![summary("hello", "2025-01-01", &[]), summary("draft", "", &[])];
        assert_eq!(
            format_posts(&posts),
            "Posts (2):\n  2025-01-01 - HELLO [hello]\n  undated - DRAFT [draft]\n"
        );
    }
}
