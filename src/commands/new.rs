//! Create a new post

use anyhow::Result;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use crate::Folio;

/// Front-matter written into a new post
#[derive(Serialize)]
struct Scaffold<'a> {
    title: &'a str,
    date: String,
    excerpt: &'a str,
    tags: Vec<String>,
}

/// Create a new post file and return its path
pub fn create_post(folio: &Folio, title: &str, slug: Option<&str>) -> Result<PathBuf> {
    let now = chrono::Local::now();

    let slug = match slug {
        Some(s) => s.to_string(),
        None => slug::slugify(title),
    };
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a slug from title {:?}; pass --slug", title);
    }

    let mut filename = folio
        .config
        .new_post_name
        .replace(":title", &slug)
        .replace(":year", &now.format("%Y").to_string())
        .replace(":month", &now.format("%m").to_string())
        .replace(":day", &now.format("%d").to_string());
    if !filename.ends_with(".md") {
        filename.push_str(".md");
    }
    if filename.starts_with('.') || filename.contains(['/', '\\']) {
        anyhow::bail!("Invalid post file name: {:?}", filename);
    }

    fs::create_dir_all(&folio.posts_dir)?;
    let file_path = folio.posts_dir.join(&filename);

    // Check if file already exists
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let header = serde_yaml::to_string(&Scaffold {
        title,
        date: now.format("%Y-%m-%d").to_string(),
        excerpt: "",
        tags: Vec::new(),
    })?;
    fs::write(&file_path, format!("---\n{}---\n\n", header))?;

    tracing::debug!("Created post {:?}", file_path);

    Ok(file_path)
}

/// Run the new command
pub fn run(folio: &Folio, title: &str, slug: Option<&str>) -> Result<()> {
    let path = create_post(folio, title, slug)?;
    println!("Created: {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use tempfile::TempDir;

    fn site(dir: &TempDir) -> Folio {
        Folio::with_config(dir.path().to_path_buf(), SiteConfig::default())
    }

    #[test]
    fn test_create_post_is_loadable() {
        let dir = TempDir::new().unwrap();
        let folio = site(&dir);

        let path = create_post(&folio, "Hello: World!", None).unwrap();
        assert_eq!(path, folio.posts_dir.join("hello-world.md"));

        let post = folio.loader().get_by_slug("hello-world").unwrap();
        assert_eq!(post.summary.title, "Hello: World!");
        assert_eq!(post.summary.date.len(), "2025-01-01".len());
        assert_eq!(post.summary.excerpt, "");
        assert!(post.summary.tags.is_empty());
        assert_eq!(post.body_html, "");
    }

    #[test]
    fn test_create_post_with_slug_and_pattern() {
        let dir = TempDir::new().unwrap();
        let config = SiteConfig {
            new_post_name: ":year-:title".to_string(),
            ..Default::default()
        };
        let folio = Folio::with_config(dir.path().to_path_buf(), config);

        let path = create_post(&folio, "Anything", Some("custom")).unwrap();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.ends_with("-custom.md"), "{name}");
    }

    #[test]
    fn test_create_post_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let folio = site(&dir);

        create_post(&folio, "Twice", None).unwrap();
        assert!(create_post(&folio, "Twice", None).is_err());
    }

    #[test]
    fn test_create_post_needs_a_slug() {
        let dir = TempDir::new().unwrap();
        assert!(create_post(&site(&dir), "!!!", None).is_err());
        assert!(create_post(&site(&dir), "x", Some("../escape")).is_err());
    }
}
