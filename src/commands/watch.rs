//! Watch the posts directory and rescan on change

use anyhow::Result;
use notify::{RecursiveMode, Watcher};
use notify_debouncer_mini::{new_debouncer, DebounceEventResult};
use std::time::Duration;

use crate::content::{ContentLoader, Listing};
use crate::Folio;

/// Quiet period before a burst of file events triggers a rescan
const DEBOUNCE: Duration = Duration::from_millis(300);

/// Rescan posts every time the posts directory changes, until Ctrl+C
pub async fn run(folio: &Folio) -> Result<()> {
    if !folio.posts_dir.is_dir() {
        anyhow::bail!("Posts directory does not exist: {:?}", folio.posts_dir);
    }

    let loader = folio.loader();
    rescan(&loader);

    let (tx, mut rx) = tokio::sync::mpsc::channel::<DebounceEventResult>(16);
    let mut debouncer = new_debouncer(DEBOUNCE, move |res: DebounceEventResult| {
        let _ = tx.blocking_send(res);
    })?;
    debouncer
        .watcher()
        .watch(&folio.posts_dir, RecursiveMode::NonRecursive)?;

    tracing::info!(
        "Watching {:?} for changes. Press Ctrl+C to stop.",
        folio.posts_dir
    );

    loop {
        tokio::select! {
            Some(res) = rx.recv() => match res {
                Ok(events) => {
                    tracing::info!("{} file(s) changed, rescanning...", events.len());
                    rescan(&loader);
                }
                Err(e) => tracing::error!("Watch error: {}", e),
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Stopped watching");
                break;
            }
            else => break,
        }
    }

    Ok(())
}

fn rescan(loader: &ContentLoader) {
    match loader.scan_summaries() {
        Ok(listing) => tracing::info!("{}", summarize(&listing)),
        Err(e) => tracing::error!("Scan failed: {}", e),
    }
}

/// One-line description of a scan
pub fn summarize(listing: &Listing) -> String {
    match listing.summaries.first() {
        Some(latest) => format!(
            "{} post(s), {} malformed, latest: {} ({})",
            listing.summaries.len(),
            listing.failures.len(),
            latest.title,
            latest.slug
        ),
        None => format!("no posts, {} malformed", listing.failures.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PostSummary;

    #[test]
    fn test_summarize() {
        assert_eq!(summarize(&Listing::default()), "no posts, 0 malformed");

        let listing = Listing {
            summaries: vec![PostSummary {
                slug: "newest".to_string(),
                title: "Newest".to_string(),
                date: "2025-03-01".to_string(),
                excerpt: String::new(),
                tags: Vec::new(),
            }],
            failures: Vec::new(),
        };
        assert_eq!(
            summarize(&listing),
            "1 post(s), 0 malformed, latest: Newest (newest)"
        );
    }
}
