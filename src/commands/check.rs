//! Check every post for front-matter errors

use anyhow::Result;
use serde::Serialize;

use crate::content::Listing;
use crate::Folio;

#[derive(Serialize)]
struct Failure {
    slug: Option<String>,
    error: String,
}

#[derive(Serialize)]
struct Report<'a> {
    ok: Vec<&'a str>,
    failures: Vec<Failure>,
}

/// Scan all posts, report the malformed ones and fail if there are any
pub fn run(folio: &Folio, json: bool) -> Result<()> {
    let listing = folio.loader().scan_summaries()?;

    if json {
        let report = Report {
            ok: listing.summaries.iter().map(|s| s.slug.as_str()).collect(),
            failures: listing
                .failures
                .iter()
                .map(|e| Failure {
                    slug: e.slug().map(str::to_string),
                    error: e.to_string(),
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", format_report(&listing));
    }

    if !listing.failures.is_empty() {
        anyhow::bail!("{} malformed post(s)", listing.failures.len());
    }

    Ok(())
}

/// Text report for a scan
pub fn format_report(listing: &Listing) -> String {
    let mut out = format!(
        "{} post(s) OK, {} malformed\n",
        listing.summaries.len(),
        listing.failures.len()
    );
    for failure in &listing.failures {
        out.push_str(&format!("  {}\n", failure));
    }
    out
}
