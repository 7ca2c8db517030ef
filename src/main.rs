//! CLI entry point for folio

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Markdown content loader for a portfolio blog", long_about = None)]
struct Cli {
    /// Set the site directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the slug of every post
    Slugs,

    /// List posts (newest first) or tags
    List {
        /// Type of content to list (post, tag)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Show a single post with its rendered HTML
    Show {
        /// Slug of the post (its file name without `.md`)
        slug: String,
    },

    /// Report posts whose front-matter cannot be parsed
    Check,

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Slug to use instead of one derived from the title
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// Rescan posts whenever the posts directory changes
    #[command(alias = "w")]
    Watch,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio=debug,info"
    } else {
        "folio=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    if let Commands::Version = cli.command {
        println!("folio version {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let folio = folio::Folio::new(&base_dir)?;
    tracing::debug!("Reading posts from {:?}", folio.posts_dir);

    match cli.command {
        Commands::Slugs => folio::commands::list::slugs(&folio, cli.json)?,

        Commands::List { r#type } => folio::commands::list::run(&folio, &r#type, cli.json)?,

        Commands::Show { slug } => folio::commands::show::run(&folio, &slug, cli.json)?,

        Commands::Check => folio::commands::check::run(&folio, cli.json)?,

        Commands::New { title, slug } => {
            tracing::info!("Creating new post with title: {}", title);
            folio::commands::new::run(&folio, &title, slug.as_deref())?;
        }

        Commands::Watch => folio::commands::watch::run(&folio).await?,

        Commands::Version => {}
    }

    Ok(())
}
