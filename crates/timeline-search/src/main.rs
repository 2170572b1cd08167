//! tsearch - search Twitter/X timelines from the command line.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use timeline_search::commands::{search_all, search_home, search_user};
use timeline_search::config::{ClientConfig, DEFAULT_HOST, DEFAULT_NUM_RESULTS, MAX_NUM_RESULTS};
use timeline_search::{HttpTimelineClient, OutputSink, Post, Presenter, RcFile};

/// tsearch - Search Twitter/X timelines.
#[derive(Parser)]
#[command(name = "tsearch")]
#[command(about = "Search Twitter/X posts and timelines")]
#[command(version)]
pub struct Cli {
    /// API host
    #[arg(long, global = true, env = "T_HOST", default_value = DEFAULT_HOST)]
    host: String,

    /// Use http instead of https
    #[arg(long, global = true)]
    no_ssl: bool,

    /// Credential profile file (defaults to ~/.trc)
    #[arg(short = 'P', long, global = true, env = "T_PROFILE")]
    profile: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Returns the most recent posts that match a query
    All {
        /// Search query
        query: String,

        /// Number of results to request
        #[arg(
            short,
            long,
            default_value_t = DEFAULT_NUM_RESULTS,
            value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_NUM_RESULTS))
        )]
        number: u32,

        /// Show oldest first
        #[arg(short, long)]
        reverse: bool,
    },

    /// Returns posts in your home timeline that match a query
    #[command(visible_alias = "tl")]
    Timeline {
        /// Pattern matched case-insensitively against post text
        query: String,
    },

    /// Returns posts in a user's timeline that match a query
    User {
        /// Screen name, with or without a leading @
        screen_name: String,

        /// Pattern matched case-insensitively against post text
        query: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("timeline_search=debug,tsearch=debug,info")
        } else {
            EnvFilter::new("timeline_search=warn,tsearch=warn")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = ClientConfig {
        host: cli.host,
        no_ssl: cli.no_ssl,
        profile: cli.profile,
    };
    let client = build_client(&config)?;

    let posts = match cli.command {
        Commands::All {
            query,
            number,
            reverse,
        } => search_all(&client, &query, Some(number), reverse)
            .await
            .context("Search failed")?,
        Commands::Timeline { query } => search_home(&client, &query)
            .await
            .context("Timeline search failed")?
            .into_posts(),
        Commands::User { screen_name, query } => search_user(&client, &screen_name, &query)
            .await
            .with_context(|| format!("Search of @{} failed", screen_name.trim_start_matches('@')))?
            .into_posts(),
    };

    present(&posts)
}

fn build_client(config: &ClientConfig) -> Result<HttpTimelineClient> {
    let path = config
        .profile_path()
        .context("Could not determine home directory for the credential profile")?;
    let rcfile = RcFile::load(&path)?;
    let credentials = rcfile.default_credentials()?;
    tracing::debug!(
        username = %credentials.username,
        base_url = %config.base_url(),
        "Loaded credentials"
    );

    HttpTimelineClient::new(config.base_url(), &credentials.token)
        .context("Failed to create HTTP client")
}

fn present(posts: &[Post]) -> Result<()> {
    let sink = OutputSink::detect();
    tracing::debug!(paged = sink.is_paged(), lines = posts.len(), "Writing results");

    let mut presenter = Presenter::new(sink);
    presenter.render(posts).context("Failed to write results")?;
    presenter
        .into_inner()
        .finish()
        .context("Failed to close output")?;

    Ok(())
}
