//! mls-scraper
//!
//! Crawls a paginated, form-filtered stats site and materializes every
//! filter combination into a column-major JSON record on disk.

mod cli;
mod config;
mod crawler;
mod error;
mod fetch;
mod record;
mod retry;
mod scraper;
mod sink;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mls_scraper=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Crawl {
            root_url,
            endpoint,
            output,
        } => cli::run_crawl(root_url, endpoint, output).await,
        Commands::Category {
            category,
            root_url,
            output,
        } => cli::run_category(category, root_url, output).await,
    }
}
