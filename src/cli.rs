//! CLI commands for mls-scraper.
//!
//! Supports the full combinatorial crawl and the legacy single-category
//! scrape.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::crawler::{crawl_category, Crawler};
use crate::fetch::HttpFetcher;
use crate::scraper::parsers::StatCategory;
use crate::sink::RecordSink;

/// Interactive category prompt gives up after this many bad inputs.
const CATEGORY_PROMPT_ATTEMPTS: usize = 3;

#[derive(Parser)]
#[command(name = "mls-scraper")]
#[command(version, about = "Crawler for paginated, form-filtered stats tables", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Crawl every combination of the stats form's filter menus
    Crawl {
        /// Root URL of the stats site
        #[arg(long)]
        root_url: Option<String>,

        /// Endpoint under the root URL
        #[arg(long)]
        endpoint: Option<String>,

        /// Output directory for record files
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Scrape a single stat category the legacy way
    Category {
        /// Category to scrape (season, alltime, team); prompted for
        /// interactively when omitted
        #[arg(value_name = "CATEGORY")]
        category: Option<String>,

        /// Root URL of the stats site
        #[arg(long)]
        root_url: Option<String>,

        /// Output directory for record files
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Run the full combinatorial crawl.
pub async fn run_crawl(
    root_url: Option<String>,
    endpoint: Option<String>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut config = AppConfig::load()?;

    // Override with CLI args
    if let Some(url) = root_url {
        config.source.root_url = url;
    }
    if let Some(endpoint) = endpoint {
        config.source.endpoint = endpoint;
    }
    if let Some(dir) = output {
        config.output.dir = dir.to_string_lossy().to_string();
    }

    let fetcher = HttpFetcher::new(&config.source.user_agent, config.source.timeout_seconds)?;
    let sink = RecordSink::new(&config.output.dir);
    let crawler = Crawler::new(
        &fetcher,
        &sink,
        config.source.stats_url(),
        config.crawl.retry(),
    );

    let summary = crawler.run().await?;
    eprintln!(
        "{} records written, {} combinations skipped",
        summary.records_written, summary.combinations_skipped
    );

    Ok(())
}

/// Run the legacy single-category scrape.
pub async fn run_category(
    category: Option<String>,
    root_url: Option<String>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut config = AppConfig::load()?;

    if let Some(url) = root_url {
        config.source.root_url = url;
    }
    if let Some(dir) = output {
        config.output.dir = dir.to_string_lossy().to_string();
    }

    let category = match category {
        Some(choice) => StatCategory::parse(&choice)
            .ok_or_else(|| anyhow::anyhow!("unknown category '{choice}'"))?,
        None => {
            let stdin = std::io::stdin();
            prompt_category(&mut stdin.lock(), &mut std::io::stderr())?
        }
    };

    let fetcher = HttpFetcher::new(&config.source.user_agent, config.source.timeout_seconds)?;
    let record = crawl_category(
        &fetcher,
        &config.source.category_url(category.endpoint()),
        &config.crawl.retry(),
    )
    .await?;

    let sink = RecordSink::new(&config.output.dir);
    let path = sink.store(category.endpoint(), &record)?;
    eprintln!("record written to {}", path.display());

    Ok(())
}

/// Ask for a category until a valid choice arrives, bounded by
/// [`CATEGORY_PROMPT_ATTEMPTS`].
fn prompt_category(
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> anyhow::Result<StatCategory> {
    for _ in 0..CATEGORY_PROMPT_ATTEMPTS {
        write!(
            output,
            "Choose the stat category: season(s)/alltime(a)/team(t)? "
        )?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        match StatCategory::parse(&line) {
            Some(category) => return Ok(category),
            None => writeln!(
                output,
                "'{}' is not valid. Enter 's', 'a', or 't'.",
                line.trim()
            )?,
        }
    }

    anyhow::bail!("no valid category chosen after {CATEGORY_PROMPT_ATTEMPTS} attempts")
}
