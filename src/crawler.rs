//! Combinatorial paginated crawl engine.
//!
//! One root scrape discovers the filter menus and the shared page
//! bound; every combination of the season type, group, and year menus
//! is then crawled page by page, strictly sequentially, and folded into
//! one column-major record handed to the sink.

use tracing::{debug, info, warn};

use crate::error::ScrapeError;
use crate::fetch::PageFetcher;
use crate::record::ColumnRecord;
use crate::retry::{fetch_with_retry, RetryConfig};
use crate::scraper::params::{build_combinations, ParamCombination};
use crate::scraper::parsers::category::{fold_positional, CategoryPageParser};
use crate::scraper::parsers::menu::MenuParser;
use crate::scraper::parsers::stats_table::StatsTableParser;
use crate::scraper::resolve_href;
use crate::sink::RecordSink;

/// Outcome of a full crawl run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CrawlSummary {
    pub records_written: usize,
    pub combinations_skipped: usize,
}

/// Driver for the combinatorial crawl.
pub struct Crawler<'a, F> {
    fetcher: &'a F,
    sink: &'a RecordSink,
    endpoint: String,
    retry: RetryConfig,
}

impl<'a, F: PageFetcher> Crawler<'a, F> {
    pub fn new(fetcher: &'a F, sink: &'a RecordSink, endpoint: String, retry: RetryConfig) -> Self {
        Self {
            fetcher,
            sink,
            endpoint,
            retry,
        }
    }

    /// Run the crawl: discover menus, enumerate combinations, store one
    /// record per combination.
    ///
    /// A structural mismatch on the root document or a failed record
    /// write aborts the run. A combination whose page fetches exhaust
    /// the retry budget is skipped and counted in the summary.
    pub async fn run(&self) -> Result<CrawlSummary, ScrapeError> {
        info!(endpoint = %self.endpoint, "scraping root document");
        let root_params = [("page".to_string(), "0".to_string())];
        let root =
            fetch_with_retry(&self.retry, self.fetcher, &self.endpoint, &root_params).await?;

        let menus = MenuParser::parse(&root)?;
        info!(
            season_types = menus.season_types.len(),
            groups = menus.groups.len(),
            years = menus.years.len(),
            franchises = menus.franchises.len(),
            page_bound = menus.page_bound,
            "discovered filter menus"
        );

        let combinations = build_combinations(&menus);
        let mut summary = CrawlSummary::default();

        if combinations.is_empty() {
            info!("empty parameter space, nothing to crawl");
            return Ok(summary);
        }

        for combination in &combinations {
            info!(
                season_type = %combination.season_type,
                group = %combination.group,
                year = %combination.year,
                "scraping combination"
            );

            match self.crawl_combination(combination, menus.page_bound).await {
                Ok(record) => {
                    let path = self.sink.store(&combination.record_name(), &record)?;
                    info!(path = %path.display(), "record written");
                    summary.records_written += 1;
                }
                Err(ScrapeError::Transport { url, reason }) => {
                    warn!(%url, %reason, "skipping combination after exhausting retries");
                    summary.combinations_skipped += 1;
                }
                Err(other) => return Err(other),
            }
        }

        info!(
            records = summary.records_written,
            skipped = summary.combinations_skipped,
            "crawl finished"
        );
        Ok(summary)
    }

    /// Crawl every page of one combination into a single record.
    ///
    /// The page bound is shared across all combinations; the per-page
    /// exhaustion signal cuts the loop short once the table's real data
    /// ends.
    async fn crawl_combination(
        &self,
        combination: &ParamCombination,
        page_bound: usize,
    ) -> Result<ColumnRecord, ScrapeError> {
        let mut record = ColumnRecord::new();

        for page in 0..page_bound {
            let params = combination.query(page);
            let html = fetch_with_retry(&self.retry, self.fetcher, &self.endpoint, &params).await?;

            let delta = StatsTableParser::parse(&html);
            for warning in &delta.warnings {
                warn!(page, ?warning, "parse warning");
            }
            debug!(page, rows = delta.rows.len(), "parsed page");

            record.fold_rows(&delta.rows);

            if delta.exhausted {
                debug!(page, "table reported no further data");
                break;
            }
        }

        debug!(columns = record.keys().count(), "combination folded");
        Ok(record)
    }
}

/// Crawl one legacy stat category: headers come from the first page's
/// `th` cells and pagination follows the "next page" link up to the
/// advertised last-page count.
pub async fn crawl_category<F: PageFetcher>(
    fetcher: &F,
    category_url: &str,
    retry: &RetryConfig,
) -> Result<ColumnRecord, ScrapeError> {
    info!(url = category_url, "scraping category");
    let first = fetch_with_retry(retry, fetcher, category_url, &[]).await?;
    let page = CategoryPageParser::parse(&first);

    if page.headers.is_empty() {
        return Err(ScrapeError::mismatch("no table headers on category page"));
    }

    let headers = page.headers.clone();
    let mut record = ColumnRecord::new();
    fold_positional(&mut record, &headers, &page.values);

    let page_count = page.page_count().unwrap_or(1);
    let mut next = page.next_page;

    for _ in 1..page_count {
        let Some(href) = next.take() else { break };
        let url = resolve_href(category_url, &href)?;
        debug!(url = %url, "following next-page link");

        let html = fetch_with_retry(retry, fetcher, &url, &[]).await?;
        let page = CategoryPageParser::parse(&html);
        fold_positional(&mut record, &headers, &page.values);
        next = page.next_page;
    }

    Ok(record)
}
