//! Root-document menu discovery.
//!
//! The root stats page carries the filter form (`select` controls for
//! season type, group, year, and franchise) and a pager whose
//! "last page" link fixes the shared page bound for every combination.

use regex::Regex;
use scraper::{Html, Selector};

use crate::error::ScrapeError;

/// Placeholder option value meaning "no selection".
const PLACEHOLDER_OPTION: &str = "select";

/// A franchise menu option: raw form value plus display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FranchiseOption {
    pub value: String,
    pub label: String,
}

/// Everything discovered from the root document.
///
/// Built once at crawl start and never mutated. The franchise menu is
/// observed here but never enters the parameter cross-product.
#[derive(Debug, Clone, Default)]
pub struct FilterMenus {
    pub season_types: Vec<String>,
    pub groups: Vec<String>,
    pub years: Vec<String>,
    pub franchises: Vec<FranchiseOption>,
    /// Exclusive upper bound on page indices: the pager's last-page
    /// target plus one, since pages are zero-indexed.
    pub page_bound: usize,
}

/// Parser for the root stats page
pub struct MenuParser;

impl MenuParser {
    /// Parse filter menus and page bound from the root document
    pub fn parse(html: &str) -> Result<FilterMenus, ScrapeError> {
        let document = Html::parse_document(html);

        let page_bound = Self::parse_page_bound(&document)?;

        let menu_selector = Selector::parse("select[name]").unwrap();
        let option_selector = Selector::parse("option").unwrap();

        let mut season_types: Option<Vec<String>> = None;
        let mut groups: Option<Vec<String>> = None;
        let mut years: Option<Vec<String>> = None;
        let mut franchises: Option<Vec<FranchiseOption>> = None;

        for menu in document.select(&menu_selector) {
            let name = menu.value().attr("name").unwrap_or_default();
            match name {
                "season_type" => season_types = Some(Self::option_values(&menu, &option_selector)),
                "group" => groups = Some(Self::option_values(&menu, &option_selector)),
                "year" => years = Some(Self::option_values(&menu, &option_selector)),
                "franchise" => {
                    franchises = Some(Self::franchise_options(&menu, &option_selector));
                }
                _ => {}
            }
        }

        Ok(FilterMenus {
            season_types: season_types
                .ok_or_else(|| ScrapeError::mismatch("season_type menu not found"))?,
            groups: groups.ok_or_else(|| ScrapeError::mismatch("group menu not found"))?,
            years: years.ok_or_else(|| ScrapeError::mismatch("year menu not found"))?,
            franchises: franchises
                .ok_or_else(|| ScrapeError::mismatch("franchise menu not found"))?,
            page_bound,
        })
    }

    /// Read the last-page pager target and add one.
    ///
    /// The href points at the last page that still has data, so the
    /// crawl must iterate `0..(target + 1)` to cover it.
    fn parse_page_bound(document: &Html) -> Result<usize, ScrapeError> {
        let pager_selector = Selector::parse(".pager-last a").unwrap();
        let page_re = Regex::new(r"page=(\d+)").unwrap();

        let anchor = document
            .select(&pager_selector)
            .next()
            .ok_or_else(|| ScrapeError::mismatch("last-page pager link not found"))?;

        let href = anchor
            .value()
            .attr("href")
            .ok_or_else(|| ScrapeError::mismatch("last-page pager link has no href"))?;

        let caps = page_re.captures(href).ok_or_else(|| {
            ScrapeError::mismatch(format!("no page parameter in pager href '{href}'"))
        })?;

        let last_index: usize = caps[1]
            .parse()
            .map_err(|_| ScrapeError::mismatch(format!("unparseable page index in '{href}'")))?;

        Ok(last_index + 1)
    }

    fn option_values(menu: &scraper::ElementRef, options: &Selector) -> Vec<String> {
        menu.select(options)
            .filter_map(|opt| opt.value().attr("value"))
            .filter(|value| *value != PLACEHOLDER_OPTION)
            .map(str::to_string)
            .collect()
    }

    fn franchise_options(menu: &scraper::ElementRef, options: &Selector) -> Vec<FranchiseOption> {
        menu.select(options)
            .filter_map(|opt| {
                let value = opt.value().attr("value")?;
                if value == PLACEHOLDER_OPTION {
                    return None;
                }
                Some(FranchiseOption {
                    value: value.to_string(),
                    label: opt.text().collect::<String>().trim().to_string(),
                })
            })
            .collect()
    }
}
