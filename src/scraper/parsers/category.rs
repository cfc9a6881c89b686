//! Parsers for the legacy single-category stats pages.
//!
//! The older pages carry no filter form: column headers come from the
//! table's `th` cells and pagination follows "next page" / "last page"
//! links recognized by their `title` attributes. Cells carry no column
//! key, so rows are folded positionally against the discovered headers.

use regex::Regex;
use scraper::{Html, Selector};

use crate::record::ColumnRecord;

/// The stat category a legacy crawl is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatCategory {
    Season,
    Alltime,
    Team,
}

impl StatCategory {
    /// Parse a user-supplied choice: single letter or full word.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "s" | "season" => Some(Self::Season),
            "a" | "alltime" => Some(Self::Alltime),
            "t" | "team" => Some(Self::Team),
            _ => None,
        }
    }

    /// Endpoint path segment under the stats root.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Season => "season",
            Self::Alltime => "alltime",
            Self::Team => "team",
        }
    }
}

/// One parsed legacy page.
#[derive(Debug, Default)]
pub struct CategoryPage {
    /// Column headers, present on every page; the first page's set is
    /// the authoritative one.
    pub headers: Vec<String>,
    /// All data-cell texts in document order.
    pub values: Vec<String>,
    /// Pager target for the next page, when one exists.
    pub next_page: Option<String>,
    /// Pager target for the last page, when one exists.
    pub last_page: Option<String>,
}

impl CategoryPage {
    /// Number of pages advertised by the last-page link. The target is
    /// a zero-based index, so the count is one more.
    pub fn page_count(&self) -> Option<usize> {
        let page_re = Regex::new(r"page=(\d+)").unwrap();
        let href = self.last_page.as_deref()?;
        let caps = page_re.captures(href)?;
        caps[1].parse::<usize>().ok().map(|last| last + 1)
    }
}

/// Parser for legacy category pages
pub struct CategoryPageParser;

impl CategoryPageParser {
    pub fn parse(html: &str) -> CategoryPage {
        let document = Html::parse_document(html);

        CategoryPage {
            headers: Self::parse_headers(&document),
            values: Self::parse_values(&document),
            next_page: Self::pager_link(&document, "Go to next page"),
            last_page: Self::pager_link(&document, "Go to last page"),
        }
    }

    /// Header names from `th` cells: the `title` attribute when it is
    /// non-empty, the cell text otherwise, with spaces stripped.
    fn parse_headers(document: &Html) -> Vec<String> {
        let header_selector = Selector::parse("th").unwrap();

        document
            .select(&header_selector)
            .map(|th| {
                let name = match th.value().attr("title") {
                    Some(title) if !title.is_empty() => title.to_string(),
                    _ => th.text().collect::<String>(),
                };
                name.replace(' ', "")
            })
            .collect()
    }

    fn parse_values(document: &Html) -> Vec<String> {
        let cell_selector = Selector::parse("td").unwrap();

        document
            .select(&cell_selector)
            .map(|td| td.text().collect::<String>().trim().to_string())
            .collect()
    }

    fn pager_link(document: &Html, title: &str) -> Option<String> {
        let anchor_selector = Selector::parse("a[title]").unwrap();

        document
            .select(&anchor_selector)
            .find(|a| a.value().attr("title") == Some(title))
            .and_then(|a| a.value().attr("href"))
            .map(str::to_string)
    }
}

/// Fold one page's cell texts into the record, positionally keyed by
/// the headers. A trailing incomplete chunk is dropped rather than
/// misaligned.
pub fn fold_positional(record: &mut ColumnRecord, headers: &[String], values: &[String]) {
    if headers.is_empty() {
        return;
    }

    for chunk in values.chunks(headers.len()) {
        if chunk.len() < headers.len() {
            break;
        }
        for (key, value) in headers.iter().zip(chunk) {
            record.append(key, Some(value.clone()));
        }
    }
}
