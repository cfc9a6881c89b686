//! Stats table page parser.
//!
//! Each fetched page is parsed into an immutable [`PageDelta`]; the
//! crawler folds deltas into the combination's record. The parser holds
//! no state between pages.

use scraper::{ElementRef, Html, Selector};

use crate::record::Cell;

/// Cell content the site uses to mark the end of real data. The page
/// bound is shared across tables of very different sizes, so most
/// combinations hit this long before the bound.
pub const UNAVAILABLE_SENTINEL: &str = "Stats Unavailable";

/// Column key whose cells fan out into `Profile` and `Name`.
const PLAYER_KEY: &str = "Player";

/// Markup that parsed but looked wrong; surfaced to the caller rather
/// than silently discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// A player cell carried an anchor with no `href`.
    ProfileLinkMissingHref { name: String },
    /// A data cell carried no `data-title` column key.
    MissingColumnKey { row: usize, cell: usize },
}

/// Rows extracted from one page, plus whether the table signalled
/// exhaustion.
#[derive(Debug, Default)]
pub struct PageDelta {
    pub rows: Vec<Vec<Cell>>,
    /// Set when the sentinel was seen: this page contributed its rows
    /// so far and no later page of this combination has data.
    pub exhausted: bool,
    pub warnings: Vec<ParseWarning>,
}

/// Parser for one page of the filtered stats table
pub struct StatsTableParser;

impl StatsTableParser {
    /// Parse the data rows of one fetched page.
    ///
    /// Data rows are identified structurally (`tr[class]`), not by
    /// position. A sentinel cell discards the row it appears in and
    /// stops the page.
    pub fn parse(html: &str) -> PageDelta {
        let document = Html::parse_document(html);
        let row_selector = Selector::parse("tr[class]").unwrap();
        let cell_selector = Selector::parse("td").unwrap();

        let mut delta = PageDelta::default();

        'rows: for (row_idx, row) in document.select(&row_selector).enumerate() {
            let mut cells = Vec::new();

            for (cell_idx, cell) in row.select(&cell_selector).enumerate() {
                let text = cell.text().collect::<String>().trim().to_string();

                if text == UNAVAILABLE_SENTINEL {
                    // The partial row contributes nothing.
                    delta.exhausted = true;
                    break 'rows;
                }

                let Some(key) = cell.value().attr("data-title") else {
                    delta.warnings.push(ParseWarning::MissingColumnKey {
                        row: row_idx,
                        cell: cell_idx,
                    });
                    continue;
                };

                if key == PLAYER_KEY {
                    cells.push(Self::parse_player_cell(&cell, &text, &mut delta.warnings));
                } else {
                    cells.push(Cell::Plain {
                        key: key.to_string(),
                        value: text,
                    });
                }
            }

            if !cells.is_empty() {
                delta.rows.push(cells);
            }
        }

        delta
    }

    /// Split a player cell into profile link and display name.
    ///
    /// A cell with no anchor is a genuinely unlinked player (profile
    /// `None`); an anchor without an `href` is malformed markup and is
    /// reported as a warning alongside the `None`.
    fn parse_player_cell(
        cell: &ElementRef,
        cell_text: &str,
        warnings: &mut Vec<ParseWarning>,
    ) -> Cell {
        let anchor_selector = Selector::parse("a").unwrap();

        match cell.select(&anchor_selector).next() {
            Some(anchor) => {
                let name = anchor.text().collect::<String>().trim().to_string();
                let profile = match anchor.value().attr("href") {
                    Some(href) => Some(href.to_string()),
                    None => {
                        warnings.push(ParseWarning::ProfileLinkMissingHref { name: name.clone() });
                        None
                    }
                };
                Cell::Player { profile, name }
            }
            None => Cell::Player {
                profile: None,
                name: cell_text.to_string(),
            },
        }
    }
}
