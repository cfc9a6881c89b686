//! Column-major record accumulation.
//!
//! One `ColumnRecord` is built per parameter combination: every table
//! column becomes one ordered sequence of cell values, appended to as
//! pages are folded in. The `Player` column is a virtual composite that
//! fans out into `Profile` (nullable link target) and `Name` (display
//! text) instead of being stored verbatim.

use indexmap::IndexMap;
use serde::Serialize;

/// A single appended value. `None` marks a genuinely absent profile
/// link and serializes as JSON `null`.
pub type CellValue = Option<String>;

/// One parsed table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// A `Player` cell: profile link target (if any) plus display name.
    Player {
        profile: Option<String>,
        name: String,
    },
    /// Any other cell, keyed by its declared column title.
    Plain { key: String, value: String },
}

/// Column key the `Player` composite fans its link target out to.
pub const PROFILE_KEY: &str = "Profile";
/// Column key the `Player` composite fans its display text out to.
pub const NAME_KEY: &str = "Name";

/// Column-keyed, append-only accumulation of table data.
///
/// Keys are kept in first-appearance order so that re-running the crawl
/// against unchanged documents yields byte-identical serialized output.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ColumnRecord {
    columns: IndexMap<String, Vec<CellValue>>,
}

impl ColumnRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one value to a column, creating the column on first use.
    pub fn append(&mut self, key: &str, value: CellValue) {
        self.columns
            .entry(key.to_string())
            .or_insert_with(Vec::new)
            .push(value);
    }

    /// Append one parsed cell, expanding the `Player` composite.
    pub fn push(&mut self, cell: &Cell) {
        match cell {
            Cell::Player { profile, name } => {
                self.append(PROFILE_KEY, profile.clone());
                self.append(NAME_KEY, Some(name.clone()));
            }
            Cell::Plain { key, value } => self.append(key, Some(value.clone())),
        }
    }

    /// Fold one page's worth of parsed rows into the record.
    pub fn fold_rows(&mut self, rows: &[Vec<Cell>]) {
        for row in rows {
            for cell in row {
                self.push(cell);
            }
        }
    }

    /// Sequence stored under a column key, if any.
    #[allow(dead_code)]
    pub fn column(&self, key: &str) -> Option<&[CellValue]> {
        self.columns.get(key).map(Vec::as_slice)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }
}
