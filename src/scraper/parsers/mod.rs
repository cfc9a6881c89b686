//! HTML parsers for the stats site's documents.

pub mod category;
pub mod menu;
pub mod stats_table;

pub use category::{CategoryPage, CategoryPageParser, StatCategory};
pub use menu::{FilterMenus, FranchiseOption, MenuParser};
pub use stats_table::{PageDelta, ParseWarning, StatsTableParser};
