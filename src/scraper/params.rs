//! Parameter-space construction.
//!
//! The crawl visits the full cross-product of the season type, group,
//! and year menus. One combination is the unit of work for one crawl
//! pass and one output record.

use serde::Serialize;

use crate::scraper::parsers::menu::FilterMenus;

/// One concrete selection of filter values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ParamCombination {
    pub season_type: String,
    pub group: String,
    pub year: String,
}

impl ParamCombination {
    /// Query parameters for fetching this combination at `page`.
    pub fn query(&self, page: usize) -> Vec<(String, String)> {
        vec![
            ("season_type".to_string(), self.season_type.clone()),
            ("group".to_string(), self.group.clone()),
            ("year".to_string(), self.year.clone()),
            ("page".to_string(), page.to_string()),
        ]
    }

    /// Stable record name: the selected values joined with underscores
    /// in dimension order.
    pub fn record_name(&self) -> String {
        format!("{}_{}_{}", self.season_type, self.group, self.year)
    }
}

/// Cross-product of the three crawled dimensions, year varying fastest
/// and season type slowest. Franchise is observed during discovery but
/// never enters the product.
pub fn build_combinations(menus: &FilterMenus) -> Vec<ParamCombination> {
    let mut combinations =
        Vec::with_capacity(menus.season_types.len() * menus.groups.len() * menus.years.len());

    for season_type in &menus.season_types {
        for group in &menus.groups {
            for year in &menus.years {
                combinations.push(ParamCombination {
                    season_type: season_type.clone(),
                    group: group.clone(),
                    year: year.clone(),
                });
            }
        }
    }

    combinations
}
