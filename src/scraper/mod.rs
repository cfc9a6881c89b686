//! Scraping layer for the stats site.
//!
//! Provides root-menu discovery, parameter-space construction, and the
//! per-page table parsers for both the combinatorial crawl and the
//! legacy single-category variant.

pub mod params;
pub mod parsers;

use url::Url;

use crate::error::ScrapeError;

/// Resolve a pager href (absolute or site-relative) against a base URL.
pub fn resolve_href(base: &str, href: &str) -> Result<String, ScrapeError> {
    let base = Url::parse(base)
        .map_err(|e| ScrapeError::mismatch(format!("invalid base url '{base}': {e}")))?;
    let resolved = base
        .join(href)
        .map_err(|e| ScrapeError::mismatch(format!("unresolvable pager href '{href}': {e}")))?;
    Ok(resolved.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_site_relative_href() {
        let url = resolve_href("http://www.mlssoccer.com/stats/season", "/stats/season?page=1")
            .unwrap();
        assert_eq!(url, "http://www.mlssoccer.com/stats/season?page=1");
    }

    #[test]
    fn test_resolve_absolute_href_passes_through() {
        let url = resolve_href(
            "http://www.mlssoccer.com/stats/season",
            "http://example.com/stats?page=2",
        )
        .unwrap();
        assert_eq!(url, "http://example.com/stats?page=2");
    }

    #[test]
    fn test_resolve_bad_base_is_mismatch() {
        let err = resolve_href("not a url", "/stats?page=1").unwrap_err();
        assert!(matches!(err, ScrapeError::StructuralMismatch(_)));
    }
}
