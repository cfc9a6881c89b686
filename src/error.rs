//! Error taxonomy for the crawl.
//!
//! Three failure classes cover the run: the site layout no longer
//! matching our selectors, a page fetch failing, and the sink not
//! accepting a record. Structural and persistence failures are fatal;
//! transport failures are retried and may downgrade to a skipped
//! combination (see `crawler`).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Expected markup or form controls are absent from the page.
    /// The whole parameter space and page bound depend on the root
    /// document, so there is no partial recovery.
    #[error("unexpected page structure: {0}")]
    StructuralMismatch(String),

    /// A page fetch failed at the network or HTTP level.
    #[error("request for {url} failed: {reason}")]
    Transport { url: String, reason: String },

    /// The record sink could not write a finished record.
    #[error("could not write record '{name}'")]
    Persistence {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

impl ScrapeError {
    pub fn mismatch(detail: impl Into<String>) -> Self {
        Self::StructuralMismatch(detail.into())
    }

    pub fn transport(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::Transport {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}
