//! Configuration for the scraper.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::retry::RetryConfig;

/// Stats site source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_root_url")]
    pub root_url: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_root_url() -> String {
    "http://www.mlssoccer.com/stats".to_string()
}

fn default_endpoint() -> String {
    "season".to_string()
}

fn default_user_agent() -> String {
    "mls-scraper/0.1".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            root_url: default_root_url(),
            endpoint: default_endpoint(),
            user_agent: default_user_agent(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl SourceConfig {
    /// Full URL of the configured stats endpoint.
    pub fn stats_url(&self) -> String {
        format!("{}/{}", self.root_url.trim_end_matches('/'), self.endpoint)
    }

    /// Full URL for one of the legacy single-category endpoints.
    pub fn category_url(&self, category: &str) -> String {
        format!("{}/{}", self.root_url.trim_end_matches('/'), category)
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: String,
}

fn default_output_dir() -> String {
    "data".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

/// Crawl tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlConfig {
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

fn default_max_retries() -> u32 {
    3
}

fn default_initial_delay_ms() -> u64 {
    500
}

fn default_max_delay_ms() -> u64 {
    30_000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

impl CrawlConfig {
    pub fn retry(&self) -> RetryConfig {
        RetryConfig {
            max_retries: self.max_retries,
            initial_delay: Duration::from_millis(self.initial_delay_ms),
            max_delay: Duration::from_millis(self.max_delay_ms),
            multiplier: self.backoff_multiplier,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub crawl: CrawlConfig,
}

impl AppConfig {
    /// Load configuration from environment and config file
    pub fn load() -> anyhow::Result<Self> {
        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Add config file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables (MLS_SOURCE_ROOT_URL, etc.)
            .add_source(
                config::Environment::with_prefix("MLS")
                    .separator("_")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_url_joins_endpoint() {
        let source = SourceConfig::default();
        assert_eq!(source.stats_url(), "http://www.mlssoccer.com/stats/season");
    }

    #[test]
    fn test_stats_url_tolerates_trailing_slash() {
        let source = SourceConfig {
            root_url: "http://www.mlssoccer.com/stats/".to_string(),
            ..Default::default()
        };
        assert_eq!(source.stats_url(), "http://www.mlssoccer.com/stats/season");
    }

    #[test]
    fn test_retry_config_mapping() {
        let crawl = CrawlConfig {
            max_retries: 5,
            initial_delay_ms: 100,
            max_delay_ms: 2_000,
            backoff_multiplier: 3.0,
        };
        let retry = crawl.retry();

        assert_eq!(retry.max_retries, 5);
        assert_eq!(retry.initial_delay, Duration::from_millis(100));
        assert_eq!(retry.max_delay, Duration::from_secs(2));
        assert_eq!(retry.multiplier, 3.0);
    }
}
