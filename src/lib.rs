// Re-export modules
pub mod config;
pub mod crawlers;
pub mod error;
pub mod parsers;
pub mod results;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::ExtractorConfig;
pub use crawlers::{ExtractionRun, RunState};
pub use error::{ExtractError, Result};
pub use results::{ExtractionReport, PageLinks, ResultStore, StatsSummary};

use std::path::Path;

/// Main builder for a link extraction run
pub struct Extractor {
    input: String,
    config: ExtractorConfig,
}

impl Extractor {
    /// Create a new Extractor over the given text
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            config: ExtractorConfig::default(),
        }
    }

    /// Create a new Extractor over the contents of a text file
    ///
    /// Failing to read the file is fatal; nothing has been fetched yet.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let input = std::fs::read_to_string(path)?;
        Ok(Self::new(input))
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: ExtractorConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a JSON file
    pub fn with_config_file(self, path: impl AsRef<Path>) -> Result<Self> {
        let config = ExtractorConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    /// Load configuration from a JSON string
    pub fn with_config_str(self, config_str: &str) -> Result<Self> {
        let config = ExtractorConfig::from_json(config_str)?;
        Ok(self.with_config(config))
    }

    /// Set the maximum number of pending URLs
    pub fn with_max_queue_size(mut self, max_queue_size: usize) -> Self {
        self.config.max_queue_size = max_queue_size;
        self
    }

    /// Set the maximum number of concurrent fetches
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.config.max_concurrency = max_concurrency;
        self
    }

    /// Set the per-request timeout (0 disables it)
    pub fn with_fetch_timeout(mut self, timeout_seconds: u64) -> Self {
        self.config.fetch_timeout_secs = timeout_seconds;
        self
    }

    /// Set the scheme used to repair URLs that have none
    pub fn with_repair_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.config.repair_scheme = scheme.into();
        self
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Start the run and get a receiver for pages as they are fetched
    pub async fn start(self) -> Result<ExtractionRun> {
        crawlers::web::start(&self.config, self.input).await
    }

    /// Run to completion and return the collected links
    pub async fn run(self) -> Result<ExtractionReport> {
        crawlers::web::run(&self.config, self.input).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides() {
        let extractor = Extractor::new("a.com")
            .with_max_queue_size(10)
            .with_max_concurrency(3)
            .with_fetch_timeout(0)
            .with_repair_scheme("http");

        let config = extractor.config();
        assert_eq!(config.max_queue_size, 10);
        assert_eq!(config.max_concurrency, 3);
        assert_eq!(config.fetch_timeout(), None);
        assert_eq!(config.repair_scheme, "http");
    }

    #[test]
    fn test_builder_config_str() {
        let extractor = Extractor::new("")
            .with_config_str(r#"{"max_queue_size": 7}"#)
            .unwrap();
        assert_eq!(extractor.config().max_queue_size, 7);
        assert_eq!(extractor.config().max_concurrency, 5);
    }

    #[test]
    fn test_missing_input_file_is_fatal() {
        let result = Extractor::from_file("/definitely/not/here.txt");
        assert!(matches!(result, Err(ExtractError::Io(_))));
    }

    #[tokio::test]
    async fn test_run_without_urls() {
        let report = Extractor::new("nothing to see here.").run().await.unwrap();
        assert!(report.results.is_empty());
        assert_eq!(report.stats.candidates, 0);
    }
}
