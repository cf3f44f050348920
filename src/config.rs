use crate::error::{ExtractError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

/// Configuration for a link extraction run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Maximum number of pending URLs; the oldest are evicted beyond this
    #[serde(default = "default_max_queue_size")]
    pub max_queue_size: usize,

    /// Maximum number of consumer tasks fetching at the same time
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Per-request timeout in seconds (0 disables the timeout)
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Scheme prepended when a URL is rejected for lacking one
    #[serde(default = "default_repair_scheme")]
    pub repair_scheme: String,

    /// Optional User-Agent header sent with every request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Capacity of the channel streaming pages to the caller
    #[serde(default = "default_result_buffer")]
    pub result_buffer: usize,
}

/// Default value for max_queue_size
fn default_max_queue_size() -> usize {
    50
}

/// Default value for max_concurrency
fn default_max_concurrency() -> usize {
    5
}

/// Default value for fetch_timeout_secs
fn default_fetch_timeout_secs() -> u64 {
    30
}

/// Default value for repair_scheme
fn default_repair_scheme() -> String {
    "https".to_string()
}

/// Default value for result_buffer
fn default_result_buffer() -> usize {
    1024
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_queue_size: default_max_queue_size(),
            max_concurrency: default_max_concurrency(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            repair_scheme: default_repair_scheme(),
            user_agent: None,
            result_buffer: default_result_buffer(),
        }
    }
}

impl ExtractorConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the coordinator cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.max_queue_size == 0 {
            return Err(ExtractError::Config(
                "max_queue_size must be at least 1".to_string(),
            ));
        }
        if self.max_concurrency == 0 {
            return Err(ExtractError::Config(
                "max_concurrency must be at least 1".to_string(),
            ));
        }
        if self.result_buffer == 0 {
            return Err(ExtractError::Config(
                "result_buffer must be at least 1".to_string(),
            ));
        }
        if self.repair_scheme.is_empty() {
            return Err(ExtractError::Config(
                "repair_scheme must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// The per-request timeout, if one is configured
    pub fn fetch_timeout(&self) -> Option<Duration> {
        match self.fetch_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}
