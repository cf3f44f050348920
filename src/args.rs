use clap::Parser;
use std::path::PathBuf;
use web_link_extractor::ExtractorConfig;

#[derive(Parser, Debug)]
#[command(name = "web-link-extractor")]
#[command(about = "Finds URLs in a text file and lists the hyperlinks on each page")]
#[command(version)]
pub struct Args {
    /// Text file containing URLs
    pub input: PathBuf,

    /// Path to a JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Maximum number of pending URLs (oldest are dropped beyond this)
    #[arg(short = 'q', long)]
    pub max_queue_size: Option<usize>,

    /// Number of concurrent fetches
    #[arg(short = 'n', long)]
    pub concurrency: Option<usize>,

    /// Per-request timeout in seconds (0 disables it)
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Scheme prepended to URLs that have none
    #[arg(long)]
    pub repair_scheme: Option<String>,

    /// Print the final results as JSON instead of streaming them
    #[arg(long)]
    pub json: bool,
}

impl Args {
    /// Apply command-line overrides on top of a loaded or default config
    pub fn apply_overrides(&self, mut config: ExtractorConfig) -> ExtractorConfig {
        if let Some(max_queue_size) = self.max_queue_size {
            config.max_queue_size = max_queue_size;
        }
        if let Some(concurrency) = self.concurrency {
            config.max_concurrency = concurrency;
        }
        if let Some(timeout) = self.timeout {
            config.fetch_timeout_secs = timeout;
        }
        if let Some(scheme) = &self.repair_scheme {
            config.repair_scheme = scheme.clone();
        }
        config
    }
}
