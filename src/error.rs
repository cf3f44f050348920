use thiserror::Error;

/// Errors that abort an extraction run
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Task join error: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("Consumer permit pool closed: {0}")]
    Semaphore(#[from] tokio::sync::AcquireError),
}

impl From<serde_json::Error> for ExtractError {
    fn from(e: serde_json::Error) -> Self {
        ExtractError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;

/// Why a single URL could not be fetched
///
/// These never escape the fetcher: a failed URL is logged and dropped.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("URL has no scheme: {0}")]
    MissingScheme(String),

    #[error("Invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}
