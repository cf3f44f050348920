use crate::config::ExtractorConfig;
use crate::error::{ExtractError, FetchError, Result};
use crate::parsers::html;
use crate::results::PageLinks;
use crate::utils::{is_host_port_without_scheme, with_scheme};
use reqwest::Client;
use url::{ParseError, Url};

/// Outcome of fetching one dequeued URL
///
/// `None` means the URL was unrecoverable and drops out of the results.
pub type FetchResult = Option<PageLinks>;

/// Performs one HTTP GET per URL, with a single scheme-repair retry
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    repair_scheme: String,
}

impl Fetcher {
    /// Build a fetcher and its HTTP client from configuration
    pub fn new(config: &ExtractorConfig) -> Result<Self> {
        let mut builder = Client::builder();

        if let Some(timeout) = config.fetch_timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }

        let client = builder.build().map_err(ExtractError::Client)?;

        Ok(Self {
            client,
            repair_scheme: config.repair_scheme.clone(),
        })
    }

    /// Fetch `url` and extract its hyperlinks, dropping it on any failure
    pub async fn fetch(&self, url: &str) -> FetchResult {
        match self.try_fetch(url).await {
            Ok(page) => {
                ::log::debug!("Fetched {} ({} links)", page.url, page.links.len());
                Some(page)
            }
            Err(e) => {
                ::log::warn!("Dropping {}: {}", url, e);
                None
            }
        }
    }

    /// Fetch `url`, retrying exactly once with the repair scheme prepended
    /// when it was rejected for having no scheme
    pub async fn try_fetch(&self, url: &str) -> std::result::Result<PageLinks, FetchError> {
        match self.get(url).await {
            Err(FetchError::MissingScheme(_)) => {
                let repaired = with_scheme(url, &self.repair_scheme);
                ::log::debug!("No scheme on {}, retrying as {}", url, repaired);
                self.get(&repaired).await
            }
            result => result,
        }
    }

    async fn get(&self, url: &str) -> std::result::Result<PageLinks, FetchError> {
        let parsed = match Url::parse(url) {
            // `localhost:8080` parses with `localhost` as its scheme
            Ok(parsed) if is_host_port_without_scheme(url, &parsed) => {
                return Err(FetchError::MissingScheme(url.to_string()));
            }
            Ok(parsed) => parsed,
            Err(ParseError::RelativeUrlWithoutBase) => {
                return Err(FetchError::MissingScheme(url.to_string()));
            }
            Err(source) => {
                return Err(FetchError::InvalidUrl {
                    url: url.to_string(),
                    source,
                });
            }
        };

        // Non-2xx responses are still parsed for links
        let response = self.client.get(parsed).send().await?;
        ::log::trace!("GET {} -> {}", url, response.status());

        let body = response.bytes().await?;
        let links = html::extract_hrefs(&body);

        Ok(PageLinks::new(url.to_string(), links))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    fn http_repair_config() -> ExtractorConfig {
        ExtractorConfig {
            repair_scheme: "http".to_string(),
            fetch_timeout_secs: 5,
            ..ExtractorConfig::default()
        }
    }

    fn html_response(status: u16, body: &str) -> ResponseTemplate {
        ResponseTemplate::new(status)
            .insert_header("content-type", "text/html")
            .set_body_bytes(body.as_bytes().to_vec())
    }

    #[tokio::test]
    async fn test_fetch_with_scheme() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(html_response(
                200,
                r#"<html><body><a href="/one">1</a><a href="https://two.com">2</a></body></html>"#,
            ))
            .expect(1)
            .mount(&mock_server)
            .await;

        let fetcher = Fetcher::new(&http_repair_config()).unwrap();
        let url = format!("{}/page", mock_server.uri());
        let page = fetcher.fetch(&url).await.expect("page should be fetched");

        assert_eq!(page.url, url);
        assert_eq!(page.links, vec!["/one", "https://two.com"]);
    }

    #[tokio::test]
    async fn test_scheme_repair() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(html_response(200, r#"<a href="/repaired">r</a>"#))
            .expect(1)
            .mount(&mock_server)
            .await;

        let fetcher = Fetcher::new(&http_repair_config()).unwrap();
        let schemeless = format!("{}/page", mock_server.address());
        let page = fetcher.fetch(&schemeless).await.expect("repair should succeed");

        assert_eq!(page.url, format!("http://{}", schemeless));
        assert_eq!(page.links, vec!["/repaired"]);
    }

    #[tokio::test]
    async fn test_scheme_repair_named_host() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(html_response(200, r#"<a href="/named">n</a>"#))
            .expect(1)
            .mount(&mock_server)
            .await;

        let fetcher = Fetcher::new(&http_repair_config()).unwrap();
        let schemeless = format!("localhost:{}/page", mock_server.address().port());
        let page = fetcher
            .try_fetch(&schemeless)
            .await
            .expect("host:port should be repaired");

        assert_eq!(page.url, format!("http://{}", schemeless));
        assert_eq!(page.links, vec!["/named"]);
    }

    #[tokio::test]
    async fn test_non_http_scheme_not_repaired() {
        let fetcher = Fetcher::new(&ExtractorConfig::default()).unwrap();
        assert!(matches!(
            fetcher.try_fetch("mailto:bob@example.com").await,
            Err(FetchError::Http(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let fetcher = Fetcher::new(&ExtractorConfig::default()).unwrap();

        assert!(fetcher.fetch("not a URL").await.is_none());
        assert!(matches!(
            fetcher.try_fetch("not a URL").await,
            Err(FetchError::InvalidUrl { .. })
        ));
    }

    #[tokio::test]
    async fn test_non_success_status_still_parsed() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(html_response(404, r#"<a href="/home">home</a>"#))
            .mount(&mock_server)
            .await;

        let fetcher = Fetcher::new(&http_repair_config()).unwrap();
        let page = fetcher
            .fetch(&format!("{}/missing", mock_server.uri()))
            .await
            .expect("404 body should still be parsed");

        assert_eq!(page.links, vec!["/home"]);
    }

    #[tokio::test]
    async fn test_connection_refused_is_dropped() {
        let fetcher = Fetcher::new(&http_repair_config()).unwrap();
        assert!(matches!(
            fetcher.try_fetch("http://127.0.0.1:1/").await,
            Err(FetchError::Http(_))
        ));
    }

    #[tokio::test]
    async fn test_unsupported_scheme_is_dropped() {
        let fetcher = Fetcher::new(&ExtractorConfig::default()).unwrap();
        assert!(fetcher.fetch("ftp://files.example.com/pub").await.is_none());
    }

    #[tokio::test]
    async fn test_timeout_is_dropped() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(
                html_response(200, r#"<a href="/late">late</a>"#)
                    .set_delay(std::time::Duration::from_secs(3)),
            )
            .mount(&mock_server)
            .await;

        let config = ExtractorConfig {
            fetch_timeout_secs: 1,
            ..ExtractorConfig::default()
        };
        let fetcher = Fetcher::new(&config).unwrap();

        assert!(
            fetcher
                .fetch(&format!("{}/slow", mock_server.uri()))
                .await
                .is_none()
        );
    }

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn test_live_scheme_repair() {
        let fetcher = Fetcher::new(&ExtractorConfig::default()).unwrap();
        let page = fetcher.fetch("google.com").await.expect("google.com should load");
        assert_eq!(page.url, "https://google.com");
    }
}
