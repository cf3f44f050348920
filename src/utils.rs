use url::Url;

/// Prefix `url` with `scheme://`
pub fn with_scheme(url: &str, scheme: &str) -> String {
    format!("{}://{}", scheme, url)
}

/// Returns true for `host:port[/path]` input that a URL parser reads as
/// `scheme:path`, e.g. `localhost:8080/page` or `example.com:8080`
pub fn is_host_port_without_scheme(url: &str, parsed: &Url) -> bool {
    if url.contains("://") || matches!(parsed.scheme(), "http" | "https") {
        return false;
    }
    match url.split_once(':') {
        Some((host, rest)) => {
            !host.is_empty() && rest.starts_with(|c: char| c.is_ascii_digit())
        }
        None => false,
    }
}

/// Replace commas with spaces; URLs are assumed to contain none
pub fn commas_to_spaces(text: &str) -> String {
    text.replace(',', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_scheme() {
        assert_eq!(with_scheme("google.com", "https"), "https://google.com");
    }

    #[test]
    fn test_host_port_without_scheme() {
        let check = |url: &str| is_host_port_without_scheme(url, &Url::parse(url).unwrap());

        assert!(check("localhost:8080/page"));
        assert!(check("example.com:8080"));
        assert!(check("intranet:3000/status?x=1"));
        assert!(!check("mailto:bob@example.com"));
        assert!(!check("ftp://files.example.com:21/pub"));
        assert!(!check("https://example.com:8443/"));
    }

    #[test]
    fn test_commas_to_spaces() {
        assert_eq!(commas_to_spaces("a.com,b.com,,"), "a.com b.com  ");
    }
}
