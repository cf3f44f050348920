use scraper::{Html, Selector};
use std::sync::LazyLock;

/// Every element that declares an `href`, not only anchors
static HREF_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("[href]").expect("href selector should be valid"));

/// Extracts the `href` value of every element that has one
///
/// Values come back in document order, duplicates included, exactly as
/// written (relative links are not resolved). Invalid UTF-8 is replaced
/// rather than rejected.
pub fn extract_hrefs(html: &[u8]) -> Vec<String> {
    extract_hrefs_from_str(&String::from_utf8_lossy(html))
}

/// Same as [`extract_hrefs`] for already decoded markup
pub fn extract_hrefs_from_str(html: &str) -> Vec<String> {
    let doc = Html::parse_document(html);

    let links = doc
        .select(&HREF_SELECTOR)
        .filter_map(|e| e.value().attr("href"))
        .map(|s| s.to_string())
        .collect::<Vec<String>>();

    ::log::debug!("HTML parser found {} links", links.len());
    if !links.is_empty() {
        ::log::trace!(
            "First few links: {:?}",
            links.iter().take(5).collect::<Vec<_>>()
        );
    }

    links
}
