use crate::utils::commas_to_spaces;
use regex::Regex;
use std::sync::LazyLock;

/// Characters stripped from the start of a token
const LEADING_PUNCTUATION: &[char] = &['\'', '"', '(', '[', '{', '<'];

/// Characters stripped from the end of a token
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', '\'', '"', ']', '}', '>'];

/// File extensions that are not delegated TLDs, so `notes.txt` is a filename
const FILE_EXTENSIONS: &[&str] = &[
    "bak", "cfg", "conf", "csv", "doc", "docx", "exe", "gif", "htm", "html", "ini", "jpeg",
    "jpg", "js", "json", "log", "png", "ppt", "pptx", "svg", "tmp", "toml", "txt", "xls",
    "xlsx", "xml", "yaml", "yml",
];

/// Optional scheme, a host (localhost, IPv4, or dotted labels ending in an
/// alphabetic TLD), optional port, optional path/query/fragment.
static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)
        ^
        (?:[a-z][a-z0-9+.\-]*://)?
        (?:
            localhost
          | \d{1,3}(?:\.\d{1,3}){3}
          | (?:[a-z0-9](?:[a-z0-9\-]{0,61}[a-z0-9])?\.)+(?P<tld>[a-z]{2,63})
        )
        (?::\d{1,5})?
        (?:[/?\#]\S*)?
        $",
    )
    .expect("URL pattern should be valid")
});

/// Extracts URL-like tokens from free-form text
///
/// Commas are treated as whitespace. Tokens are returned in order of
/// appearance, duplicates included.
pub fn extract_candidate_urls(text: &str) -> Vec<String> {
    let normalized = commas_to_spaces(text);

    let candidates = split_tokens(&normalized)
        .into_iter()
        .map(trim_token)
        .filter(|token| is_candidate_url(token))
        .map(|token| token.to_string())
        .collect::<Vec<String>>();

    ::log::debug!("Text parser found {} candidate URLs", candidates.len());
    candidates
}

/// Splits text on any whitespace, dropping empty tokens
pub fn split_tokens(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Strips surrounding prose punctuation from a token
///
/// A trailing `)` is only removed when it has no matching `(` inside the
/// token, so `en.wikipedia.org/wiki/Rust_(language)` survives intact.
pub fn trim_token(token: &str) -> &str {
    let mut current = token;

    loop {
        let trimmed = current
            .trim_start_matches(LEADING_PUNCTUATION)
            .trim_end_matches(TRAILING_PUNCTUATION);

        let trimmed = match trimmed.strip_suffix(')') {
            Some(rest) if rest.matches('(').count() < trimmed.matches(')').count() => rest,
            _ => trimmed,
        };

        if trimmed == current {
            return trimmed;
        }
        current = trimmed;
    }
}

/// Returns true if a trimmed token looks like a URL
pub fn is_candidate_url(token: &str) -> bool {
    if token.is_empty() {
        return false;
    }
    match URL_PATTERN.captures(token) {
        Some(captures) => captures
            .name("tld")
            .is_none_or(|tld| is_plausible_tld(tld.as_str())),
        None => false,
    }
}

/// A TLD is written in one case (`com`, `COM`, not `Smith`) and is not a
/// common file extension
fn is_plausible_tld(tld: &str) -> bool {
    let uniform_case = tld.chars().all(|c| c.is_ascii_lowercase())
        || tld.chars().all(|c| c.is_ascii_uppercase());

    uniform_case && !FILE_EXTENSIONS.contains(&tld.to_ascii_lowercase().as_str())
}
