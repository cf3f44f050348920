use crate::parsers::text;

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_split_tokens() {
        assert!(text::split_tokens("").is_empty());
        assert_eq!(text::split_tokens("a  b\n\nc\t d"), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_trim_token() {
        assert_eq!(text::trim_token("google.com."), "google.com");
        assert_eq!(text::trim_token("\"google.com\","), "google.com");
        assert_eq!(text::trim_token("(google.com)"), "google.com");
        assert_eq!(text::trim_token("[google.com]!?"), "google.com");
        assert_eq!(text::trim_token("<https://a.com/>."), "https://a.com/");
        assert_eq!(text::trim_token("a.com/x_(y)"), "a.com/x_(y)");
        assert_eq!(text::trim_token("a.com/x_(y))"), "a.com/x_(y)");
        assert_eq!(text::trim_token("..."), "");
    }

    #[test]
    fn test_is_candidate_url() {
        // Accepted shapes
        assert!(text::is_candidate_url("google.com"));
        assert!(text::is_candidate_url("GOOGLE.COM"));
        assert!(text::is_candidate_url("sub.domain.example.co.uk/path"));
        assert!(text::is_candidate_url("https://example.com"));
        assert!(text::is_candidate_url("ftp://files.example.org/pub"));
        assert!(text::is_candidate_url("192.168.1.1"));
        assert!(text::is_candidate_url("example.com:8080"));
        assert!(text::is_candidate_url("example.com?q=1"));

        // Rejected shapes
        assert!(!text::is_candidate_url(""));
        assert!(!text::is_candidate_url("hello"));
        assert!(!text::is_candidate_url("3.14"));
        assert!(!text::is_candidate_url("e.g"));
        assert!(!text::is_candidate_url("bob@example.com"));
        assert!(!text::is_candidate_url("-bad-.com"));
        assert!(!text::is_candidate_url("example."));
        assert!(!text::is_candidate_url("not a URL"));
    }

    #[test]
    fn test_filenames_and_names_are_not_candidates() {
        assert!(!text::is_candidate_url("notes.txt"));
        assert!(!text::is_candidate_url("report.PDF.docx"));
        assert!(!text::is_candidate_url("config.yaml"));
        assert!(!text::is_candidate_url("Mr.Smith"));
        assert!(!text::is_candidate_url("https://Dr.Jones/path"));

        // Real TLDs that double as extensions stay candidates
        assert!(text::is_candidate_url("docs.rs"));
        assert!(text::is_candidate_url("example.py"));
        assert!(text::is_candidate_url("bit.ly/abc"));
    }

    #[test]
    fn test_prose_with_filenames() {
        let found = text::extract_candidate_urls(
            "Mr.Smith attached notes.txt and config.yaml, see example.com for details.",
        );
        assert_eq!(found, vec!["example.com"]);
    }
}
