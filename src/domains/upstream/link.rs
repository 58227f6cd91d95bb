//! `Link` header parsing.
//!
//! The upstream API paginates its collections with a standard `Link` header:
//!
//! ```text
//! Link: <https://host/api/v0/apis?page=2>; rel="next", <https://host/api/v0/apis?page=1>; rel="prev"
//! ```
//!
//! Parsing is deliberately lenient: a fragment that lacks either a `<url>` or a
//! `rel="..."` attribute is skipped and never affects its neighbours.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([^>]+)>").expect("valid link url pattern"));

static REL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"rel="([^"]+)""#).expect("valid link rel pattern"));

/// Relative link targets are resolved against this base before reading their
/// query string; only the query matters.
static RELATIVE_BASE: LazyLock<Url> =
    LazyLock::new(|| Url::parse("http://localhost/").expect("valid relative base"));

/// Relation name that marks the following page.
pub const REL_NEXT: &str = "next";

/// A single link relation from a `Link` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRelation {
    /// The target URL, verbatim from inside the angle brackets.
    pub url: String,
    /// The relation name, verbatim from inside the quotes.
    pub rel: String,
}

/// Parse a `Link` header value into its relations, in header order.
pub fn parse_link_header(header: &str) -> Vec<LinkRelation> {
    header
        .split(',')
        .map(str::trim)
        .filter_map(|fragment| {
            let url = URL_PATTERN.captures(fragment)?.get(1)?.as_str();
            let rel = REL_PATTERN.captures(fragment)?.get(1)?.as_str();
            Some(LinkRelation {
                url: url.to_string(),
                rel: rel.to_string(),
            })
        })
        .collect()
}

/// Find the page number advertised by the first `next` relation.
///
/// Only the first `next` relation is considered. Returns `None` when there is
/// no such relation, or when its URL has no numeric, positive `page` parameter.
pub fn next_page(links: &[LinkRelation]) -> Option<u64> {
    let next = links.iter().find(|link| link.rel == REL_NEXT)?;
    page_param(&next.url)
}

/// Convenience wrapper: parse an optional header and extract the next page.
pub fn next_page_from_header(header: Option<&str>) -> Option<u64> {
    header.and_then(|value| next_page(&parse_link_header(value)))
}

fn page_param(target: &str) -> Option<u64> {
    let url = RELATIVE_BASE.join(target).ok()?;
    let (_, value) = url.query_pairs().find(|(key, _)| key == "page")?;
    value.parse::<u64>().ok().filter(|page| *page > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(url: &str, rel: &str) -> LinkRelation {
        LinkRelation {
            url: url.to_string(),
            rel: rel.to_string(),
        }
    }

    #[test]
    fn test_parse_next_and_prev() {
        let header =
            r#"<https://x/apis?page=2>; rel="next", <https://x/apis?page=1>; rel="prev""#;
        let links = parse_link_header(header);

        assert_eq!(
            links,
            vec![
                rel("https://x/apis?page=2", "next"),
                rel("https://x/apis?page=1", "prev"),
            ]
        );
        assert_eq!(next_page(&links), Some(2));
    }

    #[test]
    fn test_parse_empty_header() {
        assert!(parse_link_header("").is_empty());
        assert!(parse_link_header(" , ,").is_empty());
    }

    #[test]
    fn test_malformed_fragments_are_skipped() {
        let header = concat!(
            r#"https://x/apis?page=9; rel="next", "#,
            r#"<https://x/apis?page=3>; rel=next, "#,
            r#"<https://x/apis?page=4>; rel="last""#,
        );
        let links = parse_link_header(header);

        assert_eq!(links, vec![rel("https://x/apis?page=4", "last")]);
        assert_eq!(next_page(&links), None);
    }

    #[test]
    fn test_empty_brackets_and_quotes_do_not_match() {
        assert!(parse_link_header(r#"<>; rel="next""#).is_empty());
        assert!(parse_link_header(r#"<https://x/apis?page=2>; rel="""#).is_empty());
    }

    #[test]
    fn test_attributes_in_any_order() {
        let links = parse_link_header(r#"rel="next"; <https://x/apis?page=5>"#);
        assert_eq!(links, vec![rel("https://x/apis?page=5", "next")]);
    }

    #[test]
    fn test_first_next_wins() {
        let links = vec![
            rel("https://x/apis?page=7", "next"),
            rel("https://x/apis?page=8", "next"),
        ];
        assert_eq!(next_page(&links), Some(7));
    }

    #[test]
    fn test_first_next_without_page_stops_scan() {
        let links = vec![
            rel("https://x/apis", "next"),
            rel("https://x/apis?page=8", "next"),
        ];
        assert_eq!(next_page(&links), None);
    }

    #[test]
    fn test_next_page_non_numeric() {
        let links = vec![rel("https://x/apis?page=two", "next")];
        assert_eq!(next_page(&links), None);
    }

    #[test]
    fn test_next_page_zero_is_absent() {
        let links = vec![rel("https://x/apis?page=0", "next")];
        assert_eq!(next_page(&links), None);
    }

    #[test]
    fn test_next_page_relative_url() {
        let links = vec![rel("/api/v0/repositories?sort=name&page=12", "next")];
        assert_eq!(next_page(&links), Some(12));
    }

    #[test]
    fn test_next_page_from_header() {
        assert_eq!(next_page_from_header(None), None);
        assert_eq!(
            next_page_from_header(Some(r#"<https://x/apis?page=3>; rel="next""#)),
            Some(3)
        );
    }
}
