// src/checker/html.rs
// =============================================================================
// This module turns a page's HTML into plain records we can reason about.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever, so broken markup still parses best-effort
//
// Nothing downstream ever touches the DOM again: classification and
// resolution only see ElementRecord values, and the semantics checks only
// see the counters in PageFacts.
// =============================================================================

use scraper::{Html, Selector};
use std::collections::BTreeMap;
use std::sync::LazyLock;

static ANCHORS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid selector"));
static H1: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").expect("valid selector"));
static JSON_LD: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"script[type="application/ld+json"]"#).expect("valid selector")
});
static BREADCRUMB: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"[aria-label="breadcrumb"], [class*="breadcrumb"]"#).expect("valid selector")
});

/// A single element reduced to a fixed shape
#[derive(Debug, Clone, PartialEq)]
pub struct ElementRecord {
    pub tag: String,
    pub attrs: BTreeMap<String, String>,
    pub text: String,
}

impl ElementRecord {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// The trimmed `href` value (anchors are only extracted when it exists)
    pub fn href(&self) -> &str {
        self.attr("href").map(str::trim).unwrap_or("")
    }

    /// Lower-cased `rel` tokens, e.g. `["nofollow", "noopener"]`
    pub fn rel_tokens(&self) -> Vec<String> {
        self.attr("rel")
            .map(|rel| rel.split_whitespace().map(str::to_ascii_lowercase).collect())
            .unwrap_or_default()
    }
}

/// Everything the audit needs from one page
#[derive(Debug, Clone, Default)]
pub struct PageFacts {
    pub anchors: Vec<ElementRecord>,
    pub h1_count: usize,
    pub json_ld_count: usize,
    pub has_breadcrumb: bool,
}

// Parses a page and extracts anchors plus the semantic counters
//
// Example:
//   html = "<h1>Hi</h1><a href='/docs' rel='nofollow'>Docs</a>"
//   result.anchors[0].href() = "/docs"
//   result.h1_count = 1
pub fn extract_page(html: &str) -> PageFacts {
    let document = Html::parse_document(html);

    let anchors = document
        .select(&ANCHORS)
        .map(|element| ElementRecord {
            tag: element.value().name().to_string(),
            attrs: element
                .value()
                .attrs()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            text: element.text().collect::<String>().trim().to_string(),
        })
        .collect();

    PageFacts {
        anchors,
        h1_count: document.select(&H1).count(),
        json_ld_count: document.select(&JSON_LD).count(),
        has_breadcrumb: document.select(&BREADCRUMB).next().is_some(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_anchor_record() {
        let html = r#"<a href=" /docs " rel="NoFollow noopener" class="nav">Read the <b>docs</b></a>"#;
        let facts = extract_page(html);
        assert_eq!(facts.anchors.len(), 1);
        let anchor = &facts.anchors[0];
        assert_eq!(anchor.tag, "a");
        assert_eq!(anchor.href(), "/docs");
        assert_eq!(anchor.attr("class"), Some("nav"));
        assert_eq!(anchor.text, "Read the docs");
        assert_eq!(anchor.rel_tokens(), vec!["nofollow", "noopener"]);
    }

    #[test]
    fn test_anchor_without_href_is_skipped() {
        let facts = extract_page(r#"<a name="top">Top</a><a href="/x">X</a>"#);
        assert_eq!(facts.anchors.len(), 1);
    }

    #[test]
    fn test_semantic_counters() {
        let html = r#"
            <nav aria-label="breadcrumb"><a href="/">Home</a></nav>
            <h1>One</h1><h1>Two</h1>
            <script type="application/ld+json">{"@type": "Article"}</script>
        "#;
        let facts = extract_page(html);
        assert_eq!(facts.h1_count, 2);
        assert_eq!(facts.json_ld_count, 1);
        assert!(facts.has_breadcrumb);
    }

    #[test]
    fn test_breadcrumb_by_class() {
        let facts = extract_page(r#"<ol class="site-breadcrumbs"><li>Home</li></ol>"#);
        assert!(facts.has_breadcrumb);
        assert!(!extract_page("<p>No trail</p>").has_breadcrumb);
    }

    #[test]
    fn test_malformed_html_is_best_effort() {
        let facts = extract_page(r#"<div><a href="/a">A<a href="/b">B</div"#);
        let hrefs: Vec<_> = facts.anchors.iter().map(|a| a.href()).collect();
        assert_eq!(hrefs, vec!["/a", "/b"]);
    }
}
