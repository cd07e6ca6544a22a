// src/checker/classify.rs
// =============================================================================
// Sorts every raw href into exactly one bucket.
//
// This is a pure function over strings: no network, no file system. That
// keeps it trivially testable and means the order of the rules below is the
// whole story.
//
//   ""  / "mailto:" / "tel:" / "javascript:" / "#..."  -> Ignored
//   "/go/..."                                          -> SoftRoute
//   "https://<our origin>/..."                         -> InternalAbsolute
//   "https://<denied host>/..."                        -> Ignored
//   "https://..."                                      -> External
//   anything else ("/a", "a", "../a")                  -> InternalRelative
// =============================================================================

use crate::config::IgnorePolicy;
use url::Url;

pub const SOFT_ROUTE_PREFIX: &str = "/go/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    Ignored,
    /// A `/go/...` token served by the redirect manifest
    SoftRoute(String),
    /// Absolute URL on a foreign host, normalized
    External(String),
    /// Absolute URL on our own origin; holds the path part, always rooted at `/`
    InternalAbsolute(String),
    /// Root-relative (`/a`) or document-relative (`a`, `../a`) reference
    InternalRelative(String),
}

pub fn classify(raw_href: &str, site_origin: &str, policy: &IgnorePolicy) -> Category {
    let href = raw_href.trim();

    if policy.ignores_href(href) {
        return Category::Ignored;
    }

    if href.starts_with(SOFT_ROUTE_PREFIX) {
        return Category::SoftRoute(href.to_string());
    }

    if href.starts_with("http://") || href.starts_with("https://") {
        if let Some(suffix) = strip_origin(href, site_origin) {
            let path = if suffix.starts_with('/') {
                suffix.to_string()
            } else {
                format!("/{}", suffix)
            };
            return Category::InternalAbsolute(path);
        }

        return match Url::parse(href) {
            Ok(mut url) => {
                // Fragments never reach the server, so `page#a` and `page#b`
                // are the same URL to check
                url.set_fragment(None);
                let host = url.host_str().unwrap_or("");
                if policy.denies_host(host) {
                    Category::Ignored
                } else {
                    Category::External(url.to_string())
                }
            }
            // Unparseable: fall back to a whole-string check and let the
            // verifier report whatever goes wrong with it
            Err(_) if policy.denies_host(href) => Category::Ignored,
            Err(_) => Category::External(href.to_string()),
        };
    }

    Category::InternalRelative(href.to_string())
}

// Returns what follows our origin, but only at a URL boundary, so that
// `https://example.community` never matches `https://example.com`
fn strip_origin<'a>(href: &'a str, site_origin: &str) -> Option<&'a str> {
    if site_origin.is_empty() {
        return None;
    }
    let suffix = href.strip_prefix(site_origin)?;
    let at_boundary = site_origin.ends_with('/')
        || suffix.is_empty()
        || suffix.starts_with(['/', '?', '#']);
    at_boundary.then_some(suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "https://example.com/";

    fn classify_default(href: &str) -> Category {
        classify(href, ORIGIN, &IgnorePolicy::default())
    }

    #[test]
    fn test_ignored_prefixes() {
        for href in ["", "   ", "javascript:void(0)", "mailto:a@b.c", "tel:+123", "#top"] {
            assert_eq!(classify_default(href), Category::Ignored, "href {:?}", href);
        }
    }

    #[test]
    fn test_soft_route() {
        assert_eq!(
            classify_default("/go/github"),
            Category::SoftRoute("/go/github".to_string())
        );
    }

    #[test]
    fn test_internal_absolute_strips_origin() {
        assert_eq!(
            classify_default("https://example.com/blog/post"),
            Category::InternalAbsolute("/blog/post".to_string())
        );
        assert_eq!(
            classify("https://example.com/blog", "https://example.com", &IgnorePolicy::default()),
            Category::InternalAbsolute("/blog".to_string())
        );
        assert_eq!(
            classify_default("https://example.com/"),
            Category::InternalAbsolute("/".to_string())
        );
    }

    #[test]
    fn test_denied_host_is_ignored() {
        assert_eq!(classify_default("https://fonts.google.com/x"), Category::Ignored);
        assert_eq!(
            classify_default("https://example.org/cdn-cgi/l/email-protection"),
            Category::External("https://example.org/cdn-cgi/l/email-protection".to_string())
        );
    }

    #[test]
    fn test_external_is_normalized() {
        assert_eq!(
            classify_default("https://WWW.Rust-Lang.org"),
            Category::External("https://www.rust-lang.org/".to_string())
        );
    }

    #[test]
    fn test_external_fragment_is_dropped() {
        assert_eq!(
            classify_default("https://dead.test/page#intro"),
            Category::External("https://dead.test/page".to_string())
        );
        assert_eq!(
            classify_default("https://dead.test/page?q=1#usage"),
            Category::External("https://dead.test/page?q=1".to_string())
        );
    }

    #[test]
    fn test_origin_must_end_at_boundary() {
        let policy = IgnorePolicy::default();
        assert_eq!(
            classify("https://example.community/x", "https://example.com", &policy),
            Category::External("https://example.community/x".to_string())
        );
        assert_eq!(
            classify("https://example.com?ref=a", "https://example.com", &policy),
            Category::InternalAbsolute("/?ref=a".to_string())
        );
        assert_eq!(
            classify("https://example.com", "https://example.com", &policy),
            Category::InternalAbsolute("/".to_string())
        );
    }

    #[test]
    fn test_empty_origin_never_matches() {
        assert_eq!(
            classify("https://example.com/a", "", &IgnorePolicy::default()),
            Category::External("https://example.com/a".to_string())
        );
    }

    #[test]
    fn test_relative_forms() {
        for href in ["/about", "about", "../about.html", "./a?x=1"] {
            assert_eq!(
                classify_default(href),
                Category::InternalRelative(href.to_string())
            );
        }
    }
}
