// src/config/site.rs
// =============================================================================
// Reads the site's identity from its home page.
//
// The canonical origin is what lets us tell "https://example.com/about"
// (our own page, written the long way) apart from a real external link.
// Priority: <link rel="canonical"> first, then <meta property="og:url">.
// =============================================================================

use crate::error::{AuditError, Result};
use scraper::{Html, Selector};
use std::path::Path;
use std::sync::LazyLock;
use tracing::{info, warn};

static CANONICAL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"link[rel~="canonical"][href]"#).expect("valid selector"));
static OG_URL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[property="og:url"][content]"#).expect("valid selector"));
static KEYWORDS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[name="keywords"][content]"#).expect("valid selector"));

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteMetadata {
    /// Canonical origin, or "" when it could not be determined
    pub origin: String,
    pub keywords: Vec<String>,
}

impl SiteMetadata {
    /// Loads metadata from the home page file. A missing or unreadable home
    /// page is the one fatal precondition of an audit.
    pub fn load(home_page: &Path) -> Result<Self> {
        if !home_page.is_file() {
            return Err(AuditError::MissingHomePage(home_page.to_path_buf()));
        }
        let bytes = std::fs::read(home_page).map_err(|source| AuditError::Io {
            path: home_page.to_path_buf(),
            source,
        })?;
        let meta = Self::from_html(&String::from_utf8_lossy(&bytes));

        if meta.origin.is_empty() {
            warn!(
                "Could not determine base URL from {} (checked canonical/og:url). Defaulting to empty string.",
                home_page.display()
            );
        } else {
            info!("Base URL: {}", meta.origin);
        }
        Ok(meta)
    }

    pub fn from_html(html: &str) -> Self {
        let document = Html::parse_document(html);

        let attr_of = |selector: &Selector, attr: &str| {
            document
                .select(selector)
                .filter_map(|el| el.value().attr(attr))
                .map(str::trim)
                .find(|value| !value.is_empty())
                .map(str::to_string)
        };

        let origin = attr_of(&CANONICAL, "href")
            .or_else(|| attr_of(&OG_URL, "content"))
            .unwrap_or_default();

        let keywords = attr_of(&KEYWORDS, "content")
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|k| !k.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self { origin, keywords }
    }
}
