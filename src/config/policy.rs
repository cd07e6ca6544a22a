// src/config/policy.rs
// =============================================================================
// Ignore rules for directories, files, hrefs and external domains.
//
// All of these are "contains a fragment" heuristics: `.git` also matches a
// directory called `my.github.io`, and the `google` domain fragment also
// skips `googleapis.com`. They are kept as plain lists so a site owner can
// tune them from the command line instead of editing code.
// =============================================================================

use regex::Regex;
use std::sync::LazyLock;

/// Search-console ownership files, e.g. `google1a2b3c4d.html`
static VERIFICATION_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^google[0-9a-f]+\.html$").expect("valid verification regex"));

pub const DEFAULT_IGNORED_DIRS: &[&str] = &[".git", "node_modules", "__pycache__", ".idea", ".vscode"];
pub const DEFAULT_IGNORED_FILES: &[&str] = &["404.html"];
pub const DEFAULT_IGNORED_PREFIXES: &[&str] = &["javascript:", "mailto:", "tel:", "#"];
pub const DEFAULT_DENIED_DOMAINS: &[&str] = &["cdn-cgi", "google"];

#[derive(Debug, Clone)]
pub struct IgnorePolicy {
    pub dir_fragments: Vec<String>,
    pub file_fragments: Vec<String>,
    pub href_prefixes: Vec<String>,
    pub domain_fragments: Vec<String>,
}

impl Default for IgnorePolicy {
    fn default() -> Self {
        let owned = |list: &[&str]| list.iter().map(|s| s.to_string()).collect();
        Self {
            dir_fragments: owned(DEFAULT_IGNORED_DIRS),
            file_fragments: owned(DEFAULT_IGNORED_FILES),
            href_prefixes: owned(DEFAULT_IGNORED_PREFIXES),
            domain_fragments: owned(DEFAULT_DENIED_DOMAINS),
        }
    }
}

impl IgnorePolicy {
    /// True if any component of a site-relative directory path contains an
    /// ignored fragment
    pub fn ignores_dir(&self, rel_dir: &str) -> bool {
        self.dir_fragments
            .iter()
            .any(|fragment| rel_dir.contains(fragment.as_str()))
    }

    /// True for verification files and names containing an ignored fragment
    pub fn ignores_file(&self, file_name: &str) -> bool {
        VERIFICATION_FILE.is_match(file_name)
            || self
                .file_fragments
                .iter()
                .any(|fragment| file_name.contains(fragment.as_str()))
    }

    pub fn ignores_href(&self, href: &str) -> bool {
        href.is_empty()
            || self
                .href_prefixes
                .iter()
                .any(|prefix| href.starts_with(prefix.as_str()))
    }

    pub fn denies_host(&self, host: &str) -> bool {
        self.domain_fragments
            .iter()
            .any(|fragment| host.contains(fragment.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_file_is_ignored() {
        let policy = IgnorePolicy::default();
        assert!(policy.ignores_file("google1a2b3c4d5e.html"));
        assert!(!policy.ignores_file("google-account-creation-guide.html"));
    }

    #[test]
    fn test_404_page_is_ignored() {
        let policy = IgnorePolicy::default();
        assert!(policy.ignores_file("404.html"));
        assert!(!policy.ignores_file("about.html"));
    }

    #[test]
    fn test_ignored_dirs() {
        let policy = IgnorePolicy::default();
        assert!(policy.ignores_dir(".git"));
        assert!(policy.ignores_dir("assets/node_modules"));
        assert!(!policy.ignores_dir("blog"));
    }

    #[test]
    fn test_href_prefixes() {
        let policy = IgnorePolicy::default();
        assert!(policy.ignores_href(""));
        assert!(policy.ignores_href("mailto:me@example.com"));
        assert!(policy.ignores_href("#top"));
        assert!(!policy.ignores_href("/blog"));
    }

    #[test]
    fn test_custom_domain_fragment() {
        let mut policy = IgnorePolicy::default();
        policy.domain_fragments.push("twitter".to_string());
        assert!(policy.denies_host("www.twitter.com"));
        assert!(policy.denies_host("fonts.google.com"));
        assert!(!policy.denies_host("www.rust-lang.org"));
    }
}
