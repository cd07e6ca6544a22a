// src/config/redirects.rs
// =============================================================================
// Loads the `_redirects` manifest that backs soft routes like `/go/github`.
//
// Format (one rule per line):
//   /go/github   https://github.com/example
//   # comments and blank lines are skipped
//
// A missing or unreadable manifest is not fatal: we warn and carry on with an
// empty table, which also switches off the "unknown soft route" check.
// =============================================================================

use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

pub const REDIRECTS_FILE: &str = "_redirects";

#[derive(Debug, Clone, Default)]
pub struct RedirectTable {
    routes: HashMap<String, String>,
}

impl RedirectTable {
    /// Reads `<root>/_redirects`, degrading to an empty table on any failure
    pub fn load(root: &Path) -> Self {
        let path = root.join(REDIRECTS_FILE);
        if !path.is_file() {
            debug!("No {} manifest at {}", REDIRECTS_FILE, path.display());
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(text) => {
                let table = Self::parse(&text);
                debug!("Loaded {} soft route(s) from {}", table.len(), path.display());
                table
            }
            Err(e) => {
                warn!("Failed to parse {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn parse(text: &str) -> Self {
        let routes = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| {
                let mut parts = line.split_whitespace();
                match (parts.next(), parts.next()) {
                    (Some(token), Some(destination)) => {
                        Some((token.to_string(), destination.to_string()))
                    }
                    _ => None,
                }
            })
            .collect();
        Self { routes }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.routes.contains_key(token)
    }

    pub fn destination(&self, token: &str) -> Option<&str> {
        self.routes.get(token).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_comments_and_short_lines() {
        let table = RedirectTable::parse(
            "# affiliate links\n\n/go/github https://github.com/example 301\n/go/broken\n  /go/docs\thttps://docs.rs  \n",
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.destination("/go/github"), Some("https://github.com/example"));
        assert_eq!(table.destination("/go/docs"), Some("https://docs.rs"));
        assert!(!table.contains("/go/broken"));
    }

    #[test]
    fn test_missing_manifest_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let table = RedirectTable::load(dir.path());
        assert!(table.is_empty());
    }

    #[test]
    fn test_load_from_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(REDIRECTS_FILE), "/go/x https://x.example\n").unwrap();
        let table = RedirectTable::load(dir.path());
        assert!(table.contains("/go/x"));
    }

    #[test]
    fn test_unreadable_manifest_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        // Invalid UTF-8 makes read_to_string fail
        std::fs::write(dir.path().join(REDIRECTS_FILE), [0xff, 0xfe, 0x00]).unwrap();
        let table = RedirectTable::load(dir.path());
        assert!(table.is_empty());
    }
}
