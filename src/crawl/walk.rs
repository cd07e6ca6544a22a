// src/crawl/walk.rs
// =============================================================================
// This module finds every page of the site on disk.
//
// How it works:
// 1. Walk the site root recursively with `walkdir`
// 2. Prune directories whose path contains an ignored fragment (.git, ...)
// 3. Keep files with the page extension that aren't ignored (404.html, ...)
// 4. Sort entries by file name so discovery order is the same on every run
//
// Unreadable directories are logged and skipped; one bad directory never
// hides the rest of the site.
// =============================================================================

use crate::checker::PageId;
use crate::config::IgnorePolicy;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

// Represents a page found on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredPage {
    /// Site-relative id, e.g. `blog/post.html`
    pub id: PageId,
    pub path: PathBuf,
}

// Lists all pages under `root` in a stable order
//
// Parameters:
//   root: the site root
//   extension: page-file extension without the dot ("html")
//   policy: ignore rules for directories and file names
pub fn discover_pages(root: &Path, extension: &str, policy: &IgnorePolicy) -> Vec<DiscoveredPage> {
    let mut pages = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 || !entry.file_type().is_dir() {
                return true;
            }
            let keep = !policy.ignores_dir(&relative_id(root, entry.path()));
            if !keep {
                debug!("Skipping ignored directory {}", entry.path().display());
            }
            keep
        });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable path: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }
        let has_extension = entry
            .path()
            .extension()
            .is_some_and(|ext| ext == extension);
        if !has_extension {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy();
        if policy.ignores_file(&file_name) {
            debug!("Skipping ignored file {}", entry.path().display());
            continue;
        }

        pages.push(DiscoveredPage {
            id: relative_id(root, entry.path()),
            path: entry.into_path(),
        });
    }

    pages
}

fn relative_id(root: &Path, path: &Path) -> PageId {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
