// src/crawl/mod.rs
// =============================================================================
// This module discovers the pages of a site.
//
// Unlike a live crawler we never follow links to find pages: every page file
// under the site root is a page, whether anything links to it or not. That
// is exactly what makes orphan detection possible.
// =============================================================================

mod walk;

pub use walk::{discover_pages, DiscoveredPage};
