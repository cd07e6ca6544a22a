// src/checker/mod.rs
// =============================================================================
// This module contains the per-link logic of an audit.
//
// Submodules:
// - html: Extracts anchors and page facts from HTML
// - classify: Decides what kind of reference an href is
// - resolve: Maps internal hrefs to files on disk
// - http: Verifies external URLs over the network
//
// This file (mod.rs) is the module root - it ties everything together and
// exports the public API that other parts of our application can use.
// =============================================================================

mod classify;
mod html;
mod http;
mod resolve;

pub use classify::{classify, Category};
pub use html::{extract_page, ElementRecord, PageFacts};
pub use http::{
    verify_links, LinkCheckResult, LinkStatus, VerifierOptions, DEFAULT_TIMEOUT_SECS,
    DEFAULT_WORKERS,
};
pub use resolve::{resolve, strip_query_and_fragment, PageId};
