// src/config/mod.rs
// =============================================================================
// Everything an audit needs to know before it starts.
//
// Submodules:
// - policy: ignore lists (directories, files, hrefs, external domains)
// - redirects: the `_redirects` soft-route manifest
// - site: canonical origin and keywords from the home page
//
// There is no config file: AuditConfig is built from command-line flags in
// main.rs, and the site itself supplies the rest.
// =============================================================================

mod policy;
mod redirects;
mod site;

pub use policy::IgnorePolicy;
pub use redirects::RedirectTable;
pub use site::SiteMetadata;

use crate::checker::VerifierOptions;
use std::path::PathBuf;

/// The page-file extension used for clean-URL and directory-index resolution
pub const PAGE_EXTENSION: &str = "html";

#[derive(Debug, Clone)]
pub struct AuditConfig {
    pub root: PathBuf,
    pub extension: String,
    pub policy: IgnorePolicy,
    pub verifier: VerifierOptions,
    /// Skip the network phase entirely (offline runs)
    pub skip_external: bool,
    /// How many pages to list in the "most linked" ranking
    pub top: usize,
}

impl AuditConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: PAGE_EXTENSION.to_string(),
            policy: IgnorePolicy::default(),
            verifier: VerifierOptions::default(),
            skip_external: false,
            top: 10,
        }
    }

    /// Site-relative id of the home page, e.g. `index.html`
    pub fn home_page(&self) -> String {
        format!("index.{}", self.extension)
    }
}
