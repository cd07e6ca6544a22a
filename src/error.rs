// src/error.rs
// =============================================================================
// Fatal errors for the audit engine.
//
// Most problems an audit finds are NOT errors in the Rust sense: a dead link
// or a missing <h1> is recorded in the issue ledger and the run continues.
// AuditError is only for things that stop the whole run before (or while)
// it can produce a meaningful report.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    /// The home page supplies the site metadata, so without it nothing can run
    #[error("home page not found at {0}")]
    MissingHomePage(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("verifier worker failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, AuditError>;
