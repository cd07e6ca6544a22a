// src/audit/mod.rs
// =============================================================================
// This module holds the state of one audit run and the logic that drives it.
//
// Submodules:
// - auditor: the driver that walks pages and fills in everything below
// - graph: who links to whom, orphans and the most-linked ranking
// - ledger: the list of issues and the score derived from it
// =============================================================================

mod auditor;
mod graph;
mod ledger;

pub use auditor::{Auditor, ExternalLinkRecord};
pub use graph::PageRank;
pub use ledger::{Issue, IssueKind, Ledger, Severity, MAX_SCORE};
