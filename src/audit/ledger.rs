// src/audit/ledger.rs
// =============================================================================
// The issue ledger and the health score.
//
// Issues are append-only. The score is never stored: it is recomputed from
// the penalties every time, so it can only go down as issues are added and
// it bottoms out at 0.
// =============================================================================

use serde::Serialize;
use std::fmt;
use tracing::{error, info, warn};

pub const MAX_SCORE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Error,
    Warn,
    Info,
    Success,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Error => "ERROR",
            Severity::Warn => "WARN",
            Severity::Info => "INFO",
            Severity::Success => "SUCCESS",
        };
        f.write_str(label)
    }
}

/// What an issue is about. The kind fixes both the severity and the penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    DeadLink,
    ExternalLink,
    MissingHeading,
    DuplicateHeading,
    RelativeLink,
    AbsoluteInternalLink,
    ExtensionLink,
    UnknownSoftRoute,
    MissingStructuredData,
    UnsafeExternalLink,
    Orphan,
    MissingBreadcrumb,
    UnreadablePage,
    NoOrphans,
}

impl IssueKind {
    pub fn severity(self) -> Severity {
        match self {
            IssueKind::DeadLink
            | IssueKind::ExternalLink
            | IssueKind::MissingHeading
            | IssueKind::DuplicateHeading
            | IssueKind::UnreadablePage => Severity::Error,
            IssueKind::RelativeLink
            | IssueKind::AbsoluteInternalLink
            | IssueKind::ExtensionLink
            | IssueKind::UnknownSoftRoute
            | IssueKind::MissingStructuredData
            | IssueKind::UnsafeExternalLink
            | IssueKind::Orphan => Severity::Warn,
            IssueKind::MissingBreadcrumb => Severity::Info,
            IssueKind::NoOrphans => Severity::Success,
        }
    }

    /// Fixed penalties; keep these stable so scores stay comparable between runs
    pub fn penalty(self) -> u32 {
        match self {
            IssueKind::DeadLink => 10,
            IssueKind::ExternalLink
            | IssueKind::MissingHeading
            | IssueKind::DuplicateHeading
            | IssueKind::UnknownSoftRoute
            | IssueKind::Orphan => 5,
            IssueKind::RelativeLink
            | IssueKind::AbsoluteInternalLink
            | IssueKind::ExtensionLink
            | IssueKind::MissingStructuredData
            | IssueKind::UnsafeExternalLink => 2,
            IssueKind::MissingBreadcrumb | IssueKind::UnreadablePage | IssueKind::NoOrphans => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Issue {
    pub severity: Severity,
    pub kind: IssueKind,
    pub message: String,
    /// The offending href, URL or page, when there is one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub penalty: u32,
}

impl Issue {
    pub fn new(kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            severity: kind.severity(),
            kind,
            message: message.into(),
            subject: None,
            penalty: kind.penalty(),
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct Ledger {
    issues: Vec<Issue>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an issue and echoes it to the log
    pub fn record(&mut self, issue: Issue) {
        match issue.severity {
            Severity::Error => error!("[{}] {}", issue.severity, issue.message),
            Severity::Warn => warn!("[{}] {}", issue.severity, issue.message),
            Severity::Info | Severity::Success => info!("[{}] {}", issue.severity, issue.message),
        }
        self.issues.push(issue);
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn has(&self, kind: IssueKind) -> bool {
        self.issues.iter().any(|i| i.kind == kind)
    }

    pub fn count(&self, kind: IssueKind) -> usize {
        self.issues.iter().filter(|i| i.kind == kind).count()
    }

    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    pub fn total_penalty(&self) -> u32 {
        self.issues
            .iter()
            .fold(0u32, |sum, issue| sum.saturating_add(issue.penalty))
    }

    pub fn score(&self) -> u32 {
        MAX_SCORE.saturating_sub(self.total_penalty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_ledger_scores_100() {
        assert_eq!(Ledger::new().score(), 100);
    }

    #[test]
    fn test_default_penalties() {
        assert_eq!(IssueKind::DeadLink.penalty(), 10);
        assert_eq!(IssueKind::ExternalLink.penalty(), 5);
        assert_eq!(IssueKind::MissingHeading.penalty(), 5);
        assert_eq!(IssueKind::DuplicateHeading.penalty(), 5);
        assert_eq!(IssueKind::RelativeLink.penalty(), 2);
        assert_eq!(IssueKind::ExtensionLink.penalty(), 2);
        assert_eq!(IssueKind::UnknownSoftRoute.penalty(), 5);
        assert_eq!(IssueKind::MissingStructuredData.penalty(), 2);
        assert_eq!(IssueKind::UnsafeExternalLink.penalty(), 2);
        assert_eq!(IssueKind::Orphan.penalty(), 5);
    }

    #[test]
    fn test_score_is_monotonic_and_floored() {
        let kinds = [
            IssueKind::DeadLink,
            IssueKind::NoOrphans,
            IssueKind::RelativeLink,
            IssueKind::MissingBreadcrumb,
            IssueKind::Orphan,
        ];
        let mut ledger = Ledger::new();
        let mut previous = ledger.score();
        for kind in kinds.iter().cycle().take(60) {
            ledger.record(Issue::new(*kind, "x"));
            let score = ledger.score();
            assert!(score <= previous);
            previous = score;
        }
        assert_eq!(ledger.score(), 0);
    }

    #[test]
    fn test_severity_is_not_what_scores() {
        let mut ledger = Ledger::new();
        ledger.record(Issue::new(IssueKind::UnreadablePage, "cannot read"));
        assert!(ledger.has_errors());
        assert_eq!(ledger.score(), 100);
    }

    #[test]
    fn test_subject_and_counts() {
        let mut ledger = Ledger::new();
        ledger.record(Issue::new(IssueKind::ExternalLink, "dead").with_subject("https://x.test/"));
        ledger.record(Issue::new(IssueKind::ExternalLink, "dead").with_subject("https://y.test/"));
        assert_eq!(ledger.count(IssueKind::ExternalLink), 2);
        assert!(ledger.has(IssueKind::ExternalLink));
        assert!(!ledger.has(IssueKind::Orphan));
        assert_eq!(ledger.issues()[0].subject.as_deref(), Some("https://x.test/"));
        assert_eq!(ledger.score(), 90);
    }
}
