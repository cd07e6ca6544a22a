// src/report.rs
// =============================================================================
// Prints the outcome of an audit, either as a colored summary or as JSON.
//
// The report only reads from the Auditor; nothing here changes the score.
// Output goes to stdout, logs go to stderr, so `--json | jq` works.
// =============================================================================

use crate::audit::{Auditor, ExternalLinkRecord, Issue, IssueKind, Ledger, PageRank, Severity};
use crate::checker::LinkStatus;
use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Serialize)]
pub struct AuditReport<'a> {
    pub base_url: &'a str,
    pub keywords: &'a [String],
    pub pages_audited: usize,
    pub score: u32,
    pub issues: &'a [Issue],
    pub advice: Vec<&'static str>,
    pub top_pages: &'a [PageRank],
    pub orphans: &'a [String],
    pub soft_routes: &'a BTreeMap<String, BTreeSet<String>>,
    pub external_links: Vec<&'a ExternalLinkRecord>,
}

impl<'a> AuditReport<'a> {
    pub fn new(auditor: &'a Auditor) -> Self {
        let equity = auditor.equity();
        let top = auditor.config().top.min(equity.ranking.len());
        Self {
            base_url: &auditor.site().origin,
            keywords: &auditor.site().keywords,
            pages_audited: auditor.pages().len(),
            score: auditor.ledger().score(),
            issues: auditor.ledger().issues(),
            advice: advice(auditor.ledger()),
            top_pages: &equity.ranking[..top],
            orphans: &equity.orphans,
            soft_routes: auditor.soft_routes(),
            external_links: auditor.external_links().collect(),
        }
    }
}

// Ranked actionable advice: the most damaging kinds of issue first
const ADVICE: &[(IssueKind, &str)] = &[
    (IssueKind::DeadLink, "Fix broken internal links immediately."),
    (IssueKind::ExternalLink, "Update or remove dead external links."),
    (IssueKind::MissingHeading, "Add H1 tags to pages missing them."),
    (IssueKind::DuplicateHeading, "Keep exactly one H1 tag per page."),
    (IssueKind::UnknownSoftRoute, "Add missing soft routes to _redirects."),
    (IssueKind::Orphan, "Link to orphan pages from related content."),
    (IssueKind::RelativeLink, "Use root-relative links (starting with '/')."),
    (IssueKind::AbsoluteInternalLink, "Use root-relative links instead of absolute URLs to your own site."),
    (IssueKind::ExtensionLink, "Use clean URLs without the file extension."),
    (IssueKind::UnsafeExternalLink, "Add rel=\"nofollow noopener noreferrer\" to external links."),
    (IssueKind::MissingStructuredData, "Add Schema.org JSON-LD to pages without it."),
];

pub fn advice(ledger: &Ledger) -> Vec<&'static str> {
    ADVICE
        .iter()
        .filter(|(kind, _)| ledger.has(*kind))
        .map(|(_, text)| *text)
        .collect()
}

pub fn print_report(auditor: &Auditor, json: bool) -> Result<()> {
    let report = AuditReport::new(auditor);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_human(auditor, &report);
    }
    Ok(())
}

fn print_human(auditor: &Auditor, report: &AuditReport<'_>) {
    println!("\n{}", "=== Issues ===".cyan());
    let mut shown = 0;
    for issue in report.issues.iter().filter(|i| i.severity != Severity::Info) {
        println!("{}", format_issue(issue));
        shown += 1;
    }
    if shown == 0 {
        println!("No issues found.");
    }

    println!("\n{}", format!("Top {} Linked Pages:", report.top_pages.len()).blue());
    if auditor.graph().is_empty() {
        println!("  (no internal links resolved)");
    }
    for rank in report.top_pages {
        println!("  - {}: {} links", rank.page, rank.inbound);
    }

    println!("\n{}", "=== SEO Audit Report ===".cyan());
    println!("Base URL: {}", if report.base_url.is_empty() { "(unknown)" } else { report.base_url });
    println!("Total Pages Audited: {}", report.pages_audited);
    println!("Final Score: {}/100", report.score);

    if report.advice.is_empty() {
        println!("\n{}", "Great Job! Site is healthy.".green());
    } else {
        println!("\n{}", "Actionable Advice:".magenta());
        for (rank, line) in report.advice.iter().enumerate() {
            println!("  {}. {}", rank + 1, line);
        }
    }

    println!("\n{}", "=== Soft Route Analysis ===".cyan());
    if report.soft_routes.is_empty() {
        println!("No soft routes found.");
    }
    for (route, sources) in report.soft_routes {
        match auditor.redirects().destination(route) {
            Some(destination) => println!("{} -> {}", route.yellow(), destination),
            None => println!("{}", route.yellow()),
        }
        for source in sources {
            println!("  - {}", source);
        }
    }

    println!("\n{}", "=== External Link Sources ===".cyan());
    if report.external_links.is_empty() {
        println!("No external links found.");
    }
    for record in &report.external_links {
        println!("{}", record.url.blue());
        let safety = if record.safe { "[SAFE]".green() } else { "[UNSAFE]".red() };
        println!("  Status: {} {}", safety, format_status(record.status.as_ref()));
        for source in &record.sources {
            println!("  - {}", source);
        }
    }
}

fn format_issue(issue: &Issue) -> String {
    let label = format!("[{}]", issue.severity);
    let label = match issue.severity {
        Severity::Error => label.red(),
        Severity::Warn => label.yellow(),
        Severity::Success => label.green(),
        Severity::Info => label.blue(),
    };
    if issue.penalty > 0 {
        format!("{} {} (-{})", label, issue.message, issue.penalty)
    } else {
        format!("{} {}", label, issue.message)
    }
}

// Formats the verification status for the table
fn format_status(status: Option<&LinkStatus>) -> String {
    match status {
        None => "not checked".to_string(),
        Some(LinkStatus::Ok { code }) => format!("OK ({})", code),
        Some(LinkStatus::HttpError { code }) => format!("BROKEN ({})", code),
        Some(LinkStatus::NetworkError { reason }) => format!("ERROR ({})", reason),
    }
}
