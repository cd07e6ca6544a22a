// src/audit/auditor.rs
// =============================================================================
// The audit driver. One Auditor owns all state for one run:
//
//   discover pages -> for each page (in order): extract -> classify -> resolve
//                  -> link equity (orphans, ranking)
//                  -> verify external URLs on the worker pool
//                  -> fold results into the ledger
//
// Everything before the network phase is single-threaded, so the graph and
// the ledger are plain owned values. The verifier hands its results back
// and only this struct ever appends to the ledger.
// =============================================================================

use crate::audit::graph::{EquityReport, LinkGraph};
use crate::audit::ledger::{Issue, IssueKind, Ledger};
use crate::checker::{
    classify, extract_page, resolve, strip_query_and_fragment, verify_links, Category,
    ElementRecord, LinkCheckResult, LinkStatus, PageFacts, PageId,
};
use crate::config::{AuditConfig, RedirectTable, SiteMetadata};
use crate::crawl::{discover_pages, DiscoveredPage};
use crate::error::Result;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

/// rel tokens every external anchor should carry
pub const SAFETY_REL: [&str; 3] = ["nofollow", "noopener", "noreferrer"];

// One distinct external URL and everything we learned about it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalLinkRecord {
    pub url: String,
    pub sources: BTreeSet<PageId>,
    /// False once any anchor pointing here lacked a safety rel token
    pub safe: bool,
    /// Filled in by the verifier, at most once
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LinkStatus>,
}

#[derive(Debug)]
pub struct Auditor {
    config: AuditConfig,
    site: SiteMetadata,
    redirects: RedirectTable,
    ledger: Ledger,
    graph: LinkGraph,
    pages: Vec<PageId>,
    external: BTreeMap<String, ExternalLinkRecord>,
    soft_routes: BTreeMap<String, BTreeSet<PageId>>,
    equity: EquityReport,
}

impl Auditor {
    pub fn new(config: AuditConfig, site: SiteMetadata, redirects: RedirectTable) -> Self {
        Self {
            config,
            site,
            redirects,
            ledger: Ledger::new(),
            graph: LinkGraph::new(),
            pages: Vec::new(),
            external: BTreeMap::new(),
            soft_routes: BTreeMap::new(),
            equity: EquityReport::default(),
        }
    }

    /// Loads the home page metadata and redirect manifest. Fails only if the
    /// home page itself is missing or unreadable.
    pub fn from_config(config: AuditConfig) -> Result<Self> {
        let site = SiteMetadata::load(&config.root.join(config.home_page()))?;
        let redirects = RedirectTable::load(&config.root);
        Ok(Self::new(config, site, redirects))
    }

    /// Runs the full audit: local phase, equity analysis, then the network
    pub async fn run(&mut self) -> Result<()> {
        self.audit_local();
        if self.config.skip_external {
            info!("Skipping {} external link(s)", self.external.len());
        } else {
            self.check_external_links().await?;
        }
        Ok(())
    }

    /// Everything that doesn't touch the network
    pub fn audit_local(&mut self) {
        info!("Starting SEO audit of {}", self.config.root.display());
        let discovered = discover_pages(&self.config.root, &self.config.extension, &self.config.policy);
        for page in &discovered {
            self.audit_page(page);
        }
        self.analyze_link_equity();
    }

    pub fn audit_page(&mut self, page: &DiscoveredPage) {
        self.pages.push(page.id.clone());

        // Lossy decoding mirrors what a browser does with stray bytes
        match std::fs::read(&page.path) {
            Ok(bytes) => self.audit_html(&page.id, &String::from_utf8_lossy(&bytes)),
            Err(e) => self.ledger.record(
                Issue::new(
                    IssueKind::UnreadablePage,
                    format!("Failed to read file {}: {}", page.id, e),
                )
                .with_subject(page.id.as_str()),
            ),
        }
    }

    pub fn audit_html(&mut self, page: &str, html: &str) {
        debug!("Auditing {}", page);
        let facts = extract_page(html);
        self.check_links(page, &facts);
        self.check_semantics(page, &facts);
    }

    fn check_links(&mut self, page: &str, facts: &PageFacts) {
        for anchor in &facts.anchors {
            let category = classify(anchor.href(), &self.site.origin, &self.config.policy);
            debug!("<{}> {:?} in {}: {:?}", anchor.tag, anchor.text, page, category);
            match category {
                Category::Ignored => {}
                Category::SoftRoute(token) => self.check_soft_route(page, token),
                Category::External(url) => self.check_external(page, anchor, url),
                Category::InternalAbsolute(path) => {
                    self.ledger.record(
                        Issue::new(
                            IssueKind::AbsoluteInternalLink,
                            format!(
                                "In {}: Absolute internal link found '{}'. Should be relative/root-relative.",
                                page,
                                anchor.href()
                            ),
                        )
                        .with_subject(anchor.href()),
                    );
                    self.check_extension(page, &path);
                    self.verify_local_link(page, &path);
                }
                Category::InternalRelative(href) => {
                    if !href.starts_with('/') {
                        self.ledger.record(
                            Issue::new(
                                IssueKind::RelativeLink,
                                format!("In {}: Relative link '{}' found. Recommended: '/{}'", page, href, href),
                            )
                            .with_subject(href.as_str()),
                        );
                    }
                    self.check_extension(page, &href);
                    self.verify_local_link(page, &href);
                }
            }
        }
    }

    fn check_soft_route(&mut self, page: &str, token: String) {
        // An empty table means there is no manifest to check against
        if !self.redirects.is_empty() && !self.redirects.contains(&token) {
            self.ledger.record(
                Issue::new(
                    IssueKind::UnknownSoftRoute,
                    format!("In {}: Soft route '{}' not found in _redirects.", page, token),
                )
                .with_subject(token.as_str()),
            );
        }
        self.soft_routes.entry(token).or_default().insert(page.to_string());
    }

    fn check_extension(&mut self, page: &str, href: &str) {
        let suffix = format!(".{}", self.config.extension);
        if strip_query_and_fragment(href).ends_with(&suffix) {
            self.ledger.record(
                Issue::new(
                    IssueKind::ExtensionLink,
                    format!("In {}: Link with {} suffix '{}'. Recommended: Clean URL.", page, suffix, href),
                )
                .with_subject(href),
            );
        }
    }

    fn verify_local_link(&mut self, page: &str, href: &str) {
        match resolve(href, page, &self.config.root, &self.config.extension) {
            Some(target) => {
                debug!("{} -> {} ({:?})", href, target.page, target.strategy);
                self.graph.record(target.page, page.to_string());
            }
            None => self.ledger.record(
                Issue::new(IssueKind::DeadLink, format!("In {}: Dead Link '{}'", page, href))
                    .with_subject(href),
            ),
        }
    }

    fn check_external(&mut self, page: &str, anchor: &ElementRecord, url: String) {
        let rel = anchor.rel_tokens();
        let missing: Vec<&str> = SAFETY_REL
            .iter()
            .copied()
            .filter(|required| !rel.iter().any(|token| token == required))
            .collect();

        if !missing.is_empty() {
            self.ledger.record(
                Issue::new(
                    IssueKind::UnsafeExternalLink,
                    format!(
                        "In {}: External link '{}' missing rel attributes: {}",
                        page,
                        url,
                        missing.join(", ")
                    ),
                )
                .with_subject(url.as_str()),
            );
        }

        let record = self
            .external
            .entry(url.clone())
            .or_insert_with(|| ExternalLinkRecord {
                url,
                sources: BTreeSet::new(),
                safe: true,
                status: None,
            });
        record.sources.insert(page.to_string());
        record.safe &= missing.is_empty();
    }

    fn check_semantics(&mut self, page: &str, facts: &PageFacts) {
        match facts.h1_count {
            0 => self.ledger.record(
                Issue::new(IssueKind::MissingHeading, format!("In {}: Missing H1 tag.", page))
                    .with_subject(page),
            ),
            1 => {}
            n => self.ledger.record(
                Issue::new(
                    IssueKind::DuplicateHeading,
                    format!("In {}: Multiple H1 tags found ({}).", page, n),
                )
                .with_subject(page),
            ),
        }

        if facts.json_ld_count == 0 {
            self.ledger.record(
                Issue::new(
                    IssueKind::MissingStructuredData,
                    format!("In {}: No Schema.org JSON-LD found.", page),
                )
                .with_subject(page),
            );
        }

        if !facts.has_breadcrumb && page != self.config.home_page() {
            self.ledger.record(
                Issue::new(IssueKind::MissingBreadcrumb, format!("In {}: No breadcrumb navigation.", page))
                    .with_subject(page),
            );
        }
    }

    pub fn analyze_link_equity(&mut self) {
        info!("Analyzing link equity across {} page(s)", self.pages.len());
        self.equity = self.graph.analyze(&self.pages, &self.config.home_page());
        for rank in self.equity.ranking.iter().filter(|rank| rank.inbound > 0) {
            debug!("{} <- {:?}", rank.page, self.graph.sources(&rank.page));
        }

        for orphan in &self.equity.orphans {
            self.ledger.record(
                Issue::new(IssueKind::Orphan, format!("Orphan Page: {} has 0 inbound links.", orphan))
                    .with_subject(orphan.as_str()),
            );
        }
        if self.equity.orphans.is_empty() && !self.pages.is_empty() {
            self.ledger.record(Issue::new(IssueKind::NoOrphans, "No orphan pages found."));
        }
    }

    pub async fn check_external_links(&mut self) -> Result<()> {
        let pending: Vec<String> = self
            .external
            .values()
            .filter(|record| record.status.is_none())
            .map(|record| record.url.clone())
            .collect();
        info!("Checking {} external link(s)", pending.len());

        let results = verify_links(pending, &self.config.verifier).await?;
        let ok = results.iter().filter(|r| r.is_ok()).count();
        info!("{} of {} external link(s) OK", ok, results.len());
        self.apply_verification(results);
        Ok(())
    }

    /// Folds verifier results into the ledger. A URL that already has a
    /// status is never counted again.
    pub fn apply_verification(&mut self, results: Vec<LinkCheckResult>) {
        for result in results {
            let Some(record) = self.external.get_mut(&result.url) else {
                continue;
            };
            if record.status.is_some() {
                continue;
            }

            match &result.status {
                LinkStatus::Ok { .. } => {}
                LinkStatus::HttpError { code } => self.ledger.record(
                    Issue::new(
                        IssueKind::ExternalLink,
                        format!("External Dead Link '{}' (Status: {})", result.url, code),
                    )
                    .with_subject(result.url.as_str()),
                ),
                LinkStatus::NetworkError { reason } => self.ledger.record(
                    Issue::new(
                        IssueKind::ExternalLink,
                        format!("External Link Error '{}': {}", result.url, reason),
                    )
                    .with_subject(result.url.as_str()),
                ),
            }
            record.status = Some(result.status);
        }
    }

    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    pub fn site(&self) -> &SiteMetadata {
        &self.site
    }

    pub fn redirects(&self) -> &RedirectTable {
        &self.redirects
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn graph(&self) -> &LinkGraph {
        &self.graph
    }

    pub fn pages(&self) -> &[PageId] {
        &self.pages
    }

    pub fn equity(&self) -> &EquityReport {
        &self.equity
    }

    pub fn external_links(&self) -> impl Iterator<Item = &ExternalLinkRecord> {
        self.external.values()
    }

    pub fn soft_routes(&self) -> &BTreeMap<String, BTreeSet<PageId>> {
        &self.soft_routes
    }
}
