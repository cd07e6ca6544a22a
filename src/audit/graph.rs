// src/audit/graph.rs
// =============================================================================
// The internal link graph: for each target page, every page that links to it.
//
// Sources are kept as a list, not a set. Two links from the same page to the
// same target count twice; inbound counts are a rough measure of link equity
// and repeated links are part of that signal.
// =============================================================================

use crate::checker::PageId;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkGraph {
    inbound: HashMap<PageId, Vec<PageId>>,
}

/// One row of the "most linked" ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRank {
    pub page: PageId,
    pub inbound: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EquityReport {
    /// Pages with zero inbound links, in discovery order (home page excluded)
    pub orphans: Vec<PageId>,
    /// All pages by inbound count, descending; ties keep discovery order
    pub ranking: Vec<PageRank>,
}

impl LinkGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, target: PageId, source: PageId) {
        self.inbound.entry(target).or_default().push(source);
    }

    pub fn inbound_count(&self, page: &str) -> usize {
        self.inbound.get(page).map_or(0, Vec::len)
    }

    pub fn sources(&self, page: &str) -> &[PageId] {
        self.inbound.get(page).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.inbound.is_empty()
    }

    /// Orphans and ranking over the discovered page universe
    pub fn analyze(&self, pages: &[PageId], home_page: &str) -> EquityReport {
        let mut ranking: Vec<PageRank> = pages
            .iter()
            .map(|page| PageRank {
                page: page.clone(),
                inbound: self.inbound_count(page),
            })
            .collect();

        let orphans = ranking
            .iter()
            .filter(|rank| rank.inbound == 0 && rank.page != home_page)
            .map(|rank| rank.page.clone())
            .collect();

        // sort_by is stable, which is what keeps ties in discovery order
        ranking.sort_by(|a, b| b.inbound.cmp(&a.inbound));

        EquityReport { orphans, ranking }
    }
}
