//! Data types for catalog search results.

use moodreel_core::MovieSummary;
use moodreel_core::types::{has_next_page, page_count};
use serde::Serialize;

/// One page of catalog results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogPage {
    /// Items in catalog order, at most one page worth
    pub items: Vec<MovieSummary>,
    /// Total matches the catalog reports across all pages
    pub total_count: u64,
}

impl CatalogPage {
    /// Number of pages the reported total spans.
    pub fn page_count(&self) -> u64 {
        page_count(self.total_count)
    }

    /// Whether another page exists after `page`.
    pub fn has_next_page(&self, page: u32) -> bool {
        has_next_page(self.total_count, page)
    }
}

/// How a catalog request ended, as recorded in session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResponseKind {
    /// Catalog returned a page of results
    Ok,
    /// Catalog answered with no matches
    NotFound,
    /// Request never produced a usable catalog answer
    TransportError,
}
