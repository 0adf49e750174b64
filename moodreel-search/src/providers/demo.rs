//! Demo catalog for development and offline use.

use std::time::Duration;

use async_trait::async_trait;
use moodreel_core::types::PAGE_SIZE;
use moodreel_core::{ContentType, MovieSummary, SearchRequest};

use super::CatalogProvider;
use crate::errors::CatalogError;
use crate::types::CatalogPage;

/// Keywords the demo catalog has no titles for.
const EMPTY_KEYWORDS: &[&str] = &["educational", "art & experimental"];

/// Deterministic in-memory catalog.
///
/// Every keyword yields a stable set of generated titles so the full search
/// and pagination workflow can be exercised without an API key. A configurable
/// latency makes the loading state visible in the UI.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    latency: Option<Duration>,
}

impl StaticCatalog {
    /// Catalog that answers immediately.
    pub fn new() -> Self {
        Self { latency: None }
    }

    /// Delays every response by `latency`.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
        }
    }

    /// Total number of titles the demo catalog holds for a query.
    pub fn total_for(keyword: &str, content_type: ContentType) -> u64 {
        if EMPTY_KEYWORDS.contains(&keyword) {
            return 0;
        }
        let base = keyword.bytes().map(u64::from).sum::<u64>() % 37 + 8;
        match content_type {
            ContentType::Series => base / 2 + 1,
            ContentType::Movie | ContentType::Unset => base,
        }
    }

    fn title_at(keyword: &str, content_type: ContentType, index: u64) -> MovieSummary {
        let seed = keyword.bytes().map(u64::from).sum::<u64>();
        let kind = match content_type {
            ContentType::Series => "series",
            ContentType::Movie | ContentType::Unset => "movie",
        };
        let year = 1980 + (seed + index * 7) % 45;

        MovieSummary {
            id: format!("tt{:07}", seed * 1000 + index),
            title: format!("{} Tales, Part {}", capitalize(keyword), index + 1),
            year: if content_type == ContentType::Series {
                format!("{year}–{}", year + 2)
            } else {
                year.to_string()
            },
            poster_url: if index % 3 == 2 {
                "N/A".to_string()
            } else {
                format!("https://placehold.co/300x450?text={}", index + 1)
            },
            kind: kind.to_string(),
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[async_trait]
impl CatalogProvider for StaticCatalog {
    async fn search_titles(&self, request: &SearchRequest) -> Result<CatalogPage, CatalogError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let total_count = Self::total_for(&request.keyword, request.content_type);
        let start = u64::from(request.page.saturating_sub(1)) * PAGE_SIZE;
        if start >= total_count {
            return Err(CatalogError::NotFound {
                reason: Some("Movie not found!".to_string()),
            });
        }

        let end = (start + PAGE_SIZE).min(total_count);
        let items = (start..end)
            .map(|index| Self::title_at(&request.keyword, request.content_type, index))
            .collect();

        Ok(CatalogPage { items, total_count })
    }
}
