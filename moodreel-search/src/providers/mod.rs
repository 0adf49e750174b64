//! Catalog provider implementations.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moodreel_core::config::CatalogConfig;
use moodreel_core::{RuntimeMode, SearchRequest};

use crate::errors::CatalogError;
use crate::types::CatalogPage;

pub mod demo;
#[cfg(any(test, feature = "test-utils"))]
pub mod gated;
pub mod omdb;

pub use demo::StaticCatalog;
#[cfg(any(test, feature = "test-utils"))]
pub use gated::GatedCatalog;
pub use omdb::OmdbProvider;

/// Trait for paginated catalog search backends.
///
/// Implementations provide title search through different backends
/// (the OMDb API, built-in demo data, gated providers for testing).
#[async_trait]
pub trait CatalogProvider: Send + Sync + std::fmt::Debug {
    /// Search one page of titles matching the request.
    ///
    /// # Errors
    /// - `CatalogError::NotFound` - Catalog has no matches for the query or page
    /// - `CatalogError::NetworkError` - Network connectivity issues
    /// - `CatalogError::HttpStatus` - Catalog answered with a non-success status
    /// - `CatalogError::ParseError` - Response body could not be decoded
    async fn search_titles(&self, request: &SearchRequest) -> Result<CatalogPage, CatalogError>;
}

/// Delay of demo responses, long enough to see the loading state.
pub const DEMO_LATENCY: Duration = Duration::from_millis(250);

/// Builds the provider matching the runtime mode.
///
/// # Errors
/// - `CatalogError::NetworkError` - HTTP client could not be constructed
pub fn provider_for_mode(
    mode: RuntimeMode,
    config: &CatalogConfig,
) -> Result<Arc<dyn CatalogProvider>, CatalogError> {
    match mode {
        RuntimeMode::Production => Ok(Arc::new(OmdbProvider::from_config(config)?)),
        RuntimeMode::Development => Ok(Arc::new(StaticCatalog::with_latency(DEMO_LATENCY))),
    }
}
