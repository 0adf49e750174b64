//! Moodreel Search - Catalog search and search sessions

#![warn(missing_docs)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![warn(clippy::too_many_lines)]
//!
//! Talks to the OMDb catalog (or the built-in demo catalog) and owns the
//! request lifecycle of a mood search: one request in flight, pagination,
//! and last-request-wins reconciliation of responses.

pub mod errors;
pub mod providers;
pub mod session;
pub mod types;

// Re-export main types
pub use errors::{CatalogError, MissingField, SearchError};
pub use providers::{CatalogProvider, OmdbProvider, StaticCatalog, provider_for_mode};
pub use session::{Phase, QueryView, SearchSessionHandle, spawn_search_session};
pub use types::{CatalogPage, ResponseKind};

/// Convenience type alias for Results with SearchError.
pub type Result<T> = std::result::Result<T, SearchError>;
