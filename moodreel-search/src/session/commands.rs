//! Command definitions for the search session actor.

use moodreel_core::{ContentType, SearchRequest};
use tokio::sync::oneshot;

use crate::errors::{CatalogError, SearchError};
use crate::types::CatalogPage;

/// Commands processed by the search session actor.
///
/// User-facing commands carry a responder; settlements arrive from fetch
/// tasks on a separate channel and carry the generation they were issued
/// under.
#[derive(Debug)]
pub enum SessionCommand {
    /// Validate input and search page 1.
    SubmitSearch {
        /// Raw mood input
        mood: String,
        /// Selected content type
        content_type: ContentType,
        /// Receives the issued request or the rejection
        responder: oneshot::Sender<Result<SearchRequest, SearchError>>,
    },
    /// Move relative to the current page.
    GoToPage {
        /// Pages to move; negative moves back
        delta: i64,
        /// Receives the issued request, or `None` when the move was rejected
        responder: oneshot::Sender<Option<SearchRequest>>,
    },
    /// A fetch task finished.
    FetchSettled {
        /// Generation the fetch was issued under
        generation: u64,
        /// Provider result
        outcome: Result<CatalogPage, CatalogError>,
    },
    /// Stop the actor.
    Shutdown {
        /// Signalled once the actor has stopped
        responder: oneshot::Sender<()>,
    },
}
