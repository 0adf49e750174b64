//! Error types for catalog search and search sessions.

use moodreel_core::MoodError;
use thiserror::Error;

/// Message shown for any transport-level failure.
pub const TRANSPORT_FAILURE_MESSAGE: &str =
    "Could not reach the movie catalog. Please try again.";

/// Message shown when the catalog has nothing and gives no reason.
pub const NOT_FOUND_FALLBACK_MESSAGE: &str = "No results found";

/// Errors a catalog provider can return for one search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Catalog answered with a structured "nothing found" response.
    #[error("Catalog returned no results: {}", reason.as_deref().unwrap_or(NOT_FOUND_FALLBACK_MESSAGE))]
    NotFound {
        /// Reason text supplied by the catalog, if any
        reason: Option<String>,
    },

    /// Network communication error occurred during search.
    #[error("Network error: {reason}")]
    NetworkError {
        /// The reason for the network error
        reason: String,
    },

    /// Catalog answered with a non-success HTTP status.
    #[error("Catalog responded with HTTP {status}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
    },

    /// Failed to parse the catalog response body.
    #[error("Parse error: {reason}")]
    ParseError {
        /// The reason for the parse error
        reason: String,
    },
}

impl CatalogError {
    /// Whether the failure happened below the catalog's own response format.
    pub fn is_transport(&self) -> bool {
        !matches!(self, CatalogError::NotFound { .. })
    }
}

/// Which required search inputs were absent at submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    /// Mood was blank
    Mood,
    /// No content type picked
    ContentType,
    /// Both were absent
    MoodAndContentType,
}

impl std::fmt::Display for MissingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingField::Mood => write!(f, "Please enter a mood"),
            MissingField::ContentType => write!(f, "Please select movie or series"),
            MissingField::MoodAndContentType => {
                write!(f, "Please enter a mood and select movie or series")
            }
        }
    }
}

/// Errors surfaced by a search session.
///
/// Every variant is recoverable by the next submit or page change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Mood text or content type absent; no request was made.
    #[error("{missing}")]
    MissingInput {
        /// What was missing
        missing: MissingField,
    },

    /// Mood text is not in the mood table; no request was made.
    #[error("Mood not recognized: '{input}'")]
    UnmappedMood {
        /// The mood as typed
        input: String,
    },

    /// Catalog reported no matches.
    #[error("{reason}")]
    ApiNotFound {
        /// Catalog reason text, or the generic fallback
        reason: String,
    },

    /// Network, HTTP or decoding failure.
    #[error("Transport failure: {reason}")]
    TransportFailure {
        /// Diagnostic detail, not shown to users
        reason: String,
    },

    /// The session actor is no longer running.
    #[error("Search session is closed")]
    SessionClosed,
}

impl SearchError {
    /// Message suitable for showing in the UI.
    ///
    /// Transport details are replaced by a generic retry hint.
    pub fn user_message(&self) -> String {
        match self {
            SearchError::TransportFailure { .. } => TRANSPORT_FAILURE_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<MoodError> for SearchError {
    fn from(error: MoodError) -> Self {
        match error {
            MoodError::Empty => SearchError::MissingInput {
                missing: MissingField::Mood,
            },
            MoodError::Unmapped { input } => SearchError::UnmappedMood { input },
        }
    }
}

impl From<CatalogError> for SearchError {
    fn from(error: CatalogError) -> Self {
        match error {
            CatalogError::NotFound { reason } => SearchError::ApiNotFound {
                reason: reason
                    .filter(|r| !r.trim().is_empty())
                    .unwrap_or_else(|| NOT_FOUND_FALLBACK_MESSAGE.to_string()),
            },
            transport => SearchError::TransportFailure {
                reason: transport.to_string(),
            },
        }
    }
}
