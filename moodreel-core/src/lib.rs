//! Moodreel Core - Mood resolution and shared building blocks
//!
//! This crate provides the pieces every other Moodreel crate leans on: the
//! fixed mood table and its resolver, catalog-facing domain types,
//! configuration management and tracing setup.

pub mod config;
pub mod mode;
pub mod mood;
pub mod tracing_setup;
pub mod types;

// Re-export main types for convenient access
pub use config::MoodreelConfig;
pub use mode::RuntimeMode;
pub use mood::{MoodError, MoodTable};
pub use types::{ContentType, MovieSummary, PAGE_SIZE, SearchRequest};

/// Core errors that can bubble up while starting or running Moodreel.
#[derive(Debug, thiserror::Error)]
pub enum MoodreelError {
    #[error("Configuration error: {reason}")]
    Configuration { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Web server error: {reason}")]
    Server { reason: String },
}

impl MoodreelError {
    /// Returns a user-friendly error message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            MoodreelError::Configuration { reason } => format!("Configuration problem: {reason}"),
            MoodreelError::Io(_) => "File system error occurred".to_string(),
            MoodreelError::Server { reason } => format!("Web server error: {reason}"),
        }
    }

    /// Checks if this error is caused by how Moodreel was configured.
    pub fn is_user_error(&self) -> bool {
        matches!(self, MoodreelError::Configuration { .. })
    }

    /// Wraps any displayable server failure.
    pub fn from_server_error(error: impl std::fmt::Display) -> Self {
        MoodreelError::Server {
            reason: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MoodreelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_errors_are_user_errors() {
        let error = MoodreelError::Configuration {
            reason: "OMDB_API_KEY is not set".to_string(),
        };
        assert!(error.is_user_error());
        assert_eq!(
            error.user_message(),
            "Configuration problem: OMDB_API_KEY is not set"
        );

        let io = MoodreelError::from(std::io::Error::other("disk gone"));
        assert!(!io.is_user_error());
        assert_eq!(io.user_message(), "File system error occurred");
    }

    #[test]
    fn test_server_error_wraps_display() {
        let error = MoodreelError::from_server_error("address in use");
        assert_eq!(error.to_string(), "Web server error: address in use");
    }
}
