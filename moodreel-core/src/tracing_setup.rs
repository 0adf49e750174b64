//! Tracing setup for Moodreel
//!
//! Console logs follow the user's chosen level. When a logs directory is
//! given, every event down to TRACE is also written to a per-run log file so
//! a failed session can be inspected after the fact.

use std::fs::{File, create_dir_all};
use std::path::{Path, PathBuf};

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// File name of the debug log written into the logs directory.
pub const LOG_FILE_NAME: &str = "moodreel-last-run.log";

/// Initialize tracing with console output and an optional debug log file.
///
/// `RUST_LOG` takes precedence over `console_level` for the console layer.
/// Returns the path of the debug log file when one was opened; the file is
/// overwritten on every run.
///
/// # Errors
///
/// - `Box<dyn std::error::Error>` - If the logs directory cannot be created,
///   the log file cannot be opened, or a global subscriber is already set
pub fn init_tracing(
    console_level: Level,
    logs_dir: Option<&Path>,
) -> Result<Option<PathBuf>, Box<dyn std::error::Error>> {
    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_filter(console_filter(console_level));

    let Some(logs_path) = logs_dir else {
        tracing_subscriber::registry()
            .with(console_layer)
            .try_init()?;
        tracing::debug!("Tracing initialized: console={console_level}");
        return Ok(None);
    };

    create_dir_all(logs_path)?;
    let log_file_path = logs_path.join(LOG_FILE_NAME);
    let log_file = File::create(&log_file_path)?;

    let file_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_writer(log_file)
        .with_filter(EnvFilter::new("trace"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    tracing::info!(
        "Tracing initialized: console={}, debug_file={}",
        console_level,
        log_file_path.display()
    );

    Ok(Some(log_file_path))
}

/// Console filter honoring `RUST_LOG` before the requested level.
fn console_filter(console_level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(console_level.to_string()))
}

/// CLI log levels for user control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum CliLogLevel {
    /// Only error messages
    Error,
    /// Warning and error messages
    #[default]
    Warn,
    /// Informational, warning, and error messages
    Info,
    /// Debug, informational, warning, and error messages
    Debug,
    /// All messages including detailed tracing
    Trace,
}

impl CliLogLevel {
    /// Converts CLI log level to tracing Level enum.
    ///
    /// # Examples
    /// ```
    /// use moodreel_core::tracing_setup::CliLogLevel;
    ///
    /// let level = CliLogLevel::Info.as_tracing_level();
    /// assert_eq!(level, tracing::Level::INFO);
    /// ```
    pub fn as_tracing_level(self) -> Level {
        match self {
            CliLogLevel::Error => Level::ERROR,
            CliLogLevel::Warn => Level::WARN,
            CliLogLevel::Info => Level::INFO,
            CliLogLevel::Debug => Level::DEBUG,
            CliLogLevel::Trace => Level::TRACE,
        }
    }
}

impl std::fmt::Display for CliLogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliLogLevel::Error => write!(f, "error"),
            CliLogLevel::Warn => write!(f, "warn"),
            CliLogLevel::Info => write!(f, "info"),
            CliLogLevel::Debug => write!(f, "debug"),
            CliLogLevel::Trace => write!(f, "trace"),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::ValueEnum;

    use super::*;

    #[test]
    fn test_cli_levels_map_to_tracing_levels() {
        assert_eq!(CliLogLevel::Error.as_tracing_level(), Level::ERROR);
        assert_eq!(CliLogLevel::Trace.as_tracing_level(), Level::TRACE);
        assert_eq!(CliLogLevel::default(), CliLogLevel::Warn);
    }

    #[test]
    fn test_cli_level_parses_from_flag_value() {
        let parsed = CliLogLevel::from_str("debug", true).unwrap();
        assert_eq!(parsed, CliLogLevel::Debug);
        assert_eq!(parsed.to_string(), "debug");
        assert!(CliLogLevel::from_str("loud", true).is_err());
    }

    #[test]
    fn test_file_output_creates_log_in_directory() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");

        // Another test may already own the global subscriber; the file is
        // created before installation is attempted either way.
        let _ = init_tracing(Level::WARN, Some(&logs));

        assert!(logs.join(LOG_FILE_NAME).exists());
    }
}
