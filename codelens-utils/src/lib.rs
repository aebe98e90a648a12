//! codelens utilities - logging, configuration and string helpers
//!
//! Small shared pieces used by every codelens crate: the tracing
//! subscriber bootstrap, format-detecting config loading, and
//! grapheme-safe truncation for log snippets.

#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

pub mod config;
pub mod logging;
pub mod string;

pub use config::{load_config, ConfigFormat};
pub use string::{is_blank, safe_truncate};

/// Result type used throughout codelens utilities
pub type Result<T> = std::result::Result<T, UtilError>;

/// Error types for utility operations
#[derive(Debug, thiserror::Error)]
pub enum UtilError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Logging setup error
    #[error("Logging error: {0}")]
    Logging(String),
}
