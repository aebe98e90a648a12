//! codelens core - report model and local heuristic analysis
//!
//! This crate provides:
//! - The four-bucket issue report model with its derived summary
//! - A line scanner running textual heuristics over Java source
//! - The builder turning scanner findings into a local report
//! - The merger combining the local report with a remote one

#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
)]
#![allow(
    clippy::module_name_repetitions,  // Often necessary for clarity
)]

pub mod builder;
pub mod merge;
pub mod models;
pub mod scanner;

pub use builder::{local_report, HeuristicIssueBuilder};
pub use merge::merge_reports;
pub use models::{
    issue::{CriticalError, IssueCategory, IssueRecord, Optimization, Priority, SecurityIssue, Warning},
    report::{IssueCounts, QualityLabel, Report, ReportOrigin, Summary},
};
pub use scanner::{Finding, LineScanner, SourceLine};

/// Message shown when the submitted source is empty
pub const EMPTY_SOURCE_MESSAGE: &str = "Please enter some Java code to analyze";

/// Result type used throughout codelens core
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for codelens core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Submitted source rejected before analysis
    #[error("{0}")]
    InputValidation(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Analysis error
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Utility error
    #[error("Utility error: {0}")]
    Util(#[from] codelens_utils::UtilError),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reject empty or whitespace-only source before any work happens
pub fn validate_source(source: &str) -> Result<&str> {
    if codelens_utils::is_blank(source) {
        return Err(Error::InputValidation(EMPTY_SOURCE_MESSAGE.to_string()));
    }
    Ok(source)
}
