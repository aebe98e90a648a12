//! codelens Analysis - Pipeline and Export
//!
//! Runs the local heuristic scan, decides whether a remote review may be
//! attempted, merges the results and renders the final report.

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod export;
pub mod pipeline;

// Re-export main types for convenience
pub use export::{ExportFormat, ReportExporter};
pub use pipeline::{
    describe_failure, AnalysisMetadata, AnalysisOutcome, AnalyzerConfig, CodeAnalyzer,
    RemoteStatus, SkipReason,
};

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, codelens_core::Error>;
