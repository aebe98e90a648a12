//! Data models for codelens reports
//!
//! Issue records for the four report buckets and the report/summary
//! structures that aggregate them. Field names on the wire follow the
//! JSON document the remote reviewer is asked to produce.

pub mod issue;
pub mod report;

pub use issue::{CriticalError, IssueCategory, IssueRecord, Optimization, Priority, SecurityIssue, Warning};
pub use report::{IssueCounts, QualityLabel, Report, ReportOrigin, Summary};
