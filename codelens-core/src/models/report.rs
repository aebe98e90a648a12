//! Report and summary model
//!
//! The summary is always derived from the report's buckets; nothing
//! outside this module assembles one field by field.

use super::issue::{CriticalError, Optimization, SecurityIssue, Warning};
use serde::{Deserialize, Serialize};

/// Overall code quality label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QualityLabel {
    Excellent,
    #[default]
    Good,
    Satisfactory,
    NeedsImprovement,
    CriticalIssues,
}

/// Where a report's issues came from; selects the clean-code label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOrigin {
    /// Heuristic findings only
    Local,
    /// Heuristic findings merged with a remote review
    Merged,
}

/// Bucket sizes of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IssueCounts {
    pub critical: usize,
    pub warning: usize,
    pub optimization: usize,
    pub security: usize,
}

impl IssueCounts {
    /// All four buckets count toward the total
    pub const fn total(&self) -> usize {
        self.critical + self.warning + self.optimization + self.security
    }
}

impl QualityLabel {
    /// Ordered rule over the final counts:
    /// critical > 0, then warnings > 3, then warnings > 0, then a clean
    /// merged report is EXCELLENT, otherwise GOOD.
    pub const fn derive(counts: &IssueCounts, origin: ReportOrigin) -> Self {
        if counts.critical > 0 {
            Self::CriticalIssues
        } else if counts.warning > 3 {
            Self::NeedsImprovement
        } else if counts.warning > 0 {
            Self::Satisfactory
        } else if matches!(origin, ReportOrigin::Merged) && counts.total() == 0 {
            Self::Excellent
        } else {
            Self::Good
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "EXCELLENT",
            Self::Good => "GOOD",
            Self::Satisfactory => "SATISFACTORY",
            Self::NeedsImprovement => "NEEDS_IMPROVEMENT",
            Self::CriticalIssues => "CRITICAL_ISSUES",
        }
    }
}

impl std::fmt::Display for QualityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate counts plus the derived quality label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Summary {
    pub total_issues: usize,
    pub critical_count: usize,
    pub warning_count: usize,
    pub optimization_count: usize,
    pub security_count: usize,
    pub overall_code_quality: QualityLabel,
}

impl Summary {
    pub const fn derive(counts: IssueCounts, origin: ReportOrigin) -> Self {
        Self {
            total_issues: counts.total(),
            critical_count: counts.critical,
            warning_count: counts.warning,
            optimization_count: counts.optimization,
            security_count: counts.security,
            overall_code_quality: QualityLabel::derive(&counts, origin),
        }
    }
}

/// Four issue buckets plus summary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Report {
    pub critical_errors: Vec<CriticalError>,
    pub warnings: Vec<Warning>,
    pub optimizations: Vec<Optimization>,
    pub security: Vec<SecurityIssue>,
    pub summary: Summary,
}

impl Report {
    /// Build a report and derive its summary from the buckets
    pub fn new(
        critical_errors: Vec<CriticalError>,
        warnings: Vec<Warning>,
        optimizations: Vec<Optimization>,
        security: Vec<SecurityIssue>,
        origin: ReportOrigin,
    ) -> Self {
        let mut report = Self {
            critical_errors,
            warnings,
            optimizations,
            security,
            summary: Summary::default(),
        };
        report.recompute_summary(origin);
        report
    }

    pub fn counts(&self) -> IssueCounts {
        IssueCounts {
            critical: self.critical_errors.len(),
            warning: self.warnings.len(),
            optimization: self.optimizations.len(),
            security: self.security.len(),
        }
    }

    /// Re-derive the summary from current bucket sizes
    pub fn recompute_summary(&mut self, origin: ReportOrigin) {
        self.summary = Summary::derive(self.counts(), origin);
    }

    pub fn has_critical_errors(&self) -> bool {
        !self.critical_errors.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.counts().total() == 0
    }
}
