//! Result merger
//!
//! Local findings are prepended to the remote ones in the critical and
//! warning buckets; optimizations and security come only from the remote
//! report. The summary is always re-derived from the merged buckets.

use crate::models::{Report, ReportOrigin};

/// Combine the local report with an optional remote report
pub fn merge_reports(local: Report, remote: Option<Report>) -> Report {
    let Some(remote) = remote else {
        let mut local = local;
        local.recompute_summary(ReportOrigin::Local);
        return local;
    };

    let Report { mut critical_errors, mut warnings, .. } = local;

    critical_errors.extend(remote.critical_errors);
    warnings.extend(remote.warnings);

    let merged = Report::new(
        critical_errors,
        warnings,
        remote.optimizations,
        remote.security,
        ReportOrigin::Merged,
    );

    tracing::debug!(
        "Merged report: {} critical, {} warnings, {} optimizations, {} security",
        merged.summary.critical_count,
        merged.summary.warning_count,
        merged.summary.optimization_count,
        merged.summary.security_count
    );
    merged
}
