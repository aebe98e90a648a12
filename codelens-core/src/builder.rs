//! Heuristic issue builder
//!
//! Turns scanner findings into issue records and derives the local
//! report's summary.

use crate::models::{CriticalError, Priority, Report, ReportOrigin, Warning};
use crate::scanner::{Finding, LineScanner};

const SEMICOLON_DESCRIPTION: &str = "Possible missing semicolon at end of line.";
const NULL_CHECK_EXAMPLE: &str =
    "if (object != null) { object.method(); } // instead of: object.method() != null";

/// Builds issue records from findings against the original source text
pub struct HeuristicIssueBuilder<'a> {
    source: &'a str,
}

impl<'a> HeuristicIssueBuilder<'a> {
    pub const fn new(source: &'a str) -> Self {
        Self { source }
    }

    /// Build the local report; bucket order follows finding order
    pub fn build(&self, findings: &[Finding]) -> Report {
        let mut critical_errors = Vec::new();
        let mut warnings = Vec::new();

        for finding in findings {
            match finding {
                Finding::MissingClosingBraces { missing, last_open_line } => {
                    critical_errors.push(self.missing_braces(*missing, *last_open_line));
                }
                Finding::ExtraClosingBraces { extra } => {
                    critical_errors.push(Self::extra_braces(*extra));
                }
                Finding::MissingSemicolon { line, statement } => {
                    warnings.push(Self::missing_semicolon(*line, statement));
                }
                Finding::NullCheckAfterDereference { line } => {
                    warnings.push(Self::null_check_order(*line));
                }
            }
        }

        let report = Report::new(critical_errors, warnings, Vec::new(), Vec::new(), ReportOrigin::Local);
        tracing::info!(
            "Local scan: {} critical error(s), {} warning(s), quality {}",
            report.summary.critical_count,
            report.summary.warning_count,
            report.summary.overall_code_quality
        );
        report
    }

    fn missing_braces(&self, missing: usize, last_open_line: Option<u32>) -> CriticalError {
        CriticalError {
            kind: "Syntax Error".to_string(),
            line: last_open_line,
            description: format!("Missing {missing} closing brace(s) '}}'."),
            impact: Some("Code will not compile. Incomplete code block structure.".to_string()),
            fix_recommendation: Some(
                "Add the missing closing brace(s) to properly close all code blocks.".to_string(),
            ),
            code_example: Some(format!("Your code with fix:\n{}\n{}", self.source, "}\n".repeat(missing))),
            priority: Some(Priority::High),
        }
    }

    fn extra_braces(extra: usize) -> CriticalError {
        CriticalError {
            kind: "Syntax Error".to_string(),
            line: None,
            description: format!("{extra} extra closing brace(s) '}}' found."),
            impact: Some("Code will not compile. Incorrect code block structure.".to_string()),
            fix_recommendation: Some(
                "Remove the extra closing brace(s) to balance all code blocks.".to_string(),
            ),
            code_example: Some("Review your code and remove extra closing braces".to_string()),
            priority: Some(Priority::High),
        }
    }

    fn missing_semicolon(line: u32, statement: &str) -> Warning {
        Warning {
            kind: "Syntax Warning".to_string(),
            line: Some(line),
            description: SEMICOLON_DESCRIPTION.to_string(),
            best_practice: Some("End statements with semicolons in Java.".to_string()),
            fix_recommendation: Some(
                "Add a semicolon at the end of this line if it's a statement.".to_string(),
            ),
            code_example: Some(format!("{statement};")),
            priority: Some(Priority::Medium),
        }
    }

    fn null_check_order(line: u32) -> Warning {
        Warning {
            kind: "Null Pointer Risk".to_string(),
            line: Some(line),
            description: "Possible null pointer exception. Null check appears after method/property access."
                .to_string(),
            best_practice: Some(
                "Always check for null before accessing object methods or properties.".to_string(),
            ),
            fix_recommendation: Some(
                "Rearrange code to check for null before accessing the object.".to_string(),
            ),
            code_example: Some(NULL_CHECK_EXAMPLE.to_string()),
            priority: Some(Priority::High),
        }
    }
}

/// Scan with the default checks and build the local report
pub fn local_report(source: &str) -> Report {
    let findings = LineScanner::default().scan(source);
    HeuristicIssueBuilder::new(source).build(&findings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QualityLabel;

    #[test]
    fn test_missing_semicolon_example() {
        let report = local_report("int x = 5\nint y = 6;");
        assert!(report.critical_errors.is_empty());
        assert_eq!(report.warnings.len(), 1);
        let warning = &report.warnings[0];
        assert_eq!(warning.line, Some(1));
        assert_eq!(warning.code_example.as_deref(), Some("int x = 5;"));
        assert_eq!(warning.priority, Some(Priority::Medium));
        assert_eq!(report.summary.overall_code_quality, QualityLabel::Satisfactory);
        assert_eq!(report.summary.total_issues, 1);
    }

    #[test]
    fn test_unclosed_class_is_critical() {
        let source = "class A { void f() ";
        let report = local_report(source);
        assert_eq!(report.critical_errors.len(), 1);
        let error = &report.critical_errors[0];
        assert_eq!(error.description, "Missing 1 closing brace(s) '}'.");
        assert_eq!(error.line, Some(1));
        assert_eq!(
            error.code_example.as_deref(),
            Some("Your code with fix:\nclass A { void f() \n}\n")
        );
        assert_eq!(report.summary.overall_code_quality, QualityLabel::CriticalIssues);
    }

    #[test]
    fn test_extra_braces_message() {
        let report = local_report("}\n}");
        assert_eq!(report.critical_errors[0].description, "2 extra closing brace(s) '}' found.");
        assert_eq!(report.critical_errors[0].line, None);
    }

    #[test]
    fn test_many_warnings_need_improvement() {
        let report = local_report("a\nb\nc\nd");
        assert_eq!(report.summary.warning_count, 4);
        assert_eq!(report.summary.overall_code_quality, QualityLabel::NeedsImprovement);
    }

    #[test]
    fn test_clean_local_report_is_good() {
        let report = local_report("int x = 1;");
        assert!(report.is_empty());
        assert_eq!(report.summary.overall_code_quality, QualityLabel::Good);
    }

    #[test]
    fn test_null_check_warning_fields() {
        let report = local_report("if (a.b() != null) {\n}");
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].kind, "Null Pointer Risk");
        assert_eq!(report.warnings[0].priority, Some(Priority::High));
    }
}
