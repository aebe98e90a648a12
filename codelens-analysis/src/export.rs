//! Report exporters
//!
//! JSON and YAML serialize the whole outcome. Markdown, HTML and plain
//! text share one section layout: Summary, Critical Errors, Warnings,
//! Optimizations, Security Issues. Empty issue sections are left out.

use crate::pipeline::AnalysisOutcome;
use crate::Result;
use codelens_core::{Error, IssueCategory, IssueRecord, Report};
use pulldown_cmark::{html, Event, Options, Parser};
use std::fmt::Write as _;
use std::str::FromStr;

/// Output formats understood by the exporters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Json,
    Yaml,
    Markdown,
    Html,
    Text,
}

impl ExportFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Markdown => "md",
            Self::Html => "html",
            Self::Text => "txt",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "markdown" | "md" => Ok(Self::Markdown),
            "html" => Ok(Self::Html),
            "text" | "txt" => Ok(Self::Text),
            other => Err(Error::Config(format!("Unknown export format: {other}"))),
        }
    }
}

const PRINT_STYLESHEET: &str = "\
body { font-family: Helvetica, Arial, sans-serif; margin: 2em; color: #222; }
h1 { border-bottom: 2px solid #444; }
h2 { page-break-before: always; break-before: page; border-bottom: 1px solid #aaa; }
h2:first-of-type { page-break-before: avoid; break-before: avoid; }
pre { background: #f5f5f5; padding: 0.75em; white-space: pre-wrap; }
table { border-collapse: collapse; }
td, th { border: 1px solid #ccc; padding: 0.3em 0.8em; text-align: left; }
";

/// Export analysis outcomes to various formats
pub struct ReportExporter;

impl ReportExporter {
    pub fn export(outcome: &AnalysisOutcome, format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Json => Self::to_json(outcome),
            ExportFormat::Yaml => Self::to_yaml(outcome),
            ExportFormat::Markdown => Ok(Self::to_markdown(outcome)),
            ExportFormat::Html => Ok(Self::to_html(outcome)),
            ExportFormat::Text => Ok(Self::to_text(outcome)),
        }
    }

    pub fn to_json(outcome: &AnalysisOutcome) -> Result<String> {
        Ok(serde_json::to_string_pretty(outcome)?)
    }

    pub fn to_yaml(outcome: &AnalysisOutcome) -> Result<String> {
        serde_yaml::to_string(outcome)
            .map_err(|e| Error::Analysis(format!("YAML serialization failed: {e}")))
    }

    /// Markdown report with one sub-section per issue
    pub fn to_markdown(outcome: &AnalysisOutcome) -> String {
        let report = &outcome.report;
        let summary = &report.summary;
        let mut md = String::new();

        md.push_str("# Java Code Analysis Report\n\n");
        let _ = writeln!(
            md,
            "**Generated:** {}  ",
            outcome.metadata.started_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
        let _ = writeln!(md, "**Analysis ID:** {}  ", outcome.metadata.id);
        let _ = writeln!(md, "**Remote review:** {}\n", outcome.metadata.remote.describe());

        md.push_str("## Summary\n\n");
        md.push_str("| Metric | Value |\n|--------|-------|\n");
        let _ = writeln!(md, "| Overall Code Quality | {} |", summary.overall_code_quality);
        let _ = writeln!(md, "| Total Issues | {} |", summary.total_issues);
        let _ = writeln!(md, "| Critical Errors | {} |", summary.critical_count);
        let _ = writeln!(md, "| Warnings | {} |", summary.warning_count);
        let _ = writeln!(md, "| Optimizations | {} |", summary.optimization_count);
        let _ = writeln!(md, "| Security Issues | {} |", summary.security_count);
        md.push('\n');

        for_each_section(report, |category, records| {
            let _ = writeln!(md, "## {}\n", category.section_title());
            for (index, record) in records.iter().enumerate() {
                let _ = writeln!(md, "### {}. {}\n", index + 1, heading(*record));
                if let Some(priority) = record.priority() {
                    let _ = writeln!(md, "- **{}:** {}", category.priority_label(), priority);
                }
                if let Some(line) = record.line() {
                    let _ = writeln!(md, "- **Line:** {line}");
                }
                if !record.description().is_empty() {
                    let _ = writeln!(md, "- **Description:** {}", record.description());
                }
                if let Some(impact) = record.impact() {
                    let _ = writeln!(md, "- **Impact:** {impact}");
                }
                for (label, text) in record.guidance() {
                    let _ = writeln!(md, "- **{label}:** {text}");
                }
                md.push('\n');
                if let Some(example) = record.example() {
                    let fence = code_fence_for(example);
                    let _ = writeln!(md, "{fence}java\n{}\n{fence}\n", example.trim_end());
                }
            }
        });

        md
    }

    /// Printable HTML, one page per section.
    /// Raw HTML in issue texts is rendered as literal text.
    pub fn to_html(outcome: &AnalysisOutcome) -> String {
        let markdown = Self::to_markdown(outcome);
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);

        let events = Parser::new_ext(&markdown, options).map(|event| match event {
            Event::Html(raw) => Event::Text(raw),
            other => other,
        });

        let mut body = String::with_capacity(markdown.len() * 2);
        html::push_html(&mut body, events);

        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Java Code Analysis Report</title>\n<style>\n{PRINT_STYLESHEET}</style>\n</head>\n<body>\n{body}</body>\n</html>\n"
        )
    }

    pub fn to_text(outcome: &AnalysisOutcome) -> String {
        let report = &outcome.report;
        let summary = &report.summary;
        let mut out = String::new();

        out.push_str("JAVA CODE ANALYSIS REPORT\n");
        out.push_str("=========================\n\n");
        out.push_str("Summary\n-------\n");
        let _ = writeln!(out, "Overall code quality: {}", summary.overall_code_quality);
        let _ = writeln!(out, "Total issues:         {}", summary.total_issues);
        let _ = writeln!(out, "Critical errors:      {}", summary.critical_count);
        let _ = writeln!(out, "Warnings:             {}", summary.warning_count);
        let _ = writeln!(out, "Optimizations:        {}", summary.optimization_count);
        let _ = writeln!(out, "Security issues:      {}", summary.security_count);
        let _ = writeln!(out, "Remote review:        {}", outcome.metadata.remote.describe());

        for_each_section(report, |category, records| {
            let title = category.section_title();
            let _ = writeln!(out, "\n{title}\n{}", "-".repeat(title.len()));
            for record in records {
                let location = record.line().map(|l| format!(" (line {l})")).unwrap_or_default();
                let priority = record.priority().map(|p| format!(" [{p}]")).unwrap_or_default();
                let _ = writeln!(out, "* {}{location}{priority}", heading(*record));
                if !record.description().is_empty() {
                    let _ = writeln!(out, "  {}", record.description());
                }
                for (label, text) in record.guidance() {
                    let _ = writeln!(out, "  {label}: {text}");
                }
            }
        });

        out
    }
}

/// Backtick fence longer than any backtick run inside `code`
fn code_fence_for(code: &str) -> String {
    let longest_run = code
        .split(|c: char| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat(longest_run.max(2) + 1)
}

fn heading(record: &dyn IssueRecord) -> &str {
    if record.title().is_empty() {
        "Untitled issue"
    } else {
        record.title()
    }
}

/// Visit the non-empty issue sections in report order
fn for_each_section(report: &Report, mut visit: impl FnMut(IssueCategory, &[&dyn IssueRecord])) {
    fn records<T: IssueRecord + 'static>(items: &[T]) -> Vec<&dyn IssueRecord> {
        items.iter().map(|item| item as &dyn IssueRecord).collect()
    }

    let sections = [
        (IssueCategory::CriticalError, records(&report.critical_errors)),
        (IssueCategory::Warning, records(&report.warnings)),
        (IssueCategory::Optimization, records(&report.optimizations)),
        (IssueCategory::Security, records(&report.security)),
    ];

    for (category, items) in sections {
        if !items.is_empty() {
            visit(category, &items);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{AnalysisMetadata, RemoteStatus, SkipReason};
    use codelens_core::{local_report, Priority, ReportOrigin, SecurityIssue, Warning};

    fn outcome(report: Report) -> AnalysisOutcome {
        AnalysisOutcome {
            report,
            metadata: AnalysisMetadata {
                id: uuid::Uuid::nil(),
                started_at: chrono::Utc::now(),
                duration_ms: 3,
                source_lines: 2,
                remote: RemoteStatus::Skipped { reason: SkipReason::NoCredential },
            },
        }
    }

    #[test]
    fn test_markdown_sections_in_order_and_empty_ones_omitted() {
        let md = ReportExporter::to_markdown(&outcome(local_report("int x = 5\nint y = 6;")));

        assert!(md.contains("## Summary"));
        assert!(md.contains("## Warnings"));
        assert!(md.contains("### 1. Syntax Warning"));
        assert!(md.contains("- **Line:** 1"));
        assert!(md.contains("```java\nint x = 5;\n```"));
        assert!(!md.contains("## Critical Errors"));
        assert!(!md.contains("## Security Issues"));
        assert!(md.find("## Summary").unwrap() < md.find("## Warnings").unwrap());
    }

    #[test]
    fn test_security_section_uses_risk_level() {
        let report = Report::new(
            vec![],
            vec![],
            vec![],
            vec![SecurityIssue {
                vulnerability: "SQL Injection".into(),
                risk_level: Some(Priority::High),
                description: "query built by concatenation".into(),
                mitigation: Some("Use PreparedStatement".into()),
                ..SecurityIssue::default()
            }],
            ReportOrigin::Merged,
        );
        let md = ReportExporter::to_markdown(&outcome(report));
        assert!(md.contains("## Security Issues"));
        assert!(md.contains("- **Risk Level:** HIGH"));
        assert!(md.contains("Use PreparedStatement"));
    }

    #[test]
    fn test_html_has_page_breaks_and_tables() {
        let html = ReportExporter::to_html(&outcome(local_report("class A {")));
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("page-break-before: always"));
        assert!(html.contains("<h2>Critical Errors</h2>"));
        assert!(html.contains("<table>"));
    }

    #[test]
    fn test_html_renders_issue_markup_as_text() {
        let report = Report::new(
            vec![],
            vec![Warning {
                kind: "Style".into(),
                description: "<script>alert(1)</script>".into(),
                code_example: Some("```\n</pre><img src=x onerror=alert(2)>".into()),
                ..Warning::default()
            }],
            vec![],
            vec![],
            ReportOrigin::Merged,
        );
        let o = outcome(report);

        let md = ReportExporter::to_markdown(&o);
        assert!(md.contains("````java\n```\n</pre>"));

        let html = ReportExporter::to_html(&o);
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<img"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("&lt;/pre&gt;&lt;img src=x onerror=alert(2)&gt;"));
    }

    #[test]
    fn test_code_fence_outgrows_backtick_runs() {
        assert_eq!(code_fence_for("int x = 5;"), "```");
        assert_eq!(code_fence_for("a ``` b"), "````");
        assert_eq!(code_fence_for("`````"), "``````");
    }

    #[test]
    fn test_json_round_trips_outcome() {
        let original = outcome(local_report("int x = 5"));
        let json = ReportExporter::to_json(&original).unwrap();
        assert!(json.contains("\"criticalErrors\""));
        let parsed: AnalysisOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_text_and_yaml() {
        let o = outcome(local_report("int x = 5"));
        let text = ReportExporter::to_text(&o);
        assert!(text.contains("Overall code quality: SATISFACTORY"));
        assert!(text.contains("* Syntax Warning (line 1) [MEDIUM]"));

        let yaml = ReportExporter::to_yaml(&o).unwrap();
        assert!(yaml.contains("overall_code_quality: SATISFACTORY"));
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("MD".parse::<ExportFormat>().unwrap(), ExportFormat::Markdown);
        assert_eq!("yml".parse::<ExportFormat>().unwrap(), ExportFormat::Yaml);
        assert!("pdf".parse::<ExportFormat>().is_err());
        assert_eq!(ExportFormat::Markdown.extension(), "md");
    }
}
