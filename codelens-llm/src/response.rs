//! Remote document decoding
//!
//! The model is asked for a JSON object but nothing guarantees its shape.
//! Every field is optional and defaulted, malformed entries are dropped
//! one by one, and the document's own summary is never trusted.

use crate::{LlmError, LlmResult};
use codelens_core::{
    CriticalError, IssueCategory, Optimization, Priority, Report, ReportOrigin, SecurityIssue, Warning,
};
use serde_json::{Map, Value};

const FENCE: &str = "```";

/// Strip a code fence wrapping the whole payload (with optional language
/// tag) and trim. Fences inside the document are left alone.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(after_open) = trimmed.strip_prefix(FENCE) else {
        return trimmed;
    };

    // language tag runs to the end of the fence line
    let body = match after_open.split_once('\n') {
        Some((tag, rest)) if !tag.trim_start().starts_with(|c: char| c == '{' || c == '[') => rest,
        _ => after_open.strip_prefix("json").unwrap_or(after_open),
    };

    let body = body.trim_end();
    body.strip_suffix(FENCE).unwrap_or(body).trim()
}

/// Decode the raw model output into a report
pub fn parse_remote_document(raw: &str) -> LlmResult<Report> {
    let cleaned = strip_code_fence(raw);
    if cleaned.is_empty() {
        return Err(LlmError::Parse("empty response".to_string()));
    }

    let value: Value = serde_json::from_str(cleaned).map_err(|e| {
        tracing::error!(
            "Failed to parse remote response: {}",
            codelens_utils::safe_truncate(cleaned, 200)
        );
        LlmError::Parse(format!("response is not valid JSON: {e}"))
    })?;

    let Value::Object(document) = value else {
        return Err(LlmError::Parse("Invalid response format: expected a JSON object".to_string()));
    };

    let report = Report::new(
        decode_bucket(&document, IssueCategory::CriticalError, critical_error),
        decode_bucket(&document, IssueCategory::Warning, warning),
        decode_bucket(&document, IssueCategory::Optimization, optimization),
        decode_bucket(&document, IssueCategory::Security, security_issue),
        ReportOrigin::Merged,
    );

    if let Some(claimed) = document
        .get("summary")
        .and_then(|summary| summary.get("total_issues"))
        .and_then(Value::as_u64)
    {
        if usize::try_from(claimed).ok() != Some(report.summary.total_issues) {
            tracing::debug!(
                "Remote summary claims {} issue(s), document holds {}",
                claimed,
                report.summary.total_issues
            );
        }
    }

    Ok(report)
}

fn decode_bucket<T>(
    document: &Map<String, Value>,
    category: IssueCategory,
    decode: fn(&Map<String, Value>) -> T,
) -> Vec<T> {
    let key = category.json_key();
    match document.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| {
                let entry = item.as_object();
                if entry.is_none() {
                    tracing::warn!("Dropping malformed {} entry: {}", key, item);
                }
                entry.map(decode)
            })
            .collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(other) => {
            tracing::warn!("Ignoring {}: expected an array, got {}", key, other);
            Vec::new()
        }
    }
}

/// Strings pass through; numbers and booleans are stringified
fn text(entry: &Map<String, Value>, key: &str) -> Option<String> {
    match entry.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn required_text(entry: &Map<String, Value>, key: &str) -> String {
    text(entry, key).unwrap_or_default()
}

/// Positive line numbers, given as numbers or numeric strings
fn line(entry: &Map<String, Value>) -> Option<u32> {
    let line = match entry.get("line")? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }?;
    u32::try_from(line).ok().filter(|l| *l > 0)
}

fn priority(entry: &Map<String, Value>, key: &str) -> Option<Priority> {
    entry.get(key)?.as_str().and_then(Priority::parse_lenient)
}

fn critical_error(entry: &Map<String, Value>) -> CriticalError {
    CriticalError {
        kind: required_text(entry, "type"),
        line: line(entry),
        description: required_text(entry, "description"),
        impact: text(entry, "impact"),
        fix_recommendation: text(entry, "fixRecommendation"),
        code_example: text(entry, "codeExample"),
        priority: priority(entry, "priority"),
    }
}

fn warning(entry: &Map<String, Value>) -> Warning {
    Warning {
        kind: required_text(entry, "type"),
        line: line(entry),
        description: required_text(entry, "description"),
        best_practice: text(entry, "bestPractice"),
        fix_recommendation: text(entry, "fixRecommendation"),
        code_example: text(entry, "codeExample"),
        priority: priority(entry, "priority"),
    }
}

fn optimization(entry: &Map<String, Value>) -> Optimization {
    Optimization {
        kind: required_text(entry, "type"),
        line: line(entry),
        description: required_text(entry, "description"),
        performance_impact: text(entry, "performance_impact"),
        suggestion: text(entry, "suggestion"),
        code_example: text(entry, "codeExample"),
        priority: priority(entry, "priority"),
    }
}

fn security_issue(entry: &Map<String, Value>) -> SecurityIssue {
    SecurityIssue {
        vulnerability: required_text(entry, "vulnerability"),
        line: line(entry),
        risk_level: priority(entry, "risk_level"),
        description: required_text(entry, "description"),
        impact: text(entry, "impact"),
        mitigation: text(entry, "mitigation"),
        secure_code_example: text(entry, "secure_code_example"),
    }
}
