//! Analysis pipeline
//!
//! validate → scan → local report → remote review (when allowed) → merge.
//! Only input validation fails the call; every remote-path failure is
//! logged and the local report is returned instead.

use crate::Result;
use codelens_core::{merge_reports, validate_source, HeuristicIssueBuilder, LineScanner, Report};
use codelens_llm::{GatewayConfig, RateLimiter, RemoteGateway};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

/// Analyzer settings, loadable from TOML, JSON or YAML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub gateway: GatewayConfig,
    /// Never contact the remote service
    pub local_only: bool,
}

impl AnalyzerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        Ok(codelens_utils::load_config(path)?)
    }
}

/// Why the remote review was not attempted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NoCredential,
    CriticalErrors,
    Disabled,
}

/// What happened on the remote path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RemoteStatus {
    Merged,
    Skipped { reason: SkipReason },
    Failed { kind: String, message: String },
}

impl RemoteStatus {
    pub fn describe(&self) -> String {
        match self {
            Self::Merged => "remote review merged".to_string(),
            Self::Skipped { reason: SkipReason::NoCredential } => {
                "remote review skipped (no API key configured)".to_string()
            }
            Self::Skipped { reason: SkipReason::CriticalErrors } => {
                "remote review skipped (critical errors found locally)".to_string()
            }
            Self::Skipped { reason: SkipReason::Disabled } => {
                "remote review skipped (local-only mode)".to_string()
            }
            Self::Failed { kind, message } => format!("remote review failed ({kind}): {message}"),
        }
    }
}

/// Metadata about one analysis run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub source_lines: usize,
    pub remote: RemoteStatus,
}

/// Final report together with run metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    pub report: Report,
    pub metadata: AnalysisMetadata,
}

impl AnalysisOutcome {
    /// Reload an outcome saved by the JSON exporter
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Local analysis plus an optional remote review
pub struct CodeAnalyzer {
    scanner: LineScanner,
    gateway: Option<RemoteGateway>,
    local_only: bool,
}

impl CodeAnalyzer {
    /// Analyzer that never contacts a remote service
    pub fn local() -> Self {
        Self {
            scanner: LineScanner::default(),
            gateway: None,
            local_only: false,
        }
    }

    pub fn with_gateway(gateway: RemoteGateway) -> Self {
        Self {
            gateway: Some(gateway),
            ..Self::local()
        }
    }

    /// Build from config. A missing credential leaves the remote path off.
    pub fn from_config(config: &AnalyzerConfig, limiter: Arc<RateLimiter>) -> Self {
        let gateway = match RemoteGateway::from_config(&config.gateway, limiter) {
            Ok(gateway) => Some(gateway),
            Err(e) => {
                tracing::debug!("Remote gateway unavailable: {}", e);
                None
            }
        };

        Self {
            gateway,
            ..Self::local()
        }
        .with_local_only(config.local_only)
    }

    #[must_use]
    pub fn with_local_only(mut self, local_only: bool) -> Self {
        self.local_only = local_only;
        self
    }

    #[must_use]
    pub fn with_scanner(mut self, scanner: LineScanner) -> Self {
        self.scanner = scanner;
        self
    }

    /// Run the full pipeline over `source`
    pub async fn analyze(&self, source: &str) -> Result<AnalysisOutcome> {
        let source = validate_source(source)?;
        let started_at = Utc::now();
        let start_time = std::time::Instant::now();
        let id = Uuid::new_v4();

        tracing::info!("Starting analysis {}", id);

        let findings = self.scanner.scan(source);
        let local = HeuristicIssueBuilder::new(source).build(&findings);

        let (remote, status) = self.remote_review(source, &local).await;
        let report = merge_reports(local, remote);

        let metadata = AnalysisMetadata {
            id,
            started_at,
            duration_ms: u64::try_from(start_time.elapsed().as_millis()).unwrap_or(u64::MAX),
            source_lines: source.lines().count(),
            remote: status,
        };

        tracing::info!(
            "Analysis {} completed in {}ms: {} issue(s), quality {}",
            id,
            metadata.duration_ms,
            report.summary.total_issues,
            report.summary.overall_code_quality
        );

        Ok(AnalysisOutcome { report, metadata })
    }

    async fn remote_review(&self, source: &str, local: &Report) -> (Option<Report>, RemoteStatus) {
        let skip = |reason| (None, RemoteStatus::Skipped { reason });

        if self.local_only {
            tracing::info!("Local-only mode: skipping remote analysis");
            return skip(SkipReason::Disabled);
        }
        let Some(gateway) = &self.gateway else {
            tracing::info!("No API key configured: using local analysis only");
            return skip(SkipReason::NoCredential);
        };
        if local.has_critical_errors() {
            tracing::info!("Critical errors found locally: skipping remote analysis");
            return skip(SkipReason::CriticalErrors);
        }

        match gateway.analyze(source).await {
            Ok(report) => (Some(report), RemoteStatus::Merged),
            Err(e) => {
                tracing::warn!("Remote analysis failed, falling back to local report: {}", e);
                (
                    None,
                    RemoteStatus::Failed {
                        kind: e.kind().to_string(),
                        message: e.to_string(),
                    },
                )
            }
        }
    }
}

impl std::fmt::Debug for CodeAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodeAnalyzer")
            .field("gateway", &self.gateway)
            .field("local_only", &self.local_only)
            .finish_non_exhaustive()
    }
}

/// Friendly message for a failure that escaped the pipeline
pub fn describe_failure(failure: &str) -> String {
    let hint = if failure.contains("API key") {
        "Please check your API key configuration. "
    } else if failure.contains("parse") {
        "The analysis service returned an invalid response. "
    } else if failure.contains("network") {
        "Please check your network connection. "
    } else {
        ""
    };
    format!("Failed to analyze code. {hint}Please try again or check the logs for more details.")
}
