//! Issue records
//!
//! One struct per report bucket. Records are built once, by the local
//! heuristics or from the remote document, and only ever moved into lists.

use serde::{Deserialize, Serialize};

/// Priority (or risk level, for security findings)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Case-insensitive parse; anything unrecognised yields `None`
    pub fn parse_lenient(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "HIGH" => Some(Self::High),
            "MEDIUM" => Some(Self::Medium),
            "LOW" => Some(Self::Low),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four report buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueCategory {
    CriticalError,
    Warning,
    Optimization,
    Security,
}

impl IssueCategory {
    /// Section heading used by exporters
    pub const fn section_title(self) -> &'static str {
        match self {
            Self::CriticalError => "Critical Errors",
            Self::Warning => "Warnings",
            Self::Optimization => "Optimizations",
            Self::Security => "Security Issues",
        }
    }

    /// Key of the bucket in the JSON document
    pub const fn json_key(self) -> &'static str {
        match self {
            Self::CriticalError => "criticalErrors",
            Self::Warning => "warnings",
            Self::Optimization => "optimizations",
            Self::Security => "security",
        }
    }

    pub const fn priority_label(self) -> &'static str {
        match self {
            Self::Security => "Risk Level",
            _ => "Priority",
        }
    }
}

/// Uniform read access over the four record types, used for rendering
pub trait IssueRecord {
    fn category(&self) -> IssueCategory;

    /// `type` for most records, `vulnerability` for security findings
    fn title(&self) -> &str;

    fn priority(&self) -> Option<Priority>;

    fn line(&self) -> Option<u32>;

    fn description(&self) -> &str;

    fn impact(&self) -> Option<&str>;

    /// Labelled remediation texts present on this record
    fn guidance(&self) -> Vec<(&'static str, &str)>;

    fn example(&self) -> Option<&str>;
}

/// Something that prevents the code from compiling or running correctly
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CriticalError {
    #[serde(rename = "type")]
    pub kind: String,
    pub line: Option<u32>,
    pub description: String,
    pub impact: Option<String>,
    pub fix_recommendation: Option<String>,
    pub code_example: Option<String>,
    pub priority: Option<Priority>,
}

/// Style, convention or likely-bug finding that does not block compilation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Warning {
    #[serde(rename = "type")]
    pub kind: String,
    pub line: Option<u32>,
    pub description: String,
    pub best_practice: Option<String>,
    pub fix_recommendation: Option<String>,
    pub code_example: Option<String>,
    pub priority: Option<Priority>,
}

/// Performance or maintainability suggestion
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Optimization {
    #[serde(rename = "type")]
    pub kind: String,
    pub line: Option<u32>,
    pub description: String,
    #[serde(rename = "performance_impact")]
    pub performance_impact: Option<String>,
    pub suggestion: Option<String>,
    pub code_example: Option<String>,
    pub priority: Option<Priority>,
}

/// Security vulnerability
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityIssue {
    pub vulnerability: String,
    pub line: Option<u32>,
    pub risk_level: Option<Priority>,
    pub description: String,
    pub impact: Option<String>,
    pub mitigation: Option<String>,
    pub secure_code_example: Option<String>,
}

fn labelled<'a, const N: usize>(pairs: [(&'static str, Option<&'a String>); N]) -> Vec<(&'static str, &'a str)> {
    pairs
        .into_iter()
        .filter_map(|(label, text)| text.map(|t| (label, t.as_str())))
        .collect()
}

impl IssueRecord for CriticalError {
    fn category(&self) -> IssueCategory {
        IssueCategory::CriticalError
    }
    fn title(&self) -> &str {
        &self.kind
    }
    fn priority(&self) -> Option<Priority> {
        self.priority
    }
    fn line(&self) -> Option<u32> {
        self.line
    }
    fn description(&self) -> &str {
        &self.description
    }
    fn impact(&self) -> Option<&str> {
        self.impact.as_deref()
    }
    fn guidance(&self) -> Vec<(&'static str, &str)> {
        labelled([("Fix Recommendation", self.fix_recommendation.as_ref())])
    }
    fn example(&self) -> Option<&str> {
        self.code_example.as_deref()
    }
}

impl IssueRecord for Warning {
    fn category(&self) -> IssueCategory {
        IssueCategory::Warning
    }
    fn title(&self) -> &str {
        &self.kind
    }
    fn priority(&self) -> Option<Priority> {
        self.priority
    }
    fn line(&self) -> Option<u32> {
        self.line
    }
    fn description(&self) -> &str {
        &self.description
    }
    fn impact(&self) -> Option<&str> {
        None
    }
    fn guidance(&self) -> Vec<(&'static str, &str)> {
        labelled([
            ("Best Practice", self.best_practice.as_ref()),
            ("Fix Recommendation", self.fix_recommendation.as_ref()),
        ])
    }
    fn example(&self) -> Option<&str> {
        self.code_example.as_deref()
    }
}

impl IssueRecord for Optimization {
    fn category(&self) -> IssueCategory {
        IssueCategory::Optimization
    }
    fn title(&self) -> &str {
        &self.kind
    }
    fn priority(&self) -> Option<Priority> {
        self.priority
    }
    fn line(&self) -> Option<u32> {
        self.line
    }
    fn description(&self) -> &str {
        &self.description
    }
    fn impact(&self) -> Option<&str> {
        self.performance_impact.as_deref()
    }
    fn guidance(&self) -> Vec<(&'static str, &str)> {
        labelled([("Suggestion", self.suggestion.as_ref())])
    }
    fn example(&self) -> Option<&str> {
        self.code_example.as_deref()
    }
}

impl IssueRecord for SecurityIssue {
    fn category(&self) -> IssueCategory {
        IssueCategory::Security
    }
    fn title(&self) -> &str {
        &self.vulnerability
    }
    fn priority(&self) -> Option<Priority> {
        self.risk_level
    }
    fn line(&self) -> Option<u32> {
        self.line
    }
    fn description(&self) -> &str {
        &self.description
    }
    fn impact(&self) -> Option<&str> {
        self.impact.as_deref()
    }
    fn guidance(&self) -> Vec<(&'static str, &str)> {
        labelled([("Mitigation", self.mitigation.as_ref())])
    }
    fn example(&self) -> Option<&str> {
        self.secure_code_example.as_deref()
    }
}
