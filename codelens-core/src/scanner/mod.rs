//! Line scanner
//!
//! Runs textual heuristics over Java source split into 1-based lines.
//! None of these checks parse the language; they accept false positives
//! in exchange for being cheap and predictable.

mod braces;
mod null_checks;
mod semicolons;

pub use braces::BraceBalanceCheck;
pub use null_checks::NullCheckOrderCheck;
pub use semicolons::StatementTerminationCheck;

/// One line of source with its 1-based number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    pub number: u32,
    pub text: &'a str,
}

impl<'a> SourceLine<'a> {
    pub fn trimmed(&self) -> &'a str {
        self.text.trim()
    }

    pub fn is_blank(&self) -> bool {
        self.trimmed().is_empty()
    }
}

/// Split on `\n`; a trailing `\r` is left in place and removed by trimming
pub fn split_lines(source: &str) -> Vec<SourceLine<'_>> {
    source
        .split('\n')
        .zip(1u32..)
        .map(|(text, number)| SourceLine { number, text })
        .collect()
}

/// Structural finding produced by a check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    /// More `{` than `}`; `last_open_line` is the last line holding a `{`
    MissingClosingBraces { missing: usize, last_open_line: Option<u32> },
    /// More `}` than `{`
    ExtraClosingBraces { extra: usize },
    /// Line that does not look terminated; `statement` is the trimmed text
    MissingSemicolon { line: u32, statement: String },
    /// Member access appears before a `!= null` test on the same line
    NullCheckAfterDereference { line: u32 },
}

impl Finding {
    pub const fn line(&self) -> Option<u32> {
        match self {
            Self::MissingClosingBraces { last_open_line, .. } => *last_open_line,
            Self::ExtraClosingBraces { .. } => None,
            Self::MissingSemicolon { line, .. } | Self::NullCheckAfterDereference { line } => Some(*line),
        }
    }

    pub const fn is_critical(&self) -> bool {
        matches!(self, Self::MissingClosingBraces { .. } | Self::ExtraClosingBraces { .. })
    }
}

/// A single heuristic pass over the source lines
pub trait LineCheck: Send + Sync {
    /// Check name used in logs
    fn name(&self) -> &'static str;

    /// Findings in line order
    fn check(&self, lines: &[SourceLine<'_>]) -> Vec<Finding>;
}

/// Runs the configured checks in order and concatenates their findings
pub struct LineScanner {
    checks: Vec<Box<dyn LineCheck>>,
}

impl LineScanner {
    pub fn new(checks: Vec<Box<dyn LineCheck>>) -> Self {
        Self { checks }
    }

    pub fn scan(&self, source: &str) -> Vec<Finding> {
        let lines = split_lines(source);
        let mut findings = Vec::new();

        for check in &self.checks {
            let found = check.check(&lines);
            tracing::debug!("{}: {} finding(s)", check.name(), found.len());
            findings.extend(found);
        }

        findings
    }
}

impl Default for LineScanner {
    /// Termination, brace balance, then null-check ordering
    fn default() -> Self {
        Self::new(vec![
            Box::new(StatementTerminationCheck),
            Box::new(BraceBalanceCheck),
            Box::new(NullCheckOrderCheck),
        ])
    }
}
