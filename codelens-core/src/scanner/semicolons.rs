//! Statement termination check

use super::{Finding, LineCheck, SourceLine};

/// Flags non-blank lines that do not end with `{`, `}` or `;` and are not
/// comments or annotations.
///
/// Purely textual: strings, multi-line expressions and bracketed
/// annotations all produce false positives.
pub struct StatementTerminationCheck;

impl StatementTerminationCheck {
    pub fn looks_unterminated(trimmed: &str) -> bool {
        const TERMINATORS: [char; 3] = ['{', '}', ';'];
        const COMMENT_PREFIXES: [&str; 4] = ["//", "/*", "*", "@"];

        !trimmed.is_empty()
            && !trimmed.ends_with(&TERMINATORS[..])
            && !trimmed.ends_with("*/")
            && !COMMENT_PREFIXES.iter().any(|prefix| trimmed.starts_with(prefix))
    }
}

impl LineCheck for StatementTerminationCheck {
    fn name(&self) -> &'static str {
        "statement-termination"
    }

    fn check(&self, lines: &[SourceLine<'_>]) -> Vec<Finding> {
        lines
            .iter()
            .filter(|line| Self::looks_unterminated(line.trimmed()))
            .map(|line| Finding::MissingSemicolon {
                line: line.number,
                statement: line.trimmed().to_string(),
            })
            .collect()
    }
}
