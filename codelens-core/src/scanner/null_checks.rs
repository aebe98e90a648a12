//! Null-check ordering check

use super::{Finding, LineCheck, SourceLine};

const NULL_TEST: &str = " != null";

/// Flags lines where a `.` member access occurs before a ` != null` test,
/// e.g. `if (user.getName() != null)`. A textual coincidence check, not
/// data-flow analysis.
pub struct NullCheckOrderCheck;

impl NullCheckOrderCheck {
    pub fn dereferences_before_null_test(trimmed: &str) -> bool {
        match (trimmed.find('.'), trimmed.find(NULL_TEST)) {
            (Some(dot), Some(test)) => dot < test,
            _ => false,
        }
    }
}

impl LineCheck for NullCheckOrderCheck {
    fn name(&self) -> &'static str {
        "null-check-order"
    }

    fn check(&self, lines: &[SourceLine<'_>]) -> Vec<Finding> {
        lines
            .iter()
            .filter(|line| Self::dereferences_before_null_test(line.trimmed()))
            .map(|line| Finding::NullCheckAfterDereference { line: line.number })
            .collect()
    }
}
