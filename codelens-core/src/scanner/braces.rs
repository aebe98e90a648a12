//! Brace balance check

use super::{Finding, LineCheck, SourceLine};

/// Tallies `{` and `}` over the whole text and reports an imbalance.
///
/// At most one finding is produced: open > close and close > open are
/// mutually exclusive.
pub struct BraceBalanceCheck;

impl LineCheck for BraceBalanceCheck {
    fn name(&self) -> &'static str {
        "brace-balance"
    }

    fn check(&self, lines: &[SourceLine<'_>]) -> Vec<Finding> {
        let mut open = 0usize;
        let mut close = 0usize;
        let mut last_open_line = None;

        for line in lines {
            let opens = line.text.matches('{').count();
            open += opens;
            close += line.text.matches('}').count();
            if opens > 0 {
                last_open_line = Some(line.number);
            }
        }

        match open.cmp(&close) {
            std::cmp::Ordering::Greater => vec![Finding::MissingClosingBraces {
                missing: open - close,
                last_open_line,
            }],
            std::cmp::Ordering::Less => vec![Finding::ExtraClosingBraces { extra: close - open }],
            std::cmp::Ordering::Equal => Vec::new(),
        }
    }
}
