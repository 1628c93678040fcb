#![allow(clippy::unwrap_used)]

mod tests_cron;
mod tests_jpql;
mod tests_spel;

use text_size::TextRange;

use super::{Parse, SyntaxKind};

/// Ranges of all errors as (offset, length) pairs
fn error_spans(parse: &Parse) -> Vec<(u32, u32)> {
    parse
        .errors
        .iter()
        .map(|e| (u32::from(e.range.start()), u32::from(e.range.len())))
        .collect()
}

fn has_token(parse: &Parse, kind: SyntaxKind, text: &str) -> bool {
    parse
        .syntax()
        .descendants_with_tokens()
        .filter_map(|e| e.into_token())
        .any(|t| t.kind() == kind && t.text() == text)
}

fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(start.into(), end.into())
}
