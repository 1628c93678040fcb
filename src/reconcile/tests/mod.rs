#![allow(clippy::unwrap_used)]

mod tests_document;
mod tests_regions;

use text_size::{TextRange, TextSize};

use super::{Problem, ProblemKind};

fn at(offset: u32) -> TextSize {
    TextSize::new(offset)
}

fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(start.into(), end.into())
}

/// (kind, offset, length) of each problem
fn summary(problems: &[Problem]) -> Vec<(ProblemKind, u32, u32)> {
    problems
        .iter()
        .map(|p| (p.kind, u32::from(p.offset()), u32::from(p.len())))
        .collect()
}
