//! Byte offsets and line/column conversion.

pub use text_size::{TextRange, TextSize};

use super::{Position, Span};

/// A zero-based line/column pair, columns counted in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

/// Maps byte offsets of one text to line/column positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Offset of the first byte of every line
    line_starts: Vec<TextSize>,
    len: TextSize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::new(0)];
        for (idx, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(TextSize::new(idx as u32 + 1));
            }
        }
        Self {
            line_starts,
            len: TextSize::of(text),
        }
    }

    /// Number of lines (an empty text has one line).
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Convert an offset to a line/column pair. Offsets past the end clamp to the end.
    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let offset = offset.min(self.len);
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let col = offset - self.line_starts[line];
        LineCol {
            line: line as u32,
            col: col.into(),
        }
    }

    /// Convert a line/column pair back to an offset, if it lies inside the text.
    pub fn offset(&self, line_col: LineCol) -> Option<TextSize> {
        let start = *self.line_starts.get(line_col.line as usize)?;
        let offset = start + TextSize::new(line_col.col);
        (offset <= self.len).then_some(offset)
    }

    /// Convert a byte range into a line/column span.
    pub fn span(&self, range: TextRange) -> Span {
        let start = self.line_col(range.start());
        let end = self.line_col(range.end());
        Span::new(
            Position::new(start.line, start.col),
            Position::new(end.line, end.col),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col_first_line() {
        let index = LineIndex::new("abc\ndef");
        assert_eq!(index.line_col(TextSize::new(2)), LineCol { line: 0, col: 2 });
    }

    #[test]
    fn test_line_col_after_newline() {
        let index = LineIndex::new("abc\ndef\n");
        assert_eq!(index.line_col(TextSize::new(4)), LineCol { line: 1, col: 0 });
        assert_eq!(index.line_col(TextSize::new(8)), LineCol { line: 2, col: 0 });
        assert_eq!(index.line_count(), 3);
    }

    #[test]
    fn test_line_col_clamps_past_end() {
        let index = LineIndex::new("ab");
        assert_eq!(index.line_col(TextSize::new(40)), LineCol { line: 0, col: 2 });
    }

    #[test]
    fn test_offset_roundtrip() {
        let index = LineIndex::new("one\ntwo\nthree");
        let lc = LineCol { line: 2, col: 3 };
        assert_eq!(index.offset(lc), Some(TextSize::new(11)));
        assert_eq!(index.line_col(TextSize::new(11)), lc);
        assert_eq!(index.offset(LineCol { line: 5, col: 0 }), None);
    }

    #[test]
    fn test_span_of_range() {
        let index = LineIndex::new("x\n  @Value(\"#{a}\")");
        let span = index.span(TextRange::new(TextSize::new(4), TextSize::new(9)));
        assert_eq!(span, Span::from_coords(1, 2, 1, 7));
    }
}
