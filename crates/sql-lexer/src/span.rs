//! Span type for tracking source locations

use std::ops::Range;

/// A span representing a range in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Start char offset (inclusive)
    pub start: usize,
    /// End char offset (exclusive)
    pub end: usize,
    /// 1-based line of `start`
    pub line: usize,
    /// 1-based column of `start` within its line
    pub column: usize,
}

impl Span {
    /// Create a new span
    pub const fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    /// Get the length of the span
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Line start offsets of a source text, used to turn char offsets into
/// line/column pairs.
pub(crate) struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub(crate) fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (offset, c) in source.chars().enumerate() {
            if c == '\n' {
                line_starts.push(offset + 1);
            }
        }
        Self { line_starts }
    }

    /// 1-based (line, column) of a char offset
    pub(crate) fn locate(&self, offset: usize) -> (usize, usize) {
        // line_starts[0] == 0, so at least one start precedes any offset
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let line_start = self.line_starts[line - 1];
        (line, offset - line_start + 1)
    }

    pub(crate) fn span(&self, range: Range<usize>) -> Span {
        let (line, column) = self.locate(range.start);
        Span::new(range.start, range.end, line, column)
    }
}
