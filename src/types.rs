//! Core types used throughout the project.

use std::fmt;

/// A position in catalog text (0-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SourcePosition {
    pub line: u32,
    pub character: u32,
}

impl SourcePosition {
    #[must_use]
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }

    /// Returns the position one character further on the same line.
    #[must_use]
    pub const fn next_character(self) -> Self {
        Self { line: self.line, character: self.character + 1 }
    }
}

/// Rendered 1-based, the way editors number lines and columns.
impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.character + 1)
    }
}

/// A range in catalog text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SourceRange {
    pub start: SourcePosition,
    pub end: SourcePosition,
}

impl SourceRange {
    #[must_use]
    pub const fn new(start: SourcePosition, end: SourcePosition) -> Self {
        Self { start, end }
    }

    /// A zero-width range at `position`.
    #[must_use]
    pub const fn point(position: SourcePosition) -> Self {
        Self { start: position, end: position }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start.line == self.end.line && self.start.character == self.end.character
    }
}

impl fmt::Display for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    const fn pos(line: u32, character: u32) -> SourcePosition {
        SourcePosition { line, character }
    }

    const fn range(start_line: u32, start_char: u32, end_line: u32, end_char: u32) -> SourceRange {
        SourceRange { start: pos(start_line, start_char), end: pos(end_line, end_char) }
    }

    #[rstest]
    #[case::origin(pos(0, 0), "1:1")]
    #[case::later_line(pos(4, 9), "5:10")]
    fn position_display_is_one_based(#[case] position: SourcePosition, #[case] expected: &str) {
        assert_that!(position.to_string(), eq(expected));
    }

    #[rstest]
    #[case::point(range(2, 3, 2, 3), "3:4")]
    #[case::same_line(range(0, 1, 0, 4), "1:2-1:5")]
    #[case::multi_line(range(1, 0, 3, 2), "2:1-4:3")]
    fn range_display(#[case] range: SourceRange, #[case] expected: &str) {
        assert_that!(range.to_string(), eq(expected));
    }

    #[rstest]
    fn next_character_stays_on_line() {
        assert_that!(pos(3, 7).next_character(), eq(pos(3, 8)));
    }

    #[rstest]
    fn point_is_empty() {
        assert!(SourceRange::point(pos(1, 1)).is_empty());
        assert!(!range(1, 1, 1, 2).is_empty());
    }
}
