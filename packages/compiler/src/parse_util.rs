//! Parse Utilities
//!
//! Source spans, locations and parse errors shared by the template scanner and
//! the expression parser.

use crate::chars;
use thiserror::Error;

/// Span relative to the start of the parsed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParseSpan {
    pub start: usize,
    pub end: usize,
}

impl ParseSpan {
    pub fn new(start: usize, end: usize) -> Self {
        ParseSpan { start, end }
    }

    pub fn to_absolute(&self, absolute_offset: usize) -> AbsoluteSourceSpan {
        AbsoluteSourceSpan::new(absolute_offset + self.start, absolute_offset + self.end)
    }
}

/// Span relative to the start of the whole template source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AbsoluteSourceSpan {
    pub start: usize,
    pub end: usize,
}

impl AbsoluteSourceSpan {
    pub fn new(start: usize, end: usize) -> Self {
        AbsoluteSourceSpan { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSourceFile {
    pub content: String,
    pub url: String,
}

impl ParseSourceFile {
    pub fn new(content: impl Into<String>, url: impl Into<String>) -> Self {
        ParseSourceFile {
            content: content.into(),
            url: url.into(),
        }
    }
}

/// A zero-based line/column position inside a source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseLocation {
    pub offset: usize,
    pub line: usize,
    pub col: usize,
}

impl ParseLocation {
    /// Computes the line and column of `offset` in `content`. Offsets past the
    /// end are clamped to the end of the text.
    pub fn from_offset(content: &str, offset: usize) -> Self {
        let offset = offset.min(content.len());
        let mut line = 0;
        let mut col = 0;
        for (i, ch) in content.char_indices() {
            if i >= offset {
                break;
            }
            if ch == chars::NEWLINE {
                line += 1;
                col = 0;
            } else {
                col += 1;
            }
        }
        ParseLocation { offset, line, col }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorLevel {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{msg}")]
pub struct ParseError {
    pub span: AbsoluteSourceSpan,
    pub msg: String,
    pub level: ParseErrorLevel,
}

impl ParseError {
    pub fn new(span: AbsoluteSourceSpan, msg: impl Into<String>) -> Self {
        ParseError {
            span,
            msg: msg.into(),
            level: ParseErrorLevel::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_compute_line_and_column() {
        let content = "ab\ncd\nef";
        let loc = ParseLocation::from_offset(content, 4);
        assert_eq!((loc.line, loc.col), (1, 1));
    }

    #[test]
    fn should_clamp_offsets_past_the_end() {
        let loc = ParseLocation::from_offset("abc", 99);
        assert_eq!(loc.offset, 3);
        assert_eq!((loc.line, loc.col), (0, 3));
    }

    #[test]
    fn should_offset_relative_spans() {
        let span = ParseSpan::new(2, 5).to_absolute(10);
        assert_eq!(span, AbsoluteSourceSpan::new(12, 15));
        assert_eq!(span.len(), 3);
    }
}
