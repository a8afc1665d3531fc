//! Source file spans and locations

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A unique identifier for a source unit
#[derive(Copy, Clone, Debug, Display, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[display("file#{_0}")]
pub struct FileId(pub u32);

impl FileId {
    /// Wraps a raw id
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// A byte offset span in a source unit
#[derive(Copy, Clone, Debug, Default, Display, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[display("{start}..{end}")]
pub struct Span {
    /// Start byte offset
    pub start: u32,
    /// End byte offset, exclusive
    pub end: u32,
}

impl Span {
    /// Span from `start` to `end`
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Byte range for slicing source text
    pub fn range(&self) -> Range<usize> {
        self.start as usize..self.end as usize
    }

    /// Length in bytes
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Whether the span covers no bytes
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Moves the span `offset` bytes to the right
    #[must_use]
    pub fn shifted(self, offset: u32) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
        }
    }

    /// Smallest span covering both `self` and `other`
    #[must_use]
    pub fn cover(self, other: Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// Provenance of a node: owning source unit, byte span and line
///
/// `line` is the per-unit line counter value observed when the node's
/// production was entered.
#[derive(Copy, Clone, Debug, Display, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[display("{file}:{line} ({span})")]
pub struct FileSpan {
    /// Owning source unit
    pub file: FileId,
    /// Byte span
    pub span: Span,
    /// Line counter value
    pub line: u32,
}

impl FileSpan {
    /// Provenance from its parts
    pub fn new(file: FileId, span: Span, line: u32) -> Self {
        Self { file, span, line }
    }

    /// Byte range for slicing source text
    pub fn range(&self) -> Range<usize> {
        self.span.range()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shifted_and_cover() {
        let span = Span::new(2, 5).shifted(10);
        assert_eq!(span, Span::new(12, 15));
        assert_eq!(span.len(), 3);
        assert_eq!(Span::new(4, 6).cover(Span::new(1, 5)), Span::new(1, 6));
        assert!(Span::new(3, 3).is_empty());
    }

    #[test]
    fn display_includes_file_and_line() {
        let span = FileSpan::new(FileId::new(7), Span::new(0, 4), 12);
        assert_eq!(span.to_string(), "file#7:12 (0..4)");
        assert_eq!(span.range(), 0..4);
    }

    #[test]
    fn file_span_serializes_as_plain_fields() {
        let span = FileSpan::new(FileId(1), Span::new(3, 9), 2);
        let json = serde_json::to_string(&span).unwrap();
        assert_eq!(json, r#"{"file":1,"span":{"start":3,"end":9},"line":2}"#);
    }
}
