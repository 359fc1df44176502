use serde::{Deserialize, Serialize};
use std::fmt;

/// Source location span.
///
/// The console input is a single line, so a span is a byte offset into the
/// text plus a byte length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub offset: usize,
    pub len: usize,
}

impl Span {
    /// Create a new span.
    pub fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// Create a zero-width span at a single position.
    pub fn point(offset: usize) -> Self {
        Self::new(offset, 0)
    }

    /// Byte offset one past the last byte of the span.
    pub fn end(self) -> usize {
        self.offset + self.len
    }

    /// Merge two spans into one that covers both.
    pub fn merge(self, other: Span) -> Span {
        let start = self.offset.min(other.offset);
        let end = self.end().max(other.end());
        Span::new(start, end - start)
    }

    /// The text covered by this span, clamped to the source bounds.
    pub fn snippet(self, source: &str) -> &str {
        let start = self.offset.min(source.len());
        let end = self.end().min(source.len());
        source.get(start..end).unwrap_or("")
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_point() {
        let s = Span::point(5);
        assert_eq!(s.offset, 5);
        assert_eq!(s.len, 0);
        assert_eq!(s.end(), 5);
    }

    #[test]
    fn test_span_merge() {
        let a = Span::new(4, 3);
        let b = Span::new(0, 2);
        let merged = a.merge(b);
        assert_eq!(merged, Span::new(0, 7));
    }

    #[test]
    fn test_span_merge_nested() {
        let outer = Span::new(2, 10);
        let inner = Span::new(4, 1);
        assert_eq!(outer.merge(inner), outer);
    }

    #[test]
    fn test_span_snippet() {
        let src = "move: 2";
        assert_eq!(Span::new(0, 4).snippet(src), "move");
        assert_eq!(Span::new(6, 1).snippet(src), "2");
        assert_eq!(Span::point(7).snippet(src), "");
        assert_eq!(Span::new(5, 40).snippet(src), " 2");
    }

    #[test]
    fn test_span_display() {
        assert_eq!(format!("{}", Span::new(3, 7)), "3");
    }
}
