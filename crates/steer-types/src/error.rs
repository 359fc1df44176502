use crate::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Diagnostic category, determined by error code range.
///
/// Lex errors halt tokenization for the pass. Parse and semantic errors are
/// recoverable and accumulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Lex,
    Parse,
    Semantic,
}

/// Numeric error code (E100–E399).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ErrorCode(pub u16);

impl ErrorCode {
    // ── Lex errors (E100–E199) ──
    pub const INVALID_CHARACTER: Self = Self(100);
    pub const NUMBER_OUT_OF_RANGE: Self = Self(101);

    // ── Parse errors (E200–E299) ──
    pub const EXPECTED_EXPRESSION: Self = Self(200);
    pub const EXPECTED_OPERATOR: Self = Self(201);
    pub const BRACKET_MISMATCH: Self = Self(202);
    pub const UNCLOSED_BRACKET: Self = Self(203);

    // ── Semantic errors (E300–E399) ──
    pub const INVALID_IDENTIFIER: Self = Self(300);
    pub const EXPECTED_OPERAND: Self = Self(301);
    pub const DIMENSION_MISMATCH: Self = Self(302);
    pub const DIMENSION_OVERFLOW: Self = Self(303);
    pub const INVALID_MEMBER_ACCESS: Self = Self(304);
    pub const INVALID_BINDING: Self = Self(305);
    pub const INVALID_ARGUMENT: Self = Self(306);
    pub const INCOMPATIBLE_TYPES: Self = Self(307);
    pub const INVALID_VARIABLE: Self = Self(308);
    pub const NOT_EXECUTABLE: Self = Self(309);
    pub const DEGENERATE_OPERATOR: Self = Self(310);

    /// Get the category for this error code.
    pub fn category(self) -> ErrorCategory {
        match self.0 {
            100..=199 => ErrorCategory::Lex,
            200..=299 => ErrorCategory::Parse,
            _ => ErrorCategory::Semantic,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lex => write!(f, "lex"),
            Self::Parse => write!(f, "parse"),
            Self::Semantic => write!(f, "semantic"),
        }
    }
}

/// A single diagnostic produced during a pass.
///
/// The message text is what the console shows next to the error offset, so
/// it is kept short and fixed per failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Error code (e.g., E302).
    pub code: ErrorCode,
    /// Error category (derived from code).
    pub category: ErrorCategory,
    /// Human-readable error message.
    pub message: String,
    /// Offending source range.
    pub span: Span,
}

impl Diagnostic {
    /// Create a new diagnostic.
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        Self {
            code,
            category: code.category(),
            message: message.into(),
            span,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.span, self.message)
    }
}

impl std::error::Error for Diagnostic {}

/// The error stream of one pass: diagnostics in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a diagnostic.
    pub fn report(&mut self, code: ErrorCode, message: impl Into<String>, span: Span) {
        self.entries.push(Diagnostic::new(code, message, span));
    }

    /// Drop every entry, keeping the allocation for the next pass.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn has_errors(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Diagnostic> {
        self.entries.get(index)
    }

    pub fn first(&self) -> Option<&Diagnostic> {
        self.entries.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.entries
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
