//! Token types for the steer lexer.
//!
//! Defines [`TokenKind`] covering every lexeme of the console language and
//! [`Token`], which pairs a kind with a source [`Span`].

use std::fmt;

use steer_types::{ErrorCode, Span};
use thiserror::Error;

// ─────────────────────────────────────────────────────────────────────
// Token
// ─────────────────────────────────────────────────────────────────────

/// A single token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// Source location.
    pub span: Span,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, TokenKind::Error(_))
    }
}

// ─────────────────────────────────────────────────────────────────────
// TokenKind
// ─────────────────────────────────────────────────────────────────────

/// Every token kind in the console language.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ── Literals ──────────────────────────────────────────────
    /// Decimal float literal: `2`, `.5`, `1e3`
    Number(f32),
    /// Any run of alphanumerics and underscores not starting with a digit.
    /// Reserved names are resolved later, not here.
    Identifier(String),

    // ── Operators ─────────────────────────────────────────────
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `.`
    Period,
    /// `,`
    Comma,
    /// `:`
    Colon,

    // ── Delimiters ────────────────────────────────────────────
    /// `(`
    LParen,
    /// `)`
    RParen,

    // ── Special ───────────────────────────────────────────────
    /// End of input. Returned forever once reached.
    Eof,
    /// A lexing failure. Halts tokenization for the pass.
    Error(LexError),
}

impl TokenKind {
    /// The operators the highlighter colors as arithmetic: `+ - * / .`
    pub fn is_arithmetic_operator(&self) -> bool {
        matches!(
            self,
            TokenKind::Plus | TokenKind::Minus | TokenKind::Star | TokenKind::Slash | TokenKind::Period
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(n) => write!(f, "{n}"),
            TokenKind::Identifier(s) => f.write_str(s),
            TokenKind::Plus => f.write_str("+"),
            TokenKind::Minus => f.write_str("-"),
            TokenKind::Star => f.write_str("*"),
            TokenKind::Slash => f.write_str("/"),
            TokenKind::Period => f.write_str("."),
            TokenKind::Comma => f.write_str(","),
            TokenKind::Colon => f.write_str(":"),
            TokenKind::LParen => f.write_str("("),
            TokenKind::RParen => f.write_str(")"),
            TokenKind::Eof => f.write_str("end of input"),
            TokenKind::Error(e) => write!(f, "error: {e}"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────
// LexError
// ─────────────────────────────────────────────────────────────────────

/// Why the lexer produced an error token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("Invalid character")]
    InvalidCharacter,
    #[error("Number literal out of range")]
    NumberOutOfRange,
}

impl LexError {
    pub fn code(self) -> ErrorCode {
        match self {
            LexError::InvalidCharacter => ErrorCode::INVALID_CHARACTER,
            LexError::NumberOutOfRange => ErrorCode::NUMBER_OUT_OF_RANGE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_construction() {
        let tok = Token::new(TokenKind::Identifier("move".into()), Span::new(0, 4));
        assert_eq!(tok.span.len, 4);
        assert!(!tok.is_eof());
        assert!(!tok.is_error());
    }

    #[test]
    fn test_display_operators() {
        let ops = [
            (TokenKind::Plus, "+"),
            (TokenKind::Minus, "-"),
            (TokenKind::Star, "*"),
            (TokenKind::Slash, "/"),
            (TokenKind::Period, "."),
            (TokenKind::Comma, ","),
            (TokenKind::Colon, ":"),
            (TokenKind::LParen, "("),
            (TokenKind::RParen, ")"),
        ];
        for (kind, text) in ops {
            assert_eq!(kind.to_string(), text);
        }
    }

    #[test]
    fn test_lex_error_messages_and_codes() {
        assert_eq!(LexError::InvalidCharacter.to_string(), "Invalid character");
        assert_eq!(
            LexError::NumberOutOfRange.to_string(),
            "Number literal out of range"
        );
        assert_eq!(LexError::NumberOutOfRange.code(), ErrorCode::NUMBER_OUT_OF_RANGE);
    }

    #[test]
    fn test_arithmetic_operator_class() {
        assert!(TokenKind::Period.is_arithmetic_operator());
        assert!(!TokenKind::Comma.is_arithmetic_operator());
        assert!(!TokenKind::Colon.is_arithmetic_operator());
        assert!(!TokenKind::LParen.is_arithmetic_operator());
    }
}
