//! Core parser infrastructure: token cursor, node allocation, error reporting.

use steer_lexer::{Token, TokenKind};
use steer_types::ast::{ExprId, ExprKind};
use steer_types::{Arena, Diagnostics, ErrorCode, Span};

/// Returned by the cursor if the buffer is ever empty.
static EOF_TOKEN: Token = Token {
    kind: TokenKind::Eof,
    span: Span { offset: 0, len: 0 },
};

/// The console-language parser.
///
/// Walks a buffered token stream (always terminated by [`TokenKind::Eof`])
/// and builds nodes into a borrowed [`Arena`]. Errors never stop the parse:
/// they go to the borrowed [`Diagnostics`] and a placeholder node is built.
pub struct Parser<'a> {
    /// The token stream.
    tokens: &'a [Token],
    /// Current index into `tokens`. Never moves past the final Eof.
    pos: usize,
    pub(crate) arena: &'a mut Arena,
    diagnostics: &'a mut Diagnostics,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token], arena: &'a mut Arena, diagnostics: &'a mut Diagnostics) -> Self {
        Self {
            tokens,
            pos: 0,
            arena,
            diagnostics,
        }
    }

    // ── Token Cursor ──────────────────────────────────────────────────────────

    /// Returns the current token without advancing.
    pub(crate) fn peek(&self) -> &'a Token {
        let tokens = self.tokens;
        tokens.get(self.pos).or(tokens.last()).unwrap_or(&EOF_TOKEN)
    }

    /// Returns the kind of the current token.
    pub(crate) fn peek_kind(&self) -> &'a TokenKind {
        &self.peek().kind
    }

    /// Advance the cursor by one and return the consumed token.
    pub(crate) fn advance(&mut self) -> &'a Token {
        let token = self.peek();
        if !token.is_eof() && self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Returns the span of the current token.
    pub(crate) fn current_span(&self) -> Span {
        self.peek().span
    }

    /// Returns `true` if the current token is `Eof`.
    pub(crate) fn at_end(&self) -> bool {
        matches!(self.peek_kind(), TokenKind::Eof)
    }

    /// Check if the current token matches the given kind exactly.
    pub(crate) fn check_exact(&self, kind: &TokenKind) -> bool {
        self.peek_kind() == kind
    }

    /// If the current token matches, advance and return `true`.
    pub(crate) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check_exact(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    // ── Nodes ─────────────────────────────────────────────────────────────────

    pub(crate) fn alloc(&mut self, kind: ExprKind, span: Span) -> ExprId {
        self.arena.alloc(kind, span)
    }

    pub(crate) fn null(&self) -> ExprId {
        self.arena.null()
    }

    // ── Error Reporting ───────────────────────────────────────────────────────

    /// Report an error at the current token position.
    pub(crate) fn error_at_current(&mut self, code: ErrorCode, message: &str) {
        let span = self.current_span();
        self.error_at(code, message, span);
    }

    /// Report an error at a specific span.
    pub(crate) fn error_at(&mut self, code: ErrorCode, message: &str, span: Span) {
        tracing::trace!(%code, offset = span.offset, message, "parse error");
        self.diagnostics.report(code, message, span);
    }
}
