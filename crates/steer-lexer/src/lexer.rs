//! Core steer lexer: converts console text to a token stream.
//!
//! The lexer hands out one token per call to [`Lexer::next_token`]. Once the
//! end of input is reached it keeps returning [`TokenKind::Eof`]. Errors are
//! returned as [`TokenKind::Error`] tokens; the caller decides whether to stop.

use steer_types::Span;

use crate::token::{LexError, Token, TokenKind};

/// Cursor over the input bytes.
#[derive(Debug, Clone)]
pub struct Lexer<'src> {
    source: &'src str,
    pos: usize,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self { source, pos: 0 }
    }

    /// Byte offset of the next unread character.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Scan and return the next token.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.pos;
        let Some(ch) = self.peek() else {
            return Token::new(TokenKind::Eof, Span::point(self.source.len()));
        };

        let single = match ch {
            b'+' => Some(TokenKind::Plus),
            b'-' => Some(TokenKind::Minus),
            b'*' => Some(TokenKind::Star),
            b'/' => Some(TokenKind::Slash),
            b'(' => Some(TokenKind::LParen),
            b')' => Some(TokenKind::RParen),
            b',' => Some(TokenKind::Comma),
            b':' => Some(TokenKind::Colon),
            _ => None,
        };
        if let Some(kind) = single {
            self.pos += 1;
            return self.finish(kind, start);
        }

        match ch {
            b'.' if matches!(self.peek_at(1), Some(b'0'..=b'9')) => self.scan_number(start),
            b'.' => {
                self.pos += 1;
                self.finish(TokenKind::Period, start)
            }
            b'0'..=b'9' => self.scan_number(start),
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.scan_identifier(start),
            _ => {
                // Advance over a whole code point so spans stay on char boundaries.
                let width = self.source[start..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
                self.pos += width;
                self.finish(TokenKind::Error(LexError::InvalidCharacter), start)
            }
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Character-level helpers
    // ─────────────────────────────────────────────────────────────

    fn peek(&self) -> Option<u8> {
        self.source.as_bytes().get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.source.as_bytes().get(self.pos + offset).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_ascii_whitespace() || ch == 0x0b {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn skip_digits(&mut self) -> usize {
        let start = self.pos;
        while let Some(b'0'..=b'9') = self.peek() {
            self.pos += 1;
        }
        self.pos - start
    }

    fn finish(&self, kind: TokenKind, start: usize) -> Token {
        let token = Token::new(kind, Span::new(start, self.pos - start));
        tracing::trace!(kind = %token.kind, offset = start, "token");
        token
    }

    // ─────────────────────────────────────────────────────────────
    // Literals
    // ─────────────────────────────────────────────────────────────

    /// Decimal float: `digits [. [digits]] [e|E [+|-] digits]`, or a leading
    /// `.` followed by digits. The exponent is only consumed when at least one
    /// digit follows it.
    fn scan_number(&mut self, start: usize) -> Token {
        let int_digits = self.skip_digits();
        let mut frac_digits = 0;
        if self.peek() == Some(b'.') {
            self.pos += 1;
            frac_digits = self.skip_digits();
        }
        let mantissa_end = self.pos;

        if matches!(self.peek(), Some(b'e' | b'E')) {
            let sign = usize::from(matches!(self.peek_at(1), Some(b'+' | b'-')));
            if matches!(self.peek_at(1 + sign), Some(b'0'..=b'9')) {
                self.pos += 1 + sign;
                self.skip_digits();
            }
        }

        let text = &self.source[start..self.pos];
        let mantissa = &self.source[start..mantissa_end];
        let kind = match parse_float(text, int_digits, frac_digits) {
            Some(value) if in_range(value, mantissa) => TokenKind::Number(value),
            _ => TokenKind::Error(LexError::NumberOutOfRange),
        };
        self.finish(kind, start)
    }

    fn scan_identifier(&mut self, start: usize) -> Token {
        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == b'_' {
                self.pos += 1;
            } else {
                break;
            }
        }
        let text = &self.source[start..self.pos];
        self.finish(TokenKind::Identifier(text.to_string()), start)
    }
}

/// Parse the scanned literal, filling in the digits an empty integer or
/// fraction part leaves out (`.5`, `1.`, `1.e3`).
fn parse_float(text: &str, int_digits: usize, frac_digits: usize) -> Option<f32> {
    let mut normalized = String::with_capacity(text.len() + 2);
    if int_digits == 0 {
        normalized.push('0');
    }
    for ch in text.chars() {
        normalized.push(ch);
        if ch == '.' && frac_digits == 0 {
            normalized.push('0');
        }
    }
    normalized.parse::<f32>().ok()
}

/// Overflow to infinity, or a nonzero literal collapsing to zero or a
/// subnormal, counts as out of range.
fn in_range(value: f32, mantissa: &str) -> bool {
    if value.is_infinite() {
        return false;
    }
    let nonzero = mantissa.bytes().any(|b| matches!(b, b'1'..=b'9'));
    !(nonzero && (value == 0.0 || value.is_subnormal()))
}

/// Tokenize `source` up to and including the first EOF or error token.
pub fn lex_all(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    tokenize_into(source, &mut tokens);
    tokens
}

/// Like [`lex_all`], but appends into a caller-owned buffer so the
/// allocation can be reused across passes.
///
/// Returns the lex error, if tokenization stopped on one.
pub fn tokenize_into(source: &str, tokens: &mut Vec<Token>) -> Option<(LexError, Span)> {
    let mut lexer = Lexer::new(source);
    loop {
        let token = lexer.next_token();
        match token.kind {
            TokenKind::Eof => {
                tokens.push(token);
                return None;
            }
            TokenKind::Error(err) => {
                let span = token.span;
                tokens.push(token);
                return Some((err, span));
            }
            _ => tokens.push(token),
        }
    }
}
