//! Lexer tests.
//!
//! Covers: single-character operators, number literal forms, identifiers,
//! whitespace handling, error tokens, permanent EOF, spans, and
//! determinism across repeated runs.

use steer_lexer::{lex_all, tokenize_into, LexError, Lexer, TokenKind};
use steer_types::Span;

// ─────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────

/// Lex source text and return just the token kinds (excluding final Eof).
fn kinds(source: &str) -> Vec<TokenKind> {
    lex_all(source)
        .into_iter()
        .filter(|t| t.kind != TokenKind::Eof)
        .map(|t| t.kind)
        .collect()
}

/// Lex and return all token spans including Eof.
fn spans(source: &str) -> Vec<Span> {
    lex_all(source).into_iter().map(|t| t.span).collect()
}

/// The single number a source lexes to.
fn number(source: &str) -> f32 {
    match kinds(source).as_slice() {
        [TokenKind::Number(n)] => *n,
        other => panic!("expected one number for {source:?}, got {other:?}"),
    }
}

fn ident(name: &str) -> TokenKind {
    TokenKind::Identifier(name.to_string())
}

// ─────────────────────────────────────────────────────────────────────
// Operators & delimiters
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_single_character_tokens() {
    assert_eq!(
        kinds("+-*/(),:"),
        vec![
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::LParen,
            TokenKind::RParen,
            TokenKind::Comma,
            TokenKind::Colon,
        ]
    );
}

#[test]
fn test_bare_period() {
    assert_eq!(
        kinds("actor.position"),
        vec![ident("actor"), TokenKind::Period, ident("position")]
    );
}

#[test]
fn test_period_before_digit_starts_number() {
    assert_eq!(kinds(".5"), vec![TokenKind::Number(0.5)]);
    assert_eq!(kinds(". 5"), vec![TokenKind::Period, TokenKind::Number(5.0)]);
}

// ─────────────────────────────────────────────────────────────────────
// Numbers
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_integer_and_decimal_literals() {
    assert_eq!(number("42"), 42.0);
    assert_eq!(number("3.25"), 3.25);
    assert_eq!(number("0"), 0.0);
}

#[test]
fn test_trailing_dot_is_part_of_number() {
    assert_eq!(kinds("1."), vec![TokenKind::Number(1.0)]);
    assert_eq!(spans("1.")[0], Span::new(0, 2));
}

#[test]
fn test_exponent_forms() {
    assert_eq!(number("1e3"), 1000.0);
    assert_eq!(number("2.5E-1"), 0.25);
    assert_eq!(number("1.e2"), 100.0);
}

#[test]
fn test_exponent_without_digits_is_not_consumed() {
    assert_eq!(kinds("2e"), vec![TokenKind::Number(2.0), ident("e")]);
    assert_eq!(
        kinds("2e+"),
        vec![TokenKind::Number(2.0), ident("e"), TokenKind::Plus]
    );
}

#[test]
fn test_number_out_of_range() {
    assert_eq!(
        kinds("1e50"),
        vec![TokenKind::Error(LexError::NumberOutOfRange)]
    );
    assert_eq!(
        kinds("1e-60"),
        vec![TokenKind::Error(LexError::NumberOutOfRange)]
    );
}

#[test]
fn test_zero_with_huge_negative_exponent_is_fine() {
    assert_eq!(number("0e-60"), 0.0);
}

#[test]
fn test_number_followed_by_identifier() {
    assert_eq!(kinds("2x"), vec![TokenKind::Number(2.0), ident("x")]);
}

// ─────────────────────────────────────────────────────────────────────
// Identifiers
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_identifiers_are_maximal_runs() {
    assert_eq!(
        kinds("move rotate_2 _tmp"),
        vec![ident("move"), ident("rotate_2"), ident("_tmp")]
    );
}

#[test]
fn test_reserved_names_are_plain_identifiers() {
    assert_eq!(kinds("on"), vec![ident("on")]);
    assert_eq!(kinds("exit"), vec![ident("exit")]);
}

// ─────────────────────────────────────────────────────────────────────
// Whitespace, spans & EOF
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_whitespace_is_skipped() {
    assert_eq!(
        kinds("  move \t:\n 2 "),
        vec![ident("move"), TokenKind::Colon, TokenKind::Number(2.0)]
    );
}

#[test]
fn test_spans_are_byte_offset_and_length() {
    assert_eq!(
        spans("move: 12"),
        vec![
            Span::new(0, 4),
            Span::new(4, 1),
            Span::new(6, 2),
            Span::point(8),
        ]
    );
}

#[test]
fn test_empty_input_is_eof() {
    let tokens = lex_all("");
    assert_eq!(tokens.len(), 1);
    assert!(tokens[0].is_eof());
    assert_eq!(tokens[0].span, Span::point(0));
}

#[test]
fn test_eof_is_permanent() {
    let mut lexer = Lexer::new("x");
    assert_eq!(lexer.next_token().kind, ident("x"));
    for _ in 0..5 {
        let tok = lexer.next_token();
        assert!(tok.is_eof());
        assert_eq!(tok.span, Span::point(1));
    }
}

// ─────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_invalid_character_advances_one() {
    let mut lexer = Lexer::new("#x");
    let tok = lexer.next_token();
    assert_eq!(tok.kind, TokenKind::Error(LexError::InvalidCharacter));
    assert_eq!(tok.span, Span::new(0, 1));
    assert_eq!(lexer.next_token().kind, ident("x"));
}

#[test]
fn test_invalid_multibyte_character_spans_whole_char() {
    let mut lexer = Lexer::new("é1");
    let tok = lexer.next_token();
    assert_eq!(tok.kind, TokenKind::Error(LexError::InvalidCharacter));
    assert_eq!(tok.span, Span::new(0, 2));
    assert_eq!(lexer.next_token().kind, TokenKind::Number(1.0));
}

#[test]
fn test_lex_all_stops_at_first_error() {
    let tokens = lex_all("1 + $ + @");
    assert_eq!(tokens.len(), 3);
    assert!(tokens[2].is_error());
    assert_eq!(tokens[2].span, Span::new(4, 1));
}

#[test]
fn test_tokenize_into_reports_error_and_reuses_buffer() {
    let mut buffer = Vec::new();
    let err = tokenize_into("a ; b", &mut buffer);
    assert_eq!(err, Some((LexError::InvalidCharacter, Span::new(2, 1))));

    buffer.clear();
    assert_eq!(tokenize_into("a + b", &mut buffer), None);
    assert_eq!(buffer.len(), 4);
    assert!(buffer[3].is_eof());
}

// ─────────────────────────────────────────────────────────────────────
// Determinism
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_lexer_determinism_100_iterations() {
    let source = "actor.color : (0.5, 1, 1e-2, .25) * -2 + output.x";
    let first = lex_all(source);
    for i in 0..100 {
        assert_eq!(lex_all(source), first, "iteration {i} diverged");
    }
}
