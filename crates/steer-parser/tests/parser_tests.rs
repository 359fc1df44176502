//! Parser tests.
//!
//! Covers: precedence and associativity, unary and bracket forms, error
//! recovery with placeholder nodes, lex errors, empty input, spans, session
//! reuse across passes, and determinism.

use steer_parser::Session;
use steer_types::ast::{ExprId, ExprKind, UnaryOp};
use steer_types::{Arena, ErrorCode, Span};

// ─────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────

/// Render a tree as an s-expression. `?` marks an operator-less
/// placeholder and `_` a right operand that was never filled.
fn sexpr(arena: &Arena, id: ExprId) -> String {
    let node = arena.node(id);
    match &node.kind {
        ExprKind::Null => "null".to_string(),
        ExprKind::Number(v) => format!("{}", v.x()),
        ExprKind::Identifier(name) => name.clone(),
        ExprKind::Unary { op, child } => {
            let sym = match op {
                UnaryOp::Plus => "+",
                UnaryOp::Minus => "-",
                UnaryOp::Bracket => "()",
            };
            format!("({sym} {})", sexpr(arena, *child))
        }
        ExprKind::Binary { op, left, right } => {
            let sym = op.map_or("?", |op| op.symbol());
            let right = right.map_or("_".to_string(), |r| sexpr(arena, r));
            format!("({sym} {} {right})", sexpr(arena, *left))
        }
        other => format!("{other:?}"),
    }
}

/// Parse and render the tree.
fn parse(source: &str) -> String {
    let mut session = Session::new();
    let root = session.parse(source);
    sexpr(session.arena(), root)
}

/// Parse and return `(offset, message)` for every diagnostic.
fn errors(source: &str) -> Vec<(usize, String)> {
    let mut session = Session::new();
    session.parse(source);
    session
        .diagnostics()
        .iter()
        .map(|d| (d.span.offset, d.message.clone()))
        .collect()
}

/// Parse source, panicking on any diagnostic.
fn parse_ok(source: &str) -> String {
    let errs = errors(source);
    assert!(errs.is_empty(), "unexpected errors for {source:?}: {errs:?}");
    parse(source)
}

fn all_binaries_filled(arena: &Arena, id: ExprId) -> bool {
    match &arena.node(id).kind {
        ExprKind::Unary { child, .. } => all_binaries_filled(arena, *child),
        ExprKind::Binary { left, right, .. } => match right {
            Some(r) => all_binaries_filled(arena, *left) && all_binaries_filled(arena, *r),
            None => false,
        },
        _ => true,
    }
}

// ─────────────────────────────────────────────────────────────────────
// Precedence & associativity
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_mul_binds_tighter_than_add() {
    assert_eq!(parse_ok("1 + 2 * 3"), "(+ 1 (* 2 3))");
    assert_eq!(parse_ok("1 * 2 + 3"), "(+ (* 1 2) 3)");
}

#[test]
fn test_left_assoc_same_level() {
    assert_eq!(parse_ok("1 - 2 - 3"), "(- (- 1 2) 3)");
    assert_eq!(parse_ok("8 / 4 / 2"), "(/ (/ 8 4) 2)");
}

#[test]
fn test_colon_is_right_associative() {
    assert_eq!(parse_ok("move: rotate: 2"), "(: move (: rotate 2))");
}

#[test]
fn test_comma_binds_looser_than_arithmetic() {
    assert_eq!(parse_ok("1, 2 + 3, 4"), "(, (, 1 (+ 2 3)) 4)");
}

#[test]
fn test_colon_binds_loosest() {
    assert_eq!(parse_ok("color: 1, 0, 0"), "(: color (, (, 1 0) 0))");
}

#[test]
fn test_member_access_chain() {
    assert_eq!(
        parse_ok("actor.position.x : 5"),
        "(: (. (. actor position) x) 5)"
    );
}

#[test]
fn test_member_binds_tighter_than_mul() {
    assert_eq!(parse_ok("2 * actor.scale"), "(* 2 (. actor scale))");
}

// ─────────────────────────────────────────────────────────────────────
// Unary & brackets
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_unary_applies_to_subexpression_only() {
    assert_eq!(parse_ok("-1 + 2"), "(+ (- 1) 2)");
    assert_eq!(parse_ok("--1"), "(- (- 1))");
    assert_eq!(parse_ok("+x"), "(+ x)");
}

#[test]
fn test_brackets_reset_precedence() {
    assert_eq!(parse_ok("(1 + 2) * 3"), "(* (() (+ 1 2)) 3)");
    assert_eq!(parse_ok("-(1, 2)"), "(- (() (, 1 2)))");
}

#[test]
fn test_nested_brackets() {
    assert_eq!(parse_ok("((1))"), "(() (() 1))");
}

// ─────────────────────────────────────────────────────────────────────
// Empty input
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_input_is_null_without_error() {
    assert_eq!(parse(""), "null");
    assert!(errors("").is_empty());
    assert_eq!(parse("   "), "null");
    assert!(errors("   ").is_empty());
}

// ─────────────────────────────────────────────────────────────────────
// Error recovery
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_missing_operator_builds_placeholder() {
    assert_eq!(parse("1 2"), "(? 1 2)");
    assert_eq!(errors("1 2"), vec![(2, "Expected operator".to_string())]);
}

#[test]
fn test_stray_close_bracket_after_operand() {
    assert_eq!(parse("1 )"), "(? 1 null)");
    assert_eq!(errors("1 )"), vec![(2, "Bracket mismatch".to_string())]);
}

#[test]
fn test_stray_close_bracket_as_operand() {
    assert_eq!(parse(")"), "null");
    assert_eq!(errors(")"), vec![(0, "Bracket mismatch!".to_string())]);
}

#[test]
fn test_unclosed_bracket() {
    let errs = errors("(1 + ");
    assert_eq!(
        errs,
        vec![
            (5, "Expected expression".to_string()),
            (5, "Expected \")\"".to_string()),
        ]
    );

    let mut session = Session::new();
    session.parse("(1 + ");
    let unclosed = session
        .diagnostics()
        .iter()
        .filter(|d| d.code == ErrorCode::UNCLOSED_BRACKET)
        .count();
    assert_eq!(unclosed, 1);
}

#[test]
fn test_missing_right_operand() {
    assert_eq!(parse("1 +"), "(+ 1 null)");
    assert_eq!(errors("1 +"), vec![(3, "Expected expression".to_string())]);
}

#[test]
fn test_leading_operator() {
    assert_eq!(parse("*2"), "(* null 2)");
    assert_eq!(errors("*2"), vec![(0, "Expected expression".to_string())]);
}

#[test]
fn test_missing_operator_inside_brackets() {
    assert_eq!(parse("(1 2)"), "(() (? 1 2))");
    assert_eq!(errors("(1 2)"), vec![(3, "Expected operator".to_string())]);
}

#[test]
fn test_open_bracket_in_operator_position() {
    assert_eq!(parse("1 (2)"), "(? 1 (() 2))");
    assert_eq!(errors("1 (2)"), vec![(2, "Expected operator".to_string())]);
}

#[test]
fn test_multiple_parse_errors_accumulate() {
    let errs = errors("1 2 ) 3");
    assert!(errs.len() >= 2, "got {errs:?}");
    assert_eq!(errs[0], (2, "Expected operator".to_string()));
}

#[test]
fn test_every_binary_is_filled_after_parse() {
    for source in ["1 +", "1 2 3", "(1 + ", "1 ) 2", "*", ", , :", "a.b.(c", "1 :"] {
        let mut session = Session::new();
        let root = session.parse(source);
        assert!(
            all_binaries_filled(session.arena(), root),
            "unfilled binary for {source:?}"
        );
    }
}

// ─────────────────────────────────────────────────────────────────────
// Lex errors
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_lex_error_yields_null_and_single_diagnostic() {
    let mut session = Session::new();
    let root = session.parse("1 + $ + @");
    assert!(session.arena().is_null(root));
    assert_eq!(session.diagnostics().len(), 1);
    let d = &session.diagnostics().as_slice()[0];
    assert_eq!(d.message, "Invalid character");
    assert_eq!(d.code, ErrorCode::INVALID_CHARACTER);
    assert_eq!(d.span, Span::new(4, 1));
    assert!(session.tokens().last().is_some_and(|t| t.is_error()));
}

#[test]
fn test_number_out_of_range_is_lex_error() {
    assert_eq!(
        errors("move: 1e99"),
        vec![(6, "Number literal out of range".to_string())]
    );
}

// ─────────────────────────────────────────────────────────────────────
// Spans
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_binary_span_is_operator_token() {
    let mut session = Session::new();
    let root = session.parse("12 + 3");
    assert_eq!(session.arena().node(root).span, Span::new(3, 1));
}

#[test]
fn test_bracket_span_covers_parentheses() {
    let mut session = Session::new();
    let root = session.parse(" (1 + 2)");
    assert_eq!(session.arena().node(root).span, Span::new(1, 7));
}

// ─────────────────────────────────────────────────────────────────────
// Session reuse & determinism
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_session_reset_between_passes() {
    let mut session = Session::new();
    let first = session.parse("1 2");
    assert_eq!(session.diagnostics().len(), 1);

    let second = session.parse("3");
    assert!(session.diagnostics().is_empty());
    assert!(session.arena().get(first).is_none());
    assert_eq!(sexpr(session.arena(), second), "3");
    assert_eq!(session.root(), second);
    assert_eq!(session.tokens().len(), 2);
}

#[test]
fn test_parser_determinism_100_iterations() {
    let source = "actor.color : (0.5, 1) , -output.x * 2, 1";
    let mut session = Session::new();
    let root = session.parse(source);
    let first = sexpr(session.arena(), root);
    for i in 0..100 {
        let root = session.parse(source);
        assert_eq!(sexpr(session.arena(), root), first, "iteration {i} diverged");
    }
}
