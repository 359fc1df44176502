//! Expression parsing by precedence climbing.
//!
//! Binding table (higher binds tighter):
//!
//! | operator        | precedence | associativity |
//! |-----------------|------------|---------------|
//! | `:`             | 10         | right         |
//! | `,`             | 15         | left          |
//! | `+ -`           | 80         | left          |
//! | `* /`           | 90         | left          |
//! | `.` `(`         | 100        | left          |
//!
//! Every other token has precedence -1 and right associativity, so a stray
//! operand at the top level is still folded in behind an "Expected operator"
//! placeholder instead of ending the loop.

use steer_lexer::TokenKind;
use steer_types::ast::{BinaryOp, ExprId, ExprKind, UnaryOp};
use steer_types::{ErrorCode, Vector};

use crate::parser::Parser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Assoc {
    Left,
    Right,
}

/// Precedence and associativity of a token in operator position.
pub(crate) fn binding(kind: &TokenKind) -> (i32, Assoc) {
    match kind {
        TokenKind::Colon => (10, Assoc::Right),
        TokenKind::Comma => (15, Assoc::Left),
        TokenKind::Plus | TokenKind::Minus => (80, Assoc::Left),
        TokenKind::Star | TokenKind::Slash => (90, Assoc::Left),
        TokenKind::Period | TokenKind::LParen => (100, Assoc::Left),
        _ => (-1, Assoc::Right),
    }
}

fn binary_op(kind: &TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Plus => Some(BinaryOp::Add),
        TokenKind::Minus => Some(BinaryOp::Sub),
        TokenKind::Star => Some(BinaryOp::Mul),
        TokenKind::Slash => Some(BinaryOp::Div),
        TokenKind::Period => Some(BinaryOp::Member),
        TokenKind::Comma => Some(BinaryOp::Concat),
        TokenKind::Colon => Some(BinaryOp::Bind),
        _ => None,
    }
}

impl<'a> Parser<'a> {
    // ══════════════════════════════════════════════════════════════════════════
    // Entry Point
    // ══════════════════════════════════════════════════════════════════════════

    /// Parse the whole buffer. An input holding only Eof yields the null
    /// sentinel without a diagnostic.
    pub fn parse_root(&mut self) -> ExprId {
        if self.at_end() {
            return self.null();
        }
        self.parse_expression(-1, &TokenKind::Eof)
    }

    /// Parse operands and operators binding at least as tightly as `prec`,
    /// stopping early at `expect` (Eof at the top level, `)` inside brackets).
    pub(crate) fn parse_expression(&mut self, prec: i32, expect: &TokenKind) -> ExprId {
        if self.at_end() {
            self.error_at_current(ErrorCode::EXPECTED_EXPRESSION, "Expected expression");
            return self.null();
        }

        let mut left = self.parse_subexpression();

        while !self.at_end() {
            if self.check_exact(expect) {
                break;
            }
            let (op_prec, assoc) = binding(self.peek_kind());
            if op_prec < prec || (op_prec == prec && assoc == Assoc::Left) {
                break;
            }

            let (op_node, pending) = self.parse_binary_operator(left);
            if pending {
                let right = self.parse_expression(op_prec, expect);
                self.arena.fill_right(op_node, right);
            }
            left = op_node;
        }

        left
    }

    // ══════════════════════════════════════════════════════════════════════════
    // Operands
    // ══════════════════════════════════════════════════════════════════════════

    fn parse_subexpression(&mut self) -> ExprId {
        let token = self.peek();
        match &token.kind {
            TokenKind::Plus | TokenKind::Minus => {
                self.advance();
                let op = if token.kind == TokenKind::Plus {
                    UnaryOp::Plus
                } else {
                    UnaryOp::Minus
                };
                let child = self.parse_subexpression();
                self.alloc(ExprKind::Unary { op, child }, token.span)
            }
            TokenKind::Number(value) => {
                self.advance();
                self.alloc(ExprKind::Number(Vector::scalar(*value)), token.span)
            }
            TokenKind::Identifier(name) => {
                self.advance();
                self.alloc(ExprKind::Identifier(name.clone()), token.span)
            }
            TokenKind::LParen => {
                self.advance();
                let child = self.parse_expression(-1, &TokenKind::RParen);
                let mut span = token.span;
                let close = self.current_span();
                if self.eat(&TokenKind::RParen) {
                    span = span.merge(close);
                } else {
                    self.error_at(ErrorCode::UNCLOSED_BRACKET, "Expected \")\"", close);
                }
                self.alloc(
                    ExprKind::Unary {
                        op: UnaryOp::Bracket,
                        child,
                    },
                    span,
                )
            }
            TokenKind::RParen => {
                self.advance();
                self.error_at(ErrorCode::BRACKET_MISMATCH, "Bracket mismatch!", token.span);
                self.null()
            }
            _ => {
                self.error_at(ErrorCode::EXPECTED_EXPRESSION, "Expected expression", token.span);
                self.null()
            }
        }
    }

    // ══════════════════════════════════════════════════════════════════════════
    // Operators
    // ══════════════════════════════════════════════════════════════════════════

    /// Build the binary node for the operator at the cursor.
    ///
    /// Returns the node and whether its right operand is still pending. A
    /// non-operator token is not consumed; the caller parses it as the right
    /// operand of a degenerate node. A stray `)` is consumed and closes the
    /// node with a null right operand.
    fn parse_binary_operator(&mut self, left: ExprId) -> (ExprId, bool) {
        let token = self.peek();

        if let Some(op) = binary_op(&token.kind) {
            self.advance();
            let node = self.alloc(
                ExprKind::Binary {
                    op: Some(op),
                    left,
                    right: None,
                },
                token.span,
            );
            return (node, true);
        }

        if token.kind == TokenKind::RParen {
            self.advance();
            let right = self.null();
            self.error_at(ErrorCode::BRACKET_MISMATCH, "Bracket mismatch", token.span);
            let node = self.alloc(
                ExprKind::Binary {
                    op: None,
                    left,
                    right: Some(right),
                },
                token.span,
            );
            return (node, false);
        }

        self.error_at(ErrorCode::EXPECTED_OPERATOR, "Expected operator", token.span);
        let node = self.alloc(
            ExprKind::Binary {
                op: None,
                left,
                right: None,
            },
            token.span,
        );
        (node, true)
    }
}
