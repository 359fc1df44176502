//! Resolve pass: identifier resolution and constant folding.
//!
//! Walks a parsed tree, binds reserved names to world locations and folds
//! operator nodes into new nodes in the same arena. Every failure reports a
//! diagnostic and yields the null sentinel; a null operand propagates
//! silently so one mistake is reported once.

use steer_parser::Session;
use steer_types::ast::{
    BinaryOp, Expr, ExprId, ExprKind, Field, Location, UnaryOp, Variable,
};
use steer_types::names::{ActionKind, ConstantKind, VariableKind};
use steer_types::{Arena, Diagnostics, ErrorCode, Span, Vector};

use crate::world::World;

/// Resolve the root of the session's last parse against `world`.
///
/// A null root (blank input) is itself an error at this level.
pub fn resolve(session: &mut Session, world: &World) -> ExprId {
    let root = session.root();
    let (arena, diagnostics) = session.arena_and_diagnostics();
    let resolved = if arena.is_null(root) {
        let span = arena.node(root).span;
        diagnostics.report(ErrorCode::EXPECTED_OPERAND, "Expected expression", span);
        root
    } else {
        Evaluator::new(world, arena, diagnostics).resolve(root)
    };
    tracing::debug!(
        nodes = session.arena().len(),
        diagnostics = session.diagnostics().len(),
        "resolve pass"
    );
    resolved
}

/// Operators that fold two literal-like operands into a number.
#[derive(Debug, Clone, Copy)]
enum Arith {
    Add,
    Sub,
    Mul,
    Div,
    Concat,
}

/// The resolve pass over one arena.
pub struct Evaluator<'a> {
    world: &'a World,
    arena: &'a mut Arena,
    diagnostics: &'a mut Diagnostics,
}

impl<'a> Evaluator<'a> {
    pub fn new(world: &'a World, arena: &'a mut Arena, diagnostics: &'a mut Diagnostics) -> Self {
        Self {
            world,
            arena,
            diagnostics,
        }
    }

    /// Resolve `id`, returning the resolved node (possibly `id` itself).
    pub fn resolve(&mut self, id: ExprId) -> ExprId {
        let Expr { kind, span } = self.arena.node(id).clone();
        match kind {
            ExprKind::Null => self.arena.null(),
            ExprKind::Number(_)
            | ExprKind::Variable(_)
            | ExprKind::Constant { .. }
            | ExprKind::Action(_)
            | ExprKind::Statement { .. } => id,
            ExprKind::Identifier(name) => self.resolve_identifier(&name, span),
            ExprKind::Unary { op, child } => self.resolve_unary(op, child, span),
            ExprKind::Binary { op, left, right } => self.resolve_binary(op, left, right, span),
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Helpers
    // ══════════════════════════════════════════════════════════════════════

    fn fail(&mut self, code: ErrorCode, message: &str, span: Span) -> ExprId {
        tracing::trace!(%code, offset = span.offset, message, "resolve error");
        self.diagnostics.report(code, message, span);
        self.arena.null()
    }

    fn node(&self, id: ExprId) -> &Expr {
        self.arena.node(id)
    }

    /// A variable bound to `dim` lanes at `primary`, caching their current value.
    fn bound(&self, kind: VariableKind, primary: Location, target: Option<Location>, dim: u8) -> Variable {
        Variable {
            kind,
            value: self.world.read(primary, dim),
            primary: Some(primary),
            target,
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Identifiers
    // ══════════════════════════════════════════════════════════════════════

    /// Actions, then variables, then constants; the first table that knows
    /// the name wins.
    fn resolve_identifier(&mut self, name: &str, span: Span) -> ExprId {
        if let Some(action) = ActionKind::from_name(name) {
            return self.arena.alloc(ExprKind::Action(action), span);
        }
        if let Some(kind) = VariableKind::from_name(name) {
            let var = if kind == VariableKind::Output {
                let dim = self.world.output().dim();
                self.bound(kind, Location::new(Field::Output), None, dim)
            } else {
                Variable::unbound(kind)
            };
            return self.arena.alloc(ExprKind::Variable(var), span);
        }
        if let Some(kind) = ConstantKind::from_name(name) {
            return self.arena.alloc(
                ExprKind::Constant {
                    kind,
                    value: Vector::VOID,
                },
                span,
            );
        }
        self.fail(ErrorCode::INVALID_IDENTIFIER, "Invalid identifier", span)
    }

    // ══════════════════════════════════════════════════════════════════════
    // Unary
    // ══════════════════════════════════════════════════════════════════════

    fn resolve_unary(&mut self, op: UnaryOp, child: ExprId, span: Span) -> ExprId {
        let child = self.resolve(child);
        let child = self.node(child);
        match child.literal_value() {
            Some(value) => {
                let value = match op {
                    UnaryOp::Minus => value.neg(),
                    UnaryOp::Plus | UnaryOp::Bracket => value,
                };
                self.arena.alloc(ExprKind::Number(value), span)
            }
            None if child.is_null() => self.arena.null(),
            None => {
                let child_span = child.span;
                self.fail(ErrorCode::EXPECTED_OPERAND, "Expected expression", child_span)
            }
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Binary
    // ══════════════════════════════════════════════════════════════════════

    fn resolve_binary(
        &mut self,
        op: Option<BinaryOp>,
        left: ExprId,
        right: Option<ExprId>,
        span: Span,
    ) -> ExprId {
        let Some(op) = op else {
            return self.fail(ErrorCode::DEGENERATE_OPERATOR, "Expected binary operator", span);
        };

        let left = self.resolve(left);
        let right = match right {
            Some(right) => self.resolve(right),
            None => self.arena.null(),
        };
        if self.node(left).is_null() || self.node(right).is_null() {
            return self.arena.null();
        }

        match op {
            BinaryOp::Add => self.fold(Arith::Add, left, right, span),
            BinaryOp::Sub => self.fold(Arith::Sub, left, right, span),
            BinaryOp::Mul => self.fold(Arith::Mul, left, right, span),
            BinaryOp::Div => self.fold(Arith::Div, left, right, span),
            BinaryOp::Concat => self.fold(Arith::Concat, left, right, span),
            BinaryOp::Member => self.member_access(left, right, span),
            BinaryOp::Bind => self.bind(left, right, span),
        }
    }

    /// Vector arithmetic over two literal-like operands.
    fn fold(&mut self, op: Arith, left: ExprId, right: ExprId, span: Span) -> ExprId {
        let left_span = self.node(left).span;
        let (Some(l), Some(r)) = (self.node(left).literal_value(), self.node(right).literal_value())
        else {
            // Both operand failures point at the left operand.
            return self.fail(ErrorCode::EXPECTED_OPERAND, "Expected variable or literal", left_span);
        };

        let folded = match op {
            Arith::Add if l.dim() == r.dim() => Ok(l.add(r)),
            Arith::Add => Err((
                ErrorCode::DIMENSION_MISMATCH,
                "Addition can not be performed on vectors with different dimension",
                left_span,
            )),
            Arith::Sub if l.dim() == r.dim() => Ok(l.sub(r)),
            Arith::Sub => Err((
                ErrorCode::DIMENSION_MISMATCH,
                "Subtraction can not be performed on vectors with different dimension",
                left_span,
            )),
            Arith::Div if r.dim() == 1 => Ok(l.scale(1.0 / r.x())),
            Arith::Div => Err((
                ErrorCode::DIMENSION_MISMATCH,
                "Division can not be performed by vector",
                left_span,
            )),
            Arith::Mul if l.dim() == r.dim() => Ok(Vector::scalar(l.dot(r))),
            Arith::Mul if r.dim() == 1 => Ok(l.scale(r.x())),
            Arith::Mul if l.dim() == 1 => Ok(r.scale(l.x())),
            Arith::Mul => Err((
                ErrorCode::DIMENSION_MISMATCH,
                "Invalid vectors for multiplication",
                left_span,
            )),
            Arith::Concat => l.concat(r).ok_or((
                ErrorCode::DIMENSION_OVERFLOW,
                "Vectors with dimension greater than 4 is not supported",
                span,
            )),
        };

        match folded {
            Ok(value) => self.arena.alloc(ExprKind::Number(value), span),
            Err((code, message, at)) => self.fail(code, message, at),
        }
    }

    /// `left.right`, where both sides are reserved variables.
    fn member_access(&mut self, left: ExprId, right: ExprId, span: Span) -> ExprId {
        let (base, base_span) = match &self.node(left).kind {
            ExprKind::Variable(var) => (var.clone(), self.node(left).span),
            _ => {
                let at = self.node(left).span;
                return self.fail(ErrorCode::INVALID_MEMBER_ACCESS, "Expected variable", at);
            }
        };
        let member = match &self.node(right).kind {
            ExprKind::Variable(var) => var.kind,
            _ => {
                let at = self.node(right).span;
                return self.fail(ErrorCode::INVALID_MEMBER_ACCESS, "Expected variable", at);
            }
        };
        tracing::trace!(base = %base.kind, %member, offset = base_span.offset, "member access");

        let loc = Location::new;
        let resolved = match base.kind {
            VariableKind::Output => member
                .lane_index()
                .map(|lane| self.bound(member, loc(Field::Output).offset(lane), None, 1)),
            VariableKind::Actor => match member {
                VariableKind::Position => {
                    Some(self.bound(member, loc(Field::Position), None, 2))
                }
                VariableKind::Rotation => Some(self.bound(
                    member,
                    loc(Field::Rotation),
                    Some(loc(Field::RotationTarget)),
                    1,
                )),
                VariableKind::Scale => Some(self.bound(
                    member,
                    loc(Field::Scale),
                    Some(loc(Field::ScaleTarget)),
                    2,
                )),
                VariableKind::Color => Some(self.bound(
                    member,
                    loc(Field::Color),
                    Some(loc(Field::ColorTarget)),
                    4,
                )),
                _ => None,
            },
            VariableKind::Speed => {
                let field = match member {
                    VariableKind::Position => Some(Field::SpeedPosition),
                    VariableKind::Rotation => Some(Field::SpeedRotation),
                    VariableKind::Scale => Some(Field::SpeedScale),
                    VariableKind::Color => Some(Field::SpeedColor),
                    _ => None,
                };
                field.map(|field| self.bound(VariableKind::X, loc(field), None, 1))
            }
            VariableKind::Position | VariableKind::Scale | VariableKind::Color => {
                let Some(primary) = base.primary else {
                    return self.fail(ErrorCode::INVALID_IDENTIFIER, "Invalid identifier", span);
                };
                member
                    .lane_index()
                    .filter(|&lane| lane < base.value.dim())
                    .map(|lane| {
                        self.bound(
                            member,
                            primary.offset(lane),
                            base.target.map(|t| t.offset(lane)),
                            1,
                        )
                    })
            }
            VariableKind::Rotation
            | VariableKind::X
            | VariableKind::Y
            | VariableKind::Z
            | VariableKind::W => None,
        };

        match resolved {
            Some(var) => self.arena.alloc(ExprKind::Variable(var), span),
            None => self.fail(ErrorCode::INVALID_MEMBER_ACCESS, "Invalid member access", span),
        }
    }

    /// `left : right` becomes a statement for the executor.
    fn bind(&mut self, left: ExprId, right: ExprId, span: Span) -> ExprId {
        let lhs = self.node(left);
        if !matches!(lhs.kind, ExprKind::Action(_) | ExprKind::Variable(_)) {
            let at = lhs.span;
            return self.fail(ErrorCode::INVALID_BINDING, "Expected action or variable", at);
        }
        let rhs = self.node(right);
        let accepted = rhs.literal_value().is_some()
            || matches!(rhs.kind, ExprKind::Variable(_) | ExprKind::Constant { .. });
        if !accepted {
            let at = rhs.span;
            return self.fail(
                ErrorCode::INVALID_BINDING,
                "Expected action or variable or constant",
                at,
            );
        }
        self.arena.alloc(ExprKind::Statement { lhs: left, rhs: right }, span)
    }
}
