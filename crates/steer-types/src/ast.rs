//! AST node types for the console language.
//!
//! Nodes live in an [`Arena`](crate::Arena) and refer to each other through
//! [`ExprId`] handles. Every node carries a [`Span`] for diagnostics.

use crate::names::{ActionKind, ConstantKind, VariableKind};
use crate::{Span, Vector};

// ══════════════════════════════════════════════════════════════════════════════
// Handles
// ══════════════════════════════════════════════════════════════════════════════

/// Opaque handle to a node in an [`Arena`](crate::Arena).
///
/// The handle remembers the arena generation it was issued in, so a handle
/// kept across a reset is detected instead of aliasing a newer node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExprId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl ExprId {
    pub fn index(self) -> usize {
        self.index as usize
    }

    pub fn generation(self) -> u32 {
        self.generation
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// World-state locations
// ══════════════════════════════════════════════════════════════════════════════

/// A mutable field of world state a variable can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Output,
    Position,
    Rotation,
    RotationTarget,
    Scale,
    ScaleTarget,
    Color,
    ColorTarget,
    SpeedPosition,
    SpeedRotation,
    SpeedScale,
    SpeedColor,
}

impl Field {
    /// Number of `f32` lanes the field holds.
    pub fn width(self) -> u8 {
        match self {
            Field::Output | Field::Color | Field::ColorTarget => 4,
            Field::Position | Field::Scale | Field::ScaleTarget => 2,
            Field::Rotation
            | Field::RotationTarget
            | Field::SpeedPosition
            | Field::SpeedRotation
            | Field::SpeedScale
            | Field::SpeedColor => 1,
        }
    }
}

/// Read/write capability for one lane (and the lanes after it) of a [`Field`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub field: Field,
    pub lane: u8,
}

impl Location {
    /// The first lane of `field`.
    pub fn new(field: Field) -> Self {
        Self { field, lane: 0 }
    }

    /// The location `offset` lanes further into the same field.
    pub fn offset(self, offset: u8) -> Self {
        Self {
            field: self.field,
            lane: self.lane + offset,
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Operators
// ══════════════════════════════════════════════════════════════════════════════

/// Prefix operators. Parentheses are kept as an explicit node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Minus,
    Bracket,
}

/// Infix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `.`
    Member,
    /// `,`
    Concat,
    /// `:`
    Bind,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
            UnaryOp::Bracket => "()",
        }
    }
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Member => ".",
            BinaryOp::Concat => ",",
            BinaryOp::Bind => ":",
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Expressions
// ══════════════════════════════════════════════════════════════════════════════

/// A reserved variable after resolution.
///
/// `value` caches what the primary location held at resolution time. When a
/// `target` is present, writes go to both locations.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub kind: VariableKind,
    pub value: Vector,
    pub primary: Option<Location>,
    pub target: Option<Location>,
}

impl Variable {
    /// An unbound variable name, e.g. a bare `position`.
    pub fn unbound(kind: VariableKind) -> Self {
        Self {
            kind,
            value: Vector::VOID,
            primary: None,
            target: None,
        }
    }
}

/// An expression node with its source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn is_null(&self) -> bool {
        matches!(self.kind, ExprKind::Null)
    }

    /// The vector this node stands for, when it is literal-like: a number, or
    /// a variable or constant of dimension 1 or more.
    pub fn literal_value(&self) -> Option<Vector> {
        match &self.kind {
            ExprKind::Number(v) => Some(*v),
            ExprKind::Variable(var) if !var.value.is_void() => Some(var.value),
            ExprKind::Constant { value, .. } if !value.is_void() => Some(*value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// The "no value" sentinel, returned on every recoverable error.
    Null,
    /// Numeric literal or folded vector.
    Number(Vector),
    /// Unresolved name.
    Identifier(String),
    Unary {
        op: UnaryOp,
        child: ExprId,
    },
    /// `op` is `None` for the placeholder built after "Expected operator" or
    /// "Bracket mismatch". `right` is `None` only while precedence climbing
    /// fills it.
    Binary {
        op: Option<BinaryOp>,
        left: ExprId,
        right: Option<ExprId>,
    },
    Variable(Variable),
    Constant {
        kind: ConstantKind,
        value: Vector,
    },
    Action(ActionKind),
    /// `lhs : rhs`, only meaningful as the top-level result.
    Statement {
        lhs: ExprId,
        rhs: ExprId,
    },
}
