//! Bump arena for syntax-tree nodes.
//!
//! Nodes are pushed and never individually freed. [`Arena::reset`] drops
//! the whole tree at once and starts a new generation; handles from an
//! older generation are rejected by [`Arena::get`].

use crate::ast::{Expr, ExprId, ExprKind};
use crate::Span;

/// Slot of the null sentinel in every generation.
const NULL_INDEX: u32 = 0;

#[derive(Debug, Clone)]
pub struct Arena {
    nodes: Vec<Expr>,
    generation: u32,
}

impl Arena {
    pub fn new() -> Self {
        Self {
            nodes: vec![Expr::new(ExprKind::Null, Span::point(0))],
            generation: 0,
        }
    }

    /// Drop every node and start a new generation. Capacity is kept.
    pub fn reset(&mut self) {
        self.nodes.clear();
        self.nodes.push(Expr::new(ExprKind::Null, Span::point(0)));
        self.generation = self.generation.wrapping_add(1);
    }

    /// The single null sentinel of the current generation.
    pub fn null(&self) -> ExprId {
        ExprId {
            index: NULL_INDEX,
            generation: self.generation,
        }
    }

    pub fn alloc(&mut self, kind: ExprKind, span: Span) -> ExprId {
        let index = self.nodes.len() as u32;
        self.nodes.push(Expr::new(kind, span));
        ExprId {
            index,
            generation: self.generation,
        }
    }

    /// Look a node up, rejecting handles from an older generation.
    pub fn get(&self, id: ExprId) -> Option<&Expr> {
        if id.generation != self.generation {
            return None;
        }
        self.nodes.get(id.index as usize)
    }

    /// Like [`Arena::get`], but a stale handle reads as the null sentinel.
    pub fn node(&self, id: ExprId) -> &Expr {
        match self.get(id) {
            Some(expr) => expr,
            None => {
                tracing::warn!(
                    index = id.index,
                    generation = id.generation,
                    current = self.generation,
                    "stale expression handle"
                );
                &self.nodes[NULL_INDEX as usize]
            }
        }
    }

    pub fn is_null(&self, id: ExprId) -> bool {
        self.node(id).is_null()
    }

    /// Fill the pending right operand of a binary node.
    ///
    /// This is the only mutation the arena allows after construction. The
    /// node keeps the span of its operator token.
    /// Returns `false` when `id` is not a binary node awaiting its right side.
    pub fn fill_right(&mut self, id: ExprId, right: ExprId) -> bool {
        if id.generation != self.generation {
            return false;
        }
        match self.nodes.get_mut(id.index as usize) {
            Some(Expr {
                kind: ExprKind::Binary { right: slot @ None, .. },
                ..
            }) => {
                *slot = Some(right);
                true
            }
            _ => false,
        }
    }

    /// Number of live nodes, including the sentinel.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::BinaryOp;
    use crate::Vector;

    #[test]
    fn test_null_is_slot_zero_and_unique() {
        let mut arena = Arena::new();
        let null = arena.null();
        assert!(arena.is_null(null));
        let n = arena.alloc(ExprKind::Number(Vector::scalar(1.0)), Span::new(0, 1));
        assert_ne!(n, null);
        assert_eq!(arena.null(), null);
    }

    #[test]
    fn test_reset_rejects_stale_handles() {
        let mut arena = Arena::new();
        let n = arena.alloc(ExprKind::Number(Vector::scalar(1.0)), Span::new(0, 1));
        assert!(arena.get(n).is_some());
        arena.reset();
        assert!(arena.get(n).is_none());
        assert!(arena.node(n).is_null());
        assert_eq!(arena.len(), 1);
        assert!(arena.is_empty());
    }

    #[test]
    fn test_reset_keeps_fresh_null_valid() {
        let mut arena = Arena::new();
        arena.reset();
        let null = arena.null();
        assert!(arena.get(null).is_some());
        assert_eq!(null.generation(), 1);
    }

    #[test]
    fn test_fill_right_only_once() {
        let mut arena = Arena::new();
        let left = arena.alloc(ExprKind::Number(Vector::scalar(1.0)), Span::new(0, 1));
        let right = arena.alloc(ExprKind::Number(Vector::scalar(2.0)), Span::new(4, 1));
        let op = arena.alloc(
            ExprKind::Binary {
                op: Some(BinaryOp::Add),
                left,
                right: None,
            },
            Span::new(2, 1),
        );
        assert!(arena.fill_right(op, right));
        assert!(!arena.fill_right(op, left));
        assert_eq!(arena.node(op).span, Span::new(2, 1));
        match &arena.node(op).kind {
            ExprKind::Binary { right: Some(r), .. } => assert_eq!(*r, right),
            other => panic!("expected filled binary, got {other:?}"),
        }
    }

    #[test]
    fn test_fill_right_refuses_non_binary() {
        let mut arena = Arena::new();
        let n = arena.alloc(ExprKind::Number(Vector::scalar(1.0)), Span::new(0, 1));
        let null = arena.null();
        assert!(!arena.fill_right(n, null));
        assert!(!arena.fill_right(null, n));
    }
}
