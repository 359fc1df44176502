//! Shared types for the steer console language.
//!
//! This crate defines the source spans, the small vector algebra, the
//! reserved-name tables, the arena-allocated AST and the diagnostics used
//! across every stage of the pipeline.

mod arena;
mod error;
mod span;
mod vector;
pub mod ast;
pub mod names;

pub use arena::Arena;
pub use error::{Diagnostic, Diagnostics, ErrorCategory, ErrorCode};
pub use span::Span;
pub use vector::{Vector, MAX_DIM};
