//! Steer parser: converts a token stream into an arena-allocated AST.

mod parse_expr;
mod parser;
mod session;

pub use parser::Parser;
pub use session::Session;
