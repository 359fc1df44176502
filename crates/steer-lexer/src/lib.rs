//! Steer lexer: converts console input into a token stream.

pub mod lexer;
pub mod token;

pub use lexer::{lex_all, tokenize_into, Lexer};
pub use token::{LexError, Token, TokenKind};
