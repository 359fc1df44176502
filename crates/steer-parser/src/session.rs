//! A reusable parse session.
//!
//! The session owns the token buffer, the node arena and the error stream.
//! All three are reset at the start of every [`Session::parse`], so a single
//! session serves every keystroke preview and every submission.

use steer_lexer::{tokenize_into, Token};
use steer_types::ast::ExprId;
use steer_types::{Arena, Diagnostics};

use crate::parser::Parser;

#[derive(Debug, Default)]
pub struct Session {
    tokens: Vec<Token>,
    arena: Arena,
    diagnostics: Diagnostics,
    root: Option<ExprId>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenize and parse `text`, replacing everything from the previous pass.
    ///
    /// A lex error stops tokenization, is recorded as the only diagnostic and
    /// yields the null sentinel. Empty input yields the null sentinel with no
    /// diagnostic.
    pub fn parse(&mut self, text: &str) -> ExprId {
        self.tokens.clear();
        self.arena.reset();
        self.diagnostics.clear();

        let root = match tokenize_into(text, &mut self.tokens) {
            Some((err, span)) => {
                self.diagnostics.report(err.code(), err.to_string(), span);
                self.arena.null()
            }
            None => {
                let mut parser = Parser::new(&self.tokens, &mut self.arena, &mut self.diagnostics);
                parser.parse_root()
            }
        };

        tracing::debug!(
            tokens = self.tokens.len(),
            nodes = self.arena.len(),
            diagnostics = self.diagnostics.len(),
            "parse pass"
        );
        self.root = Some(root);
        root
    }

    /// Root of the last parse, or the null sentinel before the first one.
    pub fn root(&self) -> ExprId {
        self.root.unwrap_or_else(|| self.arena.null())
    }

    /// Tokens of the last pass, ending with Eof or the offending error token.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Split borrow for passes that keep building on this session's tree.
    pub fn arena_and_diagnostics(&mut self) -> (&mut Arena, &mut Diagnostics) {
        (&mut self.arena, &mut self.diagnostics)
    }
}
