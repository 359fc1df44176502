//! Preview and submit cycles.
//!
//! ```text
//! text → Lexer → Parser → Evaluator              (preview, every edit)
//! text → Lexer → Parser → Evaluator → Executor   (submit)
//! ```
//!
//! Each cycle owns its own [`Session`], so the diagnostics of the last
//! submission stay readable while the preview keeps re-running.

use serde::Serialize;
use steer_eval::{execute, resolve, World};
use steer_parser::Session;
use steer_types::ast::ExprId;
use steer_types::Diagnostics;

/// How a submission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    ParseFailed,
    ResolveFailed,
    ExecuteFailed,
    Executed,
}

impl Outcome {
    pub fn is_success(self) -> bool {
        self == Outcome::Executed
    }
}

#[derive(Debug, Default)]
pub struct Pipeline {
    preview: Session,
    submit: Session,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and resolve `text` without touching the world. Returns the parse root.
    ///
    /// Blank text is not resolved, so the preview of an empty line stays clean.
    pub fn preview(&mut self, text: &str, world: &World) -> ExprId {
        let root = self.preview.parse(text);
        if self.preview.diagnostics().is_empty() && !self.preview.arena().is_null(root) {
            resolve(&mut self.preview, world);
        }
        root
    }

    /// Parse, resolve and execute `text`, stopping at the first pass that reports.
    pub fn submit(&mut self, text: &str, world: &mut World) -> Outcome {
        let session = &mut self.submit;
        session.parse(text);
        let outcome = if !session.diagnostics().is_empty() {
            Outcome::ParseFailed
        } else {
            let resolved = resolve(session, world);
            if !session.diagnostics().is_empty() {
                Outcome::ResolveFailed
            } else if execute(session, world, resolved) {
                Outcome::Executed
            } else {
                Outcome::ExecuteFailed
            }
        };
        tracing::debug!(?outcome, diagnostics = session.diagnostics().len(), "submit");
        outcome
    }

    /// The session of the last preview: tokens, parse tree and diagnostics.
    pub fn preview_session(&self) -> &Session {
        &self.preview
    }

    pub fn submit_session(&self) -> &Session {
        &self.submit
    }

    pub fn preview_diagnostics(&self) -> &Diagnostics {
        self.preview.diagnostics()
    }

    pub fn submit_diagnostics(&self) -> &Diagnostics {
        self.submit.diagnostics()
    }
}
