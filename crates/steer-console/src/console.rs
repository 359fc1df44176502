//! The command line the operator types into.
//!
//! [`Console`] owns the text buffer, the cursor and the [`Pipeline`]. Every
//! edit re-runs the preview so highlighting and the error list always match
//! the buffer; Enter submits, Escape leaves typing mode and drops the text,
//! Tab walks the cursor through the current diagnostics.

use serde::Serialize;
use steer_eval::World;
use steer_lexer::TokenKind;
use steer_types::ast::ExprId;
use steer_types::{Diagnostics, Span};

use crate::locator::CursorLocator;
use crate::pipeline::{Outcome, Pipeline};

/// Maximum buffer length in bytes.
pub const CAPACITY: usize = 256;

/// Printable ASCII accepted from text input.
const TYPABLE: std::ops::RangeInclusive<char> = ' '..='}';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Idle,
    Typing,
}

/// Editing keys; printable characters go through [`Console::type_char`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    Tab,
}

/// Colour class of a stretch of buffer text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Highlight {
    Error,
    Number,
    Identifier,
    Operator,
    General,
}

impl Highlight {
    fn of(kind: &TokenKind) -> Self {
        match kind {
            TokenKind::Error(_) => Highlight::Error,
            TokenKind::Number(_) => Highlight::Number,
            TokenKind::Identifier(_) => Highlight::Identifier,
            kind if kind.is_arithmetic_operator() => Highlight::Operator,
            _ => Highlight::General,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub highlight: Highlight,
    pub span: Span,
}

#[derive(Debug, Default)]
pub struct Console {
    text: String,
    cursor: usize,
    mode: Mode,
    /// Next diagnostic Tab jumps to.
    error_index: usize,
    pipeline: Pipeline,
}

impl Console {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_typing(&self) -> bool {
        self.mode == Mode::Typing
    }

    pub fn is_full(&self) -> bool {
        self.text.len() >= CAPACITY
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Parse root of the last preview.
    pub fn preview_root(&self) -> ExprId {
        self.pipeline.preview_session().root()
    }

    pub fn preview_diagnostics(&self) -> &Diagnostics {
        self.pipeline.preview_diagnostics()
    }

    pub fn submit_diagnostics(&self) -> &Diagnostics {
        self.pipeline.submit_diagnostics()
    }

    // ── Mode ──────────────────────────────────────────────────────────

    pub fn start_typing(&mut self) {
        self.mode = Mode::Typing;
    }

    /// Leave typing mode, discarding the unsubmitted text.
    pub fn stop_typing(&mut self, world: &World) {
        self.mode = Mode::Idle;
        self.text.clear();
        self.cursor = 0;
        self.refresh(world);
    }

    // ── Input ─────────────────────────────────────────────────────────

    /// Insert `c` at the cursor. Ignored outside typing mode, for
    /// characters outside printable ASCII and when the buffer is full.
    pub fn type_char(&mut self, c: char, world: &World) -> bool {
        if !self.is_typing() || !TYPABLE.contains(&c) || self.is_full() {
            return false;
        }
        self.text.insert(self.cursor, c);
        self.cursor += 1;
        self.refresh(world);
        true
    }

    /// Type every character of `text` in order.
    pub fn type_str(&mut self, text: &str, world: &World) {
        for c in text.chars() {
            self.type_char(c, world);
        }
    }

    /// Handle an editing key. Returns the outcome when Enter submitted.
    pub fn handle_key(&mut self, key: Key, world: &mut World) -> Option<Outcome> {
        if !self.is_typing() {
            if key == Key::Enter {
                self.start_typing();
            }
            return None;
        }

        match key {
            Key::Escape => self.stop_typing(world),
            Key::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.text.remove(self.cursor);
                    self.refresh(world);
                }
            }
            Key::Delete => {
                if self.cursor < self.text.len() {
                    self.text.remove(self.cursor);
                    self.refresh(world);
                }
            }
            Key::Left => self.set_cursor(self.cursor.saturating_sub(1)),
            Key::Right => self.set_cursor(self.cursor + 1),
            Key::Home => self.set_cursor(0),
            Key::End => self.set_cursor(self.text.len()),
            Key::Tab => {
                self.next_error();
            }
            Key::Enter => return Some(self.submit(world)),
        }
        None
    }

    /// Move the cursor; offsets past the end are ignored.
    pub fn set_cursor(&mut self, cursor: usize) {
        if cursor <= self.text.len() {
            self.cursor = cursor;
        }
    }

    /// Place the cursor at the glyph boundary nearest to `x`.
    pub fn click(&mut self, x: f32, locator: &dyn CursorLocator) {
        let offset = locator.offset_at(&self.text, x);
        self.set_cursor(offset);
    }

    // ── Cycles ────────────────────────────────────────────────────────

    /// Re-run the preview over the current text.
    pub fn refresh(&mut self, world: &World) {
        self.pipeline.preview(&self.text, world);
    }

    /// Submit the buffer. On success the buffer is cleared; on failure it is
    /// kept and the cursor jumps to the first diagnostic.
    pub fn submit(&mut self, world: &mut World) -> Outcome {
        let outcome = self.pipeline.submit(&self.text, world);
        if outcome.is_success() {
            self.text.clear();
            self.cursor = 0;
        } else {
            self.error_index = 0;
            jump(
                &mut self.cursor,
                &mut self.error_index,
                self.pipeline.submit_diagnostics(),
                self.text.len(),
            );
        }
        self.refresh(world);
        outcome
    }

    /// Jump to the next preview diagnostic, or to the next one from the last
    /// submission when the preview is clean. Returns `false` if there is none.
    pub fn next_error(&mut self) -> bool {
        let diagnostics = if self.pipeline.preview_diagnostics().is_empty() {
            self.pipeline.submit_diagnostics()
        } else {
            self.pipeline.preview_diagnostics()
        };
        jump(&mut self.cursor, &mut self.error_index, diagnostics, self.text.len())
    }

    // ── Highlighting ──────────────────────────────────────────────────

    /// Colour runs covering the whole buffer, in order.
    pub fn highlights(&self) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut at = 0;
        for token in self.pipeline.preview_session().tokens() {
            if token.is_eof() {
                break;
            }
            let span = token.span;
            if span.offset > at {
                segments.push(Segment {
                    highlight: Highlight::General,
                    span: Span::new(at, span.offset - at),
                });
            }
            segments.push(Segment {
                highlight: Highlight::of(&token.kind),
                span,
            });
            at = span.end();
        }
        if at < self.text.len() {
            segments.push(Segment {
                highlight: Highlight::General,
                span: Span::new(at, self.text.len() - at),
            });
        }
        segments
    }
}

/// Move `cursor` to the diagnostic at `index` and advance it, wrapping when
/// the index is past the end. Offsets past `text_len` leave the cursor alone;
/// submission diagnostics outlive edits to the text.
fn jump(cursor: &mut usize, index: &mut usize, diagnostics: &Diagnostics, text_len: usize) -> bool {
    if diagnostics.is_empty() {
        return false;
    }
    if *index >= diagnostics.len() {
        *index = 0;
    }
    if let Some(diagnostic) = diagnostics.get(*index) {
        if diagnostic.span.offset <= text_len {
            *cursor = diagnostic.span.offset;
        }
    }
    *index += 1;
    true
}
