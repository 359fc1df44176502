//! Steer console: the operator-facing side of the language.
//!
//! ```text
//! keystroke → Console → Pipeline::preview → tokens, diagnostics (highlighting)
//! Enter     → Console → Pipeline::submit  → World mutation
//! frame     → World::update → hud_lines
//! ```

mod console;
mod hud;
mod locator;
mod pipeline;

pub use console::{Console, Highlight, Key, Mode, Segment, CAPACITY};
pub use hud::{expr_tree, format_vector, hud_lines};
pub use locator::{CursorLocator, MonospaceLocator};
pub use pipeline::{Outcome, Pipeline};
