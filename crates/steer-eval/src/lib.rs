//! Steer semantic passes and world state.
//!
//! [`resolve`] binds reserved names and folds constant vector arithmetic on
//! a parsed tree; [`execute`] interprets the resolved root against a
//! [`World`]. The world advances its animation with [`World::update`].

mod config;
mod error;
mod evaluator;
mod executor;
mod world;

pub use config::WorldConfig;
pub use error::{ConfigError, ConfigResult};
pub use evaluator::{resolve, Evaluator};
pub use executor::{execute, Executor};
pub use world::{Actor, DisplayFlags, EaseRates, Panel, Stroke, World};
