//! Reserved identifiers of the console language.
//!
//! The three tables are not required to be disjoint. Resolution searches
//! actions, then variables, then constants, and the first match wins.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Verbs that perform a side effect when bound with `:`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Move,
    Rotate,
    Enlarge,
    Change,
    Follow,
    Draw,
    Disp,
    Exit,
}

impl ActionKind {
    pub const ALL: [ActionKind; 8] = [
        ActionKind::Move,
        ActionKind::Rotate,
        ActionKind::Enlarge,
        ActionKind::Change,
        ActionKind::Follow,
        ActionKind::Draw,
        ActionKind::Disp,
        ActionKind::Exit,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ActionKind::Move => "move",
            ActionKind::Rotate => "rotate",
            ActionKind::Enlarge => "enlarge",
            ActionKind::Change => "change",
            ActionKind::Follow => "follow",
            ActionKind::Draw => "draw",
            ActionKind::Disp => "disp",
            ActionKind::Exit => "exit",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }
}

/// Identifiers bound to world-state locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    Output,
    Actor,
    Speed,
    Position,
    Rotation,
    Scale,
    Color,
    X,
    Y,
    Z,
    W,
}

impl VariableKind {
    pub const ALL: [VariableKind; 11] = [
        VariableKind::Output,
        VariableKind::Actor,
        VariableKind::Speed,
        VariableKind::Position,
        VariableKind::Rotation,
        VariableKind::Scale,
        VariableKind::Color,
        VariableKind::X,
        VariableKind::Y,
        VariableKind::Z,
        VariableKind::W,
    ];

    pub fn name(self) -> &'static str {
        match self {
            VariableKind::Output => "output",
            VariableKind::Actor => "actor",
            VariableKind::Speed => "speed",
            VariableKind::Position => "position",
            VariableKind::Rotation => "rotation",
            VariableKind::Scale => "scale",
            VariableKind::Color => "color",
            VariableKind::X => "x",
            VariableKind::Y => "y",
            VariableKind::Z => "z",
            VariableKind::W => "w",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    /// Lane index for the component selectors `x y z w`.
    pub fn lane_index(self) -> Option<u8> {
        match self {
            VariableKind::X => Some(0),
            VariableKind::Y => Some(1),
            VariableKind::Z => Some(2),
            VariableKind::W => Some(3),
            _ => None,
        }
    }
}

/// Nullary identifiers with a fixed meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstantKind {
    On,
    Off,
    Help,
    Expr,
}

impl ConstantKind {
    pub const ALL: [ConstantKind; 4] = [
        ConstantKind::On,
        ConstantKind::Off,
        ConstantKind::Help,
        ConstantKind::Expr,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ConstantKind::On => "on",
            ConstantKind::Off => "off",
            ConstantKind::Help => "help",
            ConstantKind::Expr => "expr",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for ConstantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
