//! World: the persistent state the console language steers.
//!
//! Holds the actor transform with its animation targets and ease rates, the
//! output register, the HUD display toggles, the stroke trail and the
//! camera. It is created once and mutated only by the executor and by
//! [`World::update`].

use serde::{Deserialize, Serialize};
use steer_types::ast::{Field, Location};
use steer_types::Vector;

use crate::config::WorldConfig;

// ══════════════════════════════════════════════════════════════════════
// Actor
// ══════════════════════════════════════════════════════════════════════

/// Per-field ease rates in `[0, 1]`: the share of the remaining distance
/// closed in one second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EaseRates {
    pub position: f32,
    pub rotation: f32,
    pub scale: f32,
    pub color: f32,
}

impl Default for EaseRates {
    fn default() -> Self {
        Self {
            position: 0.25,
            rotation: 0.25,
            scale: 0.25,
            color: 0.25,
        }
    }
}

/// The steered actor. Live fields ease toward their targets every frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Actor {
    pub position: [f32; 2],
    /// Radians.
    pub rotation: f32,
    pub scale: [f32; 2],
    pub color: [f32; 4],

    /// Translation still to be covered along the current heading.
    pub move_distance: f32,
    pub rotation_target: f32,
    pub scale_target: [f32; 2],
    pub color_target: [f32; 4],

    pub speed: EaseRates,
}

/// One recorded trail mark.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stroke {
    pub position: [f32; 2],
    pub radius: [f32; 2],
    pub color: [f32; 4],
}

// ══════════════════════════════════════════════════════════════════════
// Display toggles
// ══════════════════════════════════════════════════════════════════════

/// HUD panels that `disp` can toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Panel {
    Help,
    Expr,
    Position,
    Rotation,
    Scale,
    Color,
    Speed,
    Output,
}

impl Panel {
    pub const ALL: [Panel; 8] = [
        Panel::Help,
        Panel::Expr,
        Panel::Position,
        Panel::Rotation,
        Panel::Scale,
        Panel::Color,
        Panel::Speed,
        Panel::Output,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Visibility of every [`Panel`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DisplayFlags {
    visible: [bool; 8],
}

impl DisplayFlags {
    pub fn with_visible(panels: &[Panel]) -> Self {
        let mut flags = Self::default();
        for &panel in panels {
            flags.set(panel, true);
        }
        flags
    }

    pub fn is_visible(&self, panel: Panel) -> bool {
        self.visible[panel.index()]
    }

    pub fn set(&mut self, panel: Panel, visible: bool) {
        self.visible[panel.index()] = visible;
    }

    /// Flip a panel and return its new visibility.
    pub fn toggle(&mut self, panel: Panel) -> bool {
        let slot = &mut self.visible[panel.index()];
        *slot = !*slot;
        *slot
    }
}

// ══════════════════════════════════════════════════════════════════════
// World
// ══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct World {
    pub actor: Actor,
    output: [f32; 4],
    output_dim: u8,
    /// Camera center.
    pub camera: [f32; 2],
    /// Camera half-height in world units.
    pub view_size: f32,
    pub follow: bool,
    pub draw: bool,
    pub display: DisplayFlags,
    pub strokes: Vec<Stroke>,
    pub exit_requested: bool,
    follow_rate: f32,
    stroke_threshold: f32,
}

impl World {
    pub fn new(config: &WorldConfig) -> Self {
        let output = Vector::new(config.output, config.output_dim);
        Self {
            actor: Actor {
                position: config.position,
                rotation: config.rotation,
                scale: config.scale,
                color: config.color,
                move_distance: 0.0,
                rotation_target: config.rotation,
                scale_target: config.scale,
                color_target: config.color,
                speed: config.speed,
            },
            output: output.lanes(),
            output_dim: output.dim(),
            camera: [0.0, 0.0],
            view_size: config.view_size,
            follow: config.follow,
            draw: config.draw,
            display: DisplayFlags::with_visible(&config.panels),
            strokes: Vec::new(),
            exit_requested: false,
            follow_rate: config.follow_rate,
            stroke_threshold: config.stroke_threshold,
        }
    }

    // ── Output register ───────────────────────────────────────────────

    /// The output register with its dimension.
    pub fn output(&self) -> Vector {
        Vector::new(self.output, self.output_dim)
    }

    pub fn set_output(&mut self, value: Vector) {
        self.output = value.lanes();
        self.output_dim = value.dim();
    }

    // ── Locations ─────────────────────────────────────────────────────

    fn lanes(&self, field: Field) -> &[f32] {
        let a = &self.actor;
        match field {
            Field::Output => &self.output,
            Field::Position => &a.position,
            Field::Rotation => std::slice::from_ref(&a.rotation),
            Field::RotationTarget => std::slice::from_ref(&a.rotation_target),
            Field::Scale => &a.scale,
            Field::ScaleTarget => &a.scale_target,
            Field::Color => &a.color,
            Field::ColorTarget => &a.color_target,
            Field::SpeedPosition => std::slice::from_ref(&a.speed.position),
            Field::SpeedRotation => std::slice::from_ref(&a.speed.rotation),
            Field::SpeedScale => std::slice::from_ref(&a.speed.scale),
            Field::SpeedColor => std::slice::from_ref(&a.speed.color),
        }
    }

    fn lanes_mut(&mut self, field: Field) -> &mut [f32] {
        let a = &mut self.actor;
        match field {
            Field::Output => &mut self.output,
            Field::Position => &mut a.position,
            Field::Rotation => std::slice::from_mut(&mut a.rotation),
            Field::RotationTarget => std::slice::from_mut(&mut a.rotation_target),
            Field::Scale => &mut a.scale,
            Field::ScaleTarget => &mut a.scale_target,
            Field::Color => &mut a.color,
            Field::ColorTarget => &mut a.color_target,
            Field::SpeedPosition => std::slice::from_mut(&mut a.speed.position),
            Field::SpeedRotation => std::slice::from_mut(&mut a.speed.rotation),
            Field::SpeedScale => std::slice::from_mut(&mut a.speed.scale),
            Field::SpeedColor => std::slice::from_mut(&mut a.speed.color),
        }
    }

    /// Read `dim` lanes starting at `loc`. Lanes past the end of the field read as 0.
    pub fn read(&self, loc: Location, dim: u8) -> Vector {
        let lanes = self.lanes(loc.field);
        let mut out = [0.0; 4];
        for (i, slot) in out.iter_mut().enumerate().take(dim as usize) {
            *slot = lanes.get(loc.lane as usize + i).copied().unwrap_or(0.0);
        }
        Vector::new(out, dim)
    }

    /// Write the active lanes of `value` starting at `loc`, clamped to the field.
    pub fn write(&mut self, loc: Location, value: Vector) {
        let lanes = self.lanes_mut(loc.field);
        let start = (loc.lane as usize).min(lanes.len());
        for (slot, v) in lanes[start..].iter_mut().zip(value.components()) {
            *slot = *v;
        }
        tracing::debug!(field = ?loc.field, lane = loc.lane, %value, "world write");
    }

    // ── Frame update ──────────────────────────────────────────────────

    /// Advance the animation by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        let a = &mut self.actor;

        let angle = -a.rotation;
        let heading = [-angle.sin(), angle.cos()];

        let previous = a.move_distance;
        a.move_distance = lerp(previous, 0.0, ease(a.speed.position, dt));
        let travelled = previous - a.move_distance;
        a.position[0] += heading[0] * travelled;
        a.position[1] += heading[1] * travelled;

        a.rotation = lerp(a.rotation, a.rotation_target, ease(a.speed.rotation, dt));
        lerp_lanes(&mut a.scale, &a.scale_target, ease(a.speed.scale, dt));
        lerp_lanes(&mut a.color, &a.color_target, ease(a.speed.color, dt));

        if self.follow {
            let t = ease(self.follow_rate, dt);
            let target = self.actor.position;
            lerp_lanes(&mut self.camera, &target, t);
        }

        if self.draw && self.actor.move_distance > self.stroke_threshold {
            let a = &self.actor;
            self.strokes.push(Stroke {
                position: a.position,
                radius: a.scale,
                color: a.color,
            });
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(&WorldConfig::default())
    }
}

/// Frame-rate independent easing factor for a per-second `rate`.
fn ease(rate: f32, dt: f32) -> f32 {
    1.0 - (1.0 - rate).powf(dt)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

fn lerp_lanes(current: &mut [f32], target: &[f32], t: f32) {
    for (c, g) in current.iter_mut().zip(target) {
        *c = lerp(*c, *g, t);
    }
}
