//! Heads-up display text.
//!
//! Lines are produced top to bottom; each group only appears when its
//! panel is visible. Rendering them is up to the host.

use steer_eval::{Panel, World};
use steer_types::ast::{ExprId, ExprKind};
use steer_types::names::{ActionKind, ConstantKind, VariableKind};
use steer_types::{Arena, Vector};

/// `label: <vector>`, e.g. `Output: v2 1.0000 2.0000`.
pub fn format_vector(label: &str, value: Vector) -> String {
    format!("{label}: {value}")
}

/// Every visible HUD line. `expr` is dumped under the `expr` panel.
pub fn hud_lines(world: &World, arena: &Arena, expr: ExprId) -> Vec<String> {
    let mut lines = Vec::new();
    let visible = |panel| world.display.is_visible(panel);
    let actor = &world.actor;

    if visible(Panel::Help) {
        lines.push(name_list("Action", ActionKind::ALL.iter().map(|k| k.name())));
        lines.push(name_list("Variables", VariableKind::ALL.iter().map(|k| k.name())));
        lines.push(name_list("Constants", ConstantKind::ALL.iter().map(|k| k.name())));
    }
    if visible(Panel::Position) {
        let [x, y] = actor.position;
        lines.push(format!("Position: {x:.4}, {y:.4}"));
    }
    if visible(Panel::Rotation) {
        lines.push(format!("Rotation: {:.4} degs", actor.rotation.to_degrees()));
    }
    if visible(Panel::Scale) {
        let [x, y] = actor.scale;
        lines.push(format!("Scale: {x:.4}, {y:.4}"));
    }
    if visible(Panel::Color) {
        let [r, g, b, a] = actor.color;
        lines.push(format!("Color: {r:.4}, {g:.4}, {b:.4}, {a:.4}"));
    }
    if visible(Panel::Speed) {
        let s = &actor.speed;
        lines.push(format!(
            "Speed: Position({:.4}), Rotation({:.4}), Scale({:.4}), Color({:.4})",
            s.position, s.rotation, s.scale, s.color
        ));
    }
    if visible(Panel::Output) {
        lines.push(format_vector("Output", world.output()));
        lines.push(format!("Stroke Count: {}", world.strokes.len()));
        lines.push(format!(
            "Follow: {}, Draw: {}",
            on_off(world.follow),
            on_off(world.draw)
        ));
    }
    if visible(Panel::Expr) {
        lines.push("Expr:".to_string());
        dump_expr(arena, expr, 1, &mut lines);
    }
    lines
}

/// Indented dump of the tree rooted at `id`, one node per line.
pub fn expr_tree(arena: &Arena, id: ExprId) -> Vec<String> {
    let mut lines = Vec::new();
    dump_expr(arena, id, 0, &mut lines);
    lines
}

fn dump_expr(arena: &Arena, id: ExprId, depth: usize, lines: &mut Vec<String>) {
    let indent = "  ".repeat(depth);
    let node = arena.node(id);
    let (line, children) = match &node.kind {
        ExprKind::Null => ("Expr None".to_string(), vec![]),
        ExprKind::Number(value) => (format_vector("Expr Number", *value), vec![]),
        ExprKind::Identifier(name) => (format!("Expr Identifier: {name}"), vec![]),
        ExprKind::Unary { op, child } => (format!("Expr Unary: {}", op.symbol()), vec![Some(*child)]),
        ExprKind::Binary { op, left, right } => {
            let symbol = op.map_or("null", |op| op.symbol());
            (format!("Expr Binary: {symbol}"), vec![Some(*left), *right])
        }
        ExprKind::Variable(var) => (format!("Expr Variable: {}", var.kind), vec![]),
        ExprKind::Constant { kind, .. } => (format!("Expr Constant: {kind}"), vec![]),
        ExprKind::Action(action) => (format!("Expr Action: {action}"), vec![]),
        ExprKind::Statement { lhs, rhs } => {
            ("Expr Statement".to_string(), vec![Some(*lhs), Some(*rhs)])
        }
    };
    lines.push(format!("{indent}{line}"));
    for child in children {
        match child {
            Some(child) => dump_expr(arena, child, depth + 1, lines),
            None => lines.push(format!("{indent}  Expr None")),
        }
    }
}

fn name_list<'a>(title: &str, names: impl Iterator<Item = &'a str>) -> String {
    format!("{title}: {}", names.collect::<Vec<_>>().join(", "))
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}
