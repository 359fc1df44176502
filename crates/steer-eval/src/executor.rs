//! Execute pass: interprets a resolved root as a command.
//!
//! Only the top-level node is executed. A literal-like root commits to the
//! output register, a `Statement` dispatches on its left-hand side, and
//! everything else is rejected with a diagnostic. Returns `true` only when
//! the world was changed (or exit was requested).

use steer_parser::Session;
use steer_types::ast::{Expr, ExprId, ExprKind, Field, Location, Variable};
use steer_types::names::{ActionKind, ConstantKind, VariableKind};
use steer_types::{Arena, Diagnostics, ErrorCode, Span, Vector};

use crate::world::{Panel, World};

/// Execute `root`, a node resolved on this session's arena.
pub fn execute(session: &mut Session, world: &mut World, root: ExprId) -> bool {
    let (arena, diagnostics) = session.arena_and_diagnostics();
    let ok = Executor::new(world, arena, diagnostics).execute(root);
    tracing::debug!(ok, diagnostics = session.diagnostics().len(), "execute pass");
    ok
}

pub struct Executor<'a> {
    world: &'a mut World,
    arena: &'a Arena,
    diagnostics: &'a mut Diagnostics,
}

impl<'a> Executor<'a> {
    pub fn new(world: &'a mut World, arena: &'a Arena, diagnostics: &'a mut Diagnostics) -> Self {
        Self {
            world,
            arena,
            diagnostics,
        }
    }

    pub fn execute(&mut self, id: ExprId) -> bool {
        let arena = self.arena;
        let node = arena.node(id);
        match &node.kind {
            ExprKind::Null => false,
            ExprKind::Number(value) => self.commit_output(*value),
            ExprKind::Variable(var) if var.value.is_void() => {
                self.fail(ErrorCode::INVALID_VARIABLE, "Invalid variable", node.span)
            }
            ExprKind::Variable(var) => self.commit_output(var.value),
            ExprKind::Action(action) => self.bare_action(*action, node.span),
            ExprKind::Statement { lhs, rhs } => {
                let (lhs, rhs) = (arena.node(*lhs), arena.node(*rhs));
                match &lhs.kind {
                    ExprKind::Action(action) => self.action(*action, lhs, rhs, node.span),
                    ExprKind::Variable(var) => self.assign(var, lhs.span, rhs, node.span),
                    _ => self.fail(
                        ErrorCode::INVALID_BINDING,
                        "Expected action or variable",
                        lhs.span,
                    ),
                }
            }
            _ => self.fail(
                ErrorCode::NOT_EXECUTABLE,
                "Expected literal, variable or statement",
                node.span,
            ),
        }
    }

    // ── Helpers ───────────────────────────────────────────────────────

    fn fail(&mut self, code: ErrorCode, message: &str, span: Span) -> bool {
        tracing::trace!(%code, offset = span.offset, message, "execute error");
        self.diagnostics.report(code, message, span);
        false
    }

    fn commit_output(&mut self, value: Vector) -> bool {
        self.world.set_output(value);
        tracing::debug!(%value, "output committed");
        true
    }

    /// The vector the right-hand side stands for, or the r-value error.
    fn argument(&mut self, rhs: &Expr) -> Option<Vector> {
        let value = rhs.literal_value();
        if value.is_none() {
            self.fail(
                ErrorCode::INVALID_ARGUMENT,
                "Expected r-value resolving to vector",
                rhs.span,
            );
        }
        value
    }

    // ── Actions ───────────────────────────────────────────────────────

    fn bare_action(&mut self, action: ActionKind, span: Span) -> bool {
        let message = match action {
            ActionKind::Exit => {
                self.world.exit_requested = true;
                tracing::debug!("exit requested");
                return true;
            }
            ActionKind::Move | ActionKind::Rotate => "Expected vector1 argument",
            ActionKind::Enlarge => "Expected vector1 or vector 2 argument",
            ActionKind::Change => "Expected vector1, vector2, vector3 or vector4 argument",
            ActionKind::Follow | ActionKind::Disp => "Expected 'on' or 'off' argument",
            ActionKind::Draw => {
                return self.fail(
                    ErrorCode::NOT_EXECUTABLE,
                    "Expected literal, variable or statement",
                    span,
                )
            }
        };
        self.fail(ErrorCode::INVALID_ARGUMENT, message, span)
    }

    fn action(&mut self, action: ActionKind, lhs: &Expr, rhs: &Expr, span: Span) -> bool {
        match action {
            ActionKind::Exit => self.fail(
                ErrorCode::INVALID_ARGUMENT,
                "Action takes no arguments",
                lhs.span,
            ),
            ActionKind::Follow | ActionKind::Draw => {
                let on = match rhs.kind {
                    ExprKind::Constant {
                        kind: ConstantKind::On,
                        ..
                    } => true,
                    ExprKind::Constant {
                        kind: ConstantKind::Off,
                        ..
                    } => false,
                    _ => {
                        return self.fail(
                            ErrorCode::INVALID_ARGUMENT,
                            "Expected 'on' or 'off' argument",
                            rhs.span,
                        )
                    }
                };
                if action == ActionKind::Follow {
                    self.world.follow = on;
                } else {
                    self.world.draw = on;
                }
                tracing::debug!(%action, on, "flag set");
                true
            }
            ActionKind::Disp => {
                let Some(panel) = panel_for(rhs) else {
                    return self.fail(ErrorCode::INVALID_ARGUMENT, "Invalid option", rhs.span);
                };
                let visible = self.world.display.toggle(panel);
                tracing::debug!(?panel, visible, "panel toggled");
                true
            }
            ActionKind::Move | ActionKind::Rotate | ActionKind::Enlarge | ActionKind::Change => {
                let Some(value) = self.argument(rhs) else {
                    return false;
                };
                self.transform(action, value, span)
            }
        }
    }

    fn transform(&mut self, action: ActionKind, value: Vector, span: Span) -> bool {
        match action {
            ActionKind::Move if value.dim() == 1 => self.world.actor.move_distance = value.x(),
            ActionKind::Rotate if value.dim() == 1 => {
                self.world.actor.rotation_target += value.x().to_radians();
            }
            ActionKind::Move | ActionKind::Rotate => {
                return self.fail(ErrorCode::INVALID_ARGUMENT, "Expected vector1 argument", span)
            }
            ActionKind::Enlarge if value.dim() <= 2 => {
                self.world.write(Location::new(Field::ScaleTarget), value);
            }
            ActionKind::Enlarge => {
                return self.fail(
                    ErrorCode::INVALID_ARGUMENT,
                    "Expected vector1 or vector2 argument",
                    span,
                )
            }
            _ => self.world.write(Location::new(Field::ColorTarget), value),
        }
        tracing::debug!(%action, %value, "action executed");
        true
    }

    // ── Assignment ────────────────────────────────────────────────────

    fn assign(&mut self, var: &Variable, lhs_span: Span, rhs: &Expr, span: Span) -> bool {
        // Bare `output` takes any vector along with its dimension.
        if var.kind == VariableKind::Output {
            return match self.argument(rhs) {
                Some(value) => self.commit_output(value),
                None => false,
            };
        }

        let Some(primary) = var.primary.filter(|_| !var.value.is_void()) else {
            return self.fail(ErrorCode::INVALID_VARIABLE, "Invalid variable", lhs_span);
        };
        let Some(value) = self.argument(rhs) else {
            return false;
        };
        if value.dim() != var.value.dim() {
            return self.fail(ErrorCode::INCOMPATIBLE_TYPES, "Incompatible types", span);
        }

        self.world.write(primary, value);
        match var.target {
            Some(target) => self.world.write(target, value),
            None if primary.field == Field::Position => self.world.actor.move_distance = 0.0,
            None => {}
        }
        tracing::debug!(variable = %var.kind, %value, "variable assigned");
        true
    }
}

/// The HUD panel named by a `disp` argument.
fn panel_for(rhs: &Expr) -> Option<Panel> {
    match &rhs.kind {
        ExprKind::Constant { kind, .. } => match kind {
            ConstantKind::Help => Some(Panel::Help),
            ConstantKind::Expr => Some(Panel::Expr),
            ConstantKind::On | ConstantKind::Off => None,
        },
        ExprKind::Variable(var) => match var.kind {
            VariableKind::Position => Some(Panel::Position),
            VariableKind::Rotation => Some(Panel::Rotation),
            VariableKind::Scale => Some(Panel::Scale),
            VariableKind::Color => Some(Panel::Color),
            VariableKind::Speed => Some(Panel::Speed),
            VariableKind::Output => Some(Panel::Output),
            _ => None,
        },
        _ => None,
    }
}
