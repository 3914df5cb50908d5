use serde::{Deserialize, Serialize};

use crate::target::HitTarget;
use crate::theme::ThemeToken;
use crate::types::{Point, Rect};

/// A single, stateless render instruction.
///
/// The core emits a `Vec<RenderCommand>` for the whole scene. Renderers
/// consume this list sequentially; each command carries all the data it
/// needs, and later commands paint over earlier ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Draw a filled rectangle, optionally with a centered text label and a
    /// hit target.
    DrawRect {
        rect: Rect,
        color: ThemeToken,
        border_color: Option<ThemeToken>,
        label: Option<String>,
        target: Option<HitTarget>,
    },

    /// Draw a filled circle. `intensity` in [0, 1] scales the fill toward
    /// black (1 = full color).
    DrawCircle {
        center: Point,
        radius: f64,
        color: ThemeToken,
        intensity: f64,
        border_color: Option<ThemeToken>,
        target: Option<HitTarget>,
    },

    /// Draw a soft radial light spot that fades from `opacity` at the
    /// center to transparent at `radius`. Blended over what is below.
    DrawGlow {
        center: Point,
        radius: f64,
        color: ThemeToken,
        opacity: f64,
    },

    /// Draw a text string whose left edge is at `position.x`, vertically
    /// centered on `position.y`.
    DrawText {
        position: Point,
        text: String,
        color: ThemeToken,
        font_size: f64,
    },

    /// Begin a logical group (e.g. the floor layer). Renderers may use this
    /// for batching, layer separation, or accessibility.
    BeginGroup { id: String, label: Option<String> },

    /// End the current group.
    EndGroup,
}

impl RenderCommand {
    pub fn target(&self) -> Option<HitTarget> {
        match self {
            Self::DrawRect { target, .. } | Self::DrawCircle { target, .. } => *target,
            _ => None,
        }
    }

    /// Whether `p` falls inside this command's clickable shape.
    pub fn hit(&self, p: Point) -> bool {
        match self {
            Self::DrawRect {
                rect,
                target: Some(_),
                ..
            } => rect.contains(p),
            Self::DrawCircle {
                center,
                radius,
                target: Some(_),
                ..
            } => center.distance(p) <= *radius,
            _ => false,
        }
    }
}

/// Find the topmost hit target under `p`.
///
/// Commands later in the list paint over earlier ones, so the search runs
/// back to front.
pub fn hit_test(commands: &[RenderCommand], p: Point) -> Option<HitTarget> {
    commands
        .iter()
        .rev()
        .find(|c| c.hit(p))
        .and_then(RenderCommand::target)
}
