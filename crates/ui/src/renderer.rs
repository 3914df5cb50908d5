use egui::{Align2, Color32, CornerRadius, FontId, Pos2, Rect, Stroke, StrokeKind};
use lamp_grid_protocol::{HitTarget, RenderCommand, ThemeToken};

use crate::theme::{self, ThemeMode};

/// Concentric fills used to approximate a radial glow.
const GLOW_RINGS: usize = 12;

/// Clickable area of a drawn shape, in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitShape {
    Rect(Rect),
    Circle { center: Pos2, radius: f32 },
}

impl HitShape {
    fn contains(&self, p: Pos2) -> bool {
        match self {
            HitShape::Rect(rect) => rect.contains(p),
            HitShape::Circle { center, radius } => center.distance(p) <= *radius,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRegion {
    pub shape: HitShape,
    pub target: HitTarget,
}

/// Result of rendering a command list: includes hit regions for interaction.
#[derive(Debug, Default)]
pub struct RenderResult {
    pub hit_regions: Vec<HitRegion>,
}

impl RenderResult {
    /// Topmost target under `p`; later regions were painted on top.
    pub fn target_at(&self, p: Pos2) -> Option<HitTarget> {
        self.hit_regions
            .iter()
            .rev()
            .find(|r| r.shape.contains(p))
            .map(|r| r.target)
    }
}

fn scaled(c: Color32, factor: f64) -> Color32 {
    let f = factor.clamp(0.0, 1.0) as f32;
    let ch = |v: u8| (f32::from(v) * f).round() as u8;
    Color32::from_rgb(ch(c.r()), ch(c.g()), ch(c.b()))
}

fn with_alpha(c: Color32, alpha: f64) -> Color32 {
    let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(c.r(), c.g(), c.b(), a)
}

/// Render a list of `RenderCommand` into an egui `Painter`.
///
/// `offset` is the top-left pixel position of the rendering area.
/// Returns hit regions for click/hover interaction.
pub fn render_commands(
    painter: &egui::Painter,
    commands: &[RenderCommand],
    offset: Pos2,
    mode: ThemeMode,
) -> RenderResult {
    let mut hit_regions: Vec<HitRegion> = Vec::new();
    let at = |x: f64, y: f64| Pos2::new(x as f32 + offset.x, y as f32 + offset.y);

    for cmd in commands {
        match cmd {
            RenderCommand::DrawRect {
                rect,
                color,
                border_color,
                label,
                target,
            } => {
                let size = egui::vec2(rect.w as f32, rect.h as f32);
                let egui_rect = Rect::from_min_size(at(rect.x, rect.y), size);
                if egui_rect.width() < 0.5 || egui_rect.height() < 0.5 {
                    continue;
                }

                painter.rect_filled(egui_rect, CornerRadius::same(4), theme::resolve(*color, mode));
                if let Some(bc) = border_color {
                    painter.rect_stroke(
                        egui_rect,
                        CornerRadius::same(4),
                        Stroke::new(2.0, theme::resolve(*bc, mode)),
                        StrokeKind::Outside,
                    );
                }

                if let Some(label) = label.as_deref().filter(|l| !l.is_empty()) {
                    let font_size = (egui_rect.height() - 8.0).clamp(8.0, theme::FONT_BODY + 2.0);
                    painter.text(
                        egui_rect.center(),
                        Align2::CENTER_CENTER,
                        label,
                        FontId::proportional(font_size),
                        theme::resolve(ThemeToken::TextPrimary, mode),
                    );
                }

                if let Some(target) = target {
                    hit_regions.push(HitRegion {
                        shape: HitShape::Rect(egui_rect),
                        target: *target,
                    });
                }
            }

            RenderCommand::DrawCircle {
                center,
                radius,
                color,
                intensity,
                border_color,
                target,
            } => {
                let c = at(center.x, center.y);
                let r = *radius as f32;
                painter.circle_filled(c, r, scaled(theme::resolve(*color, mode), *intensity));
                if let Some(bc) = border_color {
                    painter.circle_stroke(c, r + 1.0, Stroke::new(2.0, theme::resolve(*bc, mode)));
                }
                if let Some(target) = target {
                    hit_regions.push(HitRegion {
                        shape: HitShape::Circle { center: c, radius: r },
                        target: *target,
                    });
                }
            }

            RenderCommand::DrawGlow {
                center,
                radius,
                color,
                opacity,
            } => {
                let c = at(center.x, center.y);
                if !painter.clip_rect().expand(*radius as f32).contains(c) {
                    continue;
                }
                let tint = theme::resolve(*color, mode);
                // Stacked translucent discs: the center accumulates the full
                // opacity and the rim only one layer.
                let layer = opacity / GLOW_RINGS as f64;
                for i in 0..GLOW_RINGS {
                    let r = *radius as f32 * (1.0 - i as f32 / GLOW_RINGS as f32);
                    painter.circle_filled(c, r, with_alpha(tint, layer));
                }
            }

            RenderCommand::DrawText {
                position,
                text,
                color,
                font_size,
            } => {
                let size = *font_size as f32;
                if size < 1.0 {
                    continue;
                }
                painter.text(
                    at(position.x, position.y),
                    Align2::LEFT_CENTER,
                    text,
                    FontId::proportional(size),
                    theme::resolve(*color, mode),
                );
            }

            RenderCommand::BeginGroup { .. } | RenderCommand::EndGroup => {
                // Groups are semantic, no visual effect in egui
            }
        }
    }

    RenderResult { hit_regions }
}
