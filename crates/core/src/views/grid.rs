use lamp_grid_protocol::{HitTarget, RenderCommand, ThemeToken};

use crate::model::LampCollection;
use crate::views::layout::SceneLayout;

/// Fill level for a lamp that is switched off, relative to its brightness.
const UNLIT_FILL: f64 = 0.55;

/// Render the lamps themselves, one clickable circle per lamp.
///
/// Lit lamps are filled at their brightness; unlit lamps are dimmer and
/// outlined. The selected lamp gets a highlight ring.
pub fn render_grid(
    lamps: &LampCollection,
    layout: &SceneLayout,
    selected: Option<u32>,
) -> Vec<RenderCommand> {
    let mut commands = Vec::with_capacity(lamps.len() + 2);
    commands.push(RenderCommand::BeginGroup {
        id: "lamps".into(),
        label: Some("Lamps".into()),
    });

    for lamp in lamps {
        let radius = layout.lamp_radius(lamp);
        if radius <= 0.0 {
            continue;
        }

        let intensity = if lamp.active {
            lamp.brightness
        } else {
            lamp.brightness * UNLIT_FILL
        };
        let border_color = if selected == Some(lamp.id) {
            Some(ThemeToken::SelectionHighlight)
        } else if lamp.active {
            None
        } else {
            Some(ThemeToken::Border)
        };

        commands.push(RenderCommand::DrawCircle {
            center: layout.lamp_center(lamp),
            radius,
            color: ThemeToken::Lamp(lamp.color),
            intensity,
            border_color,
            target: Some(HitTarget::Lamp(lamp.id)),
        });
    }

    commands.push(RenderCommand::EndGroup);
    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LAMP_COUNT, Lamp};
    use crate::views::layout::Metrics;
    use lamp_grid_protocol::{Point, Viewport, hit_test};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn lamps() -> LampCollection {
        LampCollection::generate(&mut StdRng::seed_from_u64(5))
    }

    #[test]
    fn every_lamp_is_clickable() {
        let layout = SceneLayout::new(&Viewport::new(800.0, 600.0), Metrics::PIXELS);
        let lamps = lamps();
        let cmds = render_grid(&lamps, &layout, None);
        for lamp in &lamps {
            let p = layout.lamp_center(lamp);
            assert_eq!(hit_test(&cmds, p), Some(HitTarget::Lamp(lamp.id)));
        }
        let targets = cmds.iter().filter(|c| c.target().is_some()).count();
        assert_eq!(targets, LAMP_COUNT);
    }

    #[test]
    fn gaps_between_lamps_are_not_clickable() {
        let layout = SceneLayout::new(&Viewport::new(800.0, 600.0), Metrics::PIXELS);
        let cmds = render_grid(&lamps(), &layout, None);
        let (cw, ch) = layout.cell_size();
        // Grid corner, between four cells.
        let p = Point::new(layout.grid.x + cw, layout.grid.y + ch);
        assert_eq!(hit_test(&cmds, p), None);
    }

    #[test]
    fn selection_and_active_state_styling() {
        let layout = SceneLayout::new(&Viewport::new(800.0, 600.0), Metrics::PIXELS);
        let lamps = lamps().map(|l| Lamp {
            active: l.id == 1,
            brightness: 0.8,
            ..l.clone()
        });
        let cmds = render_grid(&lamps, &layout, Some(2));
        let circle = |id: u32| {
            cmds.iter().find_map(|c| match c {
                RenderCommand::DrawCircle {
                    target: Some(HitTarget::Lamp(t)),
                    intensity,
                    border_color,
                    ..
                } if *t == id => Some((*intensity, *border_color)),
                _ => None,
            })
        };
        assert_eq!(circle(1), Some((0.8, None)));
        let (dim, border) = circle(0).unwrap_or((0.0, None));
        assert!((dim - 0.8 * UNLIT_FILL).abs() < 1e-12);
        assert_eq!(border, Some(ThemeToken::Border));
        assert_eq!(
            circle(2).map(|(_, b)| b),
            Some(Some(ThemeToken::SelectionHighlight))
        );
    }
}
