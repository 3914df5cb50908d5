use lamp_grid_protocol::{RenderCommand, ThemeToken};

use crate::intensity::VisualIntensity;
use crate::model::LampCollection;
use crate::views::layout::SceneLayout;

/// Render the floor glow layer: the grid backdrop plus one soft light spot
/// per lamp, sized and faded by the lamp's intensity.
pub fn render_floor(lamps: &LampCollection, layout: &SceneLayout) -> Vec<RenderCommand> {
    let mut commands = Vec::with_capacity(lamps.len() + 3);
    commands.push(RenderCommand::BeginGroup {
        id: "floor".into(),
        label: Some("Floor glow".into()),
    });

    commands.push(RenderCommand::DrawRect {
        rect: layout.grid,
        color: ThemeToken::FloorBase,
        border_color: None,
        label: None,
        target: None,
    });

    for lamp in lamps {
        let v = VisualIntensity::of(lamp);
        let radius = v.spot_size / 2.0 * layout.lamp_pixel_scale(lamp);
        // Invisible spots only cost the renderer time.
        if v.spot_opacity <= 0.0 || radius < 0.5 {
            continue;
        }
        commands.push(RenderCommand::DrawGlow {
            center: layout.lamp_center(lamp),
            radius,
            color: ThemeToken::Lamp(lamp.color),
            opacity: v.spot_opacity,
        });
    }

    commands.push(RenderCommand::EndGroup);
    commands
}
