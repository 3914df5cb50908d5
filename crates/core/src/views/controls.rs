use lamp_grid_protocol::{HitTarget, Point, RenderCommand, ThemeToken};

use crate::model::LampCollection;
use crate::views::layout::SceneLayout;

pub const TITLE: &str = "lamp-grid";

/// Render the toolbar: title plus one button per global action.
pub fn render_toolbar(layout: &SceneLayout) -> Vec<RenderCommand> {
    let m = layout.metrics;
    let buttons = layout.buttons();
    let mut commands = Vec::with_capacity(buttons.len() + 4);
    commands.push(RenderCommand::BeginGroup {
        id: "toolbar".into(),
        label: Some("Toolbar".into()),
    });

    commands.push(RenderCommand::DrawRect {
        rect: layout.toolbar,
        color: ThemeToken::ToolbarBackground,
        border_color: None,
        label: None,
        target: None,
    });
    commands.push(RenderCommand::DrawText {
        position: Point::new(
            layout.toolbar.x + m.padding,
            layout.toolbar.y + layout.toolbar.h / 2.0,
        ),
        text: TITLE.into(),
        color: ThemeToken::ToolbarText,
        font_size: m.font_size,
    });

    for (action, rect) in buttons {
        commands.push(RenderCommand::DrawRect {
            rect,
            color: ThemeToken::ButtonBackground,
            border_color: Some(ThemeToken::ButtonBorder),
            label: Some(action.label().into()),
            target: Some(HitTarget::Global(action)),
        });
    }

    commands.push(RenderCommand::EndGroup);
    commands
}

/// Render the color picker for the selected lamp.
///
/// The swatch matching the lamp's current color is outlined.
pub fn render_picker(
    lamps: &LampCollection,
    layout: &SceneLayout,
    selected: u32,
) -> Vec<RenderCommand> {
    let m = layout.metrics;
    let picker = layout.picker();
    let current = lamps.get(selected).map(|l| l.color);

    let mut commands = Vec::with_capacity(picker.swatches.len() + 5);
    commands.push(RenderCommand::BeginGroup {
        id: "picker".into(),
        label: Some("Color picker".into()),
    });
    commands.push(RenderCommand::DrawRect {
        rect: picker.panel,
        color: ThemeToken::PickerBackground,
        border_color: Some(ThemeToken::PickerBorder),
        label: None,
        target: None,
    });
    commands.push(RenderCommand::DrawText {
        position: picker.title,
        text: format!("Lamp {selected}"),
        color: ThemeToken::TextPrimary,
        font_size: m.font_size,
    });

    for (swatch, rect) in picker.swatches {
        commands.push(RenderCommand::DrawRect {
            rect,
            color: ThemeToken::Lamp(swatch),
            border_color: if current == Some(swatch) {
                Some(ThemeToken::SelectionHighlight)
            } else {
                Some(ThemeToken::Border)
            },
            label: None,
            target: Some(HitTarget::Swatch(swatch)),
        });
    }

    commands.push(RenderCommand::DrawRect {
        rect: picker.close,
        color: ThemeToken::ButtonBackground,
        border_color: Some(ThemeToken::ButtonBorder),
        label: Some("×".into()),
        target: Some(HitTarget::ClosePicker),
    });

    commands.push(RenderCommand::EndGroup);
    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::layout::Metrics;
    use lamp_grid_protocol::{Swatch, Viewport, hit_test};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn layout() -> SceneLayout {
        SceneLayout::new(&Viewport::new(800.0, 600.0), Metrics::PIXELS)
    }

    #[test]
    fn toolbar_buttons_hit_their_action() {
        let layout = layout();
        let cmds = render_toolbar(&layout);
        for (action, rect) in layout.buttons() {
            assert_eq!(
                hit_test(&cmds, rect.center()),
                Some(HitTarget::Global(action))
            );
        }
        let labels: Vec<_> = cmds
            .iter()
            .filter_map(|c| match c {
                RenderCommand::DrawRect {
                    label: Some(l),
                    target: Some(_),
                    ..
                } => Some(l.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["Brighten", "Dim", "Randomize", "Reset"]);
    }

    #[test]
    fn picker_swatches_and_close() {
        let layout = layout();
        let lamps = LampCollection::generate(&mut StdRng::seed_from_u64(1));
        let cmds = render_picker(&lamps, &layout, 4);
        let picker = layout.picker();
        for (swatch, rect) in &picker.swatches {
            assert_eq!(
                hit_test(&cmds, rect.center()),
                Some(HitTarget::Swatch(*swatch))
            );
        }
        assert_eq!(
            hit_test(&cmds, picker.close.center()),
            Some(HitTarget::ClosePicker)
        );
    }

    #[test]
    fn current_color_is_outlined() {
        let layout = layout();
        let lamps = LampCollection::generate(&mut StdRng::seed_from_u64(1));
        let current = lamps.get(4).map(|l| l.color).unwrap_or(Swatch::Rose);
        let cmds = render_picker(&lamps, &layout, 4);
        let highlighted: Vec<_> = cmds
            .iter()
            .filter_map(|c| match c {
                RenderCommand::DrawRect {
                    target: Some(HitTarget::Swatch(s)),
                    border_color: Some(ThemeToken::SelectionHighlight),
                    ..
                } => Some(*s),
                _ => None,
            })
            .collect();
        assert_eq!(highlighted, vec![current]);
    }
}
