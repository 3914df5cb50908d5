//! View transforms: lamp state in, `RenderCommand`s out.
//!
//! ```text
//!   LampStore ──▶ Scene ──▶ toolbar ─┐
//!                           floor   ─┼─▶ Vec<RenderCommand> ──▶ Renderer
//!                           grid    ─┤                          (terminal,
//!                           picker  ─┘                           egui, DOM, SVG)
//! ```

pub mod controls;
pub mod floor;
pub mod grid;
pub mod layout;

use lamp_grid_protocol::{RenderCommand, ThemeToken, Viewport};

use crate::model::LampCollection;
use crate::store::LampStore;

pub use layout::{Metrics, PickerLayout, SceneLayout};

/// The slice of store state the views need.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub lamps: &'a LampCollection,
    pub selected: Option<u32>,
    pub picker_visible: bool,
}

impl<'a> Scene<'a> {
    pub fn of(store: &'a LampStore) -> Self {
        Self {
            lamps: store.lamps(),
            selected: store.selected(),
            picker_visible: store.picker_visible(),
        }
    }
}

/// Render the whole screen in paint order: background, toolbar, floor
/// glow, lamps, then the color picker when it is open.
pub fn render_scene(
    scene: &Scene<'_>,
    viewport: &Viewport,
    metrics: Metrics,
) -> Vec<RenderCommand> {
    let layout = SceneLayout::new(viewport, metrics);
    let mut commands = Vec::with_capacity(scene.lamps.len() * 2 + 32);

    commands.push(RenderCommand::DrawRect {
        rect: viewport.bounds(),
        color: ThemeToken::Background,
        border_color: None,
        label: None,
        target: None,
    });
    commands.extend(controls::render_toolbar(&layout));
    commands.extend(floor::render_floor(scene.lamps, &layout));
    commands.extend(grid::render_grid(scene.lamps, &layout, scene.selected));

    if scene.picker_visible
        && let Some(id) = scene.selected
    {
        commands.extend(controls::render_picker(scene.lamps, &layout, id));
    }
    commands
}
