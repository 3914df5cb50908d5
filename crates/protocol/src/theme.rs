use serde::{Deserialize, Serialize};

use crate::palette::Swatch;

/// Semantic color tokens resolved by the renderer's active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    Background,
    FloorBase,
    Border,

    TextPrimary,

    SelectionHighlight,

    // Toolbar
    ToolbarBackground,
    ToolbarText,
    ButtonBackground,
    ButtonBorder,

    // Color picker
    PickerBackground,
    PickerBorder,

    /// A palette color. Renderers use the swatch's own RGB in every theme.
    Lamp(Swatch),
}
