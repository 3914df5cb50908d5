pub mod commands;
pub mod palette;
pub mod target;
pub mod theme;
pub mod types;

pub use commands::{RenderCommand, hit_test};
pub use palette::{Swatch, UnknownSwatch};
pub use target::{GlobalAction, HitTarget, UnknownAction};
pub use theme::ThemeToken;
pub use types::{Color, Point, Rect, Viewport};
