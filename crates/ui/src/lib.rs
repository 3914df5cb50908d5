//! Desktop front end for lamp-grid, drawn with egui.

mod app;
mod renderer;
mod theme;

pub use app::LampApp;
pub use theme::ThemeMode;
