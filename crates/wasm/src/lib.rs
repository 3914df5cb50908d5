//! Browser bridge: a `LampGrid` handle that JavaScript drives.
//!
//! The page owns one handle, forwards clicks and button presses to it,
//! draws the JSON render commands it returns, and calls `poll()` from a
//! timer so debounced saves reach `localStorage`.

mod web;

use lamp_grid_core::views::{Metrics, Scene, render_scene};
use lamp_grid_core::{LampGridConfig, LampStore, svg};
use lamp_grid_protocol::{GlobalAction, Point, Swatch, Viewport, hit_test};
use wasm_bindgen::prelude::*;

pub use web::{LocalStorage, PerformanceClock};

#[wasm_bindgen]
pub struct LampGrid {
    store: LampStore,
}

#[wasm_bindgen]
impl LampGrid {
    /// Open the grid saved under the default key, or generate one.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<u64>, debounce_ms: Option<u32>) -> LampGrid {
        web::init_console();
        let mut config = LampGridConfig {
            // The OS entropy source is not reachable from every page.
            seed: Some(seed.unwrap_or_else(web::random_seed)),
            ..LampGridConfig::default()
        };
        if let Some(ms) = debounce_ms {
            config.debounce_ms = u64::from(ms);
        }
        let store = LampStore::initialize(
            &config,
            web::storage(),
            Box::new(PerformanceClock::new()),
        );
        LampGrid { store }
    }

    pub fn toggle_lamp(&mut self, id: u32) -> bool {
        self.store.toggle_lamp(id)
    }

    /// Paint the selected lamp; `color` is a swatch name such as `"mint"`.
    pub fn set_selected_color(&mut self, color: &str) -> Result<bool, JsError> {
        let swatch: Swatch = color.parse()?;
        Ok(self.store.set_selected_color(swatch))
    }

    /// `action` is one of `brighten`, `dim`, `randomize`, `reset`.
    pub fn apply_global(&mut self, action: &str) -> Result<(), JsError> {
        let action: GlobalAction = action.parse()?;
        self.store.apply_global(action);
        Ok(())
    }

    pub fn hide_picker(&mut self) -> bool {
        self.store.hide_picker()
    }

    /// Hit-test a click at `(x, y)` on a `width` x `height` canvas and run
    /// whatever it lands on.
    pub fn click(&mut self, x: f64, y: f64, width: f64, height: f64) -> bool {
        let commands = render_scene(
            &Scene::of(&self.store),
            &Viewport::new(width, height),
            Metrics::PIXELS,
        );
        match hit_test(&commands, Point::new(x, y)) {
            Some(target) => self.store.dispatch(target),
            None => false,
        }
    }

    /// Render commands for the whole scene as JSON.
    pub fn render(&self, width: f64, height: f64, dpr: f64) -> Result<String, JsError> {
        let viewport = Viewport {
            dpr,
            ..Viewport::new(width, height)
        };
        let commands = render_scene(&Scene::of(&self.store), &viewport, Metrics::PIXELS);
        serde_json::to_string(&commands).map_err(|e| JsError::new(&e.to_string()))
    }

    /// The scene as a standalone SVG document.
    pub fn svg(&self, width: f64, height: f64, dark: bool) -> String {
        let commands = render_scene(
            &Scene::of(&self.store),
            &Viewport::new(width, height),
            Metrics::PIXELS,
        );
        svg::render_svg(&commands, width, height, dark)
    }

    /// The lamp collection in its persisted JSON form.
    pub fn lamps_json(&self) -> Result<String, JsError> {
        self.store
            .lamps()
            .to_json()
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Bumped on every visible change; redraw when it moves.
    #[wasm_bindgen(getter)]
    pub fn revision(&self) -> f64 {
        self.store.revision() as f64
    }

    #[wasm_bindgen(getter)]
    pub fn selected(&self) -> Option<u32> {
        self.store.selected()
    }

    #[wasm_bindgen(getter)]
    pub fn picker_visible(&self) -> bool {
        self.store.picker_visible()
    }

    pub fn poll(&mut self) -> bool {
        self.store.poll()
    }

    pub fn flush(&mut self) -> bool {
        self.store.flush()
    }

    /// Milliseconds until the pending save, for scheduling the next poll.
    pub fn pending_persist_ms(&self) -> Option<u32> {
        self.store
            .pending_persist_ms()
            .map(|ms| u32::try_from(ms).unwrap_or(u32::MAX))
    }
}
