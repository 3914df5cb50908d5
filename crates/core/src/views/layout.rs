use lamp_grid_protocol::{GlobalAction, Point, Rect, Swatch, Viewport};

use crate::model::Lamp;

/// Renderer-specific sizes. View transforms work in the renderer's own
/// units, so a terminal and a desktop window share the same layout code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub toolbar_height: f64,
    pub button_width: f64,
    pub gap: f64,
    pub padding: f64,
    pub font_size: f64,
    pub swatch_size: f64,
    /// Renderer units per logical pixel of lamp size.
    pub lamp_scale: f64,
}

impl Metrics {
    /// Logical pixels (desktop, browser, SVG).
    pub const PIXELS: Metrics = Metrics {
        toolbar_height: 44.0,
        button_width: 96.0,
        gap: 8.0,
        padding: 12.0,
        font_size: 13.0,
        swatch_size: 28.0,
        lamp_scale: 1.0,
    };

    /// Terminal cells, with the vertical axis in half rows so that one unit
    /// is roughly square.
    pub const CELLS: Metrics = Metrics {
        toolbar_height: 6.0,
        button_width: 12.0,
        gap: 2.0,
        padding: 2.0,
        font_size: 2.0,
        swatch_size: 4.0,
        lamp_scale: 1.0 / 12.0,
    };
}

/// Where each part of the scene goes for a given viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneLayout {
    pub metrics: Metrics,
    pub toolbar: Rect,
    pub grid: Rect,
}

impl SceneLayout {
    pub fn new(viewport: &Viewport, metrics: Metrics) -> Self {
        let toolbar = Rect::new(
            viewport.x,
            viewport.y,
            viewport.width,
            metrics.toolbar_height.min(viewport.height),
        );
        let top = toolbar.y + toolbar.h;
        let grid = Rect::new(
            viewport.x + metrics.padding,
            top + metrics.padding,
            (viewport.width - 2.0 * metrics.padding).max(0.0),
            (viewport.y + viewport.height - top - 2.0 * metrics.padding).max(0.0),
        );
        Self {
            metrics,
            toolbar,
            grid,
        }
    }

    pub fn cell_size(&self) -> (f64, f64) {
        (
            self.grid.w / f64::from(crate::model::COLUMNS),
            self.grid.h / f64::from(crate::model::ROWS),
        )
    }

    pub fn lamp_center(&self, lamp: &Lamp) -> Point {
        Point::new(
            self.grid.x + lamp.x / 100.0 * self.grid.w,
            self.grid.y + lamp.y / 100.0 * self.grid.h,
        )
    }

    /// Drawn lamp radius: the lamp's size, shrunk to fit its cell.
    pub fn lamp_radius(&self, lamp: &Lamp) -> f64 {
        let (cw, ch) = self.cell_size();
        (lamp.size / 2.0 * self.metrics.lamp_scale).min(cw.min(ch) * 0.4)
    }

    /// Factor from logical pixels to renderer units for this lamp, after
    /// any shrink-to-fit.
    pub fn lamp_pixel_scale(&self, lamp: &Lamp) -> f64 {
        if lamp.size <= 0.0 {
            return 0.0;
        }
        self.lamp_radius(lamp) / (lamp.size / 2.0)
    }

    /// Global action buttons, left to right after the title.
    pub fn buttons(&self) -> Vec<(GlobalAction, Rect)> {
        let m = self.metrics;
        let h = (self.toolbar.h - 2.0 * m.gap).max(1.0);
        let y = self.toolbar.y + (self.toolbar.h - h) / 2.0;
        let right = self.toolbar.x + self.toolbar.w - m.padding;
        let count = GlobalAction::ALL.len() as f64;
        let start = right - count * m.button_width - (count - 1.0) * m.gap;
        GlobalAction::ALL
            .iter()
            .enumerate()
            .map(|(i, action)| {
                let x = start + i as f64 * (m.button_width + m.gap);
                (*action, Rect::new(x, y, m.button_width, h))
            })
            .collect()
    }

    /// Color picker panel, centered along the bottom of the grid area.
    pub fn picker(&self) -> PickerLayout {
        let m = self.metrics;
        let slots = (Swatch::ALL.len() + 1) as f64;
        let w = 2.0 * m.padding + slots * m.swatch_size + (slots - 1.0) * m.gap;
        let h = 3.0 * m.padding + m.font_size + m.swatch_size;
        let x = self.grid.x + (self.grid.w - w) / 2.0;
        let y = self.grid.y + self.grid.h - h;
        let panel = Rect::new(x, y, w, h);

        let title = Point::new(x + m.padding, y + m.padding + m.font_size / 2.0);
        let row_y = y + 2.0 * m.padding + m.font_size;
        let slot = |i: usize| {
            Rect::new(
                x + m.padding + i as f64 * (m.swatch_size + m.gap),
                row_y,
                m.swatch_size,
                m.swatch_size,
            )
        };
        let swatches = Swatch::ALL
            .iter()
            .enumerate()
            .map(|(i, s)| (*s, slot(i)))
            .collect();
        PickerLayout {
            panel,
            title,
            swatches,
            close: slot(Swatch::ALL.len()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PickerLayout {
    pub panel: Rect,
    pub title: Point,
    pub swatches: Vec<(Swatch, Rect)>,
    pub close: Rect,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_sits_below_toolbar() {
        let layout = SceneLayout::new(&Viewport::new(800.0, 600.0), Metrics::PIXELS);
        assert_eq!(layout.toolbar.h, 44.0);
        assert!(layout.grid.y >= layout.toolbar.y + layout.toolbar.h);
        assert!(layout.grid.y + layout.grid.h <= 600.0);
    }

    #[test]
    fn buttons_fit_toolbar_without_overlap() {
        let layout = SceneLayout::new(&Viewport::new(800.0, 600.0), Metrics::PIXELS);
        let buttons = layout.buttons();
        assert_eq!(buttons.len(), 4);
        for pair in buttons.windows(2) {
            assert!(pair[0].1.x + pair[0].1.w <= pair[1].1.x);
        }
        for (_, r) in &buttons {
            assert!(r.y >= layout.toolbar.y);
            assert!(r.y + r.h <= layout.toolbar.y + layout.toolbar.h);
        }
    }

    #[test]
    fn lamp_radius_fits_cell() {
        let layout = SceneLayout::new(&Viewport::new(220.0, 200.0), Metrics::PIXELS);
        let lamp = Lamp::at(0, 0, Swatch::Mint, 0.5, 0.5);
        let (cw, ch) = layout.cell_size();
        assert!(layout.lamp_radius(&lamp) * 2.0 < cw.min(ch));
    }

    #[test]
    fn large_window_uses_lamp_size() {
        let layout = SceneLayout::new(&Viewport::new(1600.0, 1200.0), Metrics::PIXELS);
        let lamp = Lamp::at(0, 0, Swatch::Mint, 0.5, 0.5);
        assert!((layout.lamp_radius(&lamp) - 24.0).abs() < 1e-9);
        assert!((layout.lamp_pixel_scale(&lamp) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn picker_has_a_slot_per_swatch_plus_close() {
        let layout = SceneLayout::new(&Viewport::new(800.0, 600.0), Metrics::PIXELS);
        let picker = layout.picker();
        assert_eq!(picker.swatches.len(), 10);
        assert!(picker.close.x > picker.swatches[9].1.x);
        assert!(picker.close.x + picker.close.w <= picker.panel.x + picker.panel.w);
    }
}
