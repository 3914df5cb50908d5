use lamp_grid_protocol::Swatch;
use serde::{Deserialize, Serialize};

/// Grid columns.
pub const COLUMNS: u32 = 11;
/// Grid rows.
pub const ROWS: u32 = 9;
/// Number of lamps in every collection.
pub const LAMP_COUNT: usize = (COLUMNS * ROWS) as usize;

/// Uniform lamp diameter in logical pixels.
pub const LAMP_SIZE: f64 = 48.0;

pub const BRIGHTNESS_MIN: f64 = 0.2;
pub const BRIGHTNESS_MAX: f64 = 1.0;
pub const GLOW_MIN: f64 = 0.1;
pub const GLOW_MAX: f64 = 1.0;

/// One grid cell's lamp.
///
/// `id`, grid position, `x`/`y` and `size` are fixed when the lamp is
/// created; only `color`, `brightness`, `glow` and `active` change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lamp {
    pub id: u32,
    pub grid_col: u32,
    pub grid_row: u32,
    /// Horizontal center as a percentage of the grid width.
    pub x: f64,
    /// Vertical center as a percentage of the grid height.
    pub y: f64,
    pub color: Swatch,
    pub size: f64,
    /// In `[BRIGHTNESS_MIN, BRIGHTNESS_MAX]`.
    pub brightness: f64,
    /// In `[GLOW_MIN, GLOW_MAX]`.
    pub glow: f64,
    pub active: bool,
}

impl Lamp {
    /// Create the lamp for a grid cell with the given mutable attributes.
    pub fn at(col: u32, row: u32, color: Swatch, brightness: f64, glow: f64) -> Self {
        Self {
            id: row * COLUMNS + col,
            grid_col: col,
            grid_row: row,
            x: (f64::from(col) + 0.5) / f64::from(COLUMNS) * 100.0,
            y: (f64::from(row) + 0.5) / f64::from(ROWS) * 100.0,
            color,
            size: LAMP_SIZE,
            brightness: clamp_brightness(brightness),
            glow: clamp_glow(glow),
            active: false,
        }
    }

    /// Whether `other` occupies the same fixed slot (id, position, size).
    pub fn same_slot(&self, other: &Lamp) -> bool {
        self.id == other.id
            && self.grid_col == other.grid_col
            && self.grid_row == other.grid_row
            && self.x == other.x
            && self.y == other.y
            && self.size == other.size
    }
}

pub fn clamp_brightness(v: f64) -> f64 {
    if v.is_nan() {
        return BRIGHTNESS_MIN;
    }
    v.clamp(BRIGHTNESS_MIN, BRIGHTNESS_MAX)
}

pub fn clamp_glow(v: f64) -> f64 {
    if v.is_nan() {
        return GLOW_MIN;
    }
    v.clamp(GLOW_MIN, GLOW_MAX)
}
