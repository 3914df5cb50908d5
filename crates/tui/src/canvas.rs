//! Cell rasterizer for render commands.
//!
//! Commands are laid out in `Metrics::CELLS` units: one unit per column,
//! two units per terminal row. Glows are blended into cell backgrounds,
//! everything else overwrites.

use lamp_grid_protocol::{Color, Point, Rect, RenderCommand, ThemeToken};

/// Layout units per terminal row.
pub const ROW_UNITS: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

#[derive(Debug, Clone)]
pub struct Canvas {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

/// Dark terminal palette.
pub fn theme_color(token: ThemeToken) -> Color {
    let rgb = |v: u32| Color::from_rgb8((v >> 16) as u8, (v >> 8) as u8, v as u8);
    match token {
        ThemeToken::Lamp(swatch) => swatch.color(),
        ThemeToken::Background => rgb(0x0e_0e_16),
        ThemeToken::FloorBase => rgb(0x16_16_22),
        ThemeToken::PickerBackground => rgb(0x24_24_33),
        ThemeToken::ToolbarBackground => rgb(0x1c_1c_28),
        ThemeToken::ButtonBackground => rgb(0x31_32_44),
        ThemeToken::Border | ThemeToken::ButtonBorder | ThemeToken::PickerBorder => {
            rgb(0x5a_5c_70)
        }
        ThemeToken::TextPrimary | ThemeToken::ToolbarText => rgb(0xec_ec_f4),
        ThemeToken::SelectionHighlight => rgb(0xff_ff_ff),
    }
}

/// Center of a terminal cell in layout units.
pub fn cell_center(col: u16, row: u16) -> Point {
    Point::new(f64::from(col) + 0.5, (f64::from(row) + 0.5) * ROW_UNITS)
}

/// Terminal cell containing a layout point.
pub fn cell_at(p: Point) -> (i64, i64) {
    (p.x.floor() as i64, (p.y / ROW_UNITS).floor() as i64)
}

fn mix(a: Color, b: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    Color::rgba(
        a.r + (b.r - a.r) * t,
        a.g + (b.g - a.g) * t,
        a.b + (b.b - a.b) * t,
        1.0,
    )
}

impl Canvas {
    pub fn new(width: u16, height: u16) -> Self {
        let blank = Cell {
            ch: ' ',
            fg: theme_color(ThemeToken::TextPrimary),
            bg: theme_color(ThemeToken::Background),
        };
        Self {
            width,
            height,
            cells: vec![blank; usize::from(width) * usize::from(height)],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, col: u16, row: u16) -> Option<&Cell> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.cells
            .get(usize::from(row) * usize::from(self.width) + usize::from(col))
    }

    fn get_mut(&mut self, col: i64, row: i64) -> Option<&mut Cell> {
        if col < 0 || row < 0 || col >= i64::from(self.width) || row >= i64::from(self.height) {
            return None;
        }
        let idx = row as usize * usize::from(self.width) + col as usize;
        self.cells.get_mut(idx)
    }

    /// Write a run of characters starting at a cell, keeping backgrounds.
    pub fn put_str(&mut self, col: i64, row: i64, text: &str, fg: Color) {
        for (i, ch) in text.chars().enumerate() {
            if let Some(cell) = self.get_mut(col + i as i64, row) {
                cell.ch = ch;
                cell.fg = fg;
            }
        }
    }

    /// Cells whose centers fall inside a box around `center`.
    fn cells_near(&self, center: Point, reach: f64) -> impl Iterator<Item = (u16, u16)> + use<> {
        let (w, h) = (self.width, self.height);
        let col0 = (center.x - reach).floor().max(0.0) as u16;
        let col1 = ((center.x + reach).ceil().max(0.0) as u16).min(w);
        let row0 = ((center.y - reach) / ROW_UNITS).floor().max(0.0) as u16;
        let row1 = (((center.y + reach) / ROW_UNITS).ceil().max(0.0) as u16).min(h);
        (row0..row1).flat_map(move |r| (col0..col1).map(move |c| (c, r)))
    }

    pub fn paint(&mut self, commands: &[RenderCommand]) {
        for cmd in commands {
            match cmd {
                RenderCommand::DrawRect {
                    rect,
                    color,
                    border_color,
                    label,
                    ..
                } => self.rect(*rect, *color, *border_color, label.as_deref()),
                RenderCommand::DrawCircle {
                    center,
                    radius,
                    color,
                    intensity,
                    border_color,
                    ..
                } => self.circle(*center, *radius, *color, *intensity, *border_color),
                RenderCommand::DrawGlow {
                    center,
                    radius,
                    color,
                    opacity,
                } => self.glow(*center, *radius, *color, *opacity),
                RenderCommand::DrawText {
                    position,
                    text,
                    color,
                    ..
                } => {
                    let (col, row) = cell_at(*position);
                    self.put_str(col, row, text, theme_color(*color));
                }
                RenderCommand::BeginGroup { .. } | RenderCommand::EndGroup => {}
            }
        }
    }

    fn rect(
        &mut self,
        rect: Rect,
        color: ThemeToken,
        border: Option<ThemeToken>,
        label: Option<&str>,
    ) {
        let bg = theme_color(color);
        let mut covered: Vec<(u16, u16)> = Vec::new();
        for row in 0..self.height {
            for col in 0..self.width {
                if rect.contains(cell_center(col, row)) {
                    covered.push((col, row));
                }
            }
        }
        if covered.is_empty() {
            return;
        }
        for &(col, row) in &covered {
            if let Some(cell) = self.get_mut(i64::from(col), i64::from(row)) {
                cell.ch = ' ';
                cell.bg = bg;
            }
        }

        let (c0, r0) = covered[0];
        let (c1, r1) = covered[covered.len() - 1];
        if let Some(token) = border {
            let fg = theme_color(token);
            if r1 > r0 && c1 > c0 {
                for col in c0..=c1 {
                    let (top, bottom) = match col {
                        c if c == c0 => ('┌', '└'),
                        c if c == c1 => ('┐', '┘'),
                        _ => ('─', '─'),
                    };
                    self.put_str(i64::from(col), i64::from(r0), &top.to_string(), fg);
                    self.put_str(i64::from(col), i64::from(r1), &bottom.to_string(), fg);
                }
                for row in r0 + 1..r1 {
                    self.put_str(i64::from(c0), i64::from(row), "│", fg);
                    self.put_str(i64::from(c1), i64::from(row), "│", fg);
                }
            } else if c1 > c0 {
                self.put_str(i64::from(c0), i64::from(r0), "[", fg);
                self.put_str(i64::from(c1), i64::from(r0), "]", fg);
            }
        }

        if let Some(label) = label {
            let fg = theme_color(ThemeToken::TextPrimary);
            let width = i64::from(c1) - i64::from(c0) + 1;
            let len = label.chars().count() as i64;
            let col = i64::from(c0) + ((width - len) / 2).max(0);
            let row = (i64::from(r0) + i64::from(r1)) / 2;
            let text: String = label.chars().take(width as usize).collect();
            self.put_str(col, row, &text, fg);
        }
    }

    fn circle(
        &mut self,
        center: Point,
        radius: f64,
        color: ThemeToken,
        intensity: f64,
        border: Option<ThemeToken>,
    ) {
        let fill = theme_color(color).scaled(intensity as f32);
        let mut spans: Vec<(u16, u16, u16)> = Vec::new();
        let mut row_span: Option<(u16, u16, u16)> = None;
        for (col, row) in self.cells_near(center, radius + 1.0) {
            if cell_center(col, row).distance(center) > radius {
                continue;
            }
            row_span = match row_span {
                Some((r, c0, _)) if r == row => Some((r, c0, col)),
                Some(done) => {
                    spans.push(done);
                    Some((row, col, col))
                }
                None => Some((row, col, col)),
            };
        }
        spans.extend(row_span);
        if spans.is_empty() {
            let (col, row) = cell_at(center);
            if col >= 0 && row >= 0 && col < i64::from(self.width) && row < i64::from(self.height) {
                spans.push((row as u16, col as u16, col as u16));
            }
        }

        for &(row, c0, c1) in &spans {
            for col in c0..=c1 {
                if let Some(cell) = self.get_mut(i64::from(col), i64::from(row)) {
                    cell.ch = ' ';
                    cell.bg = fill;
                }
            }
            if let Some(token) = border {
                let fg = theme_color(token);
                if c1 > c0 {
                    self.put_str(i64::from(c0), i64::from(row), "(", fg);
                    self.put_str(i64::from(c1), i64::from(row), ")", fg);
                } else {
                    self.put_str(i64::from(c0), i64::from(row), "◦", fg);
                }
            }
        }
    }

    fn glow(&mut self, center: Point, radius: f64, color: ThemeToken, opacity: f64) {
        if radius <= 0.0 {
            return;
        }
        let tint = theme_color(color);
        for (col, row) in self.cells_near(center, radius) {
            let d = cell_center(col, row).distance(center);
            if d >= radius {
                continue;
            }
            let alpha = (opacity * (1.0 - d / radius)) as f32;
            if let Some(cell) = self.get_mut(i64::from(col), i64::from(row)) {
                cell.bg = mix(cell.bg, tint, alpha);
            }
        }
    }
}
