use lamp_grid_protocol::{Swatch, ThemeToken};

/// Resolved RGBA color for egui rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ResolvedColor {
    const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    const fn hex(v: u32) -> Self {
        Self::rgb((v >> 16) as u8, (v >> 8) as u8, v as u8)
    }

    pub fn to_color32(self) -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(self.r, self.g, self.b, self.a)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }

    pub fn label(self) -> &'static str {
        match self {
            ThemeMode::Dark => "🌙 Dark",
            ThemeMode::Light => "☀ Light",
        }
    }
}

pub fn resolve(token: ThemeToken, mode: ThemeMode) -> egui::Color32 {
    resolve_rgba(token, mode).to_color32()
}

pub fn resolve_rgba(token: ThemeToken, mode: ThemeMode) -> ResolvedColor {
    match mode {
        ThemeMode::Dark => resolve_dark(token),
        ThemeMode::Light => resolve_light(token),
    }
}

/// Lamp colors are the same in both modes.
fn lamp(swatch: Swatch) -> ResolvedColor {
    let (r, g, b) = swatch.rgb();
    ResolvedColor::rgb(r, g, b)
}

fn resolve_dark(token: ThemeToken) -> ResolvedColor {
    use ThemeToken::*;
    match token {
        Background => ResolvedColor::hex(0x0e0e16),
        FloorBase => ResolvedColor::hex(0x161622),
        Border => ResolvedColor::hex(0x45475a),

        TextPrimary => ResolvedColor::hex(0xecedf4),

        SelectionHighlight => ResolvedColor::hex(0xffffff),

        ToolbarBackground => ResolvedColor::hex(0x181825),
        ToolbarText => ResolvedColor::hex(0xcdd6f4),
        ButtonBackground => ResolvedColor::hex(0x313244),
        ButtonBorder => ResolvedColor::hex(0x585b70),

        PickerBackground => ResolvedColor {
            a: 240,
            ..ResolvedColor::hex(0x1e1e2e)
        },
        PickerBorder => ResolvedColor::hex(0x585b70),

        Lamp(swatch) => lamp(swatch),
    }
}

fn resolve_light(token: ThemeToken) -> ResolvedColor {
    use ThemeToken::*;
    match token {
        Background => ResolvedColor::rgb(248, 249, 250),
        FloorBase => ResolvedColor::rgb(236, 236, 242),
        Border => ResolvedColor::rgb(200, 200, 212),

        TextPrimary => ResolvedColor::rgb(26, 26, 46),

        SelectionHighlight => ResolvedColor::rgb(50, 110, 220),

        ToolbarBackground => ResolvedColor::rgb(240, 240, 245),
        ToolbarText => ResolvedColor::rgb(40, 40, 50),
        ButtonBackground => ResolvedColor::rgb(228, 228, 236),
        ButtonBorder => ResolvedColor::rgb(200, 200, 212),

        PickerBackground => ResolvedColor::rgb(255, 255, 255),
        PickerBorder => ResolvedColor::rgb(200, 200, 212),

        Lamp(swatch) => lamp(swatch),
    }
}

// ── Typography scale ───────────────────────────────────────────────────────

pub const FONT_TITLE: f32 = 18.0;
pub const FONT_BODY: f32 = 13.0;
pub const FONT_CAPTION: f32 = 11.0;

/// Apply the app's typography scale to egui styles.
pub fn apply_typography(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    style.text_styles.insert(
        egui::TextStyle::Heading,
        egui::FontId::proportional(FONT_TITLE),
    );
    style
        .text_styles
        .insert(egui::TextStyle::Body, egui::FontId::proportional(FONT_BODY));
    style.text_styles.insert(
        egui::TextStyle::Button,
        egui::FontId::proportional(FONT_BODY),
    );
    style.text_styles.insert(
        egui::TextStyle::Small,
        egui::FontId::proportional(FONT_CAPTION),
    );
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    ctx.set_style(style);
}

// ── egui visual presets ────────────────────────────────────────────────────

/// Widget visuals matching the scene palette.
pub fn visuals(mode: ThemeMode) -> egui::Visuals {
    let toolbar = resolve(ThemeToken::ToolbarBackground, mode);
    let surface = resolve(ThemeToken::PickerBackground, mode);
    let border = resolve(ThemeToken::Border, mode);
    let accent = resolve(ThemeToken::SelectionHighlight, mode);

    let mut v = match mode {
        ThemeMode::Dark => egui::Visuals::dark(),
        ThemeMode::Light => egui::Visuals::light(),
    };
    v.panel_fill = toolbar;
    v.window_fill = surface;
    v.extreme_bg_color = resolve(ThemeToken::Background, mode);
    v.widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, border);
    v.widgets.inactive.bg_fill = resolve(ThemeToken::ButtonBackground, mode);
    v.selection.stroke = egui::Stroke::new(1.0, accent);
    v.window_corner_radius = egui::CornerRadius::same(6);
    v.widgets.inactive.corner_radius = egui::CornerRadius::same(5);
    v.widgets.hovered.corner_radius = egui::CornerRadius::same(5);
    v.widgets.active.corner_radius = egui::CornerRadius::same(5);
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lamp_colors_ignore_mode() {
        for swatch in Swatch::ALL {
            let token = ThemeToken::Lamp(swatch);
            assert_eq!(
                resolve_rgba(token, ThemeMode::Dark),
                resolve_rgba(token, ThemeMode::Light)
            );
        }
        let rose = resolve_rgba(ThemeToken::Lamp(Swatch::Rose), ThemeMode::Dark);
        assert_eq!((rose.r, rose.g, rose.b), (0xff, 0xb3, 0xc1));
    }

    #[test]
    fn modes_differ_on_background() {
        assert_ne!(
            resolve_rgba(ThemeToken::Background, ThemeMode::Dark),
            resolve_rgba(ThemeToken::Background, ThemeMode::Light)
        );
        assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
        assert_eq!(ThemeMode::Light.toggled().toggled(), ThemeMode::Light);
    }
}
