//! SVG renderer: converts `RenderCommand` lists into standalone SVG strings.

use std::fmt::Write as _;

use lamp_grid_protocol::{Color, RenderCommand, ThemeToken};

/// Render a list of commands as an SVG document string.
///
/// `width` and `height` define the SVG viewBox dimensions.
/// `dark` selects the color palette. Glow spots become radial gradients.
pub fn render_svg(commands: &[RenderCommand], width: f64, height: f64, dark: bool) -> String {
    let mut svg = String::with_capacity(commands.len() * 160);
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="{width}" height="{height}" style="font-family:system-ui,-apple-system,sans-serif">"#,
    );

    let mut gradients = 0usize;
    for cmd in commands {
        match cmd {
            RenderCommand::DrawRect {
                rect,
                color,
                border_color,
                label,
                ..
            } => {
                let fill = resolve_color(*color, dark);
                let stroke = border_attr(*border_color, dark);
                let _ = write!(
                    svg,
                    r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{fill}" rx="3"{stroke}/>"#,
                    rect.x, rect.y, rect.w, rect.h,
                );
                if let Some(label) = label {
                    let text_color = resolve_color(ThemeToken::TextPrimary, dark);
                    let center = rect.center();
                    let _ = write!(
                        svg,
                        r#"<text x="{}" y="{}" fill="{text_color}" text-anchor="middle" dominant-baseline="central" style="pointer-events:none">{}</text>"#,
                        center.x,
                        center.y,
                        escape_xml(label),
                    );
                }
            }
            RenderCommand::DrawCircle {
                center,
                radius,
                color,
                intensity,
                border_color,
                ..
            } => {
                let fill = hex(token_color(*color, dark).scaled(*intensity as f32));
                let stroke = border_attr(*border_color, dark);
                let _ = write!(
                    svg,
                    r#"<circle cx="{}" cy="{}" r="{radius}" fill="{fill}"{stroke}/>"#,
                    center.x, center.y,
                );
            }
            RenderCommand::DrawGlow {
                center,
                radius,
                color,
                opacity,
            } => {
                let id = format!("glow{gradients}");
                gradients += 1;
                let stop = resolve_color(*color, dark);
                let _ = write!(
                    svg,
                    r#"<defs><radialGradient id="{id}"><stop offset="0" stop-color="{stop}" stop-opacity="{opacity}"/><stop offset="1" stop-color="{stop}" stop-opacity="0"/></radialGradient></defs><circle cx="{}" cy="{}" r="{radius}" fill="url(#{id})" style="mix-blend-mode:screen"/>"#,
                    center.x, center.y,
                );
            }
            RenderCommand::DrawText {
                text,
                position,
                color,
                font_size,
            } => {
                let fill = resolve_color(*color, dark);
                let _ = write!(
                    svg,
                    r#"<text x="{}" y="{}" fill="{fill}" font-size="{font_size}" dominant-baseline="central">{}</text>"#,
                    position.x,
                    position.y,
                    escape_xml(text),
                );
            }
            // Groups carry no visual weight in a static document
            RenderCommand::BeginGroup { .. } | RenderCommand::EndGroup => {}
        }
    }

    svg.push_str("</svg>");
    svg
}

fn border_attr(token: Option<ThemeToken>, dark: bool) -> String {
    token
        .map(|t| format!(r#" stroke="{}" stroke-width="2""#, resolve_color(t, dark)))
        .unwrap_or_default()
}

fn resolve_color(token: ThemeToken, dark: bool) -> String {
    hex(token_color(token, dark))
}

fn token_color(token: ThemeToken, dark: bool) -> Color {
    let rgb = |v: u32| Color::from_rgb8((v >> 16) as u8, (v >> 8) as u8, v as u8);
    if let ThemeToken::Lamp(swatch) = token {
        return swatch.color();
    }
    if dark {
        match token {
            ThemeToken::Background => rgb(0x10_10_18),
            ThemeToken::FloorBase => rgb(0x1a_1a_26),
            ThemeToken::PickerBackground => rgb(0x24_24_33),
            ThemeToken::ToolbarBackground => rgb(0x18_18_24),
            ThemeToken::ButtonBackground => rgb(0x31_32_44),
            ThemeToken::Border | ThemeToken::ButtonBorder | ThemeToken::PickerBorder => {
                rgb(0x45_47_5a)
            }
            ThemeToken::TextPrimary | ThemeToken::ToolbarText => rgb(0xec_ec_f4),
            ThemeToken::SelectionHighlight => rgb(0xff_ff_ff),
            ThemeToken::Lamp(_) => rgb(0x61_61_61),
        }
    } else {
        match token {
            ThemeToken::Background => rgb(0xf8_f9_fa),
            ThemeToken::FloorBase => rgb(0xee_ee_f4),
            ThemeToken::PickerBackground => rgb(0xff_ff_ff),
            ThemeToken::ToolbarBackground => rgb(0xf0_f0_f5),
            ThemeToken::ButtonBackground => rgb(0xe4_e4_ec),
            ThemeToken::Border | ThemeToken::ButtonBorder | ThemeToken::PickerBorder => {
                rgb(0xc8_c8_d4)
            }
            ThemeToken::TextPrimary | ThemeToken::ToolbarText => rgb(0x1a_1a_2e),
            ThemeToken::SelectionHighlight => rgb(0x32_6e_dc),
            ThemeToken::Lamp(_) => rgb(0x99_99_99),
        }
    }
}

fn hex(color: Color) -> String {
    let (r, g, b) = color.to_rgb8();
    format!("#{r:02x}{g:02x}{b:02x}")
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use lamp_grid_protocol::{Point, Rect, Swatch};

    #[test]
    fn basic_svg_output() {
        let commands = vec![RenderCommand::DrawRect {
            rect: Rect::new(10.0, 20.0, 100.0, 18.0),
            color: ThemeToken::Lamp(Swatch::Rose),
            border_color: None,
            label: Some("Reset".into()),
            target: None,
        }];
        let svg = render_svg(&commands, 800.0, 400.0, true);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("Reset"));
        assert!(svg.contains("#ffb3c1"));
    }

    #[test]
    fn circle_fill_follows_intensity() {
        let commands = vec![RenderCommand::DrawCircle {
            center: Point::new(5.0, 5.0),
            radius: 4.0,
            color: ThemeToken::Lamp(Swatch::Rose),
            intensity: 0.25,
            border_color: None,
            target: None,
        }];
        let svg = render_svg(&commands, 10.0, 10.0, true);
        assert!(svg.contains(r##"fill="#402d30""##));
    }

    #[test]
    fn glows_get_unique_gradients() {
        let glow = RenderCommand::DrawGlow {
            center: Point::new(50.0, 50.0),
            radius: 60.0,
            color: ThemeToken::Lamp(Swatch::Sky),
            opacity: 0.32,
        };
        let svg = render_svg(&[glow.clone(), glow], 100.0, 100.0, false);
        assert!(svg.contains(r#"id="glow0""#));
        assert!(svg.contains(r#"id="glow1""#));
        assert!(svg.contains(r#"stop-opacity="0.32""#));
    }

    #[test]
    fn escapes_xml_entities() {
        let commands = vec![RenderCommand::DrawText {
            position: Point::new(0.0, 0.0),
            text: "<lamps & glow>".into(),
            color: ThemeToken::TextPrimary,
            font_size: 12.0,
        }];
        let svg = render_svg(&commands, 400.0, 100.0, false);
        assert!(svg.contains("&lt;lamps &amp; glow&gt;"));
    }
}
