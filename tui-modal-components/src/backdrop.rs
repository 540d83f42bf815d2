//! Backdrop painting: dimming, fills and drop shadows

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;

/// Dim every cell of `area` by scaling its colors towards black
///
/// `factor` ranges from 0.0 (no change) to 1.0 (black). Cells whose
/// background is the terminal default get a black background once the factor
/// reaches one half, since the default color cannot be scaled.
pub fn dim_area(buf: &mut Buffer, area: Rect, factor: f32) {
    let factor = factor.clamp(0.0, 1.0);
    if factor == 0.0 {
        return;
    }
    let scale = 1.0 - factor;
    let area = area.intersection(buf.area);

    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            let cell = &mut buf[(x, y)];
            cell.fg = match cell.fg {
                Color::Reset => scale_rgb((229, 229, 229), scale),
                fg => dim_color(fg, scale),
            };
            cell.bg = match cell.bg {
                Color::Reset if factor >= 0.5 => Color::Black,
                bg => dim_color(bg, scale),
            };
        }
    }
}

/// Scale a color towards black; `scale` 1.0 keeps it, 0.0 makes it black
pub fn dim_color(color: Color, scale: f32) -> Color {
    match color {
        Color::Reset | Color::Black => color,
        Color::Rgb(r, g, b) => scale_rgb((r, g, b), scale),
        Color::Indexed(idx) => match indexed_to_rgb(idx) {
            Some(rgb) => scale_rgb(rgb, scale),
            None => color,
        },
        named => match named_to_rgb(named) {
            Some(rgb) => scale_rgb(rgb, scale),
            None => named,
        },
    }
}

/// Fill `area` with blank cells on `bg`
pub fn fill(buf: &mut Buffer, area: Rect, bg: Color) {
    let area = area.intersection(buf.area);
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            buf[(x, y)].set_symbol(" ").set_bg(bg);
        }
    }
}

/// Paint a one-cell drop shadow to the right of and below `panel`
///
/// The shadow is clipped to `bounds`.
pub fn drop_shadow(buf: &mut Buffer, panel: Rect, bounds: Rect, color: Color) {
    let right = Rect::new(panel.right(), panel.y.saturating_add(1), 1, panel.height);
    let below = Rect::new(panel.x.saturating_add(1), panel.bottom(), panel.width, 1);
    for strip in [right, below] {
        let strip = strip.intersection(bounds).intersection(buf.area);
        for y in strip.top()..strip.bottom() {
            for x in strip.left()..strip.right() {
                buf[(x, y)].set_bg(color);
            }
        }
    }
}

fn scale_rgb((r, g, b): (u8, u8, u8), scale: f32) -> Color {
    let scale = |v: u8| ((v as f32) * scale) as u8;
    Color::Rgb(scale(r), scale(g), scale(b))
}

fn named_to_rgb(color: Color) -> Option<(u8, u8, u8)> {
    let rgb = match color {
        Color::Red => (205, 0, 0),
        Color::Green => (0, 205, 0),
        Color::Yellow => (205, 205, 0),
        Color::Blue => (0, 0, 238),
        Color::Magenta => (205, 0, 205),
        Color::Cyan => (0, 205, 205),
        Color::Gray => (229, 229, 229),
        Color::DarkGray => (127, 127, 127),
        Color::LightRed => (255, 0, 0),
        Color::LightGreen => (0, 255, 0),
        Color::LightYellow => (255, 255, 0),
        Color::LightBlue => (92, 92, 255),
        Color::LightMagenta => (255, 0, 255),
        Color::LightCyan => (0, 255, 255),
        Color::White => (255, 255, 255),
        _ => return None,
    };
    Some(rgb)
}

/// Approximate RGB for a 256-color palette index
fn indexed_to_rgb(idx: u8) -> Option<(u8, u8, u8)> {
    const BASE: [(u8, u8, u8); 16] = [
        (0, 0, 0),
        (128, 0, 0),
        (0, 128, 0),
        (128, 128, 0),
        (0, 0, 128),
        (128, 0, 128),
        (0, 128, 128),
        (192, 192, 192),
        (128, 128, 128),
        (255, 0, 0),
        (0, 255, 0),
        (255, 255, 0),
        (0, 0, 255),
        (255, 0, 255),
        (0, 255, 255),
        (255, 255, 255),
    ];
    match idx {
        0..=15 => Some(BASE[idx as usize]),
        // 6x6x6 color cube
        16..=231 => {
            let idx = idx - 16;
            let level = |v: u8| if v == 0 { 0 } else { 55 + v * 40 };
            Some((level(idx / 36), level((idx / 6) % 6), level(idx % 6)))
        }
        232..=255 => {
            let gray = 8 + (idx - 232) * 10;
            Some((gray, gray, gray))
        }
    }
}
