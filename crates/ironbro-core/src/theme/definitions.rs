//! Built-in theme definitions
//!
//! Deprecated entries (orange, pink, gold and their brosquad variants) are gone.

use super::{Color, Theme, ThemeCategory};

/// All built-in themes in display order
pub fn builtin_themes() -> Vec<Theme> {
    vec![
        // Standard themes
        standard(
            "red",
            "Red",
            Color::new(0xff, 0x1a, 0x1a),
            Color::new(0xff, 0x66, 0x66),
            Color::new(0x66, 0x00, 0x00),
        ),
        standard(
            "yellow",
            "Yellow",
            Color::new(0xff, 0xcc, 0x00),
            Color::new(0xff, 0xee, 0x66),
            Color::new(0xb3, 0x8f, 0x00),
        ),
        standard(
            "green",
            "Green",
            Color::new(0x00, 0xcc, 0x66),
            Color::new(0x66, 0xff, 0x99),
            Color::new(0x00, 0x80, 0x40),
        ),
        standard(
            "blue",
            "Blue",
            Color::new(0x33, 0x66, 0xff),
            Color::new(0x66, 0x99, 0xff),
            Color::new(0x00, 0x33, 0xcc),
        ),
        // Brosquad exclusive themes
        brosquad(
            "brosquad-neon",
            "Neon Green",
            Color::new(0x00, 0xff, 0x9d),
            Color::new(0x80, 0xff, 0xce),
            Color::new(0x00, 0xb3, 0x6b),
        ),
        brosquad(
            "brosquad-purple",
            "Electric Purple",
            Color::new(0xb0, 0x26, 0xff),
            Color::new(0xd5, 0x80, 0xff),
            Color::new(0x7a, 0x00, 0xcc),
        ),
        brosquad(
            "brosquad-cyan",
            "Cyan",
            Color::new(0x00, 0xf7, 0xff),
            Color::new(0x80, 0xfb, 0xff),
            Color::new(0x00, 0xb3, 0xb8),
        ),
        brosquad(
            "brosquad-blue",
            "Brosquad Blue",
            Color::new(0x00, 0xaa, 0xff),
            Color::new(0x66, 0xcc, 0xff),
            Color::new(0x00, 0x66, 0x99),
        ),
    ]
}

fn standard(id: &str, name: &str, accent: Color, light: Color, dark: Color) -> Theme {
    Theme::new(id, name, ThemeCategory::Standard, accent, light, dark)
}

fn brosquad(id: &str, name: &str, accent: Color, light: Color, dark: Color) -> Theme {
    Theme::new(id, name, ThemeCategory::Brosquad, accent, light, dark)
}
