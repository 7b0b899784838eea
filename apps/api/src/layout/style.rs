//! Monochrome palette and the handful of text styles the resume uses.

use super::font_metrics::Font;

/// An sRGB colour with components in 0.0..=1.0, as written by the `rg`/`RG` operators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb(pub f32, pub f32, pub f32);

/// Primary text: names, titles, captions. `#000000`
pub const DARK: Rgb = Rgb(0.0, 0.0, 0.0);
/// Secondary text: body copy, contact lines. `#444444`
pub const MEDIUM: Rgb = Rgb(0.267, 0.267, 0.267);
/// Details: dates, footers. `#666666`
pub const LIGHT: Rgb = Rgb(0.4, 0.4, 0.4);
/// Divider and underline strokes. `#999999`
pub const RULE: Rgb = Rgb(0.6, 0.6, 0.6);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: Font,
    pub size: f32,
    pub color: Rgb,
}

impl TextStyle {
    pub const fn new(font: Font, size: f32, color: Rgb) -> Self {
        Self { font, size, color }
    }
}

pub const NAME: TextStyle = TextStyle::new(Font::Bold, 26.0, DARK);
pub const HEADLINE: TextStyle = TextStyle::new(Font::Regular, 12.0, MEDIUM);
pub const CONTACT: TextStyle = TextStyle::new(Font::Regular, 10.0, MEDIUM);
pub const SECTION_TITLE: TextStyle = TextStyle::new(Font::Bold, 14.0, DARK);
pub const SUMMARY: TextStyle = TextStyle::new(Font::Regular, 11.0, MEDIUM);
pub const ENTRY_TITLE: TextStyle = TextStyle::new(Font::Bold, 12.0, DARK);
pub const ENTRY_SUBTITLE: TextStyle = TextStyle::new(Font::Regular, 11.0, MEDIUM);
pub const ITEM_TITLE: TextStyle = TextStyle::new(Font::Bold, 11.0, DARK);
pub const DATES: TextStyle = TextStyle::new(Font::Oblique, 10.0, LIGHT);
pub const BODY: TextStyle = TextStyle::new(Font::Regular, 10.0, MEDIUM);
pub const FOOTER: TextStyle = TextStyle::new(Font::Regular, 9.0, LIGHT);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_is_gray() {
        for Rgb(r, g, b) in [DARK, MEDIUM, LIGHT, RULE] {
            assert_eq!(r, g);
            assert_eq!(g, b);
        }
    }

    #[test]
    fn test_palette_gets_lighter() {
        assert!(DARK.0 < MEDIUM.0 && MEDIUM.0 < LIGHT.0 && LIGHT.0 < RULE.0);
    }
}
