//! Shared document-level types: fonts, colors, alignment.

use std::borrow::Cow;

/// Font reference (index into the font table, keyed by `\fN`).
pub type FontRef = i32;

/// Color reference (index into the color table, in append order).
pub type ColorRef = i32;

/// An RGB color. Index 0 of an otherwise-empty table defaults to black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    #[inline]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    #[inline]
    pub const fn black() -> Self {
        Self::new(0, 0, 0)
    }
}

/// Colors in append order, as registered by `\colortbl`.
#[derive(Debug, Clone, Default)]
pub struct ColorTable {
    colors: Vec<Color>,
}

impl ColorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a color and return its index.
    pub fn add(&mut self, color: Color) -> ColorRef {
        let index = self.colors.len() as ColorRef;
        self.colors.push(color);
        index
    }

    /// Look up a color, falling back to black for index 0 of an empty table.
    pub fn get(&self, color_ref: ColorRef) -> Color {
        if color_ref < 0 {
            return Color::black();
        }
        self.colors
            .get(color_ref as usize)
            .copied()
            .unwrap_or_else(|| if color_ref == 0 { Color::black() } else { Color::black() })
    }
}

/// Font family categories, from the leading-`f`-stripped family keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontFamily {
    #[default]
    Nil,
    Roman,
    Swiss,
    Modern,
    Script,
    Decor,
    Tech,
    Bidi,
}

impl FontFamily {
    /// Parse the control-word suffix (`nil`, `roman`, `swiss`, ...).
    pub fn from_keyword(suffix: &str) -> Option<Self> {
        Some(match suffix {
            "nil" => FontFamily::Nil,
            "roman" => FontFamily::Roman,
            "swiss" => FontFamily::Swiss,
            "modern" => FontFamily::Modern,
            "script" => FontFamily::Script,
            "decor" => FontFamily::Decor,
            "tech" => FontFamily::Tech,
            "bidi" => FontFamily::Bidi,
            _ => return None,
        })
    }
}

/// A registered font table entry.
#[derive(Debug, Clone)]
pub struct Font {
    pub name: Cow<'static, str>,
    pub family: FontFamily,
    pub charset: Option<i32>,
}

impl Font {
    pub fn new(name: Cow<'static, str>, family: FontFamily, charset: Option<i32>) -> Self {
        Self { name, family, charset }
    }
}

/// Fonts keyed by `\fN` index, in insertion order (order-preserving per §8).
#[derive(Debug, Clone, Default)]
pub struct FontTable {
    fonts: Vec<(FontRef, Font)>,
}

impl FontTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or overwrite) the font at `index`.
    pub fn insert(&mut self, index: FontRef, font: Font) {
        if let Some(slot) = self.fonts.iter_mut().find(|(i, _)| *i == index) {
            slot.1 = font;
        } else {
            self.fonts.push((index, font));
        }
    }

    pub fn get(&self, index: FontRef) -> Option<&Font> {
        self.fonts.iter().find(|(i, _)| *i == index).map(|(_, f)| f)
    }
}

/// Paragraph text alignment, held by the `q` property key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        Some(match suffix {
            "l" => Alignment::Left,
            "c" => Alignment::Center,
            "r" => Alignment::Right,
            "j" => Alignment::Justify,
            _ => return None,
        })
    }

    pub fn as_char(self) -> char {
        match self {
            Alignment::Left => 'l',
            Alignment::Center => 'c',
            Alignment::Right => 'r',
            Alignment::Justify => 'j',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_are_order_preserving() {
        let mut t = ColorTable::new();
        let a = t.add(Color::new(1, 2, 3));
        let b = t.add(Color::new(4, 5, 6));
        assert_eq!(a, 0);
        assert_eq!(b, 1);
        assert_eq!(t.get(a), Color::new(1, 2, 3));
    }

    #[test]
    fn fonts_keyed_by_index() {
        let mut t = FontTable::new();
        t.insert(3, Font::new(Cow::Borrowed("Times"), FontFamily::Roman, Some(0)));
        assert_eq!(t.get(3).unwrap().name, "Times");
        assert!(t.get(0).is_none());
    }
}
