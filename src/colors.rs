//! The 8-color display palette and the character cell.
//!
//! Palette order follows the classic text-mode attribute bits: bit 0 = blue,
//! bit 1 = green, bit 2 = red. `Color::from_index(0b110)` is therefore yellow.

/// One of the eight colors every text display can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    #[default]
    Black,
    Blue,
    Green,
    Cyan,
    Red,
    Magenta,
    Yellow,
    White,
}

impl Color {
    pub const ALL: [Color; 8] = [
        Color::Black,
        Color::Blue,
        Color::Green,
        Color::Cyan,
        Color::Red,
        Color::Magenta,
        Color::Yellow,
        Color::White,
    ];

    /// Palette entry for a 3-bit index; higher bits are ignored.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index & 0b111]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Quantizes an RGB triple by thresholding each channel at half intensity.
    pub fn nearest_rgb(r: u8, g: u8, b: u8) -> Self {
        let bit = |channel: u8, shift: usize| usize::from(channel >= 128) << shift;
        Self::from_index(bit(b, 0) | bit(g, 1) | bit(r, 2))
    }
}

/// A single display cell: glyph, foreground and background color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub glyph: char,
    pub fg: Color,
    pub bg: Color,
}

impl Cell {
    pub const BLANK: Self = Self {
        glyph: ' ',
        fg: Color::White,
        bg: Color::Black,
    };

    pub const fn new(glyph: char, fg: Color, bg: Color) -> Self {
        Self { glyph, fg, bg }
    }

    /// A glyph drawn in `fg` on the default black background.
    pub const fn glyph(glyph: char, fg: Color) -> Self {
        Self::new(glyph, fg, Color::Black)
    }

    /// A blank cell filled with a background color.
    pub const fn solid(bg: Color) -> Self {
        Self::new(' ', Color::Black, bg)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}
