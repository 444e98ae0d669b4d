//! Seven-segment style glyphs for the large clock.
//!
//! Every glyph is five text rows tall. Digits are six columns wide, the colon
//! separator is three. Two filler glyphs exist for degraded displays: a blank
//! cell and a bar used when the hour field overflows.

use std::io;

use crate::surface::Canvas;

/// Number of text rows in every glyph.
pub const GLYPH_HEIGHT: usize = 5;

const DIGITS: [[&str; GLYPH_HEIGHT]; 10] = [
    [" #### ", "##  ##", "##  ##", "##  ##", " #### "],
    ["  ##  ", " ###  ", "  ##  ", "  ##  ", " #### "],
    [" #### ", "##  ##", "   ## ", "  ##  ", "######"],
    [" #### ", "##  ##", "   ###", "##  ##", " #### "],
    ["   ## ", "  ### ", " # ## ", "######", "   ## "],
    ["######", "##    ", "##### ", "    ##", "##### "],
    [" #### ", "##    ", "##### ", "##  ##", " #### "],
    ["######", "   ## ", "  ##  ", " ##   ", "##    "],
    [" #### ", "##  ##", " #### ", "##  ##", " #### "],
    [" #### ", "##  ##", " #####", "    ##", " #### "],
];

const COLON: [&str; GLYPH_HEIGHT] = ["   ", " # ", "   ", " # ", "   "];
const BLANK: [&str; GLYPH_HEIGHT] = ["      "; GLYPH_HEIGHT];
const BAR: [&str; GLYPH_HEIGHT] = ["      ", "      ", "######", "      ", "      "];

/// One drawable cell of the large clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    /// Decimal digit, always in `0..=9`.
    Digit(u8),
    Colon,
    Blank,
    Bar,
}

impl Glyph {
    /// Map a raw table index (`0..=9` digits, `10` colon, `11` blank, `12` bar).
    #[must_use]
    pub fn from_index(value: u8) -> Option<Self> {
        match value {
            0..=9 => Some(Self::Digit(value)),
            10 => Some(Self::Colon),
            11 => Some(Self::Blank),
            12 => Some(Self::Bar),
            _ => None,
        }
    }

    /// Glyph for the last decimal digit of `value`.
    #[must_use]
    pub fn digit(value: u64) -> Self {
        Self::Digit((value % 10) as u8)
    }

    #[must_use]
    pub fn rows(self) -> &'static [&'static str; GLYPH_HEIGHT] {
        match self {
            Self::Digit(d) => &DIGITS[usize::from(d % 10)],
            Self::Colon => &COLON,
            Self::Blank => &BLANK,
            Self::Bar => &BAR,
        }
    }

    /// Width in columns of every row of this glyph.
    #[must_use]
    pub fn width(self) -> usize {
        self.rows()[0].len()
    }
}

/// Draw `glyph` with its top-left corner at column `x`, row `y`.
pub fn draw_glyph(canvas: &mut Canvas<'_>, glyph: Glyph, x: i32, y: i32) -> io::Result<()> {
    for (offset, line) in glyph.rows().iter().enumerate() {
        canvas.put(x, y + offset as i32, line)?;
    }
    Ok(())
}
