//! CGA color palette
//!
//! The classic 16-entry palette, indexed by the 4-bit attribute fields.
//! Attribute indices are stored unchecked; this module is the only place
//! where the 4-bit range is enforced (by masking at lookup).

use serde::{Deserialize, Serialize};

/// Number of palette entries.
pub const NUM_COLORS: usize = 16;

/// The 16 CGA colors, in hardware order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum Color {
    Black,
    Blue,
    Green,
    Cyan,
    Red,
    Magenta,
    Brown,
    White,
    Gray,
    BrightBlue,
    BrightGreen,
    BrightCyan,
    BrightRed,
    BrightMagenta,
    Yellow,
    BrightWhite,
}

impl From<Color> for u8 {
    fn from(color: Color) -> u8 {
        color as u8
    }
}

/// RGB values for the 16 CGA colors (opaque asset table).
const PALETTE: [(u8, u8, u8); NUM_COLORS] = [
    (0x00, 0x00, 0x00), // black
    (0x00, 0x00, 0xAA), // blue
    (0x00, 0xAA, 0x00), // green
    (0x00, 0xAA, 0xAA), // cyan
    (0xAA, 0x00, 0x00), // red
    (0xAA, 0x00, 0xAA), // magenta
    (0xAA, 0x55, 0x00), // brown
    (0xAA, 0xAA, 0xAA), // white
    (0x55, 0x55, 0x55), // gray
    (0x55, 0x55, 0xFF), // bright blue
    (0x55, 0xFF, 0x55), // bright green
    (0x55, 0xFF, 0xFF), // bright cyan
    (0xFF, 0x55, 0x55), // bright red
    (0xFF, 0x55, 0xFF), // bright magenta
    (0xFF, 0xFF, 0x55), // yellow
    (0xFF, 0xFF, 0xFF), // bright white
];

/// Look up a palette index as RGB. Out-of-range indices wrap into the
/// 4-bit range; this is the only range enforcement for attribute colors.
pub fn rgb(index: u8) -> (u8, u8, u8) {
    PALETTE[(index & 0x0F) as usize]
}

/// Look up a palette index as a packed opaque `0xAARRGGBB` pixel.
pub fn pixel(index: u8) -> u32 {
    let (r, g, b) = rgb(index);
    pack(r, g, b)
}

/// Pack RGB into an opaque `0xAARRGGBB` pixel.
pub fn pack(r: u8, g: u8, b: u8) -> u32 {
    0xFF00_0000 | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// Fully transparent pixel (alpha 0).
pub const TRANSPARENT: u32 = 0;
