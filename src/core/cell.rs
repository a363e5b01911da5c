//! Console Cell
//!
//! Represents a single cell in the character grid: one character code plus
//! its display attributes.

use serde::{Deserialize, Serialize};

/// Display attributes for one cell.
///
/// The color fields are 4-bit palette indices but are stored as full bytes;
/// assignment accepts any value and the range is enforced only when the
/// palette is consulted at render time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    /// Foreground palette index
    pub fg: u8,
    /// Background palette index
    pub bg: u8,
    /// Background pixels are left transparent instead of painted
    pub transparent: bool,
    /// Text blinks
    pub blink: bool,
}

/// A single cell in the character grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharCell {
    /// Character code (0-255, CP437-style)
    pub code: u8,
    /// Display attributes
    pub attr: Attributes,
}

impl CharCell {
    /// Create a cell with the given code and plain attributes.
    pub fn new(code: u8) -> Self {
        Self {
            code,
            attr: Attributes::default(),
        }
    }

    /// Create a cell with explicit colors.
    pub fn with_colors(code: u8, fg: u8, bg: u8) -> Self {
        Self {
            code,
            attr: Attributes {
                fg,
                bg,
                transparent: false,
                blink: false,
            },
        }
    }

    /// Reset the cell to the zeroed default.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cell_is_zeroed() {
        let cell = CharCell::default();
        assert_eq!(cell.code, 0);
        assert_eq!(cell.attr.fg, 0);
        assert_eq!(cell.attr.bg, 0);
        assert!(!cell.attr.transparent);
        assert!(!cell.attr.blink);
    }

    #[test]
    fn test_attributes_accept_any_index() {
        // Range matters only at palette lookup, not at assignment.
        let cell = CharCell::with_colors(b'A', 200, 77);
        assert_eq!(cell.attr.fg, 200);
        assert_eq!(cell.attr.bg, 77);
    }

    #[test]
    fn test_cell_clear() {
        let mut cell = CharCell::with_colors(b'A', 14, 1);
        cell.attr.blink = true;
        cell.clear();
        assert_eq!(cell, CharCell::default());
    }
}
