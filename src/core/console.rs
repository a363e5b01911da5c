//! Console page
//!
//! One console owns a character grid, the pixel surface its glyphs are
//! rasterized into, and the cursor state. Printing mutates the grid cell
//! under the cursor and immediately repaints that cell's pixels, so the
//! surface always reflects the grid.
//!
//! There is no scrolling: printing past the end of the last row clamps the
//! cursor at the bottom-right corner. Bottom-row overflow is absorbed, a
//! documented limitation of the original hardware-style model.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::cell::CharCell;
use super::clock::{self, Clock};
use super::font::{self, Mode, CHAR_WIDTH};
use super::grid::CharGrid;
use super::palette::{self, Color};
use super::surface::Surface;

/// Default tab stop width.
pub const DEFAULT_TAB_SIZE: usize = 4;

/// Cursor overlay appearance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CursorShape {
    /// No cursor overlay
    None,
    /// Bottom 20% of the cell
    #[default]
    Normal,
    /// The entire cell
    Full,
}

/// One console page: grid + surface + cursor.
pub struct Console {
    mode: Mode,
    grid: CharGrid,
    surface: Surface,
    cursor_x: usize,
    cursor_y: usize,
    fg: u8,
    bg: u8,
    tab_size: usize,
    margin: usize,
    blink: bool,
    scale: usize,
    cursor_shape: CursorShape,
    clock: Rc<dyn Clock>,
}

impl Console {
    /// Create a fully initialized console: cleared grid, cursor at the
    /// origin, white on black.
    pub fn new(width: usize, height: usize, mode: Mode, clock: Rc<dyn Clock>) -> Self {
        let mut console = Self {
            mode,
            grid: CharGrid::new(width, height),
            surface: Surface::new(width * CHAR_WIDTH, height * mode.glyph_height()),
            cursor_x: 0,
            cursor_y: 0,
            fg: Color::White.into(),
            bg: Color::Black.into(),
            tab_size: DEFAULT_TAB_SIZE,
            margin: 0,
            blink: false,
            scale: 1,
            cursor_shape: CursorShape::default(),
            clock,
        };
        console.clear();
        console
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn cursor_x(&self) -> usize {
        self.cursor_x
    }

    pub fn cursor_y(&self) -> usize {
        self.cursor_y
    }

    pub fn foreground(&self) -> u8 {
        self.fg
    }

    pub fn background(&self) -> u8 {
        self.bg
    }

    pub fn tab_size(&self) -> usize {
        self.tab_size
    }

    pub fn margin(&self) -> usize {
        self.margin
    }

    pub fn scale(&self) -> usize {
        self.scale
    }

    pub fn cursor_shape(&self) -> CursorShape {
        self.cursor_shape
    }

    /// The rasterized pixel surface for this page.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Surface size in pixels: `width*8` by `height*glyph_height`.
    pub fn pixel_size(&self) -> (usize, usize) {
        (self.surface.width(), self.surface.height())
    }

    /// Read a cell without touching the cursor.
    pub fn cell(&self, x: usize, y: usize) -> Option<&CharCell> {
        self.grid.cell(x, y)
    }

    // ------------------------------------------------------------------
    // Cursor
    // ------------------------------------------------------------------

    /// Move the cursor. Out-of-bounds coordinates are silently ignored.
    pub fn goto_xy(&mut self, x: i32, y: i32) {
        if x >= 0 && (x as usize) < self.width() && y >= 0 && (y as usize) < self.height() {
            self.cursor_x = x as usize;
            self.cursor_y = y as usize;
        }
    }

    /// Move the cursor right. Running off the row clamps to the last
    /// column and takes a new line.
    pub fn advance(&mut self, amount: usize) {
        self.cursor_x += amount;
        if self.cursor_x >= self.width() {
            self.cursor_x = self.width() - 1;
            self.newline();
        }
    }

    /// Return to the margin on the next row. On the last row the cursor
    /// does not move; nothing scrolls.
    pub fn newline(&mut self) {
        if self.cursor_y < self.height() - 1 {
            self.cursor_x = self.margin;
            self.cursor_y += 1;
        }
    }

    // ------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------

    /// Set the default foreground index for subsequent prints. Any value
    /// is accepted; the palette wraps out-of-range indices at render time.
    pub fn set_foreground<C: Into<u8>>(&mut self, color: C) {
        self.fg = color.into();
    }

    /// Set the default background index for subsequent prints.
    pub fn set_background<C: Into<u8>>(&mut self, color: C) {
        self.bg = color.into();
    }

    /// Whether newly printed characters blink.
    pub fn set_blink(&mut self, blink: bool) {
        self.blink = blink;
    }

    /// Set the tab stop width. Values below 1 are ignored.
    pub fn set_tab_size(&mut self, tab_size: usize) {
        if tab_size >= 1 {
            self.tab_size = tab_size;
        }
    }

    /// Set the column newlines return to, clamped to the grid.
    pub fn set_margin(&mut self, margin: usize) {
        self.margin = margin.min(self.width() - 1);
    }

    pub fn set_cursor_shape(&mut self, shape: CursorShape) {
        self.cursor_shape = shape;
    }

    /// Set the cell scale used when this page is composited. Values below
    /// 1 are ignored.
    pub fn set_scale(&mut self, scale: usize) {
        if scale >= 1 {
            self.scale = scale;
        }
    }

    // ------------------------------------------------------------------
    // Printing
    // ------------------------------------------------------------------

    /// Zero every cell, clear the surface, home the cursor, and reset the
    /// default colors to white on black. Tab size, margin, cursor shape,
    /// and scale are untouched.
    pub fn clear(&mut self) {
        self.grid.clear();
        self.surface.fill(palette::TRANSPARENT);
        self.cursor_x = 0;
        self.cursor_y = 0;
        self.fg = Color::White.into();
        self.bg = Color::Black.into();
    }

    /// Stamp the current default background into every cell's attributes.
    pub fn clear_background(&mut self) {
        let bg = self.bg;
        for cell in self.grid.cells_mut() {
            cell.attr.bg = bg;
        }
    }

    /// Mark every cell's background transparent.
    pub fn set_transparent_background(&mut self) {
        for cell in self.grid.cells_mut() {
            cell.attr.transparent = true;
        }
    }

    /// Print one character at the cursor: write the cell, rasterize it,
    /// then advance.
    pub fn print_char(&mut self, code: u8) {
        let (x, y) = (self.cursor_x, self.cursor_y);
        let mut cell = self.grid.get(x, y);
        cell.code = code;
        cell.attr.fg = self.fg;
        cell.attr.bg = self.bg;
        cell.attr.blink = self.blink;
        self.grid.set(x, y, cell);
        self.rasterize_cell(x, y);
        self.advance(1);
    }

    /// Print a pre-formatted string. `'\n'` takes a new line, `'\t'`
    /// advances to the next tab stop, everything else prints. Characters
    /// above U+00FF print as `?`.
    pub fn print_str(&mut self, text: &str) {
        for ch in text.chars() {
            match ch {
                '\n' => self.newline(),
                '\t' => self.tab(),
                _ => {
                    let code = if (ch as u32) <= 0xFF { ch as u8 } else { b'?' };
                    self.print_char(code);
                }
            }
        }
    }

    /// Advance to the next column that is a multiple of the tab size.
    pub fn tab(&mut self) {
        loop {
            let before = (self.cursor_x, self.cursor_y);
            self.advance(1);
            if self.cursor_x % self.tab_size == 0 {
                break;
            }
            // Pinned at the bottom-right corner; stop instead of spinning.
            if (self.cursor_x, self.cursor_y) == before {
                break;
            }
        }
    }

    /// Write a raw cell at the cursor. No rasterization; callers repaint
    /// if they want the change visible.
    pub fn set_char(&mut self, cell: CharCell) {
        self.grid.set(self.cursor_x, self.cursor_y, cell);
    }

    /// Read the raw cell at the cursor.
    pub fn get_char(&self) -> CharCell {
        self.grid.get(self.cursor_x, self.cursor_y)
    }

    // ------------------------------------------------------------------
    // Rasterization
    // ------------------------------------------------------------------

    /// Paint one cell's glyph onto the surface. Set bits take the
    /// foreground color (background while a blinking cell is in its "off"
    /// phase); clear bits take the background, or stay transparent when
    /// the cell's transparency flag is set.
    fn rasterize_cell(&mut self, x: usize, y: usize) {
        let cell = self.grid.get(x, y);
        let rows = font::glyph(self.mode, cell.code);

        let blink_on = clock::char_blink_on(self.clock.now_ms());
        let fg = if cell.attr.blink && !blink_on {
            palette::pixel(cell.attr.bg)
        } else {
            palette::pixel(cell.attr.fg)
        };
        let bg = if cell.attr.transparent {
            palette::TRANSPARENT
        } else {
            palette::pixel(cell.attr.bg)
        };

        let px = x * CHAR_WIDTH;
        let py = y * self.mode.glyph_height();

        for (row, bits) in rows.iter().enumerate() {
            for bit in 0..CHAR_WIDTH {
                // MSB is the leftmost pixel.
                let on = bits & (0x80 >> bit) != 0;
                self.surface
                    .set_pixel(px + bit, py + row, if on { fg } else { bg });
            }
        }
    }
}
