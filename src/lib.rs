//! Textmode
//!
//! A DOS-era character-mode display engine: a fixed grid of colored glyph
//! cells, sixteen double-buffered pages, a blinking cursor, and integer
//! window scaling with fullscreen presentation.
//!
//! - `core`: cells, character grid, glyph rasterization, console pages
//! - `screen`: the 16-page pool, compositor, scale state machine, pacer
//! - `gui`: winit/softbuffer window backend (optional feature)

pub mod core;
pub mod screen;

#[cfg(feature = "gui")]
pub mod gui;

pub use crate::core::{Attributes, CharCell, Color, Console, CursorShape, Mode};
pub use crate::screen::{
    Display, FramePacer, HeadlessDisplay, Screen, ScreenError, ScreenOptions, NUM_PAGES,
};
