//! Core console model
//!
//! The logical side of the engine: attributed cells, the fixed character
//! grid, bitmap glyph rasterization, blink phases, and the console page
//! that ties them together. Nothing in here touches a window.

pub mod cell;
pub mod clock;
pub mod console;
pub mod font;
pub mod grid;
pub mod palette;
pub mod surface;

pub use cell::{Attributes, CharCell};
pub use clock::{Clock, ManualClock, SystemClock};
pub use console::{Console, CursorShape};
pub use font::{Mode, CHAR_WIDTH};
pub use grid::CharGrid;
pub use palette::Color;
pub use surface::Surface;
