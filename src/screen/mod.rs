//! Screen: page pool, compositor, scale state machine
//!
//! The screen owns sixteen console pages, routes the convenience API to
//! the active one, and composites that page's pixel surface onto the
//! display each frame: border fill, scaled blit, cursor overlay, present.
//!
//! Render scale is recomputed after every resize or mode change: the
//! largest integer scale whose minimum area (console pixels plus border)
//! still fits the window height, with the console centered at that scale.

mod display;
mod pacer;

pub use display::{Display, HeadlessDisplay};
pub use pacer::FramePacer;

use std::rc::Rc;

use thiserror::Error;
use tracing::{debug, info};

use crate::core::clock::{self, Clock, SystemClock};
use crate::core::font::CHAR_WIDTH;
use crate::core::palette;
use crate::core::{CharCell, Console, CursorShape, Mode, Surface};

/// Number of console pages in the pool.
pub const NUM_PAGES: usize = 16;

/// Fatal initialization or presentation failures. Everything else in the
/// engine is a silent no-op by policy.
#[derive(Debug, Error)]
pub enum ScreenError {
    #[error("could not create window: {0}")]
    WindowCreation(String),
    #[error("could not create graphics context: {0}")]
    GraphicsContext(String),
    #[error("could not create drawing surface: {0}")]
    SurfaceCreation(String),
    #[error("could not present frame: {0}")]
    Present(String),
}

/// Screen construction options.
#[derive(Debug, Clone)]
pub struct ScreenOptions {
    /// Window title (used by windowed backends)
    pub title: String,
    /// Console width in character columns
    pub width: usize,
    /// Console height in character rows
    pub height: usize,
    /// Glyph mode (cell height 8 or 16)
    pub mode: Mode,
    /// Border thickness in console pixels
    pub border_size: usize,
}

impl Default for ScreenOptions {
    fn default() -> Self {
        Self {
            title: "textmode".to_string(),
            width: 80,
            height: 25,
            mode: Mode::Normal,
            border_size: 0,
        }
    }
}

/// The screen: a fixed pool of console pages plus the display they are
/// composited onto.
pub struct Screen<D: Display> {
    pages: [Console; NUM_PAGES],
    active: usize,
    mode: Mode,
    border_size: usize,
    border_color: u8,
    render_x: i32,
    render_y: i32,
    render_scale: usize,
    window_scale: usize,
    fullscreen: bool,
    display: D,
    clock: Rc<dyn Clock>,
    pacer: FramePacer,
}

impl<D: Display> Screen<D> {
    /// Create a screen over the given display, allocating all sixteen
    /// pages up front. The display window is sized to the console plus
    /// border at scale 1.
    pub fn new(display: D, options: &ScreenOptions) -> Self {
        Self::with_clock(display, options, Rc::new(SystemClock::new()))
    }

    /// As [`Screen::new`] with an injected clock, for deterministic blink
    /// phases.
    pub fn with_clock(display: D, options: &ScreenOptions, clock: Rc<dyn Clock>) -> Self {
        let pages: [Console; NUM_PAGES] = std::array::from_fn(|_| {
            Console::new(options.width, options.height, options.mode, clock.clone())
        });

        let mut screen = Self {
            pages,
            active: 0,
            mode: options.mode,
            border_size: options.border_size,
            border_color: 0,
            render_x: 0,
            render_y: 0,
            render_scale: 1,
            window_scale: 1,
            fullscreen: false,
            display,
            clock,
            pacer: FramePacer::new(),
        };

        let (w, h) = screen.unscaled_window_size();
        screen.display.resize(w, h);
        screen.update_render_layout();

        info!(
            width = options.width,
            height = options.height,
            mode = ?options.mode,
            border = options.border_size,
            "screen initialized"
        );
        screen
    }

    // ------------------------------------------------------------------
    // Page routing
    // ------------------------------------------------------------------

    /// Switch the active page. Indices outside `[0, 16)` are ignored.
    pub fn switch_page(&mut self, page: i32) {
        if page >= 0 && (page as usize) < NUM_PAGES {
            self.active = page as usize;
        }
    }

    /// Index of the active page.
    pub fn current_page(&self) -> usize {
        self.active
    }

    /// Read access to any page.
    pub fn page(&self, page: usize) -> Option<&Console> {
        self.pages.get(page)
    }

    fn console(&self) -> &Console {
        &self.pages[self.active]
    }

    fn console_mut(&mut self) -> &mut Console {
        &mut self.pages[self.active]
    }

    pub fn clear_screen(&mut self) {
        self.console_mut().clear();
    }

    pub fn clear_background(&mut self) {
        self.console_mut().clear_background();
    }

    pub fn set_transparent_background(&mut self) {
        self.console_mut().set_transparent_background();
    }

    pub fn print_char(&mut self, code: u8) {
        self.console_mut().print_char(code);
    }

    pub fn print_str(&mut self, text: &str) {
        self.console_mut().print_str(text);
    }

    pub fn goto_xy(&mut self, x: i32, y: i32) {
        self.console_mut().goto_xy(x, y);
    }

    pub fn cursor_x(&self) -> usize {
        self.console().cursor_x()
    }

    pub fn cursor_y(&self) -> usize {
        self.console().cursor_y()
    }

    pub fn set_foreground<C: Into<u8>>(&mut self, color: C) {
        self.console_mut().set_foreground(color);
    }

    pub fn set_background<C: Into<u8>>(&mut self, color: C) {
        self.console_mut().set_background(color);
    }

    pub fn set_blink(&mut self, blink: bool) {
        self.console_mut().set_blink(blink);
    }

    pub fn set_tab_size(&mut self, tab_size: usize) {
        self.console_mut().set_tab_size(tab_size);
    }

    pub fn set_margin(&mut self, margin: usize) {
        self.console_mut().set_margin(margin);
    }

    pub fn set_cursor_shape(&mut self, shape: CursorShape) {
        self.console_mut().set_cursor_shape(shape);
    }

    /// Cell scale of the active page (not the window scale).
    pub fn set_page_scale(&mut self, scale: usize) {
        self.console_mut().set_scale(scale);
    }

    pub fn set_char(&mut self, cell: CharCell) {
        self.console_mut().set_char(cell);
    }

    pub fn get_char(&self) -> CharCell {
        self.console().get_char()
    }

    pub fn set_border_color<C: Into<u8>>(&mut self, color: C) {
        self.border_color = color.into();
    }

    // ------------------------------------------------------------------
    // Scale & fullscreen state machine
    // ------------------------------------------------------------------

    /// Console pixel size plus border on both sides: the smallest window
    /// that shows the whole console at scale 1.
    fn unscaled_window_size(&self) -> (usize, usize) {
        let (w, h) = self.console().pixel_size();
        (w + 2 * self.border_size, h + 2 * self.border_size)
    }

    /// Recompute render scale and offset against the current window. The
    /// scale is the largest integer that fits the minimum area's height;
    /// the offset centers the console at that scale.
    fn update_render_layout(&mut self) {
        let (win_w, win_h) = self.display.size();
        let (console_w, console_h) = self.console().pixel_size();
        let (_, min_h) = self.unscaled_window_size();

        // Assume the display is wider than it is tall: fit by height.
        let mut scale = 1;
        while min_h * (scale + 1) <= win_h {
            scale += 1;
        }

        self.render_scale = scale;
        self.render_x = (win_w as i32 / scale as i32 - console_w as i32) / 2;
        self.render_y = (win_h as i32 / scale as i32 - console_h as i32) / 2;

        debug!(
            scale,
            render_x = self.render_x,
            render_y = self.render_y,
            win_w,
            win_h,
            "render layout updated"
        );
    }

    /// Switch between windowed and fullscreen, then recompute the layout.
    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.display.set_fullscreen(fullscreen);
        self.fullscreen = fullscreen;
        self.update_render_layout();
        info!(fullscreen, "display mode changed");
    }

    pub fn toggle_fullscreen(&mut self) {
        self.set_fullscreen(!self.fullscreen);
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Resize the window to `scale` times the minimum area and recenter.
    /// No-op while fullscreen or for scales below 1.
    pub fn set_screen_scale(&mut self, scale: i32) {
        if self.fullscreen || scale < 1 {
            return;
        }

        self.window_scale = scale as usize;
        let (w, h) = self.unscaled_window_size();
        self.display.resize(w * self.window_scale, h * self.window_scale);
        self.update_render_layout();
    }

    pub fn increase_screen_scale(&mut self) {
        self.set_screen_scale(self.window_scale as i32 + 1);
    }

    pub fn decrease_screen_scale(&mut self) {
        self.set_screen_scale(self.window_scale as i32 - 1);
    }

    pub fn window_scale(&self) -> usize {
        self.window_scale
    }

    pub fn render_scale(&self) -> usize {
        self.render_scale
    }

    /// Render offset in logical (pre-scale) pixels.
    pub fn render_offset(&self) -> (i32, i32) {
        (self.render_x, self.render_y)
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    // ------------------------------------------------------------------
    // Compositor
    // ------------------------------------------------------------------

    /// Compose and present one frame.
    pub fn draw(&mut self) -> Result<(), ScreenError> {
        let frame = self.compose();
        self.display.present(&frame)
    }

    /// Compose a frame, let the caller draw over it, then present. The
    /// hook sees only the composed pixel surface, not console internals.
    pub fn draw_with<F>(&mut self, hook: F) -> Result<(), ScreenError>
    where
        F: FnOnce(&mut Surface),
    {
        let mut frame = self.compose();
        hook(&mut frame);
        self.display.present(&frame)
    }

    /// Border fill, scaled console blit, cursor overlay.
    fn compose(&self) -> Surface {
        let (win_w, win_h) = self.display.size();
        let mut frame = Surface::new(win_w, win_h);
        frame.fill(palette::pixel(self.border_color));

        let console = self.console();
        let scale = self.render_scale;
        let cell_scale = console.scale();
        let block = scale * cell_scale;
        let surface = console.surface();

        for cy in 0..surface.height() {
            for cx in 0..surface.width() {
                let pixel = surface.pixel(cx, cy);
                if pixel >> 24 == 0 {
                    // Transparent: let the border color show through.
                    continue;
                }
                let x = (self.render_x + (cx * cell_scale) as i32) * scale as i32;
                let y = (self.render_y + (cy * cell_scale) as i32) * scale as i32;
                frame.fill_rect(x, y, block, block, pixel);
            }
        }

        self.draw_cursor(&mut frame);
        frame
    }

    /// Cursor overlay: only when a shape is set and the 300 ms cursor
    /// cycle is in its visible half.
    fn draw_cursor(&self, frame: &mut Surface) {
        let console = self.console();
        let glyph_h = self.mode.glyph_height();
        let cell_scale = console.scale();

        let height = match console.cursor_shape() {
            CursorShape::None => return,
            CursorShape::Normal => glyph_h / 5,
            CursorShape::Full => glyph_h,
        };

        if !clock::cursor_blink_on(self.clock.now_ms()) {
            return;
        }

        // Logical cell origin, bottom-aligned for the normal shape.
        let x = self.render_x + (console.cursor_x() * CHAR_WIDTH * cell_scale) as i32;
        let y = self.render_y
            + ((console.cursor_y() * glyph_h + glyph_h - height) * cell_scale) as i32;

        let scale = self.render_scale as i32;
        frame.fill_rect(
            x * scale,
            y * scale,
            CHAR_WIDTH * cell_scale * self.render_scale,
            height * cell_scale * self.render_scale,
            palette::pixel(console.foreground()),
        );
    }

    /// Cap the frame rate; returns the frame delta in seconds.
    pub fn limit_frame_rate(&mut self, fps: u32) -> f32 {
        self.pacer.limit(fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Color, ManualClock};

    fn options(width: usize, height: usize, border: usize) -> ScreenOptions {
        ScreenOptions {
            width,
            height,
            border_size: border,
            ..Default::default()
        }
    }

    fn screen_with_clock(
        opts: &ScreenOptions,
        clock: Rc<ManualClock>,
    ) -> Screen<HeadlessDisplay> {
        // Window starts at the minimum area, like the real constructor.
        let display = HeadlessDisplay::new(1, 1);
        Screen::with_clock(display, opts, clock)
    }

    #[test]
    fn test_switch_page_bounds() {
        let mut screen = screen_with_clock(&options(40, 25, 0), Rc::new(ManualClock::new(0)));
        assert_eq!(screen.current_page(), 0);

        screen.switch_page(5);
        assert_eq!(screen.current_page(), 5);

        for bad in [-1, 16, 1000] {
            screen.switch_page(bad);
            assert_eq!(screen.current_page(), 5);
        }

        screen.switch_page(15);
        assert_eq!(screen.current_page(), 15);
    }

    #[test]
    fn test_routing_only_touches_active_page() {
        let mut screen = screen_with_clock(&options(40, 25, 0), Rc::new(ManualClock::new(0)));
        screen.print_str("page zero");

        screen.switch_page(1);
        screen.goto_xy(10, 10);
        screen.print_char(b'Z');

        assert_eq!(screen.page(1).unwrap().cell(10, 10).unwrap().code, b'Z');
        assert_eq!(screen.page(0).unwrap().cell(0, 0).unwrap().code, b'p');
        assert_eq!(screen.page(0).unwrap().cell(10, 10).unwrap().code, 0);

        // Inactive pages keep their cursor state too.
        assert_eq!(screen.page(0).unwrap().cursor_x(), 9);
    }

    #[test]
    fn test_initial_window_is_minimum_area() {
        let screen = screen_with_clock(&options(80, 25, 8), Rc::new(ManualClock::new(0)));
        let (w, h) = screen.display().size();
        assert_eq!(w, 80 * 8 + 16);
        assert_eq!(h, 25 * 16 + 16);
        assert_eq!(screen.render_scale(), 1);
    }

    #[test]
    fn test_screen_scale_resizes_and_centers() {
        let mut screen = screen_with_clock(&options(80, 25, 8), Rc::new(ManualClock::new(0)));
        screen.set_screen_scale(2);

        let (win_w, win_h) = screen.display().size();
        assert_eq!((win_w, win_h), ((80 * 8 + 16) * 2, (25 * 16 + 16) * 2));
        assert_eq!(screen.render_scale(), 2);

        // Centered: offset = (window/scale - console)/2 per axis.
        let (rx, ry) = screen.render_offset();
        assert_eq!(rx, (win_w as i32 / 2 - 80 * 8) / 2);
        assert_eq!(ry, (win_h as i32 / 2 - 25 * 16) / 2);
    }

    #[test]
    fn test_invalid_screen_scale_is_ignored() {
        let mut screen = screen_with_clock(&options(80, 25, 0), Rc::new(ManualClock::new(0)));
        screen.set_screen_scale(2);
        let size = screen.display().size();

        screen.set_screen_scale(0);
        screen.set_screen_scale(-3);
        assert_eq!(screen.display().size(), size);
        assert_eq!(screen.window_scale(), 2);
    }

    #[test]
    fn test_decrease_below_one_is_ignored() {
        let mut screen = screen_with_clock(&options(80, 25, 0), Rc::new(ManualClock::new(0)));
        screen.decrease_screen_scale();
        assert_eq!(screen.window_scale(), 1);
    }

    #[test]
    fn test_fullscreen_recomputes_scale() {
        let opts = options(80, 25, 8);
        let display = HeadlessDisplay::with_desktop(1, 1, 1920, 1080);
        let mut screen = Screen::with_clock(display, &opts, Rc::new(ManualClock::new(0)));

        screen.set_fullscreen(true);
        assert!(screen.is_fullscreen());
        // 1080 / (25*16 + 16) = 2.59...: integer scale 2.
        assert_eq!(screen.render_scale(), 2);
        let (rx, ry) = screen.render_offset();
        assert_eq!(rx, (1920 / 2 - 80 * 8) / 2);
        assert_eq!(ry, (1080 / 2 - 25 * 16) / 2);

        // Scaling is windowed-only.
        screen.set_screen_scale(3);
        assert_eq!(screen.window_scale(), 1);

        screen.set_fullscreen(false);
        assert_eq!(screen.render_scale(), 1);
    }

    #[test]
    fn test_draw_fills_border_and_blits_glyphs() {
        let clock = Rc::new(ManualClock::new(0));
        let mut screen = screen_with_clock(&options(4, 2, 4), clock);
        screen.set_border_color(Color::Blue);
        screen.set_cursor_shape(CursorShape::None);
        screen.set_foreground(Color::BrightWhite);
        screen.print_char(b'!');
        screen.draw().unwrap();

        let frame = screen.display().last_frame().unwrap();
        // Border pixel at the top-left corner.
        assert_eq!(frame.pixel(0, 0), palette::pixel(Color::Blue.into()));

        // The glyph cell lands at the render offset; its background is
        // the default black, distinct from the border.
        let (rx, ry) = screen.render_offset();
        assert_eq!(
            frame.pixel(rx as usize, ry as usize),
            palette::pixel(Color::Black.into())
        );
    }

    #[test]
    fn test_cursor_overlay_blinks_with_clock() {
        let clock = Rc::new(ManualClock::new(0));
        let mut screen = screen_with_clock(&options(4, 2, 0), clock.clone());
        screen.set_cursor_shape(CursorShape::Full);

        // On phase: cursor cell is filled with the foreground color.
        screen.draw().unwrap();
        let fg = palette::pixel(screen.page(0).unwrap().foreground());
        let (rx, ry) = screen.render_offset();
        let frame = screen.display().last_frame().unwrap();
        assert_eq!(frame.pixel(rx as usize, ry as usize), fg);

        // Off phase: the cell shows its own (black) pixels again.
        clock.set(150);
        screen.draw().unwrap();
        let frame = screen.display().last_frame().unwrap();
        assert_ne!(frame.pixel(rx as usize, ry as usize), fg);
    }

    #[test]
    fn test_cursor_shape_none_never_draws() {
        let clock = Rc::new(ManualClock::new(0));
        let mut screen = screen_with_clock(&options(4, 2, 0), clock);
        screen.set_cursor_shape(CursorShape::None);
        screen.draw().unwrap();

        let fg = palette::pixel(screen.page(0).unwrap().foreground());
        let frame = screen.display().last_frame().unwrap();
        let (rx, ry) = screen.render_offset();
        assert_ne!(frame.pixel(rx as usize, ry as usize), fg);
    }

    #[test]
    fn test_draw_with_hook_runs_over_frame() {
        let mut screen = screen_with_clock(&options(4, 2, 0), Rc::new(ManualClock::new(0)));
        screen
            .draw_with(|frame| {
                frame.set_pixel(0, 0, 0xFF12_3456);
            })
            .unwrap();
        let frame = screen.display().last_frame().unwrap();
        assert_eq!(frame.pixel(0, 0), 0xFF12_3456);
    }

    #[test]
    fn test_transparent_cells_show_border() {
        let mut screen = screen_with_clock(&options(4, 2, 0), Rc::new(ManualClock::new(0)));
        screen.set_border_color(Color::Green);
        screen.set_cursor_shape(CursorShape::None);
        screen.set_transparent_background();
        // Rasterize one cell with a transparent background.
        screen.print_char(b' ');
        screen.draw().unwrap();

        let frame = screen.display().last_frame().unwrap();
        let (rx, ry) = screen.render_offset();
        assert_eq!(
            frame.pixel(rx as usize, ry as usize),
            palette::pixel(Color::Green.into())
        );
    }
}
