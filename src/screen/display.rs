//! Display backend seam
//!
//! The screen compositor talks to a window through this trait so the
//! engine can run headless in tests and under a real window in the gui
//! feature.

use crate::core::Surface;

use super::ScreenError;

/// A presentation target: a window (or a stand-in) with a pixel size, a
/// fullscreen mode, and a way to show a composed frame.
pub trait Display {
    /// Current drawable size in pixels. While fullscreen this is the
    /// native display size, not the windowed size.
    fn size(&self) -> (usize, usize);

    /// Resize the windowed surface and re-center it. Ignored while
    /// fullscreen.
    fn resize(&mut self, width: usize, height: usize);

    /// Enter or leave fullscreen.
    fn set_fullscreen(&mut self, fullscreen: bool);

    /// Show one composed frame.
    fn present(&mut self, frame: &Surface) -> Result<(), ScreenError>;
}

/// Pure-state display for tests and headless use. Records the last
/// presented frame so compositor output can be inspected.
pub struct HeadlessDisplay {
    width: usize,
    height: usize,
    desktop: (usize, usize),
    fullscreen: bool,
    last_frame: Option<Surface>,
    frames_presented: usize,
}

impl HeadlessDisplay {
    /// A headless display with a 1920x1080 "desktop".
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_desktop(width, height, 1920, 1080)
    }

    /// A headless display with an explicit native desktop size, used when
    /// fullscreen behavior matters to a test.
    pub fn with_desktop(width: usize, height: usize, desktop_w: usize, desktop_h: usize) -> Self {
        Self {
            width,
            height,
            desktop: (desktop_w, desktop_h),
            fullscreen: false,
            last_frame: None,
            frames_presented: 0,
        }
    }

    /// The most recently presented frame.
    pub fn last_frame(&self) -> Option<&Surface> {
        self.last_frame.as_ref()
    }

    pub fn frames_presented(&self) -> usize {
        self.frames_presented
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }
}

impl Display for HeadlessDisplay {
    fn size(&self) -> (usize, usize) {
        if self.fullscreen {
            self.desktop
        } else {
            (self.width, self.height)
        }
    }

    fn resize(&mut self, width: usize, height: usize) {
        if !self.fullscreen {
            self.width = width;
            self.height = height;
        }
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        self.fullscreen = fullscreen;
    }

    fn present(&mut self, frame: &Surface) -> Result<(), ScreenError> {
        self.last_frame = Some(frame.clone());
        self.frames_presented += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fullscreen_reports_desktop_size() {
        let mut display = HeadlessDisplay::with_desktop(640, 400, 2560, 1440);
        assert_eq!(display.size(), (640, 400));

        display.set_fullscreen(true);
        assert_eq!(display.size(), (2560, 1440));

        display.set_fullscreen(false);
        assert_eq!(display.size(), (640, 400));
    }

    #[test]
    fn test_present_records_frame() {
        let mut display = HeadlessDisplay::new(32, 16);
        assert!(display.last_frame().is_none());

        let frame = Surface::new(32, 16);
        display.present(&frame).unwrap();
        assert_eq!(display.frames_presented(), 1);
        assert_eq!(display.last_frame().unwrap().width(), 32);
    }
}
