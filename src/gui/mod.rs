//! GUI backend
//!
//! A [`Display`] implementation over a real window: winit for window
//! management and event pumping, softbuffer for CPU presentation of the
//! composed frame.

use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::Duration;

use tracing::info;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, Event as WinitEvent, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::{Key, NamedKey};
use winit::platform::pump_events::EventLoopExtPumpEvents;
use winit::window::{Fullscreen, Window, WindowBuilder};

use crate::core::font::CHAR_WIDTH;
use crate::core::Surface;
use crate::screen::{Display, Screen, ScreenError, ScreenOptions};

/// Events the demo loop cares about. The engine itself consumes no input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    CloseRequested,
    Escape,
    Char(char),
}

/// A winit window presented to with softbuffer.
pub struct WinitDisplay {
    event_loop: EventLoop<()>,
    window: Rc<Window>,
    // The context owns the display connection; it must outlive the surface.
    _context: softbuffer::Context<Rc<Window>>,
    surface: softbuffer::Surface<Rc<Window>, Rc<Window>>,
    fullscreen: bool,
}

impl WinitDisplay {
    /// Open a window sized to the console's minimum area at scale 1.
    pub fn new(options: &ScreenOptions) -> Result<Self, ScreenError> {
        let event_loop =
            EventLoop::new().map_err(|e| ScreenError::WindowCreation(e.to_string()))?;

        let width = options.width * CHAR_WIDTH + 2 * options.border_size;
        let height = options.height * options.mode.glyph_height() + 2 * options.border_size;

        let window = WindowBuilder::new()
            .with_title(&options.title)
            .with_inner_size(PhysicalSize::new(width as u32, height as u32))
            .with_resizable(false)
            .build(&event_loop)
            .map_err(|e| ScreenError::WindowCreation(e.to_string()))?;
        let window = Rc::new(window);

        let context = softbuffer::Context::new(window.clone())
            .map_err(|e| ScreenError::GraphicsContext(e.to_string()))?;
        let surface = softbuffer::Surface::new(&context, window.clone())
            .map_err(|e| ScreenError::SurfaceCreation(e.to_string()))?;

        info!(title = %options.title, width, height, "window created");

        Ok(Self {
            event_loop,
            window,
            _context: context,
            surface,
            fullscreen: false,
        })
    }

    /// Drain pending window events without blocking.
    pub fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let _ = self
            .event_loop
            .pump_events(Some(Duration::ZERO), |event, _| {
                let WinitEvent::WindowEvent { event, .. } = event else {
                    return;
                };
                match event {
                    WindowEvent::CloseRequested => events.push(InputEvent::CloseRequested),
                    WindowEvent::KeyboardInput { event, .. } => {
                        if event.state != ElementState::Pressed {
                            return;
                        }
                        match &event.logical_key {
                            Key::Named(NamedKey::Escape) => events.push(InputEvent::Escape),
                            Key::Character(text) => {
                                if let Some(c) = text.chars().next() {
                                    events.push(InputEvent::Char(c));
                                }
                            }
                            _ => {}
                        }
                    }
                    _ => {}
                }
            });
        events
    }

    fn center(&self) {
        if let Some(monitor) = self.window.current_monitor() {
            let monitor_size = monitor.size();
            let window_size = self.window.outer_size();
            let x = monitor_size.width.saturating_sub(window_size.width) / 2;
            let y = monitor_size.height.saturating_sub(window_size.height) / 2;
            self.window
                .set_outer_position(PhysicalPosition::new(x as i32, y as i32));
        }
    }
}

impl Display for WinitDisplay {
    fn size(&self) -> (usize, usize) {
        let size = self.window.inner_size();
        (size.width as usize, size.height as usize)
    }

    fn resize(&mut self, width: usize, height: usize) {
        if self.fullscreen {
            return;
        }
        let _ = self
            .window
            .request_inner_size(PhysicalSize::new(width as u32, height as u32));
        self.center();
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        self.fullscreen = fullscreen;
        self.window
            .set_fullscreen(fullscreen.then(|| Fullscreen::Borderless(None)));
    }

    fn present(&mut self, frame: &Surface) -> Result<(), ScreenError> {
        let (width, height) = self.size();
        let (Some(w), Some(h)) = (
            NonZeroU32::new(width as u32),
            NonZeroU32::new(height as u32),
        ) else {
            return Ok(());
        };

        self.surface
            .resize(w, h)
            .map_err(|e| ScreenError::SurfaceCreation(e.to_string()))?;
        let mut buffer = self
            .surface
            .buffer_mut()
            .map_err(|e| ScreenError::Present(e.to_string()))?;

        // The frame can briefly disagree with the window size around a
        // resize; copy the overlap. Softbuffer pixels are 0RGB.
        for y in 0..height.min(frame.height()) {
            for x in 0..width.min(frame.width()) {
                buffer[y * width + x] = frame.pixel(x, y) & 0x00FF_FFFF;
            }
        }

        buffer
            .present()
            .map_err(|e| ScreenError::Present(e.to_string()))
    }
}

/// Open a window and build a [`Screen`] over it.
pub fn create_screen(options: &ScreenOptions) -> Result<Screen<WinitDisplay>, ScreenError> {
    let display = WinitDisplay::new(options)?;
    Ok(Screen::new(display, options))
}
