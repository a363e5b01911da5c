//! Textmode demo
//!
//! A small exercise of the engine: corner markers, color bars, page
//! switching, window scaling, and fullscreen, driven by the keyboard.

use std::process::ExitCode;

use tracing::{error, info};

use textmode::gui::{self, InputEvent, WinitDisplay};
use textmode::{Color, CursorShape, Mode, Screen, ScreenError, ScreenOptions};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("starting textmode demo");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("fatal error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), ScreenError> {
    let options = ScreenOptions {
        title: "textmode demo".to_string(),
        width: 80,
        height: 35,
        mode: Mode::Normal,
        border_size: 8,
    };
    let mut screen = gui::create_screen(&options)?;

    let (w, h) = (options.width as i32, options.height as i32);

    // Corner markers.
    for (x, y) in [(0, 0), (w - 1, 0), (0, h - 1), (w - 1, h - 1)] {
        screen.goto_xy(x, y);
        screen.print_char(b'X');
    }

    // Background colors.
    screen.goto_xy(2, 2);
    for ch in b'A'..=b'Z' {
        screen.set_background(ch % 16);
        screen.print_char(ch);
    }

    // Foreground colors.
    screen.goto_xy(2, 3);
    screen.set_background(Color::Black);
    for ch in b'A'..=b'Z' {
        screen.set_foreground(ch % 16);
        screen.print_char(ch);
    }

    screen.goto_xy(2, 4);
    screen.set_foreground(Color::White);
    screen.print_str("Hello there. Keys: 0/1/2 pages, +/- scale, \\ fullscreen, c clear");

    // Something on another page to make switching visible.
    screen.switch_page(1);
    screen.goto_xy(10, 10);
    screen.set_foreground(Color::BrightMagenta);
    screen.set_blink(true);
    screen.print_str("page one");
    screen.set_blink(false);
    screen.switch_page(0);
    screen.set_cursor_shape(CursorShape::Normal);

    let mut frame: u32 = 0;
    loop {
        screen.limit_frame_rate(30);

        for event in screen.display_mut().poll_events() {
            if !handle_event(&mut screen, event) {
                return Ok(());
            }
        }

        // A spinner that cycles through the bright colors.
        screen.goto_xy(20, 20);
        screen.set_foreground(8 + (frame / 8 % 8) as u8);
        screen.print_char(b"|/-\\"[frame as usize % 4]);

        screen.draw()?;
        frame = frame.wrapping_add(1);
    }
}

fn handle_event(screen: &mut Screen<WinitDisplay>, event: InputEvent) -> bool {
    match event {
        InputEvent::CloseRequested | InputEvent::Escape => return false,
        InputEvent::Char(c) => match c {
            '0' => screen.switch_page(0),
            '1' => screen.switch_page(1),
            '2' => screen.switch_page(2),
            'c' => screen.clear_screen(),
            '\\' => screen.toggle_fullscreen(),
            '=' | '+' => screen.increase_screen_scale(),
            '-' => screen.decrease_screen_scale(),
            _ => {}
        },
    }
    true
}
