//! Screen behavior tests
//!
//! Page pool routing, the scale/fullscreen state machine, and the
//! centering invariant over arbitrary sequences of transitions, all over
//! the headless display backend.

use std::rc::Rc;

use proptest::prelude::*;

use textmode::core::ManualClock;
use textmode::{Display, HeadlessDisplay, Mode, Screen, ScreenOptions};

fn options() -> ScreenOptions {
    ScreenOptions {
        width: 80,
        height: 25,
        mode: Mode::Normal,
        border_size: 8,
        ..Default::default()
    }
}

fn screen() -> Screen<HeadlessDisplay> {
    let display = HeadlessDisplay::with_desktop(1, 1, 2560, 1440);
    Screen::with_clock(display, &options(), Rc::new(ManualClock::new(0)))
}

#[test]
fn pages_are_independent_buffers() {
    let mut screen = screen();
    for page in 0..16 {
        screen.switch_page(page);
        screen.goto_xy(page, 0);
        screen.print_char(b'a' + page as u8);
    }

    for page in 0..16usize {
        let console = screen.page(page).unwrap();
        assert_eq!(
            console.cell(page, 0).unwrap().code,
            b'a' + page as u8,
            "page {page}"
        );
        // Each page only got its own write.
        let other = (page + 1) % 16;
        assert_eq!(console.cell(other, 0).unwrap().code, 0);
    }
}

#[test]
fn draw_presents_one_frame_per_call() {
    let mut screen = screen();
    screen.draw().unwrap();
    screen.draw().unwrap();
    assert_eq!(screen.display().frames_presented(), 2);

    let frame = screen.display().last_frame().unwrap();
    let (w, h) = screen.display().size();
    assert_eq!((frame.width(), frame.height()), (w, h));
}

#[test]
fn fullscreen_blocks_window_scaling() {
    let mut screen = screen();
    screen.set_fullscreen(true);
    let size_before = screen.display().size();

    screen.set_screen_scale(4);
    screen.increase_screen_scale();
    assert_eq!(screen.window_scale(), 1);
    assert_eq!(screen.display().size(), size_before);

    screen.set_fullscreen(false);
    screen.set_screen_scale(2);
    assert_eq!(screen.window_scale(), 2);
}

#[derive(Debug, Clone)]
enum Transition {
    SetScale(i32),
    SetFullscreen(bool),
    Toggle,
    Increase,
    Decrease,
}

fn transition() -> impl Strategy<Value = Transition> {
    prop_oneof![
        (-2i32..8).prop_map(Transition::SetScale),
        any::<bool>().prop_map(Transition::SetFullscreen),
        Just(Transition::Toggle),
        Just(Transition::Increase),
        Just(Transition::Decrease),
    ]
}

proptest! {
    #[test]
    fn switch_page_accepts_only_valid_indices(pages in proptest::collection::vec(-5i32..25, 0..40)) {
        let mut screen = screen();
        let mut expected = 0usize;
        for page in pages {
            screen.switch_page(page);
            if (0..16).contains(&page) {
                expected = page as usize;
            }
            prop_assert_eq!(screen.current_page(), expected);
        }
    }

    #[test]
    fn scale_state_machine_keeps_console_centered(
        transitions in proptest::collection::vec(transition(), 0..25)
    ) {
        let mut screen = screen();
        for t in transitions {
            match t {
                Transition::SetScale(n) => screen.set_screen_scale(n),
                Transition::SetFullscreen(on) => screen.set_fullscreen(on),
                Transition::Toggle => screen.toggle_fullscreen(),
                Transition::Increase => screen.increase_screen_scale(),
                Transition::Decrease => screen.decrease_screen_scale(),
            }

            // Scale is always a positive integer.
            let scale = screen.render_scale();
            prop_assert!(scale >= 1);
            prop_assert!(screen.window_scale() >= 1);

            // The console stays centered within the window's logical size.
            let (win_w, win_h) = screen.display().size();
            let console = screen.page(0).unwrap();
            let (cw, ch) = console.pixel_size();
            let (rx, ry) = screen.render_offset();
            prop_assert_eq!(rx, (win_w as i32 / scale as i32 - cw as i32) / 2);
            prop_assert_eq!(ry, (win_h as i32 / scale as i32 - ch as i32) / 2);

            // Height-driven fit: the minimum area at the chosen scale
            // fits the window unless even scale 1 does not.
            let min_h = ch + 2 * 8;
            if scale > 1 {
                prop_assert!(min_h * scale <= win_h);
            }
            prop_assert!(min_h * (scale + 1) > win_h);
        }
    }
}
