//! Frame Pacer
//!
//! Blocks the render loop until a target frame interval has elapsed and
//! reports the frame delta. Single-threaded by design; the only state is
//! the timestamp of the previous call.

use std::time::{Duration, Instant};

/// Caps the frame rate of the calling loop.
#[derive(Debug, Default)]
pub struct FramePacer {
    last: Option<Instant>,
}

impl FramePacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep-wait until at least `1000/fps` ms have passed since the
    /// previous call, then return the elapsed time in seconds. The first
    /// call returns immediately with a zero delta.
    pub fn limit(&mut self, fps: u32) -> f32 {
        let interval = Duration::from_millis(1000 / u64::from(fps.max(1)));

        let last = match self.last {
            Some(last) => last,
            None => {
                self.last = Some(Instant::now());
                return 0.0;
            }
        };

        let mut now = Instant::now();
        while now.duration_since(last) < interval {
            std::thread::sleep(Duration::from_millis(1));
            now = Instant::now();
        }

        self.last = Some(now);
        now.duration_since(last).as_secs_f32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_call_does_not_block() {
        let mut pacer = FramePacer::new();
        let start = Instant::now();
        let dt = pacer.limit(30);
        assert_eq!(dt, 0.0);
        assert!(start.elapsed() < Duration::from_millis(20));
    }

    #[test]
    fn test_second_call_waits_for_interval() {
        let mut pacer = FramePacer::new();
        pacer.limit(100);
        let dt = pacer.limit(100);
        // 100 fps target: at least ~10ms between frames.
        assert!(dt >= 0.009, "frame delta {dt} shorter than interval");
    }

    #[test]
    fn test_zero_fps_is_clamped() {
        // fps 0 must not divide by zero; the first call never blocks.
        let mut pacer = FramePacer::new();
        assert_eq!(pacer.limit(0), 0.0);
    }
}
