use std::time::{Duration, Instant};

/// Timing for one redraw: ordinal, seconds since the loop started, and
/// seconds since the previous redraw.
#[derive(Debug, Clone, Copy)]
pub struct FrameInfo {
    pub number: u64,
    pub time: f32,
    pub delta: f32,
}

/// How often the FPS estimate refreshes.
const FPS_WINDOW: Duration = Duration::from_millis(500);

/// Clock driving the render loop. `tick()` once per redraw callback; the
/// clock never runs out. It also keeps a windowed FPS estimate so the
/// overlay readout does not flicker with per-frame noise.
pub struct FrameClock {
    next_frame: u64,
    started: Instant,
    last_tick: Instant,
    fps: f32,
    window_frames: u32,
    window_started: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            next_frame: 0,
            started: now,
            last_tick: now,
            fps: 0.0,
            window_frames: 0,
            window_started: now,
        }
    }

    /// Advance to the next frame and report its timing.
    pub fn tick(&mut self) -> FrameInfo {
        let now = Instant::now();
        let info = FrameInfo {
            number: self.next_frame,
            time: now.duration_since(self.started).as_secs_f32(),
            delta: now.duration_since(self.last_tick).as_secs_f32(),
        };
        self.next_frame = self.next_frame.wrapping_add(1);
        self.last_tick = now;

        self.window_frames += 1;
        let window = now.duration_since(self.window_started);
        if window >= FPS_WINDOW {
            self.fps = self.window_frames as f32 / window.as_secs_f32();
            self.window_frames = 0;
            self.window_started = now;
        }

        info
    }

    /// Frames per second over the last completed window. Zero until the
    /// first window elapses.
    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn elapsed(&self) -> f32 {
        self.started.elapsed().as_secs_f32()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// The loop itself never terminates; iterating the clock lets tests
/// bound a run with `take`.
impl Iterator for FrameClock {
    type Item = FrameInfo;

    fn next(&mut self) -> Option<FrameInfo> {
        Some(self.tick())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn frames_are_numbered_from_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick().number, 0);
        assert_eq!(clock.tick().number, 1);
        assert_eq!(clock.tick().number, 2);
    }

    #[test]
    fn bounded_run_yields_exactly_n_frames() {
        let frames: Vec<FrameInfo> = FrameClock::new().take(100).collect();
        assert_eq!(frames.len(), 100);
        for (i, frame) in frames.iter().enumerate() {
            assert_eq!(frame.number, i as u64);
        }
    }

    #[test]
    fn time_is_monotonic() {
        let mut clock = FrameClock::new();
        let a = clock.tick();
        thread::sleep(Duration::from_millis(5));
        let b = clock.tick();
        assert!(b.time > a.time);
        assert!(b.delta >= 0.005);
    }

    #[test]
    fn fps_estimate_appears_after_the_window() {
        let mut clock = FrameClock::new();
        let deadline = Instant::now() + Duration::from_secs(2);
        clock.tick();
        while clock.fps() == 0.0 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
            clock.tick();
        }
        assert!(clock.fps() > 0.0);
        // ~5ms between ticks, so nowhere near a thousand
        assert!(clock.fps() < 1000.0);
    }
}
