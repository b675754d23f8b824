//! Wall-clock frame timing.

use std::time::Instant;

/// Interval over which the FPS readout is averaged, in seconds.
const FPS_WINDOW_SECONDS: f32 = 1.0;

/// Per-frame timing: delta since the previous frame, total elapsed time,
/// and a once-a-second FPS average for the HUD.
///
/// Animation rates are authored per 1/60 s tick and rescaled by the delta
/// this clock reports, so motion speed is independent of refresh rate.
#[derive(Debug)]
pub struct FrameClock {
    started: Instant,
    last_tick: Instant,
    frames_in_window: u32,
    window_seconds: f32,
    fps: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            last_tick: now,
            frames_in_window: 0,
            window_seconds: 0.0,
            fps: 0.0,
        }
    }

    /// Advance the clock. Returns seconds since the previous tick.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;

        self.frames_in_window += 1;
        self.window_seconds += delta;
        if self.window_seconds >= FPS_WINDOW_SECONDS {
            self.fps = self.frames_in_window as f32 / self.window_seconds;
            self.frames_in_window = 0;
            self.window_seconds = 0.0;
        }

        delta
    }

    /// Seconds since the clock was created.
    pub fn elapsed(&self) -> f32 {
        self.started.elapsed().as_secs_f32()
    }

    /// Most recent one-second FPS average. Zero until the first window
    /// completes.
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
