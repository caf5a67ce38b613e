//! Frame timing: clocks and the per-frame time record handed to every update.

use std::time::Instant;

/// Source of elapsed time in seconds
pub trait Clock {
    /// Seconds since the clock started
    fn now_s(&self) -> f32;

    /// Seconds elapsed since `start_s` (a value previously returned by `now_s`)
    fn elapsed_since(&self, start_s: f32) -> f32 {
        self.now_s() - start_s
    }
}

/// Wall clock backed by `Instant`
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_s(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

/// Simulated clock advancing by a fixed step (deterministic runs and tests)
#[derive(Debug, Clone)]
pub struct SteppedClock {
    step_s: f32,
    now_s: f32,
}

impl SteppedClock {
    pub fn new(step_s: f32) -> Self {
        Self { step_s, now_s: 0.0 }
    }

    /// Clock stepping at `fps` frames per second
    pub fn from_fps(fps: u32) -> Self {
        Self::new(1.0 / fps.max(1) as f32)
    }

    pub fn advance(&mut self) {
        self.now_s += self.step_s;
    }
}

impl Clock for SteppedClock {
    fn now_s(&self) -> f32 {
        self.now_s
    }
}

/// Time record for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Zero-based frame counter
    pub index: u64,

    /// Seconds since the clock started
    pub elapsed_s: f32,

    /// Seconds since the previous frame (0 for the first frame)
    pub delta_s: f32,
}

impl FrameTime {
    pub fn new(index: u64, elapsed_s: f32, delta_s: f32) -> Self {
        Self {
            index,
            elapsed_s,
            delta_s,
        }
    }

    /// Frame `index` of a run stepping `step_s` seconds per frame
    pub fn fixed_step(index: u64, step_s: f32) -> Self {
        Self::new(index, index as f32 * step_s, if index == 0 { 0.0 } else { step_s })
    }
}

/// Turns clock readings into consecutive `FrameTime` records
#[derive(Debug, Default)]
pub struct FrameTimer {
    previous: Option<FrameTime>,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self, clock: &dyn Clock) -> FrameTime {
        let now = clock.now_s();
        let frame = match self.previous {
            Some(prev) => FrameTime::new(prev.index + 1, now, (now - prev.elapsed_s).max(0.0)),
            None => FrameTime::new(0, now, 0.0),
        };
        self.previous = Some(frame);
        frame
    }
}
