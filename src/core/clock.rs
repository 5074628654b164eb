use std::time::Instant;

use super::timer::Throttled;

const FPS_UPDATE_INTERVAL: f32 = 1.0;

/// Wall-clock frame counter. Only used for reporting; the animation itself
/// advances by a fixed step per tick.
#[derive(Debug)]
pub struct FpsCounter {
    last_tick: Instant,
    frames: u32,
    window: Throttled,
    fps: f32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
            frames: 0,
            window: Throttled::new(FPS_UPDATE_INTERVAL),
            fps: 0.0,
        }
    }

    /// Records one frame. Returns the fresh FPS figure once per interval.
    pub fn frame(&mut self) -> Option<f32> {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        self.record(delta)
    }

    fn record(&mut self, delta: f32) -> Option<f32> {
        self.frames += 1;
        let elapsed = self.window.try_tick(delta)?;
        self.fps = self.frames as f32 / elapsed;
        self.frames = 0;
        Some(self.fps)
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}
