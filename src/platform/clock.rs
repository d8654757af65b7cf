//! Frame pacing
//!
//! Converts wall-clock frame timestamps into a whole number of fixed
//! simulation ticks, and keeps an FPS readout.

use crate::consts::*;

/// Fixed-timestep accumulator
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f32,
    last_time: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a frame timestamp (ms); returns how many ticks are due
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let dt = match self.last_time {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => SIM_DT,
        };
        self.last_time = Some(now_ms);

        // Clamp so a backgrounded tab does not unleash a burst of ticks
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut ticks = 0;
        while self.accumulator >= SIM_DT && ticks < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            ticks += 1;
        }
        if ticks == MAX_SUBSTEPS {
            // Drop the backlog instead of carrying it into every later frame
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        ticks
    }
}

/// Frames-per-second from the gap between the last two frames
#[derive(Debug, Clone, Default)]
pub struct FpsCounter {
    last_time: Option<f64>,
    fps: u32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, now_ms: f64) {
        if let Some(last) = self.last_time {
            let delta = now_ms - last;
            if delta > 0.0 {
                self.fps = (1000.0 / delta).round() as u32;
            }
        }
        self.last_time = Some(now_ms);
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}
