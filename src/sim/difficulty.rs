//! Score-driven difficulty curve
//!
//! Score is ticks survived, so both curves are expressed in ticks.

use crate::consts::*;

/// Scroll speed multiplier: +0.5 for every 100 points, never smoothed
pub fn speed_multiplier(score: u64) -> f32 {
    1.0 + (score / SPEED_STEP_SCORE) as f32 * SPEED_STEP
}

/// Scroll speed for a score (units/tick)
pub fn scroll_speed(score: u64) -> f32 {
    BASE_SPEED * speed_multiplier(score)
}

/// Ticks between obstacle spawns: 5 fewer every 50 points, floored at 60
pub fn spawn_interval(score: u64) -> u32 {
    let reduction = (score / SPAWN_STEP_SCORE).saturating_mul(SPAWN_STEP as u64);
    let interval = (SPAWN_INTERVAL_START as u64).saturating_sub(reduction);
    interval.max(SPAWN_INTERVAL_MIN as u64) as u32
}
