//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (obstacles in spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod effects;
pub mod state;
pub mod tick;

pub use collision::{Aabb, first_collision};
pub use difficulty::{scroll_speed, spawn_interval, speed_multiplier};
pub use effects::CameraShake;
pub use state::{
    GameEvent, GamePhase, InvariantViolation, Obstacle, ObstacleKind, Particle, Player, RunState,
};
pub use tick::{TickInput, tick};
