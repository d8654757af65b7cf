//! Dino Runner - an endless runner on a 2D canvas
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, effects)
//! - `renderer`: Canvas drawing of a run state
//! - `app`: Frame loop that owns the run and wires sim, renderer, audio and storage
//! - `platform`: Frame clock and input mapping
//! - `persistence`: Key/value storage backends
//! - `highscores`: The persisted best score

pub mod app;
pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use app::Game;
pub use highscores::HighScore;
pub use settings::Settings;

/// Game configuration constants
///
/// Everything is expressed in logical canvas units and simulation ticks.
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz refresh)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum ticks per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Longest wall-clock gap a single frame may account for (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Playfield dimensions
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 400.0;
    pub const GROUND_HEIGHT: f32 = 100.0;
    /// Y of the ground line (screen space, y grows downward)
    pub const GROUND_Y: f32 = CANVAS_HEIGHT - GROUND_HEIGHT;

    /// Player sprite
    pub const PLAYER_X: f32 = 50.0;
    pub const PLAYER_WIDTH: f32 = 44.0;
    pub const PLAYER_HEIGHT: f32 = 47.0;
    /// Player y when standing on the ground
    pub const PLAYER_GROUND_Y: f32 = GROUND_Y - PLAYER_HEIGHT;
    /// How far above the ground a jump may still be triggered
    pub const JUMP_TOLERANCE: f32 = 5.0;
    /// Hitbox inset on every side of the player sprite
    pub const HITBOX_INSET: f32 = 5.0;

    /// Per-tick gravity (units/tick²)
    pub const GRAVITY: f32 = 0.6;
    /// Initial jump velocity (negative = up)
    pub const JUMP_VELOCITY: f32 = -12.0;

    /// Scroll speed at multiplier 1.0 (units/tick)
    pub const BASE_SPEED: f32 = 6.0;
    /// Score needed per multiplier step
    pub const SPEED_STEP_SCORE: u64 = 100;
    /// Multiplier gained per step
    pub const SPEED_STEP: f32 = 0.5;

    /// Obstacles
    pub const OBSTACLE_WIDTH: f32 = 24.0;
    pub const OBSTACLE_HEIGHT: f32 = 42.0;
    /// Bird spin per tick (radians)
    pub const BIRD_SPIN: f32 = 0.1;

    /// Spawn interval bounds (ticks)
    pub const SPAWN_INTERVAL_START: u32 = 120;
    pub const SPAWN_INTERVAL_MIN: u32 = 60;
    /// Score needed per interval reduction
    pub const SPAWN_STEP_SCORE: u64 = 50;
    /// Ticks removed per reduction
    pub const SPAWN_STEP: u32 = 5;

    /// Particles
    pub const DEATH_PARTICLES: usize = 12;
    pub const PARTICLE_LIFE: u32 = 30;
    pub const PARTICLE_MIN_SPEED: f32 = 3.0;
    pub const PARTICLE_MAX_SPEED: f32 = 5.0;
    pub const PARTICLE_LIFT: f32 = 2.0;
    pub const PARTICLE_GRAVITY: f32 = 0.2;
    pub const PARTICLE_RADIUS: f32 = 3.0;

    /// Camera shake
    pub const SHAKE_INTENSITY: f32 = 15.0;
    pub const SHAKE_DECAY: f32 = 0.9;
    /// Below this the shake snaps to rest
    pub const SHAKE_EPSILON: f32 = 0.1;

    /// Ground strip tiling
    pub const GROUND_TILE: f32 = 20.0;
}
