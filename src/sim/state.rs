//! Run state and core simulation types
//!
//! Everything a run needs lives in [`RunState`]; nothing is global.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use thiserror::Error;

use super::difficulty;
use super::effects::CameraShake;
use crate::consts::*;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, waiting for the start trigger
    NotStarted,
    /// Active gameplay
    Running,
    /// Run is frozen (tab hidden, Escape)
    Paused,
    /// Run ended on a collision
    GameOver,
}

impl GamePhase {
    /// Phases in which only the start trigger has an effect
    pub fn is_idle(self) -> bool {
        matches!(self, GamePhase::NotStarted | GamePhase::GameOver)
    }
}

/// Things that happened during a tick that the outside world may react to
/// (sound cues, persistence, logging). Drained by the frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A fresh run began
    Started,
    /// Player left the ground
    Jumped,
    /// Run ended with the given score
    Crashed { score: u64 },
    /// Score beat the stored best
    NewHighScore(u64),
}

/// The runner
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Top-left corner of the sprite (x never changes)
    pub pos: Vec2,
    /// Vertical velocity (units/tick, positive = down)
    pub vel_y: f32,
    pub jumping: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, PLAYER_GROUND_Y),
            vel_y: 0.0,
            jumping: false,
        }
    }
}

impl Player {
    pub fn size(&self) -> Vec2 {
        Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    /// Standing still on the ground
    pub fn is_grounded(&self) -> bool {
        !self.jumping && self.pos.y == PLAYER_GROUND_Y && self.vel_y == 0.0
    }

    /// A jump is allowed when not airborne and (nearly) on the ground
    pub fn can_jump(&self) -> bool {
        !self.jumping && self.pos.y >= PLAYER_GROUND_Y - JUMP_TOLERANCE
    }

    /// Start a jump; returns false if the jump was refused
    pub fn jump(&mut self) -> bool {
        if !self.can_jump() {
            return false;
        }
        self.jumping = true;
        self.vel_y = JUMP_VELOCITY;
        true
    }

    /// Integrate one tick of gravity. Returns true on the tick the player lands.
    pub fn step(&mut self) -> bool {
        if !self.jumping {
            return false;
        }

        self.vel_y += GRAVITY;
        self.pos.y += self.vel_y;

        if self.pos.y >= PLAYER_GROUND_Y {
            self.pos.y = PLAYER_GROUND_Y;
            self.vel_y = 0.0;
            self.jumping = false;
            return true;
        }
        false
    }
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    /// Ground-hugging
    Cactus,
    /// Airborne, spins while it flies
    Bird,
}

/// An obstacle scrolling toward the player
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub x: f32,
    pub width: f32,
    pub height: f32,
    pub kind: ObstacleKind,
    /// Accumulated spin (radians); stays 0 for cacti
    pub rotation: f32,
}

impl Obstacle {
    pub fn new(id: u32, x: f32, kind: ObstacleKind) -> Self {
        Self {
            id,
            x,
            width: OBSTACLE_WIDTH,
            height: OBSTACLE_HEIGHT,
            kind,
            rotation: 0.0,
        }
    }

    /// Scroll left by `speed` and spin birds
    pub fn advance(&mut self, speed: f32) {
        self.x -= speed;
        if self.kind == ObstacleKind::Bird {
            self.rotation += BIRD_SPIN;
        }
    }

    /// Fully past the left edge of the playfield
    pub fn is_offscreen(&self) -> bool {
        self.x <= -self.width
    }

    /// Horizontal midpoint at ground level (where death bursts originate)
    pub fn impact_point(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, GROUND_Y)
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining life in ticks
    pub life: u32,
    pub max_life: u32,
    /// Obstacle kind for color lookup
    pub kind: ObstacleKind,
}

impl Particle {
    /// Remaining life as a fraction (drives opacity)
    pub fn life_fraction(&self) -> f32 {
        if self.max_life == 0 {
            return 0.0;
        }
        self.life as f32 / self.max_life as f32
    }
}

/// A broken range the arithmetic should never produce
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvariantViolation {
    #[error("player position is not finite: {0:?}")]
    NonFinitePlayer(Vec2),
    #[error("player sank below the ground: y = {0}")]
    PlayerBelowGround(f32),
    #[error("player is grounded but not resting on the ground: y = {y}, vel_y = {vel_y}")]
    FloatingPlayer { y: f32, vel_y: f32 },
    #[error("obstacle {id} has a non-finite position")]
    NonFiniteObstacle { id: u32 },
    #[error("spawn interval {0} is below the floor")]
    SpawnIntervalTooShort(u32),
    #[error("speed multiplier {actual} does not match score {score}")]
    MultiplierMismatch { score: u64, actual: f32 },
}

/// Complete state of one run (deterministic given seed and inputs)
#[derive(Debug, Clone)]
pub struct RunState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// RNG shared by spawner, particles and shake
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Ticks survived in this run
    pub score: u64,
    /// Best score across runs (survives restarts)
    pub high_score: u64,
    /// Current scroll speed (units/tick)
    pub speed: f32,
    pub speed_multiplier: f32,
    /// Ticks since the last spawn
    pub spawn_timer: u32,
    /// Ticks between spawns
    pub spawn_interval: u32,
    /// When false the spawner keeps counting but never places obstacles
    pub spawn_obstacles: bool,
    /// Ticks since the run started (drives animations)
    pub frame: u64,
    /// Total distance scrolled this run (ground strip offset)
    pub scroll_distance: f32,
    pub player: Player,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Screen shake (not gameplay-affecting)
    pub shake: CameraShake,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl RunState {
    /// Create an unstarted run with the given seed and stored best score
    pub fn new(seed: u64, high_score: u64) -> Self {
        Self::with_rng(seed, Pcg32::seed_from_u64(seed), high_score)
    }

    fn with_rng(seed: u64, rng: Pcg32, high_score: u64) -> Self {
        Self {
            seed,
            rng,
            phase: GamePhase::NotStarted,
            score: 0,
            high_score,
            speed: BASE_SPEED,
            speed_multiplier: 1.0,
            spawn_timer: 0,
            spawn_interval: SPAWN_INTERVAL_START,
            spawn_obstacles: true,
            frame: 0,
            scroll_distance: 0.0,
            player: Player::default(),
            obstacles: Vec::new(),
            particles: Vec::new(),
            shake: CameraShake::default(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Begin a fresh run. Only the high score, the RNG stream and the
    /// spawner switch carry over from the previous one.
    pub fn start(&mut self) {
        let spawn_obstacles = self.spawn_obstacles;
        let mut events = std::mem::take(&mut self.events);
        *self = Self::with_rng(self.seed, self.rng.clone(), self.high_score);
        self.spawn_obstacles = spawn_obstacles;
        self.phase = GamePhase::Running;
        events.push(GameEvent::Started);
        self.events = events;
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Place an obstacle with its left edge at `x`
    pub fn push_obstacle(&mut self, x: f32, kind: ObstacleKind) -> u32 {
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle::new(id, x, kind));
        id
    }

    /// Take all events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Final score equals the best and is worth celebrating
    pub fn is_new_high_score(&self) -> bool {
        self.score > 0 && self.score == self.high_score
    }

    /// Check the ranges nothing else guards
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let p = &self.player;
        if !p.pos.is_finite() || !p.vel_y.is_finite() {
            return Err(InvariantViolation::NonFinitePlayer(p.pos));
        }
        if p.pos.y > PLAYER_GROUND_Y {
            return Err(InvariantViolation::PlayerBelowGround(p.pos.y));
        }
        if !p.jumping && (p.pos.y != PLAYER_GROUND_Y || p.vel_y != 0.0) {
            return Err(InvariantViolation::FloatingPlayer {
                y: p.pos.y,
                vel_y: p.vel_y,
            });
        }
        if let Some(o) = self.obstacles.iter().find(|o| !o.x.is_finite()) {
            return Err(InvariantViolation::NonFiniteObstacle { id: o.id });
        }
        if self.spawn_interval < SPAWN_INTERVAL_MIN {
            return Err(InvariantViolation::SpawnIntervalTooShort(self.spawn_interval));
        }
        if self.speed_multiplier != difficulty::speed_multiplier(self.score) {
            return Err(InvariantViolation::MultiplierMismatch {
                score: self.score,
                actual: self.speed_multiplier,
            });
        }
        Ok(())
    }
}
