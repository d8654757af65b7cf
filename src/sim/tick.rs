//! Per-tick simulation step
//!
//! Core game loop that advances the run deterministically. One call is one
//! tick; the frame loop decides how many ticks a frame gets.

use rand::Rng;

use super::collision::first_collision;
use super::difficulty::{scroll_speed, speed_multiplier, spawn_interval};
use super::effects;
use super::state::{GameEvent, GamePhase, ObstacleKind, RunState};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump (space / up arrow / pointer press)
    pub jump: bool,
    /// Start or restart a run (only honored while idle)
    pub start: bool,
    /// Pause toggle
    pub pause: bool,
    /// Demo mode - the runner jumps on its own
    pub autopilot: bool,
}

/// Advance the run by one tick
pub fn tick(state: &mut RunState, input: &TickInput) {
    if input.start && state.phase.is_idle() {
        state.start();
        log::info!("Run started (high score {})", state.high_score);
        return;
    }

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Running => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Running,
            _ => {}
        }
    }

    match state.phase {
        GamePhase::NotStarted | GamePhase::Paused => return,
        GamePhase::GameOver => {
            // Run is frozen; effects play out
            state.frame += 1;
            effects::update_particles(&mut state.particles);
            state.shake.update(&mut state.rng);
            return;
        }
        GamePhase::Running => {}
    }

    let wants_jump = input.jump || (input.autopilot && autopilot_should_jump(state));
    if wants_jump && state.player.jump() {
        state.events.push(GameEvent::Jumped);
    }

    state.frame += 1;
    state.score += 1;
    state.speed_multiplier = speed_multiplier(state.score);
    state.speed = scroll_speed(state.score);
    state.scroll_distance += state.speed;

    state.player.step();

    spawn_obstacles(state);

    let speed = state.speed;
    for obstacle in &mut state.obstacles {
        obstacle.advance(speed);
    }
    state.obstacles.retain(|o| !o.is_offscreen());

    if let Some(index) = first_collision(&state.player, &state.obstacles) {
        crash(state, index);
    }

    effects::update_particles(&mut state.particles);
    state.shake.update(&mut state.rng);
}

/// Count toward the next spawn; place an obstacle at the right edge when due
fn spawn_obstacles(state: &mut RunState) {
    state.spawn_timer += 1;
    if state.spawn_timer <= state.spawn_interval {
        return;
    }

    if state.spawn_obstacles {
        let kind = if state.rng.random_bool(0.5) {
            ObstacleKind::Cactus
        } else {
            ObstacleKind::Bird
        };
        let id = state.push_obstacle(CANVAS_WIDTH, kind);
        log::debug!("Spawned {:?} #{} at score {}", kind, id, state.score);
    }

    state.spawn_timer = 0;
    state.spawn_interval = spawn_interval(state.score);
}

/// End the run on the obstacle at `index`
fn crash(state: &mut RunState, index: usize) {
    let (origin, kind) = {
        let obstacle = &state.obstacles[index];
        (obstacle.impact_point(), obstacle.kind)
    };

    state.phase = GamePhase::GameOver;
    state.shake.trigger();
    effects::burst(
        &mut state.particles,
        &mut state.rng,
        origin,
        kind,
        DEATH_PARTICLES,
    );

    if state.score > state.high_score {
        state.high_score = state.score;
        state.events.push(GameEvent::NewHighScore(state.score));
    }
    state.events.push(GameEvent::Crashed { score: state.score });

    log::info!("Game over: hit {:?} at score {}", kind, state.score);
}

/// Jump when the next obstacle is a few ticks away from the hitbox
///
/// Eight ticks of lead puts the player above obstacle height (reached on
/// tick 4 of a jump) well before contact, and the 39-tick airtime is shorter
/// than the 60-tick minimum spawn interval.
fn autopilot_should_jump(state: &RunState) -> bool {
    const LEAD_TICKS: f32 = 8.0;

    if !state.player.can_jump() {
        return false;
    }

    let front = state.player.pos.x + PLAYER_WIDTH - HITBOX_INSET;
    let lookahead = state.speed.max(BASE_SPEED) * LEAD_TICKS;
    state
        .obstacles
        .iter()
        .map(|o| o.x - front)
        .filter(|gap| *gap > 0.0)
        .fold(f32::INFINITY, f32::min)
        <= lookahead
}
