//! Scene drawing
//!
//! Turns a [`RunState`] into draw calls. Drawing never touches the run;
//! everything animated here is derived from the run's tick counter.

use std::cmp::Ordering;

use glam::Vec2;

use super::canvas::{Canvas, Color, Font, Paint, TextAlign, colors};
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{GamePhase, Obstacle, ObstacleKind, Particle, Player, RunState};

/// Per-frame numbers that live outside the simulation
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    pub fps: u32,
}

/// Lean applied to the runner while rising/falling (radians)
const PLAYER_TILT: f32 = 0.1;

const CENTER_X: f32 = CANVAS_WIDTH / 2.0;

/// Draw one frame
pub fn render<C: Canvas>(state: &RunState, settings: &Settings, stats: &FrameStats, canvas: &mut C) {
    match state.phase {
        GamePhase::NotStarted => draw_title(canvas),
        GamePhase::Running | GamePhase::Paused | GamePhase::GameOver => {
            canvas.save();
            // Apply settings to visual effects
            if settings.effective_screen_shake() && state.shake.is_active() {
                canvas.translate(state.shake.offset);
            }

            draw_background(canvas);
            draw_ground(canvas, state.scroll_distance);
            draw_player(canvas, &state.player, state.frame);
            for obstacle in &state.obstacles {
                match obstacle.kind {
                    ObstacleKind::Cactus => draw_cactus(canvas, obstacle),
                    ObstacleKind::Bird => draw_bird(canvas, obstacle),
                }
            }
            if settings.particles {
                draw_particles(canvas, &state.particles);
            }
            draw_hud(canvas, state);

            match state.phase {
                GamePhase::GameOver => draw_game_over(canvas, state),
                GamePhase::Paused => draw_paused(canvas),
                _ => {}
            }
            canvas.restore();
        }
    }

    if settings.show_fps {
        canvas.fill_text(
            &format!("FPS: {}", stats.fps),
            Vec2::new(CANVAS_WIDTH - 20.0, 20.0),
            Font::regular(12.0),
            TextAlign::Right,
            colors::FPS,
        );
    }
}

/// Color of an obstacle (and of its debris)
pub fn obstacle_color(kind: ObstacleKind) -> Color {
    match kind {
        ObstacleKind::Cactus => colors::CACTUS,
        ObstacleKind::Bird => colors::BIRD,
    }
}

fn draw_background<C: Canvas>(canvas: &mut C) {
    canvas.fill_rect(
        Vec2::ZERO,
        Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT),
        &colors::BACKGROUND.into(),
    );
}

fn draw_title<C: Canvas>(canvas: &mut C) {
    draw_background(canvas);
    let lines = [
        ("DINO RUNNER", 100.0, Font::bold(48.0)),
        ("Press SPACE to Start", 200.0, Font::regular(24.0)),
        ("Jump over obstacles and survive!", 250.0, Font::regular(16.0)),
        ("Speed increases every 100 points", 280.0, Font::regular(16.0)),
    ];
    for (text, y, font) in lines {
        canvas.fill_text(text, Vec2::new(CENTER_X, y), font, TextAlign::Center, colors::INK);
    }
}

/// Ground line plus dashes that scroll with the run
fn draw_ground<C: Canvas>(canvas: &mut C, scroll_distance: f32) {
    let ink: Paint = colors::INK.into();
    canvas.fill_rect(Vec2::new(0.0, GROUND_Y), Vec2::new(CANVAS_WIDTH, 4.0), &ink);

    let offset = scroll_distance % GROUND_TILE;
    let mut x = 0.0;
    while x < CANVAS_WIDTH {
        canvas.fill_rect(
            Vec2::new(x - offset, GROUND_Y + 10.0),
            Vec2::new(GROUND_TILE / 2.0, 2.0),
            &ink,
        );
        x += GROUND_TILE;
    }
}

fn draw_player<C: Canvas>(canvas: &mut C, player: &Player, frame: u64) {
    let size = player.size();
    let half = size / 2.0;

    canvas.save();
    canvas.translate(player.pos + half);
    if player.jumping {
        // Level at the apex
        match player.vel_y.partial_cmp(&0.0) {
            Some(Ordering::Less) => canvas.rotate(-PLAYER_TILT),
            Some(Ordering::Greater) => canvas.rotate(PLAYER_TILT),
            _ => {}
        }
    }
    canvas.translate(-half);

    canvas.fill_rect(
        Vec2::ZERO,
        size,
        &Paint::VerticalGradient {
            top: 0.0,
            bottom: size.y,
            from: colors::PLAYER_TOP,
            to: colors::PLAYER_BOTTOM,
        },
    );

    // Legs swing in opposite phase
    let swing = (frame as f32 * 0.1).sin() * 2.0;
    let legs: Paint = colors::PLAYER_BOTTOM.into();
    canvas.fill_rect(Vec2::new(8.0, size.y - 8.0), Vec2::new(4.0, 8.0 + swing), &legs);
    canvas.fill_rect(
        Vec2::new(size.x - 12.0, size.y - 8.0),
        Vec2::new(4.0, 8.0 - swing),
        &legs,
    );

    canvas.fill_circle(Vec2::new(size.x - 8.0, 8.0), 3.0, colors::EYE);
    canvas.restore();
}

fn draw_cactus<C: Canvas>(canvas: &mut C, obstacle: &Obstacle) {
    let x = obstacle.x;
    let top = GROUND_Y - obstacle.height;
    let body: Paint = colors::CACTUS.into();

    // Trunk and two arms
    canvas.fill_rect(
        Vec2::new(x + 4.0, top + 10.0),
        Vec2::new(16.0, obstacle.height - 10.0),
        &body,
    );
    canvas.fill_rect(Vec2::new(x - 2.0, top + 15.0), Vec2::new(6.0, 8.0), &body);
    canvas.fill_rect(Vec2::new(x + 20.0, top + 20.0), Vec2::new(6.0, 8.0), &body);

    let spine: Paint = colors::CACTUS_SPINE.into();
    for i in 0..3 {
        let y = top + 15.0 + i as f32 * 10.0;
        canvas.fill_rect(Vec2::new(x + 2.0, y), Vec2::new(2.0, 4.0), &spine);
        canvas.fill_rect(Vec2::new(x + 20.0, y), Vec2::new(2.0, 4.0), &spine);
    }
}

fn draw_bird<C: Canvas>(canvas: &mut C, obstacle: &Obstacle) {
    let (w, h) = (obstacle.width, obstacle.height);

    canvas.save();
    canvas.translate(Vec2::new(obstacle.x + w / 2.0, GROUND_Y - h / 2.0));
    canvas.rotate(obstacle.rotation);
    canvas.translate(Vec2::new(-w / 2.0, -h / 2.0));

    canvas.fill_ellipse(Vec2::new(w / 2.0, h / 2.0), Vec2::new(w / 2.0, h / 3.0), colors::BIRD);
    canvas.fill_polygon(
        &[
            Vec2::new(w / 2.0, h / 2.0),
            Vec2::new(w, h / 3.0),
            Vec2::new(w, h * 0.66),
        ],
        colors::BIRD_WING,
    );
    canvas.fill_circle(Vec2::new(w * 0.7, h / 2.0 - 2.0), 2.0, colors::EYE);
    canvas.restore();
}

/// Debris fades out with its remaining life
fn draw_particles<C: Canvas>(canvas: &mut C, particles: &[Particle]) {
    if particles.is_empty() {
        return;
    }
    for particle in particles {
        canvas.set_alpha(particle.life_fraction());
        canvas.fill_circle(particle.pos, PARTICLE_RADIUS, obstacle_color(particle.kind));
    }
    canvas.set_alpha(1.0);
}

fn draw_hud<C: Canvas>(canvas: &mut C, state: &RunState) {
    canvas.fill_rect(Vec2::ZERO, Vec2::new(300.0, 80.0), &colors::PANEL.into());

    let font = Font::bold(18.0);
    let lines = [
        (format!("Score: {}", state.score), 30.0),
        (format!("Speed: {:.1}x", state.speed_multiplier), 55.0),
        (format!("High: {}", state.high_score), 80.0),
    ];
    for (text, y) in &lines {
        canvas.fill_text(text, Vec2::new(20.0, *y), font, TextAlign::Left, colors::TEXT);
    }
}

fn draw_game_over<C: Canvas>(canvas: &mut C, state: &RunState) {
    canvas.fill_rect(
        Vec2::ZERO,
        Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT),
        &colors::PANEL.into(),
    );

    let pulse = (state.frame as f32 * 0.05).sin() * 0.1 + 0.9;
    canvas.fill_text(
        "GAME OVER",
        Vec2::new(CENTER_X, 150.0),
        Font::bold(48.0),
        TextAlign::Center,
        colors::TEXT.with_alpha(pulse),
    );
    canvas.fill_text(
        &format!("Final Score: {}", state.score),
        Vec2::new(CENTER_X, 220.0),
        Font::bold(32.0),
        TextAlign::Center,
        colors::TEXT,
    );

    if state.is_new_high_score() {
        canvas.fill_text(
            "NEW HIGH SCORE!",
            Vec2::new(CENTER_X, 260.0),
            Font::bold(24.0),
            TextAlign::Center,
            colors::GOLD,
        );
    } else if state.high_score > 0 {
        canvas.fill_text(
            &format!("High Score: {}", state.high_score),
            Vec2::new(CENTER_X, 260.0),
            Font::regular(18.0),
            TextAlign::Center,
            colors::MUTED,
        );
    }

    canvas.fill_text(
        "Press SPACE to Restart",
        Vec2::new(CENTER_X, 310.0),
        Font::regular(20.0),
        TextAlign::Center,
        colors::TEXT,
    );
}

fn draw_paused<C: Canvas>(canvas: &mut C) {
    canvas.fill_rect(
        Vec2::ZERO,
        Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT),
        &colors::SCRIM.into(),
    );
    canvas.fill_text(
        "PAUSED",
        Vec2::new(CENTER_X, 180.0),
        Font::bold(48.0),
        TextAlign::Center,
        colors::TEXT,
    );
    canvas.fill_text(
        "Press ESC to Resume",
        Vec2::new(CENTER_X, 230.0),
        Font::regular(20.0),
        TextAlign::Center,
        colors::TEXT,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::display_list::{DisplayList, DrawCommand};
    use crate::sim::{TickInput, tick};

    fn draw(state: &RunState, settings: &Settings) -> DisplayList {
        let mut list = DisplayList::new();
        render(state, settings, &FrameStats { fps: 60 }, &mut list);
        list
    }

    fn running(seed: u64, high_score: u64) -> RunState {
        let mut state = RunState::new(seed, high_score);
        tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
        );
        state
    }

    fn crashed(high_score: u64) -> RunState {
        let mut state = running(1, high_score);
        state.push_obstacle(70.0, ObstacleKind::Cactus);
        tick(&mut state, &TickInput::default());
        assert!(state.is_over());
        state
    }

    #[test]
    fn test_title_screen() {
        let list = draw(&RunState::new(1, 0), &Settings::default());
        assert!(list.contains_text("DINO RUNNER"));
        assert!(list.contains_text("Press SPACE to Start"));
        assert!(!list.contains_text("Score:"));
        assert!(list.is_balanced());
    }

    #[test]
    fn test_hud_shows_score_speed_high() {
        let mut state = running(1, 77);
        state.spawn_obstacles = false;
        for _ in 0..150 {
            tick(&mut state, &TickInput::default());
        }
        let list = draw(&state, &Settings::default());
        assert!(list.contains_text("Score: 150"));
        assert!(list.contains_text("Speed: 1.5x"));
        assert!(list.contains_text("High: 77"));
        assert!(!list.contains_text("GAME OVER"));
        assert!(list.is_balanced());
    }

    #[test]
    fn test_game_over_new_high_score() {
        let state = crashed(0);
        assert!(state.is_new_high_score());
        let list = draw(&state, &Settings::default());
        assert!(list.contains_text("GAME OVER"));
        assert!(list.contains_text("Final Score: 1"));
        assert!(list.contains_text("NEW HIGH SCORE!"));
        assert!(list.contains_text("Press SPACE to Restart"));
        assert!(list.is_balanced());
    }

    #[test]
    fn test_game_over_shows_standing_best() {
        let list = draw(&crashed(300), &Settings::default());
        assert!(list.contains_text("High Score: 300"));
        assert!(!list.contains_text("NEW HIGH SCORE!"));
    }

    #[test]
    fn test_paused_overlay() {
        let mut state = running(1, 0);
        tick(
            &mut state,
            &TickInput {
                pause: true,
                ..Default::default()
            },
        );
        let list = draw(&state, &Settings::default());
        assert!(list.contains_text("PAUSED"));
        assert!(list.is_balanced());
    }

    #[test]
    fn test_fps_toggle() {
        let mut settings = Settings::default();
        settings.show_fps = true;
        assert!(draw(&RunState::new(1, 0), &settings).contains_text("FPS: 60"));
        settings.show_fps = false;
        assert!(!draw(&RunState::new(1, 0), &settings).contains_text("FPS"));
    }

    #[test]
    fn test_shake_respects_settings() {
        let mut state = crashed(0);
        state.shake.offset = Vec2::new(3.0, -2.0);
        let shaken = DrawCommand::Translate(Vec2::new(3.0, -2.0));

        let list = draw(&state, &Settings::default());
        assert_eq!(list.commands.get(1), Some(&shaken));

        let mut settings = Settings::default();
        settings.reduced_motion = true;
        let list = draw(&state, &settings);
        assert!(!list.commands.contains(&shaken));
    }

    #[test]
    fn test_particles_respect_settings() {
        let state = crashed(0);
        let count_alpha = |list: &DisplayList| {
            list.commands
                .iter()
                .filter(|c| matches!(c, DrawCommand::SetAlpha(_)))
                .count()
        };

        let list = draw(&state, &Settings::default());
        // One per particle plus the reset
        assert_eq!(count_alpha(&list), state.particles.len() + 1);

        let mut settings = Settings::default();
        settings.particles = false;
        assert_eq!(count_alpha(&draw(&state, &settings)), 0);
    }

    #[test]
    fn test_player_leans_into_jump() {
        let mut state = running(1, 0);
        tick(
            &mut state,
            &TickInput {
                jump: true,
                ..Default::default()
            },
        );
        assert!(state.player.vel_y < 0.0);
        let list = draw(&state, &Settings::default());
        assert!(list.commands.contains(&DrawCommand::Rotate(-PLAYER_TILT)));
    }

    #[test]
    fn test_player_tilt_follows_vertical_velocity() {
        let rotations = |state: &RunState| {
            draw(state, &Settings::default())
                .commands
                .into_iter()
                .filter(|c| matches!(c, DrawCommand::Rotate(_)))
                .collect::<Vec<_>>()
        };

        let mut state = running(1, 0);
        state.player.jumping = true;
        state.player.vel_y = 0.0;
        assert!(rotations(&state).is_empty());

        state.player.vel_y = 2.5;
        assert_eq!(rotations(&state), vec![DrawCommand::Rotate(PLAYER_TILT)]);

        // Grounded never leans
        state.player.jumping = false;
        assert!(rotations(&state).is_empty());
    }

    #[test]
    fn test_bird_is_drawn_rotated() {
        let mut state = running(1, 0);
        state.push_obstacle(500.0, ObstacleKind::Bird);
        state.obstacles[0].rotation = 0.7;
        let list = draw(&state, &Settings::default());
        assert!(list.commands.contains(&DrawCommand::Rotate(0.7)));
        assert!(list.commands.iter().any(|c| matches!(
            c,
            DrawCommand::Ellipse { color, .. } if *color == colors::BIRD
        )));
    }
}
