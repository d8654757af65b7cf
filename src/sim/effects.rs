//! Cosmetic effects: particle bursts and camera shake
//!
//! Neither feeds back into gameplay; they only consume the run's RNG so a
//! seeded run stays reproducible end to end.

use glam::Vec2;
use rand::Rng;

use super::state::{ObstacleKind, Particle};
use crate::consts::*;

/// Emit `count` particles radiating evenly around `origin`
pub fn burst<R: Rng>(
    particles: &mut Vec<Particle>,
    rng: &mut R,
    origin: Vec2,
    kind: ObstacleKind,
    count: usize,
) {
    particles.reserve(count);
    for i in 0..count {
        let angle = std::f32::consts::TAU * i as f32 / count as f32;
        let speed = rng.random_range(PARTICLE_MIN_SPEED..PARTICLE_MAX_SPEED);
        particles.push(Particle {
            pos: origin,
            vel: Vec2::new(angle.cos() * speed, angle.sin() * speed - PARTICLE_LIFT),
            life: PARTICLE_LIFE,
            max_life: PARTICLE_LIFE,
            kind,
        });
    }
}

/// Advance every particle one tick and cull the dead ones
pub fn update_particles(particles: &mut Vec<Particle>) {
    for particle in particles.iter_mut() {
        particle.pos += particle.vel;
        particle.vel.y += PARTICLE_GRAVITY;
        particle.life = particle.life.saturating_sub(1);
    }
    particles.retain(|p| p.life > 0);
}

/// Screen shake state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CameraShake {
    pub intensity: f32,
    /// Translation applied to the whole scene this frame
    pub offset: Vec2,
}

impl CameraShake {
    /// Kick the shake to full strength
    pub fn trigger(&mut self) {
        self.intensity = SHAKE_INTENSITY;
    }

    pub fn is_active(&self) -> bool {
        self.intensity > 0.0
    }

    /// Decay geometrically and pick a new offset within ±intensity/2
    pub fn update<R: Rng>(&mut self, rng: &mut R) {
        if self.intensity <= 0.0 {
            self.offset = Vec2::ZERO;
            return;
        }

        self.intensity *= SHAKE_DECAY;
        if self.intensity < SHAKE_EPSILON {
            self.intensity = 0.0;
            self.offset = Vec2::ZERO;
            return;
        }

        self.offset = Vec2::new(
            (rng.random::<f32>() - 0.5) * self.intensity,
            (rng.random::<f32>() - 0.5) * self.intensity,
        );
    }
}
