//! Axis-aligned collision between the runner and obstacles
//!
//! The player's box is shrunk on every side so grazing contacts are
//! forgiven. Obstacle boxes are anchored to the ground line regardless of
//! kind. All four overlap comparisons are strict: boxes that only share an
//! edge do not collide.

use glam::Vec2;

use super::state::{Obstacle, Player};
use crate::consts::*;

/// Axis-aligned bounding box in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            left: pos.x,
            right: pos.x + size.x,
            top: pos.y,
            bottom: pos.y + size.y,
        }
    }

    /// Shrink by `margin` on every side
    pub fn inset(self, margin: f32) -> Self {
        Self {
            left: self.left + margin,
            right: self.right - margin,
            top: self.top + margin,
            bottom: self.bottom - margin,
        }
    }

    /// Forgiving hitbox of the player sprite
    pub fn player(player: &Player) -> Self {
        Self::new(player.pos, player.size()).inset(HITBOX_INSET)
    }

    /// Full obstacle box standing on the ground line
    pub fn obstacle(obstacle: &Obstacle) -> Self {
        Self {
            left: obstacle.x,
            right: obstacle.x + obstacle.width,
            top: GROUND_Y - obstacle.height,
            bottom: GROUND_Y,
        }
    }

    /// Strict overlap on both axes
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left < other.right
            && self.right > other.left
            && self.top < other.bottom
            && self.bottom > other.top
    }
}

/// Index of the first obstacle (in iteration order) touching the player
pub fn first_collision(player: &Player, obstacles: &[Obstacle]) -> Option<usize> {
    let hitbox = Aabb::player(player);
    obstacles
        .iter()
        .position(|o| hitbox.overlaps(&Aabb::obstacle(o)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ObstacleKind;
    use proptest::prelude::*;

    fn cactus_at(x: f32) -> Obstacle {
        Obstacle::new(1, x, ObstacleKind::Cactus)
    }

    #[test]
    fn test_player_hitbox_is_inset() {
        let hitbox = Aabb::player(&Player::default());
        assert_eq!(hitbox.left, PLAYER_X + 5.0);
        assert_eq!(hitbox.right, PLAYER_X + PLAYER_WIDTH - 5.0);
        assert_eq!(hitbox.top, PLAYER_GROUND_Y + 5.0);
        assert_eq!(hitbox.bottom, GROUND_Y - 5.0);
    }

    #[test]
    fn test_obstacle_box_is_ground_anchored() {
        for kind in [ObstacleKind::Cactus, ObstacleKind::Bird] {
            let b = Aabb::obstacle(&Obstacle::new(1, 200.0, kind));
            assert_eq!(b.top, GROUND_Y - OBSTACLE_HEIGHT);
            assert_eq!(b.bottom, GROUND_Y);
            assert_eq!(b.right - b.left, OBSTACLE_WIDTH);
        }
    }

    #[test]
    fn test_overlap_hits() {
        let player = Player::default();
        assert_eq!(first_collision(&player, &[cactus_at(70.0)]), Some(0));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let player = Player::default();
        let hitbox = Aabb::player(&player);

        // Obstacle's left edge exactly on the hitbox's right edge
        assert_eq!(first_collision(&player, &[cactus_at(hitbox.right)]), None);
        // Obstacle's right edge exactly on the hitbox's left edge
        assert_eq!(
            first_collision(&player, &[cactus_at(hitbox.left - OBSTACLE_WIDTH)]),
            None
        );

        // Vertical contact: hitbox bottom resting on the obstacle top
        let mut airborne = player.clone();
        airborne.pos.y = GROUND_Y - OBSTACLE_HEIGHT - PLAYER_HEIGHT + HITBOX_INSET;
        assert_eq!(Aabb::player(&airborne).bottom, GROUND_Y - OBSTACLE_HEIGHT);
        assert_eq!(first_collision(&airborne, &[cactus_at(60.0)]), None);

        // One unit lower and it hits
        airborne.pos.y += 1.0;
        assert_eq!(first_collision(&airborne, &[cactus_at(60.0)]), Some(0));
    }

    #[test]
    fn test_first_collision_wins() {
        let player = Player::default();
        let obstacles = [cactus_at(500.0), cactus_at(60.0), cactus_at(65.0)];
        assert_eq!(first_collision(&player, &obstacles), Some(1));
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(
            ax in -100.0f32..900.0, ay in -100.0f32..400.0, aw in 1.0f32..100.0, ah in 1.0f32..100.0,
            bx in -100.0f32..900.0, by in -100.0f32..400.0, bw in 1.0f32..100.0, bh in 1.0f32..100.0,
        ) {
            let a = Aabb::new(Vec2::new(ax, ay), Vec2::new(aw, ah));
            let b = Aabb::new(Vec2::new(bx, by), Vec2::new(bw, bh));
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn collides_iff_both_axes_overlap(x in -50.0f32..200.0, y in 150.0f32..=PLAYER_GROUND_Y) {
            let mut player = Player::default();
            player.pos.y = y;
            let obstacle = cactus_at(x);
            let p = Aabb::player(&player);
            let o = Aabb::obstacle(&obstacle);
            let horizontal = p.left < o.right && p.right > o.left;
            let vertical = p.top < o.bottom && p.bottom > o.top;
            prop_assert_eq!(first_collision(&player, &[obstacle]).is_some(), horizontal && vertical);
        }
    }
}
