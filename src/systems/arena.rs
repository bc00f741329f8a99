use bevy_ecs::{
    query::{Or, With},
    resource::Resource,
    system::{Query, Res},
};
use glam::Vec2;
use rand::Rng;

use crate::constants::arena;
use crate::helpers::{clamp, random_in};
use crate::systems::components::{Collider, Hostile, PlayerControlled, Position};

/// The playable rectangle: the viewport minus a fixed inset on every side.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ArenaBounds {
    /// Top-left corner.
    pub origin: Vec2,
    pub size: Vec2,
}

impl ArenaBounds {
    pub fn from_viewport(viewport: Vec2) -> Self {
        let inset = arena::BOUNDARY_INSET.floor();
        Self {
            origin: Vec2::splat(inset),
            size: (viewport - Vec2::splat(inset * 2.0)).max(Vec2::ZERO),
        }
    }

    pub fn min(&self) -> Vec2 {
        self.origin
    }

    pub fn max(&self) -> Vec2 {
        self.origin + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.origin + self.size / 2.0
    }

    /// Clamps a circle's center so the whole circle stays inside the rectangle.
    pub fn clamp_circle(&self, center: Vec2, radius: f32) -> Vec2 {
        let min = self.min() + Vec2::splat(radius);
        let max = self.max() - Vec2::splat(radius);
        Vec2::new(clamp(center.x, min.x, max.x), clamp(center.y, min.y, max.y))
    }

    pub fn contains_circle(&self, center: Vec2, radius: f32) -> bool {
        self.clamp_circle(center, radius) == center
    }

    /// Whether `point` lies more than `margin` outside the rectangle.
    pub fn escaped(&self, point: Vec2, margin: f32) -> bool {
        let min = self.min() - Vec2::splat(margin);
        let max = self.max() + Vec2::splat(margin);
        point.x < min.x || point.y < min.y || point.x > max.x || point.y > max.y
    }

    /// A uniformly random point on one of the four edges, pulled inward by the spawn padding.
    pub fn random_edge_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        let pad = arena::SPAWN_EDGE_PADDING;
        let (min, max) = (self.min() + Vec2::splat(pad), self.max() - Vec2::splat(pad));
        match rng.random_range(0..4u8) {
            0 => Vec2::new(random_in(rng, min.x, max.x), min.y),
            1 => Vec2::new(max.x, random_in(rng, min.y, max.y)),
            2 => Vec2::new(random_in(rng, min.x, max.x), max.y),
            _ => Vec2::new(min.x, random_in(rng, min.y, max.y)),
        }
    }

    /// An edge point at least the safe radius away from `player`.
    ///
    /// Gives up after a fixed number of redraws and accepts the last candidate, so a tiny arena
    /// still gets its spawn.
    pub fn safe_spawn_point<R: Rng + ?Sized>(&self, rng: &mut R, player: Vec2) -> Vec2 {
        let safe = arena::SAFE_SPAWN_RADIUS * arena::SAFE_SPAWN_RADIUS;
        let mut candidate = self.random_edge_point(rng);
        for _ in 0..arena::SPAWN_PLACEMENT_RETRIES {
            if candidate.distance_squared(player) >= safe {
                break;
            }
            candidate = self.random_edge_point(rng);
        }
        candidate
    }
}

impl Default for ArenaBounds {
    fn default() -> Self {
        Self::from_viewport(crate::constants::DEFAULT_VIEWPORT)
    }
}

/// Pulls every actor back inside the arena. Run once after the bounds change.
pub fn clamp_to_arena_system(
    bounds: Res<ArenaBounds>,
    mut actors: Query<(&mut Position, &Collider), Or<(With<PlayerControlled>, With<Hostile>)>>,
) {
    for (mut position, collider) in actors.iter_mut() {
        position.0 = bounds.clamp_circle(position.0, collider.radius);
    }
}
