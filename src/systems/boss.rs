//! The boss alternates between steadily seeking the player and short, committed dashes.
//!
//! ```text
//! Seeking --(cooldown expired)--> Dashing { remaining, velocity }
//! Dashing --(remaining <= 0)----> Seeking
//! ```
//!
//! A dash locks in its velocity when it starts; the boss does not re-aim mid-dash, which is
//! what makes it dodgeable.

use bevy_ecs::{
    query::{With, Without},
    system::{Query, Res, ResMut},
};
use glam::Vec2;
use rand::Rng;
use tracing::debug;

use crate::constants::boss;
use crate::helpers::{direction_or_zero, random_in};
use crate::systems::arena::ArenaBounds;
use crate::systems::components::{
    BossBrain, BossState, Collider, DeltaTime, GameRng, Hostile, PlayerControlled, Position, Velocity,
};

impl BossBrain {
    pub fn new() -> Self {
        Self {
            cooldown: boss::FIRST_DASH_DELAY,
            state: BossState::Seeking,
        }
    }

    pub fn is_dashing(&self) -> bool {
        matches!(self.state, BossState::Dashing { .. })
    }

    /// Advances the brain by `dt` and returns the velocity to move with this tick.
    ///
    /// `to_player` is the offset from the boss to the player; `speed` is the base seek speed.
    pub fn steer<R: Rng + ?Sized>(&mut self, to_player: Vec2, speed: f32, dt: f32, rng: &mut R) -> Vec2 {
        self.cooldown -= dt;
        if self.cooldown <= 0.0 && !self.is_dashing() {
            self.cooldown = random_in(rng, boss::DASH_COOLDOWN.0, boss::DASH_COOLDOWN.1);
            let remaining = random_in(rng, boss::DASH_DURATION.0, boss::DASH_DURATION.1);
            let velocity = direction_or_zero(to_player) * speed * boss::DASH_SPEED_FACTOR;
            debug!(remaining, cooldown = self.cooldown, "Boss dash started");
            self.state = BossState::Dashing { remaining, velocity };
        }

        match &mut self.state {
            BossState::Dashing { remaining, velocity } => {
                let velocity = *velocity;
                *remaining -= dt;
                if *remaining <= 0.0 {
                    self.state = BossState::Seeking;
                }
                velocity
            }
            BossState::Seeking => direction_or_zero(to_player) * speed,
        }
    }
}

impl Default for BossBrain {
    fn default() -> Self {
        Self::new()
    }
}

pub fn boss_system(
    delta_time: Res<DeltaTime>,
    bounds: Res<ArenaBounds>,
    mut rng: ResMut<GameRng>,
    player: Query<&Position, With<PlayerControlled>>,
    mut bosses: Query<(&mut BossBrain, &mut Position, &mut Velocity, &Hostile, &Collider), Without<PlayerControlled>>,
) {
    let Some(target) = player.iter().next().map(|p| p.0) else {
        return;
    };

    let dt = delta_time.seconds;
    for (mut brain, mut position, mut velocity, hostile, collider) in bosses.iter_mut() {
        velocity.0 = brain.steer(target - position.0, hostile.speed, dt, &mut rng.0);
        position.0 += velocity.0 * dt;
        position.0 = bounds.clamp_circle(position.0, collider.radius);
    }
}
