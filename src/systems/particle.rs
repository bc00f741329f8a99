use std::f32::consts::TAU;

use bevy_ecs::{
    entity::Entity,
    system::{Commands, Query, Res},
};
use glam::Vec2;
use rand::Rng;

use crate::constants::{palette, particles};
use crate::helpers::random_in;
use crate::systems::components::{Color, DeltaTime, Particle, ParticleBundle, Position, Velocity};

/// A burst of particles flying out from `origin` in every direction.
pub fn explosion<R: Rng + ?Sized>(rng: &mut R, origin: Vec2, color: Color) -> Vec<ParticleBundle> {
    let (min, max) = particles::EXPLOSION_COUNT;
    let count = rng.random_range(min..max);
    (0..count)
        .map(|_| {
            let angle = rng.random::<f32>() * TAU;
            let speed = random_in(rng, particles::EXPLOSION_SPEED.0, particles::EXPLOSION_SPEED.1);
            ParticleBundle {
                particle: Particle {
                    lifetime: random_in(rng, particles::EXPLOSION_LIFETIME.0, particles::EXPLOSION_LIFETIME.1),
                    radius: random_in(rng, particles::EXPLOSION_RADIUS.0, particles::EXPLOSION_RADIUS.1),
                    color,
                },
                position: Position(origin),
                velocity: Velocity(Vec2::from_angle(angle) * speed),
            }
        })
        .collect()
}

/// The short-lived spark left where a bolt connects.
pub fn spark<R: Rng + ?Sized>(rng: &mut R, origin: Vec2) -> ParticleBundle {
    let speed = particles::SPARK_SPEED;
    ParticleBundle {
        particle: Particle {
            lifetime: particles::SPARK_LIFETIME,
            radius: particles::SPARK_RADIUS,
            color: palette::BOLT,
        },
        position: Position(origin),
        velocity: Velocity(Vec2::new(random_in(rng, -speed, speed), random_in(rng, -speed, speed))),
    }
}

/// Integrates particles with exponential drag and removes expired ones.
pub fn particle_system(
    mut commands: Commands,
    delta_time: Res<DeltaTime>,
    mut query: Query<(Entity, &mut Particle, &mut Position, &mut Velocity)>,
) {
    let dt = delta_time.seconds;
    let drag = (-particles::DRAG * dt).exp();
    for (entity, mut particle, mut position, mut velocity) in query.iter_mut() {
        position.0 += velocity.0 * dt;
        velocity.0 *= drag;
        particle.lifetime -= dt;
        if particle.lifetime <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}
