use bevy_ecs::{
    entity::Entity,
    system::{Commands, Query, Res},
};

use crate::constants::arena;
use crate::systems::arena::ArenaBounds;
use crate::systems::components::{Bolt, DeltaTime, Position, Velocity};

/// Moves bolts and removes the ones that fizzled out or flew well past the arena edge.
pub fn bolt_movement_system(
    mut commands: Commands,
    delta_time: Res<DeltaTime>,
    bounds: Res<ArenaBounds>,
    mut bolts: Query<(Entity, &mut Bolt, &mut Position, &Velocity)>,
) {
    let dt = delta_time.seconds;
    for (entity, mut bolt, mut position, velocity) in bolts.iter_mut() {
        position.0 += velocity.0 * dt;
        bolt.lifetime -= dt;

        if bolt.lifetime <= 0.0 || bounds.escaped(position.0, arena::BOLT_ESCAPE_MARGIN) {
            commands.entity(entity).despawn();
        }
    }
}
