use bevy_ecs::{
    query::{With, Without},
    system::{Query, Res},
};

use crate::helpers::direction_or_zero;
use crate::systems::arena::ArenaBounds;
use crate::systems::components::{BossBrain, Collider, DeltaTime, HitFlash, Hostile, PlayerControlled, Position};

/// Regular enemies walk straight at the player and stay inside the arena.
pub fn enemy_movement_system(
    delta_time: Res<DeltaTime>,
    bounds: Res<ArenaBounds>,
    player: Query<&Position, With<PlayerControlled>>,
    mut enemies: Query<(&mut Position, &Hostile, &Collider), (Without<BossBrain>, Without<PlayerControlled>)>,
) {
    let Some(target) = player.iter().next().map(|p| p.0) else {
        return;
    };

    for (mut position, hostile, collider) in enemies.iter_mut() {
        let direction = direction_or_zero(target - position.0);
        position.0 += direction * hostile.speed * delta_time.seconds;
        position.0 = bounds.clamp_circle(position.0, collider.radius);
    }
}

/// Fades out hit flashes.
pub fn hit_flash_system(delta_time: Res<DeltaTime>, mut flashes: Query<&mut HitFlash>) {
    for mut flash in flashes.iter_mut() {
        if flash.0 > 0.0 {
            flash.0 = (flash.0 - delta_time.seconds).max(0.0);
        }
    }
}
