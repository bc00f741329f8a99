use std::f32::consts::TAU;

use bevy_ecs::{
    event::EventWriter,
    query::With,
    resource::Resource,
    system::{Commands, Query, Res, ResMut},
};
use glam::Vec2;
use smallvec::SmallVec;
use tracing::trace;

use crate::config::GameConfig;
use crate::constants::{ring_blast, weapon};
use crate::events::GameEvent;
use crate::systems::components::{Bolt, BoltBundle, Collider, DeltaTime, Heading, PlayerControlled, Position, RingBlast, Velocity};
use crate::systems::economy::{EffectiveStats, Upgrade, UpgradeLevels};
use crate::systems::input::InputState;

/// Time until the primary weapon may fire again.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct WeaponState {
    pub cooldown: f32,
}

/// Firing angles for one volley: `1 + spread` bolts spread evenly across the cone around `aim`.
pub fn fan_angles(aim: f32, spread: u32) -> SmallVec<[f32; 8]> {
    let count = 1 + spread;
    if spread == 0 {
        return SmallVec::from_slice(&[aim]);
    }

    let cone = weapon::SPREAD_BASE_CONE * (1.0 + spread as f32 * weapon::SPREAD_CONE_GROWTH);
    (0..count)
        .map(|i| {
            let t = (i as f32 / (count - 1) as f32) * 2.0 - 1.0;
            aim + t * cone
        })
        .collect()
}

/// A bolt leaving `origin` along `angle`, offset to the muzzle.
pub fn bolt_bundle(origin: Vec2, angle: f32, speed: f32, damage: f32, pierce: u32, lifetime: f32) -> BoltBundle {
    let direction = Vec2::from_angle(angle);
    BoltBundle {
        bolt: Bolt {
            damage,
            pierce_left: pierce,
            lifetime,
            struck: SmallVec::new(),
        },
        position: Position(origin + direction * weapon::MUZZLE_OFFSET),
        velocity: Velocity(direction * speed),
        collider: Collider {
            radius: weapon::BOLT_RADIUS,
        },
    }
}

/// Whether the weapon should fire this tick, regardless of cooldown.
pub fn trigger_pulled(config: &GameConfig, input: &InputState) -> bool {
    config.auto_fire || input.trigger_held(config.input_mode)
}

/// Counts the fire cooldown down and fires a volley along the player's heading when allowed.
pub fn weapon_system(
    mut commands: Commands,
    delta_time: Res<DeltaTime>,
    config: Res<GameConfig>,
    input: Res<InputState>,
    levels: Res<UpgradeLevels>,
    mut state: ResMut<WeaponState>,
    player: Query<(&Position, &Heading), With<PlayerControlled>>,
) {
    state.cooldown -= delta_time.seconds;
    if !trigger_pulled(&config, &input) || state.cooldown > 0.0 {
        return;
    }

    let Some((position, heading)) = player.iter().next() else {
        return;
    };

    let stats = levels.effective();
    state.cooldown = 1.0 / stats.fire_rate;

    let bolts: Vec<BoltBundle> = fan_angles(heading.angle, stats.spread)
        .into_iter()
        .map(|angle| bolt_bundle(position.0, angle, stats.bolt_speed, stats.damage, stats.pierce, weapon::BOLT_LIFETIME))
        .collect();
    trace!(bolts = bolts.len(), cooldown = state.cooldown, "Firing volley");
    commands.spawn_batch(bolts);
}

/// Seconds between ring blasts at `level`.
pub fn ring_blast_interval(level: u32) -> f32 {
    (ring_blast::BASE_INTERVAL - ring_blast::INTERVAL_PER_LEVEL * level as f32).max(ring_blast::MIN_INTERVAL)
}

/// Bolts emitted by one ring blast at `level`, evenly spaced around the circle.
pub fn ring_blast_angles(level: u32) -> impl Iterator<Item = f32> {
    let count = ring_blast::BASE_BOLTS + ring_blast::BOLTS_PER_LEVEL * level;
    (0..count).map(move |i| i as f32 / count as f32 * TAU)
}

fn ring_bolt(origin: Vec2, angle: f32, stats: &EffectiveStats) -> BoltBundle {
    bolt_bundle(
        origin,
        angle,
        stats.bolt_speed * ring_blast::SPEED_FACTOR,
        stats.damage * ring_blast::DAMAGE_FACTOR,
        stats.pierce,
        ring_blast::LIFETIME,
    )
}

/// Fires the periodic radial volley once the ability has been bought.
pub fn ring_blast_system(
    mut commands: Commands,
    delta_time: Res<DeltaTime>,
    levels: Res<UpgradeLevels>,
    mut events: EventWriter<GameEvent>,
    mut player: Query<(&Position, &mut RingBlast), With<PlayerControlled>>,
) {
    let level = levels.level(Upgrade::RingBlast);
    if level == 0 {
        return;
    }

    for (position, mut ring) in player.iter_mut() {
        ring.timer -= delta_time.seconds;
        if ring.timer > 0.0 {
            continue;
        }
        ring.timer = ring_blast_interval(level);

        let stats = levels.effective();
        let bolts: Vec<BoltBundle> = ring_blast_angles(level).map(|angle| ring_bolt(position.0, angle, &stats)).collect();
        trace!(bolts = bolts.len(), level, "Ring blast");
        events.write(GameEvent::RingBlastFired {
            bolts: bolts.len() as u32,
        });
        commands.spawn_batch(bolts);
    }
}
