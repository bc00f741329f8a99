use bevy_ecs::{
    entity::Entity,
    event::EventWriter,
    query::{Has, With, Without},
    system::{Commands, Query, Res, ResMut},
};
use glam::Vec2;
use rand::Rng;
use tracing::{debug, trace};

use crate::config::GameConfig;
use crate::constants::{enemy, palette, player};
use crate::events::GameEvent;
use crate::helpers::{circles_overlap, direction_or_zero};
use crate::systems::arena::ArenaBounds;
use crate::systems::components::{
    ActorKind, Bolt, BossBrain, Collider, DeltaTime, Elite, GameRng, Health, HitFlash, Hostile, Iframes,
    PlayerControlled, Position,
};
use crate::systems::difficulty::Difficulty;
use crate::systems::particle::{explosion, spark};
use crate::systems::stage::RunState;

/// Applies one contact hit to the player, unless invulnerable.
///
/// Returns true if the hit landed. The player is nudged away from `attacker` and re-clamped.
#[allow(clippy::too_many_arguments)]
pub fn apply_player_hit(
    damage: f32,
    attacker: Vec2,
    position: &mut Position,
    radius: f32,
    health: &mut Health,
    iframes: &mut Iframes,
    bounds: &ArenaBounds,
) -> bool {
    if iframes.active() {
        return false;
    }

    health.damage(damage);
    iframes.0 = player::IFRAMES;

    let away = direction_or_zero(position.0 - attacker);
    position.0 += away * player::CONTACT_KNOCKBACK * player::KNOCKBACK_NUDGE;
    position.0 = bounds.clamp_circle(position.0, radius);
    true
}

/// Hostiles touching the player deal contact damage and get pushed back a little.
#[allow(clippy::too_many_arguments)]
pub fn contact_damage_system(
    mut commands: Commands,
    delta_time: Res<DeltaTime>,
    bounds: Res<ArenaBounds>,
    mut rng: ResMut<GameRng>,
    mut player: Query<(&mut Position, &Collider, &mut Health, &mut Iframes), With<PlayerControlled>>,
    mut hostiles: Query<(&mut Position, &Collider, &Hostile), Without<PlayerControlled>>,
    mut events: EventWriter<GameEvent>,
) {
    let Ok((mut player_position, player_collider, mut health, mut iframes)) = player.single_mut() else {
        return;
    };

    for (mut position, collider, hostile) in hostiles.iter_mut() {
        if !circles_overlap(position.0, collider.radius, player_position.0, player_collider.radius) {
            continue;
        }

        if apply_player_hit(
            hostile.contact_damage,
            position.0,
            &mut player_position,
            player_collider.radius,
            &mut health,
            &mut iframes,
            &bounds,
        ) {
            debug!(damage = hostile.contact_damage, health = health.current, "Player hit");
            commands.spawn_batch(explosion(&mut rng.0, player_position.0, palette::BOLT));
            events.write(GameEvent::PlayerHit {
                damage: hostile.contact_damage,
                health: health.current,
            });
        }

        // Back off so the attacker doesn't pin the player in place.
        let away = direction_or_zero(position.0 - player_position.0);
        position.0 += away * hostile.repel_speed * delta_time.seconds;
        position.0 = bounds.clamp_circle(position.0, collider.radius);
    }
}

/// Resolves bolt hits against regular enemies first, then the boss.
///
/// A bolt strikes each target at most once. Every hit spends one point of pierce; a bolt with
/// none left is removed and stops checking further targets.
#[allow(clippy::too_many_arguments, clippy::type_complexity)]
pub fn bolt_collision_system(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut run: ResMut<RunState>,
    mut rng: ResMut<GameRng>,
    mut bolts: Query<(Entity, &mut Bolt, &Position, &Collider)>,
    mut enemies: Query<
        (Entity, &ActorKind, &Position, &Collider, &mut Health, &mut HitFlash, &Hostile, Has<Elite>),
        (Without<Bolt>, Without<BossBrain>),
    >,
    mut bosses: Query<(Entity, &Position, &Collider, &mut Health, &mut HitFlash, &Hostile), With<BossBrain>>,
    mut events: EventWriter<GameEvent>,
) {
    let difficulty = Difficulty::at(config.game_mode, run.wave, run.active_time);

    for (bolt_entity, mut bolt, bolt_position, bolt_collider) in bolts.iter_mut() {
        let mut consumed = false;

        for (entity, kind, position, collider, mut health, mut flash, hostile, elite) in enemies.iter_mut() {
            if health.is_depleted()
                || bolt.struck.contains(&entity)
                || !circles_overlap(bolt_position.0, bolt_collider.radius, position.0, collider.radius)
            {
                continue;
            }

            let killed = strike(&mut commands, &mut rng.0, &mut bolt, entity, bolt_position.0, &mut health, &mut flash);
            if killed {
                let reward = difficulty.kill_reward(hostile.score_value);
                run.score += reward.score;
                run.points += reward.points;
                trace!(kind = <&'static str>::from(*kind), score = reward.score, points = reward.points, "Enemy killed");

                commands.spawn_batch(explosion(&mut rng.0, position.0, kind.color()));
                commands.entity(entity).despawn();
                events.write(GameEvent::EnemyKilled {
                    kind: *kind,
                    elite,
                    score: reward.score,
                    points: reward.points,
                });
            }

            if !spend_pierce(&mut commands, bolt_entity, &mut bolt) {
                consumed = true;
                break;
            }
        }

        if consumed {
            continue;
        }

        for (entity, position, collider, mut health, mut flash, hostile) in bosses.iter_mut() {
            if health.is_depleted()
                || bolt.struck.contains(&entity)
                || !circles_overlap(bolt_position.0, bolt_collider.radius, position.0, collider.radius)
            {
                continue;
            }

            let killed = strike(&mut commands, &mut rng.0, &mut bolt, entity, bolt_position.0, &mut health, &mut flash);
            if killed {
                let score = u64::from(hostile.score_value);
                run.score += score;
                debug!(score, "Boss defeated");

                commands.spawn_batch(explosion(&mut rng.0, position.0, palette::BOSS));
                commands.entity(entity).despawn();
                events.write(GameEvent::BossDefeated { score });
            }

            if !spend_pierce(&mut commands, bolt_entity, &mut bolt) {
                break;
            }
        }
    }
}

/// Damages a target, flashes it and leaves a spark. Returns true if the target died.
fn strike<R: Rng + ?Sized>(
    commands: &mut Commands,
    rng: &mut R,
    bolt: &mut Bolt,
    target: Entity,
    at: Vec2,
    health: &mut Health,
    flash: &mut HitFlash,
) -> bool {
    bolt.struck.push(target);
    flash.0 = enemy::HIT_FLASH;
    commands.spawn(spark(rng, at));
    health.damage(bolt.damage)
}

/// Spends one pierce, or despawns the bolt if it has none. Returns whether the bolt survives.
fn spend_pierce(commands: &mut Commands, entity: Entity, bolt: &mut Bolt) -> bool {
    if bolt.pierce_left > 0 {
        bolt.pierce_left -= 1;
        true
    } else {
        commands.entity(entity).despawn();
        false
    }
}
