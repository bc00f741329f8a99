use bevy_ecs::query::With;
use bevy_ecs::system::RunSystemOnce;
use glam::Vec2;
use pretty_assertions::assert_eq;
use speculoos::prelude::*;
use taser_arena::{
    config::{GameConfig, GameMode, InputMode},
    constants::{ring_blast, weapon},
    events::GameEvent,
    game::Game,
    systems::{
        bolt_bundle, bolt_movement_system, fan_angles, ring_blast_angles, ring_blast_interval, ring_blast_system,
        trigger_pulled, weapon_system, Bolt, Buttons, InputState, Position, Upgrade, UpgradeLevels, WeaponState,
    },
};

mod common;

fn bolt_count(game: &mut Game) -> usize {
    game.world.query_filtered::<(), With<Bolt>>().iter(&game.world).count()
}

fn hold_fire(game: &mut Game) {
    game.set_input(InputState {
        buttons: Buttons::FIRE,
        ..InputState::default()
    });
}

#[test]
fn test_single_bolt_without_spread() {
    assert_that(&fan_angles(0.5, 0).as_slice()).is_equal_to([0.5].as_slice());
}

#[test]
fn test_spread_fans_symmetrically() {
    let angles = fan_angles(1.0, 2);

    assert_eq!(angles.len(), 3);
    assert_eq!(angles[1], 1.0);
    assert_that(&((angles[0] - 1.0) + (angles[2] - 1.0)).abs()).is_less_than(1e-6);
    assert_that(&angles[0]).is_less_than(angles[2]);
}

#[test]
fn test_bolt_leaves_from_muzzle() {
    let bundle = bolt_bundle(Vec2::ZERO, 0.0, 500.0, 16.0, 1, 1.0);

    assert_that(&bundle.position.0).is_equal_to(Vec2::new(weapon::MUZZLE_OFFSET, 0.0));
    assert_that(&bundle.velocity.0).is_equal_to(Vec2::new(500.0, 0.0));
    assert_that(&bundle.bolt.pierce_left).is_equal_to(1);
    assert_that(&bundle.bolt.struck.is_empty()).is_true();
}

#[test]
fn test_auto_fire_pulls_trigger() {
    let mut config = GameConfig::default();
    let idle = InputState::default();
    assert_that(&trigger_pulled(&config, &idle)).is_false();

    config.auto_fire = true;
    assert_that(&trigger_pulled(&config, &idle)).is_true();

    config.auto_fire = false;
    config.input_mode = InputMode::Mouse;
    let clicking = InputState {
        pointer_down: true,
        ..InputState::default()
    };
    assert_that(&trigger_pulled(&config, &clicking)).is_true();
}

#[test]
fn test_weapon_respects_cooldown() {
    let (mut game, _) = common::playing_game(GameMode::Waves);
    common::set_delta(&mut game, 0.0);
    hold_fire(&mut game);

    game.world.run_system_once(weapon_system).unwrap();
    game.world.run_system_once(weapon_system).unwrap();

    assert_that(&bolt_count(&mut game)).is_equal_to(1);
    let cooldown = game.world.resource::<WeaponState>().cooldown;
    assert_that(&(cooldown - 1.0 / weapon::BASE_FIRE_RATE).abs()).is_less_than(1e-6);

    common::set_delta(&mut game, 0.5);
    game.world.run_system_once(weapon_system).unwrap();
    assert_that(&bolt_count(&mut game)).is_equal_to(2);
}

#[test]
fn test_weapon_idle_without_trigger() {
    let (mut game, _) = common::playing_game(GameMode::Waves);
    common::set_delta(&mut game, 1.0);

    game.world.run_system_once(weapon_system).unwrap();

    assert_that(&bolt_count(&mut game)).is_equal_to(0);
}

#[test]
fn test_spread_upgrade_adds_bolts() {
    let (mut game, _) = common::playing_game(GameMode::Waves);
    common::set_delta(&mut game, 0.0);
    game.world.resource_mut::<UpgradeLevels>().set(Upgrade::Spread, 2);
    hold_fire(&mut game);

    game.world.run_system_once(weapon_system).unwrap();

    assert_that(&bolt_count(&mut game)).is_equal_to(3);
}

#[test]
fn test_ring_blast_interval_floors() {
    assert_eq!(ring_blast_interval(0), ring_blast::BASE_INTERVAL);
    assert_eq!(ring_blast_interval(100), ring_blast::MIN_INTERVAL);
    assert_that(&ring_blast_interval(2)).is_less_than(ring_blast_interval(1));
}

#[test]
fn test_ring_blast_angles_cover_circle() {
    let angles: Vec<f32> = ring_blast_angles(1).collect();

    assert_eq!(angles.len(), (ring_blast::BASE_BOLTS + ring_blast::BOLTS_PER_LEVEL) as usize);
    assert_eq!(angles[0], 0.0);
    assert_that(&angles.windows(2).all(|pair| pair[0] < pair[1])).is_true();
}

#[test]
fn test_ring_blast_needs_a_level() {
    let (mut game, _) = common::playing_game(GameMode::Waves);
    common::set_delta(&mut game, 10.0);

    game.world.run_system_once(ring_blast_system).unwrap();

    assert_that(&bolt_count(&mut game)).is_equal_to(0);
}

#[test]
fn test_ring_blast_fires_after_full_interval() {
    let (mut game, _) = common::playing_game(GameMode::Waves);
    game.world.resource_mut::<UpgradeLevels>().set(Upgrade::RingBlast, 1);
    game.start_wave(1);
    common::set_delta(&mut game, ring_blast_interval(1) / 2.0);

    game.world.run_system_once(ring_blast_system).unwrap();
    assert_that(&bolt_count(&mut game)).is_equal_to(0);

    game.world.run_system_once(ring_blast_system).unwrap();

    let expected = ring_blast::BASE_BOLTS + ring_blast::BOLTS_PER_LEVEL;
    assert_that(&bolt_count(&mut game)).is_equal_to(expected as usize);
    assert_that(&common::drain_events(&mut game)).contains(GameEvent::RingBlastFired { bolts: expected });
}

#[test]
fn test_bolts_expire() {
    let (mut game, _) = common::playing_game(GameMode::Waves);
    let center = game.bounds().center();
    game.world.spawn(bolt_bundle(center, 0.0, 0.0, 16.0, 0, 0.5));
    common::set_delta(&mut game, 0.3);

    game.world.run_system_once(bolt_movement_system).unwrap();
    assert_that(&bolt_count(&mut game)).is_equal_to(1);

    game.world.run_system_once(bolt_movement_system).unwrap();
    assert_that(&bolt_count(&mut game)).is_equal_to(0);
}

#[test]
fn test_bolts_leaving_arena_are_removed() {
    let (mut game, _) = common::playing_game(GameMode::Waves);
    let edge = Vec2::new(game.bounds().max().x, game.bounds().center().y);
    let bolt = game.world.spawn(bolt_bundle(edge, 0.0, 1_000.0, 16.0, 0, 10.0)).id();
    common::set_delta(&mut game, 0.05);

    game.world.run_system_once(bolt_movement_system).unwrap();
    let position = game.world.get::<Position>(bolt).unwrap().0;
    assert_that(&position.x).is_greater_than(edge.x);

    game.world.run_system_once(bolt_movement_system).unwrap();
    assert_that(&game.world.get_entity(bolt).is_ok()).is_false();
}
