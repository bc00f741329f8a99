use std::f32::consts::{FRAC_PI_2, PI};

use bevy_ecs::system::RunSystemOnce;
use glam::Vec2;
use pretty_assertions::assert_eq;
use speculoos::prelude::*;
use taser_arena::{
    config::{GameConfig, GameMode, InputMode},
    constants::{player, weapon},
    systems::{player_control_system, steer_heading, Buttons, Heading, Iframes, InputState, Position, Velocity},
};

mod common;

const DT: f32 = 1.0 / 60.0;

fn set_input_mode(game: &mut taser_arena::game::Game, mode: InputMode) {
    game.world.resource_mut::<GameConfig>().input_mode = mode;
}

#[test]
fn test_movement_sign_vector_per_mode() {
    let input = InputState {
        buttons: Buttons::ARROW_LEFT | Buttons::ARROW_DOWN | Buttons::W,
        ..InputState::default()
    };

    assert_that(&input.movement(InputMode::Keyboard)).is_equal_to(Vec2::new(-1.0, 1.0));
    assert_that(&input.movement(InputMode::Mouse)).is_equal_to(Vec2::new(0.0, -1.0));
}

#[test]
fn test_opposite_keys_cancel() {
    let input = InputState {
        buttons: Buttons::A | Buttons::D,
        ..InputState::default()
    };

    assert_that(&input.movement(InputMode::Mouse)).is_equal_to(Vec2::ZERO);
}

#[test]
fn test_trigger_depends_on_mode() {
    let pointer_only = InputState {
        pointer_down: true,
        ..InputState::default()
    };
    assert_that(&pointer_only.trigger_held(InputMode::Keyboard)).is_false();
    assert_that(&pointer_only.trigger_held(InputMode::Mouse)).is_true();

    let mut fire_key = InputState {
        buttons: Buttons::FIRE,
        pointer_down: true,
        ..InputState::default()
    };
    assert_that(&fire_key.trigger_held(InputMode::Keyboard)).is_true();

    fire_key.release_trigger();
    assert_that(&fire_key.trigger_held(InputMode::Mouse)).is_false();
}

#[test]
fn test_keyboard_heading_turns_toward_travel() {
    let mut heading = Heading::default();

    for _ in 0..120 {
        steer_heading(&mut heading, Some(FRAC_PI_2), DT);
    }

    assert_that(&(heading.angle - FRAC_PI_2).abs()).is_less_than(0.05);
    assert_that(&heading.angular_velocity.abs()).is_less_than_or_equal_to(player::MAX_ANGULAR_VELOCITY);
}

#[test]
fn test_heading_turns_the_short_way_across_pi() {
    let mut heading = Heading {
        angle: PI - 0.2,
        angular_velocity: 0.0,
    };

    steer_heading(&mut heading, Some(-PI + 0.2), DT);

    assert_that(&heading.angular_velocity).is_greater_than(0.0);
}

#[test]
fn test_heading_coasts_to_a_stop() {
    let mut heading = Heading {
        angle: 0.0,
        angular_velocity: player::MAX_ANGULAR_VELOCITY,
    };

    for _ in 0..120 {
        steer_heading(&mut heading, None, DT);
    }

    assert_that(&heading.angular_velocity.abs()).is_less_than(0.01);
    assert_that(&heading.angle).is_greater_than_or_equal_to(-PI);
    assert_that(&heading.angle).is_less_than_or_equal_to(PI);
}

#[test]
fn test_player_moves_at_base_speed() {
    let (mut game, _) = common::playing_game(GameMode::Waves);
    common::set_delta(&mut game, 0.1);
    let start = common::player_position(&mut game);
    game.set_input(InputState {
        buttons: Buttons::ARROW_RIGHT,
        ..InputState::default()
    });

    game.world.run_system_once(player_control_system).unwrap();

    let entity = common::player_entity(&mut game);
    assert_eq!(game.world.get::<Velocity>(entity).unwrap().0, Vec2::new(weapon::BASE_MOVE_SPEED, 0.0));
    let moved = common::player_position(&mut game) - start;
    assert_that(&(moved.x - weapon::BASE_MOVE_SPEED * 0.1).abs()).is_less_than(1e-3);
}

#[test]
fn test_diagonal_movement_is_normalized() {
    let (mut game, _) = common::playing_game(GameMode::Waves);
    common::set_delta(&mut game, DT);
    game.set_input(InputState {
        buttons: Buttons::ARROW_RIGHT | Buttons::ARROW_UP,
        ..InputState::default()
    });

    game.world.run_system_once(player_control_system).unwrap();

    let entity = common::player_entity(&mut game);
    let speed = game.world.get::<Velocity>(entity).unwrap().0.length();
    assert_that(&(speed - weapon::BASE_MOVE_SPEED).abs()).is_less_than(1e-3);
}

#[test]
fn test_player_clamped_at_wall() {
    let (mut game, _) = common::playing_game(GameMode::Waves);
    common::set_delta(&mut game, 0.03);
    game.set_input(InputState {
        buttons: Buttons::ARROW_LEFT,
        ..InputState::default()
    });

    for _ in 0..200 {
        game.world.run_system_once(player_control_system).unwrap();
    }

    let bounds = game.bounds();
    let position = common::player_position(&mut game);
    assert_that(&position.x).is_equal_to(bounds.min().x + player::RADIUS);
}

#[test]
fn test_mouse_mode_faces_pointer() {
    let (mut game, _) = common::playing_game(GameMode::Waves);
    set_input_mode(&mut game, InputMode::Mouse);
    common::set_delta(&mut game, DT);
    let center = common::player_position(&mut game);
    game.set_input(InputState {
        pointer: center + Vec2::new(0.0, -100.0),
        ..InputState::default()
    });

    game.world.run_system_once(player_control_system).unwrap();

    let entity = common::player_entity(&mut game);
    let heading = *game.world.get::<Heading>(entity).unwrap();
    assert_that(&(heading.angle + FRAC_PI_2).abs()).is_less_than(1e-5);
    assert_that(&heading.angular_velocity).is_equal_to(0.0);
}

#[test]
fn test_mouse_mode_ignores_arrow_keys() {
    let (mut game, _) = common::playing_game(GameMode::Waves);
    set_input_mode(&mut game, InputMode::Mouse);
    common::set_delta(&mut game, DT);
    let start = common::player_position(&mut game);
    game.set_input(InputState {
        buttons: Buttons::ARROWS,
        pointer: start,
        ..InputState::default()
    });

    game.world.run_system_once(player_control_system).unwrap();

    assert_that(&common::player_position(&mut game)).is_equal_to(start);
}

#[test]
fn test_iframes_count_down_to_zero() {
    let (mut game, _) = common::playing_game(GameMode::Waves);
    common::set_delta(&mut game, 0.1);
    let entity = common::player_entity(&mut game);
    game.world.get_mut::<Iframes>(entity).unwrap().0 = 0.25;

    for _ in 0..3 {
        game.world.run_system_once(player_control_system).unwrap();
    }

    assert_that(&game.world.get::<Iframes>(entity).unwrap().active()).is_false();
    assert_that(&game.world.get::<Position>(entity).is_some()).is_true();
}
