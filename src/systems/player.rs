use bevy_ecs::{
    query::With,
    system::{Query, Res},
};
use glam::Vec2;

use crate::config::{GameConfig, InputMode};
use crate::constants::player;
use crate::helpers::{clamp, direction_or_zero, shortest_angle_diff, wrap_angle};
use crate::systems::arena::ArenaBounds;
use crate::systems::components::{Collider, DeltaTime, Heading, Iframes, PlayerControlled, Position, Velocity};
use crate::systems::economy::UpgradeLevels;
use crate::systems::input::InputState;

/// Turns the ship toward `target` with a damped angular spring.
///
/// Acceleration is proportional to the remaining angle (capped); damping and the velocity cap
/// always apply, so the ship coasts to a stop once input is released.
pub fn steer_heading(heading: &mut Heading, target: Option<f32>, dt: f32) {
    if let Some(target) = target {
        let diff = shortest_angle_diff(heading.angle, target);
        let accel = clamp(diff * player::TURN_ACCEL, -player::TURN_ACCEL, player::TURN_ACCEL);
        heading.angular_velocity += accel * dt;
    }

    heading.angular_velocity *= (-player::TURN_DAMP * dt).exp();
    heading.angular_velocity = clamp(
        heading.angular_velocity,
        -player::MAX_ANGULAR_VELOCITY,
        player::MAX_ANGULAR_VELOCITY,
    );
    heading.angle = wrap_angle(heading.angle + heading.angular_velocity * dt);
}

/// Moves and turns the player from the current input snapshot.
///
/// Keyboard mode: arrows move, and the ship turns toward the direction of travel.
/// Mouse mode: WASD moves, and the ship faces the pointer.
pub fn player_control_system(
    delta_time: Res<DeltaTime>,
    config: Res<GameConfig>,
    input: Res<InputState>,
    levels: Res<UpgradeLevels>,
    bounds: Res<ArenaBounds>,
    mut player: Query<(&mut Position, &mut Velocity, &mut Heading, &Collider, &mut Iframes), With<PlayerControlled>>,
) {
    let dt = delta_time.seconds;
    let speed = levels.effective().move_speed;

    for (mut position, mut velocity, mut heading, collider, mut iframes) in player.iter_mut() {
        let intent = direction_or_zero(input.movement(config.input_mode));
        velocity.0 = intent * speed;

        match config.input_mode {
            InputMode::Keyboard => {
                let target = (intent != Vec2::ZERO).then(|| intent.y.atan2(intent.x));
                steer_heading(&mut heading, target, dt);
            }
            InputMode::Mouse => {
                let aim = input.pointer - position.0;
                if aim != Vec2::ZERO {
                    heading.angle = aim.y.atan2(aim.x);
                }
                heading.angular_velocity = 0.0;
            }
        }

        position.0 += velocity.0 * dt;
        position.0 = bounds.clamp_circle(position.0, collider.radius);

        if iframes.active() {
            iframes.0 = (iframes.0 - dt).max(0.0);
        }
    }
}
