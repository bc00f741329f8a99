//! This module contains all the tuning constants used by the simulation.

use std::f32::consts::PI;
use std::time::Duration;

use glam::Vec2;

use crate::systems::Color;

pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// Largest simulation step accepted by a single tick, in seconds.
///
/// Frames that took longer (e.g. after the window was backgrounded) are simulated as if they took this long.
pub const MAX_FRAME_STEP: f32 = 0.033;

/// The viewport used until the first resize arrives.
pub const DEFAULT_VIEWPORT: Vec2 = Vec2::new(960.0, 540.0);

/// The wave that spawns the boss instead of regular enemies. Defeating it wins the run.
pub const MILESTONE_WAVE: u32 = 20;

pub mod arena {
    /// Distance between the viewport edge and the playable rectangle.
    pub const BOUNDARY_INSET: f32 = 28.0;
    /// Spawn points sit this far inside the playable rectangle.
    pub const SPAWN_EDGE_PADDING: f32 = 14.0;
    /// Enemies never spawn closer than this to the player (unless placement gives up).
    pub const SAFE_SPAWN_RADIUS: f32 = 160.0;
    pub const SPAWN_PLACEMENT_RETRIES: u32 = 80;
    /// Bolts are discarded once they travel this far outside the playable rectangle.
    pub const BOLT_ESCAPE_MARGIN: f32 = 80.0;
}

pub mod player {
    pub const RADIUS: f32 = 18.0;
    pub const BASE_HEALTH: f32 = 100.0;
    /// Invulnerability window after taking contact damage, in seconds.
    pub const IFRAMES: f32 = 0.35;
    pub const CONTACT_KNOCKBACK: f32 = 190.0;
    /// Fraction of [`CONTACT_KNOCKBACK`] applied as an instantaneous position nudge.
    pub const KNOCKBACK_NUDGE: f32 = 0.06;

    /// Angular acceleration ceiling in keyboard-aim mode (rad/s²).
    pub const TURN_ACCEL: f32 = 300.0;
    /// Angular velocity damping (1/s). Higher values stop the turn sooner.
    pub const TURN_DAMP: f32 = 14.0;
    /// Angular velocity ceiling (rad/s).
    pub const MAX_ANGULAR_VELOCITY: f32 = 9.5;
}

pub mod weapon {
    use super::PI;

    pub const BASE_FIRE_RATE: f32 = 3.0;
    pub const FIRE_RATE_PER_LEVEL: f32 = 0.55;
    pub const BASE_DAMAGE: f32 = 16.0;
    pub const DAMAGE_PER_LEVEL: f32 = 4.0;
    pub const BASE_BOLT_SPEED: f32 = 520.0;
    pub const BOLT_SPEED_PER_LEVEL: f32 = 55.0;
    pub const BASE_MOVE_SPEED: f32 = 280.0;
    pub const MOVE_SPEED_PER_LEVEL: f32 = 18.0;

    pub const MUZZLE_OFFSET: f32 = 28.0;
    pub const BOLT_RADIUS: f32 = 5.0;
    pub const BOLT_LIFETIME: f32 = 1.6;

    /// Half-angle of the spread cone at spread level 1 is `SPREAD_BASE_CONE * (1 + SPREAD_CONE_GROWTH)`.
    pub const SPREAD_BASE_CONE: f32 = PI / 52.0;
    pub const SPREAD_CONE_GROWTH: f32 = 0.7;
}

pub mod ring_blast {
    pub const BASE_INTERVAL: f32 = 4.0;
    pub const INTERVAL_PER_LEVEL: f32 = 0.35;
    pub const MIN_INTERVAL: f32 = 1.5;
    pub const BASE_BOLTS: u32 = 10;
    pub const BOLTS_PER_LEVEL: u32 = 2;
    pub const DAMAGE_FACTOR: f32 = 0.6;
    pub const SPEED_FACTOR: f32 = 0.8;
    pub const LIFETIME: f32 = 0.7;
}

pub mod enemy {
    /// Speed at which an enemy backs off while overlapping the player.
    pub const REPEL_SPEED: f32 = 40.0;
    pub const HIT_FLASH: f32 = 0.10;

    pub const ELITE_HEALTH_FACTOR: f32 = 2.2;
    pub const ELITE_RADIUS_FACTOR: f32 = 1.25;
    pub const ELITE_SCORE_FACTOR: f32 = 2.0;
}

pub mod boss {
    pub const RADIUS: f32 = 46.0;
    pub const BASE_HEALTH: f32 = 1700.0;
    pub const HEALTH_GROWTH: f32 = 0.6;
    pub const SPEED: f32 = 58.0;
    pub const CONTACT_DAMAGE: f32 = 18.0;
    pub const SCORE: u32 = 700;
    pub const REPEL_SPEED: f32 = 55.0;

    /// Delay before the first dash after the boss appears.
    pub const FIRST_DASH_DELAY: f32 = 2.4;
    pub const DASH_COOLDOWN: (f32, f32) = (2.0, 3.1);
    pub const DASH_DURATION: (f32, f32) = (0.35, 0.55);
    pub const DASH_SPEED_FACTOR: f32 = 3.1;
}

pub mod waves {
    /// Number of waves over which the difficulty ramp goes from 0 to 1.
    pub const RAMP_WAVES: f32 = 19.0;
    pub const ENEMY_COUNT: u32 = 20;
    pub const ENEMY_GROWTH: u32 = 0;
    pub const ENEMY_COUNT_CAP: u32 = 200;

    pub const SPAWN_INTERVAL_BASE: f32 = 0.45;
    pub const SPAWN_INTERVAL_RAMP: f32 = 0.18;
    pub const SPAWN_INTERVAL_MIN: f32 = 0.18;

    pub const HEALTH_GROWTH: f32 = 2.1;
    pub const SPEED_GROWTH: f32 = 0.18;
}

pub mod endless {
    /// Seconds of active play that correspond to a ramp of 1.0.
    pub const RAMP_SECONDS: f32 = 120.0;
    pub const HEALTH_GROWTH: f32 = 2.4;
    pub const SPEED_GROWTH: f32 = 0.22;

    pub const SPAWN_INTERVAL_BASE: f32 = 0.9;
    pub const SPAWN_INTERVAL_MIN: f32 = 0.14;
    /// Time constant of the exponential spawn-interval decay, in seconds.
    pub const SPAWN_DECAY_SECONDS: f32 = 90.0;

    pub const LIVE_CAP_BASE: u32 = 24;
    pub const LIVE_CAP_SECONDS_PER_SLOT: f32 = 6.0;
    pub const LIVE_CAP_MAX: u32 = 160;

    pub const ELITE_THRESHOLD_SECONDS: f32 = 90.0;
    pub const ELITE_RAMP_SECONDS: f32 = 600.0;
    pub const ELITE_CHANCE_MAX: f32 = 0.25;

    /// Kill rewards stop growing past this ramp.
    pub const SCORE_RAMP_CAP: f32 = 3.0;
    /// The shop opens after every interval of active play.
    pub const SHOP_INTERVAL_SECONDS: f32 = 60.0;
}

pub mod scoring {
    pub const SCORE_GROWTH: f32 = 1.8;
    /// Share of each kill's score that becomes spendable points.
    pub const POINTS_RATIO: f32 = 0.22;
}

pub mod particles {
    pub const DRAG: f32 = 6.0;
    pub const EXPLOSION_COUNT: (u32, u32) = (10, 20);
    pub const EXPLOSION_SPEED: (f32, f32) = (45.0, 210.0);
    pub const EXPLOSION_LIFETIME: (f32, f32) = (0.20, 0.50);
    pub const EXPLOSION_RADIUS: (f32, f32) = (2.0, 4.0);

    pub const SPARK_SPEED: f32 = 70.0;
    pub const SPARK_LIFETIME: f32 = 0.12;
    pub const SPARK_RADIUS: f32 = 2.0;
}

pub mod palette {
    use super::Color;

    pub const BOLT: Color = Color::rgb(0x52, 0xf5, 0xff);
    pub const BOSS: Color = Color::rgb(0xff, 0xd1, 0x66);
    pub const GRUNT: Color = Color::rgb(0xe6, 0xee, 0xf8);
    pub const RUNNER: Color = Color::rgb(0x9e, 0xf6, 0xff);
    pub const BRUTE: Color = Color::rgb(0xff, 0x9b, 0xb3);
    pub const TANK: Color = Color::rgb(0xc4, 0xb5, 0xfd);
}
