use bevy_ecs::{bundle::Bundle, component::Component, entity::Entity, resource::Resource};
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use smallvec::SmallVec;
use strum_macros::{EnumCount, EnumIter, IntoStaticStr};

use crate::constants::{palette, player};

/// An opaque RGB color, used only by renderers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A tag component for the entity controlled by the player.
#[derive(Default, Component)]
pub struct PlayerControlled;

/// World-space position of an entity's center, in pixels.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Position(pub Vec2);

/// Linear velocity in pixels per second.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity(pub Vec2);

/// Circular collision shape centered on [`Position`].
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub radius: f32,
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn full(max: f32) -> Self {
        Self { current: max, max }
    }

    /// Removes `amount`, never going below zero. Returns true if this blow was fatal.
    pub fn damage(&mut self, amount: f32) -> bool {
        self.current = (self.current - amount).max(0.0);
        self.is_depleted()
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }

    pub fn fraction(&self) -> f32 {
        if self.max > 0.0 {
            (self.current / self.max).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Facing of the player's ship, which is also the aim direction.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Heading {
    /// Radians, kept within `[-PI, PI]`.
    pub angle: f32,
    pub angular_velocity: f32,
}

/// Seconds of contact-damage immunity remaining.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Iframes(pub f32);

impl Iframes {
    pub fn active(&self) -> bool {
        self.0 > 0.0
    }
}

/// The kind of a hostile actor. Regular archetypes carry base stats; the boss is special-cased.
#[derive(Component, EnumCount, EnumIter, IntoStaticStr, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorKind {
    Grunt,
    Runner,
    Brute,
    Tank,
    Boss,
}

/// Base stats of a regular enemy, before wave/time scaling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Archetype {
    pub radius: f32,
    pub health: f32,
    pub speed: f32,
    pub contact_damage: f32,
    pub score: u32,
    pub color: Color,
}

impl ActorKind {
    /// The regular enemy kinds, in weighted-composition order.
    pub const REGULAR: [ActorKind; 4] = [ActorKind::Grunt, ActorKind::Runner, ActorKind::Brute, ActorKind::Tank];

    /// Returns the base stats for regular kinds, or `None` for the boss.
    pub fn archetype(self) -> Option<Archetype> {
        let (radius, health, speed, contact_damage, score, color) = match self {
            ActorKind::Grunt => (14.0, 34.0, 48.0, 10.0, 12, palette::GRUNT),
            ActorKind::Runner => (12.0, 20.0, 70.0, 8.0, 10, palette::RUNNER),
            ActorKind::Brute => (16.0, 50.0, 52.0, 12.0, 16, palette::BRUTE),
            ActorKind::Tank => (20.0, 85.0, 38.0, 14.0, 22, palette::TANK),
            ActorKind::Boss => return None,
        };
        Some(Archetype {
            radius,
            health,
            speed,
            contact_damage,
            score,
            color,
        })
    }

    pub fn color(self) -> Color {
        self.archetype().map_or(palette::BOSS, |a| a.color)
    }

    pub fn is_boss(self) -> bool {
        matches!(self, ActorKind::Boss)
    }
}

/// The shared shape of everything that chases and hurts the player.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Hostile {
    pub speed: f32,
    pub contact_damage: f32,
    pub score_value: u32,
    /// How fast the actor backs off while overlapping the player.
    pub repel_speed: f32,
}

/// Marks a toughened endless-mode enemy.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Elite;

/// Seconds remaining on the "just got hit" flash.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct HitFlash(pub f32);

/// The boss's two-state movement brain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BossState {
    /// Re-targets the player every tick at base speed.
    Seeking,
    /// Committed to a fixed velocity until `remaining` runs out.
    Dashing { remaining: f32, velocity: Vec2 },
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct BossBrain {
    /// Seconds until the next dash may start.
    pub cooldown: f32,
    pub state: BossState,
}

/// A player-fired projectile.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Bolt {
    pub damage: f32,
    /// Further targets this bolt may pass through before it is spent.
    pub pierce_left: u32,
    /// Seconds until the bolt fizzles.
    pub lifetime: f32,
    /// Targets already hit; a bolt never damages the same target twice.
    pub struck: SmallVec<[Entity; 4]>,
}

/// A purely cosmetic particle.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub lifetime: f32,
    pub radius: f32,
    pub color: Color,
}

/// The equip-able periodic radial volley. Only present when the ability is enabled.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct RingBlast {
    /// Seconds until the next volley.
    pub timer: f32,
}

#[derive(Bundle)]
pub struct PlayerBundle {
    pub player: PlayerControlled,
    pub position: Position,
    pub velocity: Velocity,
    pub heading: Heading,
    pub collider: Collider,
    pub health: Health,
    pub iframes: Iframes,
}

impl PlayerBundle {
    pub fn at(position: Vec2) -> Self {
        Self {
            player: PlayerControlled,
            position: Position(position),
            velocity: Velocity::default(),
            heading: Heading::default(),
            collider: Collider { radius: player::RADIUS },
            health: Health::full(player::BASE_HEALTH),
            iframes: Iframes::default(),
        }
    }
}

#[derive(Bundle)]
pub struct HostileBundle {
    pub kind: ActorKind,
    pub position: Position,
    pub collider: Collider,
    pub health: Health,
    pub hostile: Hostile,
    pub hit_flash: HitFlash,
}

#[derive(Bundle)]
pub struct BossBundle {
    pub hostile: HostileBundle,
    pub velocity: Velocity,
    pub brain: BossBrain,
}

#[derive(Bundle)]
pub struct BoltBundle {
    pub bolt: Bolt,
    pub position: Position,
    pub velocity: Velocity,
    pub collider: Collider,
}

#[derive(Bundle)]
pub struct ParticleBundle {
    pub particle: Particle,
    pub position: Position,
    pub velocity: Velocity,
}

/// Seconds simulated by the current tick, and the number of ticks simulated so far.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct DeltaTime {
    pub seconds: f32,
    pub ticks: u64,
}

/// The simulation's random source. Seeded once per game, so a fixed seed replays exactly.
#[derive(Resource, Debug)]
pub struct GameRng(pub SmallRng);

impl GameRng {
    pub fn seeded(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }

    pub fn from_os() -> Self {
        Self(SmallRng::from_os_rng())
    }
}
