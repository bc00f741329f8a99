//! Read-only views of the world for whatever draws the game.
//!
//! The simulation never draws anything itself. Each frame the driver captures a
//! [`RenderSnapshot`] and a [`HudState`] and hands them to a [`Renderer`] and a [`HudSink`].
//! Both are allowed to fail; failures are logged by the driver and the game keeps running.

use bevy_ecs::{
    query::{Has, With, Without},
    world::World,
};
use glam::Vec2;

use crate::config::{GameConfig, GameMode};
use crate::constants::{palette, MILESTONE_WAVE};
use crate::error::RenderError;
use crate::systems::formatting::{format_count, format_elapsed, format_health};
use crate::systems::{
    ActorKind, ArenaBounds, Bolt, BossBrain, Collider, Color, Elite, Health, Heading, HitFlash, Hostile, Iframes,
    Particle, PlayerControlled, Position, RunPhase, RunState, SpawnDirector,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerSprite {
    pub position: Vec2,
    pub radius: f32,
    pub angle: f32,
    /// Drawn blinking while contact damage is ignored.
    pub invulnerable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostileSprite {
    pub kind: ActorKind,
    pub position: Vec2,
    pub radius: f32,
    pub color: Color,
    pub health_fraction: f32,
    pub flashing: bool,
    pub elite: bool,
    pub dashing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoltSprite {
    pub position: Vec2,
    pub radius: f32,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSprite {
    pub position: Vec2,
    pub radius: f32,
    pub color: Color,
    /// Remaining lifetime in seconds, usable as a fade.
    pub lifetime: f32,
}

/// Everything visible in one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSnapshot {
    pub phase: RunPhase,
    pub bounds: ArenaBounds,
    pub player: Option<PlayerSprite>,
    pub hostiles: Vec<HostileSprite>,
    pub bolts: Vec<BoltSprite>,
    pub particles: Vec<ParticleSprite>,
}

impl RenderSnapshot {
    pub fn capture(world: &mut World) -> Self {
        let phase = *world.resource::<RunPhase>();
        let bounds = *world.resource::<ArenaBounds>();

        let player = world
            .query_filtered::<(&Position, &Collider, &Heading, &Iframes), With<PlayerControlled>>()
            .iter(world)
            .next()
            .map(|(position, collider, heading, iframes)| PlayerSprite {
                position: position.0,
                radius: collider.radius,
                angle: heading.angle,
                invulnerable: iframes.active(),
            });

        let hostiles = world
            .query_filtered::<(
                &ActorKind,
                &Position,
                &Collider,
                &Health,
                &HitFlash,
                Has<Elite>,
                Option<&BossBrain>,
            ), With<Hostile>>()
            .iter(world)
            .map(|(kind, position, collider, health, flash, elite, brain)| HostileSprite {
                kind: *kind,
                position: position.0,
                radius: collider.radius,
                color: kind.color(),
                health_fraction: health.fraction(),
                flashing: flash.0 > 0.0,
                elite,
                dashing: brain.is_some_and(BossBrain::is_dashing),
            })
            .collect();

        let bolts = world
            .query_filtered::<(&Position, &Collider), (With<Bolt>, Without<Hostile>)>()
            .iter(world)
            .map(|(position, collider)| BoltSprite {
                position: position.0,
                radius: collider.radius,
                color: palette::BOLT,
            })
            .collect();

        let particles = world
            .query::<(&Position, &Particle)>()
            .iter(world)
            .map(|(position, particle)| ParticleSprite {
                position: position.0,
                radius: particle.radius,
                color: particle.color,
                lifetime: particle.lifetime,
            })
            .collect();

        Self {
            phase,
            bounds,
            player,
            hostiles,
            bolts,
            particles,
        }
    }
}

/// The heads-up display, already formatted for presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct HudState {
    pub phase: RunPhase,
    pub mode: GameMode,
    pub score: String,
    pub points: String,
    /// `Wave 7`, `Boss`, or elapsed `m:ss` in endless mode.
    pub wave_label: String,
    /// Enemies alive plus enemies still scheduled to spawn this wave.
    pub remaining: u32,
    pub best_wave: u32,
    pub high_score: String,
    pub health_fraction: f32,
    pub health_text: String,
    pub auto_fire: bool,
}

impl HudState {
    pub fn capture(world: &mut World) -> Self {
        let phase = *world.resource::<RunPhase>();
        let run = *world.resource::<RunState>();
        let pending = world.resource::<SpawnDirector>().pending();
        let (mode, auto_fire) = {
            let config = world.resource::<GameConfig>();
            (config.game_mode, config.auto_fire)
        };

        let alive = world.query_filtered::<(), With<Hostile>>().iter(world).count() as u32;
        let (health_fraction, health_text) = world
            .query_filtered::<&Health, With<PlayerControlled>>()
            .iter(world)
            .next()
            .map_or((0.0, format_health(0.0, 0.0)), |health| {
                (health.fraction(), format_health(health.current, health.max))
            });

        let wave_label = match mode {
            GameMode::Waves if run.wave >= MILESTONE_WAVE => "Boss".to_string(),
            GameMode::Waves => format!("Wave {}", run.wave),
            GameMode::Endless => format_elapsed(run.active_time),
        };
        let remaining = match mode {
            GameMode::Waves => alive + pending,
            GameMode::Endless => alive,
        };

        Self {
            phase,
            mode,
            score: format_count(run.score),
            points: format_count(run.points),
            wave_label,
            remaining,
            best_wave: run.best_wave,
            high_score: format_count(run.high_score),
            health_fraction,
            health_text,
            auto_fire,
        }
    }
}

/// Draws a frame.
pub trait Renderer {
    fn render(&mut self, snapshot: &RenderSnapshot) -> Result<(), RenderError>;
}

/// Presents the HUD.
pub trait HudSink {
    fn update(&mut self, hud: &HudState) -> Result<(), RenderError>;
}
