//! Pure difficulty curves: how tough, fast and numerous enemies are at a given point of a run.
//!
//! Everything here is a function of the game mode and a single ramp value `t`. In wave mode
//! `t` runs from 0 on wave 1 to 1 on the last regular wave; in endless mode it grows without
//! bound with active play time.

use smallvec::SmallVec;

use crate::config::GameMode;
use crate::constants::{endless, enemy, scoring, waves};
use crate::helpers::clamp;
use crate::systems::components::ActorKind;

/// The difficulty at one moment of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Difficulty {
    pub mode: GameMode,
    pub ramp: f32,
}

/// Score and spendable points awarded for a kill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reward {
    pub score: u64,
    pub points: u64,
}

impl Difficulty {
    /// Difficulty for the given wave (wave mode) or active play time (endless mode).
    pub fn at(mode: GameMode, wave: u32, active_seconds: f32) -> Self {
        let ramp = match mode {
            GameMode::Waves => clamp((wave.max(1) - 1) as f32 / waves::RAMP_WAVES, 0.0, 1.0),
            GameMode::Endless => active_seconds.max(0.0) / endless::RAMP_SECONDS,
        };
        Self { mode, ramp }
    }

    pub fn health_multiplier(&self) -> f32 {
        let growth = match self.mode {
            GameMode::Waves => waves::HEALTH_GROWTH,
            GameMode::Endless => endless::HEALTH_GROWTH,
        };
        1.0 + growth * self.ramp * self.ramp
    }

    pub fn speed_multiplier(&self) -> f32 {
        let growth = match self.mode {
            GameMode::Waves => waves::SPEED_GROWTH,
            GameMode::Endless => endless::SPEED_GROWTH,
        };
        1.0 + growth * self.ramp
    }

    /// Relative spawn weights of the regular enemy kinds. Negative weights are floored at zero.
    pub fn composition(&self) -> SmallVec<[(ActorKind, f32); 4]> {
        let t = self.ramp;
        let weights = match self.mode {
            GameMode::Waves => [62.0 - 26.0 * t, 18.0 + 6.0 * t, 14.0 + 14.0 * t, 6.0 + 22.0 * t],
            GameMode::Endless => [60.0 - 24.0 * t, 18.0 + 6.0 * t, 14.0 + 16.0 * t, 8.0 + 20.0 * t],
        };
        ActorKind::REGULAR
            .into_iter()
            .zip(weights)
            .map(|(kind, weight)| (kind, weight.max(0.0)))
            .collect()
    }

    /// Score and points for killing an enemy worth `base_score`.
    pub fn kill_reward(&self, base_score: u32) -> Reward {
        let t = match self.mode {
            GameMode::Waves => self.ramp,
            GameMode::Endless => self.ramp.min(endless::SCORE_RAMP_CAP),
        };
        let score = (base_score as f32 * (1.0 + scoring::SCORE_GROWTH * t * t)).round() as u64;
        let points = ((score as f32 * scoring::POINTS_RATIO).round() as u64).max(1);
        Reward { score, points }
    }
}

/// Seconds between regular spawns in wave mode.
pub fn wave_spawn_interval(ramp: f32) -> f32 {
    (waves::SPAWN_INTERVAL_BASE - waves::SPAWN_INTERVAL_RAMP * ramp).max(waves::SPAWN_INTERVAL_MIN)
}

/// Seconds between spawns in endless mode. Monotonically non-increasing, never below the floor.
pub fn endless_spawn_interval(active_seconds: f32) -> f32 {
    let decay = (-active_seconds.max(0.0) / endless::SPAWN_DECAY_SECONDS).exp();
    (endless::SPAWN_INTERVAL_BASE * decay).max(endless::SPAWN_INTERVAL_MIN)
}

/// Maximum simultaneously alive enemies in endless mode.
pub fn endless_live_cap(active_seconds: f32) -> u32 {
    let grown = (active_seconds.max(0.0) / endless::LIVE_CAP_SECONDS_PER_SLOT).floor() as u32;
    (endless::LIVE_CAP_BASE + grown).min(endless::LIVE_CAP_MAX)
}

/// Probability that an endless spawn is an elite.
pub fn elite_chance(active_seconds: f32) -> f32 {
    if active_seconds < endless::ELITE_THRESHOLD_SECONDS {
        return 0.0;
    }
    ((active_seconds - endless::ELITE_THRESHOLD_SECONDS) / endless::ELITE_RAMP_SECONDS).min(endless::ELITE_CHANCE_MAX)
}

/// Final stats of a freshly spawned regular enemy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub radius: f32,
    pub health: f32,
    pub speed: f32,
    pub contact_damage: f32,
    pub score: u32,
}

/// Scales an archetype's base stats by the difficulty, applying the elite boosts if asked.
///
/// Returns `None` for the boss, which has its own fixed stats.
pub fn enemy_stats(kind: ActorKind, difficulty: &Difficulty, elite: bool) -> Option<EnemyStats> {
    let base = kind.archetype()?;
    let mut stats = EnemyStats {
        radius: base.radius,
        health: (base.health * difficulty.health_multiplier()).round(),
        speed: base.speed * difficulty.speed_multiplier(),
        contact_damage: base.contact_damage,
        score: base.score,
    };
    if elite {
        stats.health = (stats.health * enemy::ELITE_HEALTH_FACTOR).round();
        stats.radius *= enemy::ELITE_RADIUS_FACTOR;
        stats.score = (stats.score as f32 * enemy::ELITE_SCORE_FACTOR).round() as u32;
    }
    Some(stats)
}
