use bevy_ecs::{
    event::EventWriter,
    query::With,
    resource::Resource,
    system::{Query, Res, ResMut},
};
use strum_macros::IntoStaticStr;
use tracing::{debug, info};

use crate::config::{GameConfig, GameMode};
use crate::constants::MILESTONE_WAVE;
use crate::error::GameError;
use crate::events::GameEvent;
use crate::systems::components::{DeltaTime, Health, Hostile, PlayerControlled};
use crate::systems::spawn::SpawnDirector;

/// Which screen the run is on. Only `Playing` advances the simulation.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, IntoStaticStr)]
pub enum RunPhase {
    /// The title overlay, before the first run.
    #[default]
    Start,
    Playing,
    Paused,
    /// Between waves (or at an endless milestone), spending points.
    Shop,
    GameOver,
    Win,
}

impl RunPhase {
    pub fn is_playing(&self) -> bool {
        matches!(self, RunPhase::Playing)
    }
}

/// Score, economy and progress of the current run, plus the all-time records.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct RunState {
    /// Current wave. In endless mode, one more than the number of shop milestones passed.
    pub wave: u32,
    /// Seconds spent in the `Playing` phase this run.
    pub active_time: f32,
    pub score: u64,
    /// Spendable currency; reset with the run.
    pub points: u64,
    pub best_wave: u32,
    pub high_score: u64,
    /// Active time at which endless mode next opens the shop.
    pub next_shop_at: f32,
}

impl Default for RunState {
    fn default() -> Self {
        Self {
            wave: 1,
            active_time: 0.0,
            score: 0,
            points: 0,
            best_wave: 1,
            high_score: 0,
            next_shop_at: 0.0,
        }
    }
}

impl RunState {
    /// Folds the current run into the records. Returns true if either record improved.
    pub fn commit_records(&mut self) -> bool {
        let improved = self.wave > self.best_wave || self.score > self.high_score;
        self.best_wave = self.best_wave.max(self.wave);
        self.high_score = self.high_score.max(self.score);
        improved
    }

    /// Clears the per-run counters, keeping the records.
    pub fn reset_run(&mut self, shop_interval: f32) {
        self.wave = 1;
        self.active_time = 0.0;
        self.score = 0;
        self.points = 0;
        self.next_shop_at = shop_interval;
    }
}

/// Run condition for everything that simulates.
pub fn is_playing(phase: Res<RunPhase>) -> bool {
    phase.is_playing()
}

/// Advances the active-time counter. Only scheduled while playing.
pub fn clock_system(delta_time: Res<DeltaTime>, mut run: ResMut<RunState>) {
    run.active_time += delta_time.seconds;
}

/// Ends the tick by checking for death, wave completion and endless shop milestones, in that order.
#[allow(clippy::too_many_arguments)]
pub fn progress_system(
    mut phase: ResMut<RunPhase>,
    mut run: ResMut<RunState>,
    director: Res<SpawnDirector>,
    config: Res<GameConfig>,
    player: Query<&Health, With<PlayerControlled>>,
    hostiles: Query<(), With<Hostile>>,
    mut events: EventWriter<GameEvent>,
    mut errors: EventWriter<GameError>,
) {
    if player.is_empty() {
        errors.write(GameError::InvalidState("no player entity while playing".to_string()));
        return;
    }

    if player.iter().any(Health::is_depleted) {
        info!(wave = run.wave, score = run.score, "Player died; run over");
        *phase = RunPhase::GameOver;
        events.write(GameEvent::PlayerDied {
            wave: run.wave,
            score: run.score,
        });
        if run.commit_records() {
            events.write(GameEvent::RecordsChanged);
        }
        return;
    }

    match config.game_mode {
        GameMode::Waves => {
            if !director.finished() || !hostiles.is_empty() {
                return;
            }

            events.write(GameEvent::WaveCleared { wave: run.wave });
            if run.wave >= MILESTONE_WAVE {
                info!(score = run.score, "Boss defeated; run won");
                *phase = RunPhase::Win;
                events.write(GameEvent::RunWon { score: run.score });
                if run.commit_records() {
                    events.write(GameEvent::RecordsChanged);
                }
            } else {
                debug!(wave = run.wave, points = run.points, "Wave cleared; opening shop");
                *phase = RunPhase::Shop;
                events.write(GameEvent::ShopOpened);
            }
        }
        GameMode::Endless => {
            let interval = config.endless_shop_interval;
            if interval <= 0.0 || run.active_time < run.next_shop_at {
                return;
            }

            run.next_shop_at += interval;
            debug!(
                active_time = run.active_time,
                next_shop_at = run.next_shop_at,
                "Endless milestone reached; opening shop"
            );
            *phase = RunPhase::Shop;
            events.write(GameEvent::ShopOpened);
            if run.commit_records() {
                events.write(GameEvent::RecordsChanged);
            }
        }
    }
}
