use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::config::{GameMode, InputMode};
use crate::systems::components::ActorKind;

/// Requests from the player (or whatever stands in for them) to change the run lifecycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameCommand {
    /// Start, resume, or advance past whichever overlay is showing.
    Continue,
    TogglePause,
    /// Abandon the current run and start a fresh one.
    Restart,
    /// Buy the shop offer at this index.
    Purchase(usize),
    /// The viewport changed size, in pixels.
    Resize(Vec2),
    ToggleAutoFire,
    SetInputMode(InputMode),
    SetGameMode(GameMode),
}

/// Things that happened during a tick, for audio, effects and HUD glue to react to.
#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub enum GameEvent {
    EnemyKilled { kind: ActorKind, elite: bool, score: u64, points: u64 },
    BossDefeated { score: u64 },
    PlayerHit { damage: f32, health: f32 },
    PlayerDied { wave: u32, score: u64 },
    WaveStarted { wave: u32 },
    WaveCleared { wave: u32 },
    RunWon { score: u64 },
    ShopOpened,
    /// The best wave or high score improved and should be persisted.
    RecordsChanged,
    RingBlastFired { bolts: u32 },
}
