use bevy_ecs::{
    query::{With, Without},
    resource::Resource,
    system::{Commands, Query, Res, ResMut},
};
use glam::Vec2;
use rand::Rng;
use tracing::{debug, trace};

use crate::config::{GameConfig, GameMode};
use crate::constants::{boss, MILESTONE_WAVE};
use crate::helpers::pick_weighted;
use crate::systems::arena::ArenaBounds;
use crate::systems::components::{
    ActorKind, BossBrain, BossBundle, Collider, DeltaTime, Elite, GameRng, Health, HitFlash, Hostile,
    HostileBundle, PlayerControlled, Position, Velocity,
};
use crate::systems::difficulty::{elite_chance, endless_live_cap, endless_spawn_interval, enemy_stats, wave_spawn_interval, Difficulty};
use crate::systems::stage::RunState;

/// Paces regular enemy spawns.
///
/// In wave mode `spawned` never exceeds `total_to_spawn`. Endless mode ignores the total and
/// only counts.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct SpawnDirector {
    pub total_to_spawn: u32,
    pub spawned: u32,
    /// Seconds until the next spawn; zero or below means one is due.
    pub timer: f32,
}

impl SpawnDirector {
    /// A fresh director that spawns its first enemy on the next tick.
    pub fn new(total_to_spawn: u32) -> Self {
        Self {
            total_to_spawn,
            spawned: 0,
            timer: 0.0,
        }
    }

    pub fn finished(&self) -> bool {
        self.spawned >= self.total_to_spawn
    }

    /// Enemies scheduled for this wave that have not appeared yet.
    pub fn pending(&self) -> u32 {
        self.total_to_spawn.saturating_sub(self.spawned)
    }
}

/// The boss, ready to spawn at `position`.
pub fn boss_bundle(position: Vec2) -> BossBundle {
    let health = (boss::BASE_HEALTH * (1.0 + boss::HEALTH_GROWTH)).round();
    BossBundle {
        hostile: HostileBundle {
            kind: ActorKind::Boss,
            position: Position(position),
            collider: Collider { radius: boss::RADIUS },
            health: Health::full(health),
            hostile: Hostile {
                speed: boss::SPEED,
                contact_damage: boss::CONTACT_DAMAGE,
                score_value: boss::SCORE,
                repel_speed: boss::REPEL_SPEED,
            },
            hit_flash: HitFlash::default(),
        },
        velocity: Velocity::default(),
        brain: BossBrain::new(),
    }
}

/// Rolls the kind (and, in endless mode, the elite flag) of the next regular enemy.
pub fn roll_enemy<R: Rng + ?Sized>(rng: &mut R, difficulty: &Difficulty, active_seconds: f32) -> (ActorKind, bool) {
    let kind = pick_weighted(&difficulty.composition(), rng.random::<f32>()).unwrap_or(ActorKind::Grunt);
    let elite = match difficulty.mode {
        GameMode::Waves => false,
        GameMode::Endless => rng.random::<f32>() < elite_chance(active_seconds),
    };
    (kind, elite)
}

/// A scaled regular enemy, ready to spawn at `position`. `None` for the boss.
pub fn enemy_bundle(kind: ActorKind, difficulty: &Difficulty, elite: bool, position: Vec2) -> Option<HostileBundle> {
    let stats = enemy_stats(kind, difficulty, elite)?;
    Some(HostileBundle {
        kind,
        position: Position(position),
        collider: Collider { radius: stats.radius },
        health: Health::full(stats.health),
        hostile: Hostile {
            speed: stats.speed,
            contact_damage: stats.contact_damage,
            score_value: stats.score,
            repel_speed: crate::constants::enemy::REPEL_SPEED,
        },
        hit_flash: HitFlash::default(),
    })
}

#[allow(clippy::too_many_arguments)]
pub fn spawn_system(
    mut commands: Commands,
    delta_time: Res<DeltaTime>,
    config: Res<GameConfig>,
    run: Res<RunState>,
    bounds: Res<ArenaBounds>,
    mut director: ResMut<SpawnDirector>,
    mut rng: ResMut<GameRng>,
    player: Query<&Position, With<PlayerControlled>>,
    enemies: Query<(), (With<Hostile>, Without<BossBrain>)>,
) {
    let interval = match config.game_mode {
        GameMode::Waves => {
            if run.wave >= MILESTONE_WAVE || director.finished() {
                return;
            }
            director.timer -= delta_time.seconds;
            if director.timer > 0.0 {
                return;
            }
            wave_spawn_interval(Difficulty::at(GameMode::Waves, run.wave, run.active_time).ramp)
        }
        GameMode::Endless => {
            director.timer -= delta_time.seconds;
            if director.timer > 0.0 {
                return;
            }
            let cap = endless_live_cap(run.active_time);
            if enemies.iter().count() as u32 >= cap {
                // Stay due until a slot frees up.
                director.timer = 0.0;
                trace!(cap, "Live cap reached; holding spawn");
                return;
            }
            endless_spawn_interval(run.active_time)
        }
    };

    let difficulty = Difficulty::at(config.game_mode, run.wave, run.active_time);
    let player_position = player.iter().next().map_or_else(|| bounds.center(), |p| p.0);
    let (kind, elite) = roll_enemy(&mut rng.0, &difficulty, run.active_time);
    let position = bounds.safe_spawn_point(&mut rng.0, player_position);

    if let Some(bundle) = enemy_bundle(kind, &difficulty, elite, position) {
        debug!(
            kind = <&'static str>::from(kind),
            elite,
            hp = bundle.health.max,
            x = position.x,
            y = position.y,
            "Spawning enemy"
        );
        let mut entity = commands.spawn(bundle);
        if elite {
            entity.insert(Elite);
        }
    }

    director.spawned += 1;
    director.timer = interval;
}
