//! This module contains the main game logic and state.

use bevy_ecs::entity::Entity;
use bevy_ecs::event::{EventRegistry, Events};
use bevy_ecs::query::{Or, With};
use bevy_ecs::schedule::{ExecutorKind, IntoScheduleConfigs, Schedule, SystemSet};
use bevy_ecs::system::RunSystemOnce;
use bevy_ecs::world::World;
use glam::Vec2;
use tracing::{debug, info, trace, warn};

use crate::config::{GameConfig, GameMode, InputMode};
use crate::constants::{player, MAX_FRAME_STEP, MILESTONE_WAVE};
use crate::error::{GameError, GameResult};
use crate::events::{GameCommand, GameEvent};
use crate::formatter;
use crate::render::{HudState, RenderSnapshot};
use crate::store::{Preferences, RecordStore, Records, SaveData};
use crate::systems::{
    boss_bundle, bolt_collision_system, bolt_movement_system, boss_system, clamp_to_arena_system, clock_system,
    contact_damage_system, enemy_movement_system, hit_flash_system, is_playing, particle_system, player_control_system,
    progress_system, ring_blast_interval, ring_blast_system, spawn_system, weapon_system, ArenaBounds, Bolt, DeltaTime,
    GameRng, Heading, Health, Hostile, Iframes, InputState, Particle, PlayerBundle, PlayerControlled, Position,
    PurchaseOutcome, RingBlast, RunPhase, RunState, ShopCatalog, ShopEntry, SpawnDirector, Upgrade, UpgradeLevels,
    Velocity, WeaponState,
};

/// System set for all gameplay systems to ensure they run after input processing
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
enum GameplaySet {
    /// Gameplay systems that process inputs
    Input,
    /// Gameplay systems that update the game state
    Update,
    /// Gameplay systems that respond to the outcome of the update
    Respond,
}

/// Core game state manager built on the Bevy ECS architecture.
///
/// The `World` holds every actor plus the run, economy and arena resources; the `Schedule`
/// runs the simulation systems in a fixed order, and only while the run phase is `Playing`.
/// Lifecycle transitions (new run, next wave, pause, purchase, resize) are methods on `Game`
/// that operate on the world directly, between ticks.
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
    store: Box<dyn RecordStore>,
}

impl Game {
    /// Builds the world for `config`, loading the records from `store`.
    ///
    /// The game starts on the title phase with the player standing in the middle of the arena.
    pub fn new(config: GameConfig, store: Box<dyn RecordStore>) -> Game {
        info!(mode = <&'static str>::from(config.game_mode), "Starting game initialization");
        let records = store.load_or_default().records;

        let mut world = World::default();
        let mut schedule = Schedule::default();

        Self::setup_ecs(&mut world);
        Self::insert_resources(&mut world, config, records);
        Self::spawn_player(&mut world);
        Self::configure_schedule(&mut schedule);

        info!(
            best_wave = records.best_wave,
            high_score = records.high_score,
            "Game initialization completed"
        );
        Game { world, schedule, store }
    }

    fn setup_ecs(world: &mut World) {
        EventRegistry::register_event::<GameError>(world);
        EventRegistry::register_event::<GameEvent>(world);
    }

    fn insert_resources(world: &mut World, config: GameConfig, records: Records) {
        let rng = match config.seed {
            Some(seed) => {
                debug!(seed, "Seeding simulation RNG");
                GameRng::seeded(seed)
            }
            None => GameRng::from_os(),
        };

        world.insert_resource(ArenaBounds::from_viewport(config.viewport()));
        world.insert_resource(ShopCatalog::new(config.ring_blast));
        world.insert_resource(RunState {
            best_wave: records.best_wave,
            high_score: records.high_score,
            next_shop_at: config.endless_shop_interval,
            ..RunState::default()
        });
        world.insert_resource(config);
        world.insert_resource(rng);
        world.insert_resource(RunPhase::Start);
        world.insert_resource(UpgradeLevels::default());
        world.insert_resource(SpawnDirector::default());
        world.insert_resource(WeaponState::default());
        world.insert_resource(InputState::default());
        world.insert_resource(DeltaTime::default());
    }

    fn spawn_player(world: &mut World) {
        let center = world.resource::<ArenaBounds>().center();
        let ring_blast = world.resource::<GameConfig>().ring_blast;
        let mut player = world.spawn(PlayerBundle::at(center));
        if ring_blast {
            player.insert(RingBlast::default());
        }
    }

    fn configure_schedule(schedule: &mut Schedule) {
        schedule.set_executor_kind(ExecutorKind::SingleThreaded);
        schedule
            .add_systems((
                player_control_system.in_set(GameplaySet::Input),
                (
                    clock_system,
                    spawn_system,
                    weapon_system,
                    ring_blast_system,
                    bolt_movement_system,
                    enemy_movement_system,
                    boss_system,
                    contact_damage_system,
                    bolt_collision_system,
                    particle_system,
                    hit_flash_system,
                )
                    .chain()
                    .in_set(GameplaySet::Update),
                progress_system.in_set(GameplaySet::Respond),
            ))
            .configure_sets(
                (
                    GameplaySet::Input.run_if(is_playing),
                    GameplaySet::Update.run_if(is_playing),
                    GameplaySet::Respond.run_if(is_playing),
                )
                    .chain(),
            );
    }

    /// Executes one frame of game logic by running all scheduled ECS systems.
    ///
    /// `dt` is clamped to [`MAX_FRAME_STEP`], so a long stall never turns into one huge step.
    /// Errors reported by systems are logged here; they never stop the game.
    ///
    /// Returns the gameplay events raised during the tick.
    pub fn tick(&mut self, dt: f32) -> Vec<GameEvent> {
        let seconds = if dt.is_finite() { dt.clamp(0.0, MAX_FRAME_STEP) } else { 0.0 };
        let ticks = self.world.resource::<DeltaTime>().ticks + 1;
        self.world.insert_resource(DeltaTime { seconds, ticks });
        formatter::set_tick(ticks);

        self.schedule.run(&mut self.world);

        let errors: Vec<GameError> = self.world.resource_mut::<Events<GameError>>().drain().collect();
        for error in errors {
            warn!(tick = ticks, "Recovered from error: {error}");
        }

        let events = self.drain_events();
        if events.contains(&GameEvent::RecordsChanged) {
            self.persist();
        }
        events
    }

    fn drain_events(&mut self) -> Vec<GameEvent> {
        self.world.resource_mut::<Events<GameEvent>>().drain().collect()
    }

    pub fn phase(&self) -> RunPhase {
        *self.world.resource::<RunPhase>()
    }

    pub fn run_state(&self) -> RunState {
        *self.world.resource::<RunState>()
    }

    pub fn config(&self) -> &GameConfig {
        self.world.resource::<GameConfig>()
    }

    pub fn bounds(&self) -> ArenaBounds {
        *self.world.resource::<ArenaBounds>()
    }

    /// Replaces the input snapshot the next tick will read.
    pub fn set_input(&mut self, input: InputState) {
        *self.world.resource_mut::<InputState>() = input;
    }

    /// Applies a lifecycle command. Commands that make no sense in the current phase are ignored.
    pub fn command(&mut self, command: GameCommand) {
        trace!(?command, phase = <&'static str>::from(self.phase()), "Handling command");
        match command {
            GameCommand::Continue => self.continue_run(),
            GameCommand::TogglePause => self.toggle_pause(),
            GameCommand::Restart => self.start_new_run(),
            GameCommand::Purchase(index) => {
                self.purchase(index);
            }
            GameCommand::Resize(viewport) => self.resize(viewport),
            GameCommand::ToggleAutoFire => {
                let mut config = self.world.resource_mut::<GameConfig>();
                config.auto_fire = !config.auto_fire;
                info!(auto_fire = config.auto_fire, "Toggled auto-fire");
            }
            GameCommand::SetInputMode(mode) => self.set_input_mode(mode),
            GameCommand::SetGameMode(mode) => self.set_game_mode(mode),
        }
    }

    /// Starts a run from the title or an ending, resumes from pause, or leaves the shop.
    pub fn continue_run(&mut self) {
        match self.phase() {
            RunPhase::Start | RunPhase::GameOver | RunPhase::Win => self.start_new_run(),
            RunPhase::Paused => self.set_phase(RunPhase::Playing),
            RunPhase::Shop => {
                let (mode, wave) = (self.config().game_mode, self.run_state().wave);
                match mode {
                    GameMode::Waves => self.start_wave(wave + 1),
                    GameMode::Endless => {
                        self.world.resource_mut::<RunState>().wave += 1;
                    }
                }
                self.set_phase(RunPhase::Playing);
            }
            RunPhase::Playing => {}
        }
    }

    /// Pauses or resumes. Pausing releases the trigger so firing doesn't stick on resume.
    pub fn toggle_pause(&mut self) {
        match self.phase() {
            RunPhase::Playing => {
                self.world.resource_mut::<InputState>().release_trigger();
                self.set_phase(RunPhase::Paused);
            }
            RunPhase::Paused => self.set_phase(RunPhase::Playing),
            _ => {}
        }
    }

    /// Resets score, points and upgrades and starts wave 1. Records are kept.
    pub fn start_new_run(&mut self) {
        let interval = self.config().endless_shop_interval;
        self.world.resource_mut::<RunState>().reset_run(interval);
        self.world.resource_mut::<UpgradeLevels>().reset();
        info!(mode = <&'static str>::from(self.config().game_mode), "Starting new run");

        self.start_wave(1);
        self.set_phase(RunPhase::Playing);
    }

    /// Resets the arena for `wave`: full health, player centered, every hostile, bolt and
    /// particle removed. The ring blast waits a full interval before its first volley. The
    /// milestone wave spawns the boss instead of regular enemies.
    pub fn start_wave(&mut self, wave: u32) {
        let center = self.bounds().center();
        let ring_interval = ring_blast_interval(self.world.resource::<UpgradeLevels>().level(Upgrade::RingBlast));

        let mut players = self.world.query_filtered::<(
            &mut Position,
            &mut Velocity,
            &mut Heading,
            &mut Health,
            &mut Iframes,
            Option<&mut RingBlast>,
        ), With<PlayerControlled>>();
        for (mut position, mut velocity, mut heading, mut health, mut iframes, ring) in players.iter_mut(&mut self.world) {
            position.0 = center;
            velocity.0 = Vec2::ZERO;
            heading.angular_velocity = 0.0;
            *health = Health::full(player::BASE_HEALTH);
            iframes.0 = 0.0;
            if let Some(mut ring) = ring {
                ring.timer = ring_interval;
            }
        }

        let doomed: Vec<Entity> = self
            .world
            .query_filtered::<Entity, Or<(With<Hostile>, With<Bolt>, With<Particle>)>>()
            .iter(&self.world)
            .collect();
        for entity in doomed {
            self.world.despawn(entity);
        }

        let config = self.config().clone();
        self.world.resource_mut::<RunState>().wave = wave;
        self.world.resource_mut::<WeaponState>().cooldown = 0.0;

        let director = match config.game_mode {
            GameMode::Waves if wave < MILESTONE_WAVE => SpawnDirector::new(config.wave_enemy_total(wave)),
            GameMode::Waves => {
                let bounds = self.bounds();
                let position = bounds.safe_spawn_point(&mut self.world.resource_mut::<GameRng>().0, center);
                debug!(x = position.x, y = position.y, "Spawning boss");
                self.world.spawn(boss_bundle(position));
                SpawnDirector::new(0)
            }
            GameMode::Endless => SpawnDirector::new(0),
        };
        debug!(wave, total = director.total_to_spawn, "Wave started");
        self.world.insert_resource(director);
        self.world.send_event(GameEvent::WaveStarted { wave });
    }

    /// Buys the shop offer at `index`. Only possible while the shop is open.
    pub fn purchase(&mut self, index: usize) -> PurchaseOutcome {
        if self.phase() != RunPhase::Shop {
            return PurchaseOutcome::Unavailable;
        }
        let Some(upgrade) = self.world.resource::<ShopCatalog>().get(index) else {
            return PurchaseOutcome::Unavailable;
        };

        let mut points = self.run_state().points;
        let outcome = self.world.resource_mut::<UpgradeLevels>().purchase(upgrade, &mut points);
        self.world.resource_mut::<RunState>().points = points;
        if !outcome.succeeded() {
            debug!(upgrade = <&'static str>::from(upgrade), ?outcome, "Purchase refused");
        }
        outcome
    }

    /// The shop listing for the current levels and points.
    pub fn shop(&self) -> Vec<ShopEntry> {
        let levels = self.world.resource::<UpgradeLevels>();
        self.world
            .resource::<ShopCatalog>()
            .entries(levels, self.run_state().points)
    }

    /// Recomputes the arena for a new viewport and pulls every actor back inside it.
    pub fn resize(&mut self, viewport: Vec2) {
        let bounds = ArenaBounds::from_viewport(viewport);
        debug!(width = viewport.x, height = viewport.y, "Viewport resized");
        self.world.resource_mut::<GameConfig>().viewport = viewport.to_array();
        self.world.insert_resource(bounds);

        if let Err(e) = self.world.run_system_once(clamp_to_arena_system) {
            warn!("Failed to clamp actors after resize: {e}");
        }
    }

    pub fn set_input_mode(&mut self, mode: InputMode) {
        self.world.resource_mut::<GameConfig>().input_mode = mode;
        info!(mode = <&'static str>::from(mode), "Input mode changed");
        self.persist();
    }

    /// Changes the game mode. Only allowed between runs; the next run uses the new mode.
    pub fn set_game_mode(&mut self, mode: GameMode) {
        if !matches!(self.phase(), RunPhase::Start | RunPhase::GameOver | RunPhase::Win) {
            warn!(mode = <&'static str>::from(mode), "Game mode can only change between runs");
            return;
        }
        self.world.resource_mut::<GameConfig>().game_mode = mode;
        info!(mode = <&'static str>::from(mode), "Game mode changed");
        self.persist();
    }

    pub fn snapshot(&mut self) -> RenderSnapshot {
        RenderSnapshot::capture(&mut self.world)
    }

    pub fn hud(&mut self) -> HudState {
        HudState::capture(&mut self.world)
    }

    fn set_phase(&mut self, phase: RunPhase) {
        let mut current = self.world.resource_mut::<RunPhase>();
        if *current != phase {
            debug!(
                from = <&'static str>::from(*current),
                to = <&'static str>::from(phase),
                "Phase transition"
            );
            *current = phase;
        }
    }

    /// Writes the records and preferences to the store. Failures are logged, not fatal.
    fn persist(&mut self) {
        if let Err(e) = self.save() {
            warn!("Failed to save records: {}", e);
        }
    }

    fn save(&mut self) -> GameResult<()> {
        let run = self.run_state();
        let config = self.config();
        let data = SaveData {
            records: Records {
                best_wave: run.best_wave,
                high_score: run.high_score,
            },
            preferences: Preferences {
                input_mode: config.input_mode,
                game_mode: config.game_mode,
            },
        };
        self.store.save(&data)?;
        Ok(())
    }
}
