#![allow(dead_code)]

use bevy_ecs::entity::Entity;
use bevy_ecs::event::Events;
use bevy_ecs::query::With;
use glam::Vec2;
use taser_arena::{
    config::{GameConfig, GameMode},
    constants::weapon,
    events::GameEvent,
    game::Game,
    store::MemoryStore,
    systems::{
        bolt_bundle, enemy_bundle, ActorKind, DeltaTime, Difficulty, Hostile, PlayerControlled, Position,
    },
};

pub const TEST_SEED: u64 = 0x7A5E_2A2E;

pub fn test_config(mode: GameMode) -> GameConfig {
    GameConfig {
        game_mode: mode,
        seed: Some(TEST_SEED),
        ..GameConfig::default()
    }
}

/// A seeded game backed by an in-memory store. The returned store shares data with the game's.
pub fn new_game(mode: GameMode) -> (Game, MemoryStore) {
    let store = MemoryStore::default();
    let game = Game::new(test_config(mode), Box::new(store.clone()));
    (game, store)
}

/// A seeded game that has already started its first run.
pub fn playing_game(mode: GameMode) -> (Game, MemoryStore) {
    let (mut game, store) = new_game(mode);
    game.start_new_run();
    game.world.resource_mut::<Events<GameEvent>>().clear();
    (game, store)
}

pub fn set_delta(game: &mut Game, seconds: f32) {
    game.world.insert_resource(DeltaTime { seconds, ticks: 1 });
}

pub fn player_entity(game: &mut Game) -> Entity {
    game.world
        .query_filtered::<Entity, With<PlayerControlled>>()
        .single(&game.world)
        .expect("player should exist")
}

pub fn player_position(game: &mut Game) -> Vec2 {
    let entity = player_entity(game);
    game.world.get::<Position>(entity).expect("player has a position").0
}

/// Spawns a regular enemy scaled for wave 1.
pub fn spawn_enemy(game: &mut Game, kind: ActorKind, position: Vec2) -> Entity {
    let difficulty = Difficulty::at(GameMode::Waves, 1, 0.0);
    let bundle = enemy_bundle(kind, &difficulty, false, position).expect("regular kind");
    game.world.spawn(bundle).id()
}

/// Spawns a bolt sitting exactly on `target`, with base weapon stats.
pub fn spawn_bolt_at(game: &mut Game, target: Vec2, pierce: u32) -> Entity {
    let origin = target - Vec2::X * weapon::MUZZLE_OFFSET;
    let bundle = bolt_bundle(
        origin,
        0.0,
        weapon::BASE_BOLT_SPEED,
        weapon::BASE_DAMAGE,
        pierce,
        weapon::BOLT_LIFETIME,
    );
    game.world.spawn(bundle).id()
}

pub fn hostile_count(game: &mut Game) -> usize {
    game.world.query_filtered::<(), With<Hostile>>().iter(&game.world).count()
}

pub fn drain_events(game: &mut Game) -> Vec<GameEvent> {
    game.world.resource_mut::<Events<GameEvent>>().drain().collect()
}
