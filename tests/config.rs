use std::fs;
use std::path::Path;

use glam::Vec2;
use pretty_assertions::assert_eq;
use speculoos::prelude::*;
use taser_arena::{
    config::{GameConfig, GameMode, InputMode},
    constants::{waves, DEFAULT_VIEWPORT},
    error::ConfigError,
    systems::ArenaBounds,
};
use tempfile::TempDir;

#[test]
fn test_empty_config_uses_defaults() {
    let config = GameConfig::parse("").unwrap();
    assert_eq!(config, GameConfig::default());
}

#[test]
fn test_partial_config_overrides_only_named_keys() {
    let config = GameConfig::parse(
        r#"
        game_mode = "endless"
        input_mode = "mouse"
        seed = 42
        viewport = [800.0, 600.0]
        "#,
    )
    .unwrap();

    assert_that(&config.game_mode).is_equal_to(GameMode::Endless);
    assert_that(&config.input_mode).is_equal_to(InputMode::Mouse);
    assert_that(&config.seed).is_equal_to(Some(42));
    assert_that(&config.viewport()).is_equal_to(Vec2::new(800.0, 600.0));
    assert_that(&config.ring_blast).is_true();
    assert_that(&config.wave_enemy_count).is_equal_to(waves::ENEMY_COUNT);
}

#[test]
fn test_malformed_config_is_an_error() {
    assert_that(&GameConfig::parse("game_mode = \"sideways\"")).is_err();
    assert_that(&GameConfig::parse("seed = [")).is_err();
}

#[test]
fn test_missing_config_file_falls_back_to_defaults() {
    let config = GameConfig::load_or_default(Path::new("/definitely/not/here/taser-arena.toml"));
    assert_eq!(config, GameConfig::default());
}

#[test]
fn test_load_reports_missing_file() {
    assert_that(&GameConfig::load(Path::new("/definitely/not/here/taser-arena.toml"))).is_err();
}

#[test]
fn test_wave_enemy_total_grows_and_caps() {
    let config = GameConfig {
        wave_enemy_count: 10,
        wave_enemy_growth: 5,
        ..GameConfig::default()
    };

    assert_eq!(config.wave_enemy_total(1), 10);
    assert_eq!(config.wave_enemy_total(3), 20);
    assert_eq!(config.wave_enemy_total(1_000), waves::ENEMY_COUNT_CAP);
}

#[test]
fn test_arena_is_viewport_minus_inset() {
    let bounds = ArenaBounds::from_viewport(DEFAULT_VIEWPORT);

    assert_that(&bounds.min()).is_equal_to(Vec2::splat(28.0));
    assert_that(&bounds.max()).is_equal_to(DEFAULT_VIEWPORT - Vec2::splat(28.0));
}

#[test]
fn test_tiny_viewport_never_inverts_arena() {
    let bounds = ArenaBounds::from_viewport(Vec2::new(20.0, 10.0));

    assert_that(&bounds.size).is_equal_to(Vec2::ZERO);
    let clamped = bounds.clamp_circle(Vec2::new(500.0, 500.0), 18.0);
    assert_that(&clamped.is_finite()).is_true();
}

#[test]
fn test_config_file_is_read_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("taser-arena.toml");
    fs::write(&path, "game_mode = \"endless\"\nseed = 9\n").unwrap();

    let config = GameConfig::load_or_default(&path);

    assert_eq!(config.game_mode, GameMode::Endless);
    assert_eq!(config.seed, Some(9));
    assert_eq!(config.input_mode, InputMode::Keyboard);
}

#[test]
fn test_malformed_config_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("taser-arena.toml");
    fs::write(&path, "game_mode = [").unwrap();

    assert!(matches!(GameConfig::load(&path), Err(ConfigError::Parse { .. })));
    assert_eq!(GameConfig::load_or_default(&path), GameConfig::default());
}
