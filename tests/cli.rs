use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::Parser;
use pretty_assertions::assert_eq;
use speculoos::prelude::*;
use taser_arena::{
    cli::Cli,
    config::{GameConfig, GameMode, InputMode},
    store::Preferences,
};

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(std::iter::once("taser-arena").chain(args.iter().copied()))
}

#[test]
fn test_no_flags_uses_default_paths() {
    let cli = parse(&[]).unwrap();

    assert_eq!(cli.config, PathBuf::from("taser-arena.toml"));
    assert_eq!(cli.records, PathBuf::from("taser-arena-records.toml"));
    assert_that(&cli.frames).is_none();
    assert_that(&cli.mode).is_none();
    assert_that(&cli.input).is_none();
    assert_that(&cli.seed).is_none();
    assert_that(&cli.auto_fire).is_false();
    assert_that(&cli.realtime).is_false();
}

#[test]
fn test_every_flag_is_parsed() {
    let cli = parse(&[
        "--config",
        "arena.toml",
        "--records",
        "saves/records.toml",
        "--frames",
        "3600",
        "--mode",
        "endless",
        "--input",
        "mouse",
        "--seed",
        "7",
        "--auto-fire",
        "--realtime",
    ])
    .unwrap();

    assert_eq!(cli.config, PathBuf::from("arena.toml"));
    assert_eq!(cli.records, PathBuf::from("saves/records.toml"));
    assert_eq!(cli.frames, Some(3600));
    assert_eq!(cli.mode, Some(GameMode::Endless));
    assert_eq!(cli.input, Some(InputMode::Mouse));
    assert_eq!(cli.seed, Some(7));
    assert_that(&cli.auto_fire).is_true();
    assert_that(&cli.realtime).is_true();
}

#[test]
fn test_bad_arguments_are_rejected() {
    assert_eq!(parse(&["--mode", "arcade"]).unwrap_err().kind(), ErrorKind::InvalidValue);
    assert_eq!(parse(&["--frames", "many"]).unwrap_err().kind(), ErrorKind::ValueValidation);
    assert_eq!(parse(&["--turbo"]).unwrap_err().kind(), ErrorKind::UnknownArgument);
    assert_eq!(parse(&["--help"]).unwrap_err().kind(), ErrorKind::DisplayHelp);
}

#[test]
fn test_saved_preferences_override_config_file() {
    let cli = parse(&[]).unwrap();
    let mut config = GameConfig {
        game_mode: GameMode::Endless,
        ..GameConfig::default()
    };
    let saved = Preferences {
        input_mode: InputMode::Mouse,
        game_mode: GameMode::Waves,
    };

    cli.apply(&mut config, Some(&saved));

    assert_eq!(config.game_mode, GameMode::Waves);
    assert_eq!(config.input_mode, InputMode::Mouse);
}

#[test]
fn test_config_file_stands_without_saved_preferences() {
    let cli = parse(&[]).unwrap();
    let mut config = GameConfig {
        game_mode: GameMode::Endless,
        seed: Some(3),
        ..GameConfig::default()
    };

    cli.apply(&mut config, None);

    assert_eq!(config.game_mode, GameMode::Endless);
    assert_eq!(config.seed, Some(3));
    assert_that(&config.auto_fire).is_false();
}

#[test]
fn test_flags_override_everything() {
    let cli = parse(&["--mode", "endless", "--input", "keyboard", "--seed", "11", "--auto-fire"]).unwrap();
    let mut config = GameConfig::default();
    let saved = Preferences {
        input_mode: InputMode::Mouse,
        game_mode: GameMode::Waves,
    };

    cli.apply(&mut config, Some(&saved));

    assert_eq!(config.game_mode, GameMode::Endless);
    assert_eq!(config.input_mode, InputMode::Keyboard);
    assert_eq!(config.seed, Some(11));
    assert_that(&config.auto_fire).is_true();
}
