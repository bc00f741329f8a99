#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))]

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

use taser_arena::app::{App, AutopilotInput, LogHud, LogRenderer};
use taser_arena::cli::Cli;
use taser_arena::config::GameConfig;
use taser_arena::constants::LOOP_TIME;
use taser_arena::formatter::TickFormatter;
use taser_arena::game::Game;
use taser_arena::store::{RecordStore, TomlStore};

fn init_tracing() -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::registry()
        .with(fmt::layer().event_format(TickFormatter))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(subscriber).context("Failed to set tracing subscriber")
}

/// The main entry point of the application.
///
/// Loads the config and saved preferences, then runs the headless autopilot until the frame
/// limit (or forever without one).
pub fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing()?;

    let mut config = GameConfig::load_or_default(&cli.config);
    let store = TomlStore::new(cli.records.clone());
    let saved = store.path().exists().then(|| store.load_or_default().preferences);
    cli.apply(&mut config, saved.as_ref());

    info!(
        mode = <&'static str>::from(config.game_mode),
        input = <&'static str>::from(config.input_mode),
        records = %store.path().display(),
        loop_time = ?LOOP_TIME,
        "Launching"
    );

    let game = Game::new(config, Box::new(store));
    let mut app = App::new(
        game,
        Box::new(AutopilotInput::default()),
        Box::new(LogRenderer::default()),
        Box::new(LogHud::default()),
        cli.realtime,
    );
    app.run(cli.frames);

    Ok(())
}
