use std::sync::Arc;

use parking_lot::Mutex;
use speculoos::prelude::*;
use taser_arena::{
    app::{App, AutopilotInput, Frame, InputProvider, LogHud, LogRenderer, Polled},
    config::GameMode,
    error::RenderError,
    events::GameCommand,
    render::{RenderSnapshot, Renderer},
    systems::RunPhase,
};

mod common;

/// Records the phase of every frame it is asked to draw.
#[derive(Clone, Default)]
struct RecordingRenderer {
    phases: Arc<Mutex<Vec<RunPhase>>>,
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, snapshot: &RenderSnapshot) -> Result<(), RenderError> {
        self.phases.lock().push(snapshot.phase);
        Ok(())
    }
}

struct FailingRenderer;

impl Renderer for FailingRenderer {
    fn render(&mut self, _snapshot: &RenderSnapshot) -> Result<(), RenderError> {
        Err(RenderError::PresentFailed("no surface".to_string()))
    }
}

/// Starts the run, then asks to quit after a fixed number of frames.
struct QuitAfter {
    frames: u64,
}

impl InputProvider for QuitAfter {
    fn poll(&mut self, frame: &Frame<'_>) -> Polled {
        let mut polled = Polled::default();
        if frame.phase == RunPhase::Start {
            polled.commands.push(GameCommand::Continue);
        }
        polled.quit = frame.index >= self.frames;
        polled
    }
}

#[test]
fn test_autopilot_starts_and_plays() {
    let (game, _) = common::new_game(GameMode::Waves);
    let renderer = RecordingRenderer::default();
    let mut app = App::new(
        game,
        Box::new(AutopilotInput::default()),
        Box::new(renderer.clone()),
        Box::new(LogHud::default()),
        false,
    );

    app.run(Some(120));

    let phases = renderer.phases.lock();
    assert_that(&phases.len()).is_equal_to(120);
    assert_that(&phases[0]).is_equal_to(RunPhase::Playing);
    assert_that(&app.game.run_state().active_time).is_greater_than(0.0);
}

#[test]
fn test_quit_request_stops_the_loop() {
    let (game, _) = common::new_game(GameMode::Endless);
    let renderer = RecordingRenderer::default();
    let mut app = App::new(
        game,
        Box::new(QuitAfter { frames: 10 }),
        Box::new(renderer.clone()),
        Box::new(LogHud::default()),
        false,
    );

    app.run(None);

    assert_that(&renderer.phases.lock().len()).is_equal_to(10);
}

#[test]
fn test_render_failures_do_not_stop_the_game() {
    let (game, _) = common::new_game(GameMode::Waves);
    let mut app = App::new(
        game,
        Box::new(AutopilotInput::default()),
        Box::new(FailingRenderer),
        Box::new(LogHud::default()),
        false,
    );

    for _ in 0..5 {
        assert_that(&app.run_frame()).is_true();
    }
    assert_that(&app.game.phase()).is_not_equal_to(RunPhase::Start);
}

#[test]
fn test_log_renderer_accepts_frames() {
    let (mut game, _) = common::playing_game(GameMode::Waves);
    let mut renderer = LogRenderer::default();

    assert_that(&renderer.render(&game.snapshot())).is_ok();
}
