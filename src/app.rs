//! The frame driver: polls input, ticks the game, and hands the results to the renderer and HUD.
//!
//! Ships with a headless setup: [`AutopilotInput`] plays the game by itself, while
//! [`LogRenderer`] and [`LogHud`] report through `tracing`.

use std::time::{Duration, Instant};

use circular_buffer::CircularBuffer;
use glam::Vec2;
use tracing::{debug, info, trace, warn};

use crate::config::InputMode;
use crate::constants::LOOP_TIME;
use crate::error::RenderError;
use crate::events::{GameCommand, GameEvent};
use crate::game::Game;
use crate::render::{HudSink, HudState, RenderSnapshot, Renderer};
use crate::systems::formatting::format_timing_summary;
use crate::systems::{Buttons, InputState, RunPhase, ShopEntry};

/// Frames kept for the rolling frame-time statistics.
const FRAME_WINDOW: usize = 120;
/// Frames between frame-time reports.
const REPORT_PERIOD: u64 = 60 * 10;

/// What the input provider can see when deciding what to press.
pub struct Frame<'a> {
    pub index: u64,
    pub phase: RunPhase,
    pub input_mode: InputMode,
    pub snapshot: &'a RenderSnapshot,
    pub shop: &'a [ShopEntry],
}

/// Input gathered for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polled {
    pub input: InputState,
    pub commands: Vec<GameCommand>,
    pub quit: bool,
}

/// Source of player input: a keyboard and mouse, a replay, or a bot.
pub trait InputProvider {
    fn poll(&mut self, frame: &Frame<'_>) -> Polled;
}

/// A bot that strafes around the arena with the trigger held, buys the cheapest upgrade it can
/// afford in the shop, and keeps continuing.
#[derive(Debug, Default)]
pub struct AutopilotInput {
    /// Whether a purchase was already attempted during the current shop visit.
    shopped: bool,
}

impl AutopilotInput {
    fn steer(frame: &Frame<'_>) -> InputState {
        let snapshot = frame.snapshot;
        let Some(player) = snapshot.player else {
            return InputState::default();
        };

        let nearest = snapshot
            .hostiles
            .iter()
            .min_by(|a, b| {
                let (da, db) = (a.position.distance_squared(player.position), b.position.distance_squared(player.position));
                da.total_cmp(&db)
            })
            .map(|hostile| hostile.position);

        // Orbit the arena center, drifting outward from whatever is closest.
        let from_center = player.position - snapshot.bounds.center();
        let mut heading = from_center.perp().normalize_or_zero();
        if heading == Vec2::ZERO {
            heading = Vec2::X;
        }
        if let Some(target) = nearest {
            if target.distance(player.position) < 140.0 {
                heading = (player.position - target).normalize_or_zero();
            }
        }

        let mut buttons = Buttons::FIRE;
        let keys = match frame.input_mode {
            InputMode::Keyboard => [Buttons::ARROW_LEFT, Buttons::ARROW_RIGHT, Buttons::ARROW_UP, Buttons::ARROW_DOWN],
            InputMode::Mouse => [Buttons::A, Buttons::D, Buttons::W, Buttons::S],
        };
        if heading.x < -0.3 {
            buttons |= keys[0];
        } else if heading.x > 0.3 {
            buttons |= keys[1];
        }
        if heading.y < -0.3 {
            buttons |= keys[2];
        } else if heading.y > 0.3 {
            buttons |= keys[3];
        }

        InputState {
            buttons,
            pointer: nearest.unwrap_or(player.position + Vec2::X),
            pointer_down: true,
        }
    }
}

impl InputProvider for AutopilotInput {
    fn poll(&mut self, frame: &Frame<'_>) -> Polled {
        let mut polled = Polled::default();
        match frame.phase {
            RunPhase::Playing => {
                self.shopped = false;
                polled.input = Self::steer(frame);
            }
            RunPhase::Shop if !self.shopped => {
                self.shopped = true;
                let cheapest = frame
                    .shop
                    .iter()
                    .enumerate()
                    .filter(|(_, entry)| entry.affordable)
                    .min_by_key(|(_, entry)| entry.cost);
                if let Some((index, entry)) = cheapest {
                    debug!(upgrade = entry.name, cost = ?entry.cost, "Autopilot buying upgrade");
                    polled.commands.push(GameCommand::Purchase(index));
                    // Come back for more on the next frame.
                    self.shopped = false;
                } else {
                    polled.commands.push(GameCommand::Continue);
                }
            }
            _ => polled.commands.push(GameCommand::Continue),
        }
        polled
    }
}

/// Traces a one-line summary of every frame.
#[derive(Debug, Default)]
pub struct LogRenderer {
    frames: u64,
}

impl Renderer for LogRenderer {
    fn render(&mut self, snapshot: &RenderSnapshot) -> Result<(), RenderError> {
        self.frames += 1;
        trace!(
            frame = self.frames,
            phase = <&'static str>::from(snapshot.phase),
            hostiles = snapshot.hostiles.len(),
            bolts = snapshot.bolts.len(),
            particles = snapshot.particles.len(),
            "Frame"
        );
        Ok(())
    }
}

/// Logs the HUD whenever it changes.
#[derive(Debug, Default)]
pub struct LogHud {
    last: Option<HudState>,
}

impl HudSink for LogHud {
    fn update(&mut self, hud: &HudState) -> Result<(), RenderError> {
        if self.last.as_ref() == Some(hud) {
            return Ok(());
        }
        debug!(
            phase = <&'static str>::from(hud.phase),
            wave = %hud.wave_label,
            score = %hud.score,
            points = %hud.points,
            remaining = hud.remaining,
            health = %hud.health_text,
            "HUD"
        );
        self.last = Some(hud.clone());
        Ok(())
    }
}

pub struct App {
    pub game: Game,
    input: Box<dyn InputProvider>,
    renderer: Box<dyn Renderer>,
    hud: Box<dyn HudSink>,
    /// Sleep to hold 60 Hz and measure real frame time; otherwise step as fast as possible.
    realtime: bool,
    frames: u64,
    snapshot: RenderSnapshot,
    frame_times: CircularBuffer<FRAME_WINDOW, Duration>,
    last_tick: Instant,
}

impl App {
    pub fn new(
        mut game: Game,
        input: Box<dyn InputProvider>,
        renderer: Box<dyn Renderer>,
        hud: Box<dyn HudSink>,
        realtime: bool,
    ) -> Self {
        let snapshot = game.snapshot();
        Self {
            game,
            input,
            renderer,
            hud,
            realtime,
            frames: 0,
            snapshot,
            frame_times: CircularBuffer::new(),
            last_tick: Instant::now(),
        }
    }

    /// Runs one frame. Returns false once the input provider asks to quit.
    pub fn run_frame(&mut self) -> bool {
        let start = Instant::now();

        let shop = self.game.shop();
        let polled = self.input.poll(&Frame {
            index: self.frames,
            phase: self.game.phase(),
            input_mode: self.game.config().input_mode,
            snapshot: &self.snapshot,
            shop: &shop,
        });
        if polled.quit {
            info!("Exit requested. Exiting...");
            return false;
        }

        self.game.set_input(polled.input);
        for command in polled.commands {
            self.game.command(command);
        }

        let dt = if self.realtime {
            self.last_tick.elapsed().as_secs_f32()
        } else {
            LOOP_TIME.as_secs_f32()
        };
        self.last_tick = Instant::now();

        for event in self.game.tick(dt) {
            Self::report(&event);
        }

        self.snapshot = self.game.snapshot();
        if let Err(e) = self.renderer.render(&self.snapshot) {
            warn!("Failed to render frame: {e}");
        }
        let hud = self.game.hud();
        if let Err(e) = self.hud.update(&hud) {
            warn!("Failed to update HUD: {e}");
        }

        self.frames += 1;
        self.frame_times.push_back(start.elapsed());
        if self.frames % REPORT_PERIOD == 0 {
            if let Some(summary) = format_timing_summary(self.frame_times.iter().copied()) {
                debug!(frames = self.frames, "Frame time {summary}");
            }
        }

        if self.realtime {
            let elapsed = start.elapsed();
            if elapsed < LOOP_TIME {
                spin_sleep::sleep(LOOP_TIME - elapsed);
            } else {
                warn!("Game loop behind schedule by: {:?}", elapsed - LOOP_TIME);
            }
        }

        true
    }

    /// Runs until the input provider quits, or for `frames` frames if given.
    pub fn run(&mut self, frames: Option<u64>) {
        info!(frames = ?frames, realtime = self.realtime, "Starting game loop ({:.3}ms)", LOOP_TIME.as_secs_f32() * 1000.0);
        while frames.is_none_or(|limit| self.frames < limit) {
            if !self.run_frame() {
                break;
            }
        }

        let run = self.game.run_state();
        info!(
            frames = self.frames,
            phase = <&'static str>::from(self.game.phase()),
            wave = run.wave,
            score = run.score,
            best_wave = run.best_wave,
            high_score = run.high_score,
            "Game loop finished"
        );
    }

    fn report(event: &GameEvent) {
        match event {
            GameEvent::PlayerDied { wave, score } => info!(wave, score, "Run ended"),
            GameEvent::RunWon { score } => info!(score, "Run won"),
            GameEvent::WaveCleared { wave } => info!(wave, "Wave cleared"),
            GameEvent::BossDefeated { score } => info!(score, "Boss defeated"),
            other => trace!(event = ?other, "Game event"),
        }
    }
}
