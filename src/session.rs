use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::config::{ANIMATION_FPS, DEFAULT_GRID};
use crate::difficulty::{DifficultyPreset, PresetTable};
use crate::error::SessionError;
use crate::game::{DiscreteState, Game, GameStatus};
use crate::grid::{Cell, GridSize};
use crate::input::Direction;
use crate::input_buffer::Timestamp;
use crate::interpolation::{frame_delta, Easing, RenderPoint, RenderPositions};
use crate::scheduler::IntervalTimer;

/// What one [`GameSession::pump`] call ran.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct PumpReport {
    pub ticked: bool,
    pub framed: bool,
}

/// Orchestrates one game: the simulation, its render positions, and the two
/// timers driving them.
///
/// The session owns the selected preset; the simulation and the render
/// layer each own their own state and are only reached through here.
#[derive(Debug)]
pub struct GameSession {
    presets: PresetTable,
    bounds: GridSize,
    seed: Option<u64>,
    preset: Option<DifficultyPreset>,
    game: Game,
    render: RenderPositions,
    tick_timer: Option<IntervalTimer>,
    frame_timer: IntervalTimer,
    last_frame_at: Option<Instant>,
    live: bool,
}

impl GameSession {
    #[must_use]
    pub fn new(presets: PresetTable) -> Self {
        Self::with_options(presets, DEFAULT_GRID, None)
    }

    /// Creates a session on a custom grid; `seed` makes food placement
    /// reproducible across games.
    #[must_use]
    pub fn with_options(presets: PresetTable, bounds: GridSize, seed: Option<u64>) -> Self {
        let game = new_game(bounds, seed);
        let render = RenderPositions::new(&body_of(&game));

        Self {
            presets,
            bounds,
            seed,
            preset: None,
            game,
            render,
            tick_timer: None,
            frame_timer: IntervalTimer::new(Duration::from_secs(1) / ANIMATION_FPS),
            last_frame_at: None,
            live: false,
        }
    }

    /// Starts a fresh game with the preset named `key` and arms both timers.
    pub fn start_game(&mut self, key: &str, now: Instant) -> Result<(), SessionError> {
        let preset = self
            .presets
            .get(key)
            .cloned()
            .ok_or_else(|| SessionError::UnknownPreset(key.to_owned()))?;

        info!(
            preset = %preset.key,
            tick_interval_ms = preset.tick_interval_ms,
            "starting game"
        );
        self.preset = Some(preset);
        self.launch(now);
        Ok(())
    }

    /// Starts a fresh game with the preset of the previous one.
    pub fn restart(&mut self, now: Instant) -> Result<(), SessionError> {
        let Some(preset) = &self.preset else {
            return Err(SessionError::NotStarted);
        };

        info!(preset = %preset.key, "restarting game");
        self.launch(now);
        Ok(())
    }

    /// Cancels both timers. No state changes after this until a new start.
    pub fn stop(&mut self) {
        if self.live {
            debug!(score = self.game.score, "stopping session");
        }
        self.halt();
    }

    /// Forwards a raw direction intent pressed at `now` to the input buffer.
    pub fn submit_direction(&mut self, direction: Direction, now: Timestamp) {
        if !self.live {
            return;
        }

        self.game.submit_direction(direction, now);
    }

    /// Runs whichever timer callbacks are due at `now`.
    pub fn pump(&mut self, now: Instant) -> PumpReport {
        let mut report = PumpReport::default();

        if self.live && self.tick_timer.as_mut().is_some_and(|timer| timer.fire(now)) {
            self.on_tick();
            report.ticked = true;
        }

        if self.live && self.frame_timer.fire(now) {
            self.on_frame(now);
            report.framed = true;
        }

        report
    }

    /// Time until the next timer callback; `None` when nothing is armed.
    #[must_use]
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        let tick = self
            .tick_timer
            .as_ref()
            .and_then(|timer| timer.time_until_due(now));
        let frame = self.frame_timer.time_until_due(now);

        match (tick, frame) {
            (Some(tick), Some(frame)) => Some(tick.min(frame)),
            (tick, frame) => tick.or(frame),
        }
    }

    /// Read-only snapshot of the discrete game state.
    #[must_use]
    pub fn discrete_state(&self) -> DiscreteState {
        self.game.snapshot()
    }

    /// Continuous positions, index-aligned with `discrete_state().body`.
    #[must_use]
    pub fn render_positions(&self) -> &[RenderPoint] {
        self.render.points()
    }

    #[must_use]
    pub fn render_cell_size(&self) -> f32 {
        self.render.cell_size()
    }

    /// Preset of the current or last game.
    #[must_use]
    pub fn preset(&self) -> Option<&DifficultyPreset> {
        self.preset.as_ref()
    }

    #[must_use]
    pub fn presets(&self) -> &PresetTable {
        &self.presets
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    /// True while timers are armed and callbacks may mutate state.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.live
    }

    fn launch(&mut self, now: Instant) {
        let Some(preset) = &self.preset else {
            return;
        };

        let mut tick_timer = IntervalTimer::new(preset.tick_interval());
        tick_timer.arm(now);

        self.game = new_game(self.bounds, self.seed);
        self.game.start();
        self.render.reset(&body_of(&self.game));
        self.tick_timer = Some(tick_timer);
        self.frame_timer.arm(now);
        self.last_frame_at = Some(now);
        self.live = true;
    }

    fn halt(&mut self) {
        if let Some(timer) = self.tick_timer.as_mut() {
            timer.cancel();
        }
        self.frame_timer.cancel();
        self.last_frame_at = None;
        self.live = false;
    }

    fn on_tick(&mut self) {
        if !self.live {
            return;
        }

        let outcome = self.game.tick();
        self.render.apply_tick(outcome, &body_of(&self.game));

        if self.game.status == GameStatus::GameOver {
            self.halt();
        }
    }

    fn on_frame(&mut self, now: Instant) {
        if !self.live {
            return;
        }
        let Some(preset) = &self.preset else {
            return;
        };

        let delta = self
            .last_frame_at
            .map_or(1.0, |previous| frame_delta(now.saturating_duration_since(previous)));
        self.last_frame_at = Some(now);

        self.render
            .advance_frame(&body_of(&self.game), Easing::from(preset), delta);
    }
}

fn new_game(bounds: GridSize, seed: Option<u64>) -> Game {
    match seed {
        Some(seed) => Game::new_with_seed(bounds, seed),
        None => Game::new(bounds),
    }
}

fn body_of(game: &Game) -> Vec<Cell> {
    game.snake.segments().copied().collect()
}
