//! Turns key presses and timer ticks into simulation steps.
//!
//! The controller owns the only mutable handle to the game state. Direction
//! input is validated against the committed direction when it arrives and is
//! buffered until the next tick, last write wins.

pub mod observer;
pub mod schedule;

pub use observer::GameObserver;
pub use schedule::TickSchedule;

use tokio::time::Instant;
use tracing::{debug, info};

use crate::game::{Direction, GameEngine, GameState, Phase, StepOutcome};

pub struct Controller<O: GameObserver> {
    engine: GameEngine,
    state: GameState,
    pending_direction: Option<Direction>,
    schedule: TickSchedule,
    observer: O,
}

impl<O: GameObserver> Controller<O> {
    /// Build a controller with a fresh game waiting for its first key
    pub fn new(mut engine: GameEngine, observer: O) -> Self {
        let state = engine.reset();
        let schedule = TickSchedule::new(engine.config().tick_interval());

        let mut controller = Self {
            engine,
            state,
            pending_direction: None,
            schedule,
            observer,
        };
        controller.announce_fresh_game();
        controller
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    /// Deadline of the single armed tick, if the game is running
    pub fn next_tick(&self) -> Option<Instant> {
        self.schedule.deadline()
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Buffer a turn if it leaves the committed axis; also starts a fresh game
    pub fn on_direction_input(&mut self, requested: Direction, now: Instant) {
        if self.state.phase == Phase::Ended {
            return;
        }

        if self.state.snake.direction.can_turn_to(requested) {
            self.pending_direction = Some(requested);
        } else {
            debug!(?requested, committed = ?self.state.snake.direction, "ignored turn on same axis");
        }

        self.on_any_key(now);
    }

    /// Start the game if it is waiting for a key
    pub fn on_any_key(&mut self, now: Instant) {
        if self.state.phase != Phase::NotStarted {
            return;
        }

        self.state.phase = Phase::Running;
        self.schedule.arm_now(now);
        info!(grid_size = self.state.grid_size, "game started");
        self.observer.on_game_started();
    }

    /// Advance the game by one step. Does nothing unless the game is running.
    pub fn on_tick(&mut self, now: Instant) -> StepOutcome {
        if !self.state.is_running() {
            return StepOutcome::Inactive;
        }

        // The tick being handled is consumed before anything is re-armed
        self.schedule.cancel();

        let direction = self
            .pending_direction
            .take()
            .unwrap_or(self.state.snake.direction);

        let outcome = self.engine.step(&mut self.state, direction);
        match outcome {
            StepOutcome::Terminated { final_score } => {
                info!(final_score, length = self.state.snake.len(), "game over");
                self.observer.on_game_over(final_score);
            }
            StepOutcome::Inactive => {}
            StepOutcome::Ate { score } => {
                debug!(score, "food eaten");
                self.observer.on_score_changed(score);
                self.observer.on_frame(&self.state.snapshot());
                self.schedule.arm_after(now);
            }
            StepOutcome::Moved => {
                self.observer.on_frame(&self.state.snapshot());
                self.schedule.arm_after(now);
            }
        }

        outcome
    }

    /// Throw the current game away and wait for a key again. Always legal.
    pub fn restart(&mut self) {
        self.schedule.cancel();
        self.pending_direction = None;
        self.state = self.engine.reset();
        info!("game restarted");
        self.announce_fresh_game();
    }

    fn announce_fresh_game(&mut self) {
        self.observer.on_awaiting_start();
        self.observer.on_score_changed(self.state.score);
        self.observer.on_frame(&self.state.snapshot());
    }
}
