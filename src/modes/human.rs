use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, interval, sleep_until};
use tracing::{info, warn};

use crate::controller::Controller;
use crate::game::{GameConfig, GameEngine};
use crate::input::{InputHandler, KeyAction};
use crate::render::{Hud, Renderer};

/// How often the clock in the header is refreshed when nothing else changes
const CLOCK_REFRESH: Duration = Duration::from_millis(250);

pub struct HumanMode {
    controller: Controller<Hud>,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Self {
        Self::with_engine(GameEngine::new(config))
    }

    pub fn with_engine(engine: GameEngine) -> Self {
        let renderer = Renderer::new(engine.config().cell_width);

        Self {
            controller: Controller::new(engine, Hud::new()),
            renderer,
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut clock_timer = interval(CLOCK_REFRESH);

        loop {
            if self.controller.observer_mut().take_dirty() {
                self.draw(terminal)?;
            }

            let next_tick = self.controller.next_tick();
            let tick = async move {
                match next_tick {
                    Some(deadline) => sleep_until(deadline).await,
                    None => std::future::pending::<()>().await,
                }
            };

            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => warn!(%err, "failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick, only armed while a game is running
                _ = tick => {
                    self.controller.on_tick(Instant::now());
                }

                _ = clock_timer.tick() => {
                    let hud = self.controller.observer_mut();
                    hud.metrics.update();
                    hud.mark_dirty();
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                info!("quitting");
                break;
            }
        }

        Ok(())
    }

    fn draw(&self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        let state = self.controller.state();
        let hud = self.controller.observer();
        terminal
            .draw(|frame| {
                self.renderer.render(frame, &state.snapshot(), hud);
            })
            .context("Failed to draw frame")?;
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    return;
                }

                let now = Instant::now();
                match self.input_handler.handle_key_event(key) {
                    KeyAction::Turn(direction) => {
                        self.controller.on_direction_input(direction, now);
                    }
                    KeyAction::Other => {
                        self.controller.on_any_key(now);
                    }
                    KeyAction::Restart => {
                        self.controller.restart();
                    }
                    KeyAction::Quit => {
                        self.should_quit = true;
                    }
                }
            }
            Event::Resize(_, _) => self.controller.observer_mut().mark_dirty(),
            _ => {}
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Phase, Position};
    use crate::render::Banner;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mode() -> HumanMode {
        HumanMode::with_engine(GameEngine::with_seed(GameConfig::default(), 5))
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode();
        assert_eq!(mode.controller.state().phase, Phase::NotStarted);
        assert_eq!(mode.controller.observer().banner, Banner::PressAnyKey);
        assert_eq!(mode.controller.state().score, 0);
    }

    #[test]
    fn test_any_key_starts_game() {
        let mut mode = mode();
        mode.handle_event(press(KeyCode::Char(' ')));

        assert_eq!(mode.controller.state().phase, Phase::Running);
        assert_eq!(mode.controller.observer().banner, Banner::Playing);
        assert!(mode.controller.next_tick().is_some());
    }

    #[test]
    fn test_direction_key_is_buffered() {
        let mut mode = mode();
        mode.handle_event(press(KeyCode::Up));

        assert_eq!(mode.controller.pending_direction(), Some(Direction::Up));
        mode.controller.on_tick(Instant::now());
        assert_eq!(mode.controller.state().snake.head(), Position::new(16, 15));
    }

    #[test]
    fn test_restart_and_quit_keys() {
        let mut mode = mode();
        mode.handle_event(press(KeyCode::Char('d')));
        mode.controller.on_tick(Instant::now());

        mode.handle_event(press(KeyCode::Char('r')));
        assert_eq!(mode.controller.state().phase, Phase::NotStarted);
        assert_eq!(mode.controller.next_tick(), None);

        mode.handle_event(press(KeyCode::Char('q')));
        assert!(mode.should_quit);
    }
}
