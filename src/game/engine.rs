use super::{
    action::Direction,
    config::GameConfig,
    state::{GameState, Phase, Position, Snake},
};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Result of a game step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The game is not running; nothing changed
    Inactive,
    /// The snake moved without eating
    Moved,
    /// The snake ate food and grew; carries the new score
    Ate { score: u32 },
    /// The snake ran into itself
    Terminated { final_score: u32 },
}

impl StepOutcome {
    pub fn is_terminated(&self) -> bool {
        matches!(self, StepOutcome::Terminated { .. })
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine whose food placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        debug_assert!(config.grid_size >= 2, "grid must have room for food");
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Fresh game: one-cell snake in the center heading right, waiting to start
    pub fn reset(&mut self) -> GameState {
        let center = (self.config.grid_size / 2) as i32;
        let snake = Snake::new(Position::new(center, center), Direction::Right);
        // A validated grid has at least four cells, so this never falls back
        let food = self
            .spawn_food_avoid_snake(&snake)
            .unwrap_or_else(|| snake.head());

        GameState::new(snake, food, self.config.grid_size)
    }

    /// Execute one step of the game with an already committed direction
    pub fn step(&mut self, state: &mut GameState, direction: Direction) -> StepOutcome {
        if state.phase != Phase::Running {
            return StepOutcome::Inactive;
        }

        // A reversal would run straight into the second segment
        if state.snake.len() > 1 && state.snake.direction.is_opposite(direction) {
            tracing::debug!(?direction, current = ?state.snake.direction, "rejected reversal");
        } else {
            state.snake.direction = direction;
        }

        let new_head = state
            .snake
            .head()
            .wrapped_step(state.snake.direction, state.grid_size);

        // Tested against the pre-move body, so moving into the current tail cell is fatal
        if state.snake.collides_with_body(new_head) {
            state.phase = Phase::Ended;
            return StepOutcome::Terminated {
                final_score: state.score,
            };
        }

        let ate_food = new_head == state.food;
        state.snake.advance_to(new_head, ate_food);
        state.steps += 1;

        debug_assert!(state.snake.is_self_disjoint(), "snake overlaps itself");

        if ate_food {
            state.score += 1;
            match self.spawn_food_avoid_snake(&state.snake) {
                Some(food) => state.food = food,
                None => {
                    // The snake fills the whole grid
                    state.phase = Phase::Ended;
                    return StepOutcome::Terminated {
                        final_score: state.score,
                    };
                }
            }
            return StepOutcome::Ate { score: state.score };
        }

        StepOutcome::Moved
    }

    /// Spawn food at a random empty cell, or None when the snake covers the grid
    fn spawn_food_avoid_snake(&mut self, snake: &Snake) -> Option<Position> {
        let size = self.config.grid_size;
        if snake.len() >= size * size {
            return None;
        }

        loop {
            let x = self.rng.gen_range(0..size) as i32;
            let y = self.rng.gen_range(0..size) as i32;
            let pos = Position::new(x, y);

            if !snake.occupies(pos) {
                return Some(pos);
            }
        }
    }
}
