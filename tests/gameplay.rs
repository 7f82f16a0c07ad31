use tokio::time::Instant;
use torus_snake::controller::{Controller, GameObserver};
use torus_snake::game::{Direction, GameConfig, GameEngine, Phase, Position, Snapshot, StepOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Note {
    Frame { head: Position, length: usize },
    Score(u32),
    Started,
    GameOver(u32),
    AwaitingStart,
}

#[derive(Default)]
struct Recorder {
    notes: Vec<Note>,
}

impl GameObserver for Recorder {
    fn on_frame(&mut self, snapshot: &Snapshot<'_>) {
        self.notes.push(Note::Frame {
            head: snapshot.snake[0],
            length: snapshot.snake.len(),
        });
    }

    fn on_score_changed(&mut self, score: u32) {
        self.notes.push(Note::Score(score));
    }

    fn on_game_started(&mut self) {
        self.notes.push(Note::Started);
    }

    fn on_game_over(&mut self, final_score: u32) {
        self.notes.push(Note::GameOver(final_score));
    }

    fn on_awaiting_start(&mut self) {
        self.notes.push(Note::AwaitingStart);
    }
}

fn controller(grid_size: usize, seed: u64) -> Controller<Recorder> {
    Controller::new(
        GameEngine::with_seed(GameConfig::new(grid_size), seed),
        Recorder::default(),
    )
}

/// First seeded game whose initial food is not on any of `cells`
fn controller_with_food_off(grid_size: usize, cells: &[Position]) -> Controller<Recorder> {
    (0..)
        .map(|seed| controller(grid_size, seed))
        .find(|controller| !cells.contains(&controller.state().food))
        .expect("some seed places food elsewhere")
}

/// Picks a turn toward the food on the shorter way around the torus
fn toward_food(head: Position, food: Position, grid_size: usize) -> Option<Direction> {
    let size = grid_size as i32;
    let shortest = |from: i32, to: i32| {
        let forward = (to - from).rem_euclid(size);
        if forward == 0 {
            0
        } else if forward <= size / 2 {
            1
        } else {
            -1
        }
    };

    match (shortest(head.x, food.x), shortest(head.y, food.y)) {
        (1, _) => Some(Direction::Right),
        (-1, _) => Some(Direction::Left),
        (_, 1) => Some(Direction::Down),
        (_, -1) => Some(Direction::Up),
        _ => None,
    }
}

fn assert_valid(controller: &Controller<Recorder>) {
    let state = controller.state();
    let body = &state.snake.body;
    assert!(!body.is_empty());
    assert!(!body.contains(&state.food), "food on snake: {:?}", state);
    for (i, cell) in body.iter().enumerate() {
        assert!(state.is_in_bounds(*cell));
        assert!(!body[i + 1..].contains(cell), "snake overlaps itself");
    }
}

#[test]
fn three_ticks_without_input_move_three_cells_right() {
    let path = [Position::new(17, 16), Position::new(18, 16), Position::new(19, 16)];
    let mut controller = controller_with_food_off(32, &path);
    assert_eq!(controller.state().snake.body, vec![Position::new(16, 16)]);
    assert_eq!(controller.state().snake.direction, Direction::Right);

    let now = Instant::now();
    controller.on_any_key(now);
    for _ in 0..3 {
        assert_eq!(controller.on_tick(now), StepOutcome::Moved);
    }

    let state = controller.state();
    assert_eq!(state.snake.body, vec![Position::new(19, 16)]);
    assert_eq!(state.score, 0);
    assert_eq!(state.phase, Phase::Running);
}

#[test]
fn notifications_follow_a_game() {
    let mut controller = controller_with_food_off(10, &[Position::new(5, 6)]);
    let now = Instant::now();

    controller.on_direction_input(Direction::Down, now);
    controller.on_tick(now);

    assert_eq!(
        controller.observer().notes,
        vec![
            Note::AwaitingStart,
            Note::Score(0),
            Note::Frame {
                head: Position::new(5, 5),
                length: 1
            },
            Note::Started,
            Note::Frame {
                head: Position::new(5, 6),
                length: 1
            },
        ]
    );
}

#[test]
fn chasing_food_keeps_invariants_and_counts_score() {
    for seed in 0..8 {
        let mut controller = controller(12, seed);
        let now = Instant::now();
        controller.on_any_key(now);

        for _ in 0..400 {
            let (head, food) = {
                let state = controller.state();
                (state.snake.head(), state.food)
            };
            if let Some(direction) = toward_food(head, food, 12) {
                controller.on_direction_input(direction, now);
            }

            let length_before = controller.state().snake.len();
            let score_before = controller.state().score;

            match controller.on_tick(now) {
                StepOutcome::Ate { score } => {
                    assert_eq!(score, score_before + 1);
                    assert_eq!(controller.state().snake.len(), length_before + 1);
                }
                StepOutcome::Moved => {
                    assert_eq!(controller.state().score, score_before);
                    assert_eq!(controller.state().snake.len(), length_before);
                }
                StepOutcome::Terminated { final_score } => {
                    assert_eq!(final_score, score_before);
                    assert_eq!(controller.state().phase, Phase::Ended);
                    assert_eq!(controller.next_tick(), None);
                    break;
                }
                StepOutcome::Inactive => panic!("running game reported inactive"),
            }

            assert_valid(&controller);
            assert!(controller.next_tick().is_some());
        }

        assert!(controller.state().score > 0, "seed {seed} never ate");
    }
}

#[test]
fn restart_after_game_over_starts_fresh() {
    let mut controller = controller(8, 21);
    let now = Instant::now();
    controller.on_any_key(now);

    // Chase food until the snake is long enough to box itself in, then spin
    let mut ended = false;
    for i in 0..2000 {
        let state = controller.state();
        let direction = if state.snake.len() < 5 {
            toward_food(state.snake.head(), state.food, 8)
        } else {
            // Tight clockwise spiral: four turns in a row hit the body
            Some(match i % 4 {
                0 => Direction::Down,
                1 => Direction::Left,
                2 => Direction::Up,
                _ => Direction::Right,
            })
        };
        if let Some(direction) = direction {
            controller.on_direction_input(direction, now);
        }
        if controller.on_tick(now).is_terminated() {
            ended = true;
            break;
        }
    }
    assert!(ended, "snake never collided");

    let final_score = controller.state().score;
    assert_eq!(
        controller.observer().notes.last(),
        Some(&Note::GameOver(final_score))
    );

    controller.restart();

    let state = controller.state();
    assert_eq!(state.phase, Phase::NotStarted);
    assert_eq!(state.snake.body, vec![Position::new(4, 4)]);
    assert_eq!(state.snake.direction, Direction::Right);
    assert_eq!(state.score, 0);
    assert!(!state.snake.body.contains(&state.food));
    assert_eq!(controller.next_tick(), None);

    let notes = &controller.observer().notes;
    let tail = &notes[notes.len() - 3..];
    assert_eq!(tail[0], Note::AwaitingStart);
    assert_eq!(tail[1], Note::Score(0));
}

#[test]
fn crossing_edges_wraps_on_both_axes() {
    // Up from (2, 2) on a 5x5 grid runs off the top edge, then left off the side
    let path = [
        Position::new(2, 1),
        Position::new(2, 0),
        Position::new(2, 4),
        Position::new(1, 4),
        Position::new(0, 4),
        Position::new(4, 4),
    ];
    let mut controller = controller_with_food_off(5, &path);
    let now = Instant::now();

    controller.on_direction_input(Direction::Up, now);
    for _ in 0..3 {
        assert_eq!(controller.on_tick(now), StepOutcome::Moved);
    }
    assert_eq!(controller.state().snake.head(), Position::new(2, 4));

    controller.on_direction_input(Direction::Left, now);
    for _ in 0..3 {
        assert_eq!(controller.on_tick(now), StepOutcome::Moved);
    }
    assert_eq!(controller.state().snake.body, vec![Position::new(4, 4)]);
    assert_eq!(controller.state().phase, Phase::Running);
}
