use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::config::{INITIAL_BODY, INITIAL_DIRECTION, INITIAL_FOOD};
use crate::food::place_food;
use crate::grid::{Cell, GridSize};
use crate::input::Direction;
use crate::input_buffer::{InputBuffer, Timestamp};
use crate::snake::Snake;

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    NotStarted,
    Running,
    GameOver,
}

/// Why a game ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameOverReason {
    WallCollision,
    SelfCollision,
    /// The snake filled every cell, so no food could be placed.
    BoardFull,
}

/// Result of one simulation step, consumed by the render-position layer.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// The game is not running; nothing changed.
    Idle,
    /// The head moved one cell. `grew` is set when food was eaten.
    Advanced { grew: bool },
    /// The move was fatal; the body was left as it was before the tick.
    Collided(GameOverReason),
}

/// Read-only copy of the discrete game state.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DiscreteState {
    pub body: Vec<Cell>,
    pub food: Cell,
    pub score: u32,
    pub status: GameStatus,
    pub direction: Direction,
    pub game_over_reason: Option<GameOverReason>,
}

/// Complete discrete state for one game: the sole owner of grid truth.
#[derive(Debug, Clone)]
pub struct Game {
    pub snake: Snake,
    pub food: Cell,
    pub score: u32,
    pub tick_count: u64,
    pub status: GameStatus,
    pub game_over_reason: Option<GameOverReason>,
    input: InputBuffer,
    bounds: GridSize,
    rng: StdRng,
}

impl Game {
    /// Creates a fresh game with an entropy-seeded food generator.
    #[must_use]
    pub fn new(bounds: GridSize) -> Self {
        Self::with_rng(bounds, StdRng::from_entropy())
    }

    /// Creates a deterministic game for tests and reproducible sessions.
    #[must_use]
    pub fn new_with_seed(bounds: GridSize, seed: u64) -> Self {
        Self::with_rng(bounds, StdRng::seed_from_u64(seed))
    }

    fn with_rng(bounds: GridSize, mut rng: StdRng) -> Self {
        assert!(
            bounds.total_cells() > 1,
            "grid must have room for a snake and a food cell"
        );

        let snake = initial_snake(bounds);
        let food = if bounds.in_bounds(INITIAL_FOOD) && !snake.occupies(INITIAL_FOOD) {
            INITIAL_FOOD
        } else {
            place_food(&mut rng, bounds, &snake.occupied())
                .expect("a one-cell snake leaves at least one free cell")
        };

        Self {
            snake,
            food,
            score: 0,
            tick_count: 0,
            status: GameStatus::NotStarted,
            game_over_reason: None,
            input: InputBuffer::new(),
            bounds,
            rng,
        }
    }

    /// Moves a fresh game into `Running`. Has no effect in any other state.
    pub fn start(&mut self) {
        if self.status == GameStatus::NotStarted {
            self.status = GameStatus::Running;
        }
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    #[must_use]
    pub fn input(&self) -> &InputBuffer {
        &self.input
    }

    /// Queues a raw direction intent. Ignored once the game is over.
    pub fn submit_direction(&mut self, direction: Direction, now: Timestamp) {
        if self.status == GameStatus::GameOver {
            return;
        }

        self.input.submit(direction, self.snake.direction(), now);
    }

    /// Advances simulation by one gameplay tick.
    ///
    /// Self-collision is checked against the body before the tail moves, so
    /// stepping onto the current tail cell ends the game even though that
    /// cell would be vacated on this same tick.
    pub fn tick(&mut self) -> TickOutcome {
        if self.status != GameStatus::Running {
            return TickOutcome::Idle;
        }

        self.tick_count += 1;

        if let Some(direction) = self.input.consume(self.snake.direction()) {
            self.snake.set_next_direction(direction);
        }
        let new_head = self.snake.turn();

        if !self.bounds.in_bounds(new_head) {
            return self.end(GameOverReason::WallCollision);
        }

        if self.snake.occupies(new_head) {
            return self.end(GameOverReason::SelfCollision);
        }

        let ate = new_head == self.food;
        self.snake.advance(new_head, ate);

        if ate {
            self.score += 1;
            match place_food(&mut self.rng, self.bounds, &self.snake.occupied()) {
                Ok(food) => self.food = food,
                Err(full) => {
                    warn!(%full, score = self.score, "snake filled the board");
                    let _ = self.end(GameOverReason::BoardFull);
                }
            }
        }

        TickOutcome::Advanced { grew: ate }
    }

    /// Returns a snapshot of the discrete state.
    #[must_use]
    pub fn snapshot(&self) -> DiscreteState {
        DiscreteState {
            body: self.snake.segments().copied().collect(),
            food: self.food,
            score: self.score,
            status: self.status,
            direction: self.snake.direction(),
            game_over_reason: self.game_over_reason,
        }
    }

    fn end(&mut self, reason: GameOverReason) -> TickOutcome {
        self.status = GameStatus::GameOver;
        self.game_over_reason = Some(reason);
        self.input.clear();
        info!(?reason, score = self.score, ticks = self.tick_count, "game over");
        TickOutcome::Collided(reason)
    }
}

fn initial_snake(bounds: GridSize) -> Snake {
    if INITIAL_BODY.iter().all(|cell| bounds.in_bounds(*cell)) {
        return Snake::from_segments(INITIAL_BODY, INITIAL_DIRECTION);
    }

    let center = Cell::new(i32::from(bounds.width / 2), i32::from(bounds.height / 2));
    Snake::from_segments([center], INITIAL_DIRECTION)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::config::{DEFAULT_GRID, INITIAL_FOOD};
    use crate::grid::{Cell, GridSize};
    use crate::input::Direction;
    use crate::snake::Snake;

    use super::{Game, GameOverReason, GameStatus, TickOutcome};

    fn running_game(bounds: GridSize, seed: u64) -> Game {
        let mut game = Game::new_with_seed(bounds, seed);
        game.start();
        game
    }

    #[test]
    fn new_game_uses_fixed_start_layout() {
        let game = Game::new_with_seed(DEFAULT_GRID, 1);

        let state = game.snapshot();
        assert_eq!(
            state.body,
            vec![Cell::new(10, 10), Cell::new(9, 10), Cell::new(8, 10)]
        );
        assert_eq!(state.food, INITIAL_FOOD);
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.status, GameStatus::NotStarted);
    }

    #[test]
    fn tick_before_start_is_idle() {
        let mut game = Game::new_with_seed(DEFAULT_GRID, 1);

        assert_eq!(game.tick(), TickOutcome::Idle);
        assert_eq!(game.snake.head(), Cell::new(10, 10));
    }

    #[test]
    fn snake_grows_after_eating_food() {
        let mut game = running_game(GridSize { width: 10, height: 10 }, 1);
        game.snake = Snake::from_segments([Cell::new(1, 1)], Direction::Right);
        game.food = Cell::new(3, 1);

        assert_eq!(game.tick(), TickOutcome::Advanced { grew: false });
        assert_eq!(game.snake.len(), 1);

        assert_eq!(game.tick(), TickOutcome::Advanced { grew: true });
        assert_eq!(game.snake.len(), 2);
        assert_eq!(game.score, 1);
        assert!(!game.snake.occupies(game.food));
    }

    #[test]
    fn wall_collision_leaves_body_untouched() {
        let mut game = running_game(GridSize { width: 4, height: 4 }, 2);
        game.snake = Snake::from_segments([Cell::new(0, 1), Cell::new(1, 1)], Direction::Left);

        assert_eq!(
            game.tick(),
            TickOutcome::Collided(GameOverReason::WallCollision)
        );
        assert_eq!(game.status, GameStatus::GameOver);
        assert_eq!(
            game.snapshot().body,
            vec![Cell::new(0, 1), Cell::new(1, 1)]
        );
    }

    #[test]
    fn self_collision_sets_game_over() {
        let mut game = running_game(GridSize { width: 6, height: 6 }, 3);
        game.snake = Snake::from_segments(
            [
                Cell::new(2, 2),
                Cell::new(1, 2),
                Cell::new(1, 3),
                Cell::new(2, 3),
                Cell::new(3, 3),
            ],
            Direction::Right,
        );
        game.snake.set_next_direction(Direction::Down);

        assert_eq!(
            game.tick(),
            TickOutcome::Collided(GameOverReason::SelfCollision)
        );
        assert_eq!(game.status, GameStatus::GameOver);
    }

    #[test]
    fn moving_onto_the_tail_cell_is_fatal() {
        let mut game = running_game(GridSize { width: 6, height: 6 }, 4);
        game.snake = Snake::from_segments(
            [Cell::new(2, 2), Cell::new(2, 3), Cell::new(3, 3), Cell::new(3, 2)],
            Direction::Right,
        );
        game.food = Cell::new(0, 0);

        assert_eq!(
            game.tick(),
            TickOutcome::Collided(GameOverReason::SelfCollision)
        );
        assert_eq!(game.snake.len(), 4);
    }

    #[test]
    fn buffered_direction_is_applied_on_tick() {
        let mut game = running_game(DEFAULT_GRID, 5);

        game.submit_direction(Direction::Up, 0);
        game.tick();

        assert_eq!(game.snake.direction(), Direction::Up);
        assert_eq!(game.snake.head(), Cell::new(10, 9));
    }

    #[test]
    fn input_is_ignored_after_game_over() {
        let mut game = running_game(GridSize { width: 4, height: 4 }, 6);
        game.snake = Snake::from_segments([Cell::new(3, 1)], Direction::Right);
        game.tick();

        game.submit_direction(Direction::Up, 10);

        assert!(game.input().is_empty());
        assert_eq!(game.tick(), TickOutcome::Idle);
    }

    #[test]
    fn filling_the_board_ends_the_game() {
        let mut game = running_game(GridSize { width: 2, height: 2 }, 7);
        game.snake = Snake::from_segments(
            [Cell::new(1, 1), Cell::new(0, 1), Cell::new(0, 0)],
            Direction::Up,
        );
        game.food = Cell::new(1, 0);

        assert_eq!(game.tick(), TickOutcome::Advanced { grew: true });
        assert_eq!(game.status, GameStatus::GameOver);
        assert_eq!(game.game_over_reason, Some(GameOverReason::BoardFull));
        assert_eq!(game.snake.len(), 4);
        assert_eq!(game.score, 1);
    }

    #[test]
    fn running_states_never_hold_duplicate_cells() {
        let bounds = GridSize { width: 12, height: 9 };
        let mut driver = StdRng::seed_from_u64(99);

        for seed in 0..20 {
            let mut game = running_game(bounds, seed);
            let mut now = 0;

            while game.status == GameStatus::Running && game.tick_count < 500 {
                now += driver.gen_range(10..200);
                let direction = match driver.gen_range(0..4) {
                    0 => Direction::Up,
                    1 => Direction::Down,
                    2 => Direction::Left,
                    _ => Direction::Right,
                };
                game.submit_direction(direction, now);

                let food_before = game.food;
                let len_before = game.snake.len();
                let outcome = game.tick();

                match outcome {
                    TickOutcome::Advanced { grew } => {
                        assert_eq!(grew, game.snake.head() == food_before);
                        assert_eq!(game.snake.len(), len_before + usize::from(grew));
                    }
                    TickOutcome::Collided(_) => assert_eq!(game.snake.len(), len_before),
                    TickOutcome::Idle => unreachable!("game was running"),
                }

                if game.status == GameStatus::Running {
                    let unique: HashSet<Cell> = game.snake.segments().copied().collect();
                    assert_eq!(unique.len(), game.snake.len());
                    assert!(!unique.contains(&game.food));
                }
            }
        }
    }
}
