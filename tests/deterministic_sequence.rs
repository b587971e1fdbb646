use smooth_snake::config::DEFAULT_GRID;
use smooth_snake::game::{Game, GameOverReason, GameStatus, TickOutcome};
use smooth_snake::grid::Cell;
use smooth_snake::input::Direction;
use smooth_snake::input_buffer::InputBuffer;
use smooth_snake::snake::Snake;

fn running_game(seed: u64) -> Game {
    let mut game = Game::new_with_seed(DEFAULT_GRID, seed);
    game.start();
    game
}

#[test]
fn plain_tick_moves_the_whole_body_one_cell() {
    let mut game = running_game(1);
    game.food = Cell::new(0, 0);

    game.tick();

    let state = game.snapshot();
    assert_eq!(
        state.body,
        vec![Cell::new(11, 10), Cell::new(10, 10), Cell::new(9, 10)]
    );
    assert_eq!(state.score, 0);
    assert_eq!(state.status, GameStatus::Running);
}

#[test]
fn eating_grows_by_one_and_places_new_food_off_the_body() {
    let mut game = running_game(2);
    game.food = Cell::new(11, 10);

    assert_eq!(game.tick(), TickOutcome::Advanced { grew: true });

    let state = game.snapshot();
    assert_eq!(
        state.body,
        vec![
            Cell::new(11, 10),
            Cell::new(10, 10),
            Cell::new(9, 10),
            Cell::new(8, 10),
        ]
    );
    assert_eq!(state.score, 1);
    assert!(!state.body.contains(&state.food));
    assert!(DEFAULT_GRID.in_bounds(state.food));
}

#[test]
fn leaving_through_the_left_wall_ends_the_game() {
    let mut game = running_game(3);
    game.snake = Snake::from_segments(
        [Cell::new(0, 5), Cell::new(1, 5), Cell::new(2, 5)],
        Direction::Left,
    );

    game.tick();

    let state = game.snapshot();
    assert_eq!(state.status, GameStatus::GameOver);
    assert_eq!(state.game_over_reason, Some(GameOverReason::WallCollision));
    assert_eq!(
        state.body,
        vec![Cell::new(0, 5), Cell::new(1, 5), Cell::new(2, 5)]
    );
}

#[test]
fn quick_reversal_while_heading_right_routes_through_up() {
    let mut buffer = InputBuffer::new();

    buffer.submit(Direction::Up, Direction::Right, 1_000);
    buffer.submit(Direction::Down, Direction::Right, 1_050);

    let queued: Vec<Direction> = buffer.pending().map(|command| command.direction).collect();
    assert_eq!(queued, vec![Direction::Up, Direction::Down]);
}

#[test]
fn quick_u_turn_takes_two_consecutive_ticks() {
    let mut game = running_game(4);
    game.food = Cell::new(0, 0);

    // Heading up first, then a fast up/down double tap.
    game.submit_direction(Direction::Up, 0);
    game.tick();
    assert_eq!(game.snake.head(), Cell::new(10, 9));

    game.submit_direction(Direction::Up, 500);
    game.submit_direction(Direction::Down, 560);

    game.tick();
    assert_eq!(game.snake.direction(), Direction::Left);
    assert_eq!(game.snake.head(), Cell::new(9, 9));

    game.tick();
    assert_eq!(game.snake.direction(), Direction::Down);
    assert_eq!(game.snake.head(), Cell::new(9, 10));
    assert_eq!(game.status, GameStatus::Running);
}

#[test]
fn scripted_run_collects_food_and_hits_the_wall() {
    let mut game = running_game(5);

    // The first food sits five cells ahead of the starting head.
    for _ in 0..4 {
        assert_eq!(game.tick(), TickOutcome::Advanced { grew: false });
    }
    assert_eq!(game.tick(), TickOutcome::Advanced { grew: true });
    assert_eq!(game.score, 1);
    assert_eq!(game.snake.len(), 4);

    game.submit_direction(Direction::Up, 10_000);
    let mut outcome = game.tick();
    while outcome != TickOutcome::Collided(GameOverReason::WallCollision) {
        assert!(matches!(outcome, TickOutcome::Advanced { .. }));
        outcome = game.tick();
    }

    assert_eq!(game.snake.head().y, 0);
    assert_eq!(game.status, GameStatus::GameOver);
}
