use std::collections::{HashSet, VecDeque};

use crate::grid::Cell;
use crate::input::Direction;

/// Snake body and heading. Only the simulation mutates it, once per tick.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Cell>,
    direction: Direction,
    next_direction: Direction,
}

impl Snake {
    /// Creates a snake from explicit body segments (front is head).
    ///
    /// # Panics
    ///
    /// Panics when `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: impl IntoIterator<Item = Cell>, direction: Direction) -> Self {
        let body: VecDeque<Cell> = segments.into_iter().collect();
        assert!(!body.is_empty(), "snake body must contain at least one segment");

        Self {
            body,
            direction,
            next_direction: direction,
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Cell {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Direction applied on the last tick.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Direction the next tick will apply.
    #[must_use]
    pub fn next_direction(&self) -> Direction {
        self.next_direction
    }

    pub fn set_next_direction(&mut self, direction: Direction) {
        self.next_direction = direction;
    }

    /// Commits `next_direction` and returns the cell the head moves into.
    pub fn turn(&mut self) -> Cell {
        self.direction = self.next_direction;
        self.head().step(self.direction)
    }

    /// Moves the head into `new_head`; the tail is kept when `grow` is set.
    pub fn advance(&mut self, new_head: Cell, grow: bool) {
        self.body.push_front(new_head);
        if !grow {
            let _ = self.body.pop_back();
        }
    }

    /// Returns true if any segment occupies `cell`, tail included.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Returns the set of occupied cells.
    #[must_use]
    pub fn occupied(&self) -> HashSet<Cell> {
        self.body.iter().copied().collect()
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; kept for the `len`/`is_empty` pairing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::grid::Cell;
    use crate::input::Direction;

    use super::Snake;

    fn straight_snake() -> Snake {
        Snake::from_segments(
            [Cell::new(10, 10), Cell::new(9, 10), Cell::new(8, 10)],
            Direction::Right,
        )
    }

    #[test]
    fn advance_without_growth_keeps_length() {
        let mut snake = straight_snake();

        let next = snake.turn();
        snake.advance(next, false);

        assert_eq!(snake.head(), Cell::new(11, 10));
        assert_eq!(snake.len(), 3);
        assert!(!snake.occupies(Cell::new(8, 10)));
    }

    #[test]
    fn growth_keeps_previous_tail() {
        let mut snake = straight_snake();

        let next = snake.turn();
        snake.advance(next, true);

        assert_eq!(snake.len(), 4);
        assert!(snake.occupies(Cell::new(8, 10)));
    }

    #[test]
    fn turn_commits_next_direction() {
        let mut snake = straight_snake();
        snake.set_next_direction(Direction::Up);

        let next = snake.turn();

        assert_eq!(snake.direction(), Direction::Up);
        assert_eq!(next, Cell::new(10, 9));
    }

    #[test]
    #[should_panic(expected = "at least one segment")]
    fn empty_body_is_rejected() {
        let _ = Snake::from_segments(Vec::new(), Direction::Up);
    }
}
