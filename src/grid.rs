use crate::input::Direction;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring cell one step along `direction`.
    ///
    /// The result may lie outside the grid; callers check with
    /// [`GridSize::in_bounds`].
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Returns true when `cell` lies inside the grid.
    #[must_use]
    pub fn in_bounds(self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && cell.x < i32::from(self.width)
            && cell.y < i32::from(self.height)
    }

    /// Iterates over every cell row by row.
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        let width = i32::from(self.width);
        (0..i32::from(self.height)).flat_map(move |y| (0..width).map(move |x| Cell { x, y }))
    }
}

#[cfg(test)]
mod tests {
    use crate::input::Direction;

    use super::{Cell, GridSize};

    const BOUNDS: GridSize = GridSize {
        width: 30,
        height: 20,
    };

    #[test]
    fn corners_are_in_bounds() {
        assert!(BOUNDS.in_bounds(Cell::new(0, 0)));
        assert!(BOUNDS.in_bounds(Cell::new(29, 0)));
        assert!(BOUNDS.in_bounds(Cell::new(0, 19)));
        assert!(BOUNDS.in_bounds(Cell::new(29, 19)));
    }

    #[test]
    fn cells_past_each_edge_are_out_of_bounds() {
        assert!(!BOUNDS.in_bounds(Cell::new(-1, 5)));
        assert!(!BOUNDS.in_bounds(Cell::new(30, 5)));
        assert!(!BOUNDS.in_bounds(Cell::new(5, -1)));
        assert!(!BOUNDS.in_bounds(Cell::new(5, 20)));
    }

    #[test]
    fn step_moves_one_cell_along_direction() {
        let origin = Cell::new(4, 4);

        assert_eq!(origin.step(Direction::Up), Cell::new(4, 3));
        assert_eq!(origin.step(Direction::Down), Cell::new(4, 5));
        assert_eq!(origin.step(Direction::Left), Cell::new(3, 4));
        assert_eq!(origin.step(Direction::Right), Cell::new(5, 4));
    }

    #[test]
    fn cells_covers_the_whole_grid_once() {
        let small = GridSize {
            width: 3,
            height: 2,
        };
        let cells: Vec<Cell> = small.cells().collect();

        assert_eq!(cells.len(), small.total_cells());
        assert_eq!(cells.first(), Some(&Cell::new(0, 0)));
        assert_eq!(cells.last(), Some(&Cell::new(2, 1)));
    }
}
