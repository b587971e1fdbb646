use std::collections::HashSet;

use rand::Rng;
use thiserror::Error;
use tracing::debug;

use crate::grid::{Cell, GridSize};

/// Random draws attempted before falling back to scanning for free cells.
const RANDOM_ATTEMPTS: usize = 64;

/// Every cell of the grid is occupied; no food can be placed.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
#[error("no free cell left on the {width}x{height} board")]
pub struct BoardFull {
    pub width: u16,
    pub height: u16,
}

/// Picks a uniformly random in-bounds cell that is not in `occupied`.
///
/// Draws random cells until one is free. After a bounded number of misses
/// the free cells are enumerated and one is picked from that list, so the
/// call always terminates. Returns [`BoardFull`] when nothing is free.
pub fn place_food<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    occupied: &HashSet<Cell>,
) -> Result<Cell, BoardFull> {
    let full = BoardFull {
        width: bounds.width,
        height: bounds.height,
    };

    let free_cells = bounds
        .total_cells()
        .saturating_sub(occupied.iter().filter(|cell| bounds.in_bounds(**cell)).count());
    if free_cells == 0 {
        return Err(full);
    }

    for _ in 0..RANDOM_ATTEMPTS {
        let candidate = Cell {
            x: rng.gen_range(0..i32::from(bounds.width)),
            y: rng.gen_range(0..i32::from(bounds.height)),
        };
        if !occupied.contains(&candidate) {
            return Ok(candidate);
        }
    }

    debug!(free_cells, "random food draws exhausted, scanning free cells");
    let candidates: Vec<Cell> = bounds
        .cells()
        .filter(|cell| !occupied.contains(cell))
        .collect();
    if candidates.is_empty() {
        return Err(full);
    }

    let index = rng.gen_range(0..candidates.len());
    Ok(candidates[index])
}
