//! Continuous render positions eased toward the discrete snake body.
//!
//! The simulation moves the snake one whole cell per tick. This layer keeps a
//! floating-point position per body segment and, once per animation frame,
//! moves each one a fraction of the way toward its cell. It never feeds back
//! into the simulation.

use std::time::Duration;

use crate::config::{ANIMATION_FPS, CELL_SIZE, MAX_FRAME_DELTA, SNAP_EPSILON};
use crate::difficulty::DifficultyPreset;
use crate::game::TickOutcome;
use crate::grid::Cell;

/// On-screen position of one segment, in render units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RenderPoint {
    pub x: f32,
    pub y: f32,
}

/// Easing coefficients for one frame, taken from the active preset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Easing {
    pub movement: f32,
    pub turn: f32,
    pub tail: f32,
}

impl From<&DifficultyPreset> for Easing {
    fn from(preset: &DifficultyPreset) -> Self {
        Self {
            movement: preset.movement_ease,
            turn: preset.turn_ease,
            tail: preset.tail_ease,
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum Axis {
    Horizontal,
    Vertical,
}

/// Per-segment continuous positions, index-aligned with the snake body.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPositions {
    points: Vec<RenderPoint>,
    cell_size: f32,
}

impl RenderPositions {
    /// Seeds every segment directly on its cell.
    #[must_use]
    pub fn new(body: &[Cell]) -> Self {
        Self::with_cell_size(body, CELL_SIZE)
    }

    #[must_use]
    pub fn with_cell_size(body: &[Cell], cell_size: f32) -> Self {
        let mut positions = Self {
            points: Vec::with_capacity(body.len()),
            cell_size,
        };
        positions.reset(body);
        positions
    }

    /// Drops all animation state and places every segment on its cell.
    pub fn reset(&mut self, body: &[Cell]) {
        self.points.clear();
        self.points
            .extend(body.iter().map(|cell| target_of(*cell, self.cell_size)));
    }

    #[must_use]
    pub fn points(&self) -> &[RenderPoint] {
        &self.points
    }

    #[must_use]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Keeps the point list in step with a body that just moved.
    ///
    /// The new head entry starts where the old head was drawn so it glides
    /// out of the neck instead of appearing on its cell. Without growth the
    /// last entry is dropped with the tail.
    pub fn apply_tick(&mut self, outcome: TickOutcome, body: &[Cell]) {
        let TickOutcome::Advanced { grew } = outcome else {
            return;
        };

        let seed = match (self.points.first(), body.first()) {
            (Some(previous_head), _) => *previous_head,
            (None, Some(head)) => target_of(*head, self.cell_size),
            (None, None) => return,
        };
        self.points.insert(0, seed);
        if !grew {
            let _ = self.points.pop();
        }
    }

    /// Eases every segment toward its cell for one animation frame.
    ///
    /// `delta_time` is the elapsed frame time relative to one frame at
    /// [`ANIMATION_FPS`]; see [`frame_delta`].
    pub fn advance_frame(&mut self, body: &[Cell], easing: Easing, delta_time: f32) {
        let settled_from = self.resync(body);
        let targets: Vec<RenderPoint> = body
            .iter()
            .map(|cell| target_of(*cell, self.cell_size))
            .collect();
        let axes: Vec<Option<Axis>> = self
            .points
            .iter()
            .zip(&targets)
            .map(|(point, target)| motion_axis(*point, *target))
            .collect();

        let last_index = body.len().saturating_sub(1);
        for (index, (point, target)) in self.points.iter_mut().zip(&targets).enumerate() {
            if index >= settled_from {
                break;
            }

            let base = if is_turning(&axes, index) {
                easing.turn
            } else {
                easing.movement
            };
            let ease = if index == 0 {
                base
            } else {
                let progress = index as f32 / last_index as f32;
                base + (easing.tail - base) * progress
            };

            let factor = 1.0 - (1.0 - ease).powf(delta_time);
            point.x = ease_axis(point.x, target.x, factor);
            point.y = ease_axis(point.y, target.y, factor);
        }
    }

    /// Matches the point count to `body`, seeding missing segments on their
    /// cells. Returns the index of the first seeded segment.
    fn resync(&mut self, body: &[Cell]) -> usize {
        self.points.truncate(body.len());
        let existing = self.points.len();
        for cell in &body[existing..] {
            self.points.push(target_of(*cell, self.cell_size));
        }
        existing
    }
}

/// Converts elapsed wall time into a frame-count ratio at [`ANIMATION_FPS`].
#[must_use]
pub fn frame_delta(elapsed: Duration) -> f32 {
    (elapsed.as_secs_f32() * ANIMATION_FPS as f32).clamp(0.0, MAX_FRAME_DELTA)
}

fn target_of(cell: Cell, cell_size: f32) -> RenderPoint {
    RenderPoint {
        x: cell.x as f32 * cell_size,
        y: cell.y as f32 * cell_size,
    }
}

fn ease_axis(current: f32, target: f32, factor: f32) -> f32 {
    let remaining = target - current;
    if remaining.abs() < SNAP_EPSILON {
        target
    } else {
        current + remaining * factor
    }
}

fn motion_axis(from: RenderPoint, to: RenderPoint) -> Option<Axis> {
    let dx = (to.x - from.x).abs();
    let dy = (to.y - from.y).abs();
    if dx < SNAP_EPSILON && dy < SNAP_EPSILON {
        None
    } else if dx >= dy {
        Some(Axis::Horizontal)
    } else {
        Some(Axis::Vertical)
    }
}

// A segment is turning when a moving neighbour travels along the other axis.
fn is_turning(axes: &[Option<Axis>], index: usize) -> bool {
    let Some(own) = axes[index] else {
        return false;
    };

    let before = index.checked_sub(1).and_then(|i| axes[i]);
    let after = axes.get(index + 1).copied().flatten();
    [before, after]
        .into_iter()
        .flatten()
        .any(|neighbour| neighbour != own)
}
