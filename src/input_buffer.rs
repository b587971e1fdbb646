use std::collections::VecDeque;

use crate::config::{INPUT_BUFFER_CAPACITY, TURN_WINDOW_MS};
use crate::input::{direction_change_is_valid, Direction};

/// Millisecond timestamp on a monotonic clock chosen by the caller.
pub type Timestamp = u64;

/// A direction intent waiting to be applied on a tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct PendingCommand {
    pub direction: Direction,
    pub timestamp: Timestamp,
}

/// Bounded queue that turns real-time key presses into one direction per tick.
///
/// A reversal pressed within [`TURN_WINDOW_MS`] of the previous press is
/// rewritten into two queued 90° turns so the snake can U-turn on two
/// consecutive ticks instead of dropping the key.
#[derive(Debug, Clone, Default)]
pub struct InputBuffer {
    pending: VecDeque<PendingCommand>,
    last_valid: Option<PendingCommand>,
}

impl InputBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a raw direction intent pressed at `now`.
    ///
    /// `current` is the direction the snake last moved in; it selects the
    /// intermediate turn of a quick reversal.
    pub fn submit(&mut self, direction: Direction, current: Direction, now: Timestamp) {
        if let Some(last) = self.last_valid {
            let within_window = now.saturating_sub(last.timestamp) < TURN_WINDOW_MS;
            if within_window && direction == last.direction.opposite() {
                let intermediate = if current.is_vertical() {
                    Direction::Left
                } else {
                    Direction::Up
                };

                self.pending.clear();
                self.pending.push_back(PendingCommand {
                    direction: intermediate,
                    timestamp: now,
                });
                self.pending.push_back(PendingCommand {
                    direction,
                    timestamp: now + 1,
                });
                self.last_valid = Some(PendingCommand {
                    direction,
                    timestamp: now,
                });
                return;
            }
        }

        let command = PendingCommand {
            direction,
            timestamp: now,
        };

        // Repeating the newest intent does not queue a second copy.
        if self.pending.back().map(|newest| newest.direction) != Some(direction) {
            self.pending.push_back(command);
            if self.pending.len() > INPUT_BUFFER_CAPACITY {
                let _ = self.pending.pop_front();
            }
        }

        self.last_valid = Some(command);
    }

    /// Returns the direction to apply on this tick, if any.
    ///
    /// Called once per tick with the direction applied on the previous tick.
    /// A full buffer is the reserved quick-turn sequence and is never
    /// filtered; otherwise a command reversing `current` is held back.
    pub fn consume(&mut self, current: Direction) -> Option<Direction> {
        let first = *self.pending.front()?;

        if self.permits(current, first.direction) {
            let _ = self.pending.pop_front();
            return Some(first.direction);
        }

        let second = *self.pending.get(1)?;
        if self.permits(current, second.direction) {
            self.pending.truncate(1);
            return Some(second.direction);
        }

        None
    }

    /// Pending commands, oldest first.
    pub fn pending(&self) -> impl Iterator<Item = &PendingCommand> {
        self.pending.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// The most recent accepted raw intent.
    #[must_use]
    pub fn last_valid(&self) -> Option<PendingCommand> {
        self.last_valid
    }

    /// Drops every pending command and forgets the last intent.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.last_valid = None;
    }

    fn permits(&self, current: Direction, next: Direction) -> bool {
        self.pending.len() == INPUT_BUFFER_CAPACITY || direction_change_is_valid(current, next)
    }
}
