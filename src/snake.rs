use std::collections::VecDeque;

use crate::input::Direction;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies on a `board_size` square board.
    #[must_use]
    pub fn is_within_bounds(self, board_size: u16) -> bool {
        let size = i32::from(board_size);
        self.x >= 0 && self.y >= 0 && self.x < size && self.y < size
    }

    /// Returns the neighbouring cell one step towards `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Snake body, head first.
///
/// Only the engine moves or grows the snake; everyone else reads it.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    /// Builds a straight snake of `length` cells with its head at `head`,
    /// trailing away from `heading`.
    #[must_use]
    pub(crate) fn straight(head: Position, heading: Direction, length: usize) -> Self {
        let trail = heading.opposite();
        let mut body = VecDeque::with_capacity(length.max(1));
        let mut cell = head;
        body.push_back(cell);
        for _ in 1..length {
            cell = cell.step(trail);
            body.push_back(cell);
        }

        Self { body }
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// Returns `None` for an empty body.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>) -> Option<Self> {
        if segments.is_empty() {
            return None;
        }

        Some(Self {
            body: VecDeque::from(segments),
        })
    }

    /// Moves the head to `next_head`. The tail is kept when `grow` is set.
    pub(crate) fn advance(&mut self, next_head: Position, grow: bool) {
        self.body.push_front(next_head);
        if !grow {
            let _ = self.body.pop_back();
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        // The body is never empty: both constructors guarantee one segment
        // and `advance` pushes before it pops.
        self.body[0]
    }

    /// Returns the current tail position.
    #[must_use]
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns true if any segment other than the tail occupies `position`.
    ///
    /// Used when the tail is about to vacate its cell on this tick.
    #[must_use]
    pub fn occupies_excluding_tail(&self, position: Position) -> bool {
        self.body
            .iter()
            .take(self.body.len() - 1)
            .any(|segment| *segment == position)
    }

    /// Returns true when two segments share a cell.
    #[must_use]
    pub fn has_overlap(&self) -> bool {
        self.body
            .iter()
            .enumerate()
            .any(|(index, segment)| self.body.iter().skip(index + 1).any(|other| other == segment))
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
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}
