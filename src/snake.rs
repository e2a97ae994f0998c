use std::collections::VecDeque;

use crate::config::{GridSize, CELL_SIZE_UNITS, GRID_ORIGIN_UNITS};
use crate::effects::EffectKind;
use crate::input::{direction_change_is_valid, Direction};

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns the neighbouring cell one step in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Returns the top-left corner of this cell in playfield units.
    #[must_use]
    pub fn to_logical_units(self) -> (i32, i32) {
        (
            GRID_ORIGIN_UNITS.0 + self.x * CELL_SIZE_UNITS,
            GRID_ORIGIN_UNITS.1 + self.y * CELL_SIZE_UNITS,
        )
    }
}

/// Segmented snake body with a target length it grows or trims toward.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    target_length: usize,
    facing: Direction,
    effect_tint: Option<EffectKind>,
}

impl Snake {
    /// Creates a one-cell snake at `start` facing `facing`.
    #[must_use]
    pub fn new(start: Position, facing: Direction) -> Self {
        let mut body = VecDeque::new();
        body.push_front(start);

        Self {
            body,
            target_length: 1,
            facing,
            effect_tint: None,
        }
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// The target length matches the supplied segments. An empty list yields
    /// a one-cell snake at the origin so the body is never empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, facing: Direction) -> Self {
        if segments.is_empty() {
            return Self::new(Position { x: 0, y: 0 }, facing);
        }

        Self {
            target_length: segments.len(),
            body: VecDeque::from(segments),
            facing,
            effect_tint: None,
        }
    }

    /// Raises the target length; the extra segments appear on later moves.
    pub fn grow(&mut self, amount: usize) {
        self.target_length = self.target_length.saturating_add(amount);
    }

    /// Moves one cell and returns the new head.
    ///
    /// A `direction` that reverses the current facing is ignored and the snake
    /// keeps going the way it was facing.
    pub fn move_forward(&mut self, direction: Direction) -> Position {
        if direction_change_is_valid(self.facing, direction) {
            self.facing = direction;
        }

        let next_head = self.head().step(self.facing);
        self.body.push_front(next_head);
        while self.body.len() > self.target_length {
            let _ = self.body.pop_back();
        }

        next_head
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        // The body always holds at least one segment: constructors insert one
        // and `move_forward` never trims below `target_length >= 1`.
        self.body.front().copied().unwrap_or(Position { x: 0, y: 0 })
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn is_self_colliding(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    #[must_use]
    pub fn target_length(&self) -> usize {
        self.target_length
    }

    /// Returns the direction of the last move.
    #[must_use]
    pub fn facing(&self) -> Direction {
        self.facing
    }

    #[must_use]
    pub fn effect_tint(&self) -> Option<EffectKind> {
        self.effect_tint
    }

    pub fn set_effect_tint(&mut self, tint: Option<EffectKind>) {
        self.effect_tint = tint;
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }

    /// Copies the body into a vector, head first.
    #[must_use]
    pub fn positions(&self) -> Vec<Position> {
        self.body.iter().copied().collect()
    }
}
