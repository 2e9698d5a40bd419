use crate::geometry::{Cell, SIZE, SNAKE_START};
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn is_opposite(self, other: Direction) -> bool {
        matches!((self, other), (Up, Down) | (Down, Up) | (Right, Left) | (Left, Right))
    }

    /// One cell step in board units.
    pub fn delta(self) -> Cell {
        match self {
            Up => (0, -SIZE),
            Down => (0, SIZE),
            Left => (-SIZE, 0),
            Right => (SIZE, 0),
        }
    }
}

/// Body segments with the head at index 0.
pub struct Snake {
    body: Vec<Cell>,
    direction: Direction,
}

impl Snake {
    pub fn new() -> Self {
        Self::with_body(vec![SNAKE_START], Down)
    }

    pub fn with_body(body: Vec<Cell>, direction: Direction) -> Self {
        assert!(!body.is_empty(), "a snake needs a head");
        Snake { body, direction }
    }

    pub fn segments(&self) -> &[Cell] {
        &self.body
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns false and keeps the current direction when asked to reverse.
    pub fn set_direction(&mut self, new_direction: Direction) -> bool {
        if new_direction.is_opposite(self.direction) {
            return false;
        }

        self.direction = new_direction;
        true
    }

    /// Every segment takes its predecessor's place, then the head steps once.
    pub fn advance(&mut self) {
        for i in (1..self.body.len()).rev() {
            self.body[i] = self.body[i - 1];
        }

        let (dx, dy) = self.direction.delta();
        let head = &mut self.body[0];
        head.0 += dx;
        head.1 += dy;
    }

    /// Appends a copy of the tail. It only separates from the old tail on the
    /// next `advance`.
    pub fn grow(&mut self) {
        let tail = self.body[self.body.len() - 1];
        self.body.push(tail);
    }
}

impl Default for Snake {
    fn default() -> Self {
        Self::new()
    }
}
