use rand::Rng;

use crate::geometry::{self, Cell, APPLE_START};

pub struct Apple {
    pos: Cell,
}

impl Apple {
    pub fn new() -> Self {
        Apple { pos: APPLE_START }
    }

    pub fn position(&self) -> Cell {
        self.pos
    }

    /// Moves the apple to a uniformly random cell of the board. The snake's
    /// body is not excluded, so the apple may land on it.
    pub fn relocate<R: Rng>(&mut self, rng: &mut R) {
        let col = rng.gen_range(0..geometry::cols());
        let row = rng.gen_range(0..geometry::rows());
        self.pos = geometry::cell(col, row);
    }

    #[cfg(test)]
    pub fn place(&mut self, pos: Cell) {
        self.pos = pos;
    }
}

impl Default for Apple {
    fn default() -> Self {
        Self::new()
    }
}
