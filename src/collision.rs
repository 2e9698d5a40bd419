use crate::geometry::{self, Cell};
use crate::snake::Snake;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeathCause {
    SelfCollision,
    Wall,
}

/// What the head touched after a move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct Collisions {
    pub ate: bool,
    pub death: Option<DeathCause>,
}

/// Entities move in whole cells, so equal coordinates mean the same cell.
pub fn cells_overlap(a: Cell, b: Cell) -> bool {
    a == b
}

/// Head against the body from index 2 on. Index 1 trails the head by one
/// step and can never share its cell.
pub fn hits_self(segments: &[Cell]) -> bool {
    match segments.split_first() {
        Some((head, rest)) => rest.iter().skip(1).any(|seg| cells_overlap(*head, *seg)),
        None => false,
    }
}

pub fn hits_wall(head: Cell) -> bool {
    !geometry::on_board(head)
}

pub fn detect(snake: &Snake, apple: Cell) -> Collisions {
    let head = snake.head();

    let death = if hits_self(snake.segments()) {
        Some(DeathCause::SelfCollision)
    } else if hits_wall(head) {
        Some(DeathCause::Wall)
    } else {
        None
    };

    Collisions { ate: cells_overlap(head, apple), death }
}
