//! Board geometry. Positions are kept in board units: every coordinate is a
//! multiple of [`SIZE`], so one move is one cell.

/// Side of one cell in board units.
pub const SIZE: i32 = 40;
pub const WINDOW_W: i32 = 1000;
pub const WINDOW_H: i32 = 800;

pub type Cell = (i32, i32);

pub const SNAKE_START: Cell = cell(5, 5);
pub const APPLE_START: Cell = cell(3, 3);

pub const fn cols() -> i32 {
    WINDOW_W / SIZE
}

pub const fn rows() -> i32 {
    WINDOW_H / SIZE
}

/// Cell at the given column and row.
pub const fn cell(col: i32, row: i32) -> Cell {
    (col * SIZE, row * SIZE)
}

/// Column and row of a cell.
pub fn to_grid(pos: Cell) -> (i32, i32) {
    (pos.0.div_euclid(SIZE), pos.1.div_euclid(SIZE))
}

pub fn on_board(pos: Cell) -> bool {
    pos.0 >= 0 && pos.0 < WINDOW_W && pos.1 >= 0 && pos.1 < WINDOW_H
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_is_25_by_20() {
        assert_eq!(cols(), 25);
        assert_eq!(rows(), 20);
    }

    #[test]
    fn cell_round_trips_through_grid() {
        assert_eq!(cell(5, 5), (200, 200));
        assert_eq!(to_grid(cell(24, 19)), (24, 19));
        assert_eq!(to_grid(cell(-1, 0)), (-1, 0));
    }

    #[test]
    fn bounds() {
        assert!(on_board(cell(0, 0)));
        assert!(on_board((WINDOW_W - SIZE, WINDOW_H - SIZE)));
        assert!(!on_board(cell(-1, 0)));
        assert!(!on_board(cell(0, -1)));
        assert!(!on_board((WINDOW_W, 0)));
        assert!(!on_board((0, WINDOW_H)));
    }
}
