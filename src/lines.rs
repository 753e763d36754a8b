//! Precomputed four-in-a-row possibilities

use lazy_static::lazy_static;

use crate::board::{Board, Piece};
use crate::{COLS, ROWS};

/// The total number of distinct four-in-a-row placements on the board
pub const LINE_COUNT: usize =
    ROWS * (COLS - 3) + COLS * (ROWS - 3) + 2 * ((ROWS - 3) * (COLS - 3));

/// One horizontal, vertical or diagonal four-in-a-row possibility, as
/// (row, column) coordinates with row 0 at the bottom
#[derive(Copy, Clone, Debug)]
pub struct WinningLine {
    pub cells: [(usize, usize); 4],
}

impl WinningLine {
    /// Counts the given player's pieces, the opponent's pieces and the empty
    /// cells along this line
    pub fn tally(&self, board: &Board, mover: Piece) -> (usize, usize, usize) {
        let mut own = 0;
        let mut theirs = 0;
        let mut empty = 0;
        for &(row, column) in self.cells.iter() {
            match board.piece_at(row, column) {
                Some(piece) if piece == mover => own += 1,
                Some(_) => theirs += 1,
                None => empty += 1,
            }
        }
        (own, theirs, empty)
    }
}

/// Enumerates every four-in-a-row placement once
pub fn generate() -> Vec<WinningLine> {
    let mut lines = Vec::with_capacity(LINE_COUNT);

    // horizontal
    for row in 0..ROWS {
        for column in 0..=COLS - 4 {
            lines.push(WinningLine {
                cells: [
                    (row, column),
                    (row, column + 1),
                    (row, column + 2),
                    (row, column + 3),
                ],
            });
        }
    }

    // vertical
    for column in 0..COLS {
        for row in 0..=ROWS - 4 {
            lines.push(WinningLine {
                cells: [
                    (row, column),
                    (row + 1, column),
                    (row + 2, column),
                    (row + 3, column),
                ],
            });
        }
    }

    // diagonal /
    for row in 0..=ROWS - 4 {
        for column in 0..=COLS - 4 {
            lines.push(WinningLine {
                cells: [
                    (row, column),
                    (row + 1, column + 1),
                    (row + 2, column + 2),
                    (row + 3, column + 3),
                ],
            });
        }
    }

    // diagonal \
    for row in 3..ROWS {
        for column in 0..=COLS - 4 {
            lines.push(WinningLine {
                cells: [
                    (row, column),
                    (row - 1, column + 1),
                    (row - 2, column + 2),
                    (row - 3, column + 3),
                ],
            });
        }
    }

    lines
}

lazy_static! {
    /// The winning line set, generated once at startup
    pub static ref WINNING_LINES: Vec<WinningLine> = generate();
}
