//! Grid state, piece placement/removal and terminal condition checks

use anyhow::{anyhow, Result};

use crate::lines::WINNING_LINES;
use crate::zobrist::ZOBRIST;
use crate::{COLS, ROWS};

/// One player's piece colour
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Piece {
    Red,
    Yellow,
}

impl Piece {
    /// Returns the other player's colour
    pub fn opponent(self) -> Self {
        match self {
            Piece::Red => Piece::Yellow,
            Piece::Yellow => Piece::Red,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Piece::Red => 0,
            Piece::Yellow => 1,
        }
    }
}

/// The game board
///
/// Cells are stored left-to-right, bottom-to-top. The position hash is
/// maintained incrementally: every placement XORs the (row, column, piece)
/// Zobrist key in and every undo XORs the same key back out, so a matched
/// place/undo pair restores the hash bit-for-bit.
#[derive(Clone)]
pub struct Board {
    cells: [Option<Piece>; ROWS * COLS],
    heights: [usize; COLS],
    num_pieces: usize,
    hash: u64,
}

fn cell_index(row: usize, column: usize) -> usize {
    column + COLS * row
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [None; ROWS * COLS],
            heights: [0; COLS],
            num_pieces: 0,
            hash: 0,
        }
    }

    /// Builds a board from a string of 1-indexed column digits, with Red
    /// moving first and the players alternating
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self> {
        let mut board = Self::new();
        let mut mover = Piece::Red;

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column @ 1..=COLS) => {
                    board.drop_piece(column - 1, mover)?;
                    mover = mover.opponent();
                }
                _ => return Err(anyhow!("could not parse '{}' as a valid move", column_char)),
            }
        }
        Ok(board)
    }

    /// Drops a piece into a column, returning the row it lands in
    ///
    /// Fails without mutating the board if the column is out of range or full.
    pub fn drop_piece(&mut self, column: usize, piece: Piece) -> Result<usize> {
        if column >= COLS {
            return Err(anyhow!(
                "Invalid move, column {} out of range. Columns must be between 1 and {}",
                column + 1,
                COLS
            ));
        }
        if !self.playable(column) {
            return Err(anyhow!("Invalid move, column {} full", column + 1));
        }
        Ok(self.place(column, piece))
    }

    /// Places a piece in the lowest empty cell of a column, returning the row
    ///
    /// The column must not be full; the search uses this after `playable`.
    pub fn place(&mut self, column: usize, piece: Piece) -> usize {
        debug_assert!(self.playable(column));
        let row = self.heights[column];
        self.cells[cell_index(row, column)] = Some(piece);
        self.heights[column] += 1;
        self.num_pieces += 1;
        self.hash ^= ZOBRIST.key(row, column, piece);
        row
    }

    /// Removes the topmost piece in a column (if any), restoring the
    /// pre-placement hash
    ///
    /// Callers must undo only columns they placed into, in LIFO order.
    pub fn undo(&mut self, column: usize) {
        if self.heights[column] == 0 {
            return;
        }
        self.heights[column] -= 1;
        let row = self.heights[column];
        if let Some(piece) = self.cells[cell_index(row, column)].take() {
            self.hash ^= ZOBRIST.key(row, column, piece);
            self.num_pieces -= 1;
        }
    }

    pub fn playable(&self, column: usize) -> bool {
        column < COLS && self.heights[column] < ROWS
    }

    pub fn is_full(&self) -> bool {
        self.num_pieces == ROWS * COLS
    }

    /// Returns true if the given colour has four-in-a-row anywhere on the
    /// board, by scanning every precomputed winning line
    pub fn check_win(&self, piece: Piece) -> bool {
        WINNING_LINES.iter().any(|line| {
            line.cells
                .iter()
                .all(|&(row, column)| self.piece_at(row, column) == Some(piece))
        })
    }

    pub fn piece_at(&self, row: usize, column: usize) -> Option<Piece> {
        self.cells[cell_index(row, column)]
    }

    /// The number of occupied cells in a column
    pub fn height(&self, column: usize) -> usize {
        self.heights[column]
    }

    pub fn num_pieces(&self) -> usize {
        self.num_pieces
    }

    /// The incrementally maintained position hash
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Recomputes the position hash from scratch, used to validate the
    /// incremental updates in tests
    pub fn rehash(&self) -> u64 {
        let mut hash = 0;
        for row in 0..ROWS {
            for column in 0..COLS {
                if let Some(piece) = self.piece_at(row, column) {
                    hash ^= ZOBRIST.key(row, column, piece);
                }
            }
        }
        hash
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
