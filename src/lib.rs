//! A time-limited agent for playing the board game 'Connect 4'
//!
//! This agent uses iterative-deepening alpha-beta search with a
//! transposition table and a heuristic evaluation to find a strong
//! move within a wall-clock budget.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_engine::{find_best_move, Board, Piece, SearchConfig};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! connect4_engine::initialize();
//!
//! let mut board = Board::from_moves("112233")?;
//! let column = find_best_move(&mut board, Piece::Red, &SearchConfig::default())?;
//!
//! assert_eq!(column, 3);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod board;

pub mod lines;

pub mod zobrist;

pub mod eval;

pub mod transposition_table;

pub mod timer;

pub mod search;

mod test;

pub use board::{Board, Piece};
pub use eval::WIN_SCORE;
pub use search::{find_best_move, SearchConfig, Searcher};
pub use transposition_table::TranspositionTable;

/// The number of rows on the game board
pub const ROWS: usize = 6;

/// The number of columns on the game board
pub const COLS: usize = 7;

/// Per-column move ordering and evaluation weight, largest in the centre
/// as more winning lines pass through the middle columns
pub const CENTER_WEIGHTS: [i32; COLS] = [1, 3, 6, 9, 6, 3, 1];

// ensure that the given dimensions admit at least one four-in-a-row
const_assert!(ROWS >= 4 && COLS >= 4);

/// Builds the Zobrist key table and the winning line set
///
/// Both tables are initialised lazily on first use; calling this once at
/// process start moves that cost out of the first search.
pub fn initialize() {
    lazy_static::initialize(&zobrist::ZOBRIST);
    lazy_static::initialize(&lines::WINNING_LINES);
}
