//! Incremental 64-bit position fingerprinting
//!
//! One random key per (row, column, piece) triple; a board's hash is the
//! XOR of the keys of its occupied cells, so placement and undo are O(1)
//! hash updates.

use lazy_static::lazy_static;
use rand_xoshiro::rand_core::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::board::Piece;
use crate::{COLS, ROWS};

/// Fixed seed so hashes are reproducible across runs
pub const ZOBRIST_SEED: u64 = 0xDEAD_BEEF;

pub struct ZobristKeys {
    keys: [[[u64; 2]; COLS]; ROWS],
}

impl ZobristKeys {
    /// Generates the full key table from a seed
    pub fn from_seed(seed: u64) -> Self {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let mut keys = [[[0u64; 2]; COLS]; ROWS];
        for row in keys.iter_mut() {
            for column in row.iter_mut() {
                for key in column.iter_mut() {
                    *key = rng.next_u64();
                }
            }
        }
        Self { keys }
    }

    pub fn key(&self, row: usize, column: usize, piece: Piece) -> u64 {
        self.keys[row][column][piece.index()]
    }
}

lazy_static! {
    /// The key table used by every board, generated once at startup
    pub static ref ZOBRIST: ZobristKeys = ZobristKeys::from_seed(ZOBRIST_SEED);
}
