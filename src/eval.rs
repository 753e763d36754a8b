//! Static heuristic scoring of non-terminal positions

use crate::board::{Board, Piece};
use crate::lines::WINNING_LINES;
use crate::{CENTER_WEIGHTS, COLS, ROWS};

/// The magnitude of a decided position's score; heuristic scores never reach it
pub const WIN_SCORE: i32 = 100_000_000;

// per-line pattern scores; opponent threes cost twice what our own are worth
// to bias the engine toward blocking
const OWN_THREE: i32 = 250_000;
const OPP_THREE: i32 = 500_000;
const OWN_TWO: i32 = 5_000;
const OPP_TWO: i32 = 9_000;

const CELL_WEIGHT_SCALE: i32 = 10;

// one-ply lookahead terms
const IMMEDIATE_WIN_BONUS: i32 = 1_000_000;
const DOUBLE_THREAT_PENALTY: i32 = 900_000;

/// Scores the position from the perspective of `mover`, the side to play
///
/// Returns ±[`WIN_SCORE`] if either side already has four-in-a-row. The
/// lookahead simulates drops in place and undoes every one of them, so the
/// board and its hash are unchanged on return.
pub fn evaluate(board: &mut Board, mover: Piece) -> i32 {
    let opponent = mover.opponent();
    if board.check_win(mover) {
        return WIN_SCORE;
    }
    if board.check_win(opponent) {
        return -WIN_SCORE;
    }

    let mut score = 0;

    for line in WINNING_LINES.iter() {
        score += match line.tally(board, mover) {
            (3, 0, 1) => OWN_THREE,
            (0, 3, 1) => -OPP_THREE,
            (2, 0, 2) => OWN_TWO,
            (0, 2, 2) => -OPP_TWO,
            _ => 0,
        };
    }

    // every occupied cell pulls the score toward whoever holds the centre
    for column in 0..COLS {
        let weight = CENTER_WEIGHTS[column] * CELL_WEIGHT_SCALE;
        for row in 0..board.height(column) {
            match board.piece_at(row, column) {
                Some(piece) if piece == mover => score += weight,
                Some(_) => score -= weight,
                None => {}
            }
        }
    }

    score + threat_lookahead(board, mover)
}

/// Tests every playable column for an immediate win by either side
///
/// A column that wins for the mover is a large bonus. Columns that would win
/// for the opponent are threats: a single threat can be blocked on the
/// mover's turn, but two or more cannot, so they score a heavy penalty
/// unless the mover wins first.
fn threat_lookahead(board: &mut Board, mover: Piece) -> i32 {
    let opponent = mover.opponent();
    let mut winning_moves = 0;
    let mut opponent_threats = 0;

    for column in 0..COLS {
        if !board.playable(column) {
            continue;
        }

        board.place(column, mover);
        if board.check_win(mover) {
            winning_moves += 1;
        }
        board.undo(column);

        board.place(column, opponent);
        if board.check_win(opponent) {
            opponent_threats += 1;
        }
        board.undo(column);
    }

    let mut score = winning_moves * IMMEDIATE_WIN_BONUS;
    if winning_moves == 0 && opponent_threats > 1 {
        score -= DOUBLE_THREAT_PENALTY;
    }
    score
}

const fn max_center_weight() -> i32 {
    let mut max = 0;
    let mut i = 0;
    while i < COLS {
        if CENTER_WEIGHTS[i] > max {
            max = CENTER_WEIGHTS[i];
        }
        i += 1;
    }
    max
}

// heuristic scores must stay clear of decided-position scores, even if every
// line and every lookahead term fires at once
const _MAX_HEURISTIC: i32 = crate::lines::LINE_COUNT as i32 * OPP_THREE
    + (ROWS * COLS) as i32 * max_center_weight() * CELL_WEIGHT_SCALE
    + COLS as i32 * IMMEDIATE_WIN_BONUS
    + DOUBLE_THREAT_PENALTY;
static_assertions::const_assert!(_MAX_HEURISTIC < WIN_SCORE);
