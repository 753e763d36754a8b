//! Iterative-deepening negamax search with alpha-beta pruning, principal
//! variation search and a transposition table

use std::time::Duration;

use anyhow::{bail, Result};

use crate::board::{Board, Piece};
use crate::eval::{evaluate, WIN_SCORE};
use crate::timer::SearchTimer;
use crate::transposition_table::{Bound, Entry, TranspositionTable};
use crate::{CENTER_WEIGHTS, COLS, ROWS};

/// The deepest the iterative deepening loop will go
pub const MAX_DEPTH: u32 = 16;

/// Default wall-clock budget per move
pub const DEFAULT_TIME_BUDGET: Duration = Duration::from_millis(10_000);

pub(crate) const INFINITY: i32 = i32::MAX;

// any ply-adjusted win score lands above this; once one is found at the root
// there is no point deepening further
const WIN_THRESHOLD: i32 = WIN_SCORE - (ROWS * COLS) as i32;

// move ordering: a column that wins on the spot dominates everything, the
// previous iteration's best move comes next, then centre weight
const IMMEDIATE_WIN_PRIORITY: i32 = 10_000_000;
const PREFERRED_MOVE_BONUS: i32 = 5_000;
const ORDER_WEIGHT_SCALE: i32 = 10;

// the timer is polled once per this many nodes
const TIME_POLL_MASK: u64 = 1023;

/// Tunable search parameters
#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    pub max_depth: u32,
    pub time_budget: Duration,
}

impl SearchConfig {
    /// A full-depth search with the given budget in milliseconds
    pub fn with_budget_ms(time_budget_ms: u64) -> Self {
        Self {
            time_budget: Duration::from_millis(time_budget_ms),
            ..Self::default()
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: MAX_DEPTH,
            time_budget: DEFAULT_TIME_BUDGET,
        }
    }
}

/// Raised through the recursion when the time budget runs out; every frame
/// undoes its move and unwinds without storing unreliable scores
pub(crate) struct SearchAborted;

type NodeResult<T> = std::result::Result<T, SearchAborted>;

struct MoveSorter {
    size: usize,
    // column and priority
    moves: [(usize, i32); COLS],
}

impl MoveSorter {
    pub fn new() -> Self {
        Self {
            size: 0,
            moves: [(0, 0); COLS],
        }
    }
    pub fn push(&mut self, column: usize, priority: i32) {
        let mut pos = self.size;
        self.size += 1;
        while pos != 0 && self.moves[pos - 1].1 > priority {
            self.moves[pos] = self.moves[pos - 1];
            pos -= 1;
        }
        self.moves[pos] = (column, priority);
    }
}
impl Iterator for MoveSorter {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        match self.size {
            0 => None,
            _ => {
                self.size -= 1;
                Some(self.moves[self.size].0)
            }
        }
    }
}

/// Runs a time-limited search and returns the chosen column
///
/// The board is mutated in place during the search and restored exactly
/// before returning. Fails only if the board is already full; with any open
/// column a legal move is returned even on a zero budget.
pub fn find_best_move(board: &mut Board, mover: Piece, config: &SearchConfig) -> Result<usize> {
    let mut searcher = Searcher::new(board, config);
    let (column, _score) = searcher.search(mover)?;
    Ok(column)
}

/// A self-contained search context: board, transposition table, timer and
/// node counter
///
/// Nothing is shared between searchers, so independent searches can run
/// side by side without cross-contamination.
pub struct Searcher<'a> {
    board: &'a mut Board,
    table: TranspositionTable,
    timer: SearchTimer,
    max_depth: u32,

    /// The number of nodes searched by this `Searcher` so far (for diagnostics only)
    pub node_count: u64,
}

impl<'a> Searcher<'a> {
    /// Creates a searcher over a board; the clock starts here
    pub fn new(board: &'a mut Board, config: &SearchConfig) -> Self {
        Self {
            board,
            table: TranspositionTable::new(),
            timer: SearchTimer::new(config.time_budget),
            max_depth: config.max_depth,
            node_count: 0,
        }
    }

    /// Iterative deepening: searches at depth 1, 2, 3, ... keeping the best
    /// column and score of the last fully completed depth
    ///
    /// Stops at the depth ceiling, on budget exhaustion (discarding the
    /// partial depth), once a forced win is found, or once enough of the
    /// budget is gone that the next depth is unlikely to finish.
    pub fn search(&mut self, mover: Piece) -> Result<(usize, i32)> {
        if self.board.is_full() {
            bail!("no legal move: the board is full");
        }

        self.table.clear();

        // if even depth 1 is cut short, fall back to the most central open column
        let mut best_column = (0..COLS)
            .filter(|&column| self.board.playable(column))
            .max_by_key(|&column| CENTER_WEIGHTS[column])
            .unwrap_or(0);
        let mut best_score = 0;

        for depth in 1..=self.max_depth {
            match self.search_root(mover, depth, best_column) {
                Ok((column, score)) => {
                    best_column = column;
                    best_score = score;
                    if score >= WIN_THRESHOLD {
                        break;
                    }
                }
                Err(SearchAborted) => break,
            }
            if self.timer.should_halt_early() {
                break;
            }
        }

        Ok((best_column, best_score))
    }

    /// Searches every root move at the given depth with a full window,
    /// seeding move ordering with the previous iteration's best column
    fn search_root(
        &mut self,
        mover: Piece,
        depth: u32,
        preferred: usize,
    ) -> NodeResult<(usize, i32)> {
        let moves = self.order_moves(mover, Some(preferred));

        let mut alpha = -INFINITY;
        let beta = INFINITY;
        let mut best_column = preferred;
        let mut best_score = -INFINITY;
        let mut first = true;

        for column in moves {
            if self.timer.expired() {
                return Err(SearchAborted);
            }

            let score = self.explore(column, mover, depth, alpha, beta, 0, first)?;
            first = false;

            if score > best_score {
                best_score = score;
                best_column = column;
            }
            if best_score > alpha {
                alpha = best_score;
            }
        }

        Ok((best_column, best_score))
    }

    /// Performs game tree search
    ///
    /// Returns the score from the perspective of `mover`, the side to play
    /// at this node; callers negate it (negamax convention). Wins are scored
    /// as [`WIN_SCORE`] minus the ply they occur at, so faster wins score
    /// higher and slower losses score less badly.
    pub(crate) fn negamax(
        &mut self,
        mover: Piece,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        ply: i32,
    ) -> NodeResult<i32> {
        self.node_count += 1;
        if self.node_count & TIME_POLL_MASK == 0 && self.timer.expired() {
            return Err(SearchAborted);
        }

        // the side that just moved may have completed four-in-a-row
        if self.board.check_win(mover.opponent()) {
            return Ok(ply - WIN_SCORE);
        }
        if self.board.is_full() {
            return Ok(0);
        }
        if depth == 0 {
            return Ok(evaluate(self.board, mover));
        }

        let hash = self.board.hash();
        let original_alpha = alpha;
        let original_beta = beta;

        if let Some(entry) = self.table.get(hash) {
            if entry.depth >= depth {
                match entry.bound {
                    Bound::Exact => return Ok(entry.score),
                    Bound::Lower => {
                        if entry.score >= beta {
                            return Ok(entry.score);
                        }
                        // a lower bound can still raise alpha
                        if entry.score > alpha {
                            alpha = entry.score;
                        }
                    }
                    Bound::Upper => {
                        if entry.score <= alpha {
                            return Ok(entry.score);
                        }
                        // an upper bound can still lower beta
                        if entry.score < beta {
                            beta = entry.score;
                        }
                    }
                }
            }
        }

        let moves = self.order_moves(mover, None);
        let mut best_score = -INFINITY;
        let mut first = true;

        for column in moves {
            let score = self.explore(column, mover, depth, alpha, beta, ply, first)?;
            first = false;

            if score > best_score {
                best_score = score;
            }
            if best_score > alpha {
                alpha = best_score;
            }
            // a perfect opponent will not allow this branch
            if alpha >= beta {
                break;
            }
        }

        let bound = if best_score <= original_alpha {
            Bound::Upper
        } else if best_score >= original_beta {
            Bound::Lower
        } else {
            Bound::Exact
        };
        self.table.insert(
            hash,
            Entry {
                depth,
                score: best_score,
                bound,
            },
        );

        Ok(best_score)
    }

    /// Plays one move and searches beneath it, undoing the move before
    /// returning whether the search completed or aborted
    ///
    /// The first move of a node gets the full window; later moves are probed
    /// with a null window around alpha and re-searched with the full window
    /// only if the probe beats it (principal variation search).
    fn explore(
        &mut self,
        column: usize,
        mover: Piece,
        depth: u32,
        alpha: i32,
        beta: i32,
        ply: i32,
        first: bool,
    ) -> NodeResult<i32> {
        let opponent = mover.opponent();
        self.board.place(column, mover);

        let result = if first {
            self.negamax(opponent, depth - 1, -beta, -alpha, ply + 1)
                .map(|score| -score)
        } else {
            match self
                .negamax(opponent, depth - 1, -alpha - 1, -alpha, ply + 1)
                .map(|score| -score)
            {
                Ok(probe) if probe > alpha && probe < beta => self
                    .negamax(opponent, depth - 1, -beta, -probe, ply + 1)
                    .map(|score| -score),
                other => other,
            }
        };

        self.board.undo(column);
        result
    }

    /// Enumerates the non-full columns best-first
    fn order_moves(&mut self, mover: Piece, preferred: Option<usize>) -> MoveSorter {
        let mut moves = MoveSorter::new();
        for column in 0..COLS {
            if !self.board.playable(column) {
                continue;
            }
            let mut priority = CENTER_WEIGHTS[column] * ORDER_WEIGHT_SCALE;
            if preferred == Some(column) {
                priority += PREFERRED_MOVE_BONUS;
            }
            if self.wins_immediately(column, mover) {
                priority += IMMEDIATE_WIN_PRIORITY;
            }
            moves.push(column, priority);
        }
        moves
    }

    fn wins_immediately(&mut self, column: usize, mover: Piece) -> bool {
        self.board.place(column, mover);
        let won = self.board.check_win(mover);
        self.board.undo(column);
        won
    }
}
