#[cfg(test)]
pub mod test {
    use anyhow::{anyhow, Result};
    use std::time::Duration;

    use crate::board::{Board, Piece};
    use crate::eval::{evaluate, WIN_SCORE};
    use crate::lines::{LINE_COUNT, WINNING_LINES};
    use crate::search::{find_best_move, SearchConfig, Searcher, INFINITY};
    use crate::transposition_table::{Bound, Entry, TranspositionTable};
    use crate::zobrist::{ZobristKeys, ZOBRIST_SEED};
    use crate::{COLS, ROWS};

    fn quick_config() -> SearchConfig {
        SearchConfig {
            max_depth: 6,
            time_budget: Duration::from_millis(3_000),
        }
    }

    #[test]
    pub fn winning_line_count() {
        // 6x7: 24 horizontal + 21 vertical + 24 diagonal
        assert_eq!(WINNING_LINES.len(), LINE_COUNT);
        assert_eq!(WINNING_LINES.len(), 69);
    }

    #[test]
    pub fn zobrist_keys_deterministic() {
        let a = ZobristKeys::from_seed(ZOBRIST_SEED);
        let b = ZobristKeys::from_seed(ZOBRIST_SEED);
        for row in 0..ROWS {
            for column in 0..COLS {
                assert_eq!(a.key(row, column, Piece::Red), b.key(row, column, Piece::Red));
                assert_eq!(
                    a.key(row, column, Piece::Yellow),
                    b.key(row, column, Piece::Yellow)
                );
            }
        }
    }

    #[test]
    pub fn hash_round_trip() -> Result<()> {
        let mut board = Board::new();
        assert_eq!(board.hash(), 0);

        // drop/undo in strict LIFO order must restore each intermediate hash
        let moves = [3usize, 3, 2, 4, 4, 0, 6];
        let mut hashes = vec![board.hash()];
        let mut mover = Piece::Red;
        for &column in moves.iter() {
            board.drop_piece(column, mover)?;
            hashes.push(board.hash());
            mover = mover.opponent();
        }
        assert_eq!(board.hash(), board.rehash());

        for &column in moves.iter().rev() {
            hashes.pop();
            board.undo(column);
            assert_eq!(board.hash(), *hashes.last().unwrap());
            assert_eq!(board.hash(), board.rehash());
        }
        assert_eq!(board.hash(), 0);
        Ok(())
    }

    #[test]
    pub fn same_moves_same_hash() -> Result<()> {
        let a = Board::from_moves("44552317")?;
        let b = Board::from_moves("44552317")?;
        assert_eq!(a.hash(), b.hash());
        Ok(())
    }

    #[test]
    pub fn drop_rejects_invalid_moves() -> Result<()> {
        let mut board = Board::new();
        for _ in 0..ROWS {
            board.drop_piece(2, Piece::Red)?;
        }
        let hash = board.hash();

        // full column
        assert!(board.drop_piece(2, Piece::Yellow).is_err());
        // out of range
        assert!(board.drop_piece(COLS, Piece::Yellow).is_err());

        // no mutation on failure
        assert_eq!(board.hash(), hash);
        assert_eq!(board.num_pieces(), ROWS);
        assert_eq!(board.height(2), ROWS);
        Ok(())
    }

    #[test]
    pub fn undo_empty_column_is_noop() {
        let mut board = Board::new();
        board.undo(3);
        assert_eq!(board.hash(), 0);
        assert_eq!(board.num_pieces(), 0);
    }

    #[test]
    pub fn check_win_is_history_independent() {
        // the same stone configuration reached by two different orders
        let mut a = Board::new();
        for column in 0..4 {
            a.place(column, Piece::Red);
        }
        for column in 0..3 {
            a.place(column, Piece::Yellow);
        }

        let mut b = Board::new();
        for column in (0..3).rev() {
            b.place(column, Piece::Red);
            b.place(column, Piece::Yellow);
        }
        b.place(3, Piece::Red);

        assert_eq!(a.hash(), b.hash());
        assert!(a.check_win(Piece::Red) && b.check_win(Piece::Red));
        assert!(!a.check_win(Piece::Yellow) && !b.check_win(Piece::Yellow));
    }

    #[test]
    pub fn check_win_all_directions() -> Result<()> {
        // vertical
        let board = Board::from_moves("1212121")?;
        assert!(board.check_win(Piece::Red));

        // horizontal
        let board = Board::from_moves("1122334")?;
        assert!(board.check_win(Piece::Red));

        // diagonal /
        let mut board = Board::new();
        for column in 0..4 {
            for _ in 0..column {
                board.place(column, Piece::Yellow);
            }
            board.place(column, Piece::Red);
        }
        assert!(board.check_win(Piece::Red));

        // diagonal \
        let mut board = Board::new();
        for column in 0..4 {
            for _ in 0..3 - column {
                board.place(column, Piece::Yellow);
            }
            board.place(column, Piece::Red);
        }
        assert!(board.check_win(Piece::Red));
        Ok(())
    }

    #[test]
    pub fn evaluate_empty_board_is_balanced() {
        let mut board = Board::new();
        assert_eq!(evaluate(&mut board, Piece::Red), 0);
        assert_eq!(evaluate(&mut board, Piece::Yellow), 0);
    }

    #[test]
    pub fn evaluate_leaves_board_unchanged() -> Result<()> {
        let mut board = Board::from_moves("445362")?;
        let hash = board.hash();
        let pieces = board.num_pieces();
        let _ = evaluate(&mut board, Piece::Red);
        assert_eq!(board.hash(), hash);
        assert_eq!(board.num_pieces(), pieces);
        Ok(())
    }

    #[test]
    pub fn takes_immediate_win() -> Result<()> {
        let mut board = Board::new();
        for _ in 0..3 {
            board.place(0, Piece::Yellow);
        }
        board.place(1, Piece::Red);
        board.place(2, Piece::Red);
        board.place(1, Piece::Red);

        let column = find_best_move(&mut board, Piece::Yellow, &quick_config())?;
        assert_eq!(column, 0);
        Ok(())
    }

    #[test]
    pub fn blocks_open_three() -> Result<()> {
        // Red threatens to complete the bottom row at column 3
        let mut board = Board::new();
        board.place(0, Piece::Red);
        board.place(1, Piece::Red);
        board.place(2, Piece::Red);
        board.place(0, Piece::Yellow);
        board.place(1, Piece::Yellow);

        let column = find_best_move(&mut board, Piece::Yellow, &quick_config())?;
        assert_eq!(column, 3);
        Ok(())
    }

    #[test]
    pub fn prefers_center_opening() -> Result<()> {
        let mut board = Board::new();
        let column = find_best_move(&mut board, Piece::Yellow, &quick_config())?;
        // the centre column is the strongest opening; an edge is never right
        assert_ne!(column, 0);
        assert_ne!(column, COLS - 1);
        assert_eq!(column, COLS / 2);
        Ok(())
    }

    #[test]
    pub fn near_zero_budget_still_moves() -> Result<()> {
        let mut board = Board::new();
        let config = SearchConfig::with_budget_ms(0);
        let column = find_best_move(&mut board, Piece::Yellow, &config)?;
        assert!(board.playable(column));
        assert_eq!(board.num_pieces(), 0);
        Ok(())
    }

    #[test]
    pub fn full_board_rejects_search() {
        let mut board = Board::new();
        for column in 0..COLS {
            for row in 0..ROWS {
                let piece = if (row + column) % 2 == 0 {
                    Piece::Red
                } else {
                    Piece::Yellow
                };
                board.place(column, piece);
            }
        }
        assert!(board.is_full());
        assert!(find_best_move(&mut board, Piece::Red, &quick_config()).is_err());
    }

    #[test]
    pub fn search_restores_board() -> Result<()> {
        let mut board = Board::from_moves("435261")?;
        let hash = board.hash();
        let heights: Vec<usize> = (0..COLS).map(|column| board.height(column)).collect();

        let _ = find_best_move(&mut board, Piece::Red, &quick_config())?;

        assert_eq!(board.hash(), hash);
        assert_eq!(board.hash(), board.rehash());
        for column in 0..COLS {
            assert_eq!(board.height(column), heights[column]);
        }
        Ok(())
    }

    /// Plain exhaustive negamax with no pruning, no table and no move
    /// ordering, as a reference for the search's score
    fn minimax_reference(board: &mut Board, mover: Piece, depth: u32, ply: i32) -> i32 {
        if board.check_win(mover.opponent()) {
            return ply - WIN_SCORE;
        }
        if board.is_full() {
            return 0;
        }
        if depth == 0 {
            return evaluate(board, mover);
        }

        let mut best = -INFINITY;
        for column in 0..COLS {
            if !board.playable(column) {
                continue;
            }
            board.place(column, mover);
            let score = -minimax_reference(board, mover.opponent(), depth - 1, ply + 1);
            board.undo(column);
            if score > best {
                best = score;
            }
        }
        best
    }

    #[test]
    pub fn alpha_beta_matches_minimax() -> Result<()> {
        let config = SearchConfig {
            max_depth: 4,
            time_budget: Duration::from_secs(600),
        };

        for (moves, mover) in [
            ("4455", Piece::Red),
            ("44444", Piece::Yellow),
            ("1234567", Piece::Yellow),
            ("435261", Piece::Red),
        ]
        .iter()
        {
            let mut board = Board::from_moves(moves)?;
            let mut reference_board = board.clone();

            let mut searcher = Searcher::new(&mut board, &config);
            let pruned = searcher
                .negamax(*mover, 4, -INFINITY, INFINITY, 0)
                .map_err(|_| anyhow!("search aborted unexpectedly"))?;

            let exhaustive = minimax_reference(&mut reference_board, *mover, 4, 0);
            assert_eq!(pruned, exhaustive, "diverged on position {}", moves);
        }
        Ok(())
    }

    #[test]
    pub fn deeper_search_keeps_forced_win() -> Result<()> {
        // Yellow has a one-move win; every depth must report it
        let mut board = Board::new();
        for _ in 0..3 {
            board.place(3, Piece::Yellow);
        }
        board.place(0, Piece::Red);
        board.place(1, Piece::Red);
        board.place(0, Piece::Red);

        for max_depth in 1..=6 {
            let config = SearchConfig {
                max_depth,
                time_budget: Duration::from_secs(60),
            };
            let mut search_board = board.clone();
            let mut searcher = Searcher::new(&mut search_board, &config);
            let (column, score) = searcher.search(Piece::Yellow)?;
            assert_eq!(column, 3);
            assert!(score >= WIN_SCORE - (ROWS * COLS) as i32);
        }
        Ok(())
    }

    #[test]
    pub fn table_overwrites_and_clears_on_overflow() {
        let mut table = TranspositionTable::with_ceiling(2);
        let entry = |score| Entry {
            depth: 3,
            score,
            bound: Bound::Exact,
        };

        table.insert(1, entry(10));
        table.insert(2, entry(20));
        assert_eq!(table.len(), 2);

        // newer entry for the same hash overwrites in place
        table.insert(2, entry(25));
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(2).unwrap().score, 25);

        // a new key past the ceiling clears the table first
        table.insert(3, entry(30));
        assert_eq!(table.len(), 1);
        assert!(table.get(1).is_none());
        assert_eq!(table.get(3).unwrap().score, 30);
    }
}
