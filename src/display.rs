use anyhow::Result;
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use connect4_engine::{Board, Piece, COLS, ROWS};

/// Draws the board with column numbers along the top, bottom row last
pub fn draw_board(board: &Board) -> Result<()> {
    let mut stdout = stdout();

    let header: String = (1..=COLS).map(|column| format!(" {}", column)).collect();
    stdout.queue(PrintStyledContent(style(header + "\n")))?;

    for row in (0..ROWS).rev() {
        for column in 0..COLS {
            stdout.queue(PrintStyledContent(
                style(" O")
                    .attribute(Attribute::Bold)
                    .on(Color::DarkBlue)
                    .with(match board.piece_at(row, column) {
                        Some(Piece::Red) => Color::Red,
                        Some(Piece::Yellow) => Color::Yellow,
                        None => Color::DarkBlue,
                    }),
            ))?;
        }
        stdout.queue(PrintStyledContent(style("\n")))?;
    }
    stdout.flush()?;
    Ok(())
}
