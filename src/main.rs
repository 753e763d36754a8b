use anyhow::Result;

use std::io::{stdin, stdout, Write};

use connect4_engine::*;

mod display;
use display::draw_board;

fn main() -> Result<()> {
    initialize();

    let mut board = Board::new();
    let config = SearchConfig::default();

    let stdin = stdin();

    println!("Welcome to Connect 4\n");

    let human = Piece::Red;
    let ai = Piece::Yellow;

    // choose who moves first
    let mut current = loop {
        print!("Do you want to move first? y/n: ");
        stdout().flush().expect("failed to flush to stdout!");

        let mut buffer = String::new();
        stdin.read_line(&mut buffer)?;

        match buffer.to_lowercase().chars().next() {
            Some(_letter @ 'y') => break human,
            Some(_letter @ 'n') => break ai,
            _ => println!("Unknown answer given"),
        }
    };

    // game loop
    loop {
        draw_board(&board)?;

        let next_move = if current == ai {
            println!("AI is thinking...");
            stdout().flush().expect("Failed to flush to stdout!");

            let column = find_best_move(&mut board, ai, &config)?;
            println!("AI plays column {}", column + 1);
            column + 1
        } else {
            print!("Move input > ");
            stdout().flush().expect("Failed to flush to stdout!");
            let mut input_str = String::new();
            stdin.read_line(&mut input_str)?;

            match input_str.trim().parse::<usize>() {
                Err(_) => {
                    println!("Invalid number: {}", input_str);
                    continue;
                }
                Ok(column) => column,
            }
        };

        // re-prompt on out-of-range or full columns
        if next_move < 1 {
            println!("Invalid move, column {} out of range", next_move);
            continue;
        }
        if let Err(err) = board.drop_piece(next_move - 1, current) {
            println!("{}", err);
            continue;
        }

        // end states
        if board.check_win(current) {
            draw_board(&board)?;
            if current == human {
                println!("You win!");
            } else {
                println!("AI wins!");
            }
            break;
        }
        if board.is_full() {
            draw_board(&board)?;
            println!("Draw!");
            break;
        }

        current = current.opponent();
    }
    Ok(())
}
