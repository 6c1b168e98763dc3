//! Thin development harness: load a FEN, run perft to a depth, or ask
//! the engine for a move. Not an interactive input loop, GUI, or arena
//! harness — just a developer-facing perft/bestmove binary alongside
//! the library crate.

use std::env;
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

use zugzwang::board::{Board, Color};
use zugzwang::engine::Engine;
use zugzwang::logger::init_logging;
use zugzwang::moves::perft;

fn usage() -> ! {
    eprintln!(
        "usage:\n  zugzwang perft <depth> [fen] [color]\n  zugzwang bestmove <depth> [fen] [color] [movetime_ms]"
    );
    std::process::exit(2);
}

fn parse_color(s: Option<&String>) -> Color {
    match s.map(String::as_str) {
        Some("b") | Some("black") => Color::Black,
        _ => Color::White,
    }
}

fn load_board(fen: Option<&String>) -> Board {
    let mut board = Board::new();
    match fen {
        Some(fen) => board.set_fen(fen).unwrap_or_else(|e| {
            eprintln!("{e}");
            std::process::exit(1);
        }),
        None => board.setup_initial_position(),
    }
    board
}

fn main() {
    init_logging("logs/cli.log", "zugzwang=info");

    let args: Vec<String> = env::args().collect();
    let Some(command) = args.get(1) else { usage() };

    match command.as_str() {
        "perft" => {
            let Some(depth) = args.get(2).and_then(|s| s.parse::<u32>().ok()) else {
                usage()
            };
            let fen = args.get(3).filter(|s| s.as_str() != "-");
            let color = parse_color(args.get(4));
            let mut board = load_board(fen);

            let bar = ProgressBar::new_spinner();
            bar.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
            bar.set_message(format!("perft depth {depth}"));
            let start = Instant::now();
            let nodes = perft::perft_divide(&mut board, color, depth);
            bar.finish_with_message(format!(
                "perft depth {depth}: {nodes} nodes in {:.3}s",
                start.elapsed().as_secs_f64()
            ));
        }
        "bestmove" => {
            let Some(depth) = args.get(2).and_then(|s| s.parse::<u8>().ok()) else {
                usage()
            };
            let fen = args.get(3).filter(|s| s.as_str() != "-");
            let color = parse_color(args.get(4));
            let movetime_ms = args.get(5).and_then(|s| s.parse::<u64>().ok());

            let mut board = load_board(fen);
            let mut engine = Engine::new(depth);
            let limit = movetime_ms.map(Duration::from_millis);
            match engine.best_move(&mut board, color, limit) {
                Some(mv) => println!("bestmove {}", mv.to_uci()),
                None => println!("bestmove none"),
            }
        }
        _ => usage(),
    }
}
