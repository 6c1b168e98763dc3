//! Perft against the standard reference node counts.

use zugzwang::board::{Board, Color};
use zugzwang::moves::perft::perft;

#[test]
fn initial_position_depth_1_through_4() {
    let mut board = Board::new();
    board.setup_initial_position();

    assert_eq!(perft(&mut board, Color::White, 1), 20);
    assert_eq!(perft(&mut board, Color::White, 2), 400);
    assert_eq!(perft(&mut board, Color::White, 3), 8_902);
    assert_eq!(perft(&mut board, Color::White, 4), 197_281);
}

#[test]
#[ignore] // depth 5 is slow without bitboards; run manually with --ignored
fn initial_position_depth_5() {
    let mut board = Board::new();
    board.setup_initial_position();
    assert_eq!(perft(&mut board, Color::White, 5), 4_865_609);
}

/// "Kiwipete" — the standard perft stress position exercising castling,
/// promotions, and en passant together.
const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

#[test]
fn kiwipete_depth_1_and_2() {
    let mut board = Board::new();
    board.set_fen(KIWIPETE).unwrap();
    assert_eq!(perft(&mut board, Color::White, 1), 48);
    assert_eq!(perft(&mut board, Color::White, 2), 2_039);
}

#[test]
fn perft_never_mutates_the_starting_position() {
    let mut board = Board::new();
    board.setup_initial_position();
    let before = board.clone();
    perft(&mut board, Color::White, 3);
    assert_eq!(board, before);
}
