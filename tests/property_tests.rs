//! Universal engine invariants, checked by fuzzing random legal play
//! from a handful of seed positions.

use zugzwang::board::{Board, Color};
use zugzwang::hash;
use zugzwang::moves::execute::{make, unmake};

const POSITIONS: &[&str] = &[
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1",
    "4k3/P7/8/8/8/8/8/4K3 w - - 0 1",
];

/// A tiny deterministic PRNG so the fuzz walk is reproducible without
/// pulling the `rand` crate into test-selection logic.
fn splitmix64(x: &mut u64) -> u64 {
    *x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = *x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

#[test]
fn make_unmake_round_trips_are_exact_along_random_playouts() {
    for &fen in POSITIONS {
        let mut seed = 12345u64;
        let mut board = Board::new();
        board.set_fen(fen).unwrap();
        let mut color = Color::White;

        for _ in 0..150 {
            let legal = board.legal_moves(color);
            if legal.is_empty() {
                break;
            }

            // Property 1: make/unmake round trip is exact for every legal move.
            for &m in &legal {
                let before = board.clone();
                let undo = make(&mut board, m);
                unmake(&mut board, m, undo);
                assert_eq!(board, before, "make/unmake mismatch for {m} from {fen}");
            }

            // Property 3: no legal move leaves the mover's own king in check.
            for &m in &legal {
                let undo = make(&mut board, m);
                assert!(!board.in_check(color), "{m} left {color:?} in check");
                unmake(&mut board, m, undo);
            }

            let r = splitmix64(&mut seed);
            let chosen = legal[(r as usize) % legal.len()];
            make(&mut board, chosen);
            color = color.opposite();
        }
    }
}

#[test]
fn in_check_agrees_with_is_square_attacked() {
    for &fen in POSITIONS {
        let mut board = Board::new();
        board.set_fen(fen).unwrap();
        for color in [Color::White, Color::Black] {
            if let Some(king_sq) = board.king_square(color) {
                assert_eq!(
                    board.in_check(color),
                    board.is_square_attacked(king_sq, color.opposite())
                );
            }
        }
    }
}

#[test]
fn game_over_checkmate_iff_in_check_and_no_legal_moves() {
    let mut board = Board::new();
    // Scholar's mate final position.
    board
        .set_fen("r1bqkbnr/pppp1Qpp/2n5/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 1")
        .unwrap();
    let in_check = board.in_check(Color::Black);
    let no_moves = board.legal_moves(Color::Black).is_empty();
    let (over, reason) = board.game_over(Color::Black);
    assert_eq!(over && reason == zugzwang::status::GameOverReason::Checkmate, in_check && no_moves);
}

#[test]
fn position_key_equality_matches_placement_side_castling_and_en_passant() {
    use zugzwang::board::position_key;

    let mut a = Board::new();
    a.setup_initial_position();
    let mut b = Board::new();
    b.setup_initial_position();
    assert_eq!(position_key(&a, Color::White), position_key(&b, Color::White));
    assert_ne!(position_key(&a, Color::White), position_key(&a, Color::Black));

    b.castling_rights.white_queenside = false;
    assert_ne!(position_key(&a, Color::White), position_key(&b, Color::White));
}

#[test]
fn equal_position_keys_imply_equal_zobrist_hashes() {
    let mut a = Board::new();
    a.setup_initial_position();
    let mut b = Board::new();
    b.setup_initial_position();
    assert_eq!(zugzwang::board::position_key(&a, Color::White), zugzwang::board::position_key(&b, Color::White));
    assert_eq!(hash::hash(&a, Color::White), hash::hash(&b, Color::White));
}
