//! Concrete game scenarios: scholar's mate, fool's mate, stalemate, en
//! passant, castling, and threefold repetition.

use zugzwang::board::{Board, Color};
use zugzwang::moves::types::Move;
use zugzwang::square::Square;
use zugzwang::status::GameOverReason;

fn mv(from: &str, to: &str) -> Move {
    Move::quiet(Square::from_algebraic(from).unwrap(), Square::from_algebraic(to).unwrap())
}

#[test]
fn scholars_mate_checkmates_black() {
    let mut board = Board::new();
    board.setup_initial_position();

    let moves = [
        ("e2", "e4"),
        ("e7", "e5"),
        ("f1", "c4"),
        ("b8", "c6"),
        ("d1", "h5"),
        ("g8", "f6"),
        ("h5", "f7"),
    ];
    for (from, to) in moves {
        assert!(board.apply(mv(from, to)), "move {from}{to} should be legal");
    }

    let (over, reason) = board.game_over(Color::Black);
    assert!(over);
    assert_eq!(reason, GameOverReason::Checkmate);
}

#[test]
fn fools_mate_checkmates_white() {
    let mut board = Board::new();
    board.setup_initial_position();

    let moves = [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")];
    for (from, to) in moves {
        assert!(board.apply(mv(from, to)), "move {from}{to} should be legal");
    }

    let (over, reason) = board.game_over(Color::White);
    assert!(over);
    assert_eq!(reason, GameOverReason::Checkmate);
}

#[test]
fn stalemate_probe() {
    let mut board = Board::new();
    // Black king a3, queen c2 deliver stalemate to the White king on a1.
    board.set_fen("8/8/8/8/8/k7/2q5/K7 w - - 0 1").unwrap();
    assert!(!board.in_check(Color::White));
    let (over, reason) = board.game_over(Color::White);
    assert!(over);
    assert_eq!(reason, GameOverReason::Stalemate);
}

#[test]
fn en_passant_capture_clears_the_target_after_the_capture() {
    let mut board = Board::new();
    board.setup_initial_position();

    for (from, to) in [("e2", "e4"), ("a7", "a6"), ("e4", "e5"), ("d7", "d5")] {
        assert!(board.apply(mv(from, to)));
    }
    assert_eq!(board.en_passant_target, Square::from_algebraic("d6"));

    let legal = board.legal_moves(Color::White);
    let capture = mv("e5", "d6");
    assert!(legal.contains(&capture));

    assert!(board.apply(capture));
    assert_eq!(board.en_passant_target, None);
    assert!(board.piece_at(Square::from_algebraic("d5").unwrap()).is_none());
}

#[test]
fn kingside_castling_is_legal_with_clear_unattacked_transit_squares() {
    let mut board = Board::new();
    board.set_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let legal = board.legal_moves(Color::White);
    assert!(legal.contains(&mv("e1", "g1")));
}

#[test]
fn castling_is_illegal_when_a_transit_square_is_attacked() {
    let mut board = Board::new();
    // Black rook on f8 covers f1, a transit square for White's kingside castle.
    board
        .set_fen("r3kr2/8/8/8/8/8/8/R3K2R w KQq - 0 1")
        .unwrap();
    let legal = board.legal_moves(Color::White);
    assert!(!legal.contains(&mv("e1", "g1")));
}

#[test]
fn apply_accepts_a_bare_promotion_move_and_defaults_it_to_queen() {
    use zugzwang::board::PieceKind;

    let mut board = Board::new();
    board.set_fen("4k3/4P3/8/8/8/8/8/4K3 w - - 0 1").unwrap();

    // "e7e8" carries no promotion letter, unlike what legal_moves() itself
    // ever enumerates for a promoting pawn move.
    let bare = Move::from_uci("e7e8").unwrap();
    assert_eq!(bare.promotion, None);
    assert!(board.apply(bare));

    let promoted = board.piece_at(Square::from_algebraic("e8").unwrap()).unwrap();
    assert_eq!(promoted.kind, PieceKind::Queen);
    assert_eq!(promoted.color, Color::White);
}

#[test]
fn threefold_repetition_is_a_draw() {
    let mut board = Board::new();
    board.setup_initial_position();

    // Each 4-ply cycle shuffles both knights out and back, restoring the
    // exact starting position with White to move. The position is seen
    // once at setup and once per completed cycle, so two cycles make
    // three occurrences total.
    let cycle = [("g1", "f3"), ("g8", "f6"), ("f3", "g1"), ("f6", "g8")];
    for (from, to) in cycle.iter().chain(cycle.iter()) {
        assert!(board.apply(mv(from, to)));
    }

    let (over, reason) = board.game_over(Color::White);
    assert!(over);
    assert_eq!(reason, GameOverReason::Draw);
}
