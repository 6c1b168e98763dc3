//! Pseudo-legal enumeration and the king-safety legality filter.

use crate::board::{Board, Color, PieceKind};

use super::execute;
use super::types::Move;
use crate::piece_rules;

const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

fn promotion_rank(color: Color) -> u8 {
    match color {
        Color::White => 7,
        Color::Black => 0,
    }
}

/// Fills in the UCI boundary encoding's optional promotion letter: a pawn
/// move landing on the back rank with no promotion kind specified means
/// Queen, matching the default `moves::execute::make` applies. Leaves
/// every other move untouched.
pub(crate) fn with_default_promotion(board: &Board, mv: Move) -> Move {
    if mv.promotion.is_none() {
        if let Some(piece) = board.piece_at(mv.from) {
            if piece.kind == PieceKind::Pawn && mv.to.row == promotion_rank(piece.color) {
                return Move::new(mv.from, mv.to, Some(PieceKind::Queen));
            }
        }
    }
    mv
}

/// All pseudo-legal moves for `color`: piece rules' candidate squares,
/// expanded into four promotion variants wherever a pawn move lands on
/// the last rank. Ignores whether the mover's own king would be left in
/// check.
pub fn pseudo_legal_moves(board: &Board, color: Color) -> Vec<Move> {
    let mut moves = Vec::with_capacity(48);
    for (from, piece) in board.pieces() {
        if piece.color != color {
            continue;
        }
        for to in piece_rules::pseudo_moves(board, piece, from) {
            if piece.kind == PieceKind::Pawn && to.row == promotion_rank(color) {
                for &promotion in &PROMOTION_KINDS {
                    moves.push(Move::new(from, to, Some(promotion)));
                }
            } else {
                moves.push(Move::quiet(from, to));
            }
        }
    }
    moves
}

/// Pseudo-legal moves filtered to those that do not leave `color`'s own
/// king attacked, via a real make/unmake round trip per candidate.
/// Deterministic given identical board state.
pub fn legal_moves(board: &mut Board, color: Color) -> Vec<Move> {
    let candidates = pseudo_legal_moves(board, color);
    let mut legal = Vec::with_capacity(candidates.len());
    for mv in candidates {
        let undo = execute::make(board, mv);
        let leaves_king_in_check = board.in_check(color);
        execute::unmake(board, mv, undo);
        if !leaves_king_in_check {
            legal.push(mv);
        }
    }
    legal
}

/// Captures only, including en passant — used by quiescence search (spec
/// §4.6).
pub fn legal_captures(board: &mut Board, color: Color) -> Vec<Move> {
    legal_moves(board, color)
        .into_iter()
        .filter(|mv| is_capture(board, *mv))
        .collect()
}

/// True iff `mv`, played from the current board state, captures a piece
/// (including en passant).
pub fn is_capture(board: &Board, mv: Move) -> bool {
    if board.piece_at(mv.to).is_some() {
        return true;
    }
    match board.piece_at(mv.from) {
        Some(p) if p.kind == PieceKind::Pawn => board.en_passant_target == Some(mv.to),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::square::Square;

    #[test]
    fn initial_position_has_twenty_legal_moves() {
        let mut b = Board::new();
        b.setup_initial_position();
        assert_eq!(legal_moves(&mut b, Color::White).len(), 20);
    }

    #[test]
    fn pinned_piece_may_not_move_off_the_pin_line() {
        let mut b = Board::new();
        b.set_fen("4k3/8/8/8/8/4r3/4R3/4K3 w - - 0 1").unwrap();
        let moves = legal_moves(&mut b, Color::White);
        assert!(!moves
            .iter()
            .any(|mv| mv.from == Square::new(1, 4) && mv.to == Square::new(1, 3)));
    }

    #[test]
    fn legal_captures_only_returns_captures() {
        let mut b = Board::new();
        b.set_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
        let caps = legal_captures(&mut b, Color::White);
        assert!(caps.iter().all(|mv| is_capture(&b, *mv)));
        assert!(caps
            .iter()
            .any(|mv| mv.from == Square::new(4, 4) && mv.to == Square::new(5, 3)));
    }
}
