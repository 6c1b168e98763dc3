//! Canonical position key used for repetition detection.
//!
//! Distinct from the Zobrist hash in `crate::hash`: this is a string built
//! to be trivially equal for equivalent positions, not a fast 64-bit
//! digest meant for a transposition table.

use std::fmt::Write as _;

use super::{Board, Color, PieceKind};

fn piece_char(kind: PieceKind, color: Color) -> char {
    let c = match kind {
        PieceKind::Pawn => 'p',
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        PieceKind::Queen => 'q',
        PieceKind::King => 'k',
    };
    match color {
        Color::White => c.to_ascii_uppercase(),
        Color::Black => c,
    }
}

/// Builds the canonical key: piece placement rank-by-rank with empty runs
/// collapsed, then side to move, castling rights in a fixed order, then
/// the en-passant square or a sentinel.
pub fn position_key(board: &Board, side_to_move: Color) -> String {
    let mut key = String::with_capacity(72);

    for row in (0..8u8).rev() {
        let mut empty_run = 0u8;
        for col in 0..8u8 {
            let sq = crate::square::Square::new(row, col);
            match board.piece_at(sq) {
                Some(p) => {
                    if empty_run > 0 {
                        let _ = write!(key, "{empty_run}");
                        empty_run = 0;
                    }
                    key.push(piece_char(p.kind, p.color));
                }
                None => empty_run += 1,
            }
        }
        if empty_run > 0 {
            let _ = write!(key, "{empty_run}");
        }
        key.push('/');
    }

    key.push(match side_to_move {
        Color::White => 'w',
        Color::Black => 'b',
    });

    key.push('-');
    let rights = &board.castling_rights;
    if rights.white_kingside {
        key.push('K');
    }
    if rights.white_queenside {
        key.push('Q');
    }
    if rights.black_kingside {
        key.push('k');
    }
    if rights.black_queenside {
        key.push('q');
    }
    if !(rights.white_kingside
        || rights.white_queenside
        || rights.black_kingside
        || rights.black_queenside)
    {
        key.push('-');
    }

    key.push('-');
    match board.en_passant_target {
        Some(sq) => {
            let file = (b'a' + sq.col) as char;
            key.push(file);
        }
        None => key.push('-'),
    }

    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    #[test]
    fn identical_positions_share_a_key() {
        let mut a = Board::new();
        a.setup_initial_position();
        let mut b = Board::new();
        b.setup_initial_position();
        assert_eq!(position_key(&a, Color::White), position_key(&b, Color::White));
    }

    #[test]
    fn side_to_move_changes_the_key() {
        let mut b = Board::new();
        b.setup_initial_position();
        assert_ne!(
            position_key(&b, Color::White),
            position_key(&b, Color::Black)
        );
    }

    #[test]
    fn castling_rights_change_the_key() {
        let mut b = Board::new();
        b.setup_initial_position();
        let before = position_key(&b, Color::White);
        b.castling_rights.white_kingside = false;
        let after = position_key(&b, Color::White);
        assert_ne!(before, after);
    }
}
