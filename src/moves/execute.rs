//! Make / unmake: the single reversible mutation primitive every other
//! component builds on. `make` is always paired with exactly one
//! `unmake` call; neither function is part of the public interface —
//! they are engine-internal, used by `moves::movegen::legal_moves` and
//! by `search`.

use crate::board::{position_key, Board, CastlingRights, Color, Piece, PieceKind};
use crate::square::Square;

use super::types::{Move, MoveUndo};

fn castle_rook_squares(color: Color, king_to_col: u8) -> Option<(Square, Square)> {
    let rank = match color {
        Color::White => 0,
        Color::Black => 7,
    };
    match king_to_col {
        6 => Some((Square::new(rank, 7), Square::new(rank, 5))),
        2 => Some((Square::new(rank, 0), Square::new(rank, 3))),
        _ => None,
    }
}

fn clear_right_for_rook_square(rights: &mut CastlingRights, color: Color, square: Square) {
    let rank = match color {
        Color::White => 0,
        Color::Black => 7,
    };
    if square.row != rank {
        return;
    }
    match (color, square.col) {
        (Color::White, 0) => rights.white_queenside = false,
        (Color::White, 7) => rights.white_kingside = false,
        (Color::Black, 0) => rights.black_queenside = false,
        (Color::Black, 7) => rights.black_kingside = false,
        _ => {}
    }
}

/// Applies `mv` to `board` in place, returning the `MoveUndo` that
/// reverses it. Panics with `InvariantViolation` if `mv.from` is empty —
/// every caller is expected to only pass pseudo-legal moves
/// generated from an actual piece.
pub fn make(board: &mut Board, mv: Move) -> MoveUndo {
    let mover = board
        .piece_at(mv.from)
        .unwrap_or_else(|| panic!("InvariantViolation: make() called with no piece on {}", mv.from));
    let mover_color = mover.color;
    let opponent_color = mover_color.opposite();

    let prior_castling_rights = board.castling_rights;
    let prior_en_passant_target = board.en_passant_target;
    let prior_halfmove_clock = board.halfmove_clock;

    let is_en_passant = mover.kind == PieceKind::Pawn
        && board.en_passant_target == Some(mv.to)
        && board.piece_at(mv.to).is_none();

    let captured = if is_en_passant {
        let captured_square = Square::new(mv.from.row, mv.to.col);
        let captured_piece = board.piece_at(captured_square);
        board.set(captured_square, None);
        captured_piece.map(|p| (p.kind, captured_square))
    } else {
        board.piece_at(mv.to).map(|p| (p.kind, mv.to))
    };

    board.set(mv.from, None);

    let last_rank = match mover_color {
        Color::White => 7,
        Color::Black => 0,
    };
    let was_promotion = mover.kind == PieceKind::Pawn && mv.to.row == last_rank;
    if was_promotion {
        let promoted_kind = mv.promotion.unwrap_or(PieceKind::Queen);
        board.set(mv.to, Some(Piece::new(promoted_kind, mover_color)));
    } else {
        board.set(mv.to, Some(Piece::new(mover.kind, mover_color)));
    }

    let is_castling = mover.kind == PieceKind::King && mv.is_castling_candidate();
    let rook_relocation = if is_castling {
        castle_rook_squares(mover_color, mv.to.col).map(|(rook_from, rook_to)| {
            let rook = board.piece_at(rook_from);
            board.set(rook_from, None);
            board.set(rook_to, rook);
            (rook_from, rook_to)
        })
    } else {
        None
    };

    let mut new_rights = prior_castling_rights;
    if mover.kind == PieceKind::King {
        new_rights.clear_color(mover_color);
    } else if mover.kind == PieceKind::Rook {
        clear_right_for_rook_square(&mut new_rights, mover_color, mv.from);
    }
    if let Some((captured_kind, captured_square)) = captured {
        if captured_kind == PieceKind::Rook {
            clear_right_for_rook_square(&mut new_rights, opponent_color, captured_square);
        }
    }
    board.castling_rights = new_rights;

    board.en_passant_target =
        if mover.kind == PieceKind::Pawn && (mv.to.row as i8 - mv.from.row as i8).abs() == 2 {
            let skipped_row = (mv.to.row + mv.from.row) / 2;
            Some(Square::new(skipped_row, mv.from.col))
        } else {
            None
        };

    board.halfmove_clock = if captured.is_some() || mover.kind == PieceKind::Pawn {
        0
    } else {
        prior_halfmove_clock + 1
    };

    let next_side = opponent_color;
    let repetition_key = position_key(board, next_side);
    *board.repetition_counts.entry(repetition_key.clone()).or_insert(0) += 1;

    MoveUndo {
        moved_piece: mover.kind,
        mover_color,
        captured,
        prior_castling_rights,
        prior_en_passant_target,
        prior_halfmove_clock,
        rook_relocation,
        was_promotion,
        repetition_key,
    }
}

/// Reverses exactly the mutation `make(board, mv)` performed, given the
/// `MoveUndo` it returned. After `unmake`, `board` must be identical to
/// its pre-`make` state.
pub fn unmake(board: &mut Board, mv: Move, undo: MoveUndo) {
    if let Some(count) = board.repetition_counts.get_mut(&undo.repetition_key) {
        *count -= 1;
        if *count == 0 {
            board.repetition_counts.remove(&undo.repetition_key);
        }
    }

    board.halfmove_clock = undo.prior_halfmove_clock;
    board.en_passant_target = undo.prior_en_passant_target;
    board.castling_rights = undo.prior_castling_rights;

    if let Some((rook_from, rook_to)) = undo.rook_relocation {
        let rook = board.piece_at(rook_to);
        board.set(rook_to, None);
        board.set(rook_from, rook);
    }

    board.set(mv.to, None);
    board.set(
        mv.from,
        Some(Piece::new(undo.moved_piece, undo.mover_color)),
    );

    if let Some((captured_kind, captured_square)) = undo.captured {
        board.set(
            captured_square,
            Some(Piece::new(captured_kind, undo.mover_color.opposite())),
        );
    }
}
