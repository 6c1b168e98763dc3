//! Pseudo-legal move generation per piece kind.
//!
//! Every function here maps `(piece kind, color, square, board snapshot)`
//! to a set of candidate destination squares, *ignoring* whether the
//! mover's own king would be left in check afterwards — that filter is
//! `crate::moves::movegen::legal_moves`'s job, not this module's. King
//! move generation is the one case that reaches back up into the board,
//! to test whether castling transit squares are attacked.

use arrayvec::ArrayVec;

use crate::board::{Board, Color, Piece, PieceKind};
use crate::square::Square;

/// Max candidate destinations any one piece can have pseudo-legally (a
/// queen on an open board, plus slack): used to size the no-alloc buffer.
pub const MAX_PSEUDO_MOVES: usize = 28;

pub type SquareList = ArrayVec<Square, MAX_PSEUDO_MOVES>;

/// Dispatches to the per-kind generator for `piece` sitting on `from`.
pub fn pseudo_moves(board: &Board, piece: Piece, from: Square) -> SquareList {
    match piece.kind {
        PieceKind::Pawn => pawn_pseudo_moves(board, piece.color, from),
        PieceKind::Knight => knight_pseudo_moves(board, piece.color, from),
        PieceKind::Bishop => slide(board, piece.color, from, &DIAGONAL_DIRECTIONS),
        PieceKind::Rook => slide(board, piece.color, from, &ORTHOGONAL_DIRECTIONS),
        PieceKind::Queen => slide(board, piece.color, from, &QUEEN_DIRECTIONS),
        PieceKind::King => king_pseudo_moves(board, piece.color, from),
    }
}

fn destination_is_playable(board: &Board, color: Color, to: Square) -> bool {
    match board.piece_at(to) {
        None => true,
        Some(occupant) => occupant.color != color,
    }
}

/// Promotion is not encoded here: the caller expands any pawn move landing
/// on the last rank into the four promotion variants.
fn pawn_pseudo_moves(board: &Board, color: Color, from: Square) -> SquareList {
    let mut moves = SquareList::new();
    let forward: i8 = match color {
        Color::White => 1,
        Color::Black => -1,
    };
    let start_rank: u8 = match color {
        Color::White => 1,
        Color::Black => 6,
    };

    if let Some(one_step) = from.try_offset(forward, 0) {
        if board.piece_at(one_step).is_none() {
            moves.push(one_step);

            if from.row == start_rank {
                if let Some(two_step) = from.try_offset(forward * 2, 0) {
                    if board.piece_at(two_step).is_none() {
                        moves.push(two_step);
                    }
                }
            }
        }
    }

    for d_col in [-1i8, 1i8] {
        let Some(target) = from.try_offset(forward, d_col) else {
            continue;
        };
        match board.piece_at(target) {
            Some(occupant) if occupant.color != color => moves.push(target),
            None if board.en_passant_target == Some(target) => moves.push(target),
            _ => {}
        }
    }

    moves
}

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

fn knight_pseudo_moves(board: &Board, color: Color, from: Square) -> SquareList {
    let mut moves = SquareList::new();
    for (dr, dc) in KNIGHT_OFFSETS {
        if let Some(to) = from.try_offset(dr, dc) {
            if destination_is_playable(board, color, to) {
                moves.push(to);
            }
        }
    }
    moves
}

const DIAGONAL_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ORTHOGONAL_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
];

/// Slides along each direction until off-board, blocked by a friendly
/// piece (stop without including it), or blocked by an enemy piece
/// (include the capture square, then stop).
fn slide(board: &Board, color: Color, from: Square, directions: &[(i8, i8)]) -> SquareList {
    let mut moves = SquareList::new();
    for &(dr, dc) in directions {
        let mut cur = from;
        while let Some(next) = cur.try_offset(dr, dc) {
            cur = next;
            match board.piece_at(cur) {
                None => moves.push(cur),
                Some(occupant) => {
                    if occupant.color != color {
                        moves.push(cur);
                    }
                    break;
                }
            }
        }
    }
    moves
}

const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

fn king_pseudo_moves(board: &Board, color: Color, from: Square) -> SquareList {
    let mut moves = SquareList::new();
    for (dr, dc) in KING_OFFSETS {
        if let Some(to) = from.try_offset(dr, dc) {
            if destination_is_playable(board, color, to) {
                moves.push(to);
            }
        }
    }

    if board.in_check(color) {
        return moves;
    }

    let rank = from.row;
    let opponent = color.opposite();

    if board.castling_rights.kingside(color) {
        let f = Square::new(rank, 5);
        let g = Square::new(rank, 6);
        if board.piece_at(f).is_none()
            && board.piece_at(g).is_none()
            && !board.is_square_attacked(from, opponent)
            && !board.is_square_attacked(f, opponent)
            && !board.is_square_attacked(g, opponent)
        {
            moves.push(g);
        }
    }

    if board.castling_rights.queenside(color) {
        let d = Square::new(rank, 3);
        let c = Square::new(rank, 2);
        let b = Square::new(rank, 1);
        if board.piece_at(d).is_none()
            && board.piece_at(c).is_none()
            && board.piece_at(b).is_none()
            && !board.is_square_attacked(from, opponent)
            && !board.is_square_attacked(d, opponent)
            && !board.is_square_attacked(c, opponent)
        {
            moves.push(c);
        }
    }

    moves
}
