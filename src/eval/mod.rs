//! Static position evaluator. Stateless: a pure function of `Board`, no
//! search state, no mutation. One function per scoring component —
//! material, piece-square placement, center control, pawn structure,
//! king safety — summed at the end.

mod tables;

use crate::board::{Board, Color, PieceKind};

/// Raw "points" per component, converted to centipawns before each
/// component's weight applies.
const CENTER_CENTRAL_CP: i32 = 100;
const CENTER_EXTENDED_CP: i32 = 50;
const PAWN_SUPPORT_CP: i32 = 100;
const CHECK_CP: i32 = 100;

const MATERIAL_WEIGHT: f64 = 1.0;
const CENTER_WEIGHT: f64 = 0.5;
const PAWN_STRUCTURE_WEIGHT: f64 = 0.3;
const PIECE_SQUARE_WEIGHT: f64 = 0.1;
const CHECK_WEIGHT: f64 = 0.01;

/// Central four squares score 1.0 raw point, the twelve squares ringing
/// them score 0.5.
fn center_value(row: u8, col: u8) -> i32 {
    match (row, col) {
        (3, 3) | (3, 4) | (4, 3) | (4, 4) => CENTER_CENTRAL_CP,
        (2, 2) | (2, 3) | (2, 4) | (2, 5) | (3, 2) | (3, 5) | (4, 2) | (4, 5) | (5, 2) | (5, 3)
        | (5, 4) | (5, 5) => CENTER_EXTENDED_CP,
        _ => 0,
    }
}

fn material(board: &Board) -> i32 {
    let mut score = 0;
    for (_, piece) in board.pieces() {
        let value = piece.kind.value();
        score += match piece.color {
            Color::Black => value,
            Color::White => -value,
        };
    }
    score
}

fn center_control(board: &Board) -> i32 {
    let mut score = 0;
    for (square, piece) in board.pieces() {
        let value = center_value(square.row, square.col);
        score += match piece.color {
            Color::Black => value,
            Color::White => -value,
        };
    }
    score
}

/// A pawn is "supported" if a friendly pawn sits one rank behind it on
/// an adjacent file — White looks one row down, Black one row up, since
/// row 0 is White's back rank.
fn pawn_structure(board: &Board) -> i32 {
    let mut score = 0;
    for (square, piece) in board.pieces() {
        if piece.kind != PieceKind::Pawn {
            continue;
        }
        let behind_row: i8 = match piece.color {
            Color::White => square.row as i8 - 1,
            Color::Black => square.row as i8 + 1,
        };
        if !(0..8).contains(&behind_row) {
            continue;
        }
        for d_col in [-1i8, 1i8] {
            let col = square.col as i8 + d_col;
            if !(0..8).contains(&col) {
                continue;
            }
            let neighbor_square = crate::square::Square::new(behind_row as u8, col as u8);
            if let Some(neighbor) = board.piece_at(neighbor_square) {
                if neighbor.kind == PieceKind::Pawn && neighbor.color == piece.color {
                    score += match piece.color {
                        Color::Black => PAWN_SUPPORT_CP,
                        Color::White => -PAWN_SUPPORT_CP,
                    };
                }
            }
        }
    }
    score
}

fn table_for(kind: PieceKind) -> &'static tables::Table {
    match kind {
        PieceKind::Pawn => &tables::PAWN,
        PieceKind::Knight => &tables::KNIGHT,
        PieceKind::Bishop => &tables::BISHOP,
        PieceKind::Rook => &tables::ROOK,
        PieceKind::Queen => &tables::QUEEN,
        PieceKind::King => &tables::KING,
    }
}

/// White reads its table mirrored vertically (row 0 of the table is the
/// back rank, so White's row `r` reads table row `7 - r`); Black reads
/// the table directly.
fn piece_square(board: &Board) -> i32 {
    let mut score = 0;
    for (square, piece) in board.pieces() {
        let table = table_for(piece.kind);
        let value = match piece.color {
            Color::White => table[7 - square.row as usize][square.col as usize],
            Color::Black => table[square.row as usize][square.col as usize],
        };
        score += match piece.color {
            Color::Black => value,
            Color::White => -value,
        };
    }
    score
}

fn check_bonus(board: &Board) -> i32 {
    let white_in_check = board.in_check(Color::White);
    let black_in_check = board.in_check(Color::Black);
    let mut score = 0;
    if white_in_check {
        score += CHECK_CP;
    }
    if black_in_check {
        score -= CHECK_CP;
    }
    score
}

/// Stateless scalar evaluation of `board` from a fixed reference:
/// positive favors Black. Centipawn units throughout, no further
/// division.
pub fn evaluate(board: &Board) -> i32 {
    let total = material(board) as f64 * MATERIAL_WEIGHT
        + center_control(board) as f64 * CENTER_WEIGHT
        + pawn_structure(board) as f64 * PAWN_STRUCTURE_WEIGHT
        + piece_square(board) as f64 * PIECE_SQUARE_WEIGHT
        + check_bonus(board) as f64 * CHECK_WEIGHT;
    total.round() as i32
}

/// `evaluate(board)` negated for White, so that positive always means
/// "good for `side`".
pub fn evaluate_from_perspective(board: &Board, side: Color) -> i32 {
    match side {
        Color::Black => evaluate(board),
        Color::White => -evaluate(board),
    }
}
