//! Game-over resolution and the draw-by-insufficient-material rule, kept
//! separate from `Board` itself so `board` doesn't need to import move
//! generation just to answer "is the game over".

use crate::board::{Board, Color, PieceKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    Checkmate,
    Stalemate,
    Draw,
    None,
}

fn square_is_light(row: u8, col: u8) -> bool {
    (row + col) % 2 == 1
}

/// Draw when the set of non-king pieces is: empty; a single minor piece;
/// two knights (any distribution); or two bishops, one per side, both on
/// same-colored squares.
pub fn is_insufficient_material(board: &Board) -> bool {
    let non_king: Vec<(PieceKind, Color, bool)> = board
        .pieces()
        .filter(|(_, p)| p.kind != PieceKind::King)
        .map(|(sq, p)| (p.kind, p.color, square_is_light(sq.row, sq.col)))
        .collect();

    match non_king.as_slice() {
        [] => true,
        [(PieceKind::Bishop | PieceKind::Knight, _, _)] => true,
        [(PieceKind::Knight, _, _), (PieceKind::Knight, _, _)] => true,
        [(PieceKind::Bishop, c1, light1), (PieceKind::Bishop, c2, light2)] => {
            c1 != c2 && light1 == light2
        }
        _ => false,
    }
}

/// Resolves game-over status for `color_to_move`, checked in this
/// priority order: insufficient material, checkmate, stalemate,
/// fifty-move, threefold.
pub fn game_over(board: &mut Board, color_to_move: Color) -> (bool, GameOverReason) {
    if is_insufficient_material(board) {
        return (true, GameOverReason::Draw);
    }

    let legal = board.legal_moves(color_to_move);
    if legal.is_empty() {
        return if board.in_check(color_to_move) {
            (true, GameOverReason::Checkmate)
        } else {
            (true, GameOverReason::Stalemate)
        };
    }

    if board.halfmove_clock >= 100 {
        return (true, GameOverReason::Draw);
    }

    let key = crate::board::position_key(board, color_to_move);
    if board.repetition_counts.get(&key).copied().unwrap_or(0) >= 3 {
        return (true, GameOverReason::Draw);
    }

    (false, GameOverReason::None)
}
