//! Move ordering: TT move first, then captures by MVV-LVA, then
//! promotions, then killer moves, then history. Assigns each move a
//! single sort key rather than running several partitioning passes.

use crate::board::{Board, PieceKind};
use crate::moves::movegen::is_capture;
use crate::moves::types::Move;

const TT_MOVE_RANK: i32 = i32::MIN;
const CAPTURE_BASE: i32 = -3_000_000;
const PROMOTION_BASE: i32 = -2_000_000;
const KILLER1_RANK: i32 = -1_000_001;
const KILLER2_RANK: i32 = -1_000_000;

fn attacker_value(board: &Board, mv: Move) -> i32 {
    board
        .piece_at(mv.from)
        .map(|p| p.kind.value())
        .unwrap_or(0)
}

fn captured_value(board: &Board, mv: Move) -> i32 {
    if let Some(p) = board.piece_at(mv.to) {
        return p.kind.value();
    }
    if is_capture(board, mv) {
        return PieceKind::Pawn.value();
    }
    0
}

/// "Captured value minus attacker value", more negative sorts earlier
/// since the rank function below sorts ascending.
fn mvv_lva_rank(board: &Board, mv: Move) -> i32 {
    CAPTURE_BASE - (captured_value(board, mv) - attacker_value(board, mv))
}

/// Assigns each move a sort key (lower sorts earlier) matching the
/// priority order above, then stable-sorts `moves` in place so moves
/// tied at the same priority keep their generation order.
pub fn order_moves(
    moves: &mut [Move],
    board: &Board,
    hash_move: Option<Move>,
    killers: [Option<Move>; 2],
    context: &super::context::SearchContext,
) {
    moves.sort_by_cached_key(|&mv| {
        if Some(mv) == hash_move {
            return TT_MOVE_RANK;
        }
        if is_capture(board, mv) {
            return mvv_lva_rank(board, mv);
        }
        if mv.promotion.is_some() {
            return PROMOTION_BASE;
        }
        if Some(mv) == killers[0] {
            return KILLER1_RANK;
        }
        if Some(mv) == killers[1] {
            return KILLER2_RANK;
        }
        -context.history_score(mv)
    });
}
