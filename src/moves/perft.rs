//! Perft: a pure generate-make-unmake traversal used to validate move
//! generation against reference node counts. Reports node counts and a
//! per-root-move divide; no capture/castle/promotion/check breakdown.

use tracing::{debug, instrument};

use crate::board::{Board, Color};

use super::execute;
use super::movegen;

/// Total leaf count of the legal-move tree rooted at `board`, `depth`
/// plies deep, for `color` to move first.
#[instrument(skip(board))]
pub fn perft(board: &mut Board, color: Color, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = movegen::legal_moves(board, color);
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for mv in moves {
        let undo = execute::make(board, mv);
        nodes += perft(board, color.opposite(), depth - 1);
        execute::unmake(board, mv, undo);
    }
    nodes
}

/// Per-root-move leaf counts, the classic "divide" debugging aid: prints
/// each root move with its subtree node count and returns the total.
pub fn perft_divide(board: &mut Board, color: Color, depth: u32) -> u64 {
    if depth == 0 {
        println!("Total: 1");
        return 1;
    }

    let moves = movegen::legal_moves(board, color);
    let mut total = 0u64;
    for mv in moves {
        let undo = execute::make(board, mv);
        let nodes = perft(board, color.opposite(), depth - 1);
        execute::unmake(board, mv, undo);
        debug!(%mv, nodes, "divide: root move");
        println!("{mv}: {nodes}");
        total += nodes;
    }
    println!("Total: {total}");
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_position_matches_standard_perft_counts() {
        let mut b = Board::new();
        b.setup_initial_position();
        assert_eq!(perft(&mut b, Color::White, 1), 20);
        assert_eq!(perft(&mut b, Color::White, 2), 400);
        assert_eq!(perft(&mut b, Color::White, 3), 8_902);
        assert_eq!(perft(&mut b, Color::White, 4), 197_281);
    }

    #[test]
    fn perft_leaves_the_board_unchanged() {
        let mut b = Board::new();
        b.setup_initial_position();
        let before = b.clone();
        perft(&mut b, Color::White, 3);
        assert_eq!(b, before);
    }

    #[test]
    fn divide_totals_match_the_plain_count() {
        let mut b = Board::new();
        b.setup_initial_position();
        let plain = perft(&mut b, Color::White, 3);
        let divided = perft_divide(&mut b, Color::White, 3);
        assert_eq!(plain, divided);
    }

    #[test]
    fn divide_at_depth_zero_returns_one_without_underflowing() {
        let mut b = Board::new();
        b.setup_initial_position();
        assert_eq!(perft_divide(&mut b, Color::White, 0), 1);
    }

    #[test]
    fn divide_at_depth_one_matches_the_root_move_count() {
        let mut b = Board::new();
        b.setup_initial_position();
        assert_eq!(perft_divide(&mut b, Color::White, 1), 20);
    }
}
