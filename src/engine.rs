//! The public entry point: owns the transposition table across
//! invocations, runs iterative deepening, and hands back a single move.

use std::time::Duration;

use crate::board::{Board, Color};
use crate::moves::types::Move;
use crate::search::context::SearchContext;
use crate::search::tt::TranspositionTable;
use crate::search::{self, SearchLimits};

/// Default transposition table budget in megabytes.
const DEFAULT_TT_SIZE_MB: usize = 64;

/// An engine instance: a transposition table plus the fixed depth budget
/// every `best_move` call searches to (subject to an optional deadline).
/// Constructing a new `Engine` yields a fresh TT; a single `Engine`
/// reuses its TT across calls to `best_move`.
pub struct Engine {
    tt: TranspositionTable,
    max_depth: u8,
    jitter: Option<(u64, i32)>,
}

impl Engine {
    /// Constructs an engine with a fresh transposition table.
    pub fn new(max_depth: u8) -> Self {
        Engine {
            tt: TranspositionTable::new(DEFAULT_TT_SIZE_MB),
            max_depth: max_depth.max(1),
            jitter: None,
        }
    }

    /// Enables a seeded evaluation jitter of `amplitude` centipawns for
    /// weaker, less deterministic play. Off by default.
    pub fn with_jitter(mut self, seed: u64, amplitude: i32) -> Self {
        self.jitter = Some((seed, amplitude));
        self
    }

    /// Returns the best move found for `side_to_move` within `time_limit`
    /// (or unbounded, subject to `max_depth`), or `None` if `board` has no
    /// legal move for that side.
    pub fn best_move(
        &mut self,
        board: &mut Board,
        side_to_move: Color,
        time_limit: Option<Duration>,
    ) -> Option<Move> {
        let limits = SearchLimits::new(self.max_depth, time_limit);
        let mut ctx = match self.jitter {
            Some((seed, amplitude)) => SearchContext::with_jitter(seed, amplitude),
            None => SearchContext::new(),
        };

        let result = search::iterative_deepening(board, side_to_move, limits, &mut self.tt, &mut ctx);

        tracing::info!(
            depth = result.depth_completed,
            score = result.score,
            nodes = result.nodes,
            best = ?result.best_move.map(|m| m.to_uci()),
            "engine: best_move"
        );

        result.best_move
    }

    pub fn clear_tt(&mut self) {
        self.tt.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_a_legal_move_from_the_initial_position() {
        let mut b = Board::new();
        b.setup_initial_position();
        let mut engine = Engine::new(3);
        let mv = engine.best_move(&mut b, Color::White, None);
        assert!(mv.is_some());
        let mut check = b.clone();
        assert!(check.legal_moves(Color::White).contains(&mv.unwrap()));
    }

    #[test]
    fn returns_none_when_the_position_is_checkmate() {
        let mut b = Board::new();
        // Fool's mate: White has no legal moves and is checkmated.
        b.set_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
            .unwrap();
        let (over, reason) = b.game_over(Color::White);
        assert!(over);
        assert_eq!(reason, crate::status::GameOverReason::Checkmate);

        let mut engine = Engine::new(2);
        let mv = engine.best_move(&mut b, Color::White, None);
        assert_eq!(mv, None);
    }

    #[test]
    fn reusing_an_engine_keeps_the_transposition_table_across_calls() {
        let mut b = Board::new();
        b.setup_initial_position();
        let mut engine = Engine::new(2);
        let first = engine.best_move(&mut b, Color::White, None);
        let second = engine.best_move(&mut b, Color::White, None);
        assert_eq!(first, second);
    }
}
