//! Negamax search: iterative deepening, alpha-beta, TT probing,
//! quiescence, and move ordering with killers/history.
//!
//! Deliberately stops at the eight node-function steps below: no
//! null-move pruning, late-move reductions, futility pruning, or
//! aspiration windows. `best_move` must stay deterministic given
//! identical TT/killer/history state, and those extra heuristics would
//! add tuning surface without changing what the algorithm is required
//! to guarantee.

pub mod context;
pub mod ordering;
pub mod time;
pub mod tt;

use crate::board::{Board, Color};
use crate::eval;
use crate::hash;
use crate::moves::execute;
use crate::moves::movegen;
use crate::moves::types::Move;

use context::SearchContext;
use time::TimeManager;
use tt::{Bound, TranspositionTable};

/// Ply budget: callers asking for depths beyond this saturate rather than
/// overflow the killer table or the mate-distance encoding.
pub const MAX_PLY: usize = 128;

/// Mate score base: `MATE - ply` for a mate found at `ply`, so shallower
/// mates dominate deeper ones.
pub const MATE: i32 = 30_000;
pub const INFINITY: i32 = MATE + 1;

/// Any `|score| >= MATE_THRESHOLD` is a forced mate for classification
/// purposes.
pub const MATE_THRESHOLD: i32 = MATE - MAX_PLY as i32;

/// Safety brake on quiescence recursion: quiescence has no depth counter
/// of its own, only a "no more captures" terminator, so a pathological
/// position with an endless capture chain still bottoms out.
const MAX_QUIESCENCE_PLY: usize = MAX_PLY * 2;

#[derive(Debug, Clone, Copy)]
pub struct SearchLimits {
    pub max_depth: u8,
    pub deadline: Option<std::time::Duration>,
}

impl SearchLimits {
    pub fn new(max_depth: u8, deadline: Option<std::time::Duration>) -> Self {
        SearchLimits { max_depth: max_depth.max(1), deadline }
    }
}

#[derive(Debug, Clone)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub score: i32,
    pub depth_completed: u8,
    pub nodes: u64,
}

/// Iterative deepening driver: searches depth 1..=`limits.max_depth`,
/// keeping the best move from the last depth that ran to completion.
/// Never returns `None` for `best_move` when `color` has at least one
/// legal move.
pub fn iterative_deepening(
    board: &mut Board,
    color: Color,
    limits: SearchLimits,
    tt: &mut TranspositionTable,
    ctx: &mut SearchContext,
) -> SearchResult {
    let mut time = TimeManager::new(limits.deadline);
    let mut nodes = 0u64;

    let root_moves = board.legal_moves(color);
    if root_moves.is_empty() {
        return SearchResult { best_move: None, score: 0, depth_completed: 0, nodes };
    }

    let mut best_move = root_moves[0];
    let mut best_score = 0;
    let mut depth_completed = 0u8;

    for depth in 1..=limits.max_depth {
        let (score, timed_out) = search(
            board, depth, -INFINITY, INFINITY, color, 0, ctx, tt, &mut time, &mut nodes,
        );

        if timed_out {
            break;
        }

        depth_completed = depth;
        best_score = score;
        if let Some((Some(mv), _, _, _)) = tt.probe(hash::hash(board, color)) {
            best_move = mv;
        }

        tracing::debug!(depth, score, nodes, best = %best_move, "iterative deepening: depth completed");

        if score.abs() >= MATE_THRESHOLD {
            break;
        }
    }

    SearchResult { best_move: Some(best_move), score: best_score, depth_completed, nodes }
}

/// Negamax node function. Returns `(score, timed_out)`; when `timed_out`
/// the score is a static evaluation, not a search result, and must not be
/// trusted as an exact bound by the caller beyond propagating the early
/// return further up.
#[allow(clippy::too_many_arguments)]
fn search(
    board: &mut Board,
    depth: u8,
    mut alpha: i32,
    beta: i32,
    color: Color,
    ply: usize,
    ctx: &mut SearchContext,
    tt: &mut TranspositionTable,
    time: &mut TimeManager,
    nodes: &mut u64,
) -> (i32, bool) {
    *nodes += 1;

    // Step 1: deadline poll.
    if time.poll() {
        return (eval::evaluate_from_perspective(board, color), true);
    }

    // Step 2: TT probe.
    let key = hash::hash(board, color);
    let mut hash_move = None;
    if let Some((tt_move, tt_score, tt_depth, tt_bound)) = tt.probe(key) {
        hash_move = tt_move;
        if tt_depth >= depth {
            match tt_bound {
                Bound::Exact => return (tt_score, false),
                Bound::LowerBound if tt_score >= beta => return (tt_score, false),
                Bound::UpperBound if tt_score <= alpha => return (tt_score, false),
                _ => {}
            }
        }
    }

    // Step 3: quiescence at the horizon.
    if depth == 0 {
        return quiescence(board, alpha, beta, color, ply, ctx, time, nodes);
    }

    // Step 4: mate/stalemate terminal nodes.
    let mut moves = board.legal_moves(color);
    if moves.is_empty() {
        let score = if board.in_check(color) {
            -(MATE - ply as i32)
        } else {
            0
        };
        return (score, false);
    }

    // Step 5: order moves.
    let killers = ctx.killers_at(ply);
    ordering::order_moves(&mut moves, board, hash_move, killers, ctx);

    let original_alpha = alpha;
    let mut best_move: Option<Move> = None;

    for mv in moves {
        // Step 6: make, recurse with swapped/negated window, unmake.
        let undo = execute::make(board, mv);
        let (child_score, timed_out) = search(
            board,
            depth - 1,
            -beta,
            -alpha,
            color.opposite(),
            ply + 1,
            ctx,
            tt,
            time,
            nodes,
        );
        execute::unmake(board, mv, undo);

        if timed_out {
            return (eval::evaluate_from_perspective(board, color), true);
        }

        let score = -child_score;

        // Step 7: raise alpha, track candidate best, cut off on beta.
        if score > alpha {
            alpha = score;
            best_move = Some(mv);
        }
        if alpha >= beta {
            if !movegen::is_capture(board, mv) {
                ctx.record_killer(ply, mv);
                ctx.record_history(mv, depth);
            }
            break;
        }
    }

    // Step 8: classify and store.
    let bound = if alpha <= original_alpha {
        Bound::UpperBound
    } else if alpha >= beta {
        Bound::LowerBound
    } else {
        Bound::Exact
    };
    tt.store(key, best_move, alpha, depth, bound);

    (alpha, false)
}

/// Quiescence search over captures only.
fn quiescence(
    board: &mut Board,
    mut alpha: i32,
    beta: i32,
    color: Color,
    ply: usize,
    ctx: &mut SearchContext,
    time: &mut TimeManager,
    nodes: &mut u64,
) -> (i32, bool) {
    *nodes += 1;

    if time.poll() {
        return (eval::evaluate_from_perspective(board, color), true);
    }

    let stand_pat = ctx.apply_jitter(eval::evaluate_from_perspective(board, color));
    if stand_pat >= beta {
        return (beta, false);
    }
    if stand_pat > alpha {
        alpha = stand_pat;
    }

    if ply >= MAX_QUIESCENCE_PLY {
        return (alpha, false);
    }

    let mut captures = movegen::legal_captures(board, color);
    if captures.is_empty() {
        return (alpha, false);
    }

    ordering::order_moves(&mut captures, board, None, [None, None], ctx);

    for mv in captures {
        let undo = execute::make(board, mv);
        let (child_score, timed_out) =
            quiescence(board, -beta, -alpha, color.opposite(), ply + 1, ctx, time, nodes);
        execute::unmake(board, mv, undo);

        if timed_out {
            return (eval::evaluate_from_perspective(board, color), true);
        }

        let score = -child_score;
        if score >= beta {
            return (beta, false);
        }
        if score > alpha {
            alpha = score;
        }
    }

    (alpha, false)
}
