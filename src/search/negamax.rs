//! Fixed-depth negamax search, with and without alpha-beta pruning, plus the
//! pessimism-aware wrapper that backs off to shallower depths when the full
//! depth only sees a forced loss.
//!
//! Every node evaluates from the perspective of a fixed `player`: leaves are
//! scored as `sign * heuristic`, where `sign` is `+1` when `player` is to
//! move and `-1` otherwise, and parents negate what their children return.
//! Branches are explored on cloned boards, so the caller's board is never
//! touched.

use tracing::debug;

use crate::game_state::board_errors::BoardResult;
use crate::game_state::{board_state::Board, isolation_types::*};
use crate::search::board_scoring::{Heuristic, MAX_SCORE};

/// Bound for the widest search window. Negating it never overflows.
pub const INFINITY: i32 = i32::MAX;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Positions visited, root included.
    pub nodes: u64,
    /// Times a node stopped exploring siblings because `alpha >= beta`.
    pub cutoffs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best_score: i32,
    pub best_move: Option<Move>,
    /// Depth whose answer is reported.
    pub reached_depth: u32,
    pub nodes: u64,
    pub cutoffs: u64,
}

impl SearchResult {
    fn from_search(
        (best_score, best_move): (i32, Option<Move>),
        depth: u32,
        stats: SearchStats,
    ) -> Self {
        Self {
            best_score,
            best_move,
            reached_depth: depth,
            nodes: stats.nodes,
            cutoffs: stats.cutoffs,
        }
    }

    /// Whether the score is a proven loss for the searching player.
    #[inline]
    pub fn is_proven_loss(&self) -> bool {
        self.best_score <= -MAX_SCORE
    }

    #[inline]
    pub fn is_proven_win(&self) -> bool {
        self.best_score >= MAX_SCORE
    }
}

#[inline]
fn player_sign(board: &Board, player: Player) -> i32 {
    if board.active_player() == player {
        1
    } else {
        -1
    }
}

/// Narrow an arbitrary window to `[-INFINITY, INFINITY]` so it can be negated.
#[inline]
fn clamp_window(alpha: i32, beta: i32) -> (i32, i32) {
    (alpha.max(-INFINITY), beta.max(-INFINITY))
}

/// Plain negamax to `depth` plies for `player`.
pub fn negamax<H: Heuristic + ?Sized>(
    board: &Board,
    depth: u32,
    player: Player,
    heuristic: &H,
) -> BoardResult<SearchResult> {
    let mut stats = SearchStats::default();
    let scored = negamax_with_stats(board, depth, player, heuristic, &mut stats)?;
    Ok(SearchResult::from_search(scored, depth, stats))
}

pub fn negamax_with_stats<H: Heuristic + ?Sized>(
    board: &Board,
    depth: u32,
    player: Player,
    heuristic: &H,
    stats: &mut SearchStats,
) -> BoardResult<(i32, Option<Move>)> {
    stats.nodes += 1;

    let sign = player_sign(board, player);
    let winner = board.winner();
    if winner.is_some() || depth == 0 {
        return Ok((sign * heuristic.score(board, winner, player), None));
    }

    let mut best_move = None;
    let mut best_score = -INFINITY;

    for mv in board.legal_moves() {
        let child = board.make_move_copy(mv.x, mv.y)?;
        let (child_score, _) = negamax_with_stats(&child, depth - 1, player, heuristic, stats)?;
        let score = -child_score;

        if score > best_score {
            best_score = score;
            best_move = Some(mv);
        }
    }

    Ok((best_score, best_move))
}

/// Negamax with alpha-beta pruning inside the `(alpha, beta)` window.
///
/// Pass `(-INFINITY, INFINITY)` for a full-width search.
pub fn alpha_beta_negamax<H: Heuristic + ?Sized>(
    board: &Board,
    depth: u32,
    player: Player,
    alpha: i32,
    beta: i32,
    heuristic: &H,
) -> BoardResult<SearchResult> {
    let mut stats = SearchStats::default();
    let scored =
        alpha_beta_negamax_with_stats(board, depth, player, alpha, beta, heuristic, &mut stats)?;
    Ok(SearchResult::from_search(scored, depth, stats))
}

pub fn alpha_beta_negamax_with_stats<H: Heuristic + ?Sized>(
    board: &Board,
    depth: u32,
    player: Player,
    alpha: i32,
    beta: i32,
    heuristic: &H,
    stats: &mut SearchStats,
) -> BoardResult<(i32, Option<Move>)> {
    let (mut alpha, beta) = clamp_window(alpha, beta);
    stats.nodes += 1;

    let sign = player_sign(board, player);
    let winner = board.winner();
    if winner.is_some() || depth == 0 {
        return Ok((sign * heuristic.score(board, winner, player), None));
    }

    let mut best_move = None;
    let mut best_score = -INFINITY;

    for mv in board.legal_moves() {
        let child = board.make_move_copy(mv.x, mv.y)?;
        let (child_score, _) = alpha_beta_negamax_with_stats(
            &child,
            depth - 1,
            player,
            -beta,
            -alpha,
            heuristic,
            stats,
        )?;
        let score = -child_score;

        if score > best_score {
            best_score = score;
            best_move = Some(mv);
        }

        alpha = alpha.max(score);
        if alpha >= beta {
            stats.cutoffs += 1;
            break;
        }
    }

    Ok((best_score, best_move))
}

/// Alpha-beta search that refuses to give up early.
///
/// When the search at `depth` proves a loss, the same window is retried at
/// `depth - 1` down to `1`, and the first shallower answer that is not a
/// proven loss wins. If every depth loses, the `depth` answer is returned.
/// Node and cutoff counts cover every depth tried.
pub fn pessimism_aware_search<H: Heuristic + ?Sized>(
    board: &Board,
    depth: u32,
    player: Player,
    alpha: i32,
    beta: i32,
    heuristic: &H,
) -> BoardResult<SearchResult> {
    let mut stats = SearchStats::default();
    let primary =
        alpha_beta_negamax_with_stats(board, depth, player, alpha, beta, heuristic, &mut stats)?;

    if primary.0 > -MAX_SCORE {
        return Ok(SearchResult::from_search(primary, depth, stats));
    }

    for shallower in (1..depth).rev() {
        let retry = alpha_beta_negamax_with_stats(
            board, shallower, player, alpha, beta, heuristic, &mut stats,
        )?;
        if retry.0 > -MAX_SCORE {
            debug!(
                requested_depth = depth,
                used_depth = shallower,
                score = retry.0,
                "forced loss at full depth, playing shallower move"
            );
            return Ok(SearchResult::from_search(retry, shallower, stats));
        }
    }

    debug!(requested_depth = depth, ?player, "forced loss at every depth tried");
    Ok(SearchResult::from_search(primary, depth, stats))
}
