//! Pluggable board evaluation interfaces and the four Isolation heuristics.
//!
//! Search remains modular by delegating position scoring to the `Heuristic`
//! trait, allowing alternate heuristics to be swapped without altering
//! search code.
//!
//! Every heuristic shares the same terminal contract: a decided game scores
//! exactly `+MAX_SCORE` for the winner and `-MAX_SCORE` otherwise, whatever
//! the depth at which it was found. Non-terminal estimates are taken from the
//! board's own active player's point of view (active minus inactive) and are
//! kept strictly inside `(-MAX_SCORE, MAX_SCORE)`.

use std::fmt;
use std::str::FromStr;

use crate::game_state::{board_state::Board, isolation_types::*};
use crate::move_generation::legal_move_generator::count_legal_moves;

pub const MAX_SCORE: i32 = 10_000;

/// Extra credit for standing exactly on the target cell (distance zero).
const ZERO_DISTANCE_BONUS: usize = 5;

pub trait Heuristic: Send + Sync {
    /// Score `board` for `player` given the already computed winner (if any).
    fn score(&self, board: &Board, winner: Option<Player>, player: Player) -> i32;
}

impl<H: Heuristic + ?Sized> Heuristic for &H {
    fn score(&self, board: &Board, winner: Option<Player>, player: Player) -> i32 {
        (**self).score(board, winner, player)
    }
}

impl<H: Heuristic + ?Sized> Heuristic for Box<H> {
    fn score(&self, board: &Board, winner: Option<Player>, player: Player) -> i32 {
        (**self).score(board, winner, player)
    }
}

#[inline]
pub fn terminal_score(winner: Player, player: Player) -> i32 {
    if winner == player {
        MAX_SCORE
    } else {
        -MAX_SCORE
    }
}

#[inline]
fn within_heuristic_range(value: i64) -> i32 {
    let bound = i64::from(MAX_SCORE - 1);
    value.clamp(-bound, bound) as i32
}

/// `area / distance`, or `area + 5` at distance zero.
#[inline]
fn inverse_distance(area: usize, distance: usize) -> i64 {
    if distance == 0 {
        (area + ZERO_DISTANCE_BONUS) as i64
    } else {
        (area / distance) as i64
    }
}

#[inline]
fn centre(board: &Board) -> Coord {
    Coord::new(board.columns() / 2, board.rows() / 2)
}

/// Prefer standing closer to the board centre than the opponent.
#[derive(Debug, Clone, Copy, Default)]
pub struct CentralityScorer;

impl CentralityScorer {
    /// Centrality term for one side; an unplaced player contributes nothing.
    pub fn centrality(board: &Board, player: Player) -> i64 {
        match board.player_position(player) {
            Some(pos) => inverse_distance(board.area(), pos.manhattan_distance(centre(board))),
            None => 0,
        }
    }
}

impl Heuristic for CentralityScorer {
    fn score(&self, board: &Board, winner: Option<Player>, player: Player) -> i32 {
        if let Some(winner) = winner {
            return terminal_score(winner, player);
        }

        let active = Self::centrality(board, board.active_player());
        let inactive = Self::centrality(board, board.inactive_player());
        within_heuristic_range(active - inactive)
    }
}

/// Prefer having more legal moves left than the opponent.
#[derive(Debug, Clone, Copy, Default)]
pub struct MobilityScorer;

impl Heuristic for MobilityScorer {
    fn score(&self, board: &Board, winner: Option<Player>, player: Player) -> i32 {
        if let Some(winner) = winner {
            return terminal_score(winner, player);
        }

        let active = count_legal_moves(board, board.active_player()) as i64;
        let inactive = count_legal_moves(board, board.inactive_player()) as i64;
        within_heuristic_range(active - inactive)
    }
}

#[inline]
fn players_distance(board: &Board) -> Option<usize> {
    let active = board.player_position(board.active_player())?;
    let inactive = board.player_position(board.inactive_player())?;
    Some(active.manhattan_distance(inactive))
}

/// Prefer keeping far away from the opponent.
#[derive(Debug, Clone, Copy, Default)]
pub struct FleeScorer;

impl Heuristic for FleeScorer {
    fn score(&self, board: &Board, winner: Option<Player>, player: Player) -> i32 {
        if let Some(winner) = winner {
            return terminal_score(winner, player);
        }

        match players_distance(board) {
            Some(distance) => within_heuristic_range(distance as i64),
            None => 0,
        }
    }
}

/// Prefer staying close to the opponent.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChaseScorer;

impl Heuristic for ChaseScorer {
    fn score(&self, board: &Board, winner: Option<Player>, player: Player) -> i32 {
        if let Some(winner) = winner {
            return terminal_score(winner, player);
        }

        match players_distance(board) {
            Some(distance) => within_heuristic_range(inverse_distance(board.area(), distance)),
            None => 0,
        }
    }
}

/// Runtime selector over the built-in heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeuristicKind {
    Centrality,
    #[default]
    Mobility,
    Flee,
    Chase,
}

impl HeuristicKind {
    pub const ALL: [HeuristicKind; 4] = [
        HeuristicKind::Centrality,
        HeuristicKind::Mobility,
        HeuristicKind::Flee,
        HeuristicKind::Chase,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            HeuristicKind::Centrality => "centrality",
            HeuristicKind::Mobility => "mobility",
            HeuristicKind::Flee => "flee",
            HeuristicKind::Chase => "chase",
        }
    }
}

impl Heuristic for HeuristicKind {
    fn score(&self, board: &Board, winner: Option<Player>, player: Player) -> i32 {
        match self {
            HeuristicKind::Centrality => CentralityScorer.score(board, winner, player),
            HeuristicKind::Mobility => MobilityScorer.score(board, winner, player),
            HeuristicKind::Flee => FleeScorer.score(board, winner, player),
            HeuristicKind::Chase => ChaseScorer.score(board, winner, player),
        }
    }
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HeuristicKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let v = value.trim().to_ascii_lowercase();
        match v.as_str() {
            "centrality" | "centre" | "center" | "1" => Ok(HeuristicKind::Centrality),
            "mobility" | "moves" | "2" => Ok(HeuristicKind::Mobility),
            "flee" | "3" => Ok(HeuristicKind::Flee),
            "chase" | "attack" | "4" => Ok(HeuristicKind::Chase),
            _ => Err(format!("unknown heuristic '{value}'")),
        }
    }
}
