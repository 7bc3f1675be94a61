//! Fixed-depth search engine.
//!
//! Wraps the negamax family with a configurable depth, heuristic, and
//! algorithm. The default matches the stock game setup: depth 5, mobility
//! scoring, pessimism-aware search.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::engines::engine_trait::{Engine, EngineOutput, SearchParams};
use crate::game_state::board_state::Board;
use crate::search::board_scoring::HeuristicKind;
use crate::search::negamax::{
    alpha_beta_negamax, negamax, pessimism_aware_search, SearchResult, INFINITY,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchAlgorithm {
    Negamax,
    AlphaBeta,
    #[default]
    PessimismAware,
}

impl SearchAlgorithm {
    pub const fn name(self) -> &'static str {
        match self {
            SearchAlgorithm::Negamax => "negamax",
            SearchAlgorithm::AlphaBeta => "alphabeta",
            SearchAlgorithm::PessimismAware => "pessimism",
        }
    }
}

impl fmt::Display for SearchAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchAlgorithm {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let v = value.trim().to_ascii_lowercase();
        match v.as_str() {
            "negamax" | "plain" => Ok(SearchAlgorithm::Negamax),
            "alphabeta" | "alpha-beta" | "abnegamax" => Ok(SearchAlgorithm::AlphaBeta),
            "pessimism" | "pessimism-aware" | "power" => Ok(SearchAlgorithm::PessimismAware),
            _ => Err(format!("unknown search algorithm '{value}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub depth: u32,
    pub heuristic: HeuristicKind,
    pub algorithm: SearchAlgorithm,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            depth: 5,
            heuristic: HeuristicKind::Mobility,
            algorithm: SearchAlgorithm::PessimismAware,
        }
    }
}

pub struct SearchEngine {
    config: EngineConfig,
}

impl SearchEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    fn search(&self, board: &Board, depth: u32) -> Result<SearchResult, String> {
        let player = board.active_player();
        let heuristic = &self.config.heuristic;
        let result = match self.config.algorithm {
            SearchAlgorithm::Negamax => negamax(board, depth, player, heuristic),
            SearchAlgorithm::AlphaBeta => {
                alpha_beta_negamax(board, depth, player, -INFINITY, INFINITY, heuristic)
            }
            SearchAlgorithm::PessimismAware => {
                pessimism_aware_search(board, depth, player, -INFINITY, INFINITY, heuristic)
            }
        };
        result.map_err(|e| e.to_string())
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine for SearchEngine {
    fn name(&self) -> &str {
        "Isolation Search"
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), String> {
        if name.eq_ignore_ascii_case("Depth") {
            self.config.depth = value
                .trim()
                .parse::<u32>()
                .map_err(|_| format!("invalid Depth value '{value}'"))?;
            return Ok(());
        }
        if name.eq_ignore_ascii_case("Heuristic") {
            self.config.heuristic = value.parse()?;
            return Ok(());
        }
        if name.eq_ignore_ascii_case("Algorithm") {
            self.config.algorithm = value.parse()?;
            return Ok(());
        }
        Err(format!("unknown option '{name}'"))
    }

    fn choose_move(
        &mut self,
        board: &Board,
        params: &SearchParams,
    ) -> Result<EngineOutput, String> {
        // Depth zero would only score the root and never pick a move.
        let depth = params.depth.unwrap_or(self.config.depth).max(1);
        let result = self.search(board, depth)?;

        let mut out = EngineOutput {
            best_move: result.best_move,
            score: Some(result.best_score),
            info_lines: Vec::new(),
        };
        if out.best_move.is_none() {
            out.best_move = board.legal_moves().first().copied();
        }

        debug!(
            player = ?board.active_player(),
            best_move = ?out.best_move,
            score = result.best_score,
            depth = result.reached_depth,
            nodes = result.nodes,
            "search finished"
        );

        out.info_lines.push(format!(
            "info depth {} score {} nodes {} cutoffs {}",
            result.reached_depth, result.best_score, result.nodes, result.cutoffs
        ));
        out.info_lines.push(format!(
            "info string search_engine algorithm {} heuristic {} requested_depth {}",
            self.config.algorithm, self.config.heuristic, depth
        ));

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::{EngineConfig, SearchAlgorithm, SearchEngine};
    use crate::engines::engine_trait::{Engine, SearchParams};
    use crate::game_state::board_state::Board;
    use crate::game_state::isolation_types::Coord;
    use crate::search::board_scoring::{HeuristicKind, MAX_SCORE};

    #[test]
    fn search_engine_honors_depth_override() {
        let board = Board::new(3, 3).expect("board");
        let mut engine = SearchEngine::default();
        let params = SearchParams { depth: Some(1) };

        let out = engine
            .choose_move(&board, &params)
            .expect("engine should choose a move");
        let joined = out.info_lines.join("\n");

        assert!(joined.contains("info depth 1"), "expected depth-1 search info");
        assert!(joined.contains("requested_depth 1"));
        assert!(out.best_move.is_some());
    }

    #[test]
    fn every_algorithm_finds_the_trapping_move() {
        let mut board = Board::new(1, 4).expect("board");
        board.make_move(0, 0).expect("p1");
        board.make_move(3, 0).expect("p2");

        for algorithm in [
            SearchAlgorithm::Negamax,
            SearchAlgorithm::AlphaBeta,
            SearchAlgorithm::PessimismAware,
        ] {
            let mut engine = SearchEngine::new(EngineConfig {
                depth: 3,
                heuristic: HeuristicKind::Flee,
                algorithm,
            });
            let out = engine
                .choose_move(&board, &SearchParams::default())
                .expect("engine should choose a move");
            assert_eq!(out.best_move, Some(Coord::new(2, 0)), "{algorithm}");
            assert_eq!(out.score, Some(MAX_SCORE));
        }
    }

    #[test]
    fn decided_board_yields_no_move() {
        let mut board = Board::new(1, 2).expect("board");
        board.make_move(0, 0).expect("p1");
        board.make_move(1, 0).expect("p2");

        let mut engine = SearchEngine::default();
        let out = engine
            .choose_move(&board, &SearchParams::default())
            .expect("engine should still answer");
        assert_eq!(out.best_move, None);
        assert_eq!(out.score, Some(-MAX_SCORE));
    }

    #[test]
    fn options_update_the_configuration() {
        let mut engine = SearchEngine::default();
        engine.set_option("Depth", "3").expect("depth option");
        engine.set_option("heuristic", "chase").expect("heuristic option");
        engine.set_option("ALGORITHM", "alphabeta").expect("algorithm option");

        assert_eq!(
            engine.config(),
            EngineConfig {
                depth: 3,
                heuristic: HeuristicKind::Chase,
                algorithm: SearchAlgorithm::AlphaBeta,
            }
        );
        assert!(engine.set_option("Depth", "deep").is_err());
        assert!(engine.set_option("Hash", "64").is_err());
    }

    #[test]
    fn algorithm_names_round_trip() {
        assert_eq!("power".parse::<SearchAlgorithm>(), Ok(SearchAlgorithm::PessimismAware));
        for algorithm in [
            SearchAlgorithm::Negamax,
            SearchAlgorithm::AlphaBeta,
            SearchAlgorithm::PessimismAware,
        ] {
            assert_eq!(algorithm.to_string().parse::<SearchAlgorithm>(), Ok(algorithm));
        }
    }
}
