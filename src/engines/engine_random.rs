//! Random-move engine.
//!
//! Selects uniformly from legal moves; used as a weak opponent, for
//! diagnostics, and for integration testing of the match harness.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::{Engine, EngineOutput, SearchParams};
use crate::game_state::board_state::Board;

pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "Isolation Random"
    }

    fn choose_move(
        &mut self,
        board: &Board,
        params: &SearchParams,
    ) -> Result<EngineOutput, String> {
        let legal_moves = board.legal_moves();

        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "info string random_engine legal_moves {}",
            legal_moves.len()
        ));

        if let Some(depth) = params.depth {
            out.info_lines.push(format!(
                "info string random_engine requested_depth {}",
                depth
            ));
        }

        if legal_moves.is_empty() {
            return Ok(out);
        }

        let picked = legal_moves
            .as_slice()
            .choose(&mut self.rng)
            .ok_or("failed to choose a random move")?;

        out.best_move = Some(*picked);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::RandomEngine;
    use crate::engines::engine_trait::{Engine, SearchParams};
    use crate::game_state::board_state::Board;

    #[test]
    fn random_engine_only_picks_legal_moves() {
        let mut board = Board::new(4, 4).expect("board");
        board.make_move(1, 1).expect("p1");
        board.make_move(2, 3).expect("p2");

        let mut engine = RandomEngine::with_seed(11);
        for _ in 0..20 {
            let out = engine
                .choose_move(&board, &SearchParams::default())
                .expect("engine should choose");
            let mv = out.best_move.expect("moves exist");
            assert!(board.legal_moves().contains(&mv));
            assert_eq!(out.score, None);
        }
    }

    #[test]
    fn random_engine_is_reproducible_from_seed() {
        let board = Board::new(5, 5).expect("board");
        let mut a = RandomEngine::with_seed(3);
        let mut b = RandomEngine::with_seed(3);
        for _ in 0..5 {
            let pa = a.choose_move(&board, &SearchParams::default()).expect("a");
            let pb = b.choose_move(&board, &SearchParams::default()).expect("b");
            assert_eq!(pa.best_move, pb.best_move);
        }
    }

    #[test]
    fn random_engine_reports_no_move_when_stuck() {
        let mut board = Board::new(1, 2).expect("board");
        board.make_move(0, 0).expect("p1");
        board.make_move(1, 0).expect("p2");

        let out = RandomEngine::with_seed(0)
            .choose_move(&board, &SearchParams::default())
            .expect("engine should answer");
        assert_eq!(out.best_move, None);
    }
}
