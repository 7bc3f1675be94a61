//! Engine abstraction layer used by the game loop and match harness.
//!
//! Defines common input parameters and output payloads so different engine
//! strategies can be selected at runtime behind a single trait interface.

use crate::game_state::{board_state::Board, isolation_types::Move};

#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    /// Overrides the engine's configured depth for this call.
    pub depth: Option<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub best_move: Option<Move>,
    /// `None` when the move did not come from a scored search.
    pub score: Option<i32>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn set_option(&mut self, _name: &str, _value: &str) -> Result<(), String> {
        Ok(())
    }

    fn choose_move(&mut self, board: &Board, params: &SearchParams)
        -> Result<EngineOutput, String>;
}
