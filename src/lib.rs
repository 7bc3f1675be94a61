//! Crate root module declarations for the Isolation engine project.
//!
//! This file exposes all top-level subsystems (board state, move generation,
//! search, engines, and utility helpers) so binaries, tests, and benchmarks
//! can import stable module paths.

pub mod game_state {
    pub mod board_errors;
    pub mod board_state;
    pub mod isolation_types;
}

pub mod move_generation {
    pub mod legal_move_generator;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod negamax;
}

pub mod engines {
    pub mod engine_random;
    pub mod engine_search;
    pub mod engine_trait;
}

pub mod utils {
    pub mod engine_match_harness;
    pub mod move_record;
    pub mod render_board;
}
