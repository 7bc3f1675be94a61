//! Move-tree walker used to verify and benchmark the move generator.
//!
//! Counts the positions reachable in exactly `depth` plies, plus the games
//! that are already decided along the way (those branches are not extended).

use crate::game_state::board_errors::BoardResult;
use crate::game_state::{board_state::Board, isolation_types::*};
use crate::move_generation::legal_move_generator::legal_moves;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub player1_wins: usize,
    pub player2_wins: usize,
}

impl PerftCounts {
    fn record_win(&mut self, winner: Player) {
        match winner {
            Player::One => self.player1_wins += 1,
            Player::Two => self.player2_wins += 1,
        }
    }

    #[inline]
    pub fn decided_games(&self) -> usize {
        self.player1_wins + self.player2_wins
    }
}

pub fn perft(board: &Board, depth: u32) -> BoardResult<PerftCounts> {
    let mut counts = PerftCounts::default();
    perft_recurse(board, depth, &mut counts)?;
    Ok(counts)
}

fn perft_recurse(board: &Board, depth: u32, counts: &mut PerftCounts) -> BoardResult<()> {
    let winner = board.winner();

    if depth == 0 {
        counts.nodes += 1;
        if let Some(player) = winner {
            counts.record_win(player);
        }
        return Ok(());
    }

    if let Some(player) = winner {
        counts.record_win(player);
        return Ok(());
    }

    for mv in legal_moves(board) {
        let child = board.make_move_copy(mv.x, mv.y)?;
        perft_recurse(&child, depth - 1, counts)?;
    }

    Ok(())
}
