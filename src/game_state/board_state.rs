//! Core Isolation board state representation.
//!
//! `Board` is the central model for the engine. It stores a flat row-major
//! cell grid, whose turn it is, and where each player currently stands.
//! It is a plain value type: `Clone` is a full independent copy, which the
//! search relies on to branch over candidate moves without touching the parent.

use rand::Rng;

use crate::game_state::board_errors::{BoardError, BoardResult};
use crate::game_state::isolation_types::*;
use crate::move_generation::legal_move_generator;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    columns: usize,

    // Row-major, `x + y * columns`.
    cells: Vec<Cell>,

    active_player: Player,

    // Indexed by `Player::index`; `None` until that player's first move.
    positions: [Option<Coord>; 2],
}

impl Board {
    /// Empty board with every cell free, nobody placed, player one to move.
    pub fn new(rows: usize, columns: usize) -> BoardResult<Self> {
        if rows == 0 || columns == 0 {
            return Err(BoardError::InvalidDimensions { rows, columns });
        }

        Ok(Self {
            rows,
            columns,
            cells: vec![Cell::FREE; rows * columns],
            active_player: Player::One,
            positions: [None, None],
        })
    }

    /// Block a random number (in `[min, max]`) of randomly chosen cells.
    ///
    /// Cells are drawn with replacement, so the returned count of distinct
    /// newly blocked cells can be lower than the number drawn. Only allowed
    /// before either player has been placed.
    pub fn gen_random_blocked_cells<R: Rng + ?Sized>(
        &mut self,
        min: usize,
        max: usize,
        rng: &mut R,
    ) -> BoardResult<usize> {
        if self.positions.iter().any(Option::is_some) {
            return Err(BoardError::GameInProgress);
        }

        let low = min.min(max);
        let high = max.max(min);
        let count = if low == high {
            low
        } else {
            rng.random_range(low..=high)
        };

        let mut newly_blocked = 0;
        for _ in 0..count {
            let offset = rng.random_range(0..self.cells.len());
            if self.cells[offset].is_free() {
                newly_blocked += 1;
            }
            self.cells[offset] = Cell::WALL;
        }

        Ok(newly_blocked)
    }

    /// Permanently block `(x, y)` before play starts.
    pub fn add_wall(&mut self, x: usize, y: usize) -> BoardResult<()> {
        if self.positions.iter().any(Option::is_some) {
            return Err(BoardError::GameInProgress);
        }
        if !self.in_bounds(x, y) {
            return Err(BoardError::OutOfBounds {
                x,
                y,
                columns: self.columns,
                rows: self.rows,
            });
        }

        let offset = self.offset(x, y);
        self.cells[offset] = Cell::WALL;
        Ok(())
    }

    /// Cells blocked before play started, row by row.
    pub fn walls(&self) -> Vec<Coord> {
        let mut out = Vec::new();
        for y in 0..self.rows {
            for x in 0..self.columns {
                if self.cells[self.offset(x, y)].content() == CellContent::Wall {
                    out.push(Coord::new(x, y));
                }
            }
        }
        out
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    pub fn area(&self) -> usize {
        self.rows * self.columns
    }

    #[inline]
    pub fn active_player(&self) -> Player {
        self.active_player
    }

    #[inline]
    pub fn inactive_player(&self) -> Player {
        self.active_player.opponent()
    }

    /// Flat row-major cell sequence, for renderers.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub fn player_position(&self, player: Player) -> Option<Coord> {
        self.positions[player.index()]
    }

    #[inline]
    pub fn player1_position(&self) -> Option<Coord> {
        self.player_position(Player::One)
    }

    #[inline]
    pub fn player2_position(&self) -> Option<Coord> {
        self.player_position(Player::Two)
    }

    #[inline]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.columns && y < self.rows
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        x + y * self.columns
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        if self.in_bounds(x, y) {
            Some(self.cells[self.offset(x, y)])
        } else {
            None
        }
    }

    /// Whether `(x, y)` can never be entered again. Off-board cells count as blocked.
    #[inline]
    pub fn is_blocked(&self, x: usize, y: usize) -> bool {
        self.cell(x, y).map_or(true, Cell::is_blocked)
    }

    pub fn blocked_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_blocked()).count()
    }

    /// Every unblocked cell, row by row.
    pub fn free_cells(&self) -> Vec<Coord> {
        let mut out = Vec::with_capacity(self.cells.len());
        for y in 0..self.rows {
            for x in 0..self.columns {
                if self.cells[self.offset(x, y)].is_free() {
                    out.push(Coord::new(x, y));
                }
            }
        }
        out
    }

    /// Legal destinations for the active player.
    #[inline]
    pub fn legal_moves(&self) -> Vec<Move> {
        legal_move_generator::legal_moves(self)
    }

    /// Legal destinations for `player`, whether or not it is their turn.
    #[inline]
    pub fn legal_moves_for(&self, player: Player) -> Vec<Move> {
        legal_move_generator::legal_moves_for(self, player)
    }

    #[inline]
    pub fn is_legal_move(&self, mv: Move) -> bool {
        legal_move_generator::is_legal_move(self, mv)
    }

    /// Move the active player to `(x, y)`, block that cell, and pass the turn.
    ///
    /// Reachability is not checked here; only the blocked/bounds
    /// preconditions are, and violating them is a caller bug.
    pub fn make_move(&mut self, x: usize, y: usize) -> BoardResult<()> {
        if !self.in_bounds(x, y) {
            return Err(BoardError::OutOfBounds {
                x,
                y,
                columns: self.columns,
                rows: self.rows,
            });
        }

        let offset = self.offset(x, y);
        if self.cells[offset].is_blocked() {
            return Err(BoardError::CellBlocked { x, y });
        }

        let mover = self.active_player;
        self.positions[mover.index()] = Some(Coord::new(x, y));
        self.cells[offset] = Cell::occupied_by(mover);
        self.active_player = mover.opponent();

        Ok(())
    }

    /// Same as [`Board::make_move`] but applied to an independent copy.
    pub fn make_move_copy(&self, x: usize, y: usize) -> BoardResult<Board> {
        let mut next = self.clone();
        next.make_move(x, y)?;
        Ok(next)
    }

    /// The winner if the game is decided.
    ///
    /// The active player is always checked first: if they cannot move they
    /// lose, even when the inactive player is also stuck.
    pub fn winner(&self) -> Option<Player> {
        let active = self.active_player;
        let inactive = active.opponent();

        if !legal_move_generator::has_legal_move(self, active) {
            return Some(inactive);
        }
        if !legal_move_generator::has_legal_move(self, inactive) {
            return Some(active);
        }
        None
    }

    #[inline]
    pub fn is_game_over(&self) -> Option<Player> {
        self.winner()
    }
}
