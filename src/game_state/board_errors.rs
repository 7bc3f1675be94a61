//! Fail-fast faults raised by the board model.
//!
//! These are programming errors (bad dimensions, moving into a blocked cell)
//! rather than game conditions; callers propagate them and never correct them.

use thiserror::Error;

pub type BoardResult<T> = Result<T, BoardError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board dimensions must be positive, got {rows} rows x {columns} columns")]
    InvalidDimensions { rows: usize, columns: usize },

    #[error("cell ({x}, {y}) lies outside the {columns}x{rows} board")]
    OutOfBounds {
        x: usize,
        y: usize,
        columns: usize,
        rows: usize,
    },

    #[error("cell ({x}, {y}) is blocked")]
    CellBlocked { x: usize, y: usize },

    #[error("cells can only be pre-blocked before the first move")]
    GameInProgress,
}
