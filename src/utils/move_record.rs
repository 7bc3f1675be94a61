//! In-memory move history and step-wise replay.
//!
//! A `GameRecord` holds the board dimensions, the pre-game walls, and one
//! entry per ply. `Replay` walks a record on a fresh board in either
//! direction; stepping back rebuilds the board from the start instead of
//! trying to undo a move.

use chrono::{DateTime, Utc};

use crate::game_state::board_errors::BoardResult;
use crate::game_state::board_state::Board;
use crate::game_state::isolation_types::{Coord, Move, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordEntry {
    pub player: Player,
    /// `None` when the move did not come from a scored search.
    pub score: Option<i32>,
    pub mv: Move,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub rows: usize,
    pub columns: usize,
    pub walls: Vec<Coord>,
    pub started_at: DateTime<Utc>,
    pub entries: Vec<RecordEntry>,
}

impl GameRecord {
    /// Start a record for `board`, which must not have been played on yet.
    pub fn new(board: &Board) -> Self {
        Self {
            rows: board.rows(),
            columns: board.columns(),
            walls: board.walls(),
            started_at: Utc::now(),
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, player: Player, score: Option<i32>, mv: Move) {
        self.entries.push(RecordEntry { player, score, mv });
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Name for a saved session, `REPLAY<unix-seconds>`.
    pub fn label(&self) -> String {
        format!("REPLAY{}", self.started_at.timestamp())
    }

    /// The board as it stood before the first recorded ply.
    pub fn initial_board(&self) -> BoardResult<Board> {
        let mut board = Board::new(self.rows, self.columns)?;
        for wall in &self.walls {
            board.add_wall(wall.x, wall.y)?;
        }
        Ok(board)
    }

    /// Board after the first `plies` entries have been applied.
    pub fn board_after(&self, plies: usize) -> BoardResult<Board> {
        let mut board = self.initial_board()?;
        for entry in self.entries.iter().take(plies) {
            board.make_move(entry.mv.x, entry.mv.y)?;
        }
        Ok(board)
    }
}

pub struct Replay<'a> {
    record: &'a GameRecord,
    board: Board,
    cursor: usize,
}

impl<'a> Replay<'a> {
    pub fn new(record: &'a GameRecord) -> BoardResult<Self> {
        Ok(Self {
            record,
            board: record.initial_board()?,
            cursor: 0,
        })
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Number of entries applied so far.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Apply the next entry. Returns `None` once the record is exhausted.
    pub fn step_forward(&mut self) -> BoardResult<Option<&'a RecordEntry>> {
        let Some(entry) = self.record.entries.get(self.cursor) else {
            return Ok(None);
        };

        self.board.make_move(entry.mv.x, entry.mv.y)?;
        self.cursor += 1;
        Ok(Some(entry))
    }

    /// Take back the last applied entry. Returns `None` at the start.
    pub fn step_back(&mut self) -> BoardResult<Option<&'a RecordEntry>> {
        if self.cursor == 0 {
            return Ok(None);
        }

        let target = self.cursor - 1;
        self.board = self.record.board_after(target)?;
        self.cursor = target;
        Ok(self.record.entries.get(target))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{GameRecord, Replay};
    use crate::game_state::board_errors::BoardError;
    use crate::game_state::board_state::Board;
    use crate::game_state::isolation_types::{Coord, Player};

    fn recorded_game() -> GameRecord {
        let mut board = Board::new(4, 4).expect("board");
        board.add_wall(3, 3).expect("wall");
        let mut record = GameRecord::new(&board);
        for (score, x, y) in [(Some(3), 0, 0), (None, 2, 1), (Some(-1), 0, 2)] {
            let player = board.active_player();
            board.make_move(x, y).expect("scripted move");
            record.push(player, score, Coord::new(x, y));
        }
        record
    }

    #[test]
    fn record_keeps_dimensions_walls_and_entries() {
        let record = recorded_game();
        assert_eq!((record.rows, record.columns), (4, 4));
        assert_eq!(record.walls, vec![Coord::new(3, 3)]);
        assert_eq!(record.len(), 3);
        assert_eq!(record.entries[0].player, Player::One);
        assert_eq!(record.entries[1].player, Player::Two);
        assert_eq!(record.entries[1].score, None);
    }

    #[test]
    fn label_uses_unix_seconds_of_start() {
        let mut record = recorded_game();
        record.started_at = Utc
            .timestamp_opt(1_526_000_000, 0)
            .single()
            .expect("valid timestamp");
        assert_eq!(record.label(), "REPLAY1526000000");
    }

    #[test]
    fn replay_steps_forward_to_the_recorded_final_board() {
        let record = recorded_game();
        let mut replay = Replay::new(&record).expect("replay");

        let mut seen = 0;
        while let Some(entry) = replay.step_forward().expect("recorded moves are valid") {
            assert_eq!(entry, &record.entries[seen]);
            seen += 1;
        }

        assert_eq!(seen, 3);
        assert_eq!(replay.cursor(), 3);
        assert_eq!(replay.board(), &record.board_after(3).expect("board"));
        assert_eq!(replay.board().player1_position(), Some(Coord::new(0, 2)));
    }

    #[test]
    fn replay_steps_back_by_rebuilding() {
        let record = recorded_game();
        let mut replay = Replay::new(&record).expect("replay");
        replay.step_forward().expect("ply 1");
        replay.step_forward().expect("ply 2");
        let after_two = replay.board().clone();
        replay.step_forward().expect("ply 3");

        let undone = replay.step_back().expect("rebuild").expect("entry");
        assert_eq!(undone.mv, Coord::new(0, 2));
        assert_eq!(replay.board(), &after_two);
        assert_eq!(replay.board().active_player(), Player::One);

        replay.step_back().expect("rebuild");
        replay.step_back().expect("rebuild");
        assert_eq!(replay.cursor(), 0);
        assert_eq!(replay.step_back().expect("at start"), None);
        assert_eq!(replay.board(), &record.initial_board().expect("board"));
    }

    #[test]
    fn corrupted_record_surfaces_board_errors() {
        let mut record = recorded_game();
        record.entries[2].mv = Coord::new(3, 3);

        let mut replay = Replay::new(&record).expect("replay");
        replay.step_forward().expect("ply 1");
        replay.step_forward().expect("ply 2");
        assert_eq!(
            replay.step_forward(),
            Err(BoardError::CellBlocked { x: 3, y: 3 })
        );
    }
}
