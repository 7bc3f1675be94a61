//! Core value types shared by the board model, move generation, and search.
//!
//! Cells keep "what stands/stood here" separate from "can this cell still be
//! entered", so renderers can show player trails while movement logic only
//! ever asks about the blocked flag.

/// One of the two players. Player one always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    #[inline]
    pub const fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Human facing number (1 or 2).
    #[inline]
    pub const fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

/// What occupies (or last occupied) a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellContent {
    Clear,
    /// Blocked before play started.
    Wall,
    /// A player stands here now, or stood here earlier in the game.
    Player(Player),
}

/// A single grid cell: its content plus the orthogonal "permanently blocked" flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    content: CellContent,
    blocked: bool,
}

impl Cell {
    pub const FREE: Cell = Cell {
        content: CellContent::Clear,
        blocked: false,
    };

    pub const WALL: Cell = Cell {
        content: CellContent::Wall,
        blocked: true,
    };

    #[inline]
    pub const fn occupied_by(player: Player) -> Self {
        Cell {
            content: CellContent::Player(player),
            blocked: true,
        }
    }

    #[inline]
    pub const fn content(self) -> CellContent {
        self.content
    }

    #[inline]
    pub const fn is_blocked(self) -> bool {
        self.blocked
    }

    #[inline]
    pub const fn is_free(self) -> bool {
        !self.blocked
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::FREE
    }
}

/// Grid coordinate: `x` is the column, `y` is the row, `(0, 0)` is top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    #[inline]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn manhattan_distance(self, other: Coord) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A move is just the destination; the origin is always the mover's current position.
pub type Move = Coord;
