//! Queen-style ray move generation for Isolation.
//!
//! A placed player slides any distance along one of eight directions until
//! the edge of the board or the first blocked cell (which ends the ray and
//! is never jumped). An unplaced player may be put on any free cell.

use crate::game_state::{board_state::Board, isolation_types::*};

/// Unit steps as `(dx, dy)`, with `y` growing downwards:
/// NW, N, NE, E, SE, S, SW, W.
pub const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
];

/// Legal destinations for the player to move.
#[inline]
pub fn legal_moves(board: &Board) -> Vec<Move> {
    legal_moves_for(board, board.active_player())
}

/// Legal destinations for `player`, ordered by direction then distance.
pub fn legal_moves_for(board: &Board, player: Player) -> Vec<Move> {
    let Some(origin) = board.player_position(player) else {
        return board.free_cells();
    };

    let mut out = Vec::with_capacity(board.rows() + board.columns() * 3);
    for (dx, dy) in DIRECTIONS {
        walk_ray(board, origin, dx, dy, |to| {
            out.push(to);
            true
        });
    }
    out
}

/// Number of legal destinations for `player` without allocating a move list.
pub fn count_legal_moves(board: &Board, player: Player) -> usize {
    let Some(origin) = board.player_position(player) else {
        return board.cells().iter().filter(|c| c.is_free()).count();
    };

    let mut count = 0;
    for (dx, dy) in DIRECTIONS {
        walk_ray(board, origin, dx, dy, |_| {
            count += 1;
            true
        });
    }
    count
}

/// Whether `player` has at least one legal destination.
pub fn has_legal_move(board: &Board, player: Player) -> bool {
    let Some(origin) = board.player_position(player) else {
        return board.cells().iter().any(|c| c.is_free());
    };

    // A ray with any reachable cell starts with a free neighbour.
    DIRECTIONS.iter().any(|&(dx, dy)| {
        step(board, origin, dx, dy).is_some_and(|to| !board.is_blocked(to.x, to.y))
    })
}

/// Whether `mv` is reachable for the player to move.
pub fn is_legal_move(board: &Board, mv: Move) -> bool {
    if board.is_blocked(mv.x, mv.y) {
        return false;
    }

    let Some(origin) = board.player_position(board.active_player()) else {
        return true;
    };

    let dx = direction_component(origin.x, mv.x);
    let dy = direction_component(origin.y, mv.y);
    let span_x = origin.x.abs_diff(mv.x);
    let span_y = origin.y.abs_diff(mv.y);
    let on_ray = (dx, dy) != (0, 0) && (span_x == 0 || span_y == 0 || span_x == span_y);
    if !on_ray {
        return false;
    }

    let mut reached = false;
    walk_ray(board, origin, dx, dy, |to| {
        reached = to == mv;
        !reached
    });
    reached
}

#[inline]
fn direction_component(from: usize, to: usize) -> isize {
    match to.cmp(&from) {
        std::cmp::Ordering::Less => -1,
        std::cmp::Ordering::Equal => 0,
        std::cmp::Ordering::Greater => 1,
    }
}

#[inline]
fn step(board: &Board, from: Coord, dx: isize, dy: isize) -> Option<Coord> {
    let x = from.x.checked_add_signed(dx)?;
    let y = from.y.checked_add_signed(dy)?;
    board.in_bounds(x, y).then_some(Coord::new(x, y))
}

/// Visit every free cell along one ray until blocked, off-board, or `visit` returns false.
#[inline]
fn walk_ray<F: FnMut(Coord) -> bool>(
    board: &Board,
    origin: Coord,
    dx: isize,
    dy: isize,
    mut visit: F,
) {
    let mut at = origin;
    while let Some(next) = step(board, at, dx, dy) {
        if board.is_blocked(next.x, next.y) {
            break;
        }
        if !visit(next) {
            break;
        }
        at = next;
    }
}
