//! Terminal-oriented plain-text board renderer.
//!
//! Current positions show as `1` / `2`, cells a player has left as `a` / `b`,
//! pre-game walls as `#`, and free cells as `·`. Columns are labelled along
//! the top and rows down the left, both counting from zero.

use crate::game_state::{board_state::Board, isolation_types::*};

/// Render the board to a string for terminal output, row `y = 0` first.
pub fn render_board(board: &Board) -> String {
    let label_width = board.rows().saturating_sub(1).to_string().len();
    let mut out = String::new();

    out.push_str(&" ".repeat(label_width + 1));
    for x in 0..board.columns() {
        out.push(char::from(b'0' + (x % 10) as u8));
        if x + 1 < board.columns() {
            out.push(' ');
        }
    }
    out.push('\n');

    for y in 0..board.rows() {
        out.push_str(&format!("{:>width$} ", y, width = label_width));
        for x in 0..board.columns() {
            out.push(cell_symbol(board, x, y));
            if x + 1 < board.columns() {
                out.push(' ');
            }
        }
        out.push('\n');
    }

    out.push_str(&format!("to move: player {}", board.active_player().number()));
    out
}

fn cell_symbol(board: &Board, x: usize, y: usize) -> char {
    let here = Coord::new(x, y);
    for player in [Player::One, Player::Two] {
        if board.player_position(player) == Some(here) {
            return char::from(b'0' + player.number());
        }
    }

    match board.cell(x, y).map(Cell::content) {
        Some(CellContent::Player(Player::One)) => 'a',
        Some(CellContent::Player(Player::Two)) => 'b',
        Some(CellContent::Wall) => '#',
        Some(CellContent::Clear) | None => '·',
    }
}

#[cfg(test)]
mod tests {
    use super::render_board;
    use crate::game_state::board_state::Board;

    #[test]
    fn empty_board_renders_header_and_free_cells() {
        let board = Board::new(2, 3).expect("board");
        assert_eq!(
            render_board(&board),
            "  0 1 2\n0 · · ·\n1 · · ·\nto move: player 1"
        );
    }

    #[test]
    fn players_trails_and_walls_are_distinguished() {
        let mut board = Board::new(3, 3).expect("board");
        board.add_wall(2, 0).expect("wall");
        board.make_move(0, 0).expect("p1");
        board.make_move(2, 2).expect("p2");
        board.make_move(1, 1).expect("p1 moves on");

        let rendered = render_board(&board);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[1], "0 a · #");
        assert_eq!(lines[2], "1 · 1 ·");
        assert_eq!(lines[3], "2 · · 2");
        assert_eq!(lines[4], "to move: player 2");
    }

    #[test]
    fn row_labels_are_right_aligned_on_tall_boards() {
        let board = Board::new(11, 1).expect("board");
        let rendered = render_board(&board);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "   0");
        assert_eq!(lines[1], " 0 ·");
        assert_eq!(lines[11], "10 ·");
    }
}
