//! Terminal-oriented board renderer.
//!
//! Produces the same text layout `board_parser` reads back: `1`/`2` for the
//! players, `X` for visited squares and `.` for blanks.

use crate::game_state::game_state::GameState;
use crate::game_state::game_types::{Move, PlayerId};
use crate::game_state::isolation_board::IsolationBoard;

pub fn render_game_state(board: &IsolationBoard) -> String {
    let mut out = String::new();

    for row in 0..board.height() {
        for col in 0..board.width() {
            out.push(square_char(board, Move::new(row, col)));
            if col + 1 < board.width() {
                out.push(' ');
            }
        }
        out.push('\n');
    }

    out
}

fn square_char(board: &IsolationBoard, square: Move) -> char {
    if board.player_location(PlayerId::Player1) == Some(square) {
        '1'
    } else if board.player_location(PlayerId::Player2) == Some(square) {
        '2'
    } else if board.is_blank(square) {
        '.'
    } else {
        'X'
    }
}
