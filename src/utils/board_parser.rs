//! Text board parser, the inverse of `render_game_state`.
//!
//! Rows are separated by newlines; squares by optional whitespace. The side
//! to move is derived from the number of occupied squares.

use crate::errors::BoardError;
use crate::game_state::game_types::{Move, MovementRule};
use crate::game_state::isolation_board::IsolationBoard;

pub fn parse_board(text: &str, rule: MovementRule) -> Result<IsolationBoard, BoardError> {
    let rows: Vec<Vec<char>> = text
        .lines()
        .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
        .filter(|row| !row.is_empty())
        .collect();

    let height = rows.len();
    let width = rows.first().map(Vec::len).unwrap_or(0);
    if height == 0 || width == 0 {
        return Err(BoardError::InvalidBoardString("board is empty".to_owned()));
    }

    let mut blocked = Vec::with_capacity(width * height);
    let mut locations = [None, None];

    for (row_idx, row) in rows.iter().enumerate() {
        if row.len() != width {
            return Err(BoardError::InvalidBoardString(format!(
                "row {row_idx} has {} squares, expected {width}",
                row.len()
            )));
        }
        for (col_idx, ch) in row.iter().enumerate() {
            let square = Move::new(row_idx as i32, col_idx as i32);
            match ch {
                '.' => blocked.push(false),
                'X' | 'x' => blocked.push(true),
                '1' | '2' => {
                    let slot = if *ch == '1' { 0 } else { 1 };
                    if locations[slot].is_some() {
                        return Err(BoardError::InvalidBoardString(format!(
                            "player {ch} appears more than once"
                        )));
                    }
                    locations[slot] = Some(square);
                    blocked.push(true);
                }
                other => {
                    return Err(BoardError::InvalidBoardString(format!(
                        "unexpected character '{other}' at {square}"
                    )))
                }
            }
        }
    }

    let occupied = blocked.iter().filter(|b| **b).count();
    let consistent = match locations {
        [None, None] => occupied == 0,
        [Some(_), None] => occupied == 1,
        [Some(_), Some(_)] => occupied >= 2,
        [None, Some(_)] => false,
    };
    if !consistent {
        return Err(BoardError::InvalidBoardString(
            "player placements do not match the visited squares".to_owned(),
        ));
    }

    IsolationBoard::from_parts(width as i32, height as i32, blocked, locations, rule)
}
