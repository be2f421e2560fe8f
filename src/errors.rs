use std::error::Error;
use std::fmt;

use crate::game_state::game_types::Move;

/// Errors raised by the concrete board when a move or board string is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// The coordinate lies outside the grid.
    OutOfBounds(Move),
    /// The target square has already been visited or is occupied.
    Occupied(Move),
    /// The move is not reachable for the active player.
    IllegalMove(Move),
    /// The grid must be at least one square in each direction.
    InvalidDimensions { width: i32, height: i32 },
    /// A textual board could not be parsed.
    InvalidBoardString(String),
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::OutOfBounds(mv) => write!(f, "move {mv} is outside the board"),
            BoardError::Occupied(mv) => write!(f, "square {mv} is not blank"),
            BoardError::IllegalMove(mv) => write!(f, "move {mv} is not legal for the active player"),
            BoardError::InvalidDimensions { width, height } => {
                write!(f, "invalid board dimensions {width}x{height}")
            }
            BoardError::InvalidBoardString(msg) => write!(f, "invalid board string: {msg}"),
        }
    }
}

impl Error for BoardError {}

pub type SearchOutcome<T> = Result<T, SearchError>;

/// Failure modes of a search call.
///
/// `Timeout` is a control-flow signal rather than a defect: the iterative
/// deepening driver catches it and falls back to its last completed depth.
/// Every other variant is a hard failure and propagates to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    Timeout,
    Evaluation(String),
    InvalidState(String),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::Timeout => write!(f, "search aborted: time budget exhausted"),
            SearchError::Evaluation(msg) => write!(f, "evaluation failed: {msg}"),
            SearchError::InvalidState(msg) => write!(f, "invalid game state: {msg}"),
        }
    }
}

impl Error for SearchError {}

impl From<BoardError> for SearchError {
    fn from(err: BoardError) -> Self {
        SearchError::InvalidState(err.to_string())
    }
}
