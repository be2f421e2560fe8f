//! Isolation board: the reference `GameState` implementation.
//!
//! Two players share a rectangular grid. Each player's first move places it on
//! any blank square; afterwards it moves according to the board's
//! `MovementRule`. Every occupied square stays blocked for the rest of the
//! game, and the active player loses when it has no legal move.

use crate::errors::BoardError;
use crate::game_state::game_state::GameState;
use crate::game_state::game_types::{Move, MovementRule, PlayerId};

pub const DEFAULT_BOARD_SIZE: i32 = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsolationBoard {
    width: i32,
    height: i32,
    blocked: Vec<bool>,
    locations: [Option<Move>; 2],
    active: PlayerId,
    move_count: usize,
    rule: MovementRule,
}

impl Default for IsolationBoard {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_SIZE,
            height: DEFAULT_BOARD_SIZE,
            blocked: vec![false; (DEFAULT_BOARD_SIZE * DEFAULT_BOARD_SIZE) as usize],
            locations: [None, None],
            active: PlayerId::Player1,
            move_count: 0,
            rule: MovementRule::Knight,
        }
    }
}

impl IsolationBoard {
    pub fn new(width: i32, height: i32, rule: MovementRule) -> Result<Self, BoardError> {
        if width < 1 || height < 1 {
            return Err(BoardError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            blocked: vec![false; (width * height) as usize],
            rule,
            ..Self::default()
        })
    }

    /// Rebuild a board from raw parts. Used by the text parser; the caller is
    /// responsible for `blocked` covering both player squares.
    pub(crate) fn from_parts(
        width: i32,
        height: i32,
        blocked: Vec<bool>,
        locations: [Option<Move>; 2],
        rule: MovementRule,
    ) -> Result<Self, BoardError> {
        if width < 1 || height < 1 || blocked.len() != (width * height) as usize {
            return Err(BoardError::InvalidDimensions { width, height });
        }
        let move_count = blocked.iter().filter(|b| **b).count();
        let active = if move_count % 2 == 0 {
            PlayerId::Player1
        } else {
            PlayerId::Player2
        };
        Ok(Self {
            width,
            height,
            blocked,
            locations,
            active,
            move_count,
            rule,
        })
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn rule(&self) -> MovementRule {
        self.rule
    }

    #[inline]
    pub fn in_bounds(&self, mv: Move) -> bool {
        (0..self.height).contains(&mv.row) && (0..self.width).contains(&mv.col)
    }

    #[inline]
    fn index(&self, mv: Move) -> usize {
        (mv.row * self.width + mv.col) as usize
    }

    #[inline]
    pub fn is_blank(&self, mv: Move) -> bool {
        self.in_bounds(mv) && !self.blocked[self.index(mv)]
    }

    /// Apply a legal move for the active player in place.
    pub fn apply_move(&mut self, mv: Move) -> Result<(), BoardError> {
        if !self.active_legal_moves().contains(&mv) {
            if !self.in_bounds(mv) {
                return Err(BoardError::OutOfBounds(mv));
            }
            return Err(BoardError::IllegalMove(mv));
        }
        self.occupy(mv)
    }

    fn occupy(&mut self, mv: Move) -> Result<(), BoardError> {
        if !self.in_bounds(mv) {
            return Err(BoardError::OutOfBounds(mv));
        }
        let idx = self.index(mv);
        if self.blocked[idx] {
            return Err(BoardError::Occupied(mv));
        }
        self.blocked[idx] = true;
        self.locations[self.active.index()] = Some(mv);
        self.active = self.active.opposite();
        self.move_count += 1;
        Ok(())
    }
}

impl GameState for IsolationBoard {
    #[inline]
    fn active_player(&self) -> PlayerId {
        self.active
    }

    fn legal_moves(&self, player: PlayerId) -> Vec<Move> {
        match self.locations[player.index()] {
            None => self.blank_spaces(),
            Some(from) => self
                .rule
                .offsets()
                .iter()
                .map(|&(dr, dc)| from.offset(dr, dc))
                .filter(|&mv| self.is_blank(mv))
                .collect(),
        }
    }

    /// The active player occupies `mv`, which must be a blank in-bounds
    /// square. Reachability from the player's current square is not checked.
    fn forecast(&self, mv: Move) -> Result<Self, BoardError> {
        let mut next = self.clone();
        next.occupy(mv)?;
        Ok(next)
    }

    fn is_winner(&self, player: PlayerId) -> bool {
        player != self.active && self.active_legal_moves().is_empty()
    }

    fn is_loser(&self, player: PlayerId) -> bool {
        player == self.active && self.active_legal_moves().is_empty()
    }

    #[inline]
    fn player_location(&self, player: PlayerId) -> Option<Move> {
        self.locations[player.index()]
    }

    fn blank_spaces(&self) -> Vec<Move> {
        let mut out = Vec::with_capacity(self.blocked.len() - self.move_count);
        for row in 0..self.height {
            for col in 0..self.width {
                let mv = Move::new(row, col);
                if !self.blocked[self.index(mv)] {
                    out.push(mv);
                }
            }
        }
        out
    }

    #[inline]
    fn ply_count(&self) -> usize {
        self.move_count
    }

    #[inline]
    fn dimensions(&self) -> (i32, i32) {
        (self.height, self.width)
    }
}
