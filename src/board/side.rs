//! The two sides of a game.
//!
//! Red is the engine's side at the integer-buffer boundary (cell value 1),
//! Yellow the opponent's (cell value -1).

use serde::{Deserialize, Serialize};

/// A player colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Side {
    Red = 0,
    Yellow = 1,
}

/// Both sides, indexable by `Side as usize`.
pub const ALL_SIDES: [Side; 2] = [Side::Red, Side::Yellow];

impl Side {
    /// Returns the other side.
    #[inline]
    pub const fn opponent(self) -> Side {
        match self {
            Side::Red => Side::Yellow,
            Side::Yellow => Side::Red,
        }
    }

    /// Returns the cell value used by the integer buffer encoding.
    pub const fn buffer_value(self) -> i32 {
        match self {
            Side::Red => 1,
            Side::Yellow => -1,
        }
    }

    /// Parses a side from its buffer value. Zero (empty) is not a side.
    pub fn from_buffer_value(v: i32) -> Option<Side> {
        match v {
            1 => Some(Side::Red),
            -1 => Some(Side::Yellow),
            _ => None,
        }
    }

    /// Returns the single-character notation used for pieces.
    pub const fn piece_char(self) -> char {
        match self {
            Side::Red => 'x',
            Side::Yellow => 'o',
        }
    }

    /// Parses a side from its piece character.
    pub fn from_piece_char(c: char) -> Option<Side> {
        match c {
            'x' => Some(Side::Red),
            'o' => Some(Side::Yellow),
            _ => None,
        }
    }

    /// Returns the single-character notation for the side to move.
    pub const fn turn_char(self) -> char {
        match self {
            Side::Red => 'r',
            Side::Yellow => 'y',
        }
    }

    /// Parses the side to move from its notation character.
    pub fn from_turn_char(c: char) -> Option<Side> {
        match c {
            'r' => Some(Side::Red),
            'y' => Some(Side::Yellow),
            _ => None,
        }
    }

    /// Returns the lowercase display name.
    pub const fn name(self) -> &'static str {
        match self {
            Side::Red => "red",
            Side::Yellow => "yellow",
        }
    }
}
