//! Rule variants.
//!
//! All three variants share the grid, alignment and gravity primitives and
//! differ in which moves are legal and what a drop earns. The search only
//! talks to the rules through this enum.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Move, Position, Side};
use crate::eval::{evaluate, EvalWeights};
use crate::movegen::legal_moves;
use crate::resolve::{apply, outcome, Outcome};

/// The active rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Drops only.
    #[default]
    Classic,
    /// A drop that forms a line of three lets the mover destroy one
    /// opposing piece in the same turn.
    #[serde(alias = "three_for_one")]
    ThreeForOne,
    /// Lines of three bank a destroy charge; a charge can be spent on a
    /// later turn instead of dropping.
    Stock,
}

/// All variants in selector order.
pub const ALL_VARIANTS: [Variant; 3] = [Variant::Classic, Variant::ThreeForOne, Variant::Stock];

impl Variant {
    /// Numeric selector used at the buffer boundary.
    pub const fn id(self) -> i32 {
        match self {
            Variant::Classic => 0,
            Variant::ThreeForOne => 1,
            Variant::Stock => 2,
        }
    }

    /// Parses a numeric selector. Unknown ids are not mapped to a default.
    pub fn from_id(id: i32) -> Option<Variant> {
        match id {
            0 => Some(Variant::Classic),
            1 => Some(Variant::ThreeForOne),
            2 => Some(Variant::Stock),
            _ => None,
        }
    }

    /// Lowercase protocol name.
    pub const fn name(self) -> &'static str {
        match self {
            Variant::Classic => "classic",
            Variant::ThreeForOne => "threeforone",
            Variant::Stock => "stock",
        }
    }

    /// Parses a protocol name or numeric selector.
    pub fn from_name(s: &str) -> Option<Variant> {
        match s.to_ascii_lowercase().as_str() {
            "classic" | "0" => Some(Variant::Classic),
            "threeforone" | "three_for_one" | "3for1" | "1" => Some(Variant::ThreeForOne),
            "stock" | "2" => Some(Variant::Stock),
            _ => None,
        }
    }

    /// True if the variant carries per-side stock counters.
    pub const fn uses_stock(self) -> bool {
        matches!(self, Variant::Stock)
    }

    /// Legal moves for the side to move, drops in center-out order first.
    pub fn generate_moves(self, position: &Position) -> Vec<Move> {
        legal_moves(position, self)
    }

    /// Successor of `position` after `mv`. `mv` must be legal.
    pub fn apply(self, position: &Position, mv: Move) -> Position {
        apply(position, mv, self)
    }

    /// Heuristic score of `board` from `side`'s point of view.
    pub fn evaluate(self, board: &Board, side: Side, weights: &EvalWeights) -> i32 {
        evaluate(board, side, self, weights)
    }

    /// Game result, if the game is over.
    pub fn outcome(self, position: &Position) -> Option<Outcome> {
        outcome(position, self)
    }

    /// True once a side has won or no move is left.
    pub fn is_terminal(self, position: &Position) -> bool {
        self.outcome(position).is_some()
    }
}
