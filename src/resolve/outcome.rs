//! Game-over detection.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Position, Side};
use crate::movegen::has_legal_move;
use crate::rules::{is_win, Variant};

/// Final result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win(Side),
    Draw,
}

/// Returns the result of `position`, or `None` while play continues.
///
/// A destroy can drop pieces into place for both sides at once; when both
/// hold a line of four the game is drawn.
pub fn outcome(position: &Position, variant: Variant) -> Option<Outcome> {
    let red = is_win(&position.board, Side::Red);
    let yellow = is_win(&position.board, Side::Yellow);
    match (red, yellow) {
        (true, true) => Some(Outcome::Draw),
        (true, false) => Some(Outcome::Win(Side::Red)),
        (false, true) => Some(Outcome::Win(Side::Yellow)),
        (false, false) if !has_legal_move(position, variant) => Some(Outcome::Draw),
        (false, false) => None,
    }
}

/// True if `side` holds a line of four and the opponent does not.
#[inline]
pub fn wins_for(board: &Board, side: Side) -> bool {
    is_win(board, side) && !is_win(board, side.opponent())
}
