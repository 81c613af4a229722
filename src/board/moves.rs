//! Move types.
//!
//! A `Move` is a single ply as the search sees it. A `Turn` is everything a
//! side does before play passes to the opponent: in ThreeForOne a drop that
//! earns the bonus is followed by a destroy from the same side, and the two
//! plies together form one turn.

/// A single ply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    /// Insert the mover's piece into the lowest open cell of `col`.
    Drop { col: usize },

    /// Remove the piece at `(row, col)` and compact the column above it.
    Destroy { row: usize, col: usize },

    /// Forfeit a pending ThreeForOne bonus when there is nothing to destroy.
    Pass,
}

impl Move {
    /// Returns true for drop moves.
    pub const fn is_drop(self) -> bool {
        matches!(self, Move::Drop { .. })
    }

    /// Returns true for destroy moves.
    pub const fn is_destroy(self) -> bool {
        matches!(self, Move::Destroy { .. })
    }
}

/// A complete turn, as returned to callers of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    /// A plain drop.
    Drop { col: usize },

    /// A ThreeForOne drop followed by its bonus destroy.
    DropDestroy {
        col: usize,
        target_row: usize,
        target_col: usize,
    },

    /// A Stock-funded destroy in place of a drop, or a bonus destroy when
    /// the turn started with the bonus already earned.
    Destroy { row: usize, col: usize },

    /// A pending bonus forfeited because the opponent has no pieces.
    Pass,
}

impl Turn {
    /// Builds a turn from its first ply and an optional bonus follow-up.
    ///
    /// Returns `None` when a destroy or pass is followed by another ply.
    pub fn from_plies(first: Move, follow_up: Option<Move>) -> Option<Turn> {
        match (first, follow_up) {
            (Move::Drop { col }, None) | (Move::Drop { col }, Some(Move::Pass)) => {
                Some(Turn::Drop { col })
            }
            (Move::Drop { col }, Some(Move::Destroy { row, col: target_col })) => {
                Some(Turn::DropDestroy {
                    col,
                    target_row: row,
                    target_col,
                })
            }
            (Move::Destroy { row, col }, None) => Some(Turn::Destroy { row, col }),
            (Move::Pass, None) => Some(Turn::Pass),
            _ => None,
        }
    }

    /// Returns the plies making up this turn, in order.
    pub fn plies(self) -> Vec<Move> {
        match self {
            Turn::Drop { col } => vec![Move::Drop { col }],
            Turn::DropDestroy {
                col,
                target_row,
                target_col,
            } => vec![
                Move::Drop { col },
                Move::Destroy {
                    row: target_row,
                    col: target_col,
                },
            ],
            Turn::Destroy { row, col } => vec![Move::Destroy { row, col }],
            Turn::Pass => vec![Move::Pass],
        }
    }

    /// Returns the dropped column, if the turn drops a piece.
    pub fn drop_col(self) -> Option<usize> {
        match self {
            Turn::Drop { col } | Turn::DropDestroy { col, .. } => Some(col),
            Turn::Destroy { .. } | Turn::Pass => None,
        }
    }
}
