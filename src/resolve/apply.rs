//! Successor-state application.
//!
//! `apply` is the search's hot path and trusts its input: every move it sees
//! comes from `legal_moves`. `play` is the referee entry point and checks
//! the move first.

use thiserror::Error;

use crate::board::{Board, Move, Position, Side, COLS, ROWS};
use crate::rules::{drop_row, forms_line_at, is_win, remove_piece, Variant, BONUS_LENGTH};

use super::outcome::outcome;

/// Reasons a move is rejected by `play`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("the game is already over")]
    GameOver,

    #[error("column {0} is off the board")]
    ColumnOutOfRange(usize),

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("cell ({row}, {col}) is off the board")]
    CellOutOfRange { row: usize, col: usize },

    #[error("cell ({row}, {col}) is empty")]
    EmptyTarget { row: usize, col: usize },

    #[error("cell ({row}, {col}) holds the mover's own piece")]
    OwnPiece { row: usize, col: usize },

    #[error("{0} has no destroy charge in stock")]
    NoStock(&'static str),

    #[error("destroy is not available in the {0} variant without a bonus")]
    DestroyNotAllowed(&'static str),

    #[error("a bonus destroy is pending; drops are not allowed")]
    BonusPending,

    #[error("pass is only allowed when a bonus has no target")]
    PassNotAllowed,
}

/// True if the piece just placed at `(row, col)` forms a line of three for
/// `side` without completing a win.
pub fn earns_bonus(board: &Board, row: usize, col: usize, side: Side) -> bool {
    forms_line_at(board, row, col, side, BONUS_LENGTH) && !is_win(board, side)
}

/// Returns the position after `mv` is played by the side to move.
///
/// ThreeForOne: a bonus-earning drop keeps the turn with the mover and marks
/// the bonus pending; the following destroy or pass ends the turn.
/// Stock: a bonus-earning drop banks one charge; a destroy spends one.
pub fn apply(position: &Position, mv: Move, variant: Variant) -> Position {
    let mover = position.to_move;
    let mut next = *position;

    match mv {
        Move::Drop { col } => {
            let Some(row) = drop_row(&next.board, col) else {
                debug_assert!(false, "drop into full column {}", col);
                return next;
            };
            next.board.set(row, col, Some(mover));
            let bonus = earns_bonus(&next.board, row, col, mover);
            match variant {
                Variant::ThreeForOne if bonus => {
                    next.bonus_pending = true;
                    return next;
                }
                Variant::Stock if bonus => next.board.add_stock(mover),
                _ => {}
            }
        }
        Move::Destroy { row, col } => {
            debug_assert_eq!(next.board.get(row, col), Some(mover.opponent()));
            remove_piece(&mut next.board, row, col);
            if next.bonus_pending {
                next.bonus_pending = false;
            } else {
                let spent = next.board.spend_stock(mover);
                debug_assert!(spent, "destroy without stock");
            }
        }
        Move::Pass => {
            next.bonus_pending = false;
        }
    }

    next.to_move = mover.opponent();
    next
}

/// Validates `mv` for the side to move and applies it.
pub fn play(position: &Position, mv: Move, variant: Variant) -> Result<Position, MoveError> {
    if outcome(position, variant).is_some() {
        return Err(MoveError::GameOver);
    }
    let mover = position.to_move;
    let board = &position.board;

    match mv {
        Move::Drop { col } => {
            if position.bonus_pending {
                return Err(MoveError::BonusPending);
            }
            if col >= COLS {
                return Err(MoveError::ColumnOutOfRange(col));
            }
            if board.is_column_full(col) {
                return Err(MoveError::ColumnFull(col));
            }
        }
        Move::Destroy { row, col } => {
            if row >= ROWS || col >= COLS {
                return Err(MoveError::CellOutOfRange { row, col });
            }
            match board.get(row, col) {
                None => return Err(MoveError::EmptyTarget { row, col }),
                Some(side) if side == mover => return Err(MoveError::OwnPiece { row, col }),
                Some(_) => {}
            }
            if !position.bonus_pending {
                if !variant.uses_stock() {
                    return Err(MoveError::DestroyNotAllowed(variant.name()));
                }
                if board.stock(mover) == 0 {
                    return Err(MoveError::NoStock(mover.name()));
                }
            }
        }
        Move::Pass => {
            if !position.bonus_pending || board.count(mover.opponent()) > 0 {
                return Err(MoveError::PassNotAllowed);
            }
        }
    }

    Ok(apply(position, mv, variant))
}
