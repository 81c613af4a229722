//! Legal move generation.
//!
//! Drops come first in center-out column order, which is what makes the
//! alpha-beta window tighten early. Destroys follow, also column by column
//! in the same order and bottom-up within a column.

use crate::board::{Board, Move, Position, Side, COLUMN_ORDER, ROWS};
use crate::rules::Variant;

/// Generates every legal move for the side to move.
///
/// Returns an empty list only when the board is full and the side to move
/// has no funded destroy.
pub fn legal_moves(position: &Position, variant: Variant) -> Vec<Move> {
    let mut moves = Vec::with_capacity(16);
    let mover = position.to_move;

    if position.bonus_pending {
        push_destroys(&position.board, mover.opponent(), &mut moves);
        if moves.is_empty() {
            moves.push(Move::Pass);
        }
        return moves;
    }

    push_drops(&position.board, &mut moves);
    if variant.uses_stock() && position.board.stock(mover) > 0 {
        push_destroys(&position.board, mover.opponent(), &mut moves);
    }
    moves
}

/// True if the side to move has at least one legal move.
pub fn has_legal_move(position: &Position, variant: Variant) -> bool {
    if position.bonus_pending {
        return true;
    }
    let board = &position.board;
    if !board.is_full() {
        return true;
    }
    variant.uses_stock()
        && board.stock(position.to_move) > 0
        && board.count(position.to_move.opponent()) > 0
}

/// Drop moves for every non-full column, center first.
pub fn drop_moves(board: &Board) -> Vec<Move> {
    let mut moves = Vec::with_capacity(COLUMN_ORDER.len());
    push_drops(board, &mut moves);
    moves
}

fn push_drops(board: &Board, moves: &mut Vec<Move>) {
    for col in COLUMN_ORDER {
        if !board.is_column_full(col) {
            moves.push(Move::Drop { col });
        }
    }
}

/// Destroy moves targeting every piece owned by `target`.
pub fn destroy_moves(board: &Board, target: Side) -> Vec<Move> {
    let mut moves = Vec::new();
    push_destroys(board, target, &mut moves);
    moves
}

fn push_destroys(board: &Board, target: Side, moves: &mut Vec<Move>) {
    for col in COLUMN_ORDER {
        for row in (0..ROWS).rev() {
            match board.get(row, col) {
                Some(side) if side == target => moves.push(Move::Destroy { row, col }),
                Some(_) => {}
                // Nothing sits above an empty cell.
                None => break,
            }
        }
    }
}
