//! Gravity: landing rows for drops and column compaction after a destroy.

use crate::board::{Board, COLS, ROWS};

/// Row a piece dropped into `col` lands on, or `None` if the column is full.
pub fn drop_row(board: &Board, col: usize) -> Option<usize> {
    debug_assert!(col < COLS);
    (0..ROWS).rev().find(|&row| board.get(row, col).is_none())
}

/// Closes every gap in `col` by letting the pieces above it fall.
///
/// The vertical order of the remaining pieces is preserved and the freed
/// cells end up at the top. A column without gaps is left unchanged.
pub fn compact_column(board: &mut Board, col: usize) {
    let mut write = ROWS;
    for row in (0..ROWS).rev() {
        if let Some(side) = board.get(row, col) {
            write -= 1;
            if write != row {
                board.set(write, col, Some(side));
                board.set(row, col, None);
            }
        }
    }
}

/// Vacates `(row, col)` and compacts the column.
pub fn remove_piece(board: &mut Board, row: usize, col: usize) {
    board.set(row, col, None);
    compact_column(board, col);
}
