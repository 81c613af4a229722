//! N-in-a-row detection.
//!
//! `has_n_in_a_row` scans the whole grid; `forms_line_at` only looks at the
//! lines through one cell, which is what the bonus test needs after a drop.
//! Both cover all four directions, so the two diagonals are treated alike.

use crate::board::{Board, Side, COLS, ROWS};

/// Length of a win.
pub const WIN_LENGTH: usize = 4;

/// Length of a bonus-granting line.
pub const BONUS_LENGTH: usize = 3;

/// Horizontal, vertical, diagonal down-right, diagonal down-left.
///
/// Each line is visited from one end only; the opposite vectors would find
/// the same runs from the other end.
pub const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Steps one cell along `(dr, dc)`, returning `None` off the grid.
#[inline]
fn step(row: usize, col: usize, dr: isize, dc: isize) -> Option<(usize, usize)> {
    let r = row as isize + dr;
    let c = col as isize + dc;
    if r >= 0 && r < ROWS as isize && c >= 0 && c < COLS as isize {
        Some((r as usize, c as usize))
    } else {
        None
    }
}

/// Number of consecutive `side` cells starting at `(row, col)` and walking
/// along `(dr, dc)`, the start cell included.
pub fn run_length(board: &Board, row: usize, col: usize, dr: isize, dc: isize, side: Side) -> usize {
    let mut len = 0;
    let mut cur = Some((row, col));
    while let Some((r, c)) = cur {
        if board.get(r, c) != Some(side) {
            break;
        }
        len += 1;
        cur = step(r, c, dr, dc);
    }
    len
}

/// True if `side` owns `n` consecutive cells anywhere on the board.
pub fn has_n_in_a_row(board: &Board, side: Side, n: usize) -> bool {
    if n == 0 {
        return true;
    }
    for row in 0..ROWS {
        for col in 0..COLS {
            if board.get(row, col) != Some(side) {
                continue;
            }
            for (dr, dc) in DIRECTIONS {
                if run_length(board, row, col, dr, dc, side) >= n {
                    return true;
                }
            }
        }
    }
    false
}

/// True if the cell at `(row, col)` lies on a line of at least `n` cells
/// owned by `side`, in any direction.
pub fn forms_line_at(board: &Board, row: usize, col: usize, side: Side, n: usize) -> bool {
    if board.get(row, col) != Some(side) {
        return false;
    }
    DIRECTIONS.iter().any(|&(dr, dc)| {
        let forward = run_length(board, row, col, dr, dc, side);
        let backward = run_length(board, row, col, -dr, -dc, side);
        // The start cell is counted by both walks.
        forward + backward - 1 >= n
    })
}

/// True if `side` has completed a win.
#[inline]
pub fn is_win(board: &Board, side: Side) -> bool {
    has_n_in_a_row(board, side, WIN_LENGTH)
}
