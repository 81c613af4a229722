//! Windowed heuristic evaluation.
//!
//! Scores a board from one side's perspective by sliding a four-cell window
//! over every line on the grid. The window index table is computed once via
//! `LazyLock` and reused.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::board::{idx, Board, Side, CENTER_COL, COLS, ROWS};
use crate::rules::{Variant, DIRECTIONS, WIN_LENGTH};

/// Tunable weights for the heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    /// Per own piece in the center column.
    pub center: i32,
    /// Window holding four own pieces.
    pub four: i32,
    /// Window with three own pieces and one empty cell.
    pub three: i32,
    /// Window with two own pieces and two empty cells.
    pub two: i32,
    /// Window with three opposing pieces and one empty cell (negative).
    pub opponent_three: i32,
    /// Per charge of stock difference in stock-aware variants.
    pub stock: i32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        EvalWeights {
            center: 3,
            four: 100,
            three: 5,
            two: 2,
            opponent_three: -4,
            stock: 10,
        }
    }
}

/// Cell indices of every four-cell window on the grid.
static WINDOWS: LazyLock<Vec<[usize; WIN_LENGTH]>> = LazyLock::new(build_windows);

fn build_windows() -> Vec<[usize; WIN_LENGTH]> {
    let mut windows = Vec::with_capacity(69);
    for (dr, dc) in DIRECTIONS {
        for row in 0..ROWS as isize {
            for col in 0..COLS as isize {
                let end_r = row + dr * (WIN_LENGTH as isize - 1);
                let end_c = col + dc * (WIN_LENGTH as isize - 1);
                if end_r < 0 || end_r >= ROWS as isize || end_c < 0 || end_c >= COLS as isize {
                    continue;
                }
                let mut window = [0usize; WIN_LENGTH];
                for (i, cell) in window.iter_mut().enumerate() {
                    let r = row + dr * i as isize;
                    let c = col + dc * i as isize;
                    *cell = idx(r as usize, c as usize);
                }
                windows.push(window);
            }
        }
    }
    windows
}

/// Number of four-cell windows on the grid.
pub fn window_count() -> usize {
    WINDOWS.len()
}

/// Scores one window for `side`. Windows mixing both colours score zero.
pub fn score_window(window: &[Option<Side>; WIN_LENGTH], side: Side, weights: &EvalWeights) -> i32 {
    let mut own = 0;
    let mut opp = 0;
    let mut empty = 0;
    for cell in window {
        match cell {
            Some(s) if *s == side => own += 1,
            Some(_) => opp += 1,
            None => empty += 1,
        }
    }

    match (own, opp, empty) {
        (4, 0, 0) => weights.four,
        (3, 0, 1) => weights.three,
        (2, 0, 2) => weights.two,
        (0, 3, 1) => weights.opponent_three,
        _ => 0,
    }
}

/// Largest magnitude a heuristic score can take; strictly inside the
/// search's win sentinel.
pub const HEURISTIC_LIMIT: i32 = 999_999_999;

/// Heuristic score of `board` for `side`.
///
/// Center occupancy plus the sum over all windows, plus a linear stock term
/// in stock-aware variants. The sum is taken in `i64` and clamped to
/// `±HEURISTIC_LIMIT`, so arbitrary stocks and weights cannot overflow. Not
/// meaningful for decided positions; the search scores those with its
/// win/loss sentinel instead.
pub fn evaluate(board: &Board, side: Side, variant: Variant, weights: &EvalWeights) -> i32 {
    let mut score: i64 = 0;

    let center = (0..ROWS)
        .filter(|&r| board.get(r, CENTER_COL) == Some(side))
        .count() as i64;
    score += center * i64::from(weights.center);

    for window in WINDOWS.iter() {
        let cells = [
            board.cells[window[0]],
            board.cells[window[1]],
            board.cells[window[2]],
            board.cells[window[3]],
        ];
        score += i64::from(score_window(&cells, side, weights));
    }

    if variant.uses_stock() {
        let own = i64::from(board.stock(side));
        let opp = i64::from(board.stock(side.opponent()));
        score += i64::from(weights.stock) * (own - opp);
    }

    let limit = i64::from(HEURISTIC_LIMIT);
    score.clamp(-limit, limit) as i32
}
