//! Board and position representation.
//!
//! The grid is a flat array of 42 cells addressed by `row * COLS + col`.
//! Row 0 is the top, where pieces enter; row 5 is the bottom. Both types are
//! `Copy`, so exploring a hypothetical move never aliases the parent state.

use super::moves::Move;
use super::side::Side;
use crate::resolve::MoveError;
use crate::rules::Variant;

/// Number of rows.
pub const ROWS: usize = 6;

/// Number of columns.
pub const COLS: usize = 7;

/// Number of cells on the grid.
pub const CELL_COUNT: usize = ROWS * COLS;

/// The middle column.
pub const CENTER_COL: usize = COLS / 2;

/// Column priority for move ordering and tie-breaking: center first, then outward.
pub const COLUMN_ORDER: [usize; COLS] = [3, 2, 4, 1, 5, 0, 6];

/// Flat index of `(row, col)`.
#[inline]
pub const fn idx(row: usize, col: usize) -> usize {
    row * COLS + col
}

/// Grid contents plus the destruction stock held by each side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    /// Occupant of each cell, `None` when empty.
    pub cells: [Option<Side>; CELL_COUNT],
    /// Banked destruction charges, indexed by `Side as usize`.
    pub stock: [u32; 2],
}

impl Board {
    /// Creates an empty board with no stock.
    pub const fn empty() -> Self {
        Board {
            cells: [None; CELL_COUNT],
            stock: [0; 2],
        }
    }

    /// Returns the occupant of `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<Side> {
        self.cells[idx(row, col)]
    }

    /// Overwrites the occupant of `(row, col)` without any gravity handling.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, occupant: Option<Side>) {
        self.cells[idx(row, col)] = occupant;
    }

    /// True when the top cell of `col` is occupied.
    #[inline]
    pub fn is_column_full(&self, col: usize) -> bool {
        self.cells[idx(0, col)].is_some()
    }

    /// True when every column is full.
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|c| self.is_column_full(c))
    }

    /// Number of pieces owned by `side`.
    pub fn count(&self, side: Side) -> usize {
        self.cells.iter().filter(|c| **c == Some(side)).count()
    }

    /// Number of occupied cells.
    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Stock held by `side`.
    #[inline]
    pub fn stock(&self, side: Side) -> u32 {
        self.stock[side as usize]
    }

    /// Adds one charge to `side`'s stock.
    pub fn add_stock(&mut self, side: Side) {
        self.stock[side as usize] = self.stock[side as usize].saturating_add(1);
    }

    /// Spends one charge from `side`'s stock. Returns false if none is left.
    pub fn spend_stock(&mut self, side: Side) -> bool {
        match self.stock[side as usize].checked_sub(1) {
            Some(left) => {
                self.stock[side as usize] = left;
                true
            }
            None => false,
        }
    }

    /// Returns the first cell that sits above an empty cell in its column.
    ///
    /// A well-formed board has none: occupied cells in a column form a
    /// contiguous run resting on the bottom row.
    pub fn floating_piece(&self) -> Option<(usize, usize)> {
        for col in 0..COLS {
            for row in 0..ROWS - 1 {
                if self.get(row, col).is_some() && self.get(row + 1, col).is_none() {
                    return Some((row, col));
                }
            }
        }
        None
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

/// A board together with whose turn it is.
///
/// `bonus_pending` is set in the ThreeForOne variant between a drop that
/// earned the bonus and the destroy (or pass) that spends it; the side to
/// move does not change in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub board: Board,
    pub to_move: Side,
    pub bonus_pending: bool,
}

impl Position {
    /// Creates a position with no pending bonus.
    pub const fn new(board: Board, to_move: Side) -> Self {
        Position {
            board,
            to_move,
            bonus_pending: false,
        }
    }

    /// The empty starting position with Red to move.
    pub const fn start() -> Self {
        Self::new(Board::empty(), Side::Red)
    }

    /// Validates `mv` for the side to move and returns the resulting position.
    pub fn play(&self, mv: Move, variant: Variant) -> Result<Position, MoveError> {
        crate::resolve::play(self, mv, variant)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}
