//! Board representation and game-state types.
//!
//! Contains the grid, the two sides, positions (grid plus side to move),
//! and the move types exchanged between the rules and the search.

pub mod moves;
pub mod side;
pub mod state;

pub use moves::{Move, Turn};
pub use side::{Side, ALL_SIDES};
pub use state::{
    idx, Board, Position, CELL_COUNT, CENTER_COL, COLS, COLUMN_ORDER, ROWS,
};
