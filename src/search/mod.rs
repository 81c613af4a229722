//! Search.
//!
//! Depth-limited alpha-beta minimax driven by the active rule variant, and
//! the root driver that picks the engine's turn.

pub mod alphabeta;
pub mod root;

pub use alphabeta::{AlphaBeta, INFINITY, WIN_SCORE};
pub use root::{
    blocking_column, choose_move, winning_turn, Decision, SearchParams, SearchResult,
};
