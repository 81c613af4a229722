//! Move resolution.
//!
//! Applies moves to positions (with bonus and stock bookkeeping), validates
//! moves coming from outside the search, and decides when a game is over.

pub mod apply;
pub mod outcome;

pub use apply::{apply, earns_bonus, play, MoveError};
pub use outcome::{outcome, wins_for, Outcome};
