//! Game rules.
//!
//! Alignment detection, gravity, and the rule-variant dispatch used by the
//! search.

pub mod alignment;
pub mod gravity;
pub mod variant;

pub use alignment::{
    forms_line_at, has_n_in_a_row, is_win, run_length, BONUS_LENGTH, DIRECTIONS, WIN_LENGTH,
};
pub use gravity::{compact_column, drop_row, remove_piece};
pub use variant::{Variant, ALL_VARIANTS};
