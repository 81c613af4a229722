//! Position evaluation.
//!
//! Scores a board from a given side's perspective: center control,
//! four-cell window patterns, and banked stock where the variant has it.

pub(crate) mod heuristic;

pub use heuristic::{evaluate, score_window, window_count, EvalWeights, HEURISTIC_LIMIT};
