//! dropfour engine library.
//!
//! Exposes the board representation, rules, move generation, search, and
//! protocol modules for use by integration tests and the binary entry points.

pub mod board;
pub mod config;
pub mod engine;
pub mod eval;
pub mod movegen;
pub mod protocol;
pub mod resolve;
pub mod rules;
pub mod search;
pub mod selfplay;
