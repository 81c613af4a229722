//! Protocol handling.
//!
//! This module implements the flat integer buffer codec used by embedding
//! hosts, the text notation for positions and turns, and the command parser
//! for the line-protocol main loop.

pub mod buffer;
pub mod notation;
pub mod parser;

pub use buffer::{
    decode_board, decode_result, encode_board, encode_turn, parse_depth, parse_variant_id,
    BufferError,
};
pub use notation::{
    encode_position, format_move, format_turn, parse_move, parse_position, parse_turn,
    NotationError,
};
pub use parser::{parse_command, Command, GoParams};
