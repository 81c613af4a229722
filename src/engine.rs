//! Engine state management.
//!
//! Holds the current position and configuration between protocol commands,
//! runs the search for `go`, and serves the flat buffer entry point used by
//! embedding hosts.

use std::io::{self, Write};
use std::time::Instant;

use crate::board::{Position, Side};
use crate::config::{ConfigError, EngineConfig, OPTION_DECLARATIONS};
use crate::movegen::has_legal_move;
use crate::protocol::buffer::{decode_board, encode_turn, parse_depth, parse_variant_id, BufferError};
use crate::protocol::notation::{format_turn, parse_position, parse_turn, NotationError};
use crate::resolve::MoveError;
use crate::rules::{is_win, Variant};
use crate::search::{choose_move, SearchParams, SearchResult};

/// Errors surfaced by engine entry points.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Buffer(#[from] BufferError),

    #[error(transparent)]
    Notation(#[from] NotationError),

    #[error(transparent)]
    Move(#[from] MoveError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("the position is already decided")]
    GameOver,

    #[error("no legal move in the position")]
    NoLegalMove,
}

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub config: EngineConfig,
    pub position: Position,
    /// Reused for every buffer result; callers copy before the next call.
    output: Vec<i32>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates an engine with default settings and the empty board.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Engine {
            config,
            position: Position::start(),
            output: Vec::with_capacity(3),
        }
    }

    /// Resets the board; configuration is kept.
    pub fn new_game(&mut self) {
        self.position = Position::start();
    }

    /// Sets the current position from notation. The old position is kept on error.
    pub fn set_position(&mut self, notation: &str) -> Result<(), EngineError> {
        self.position = parse_position(notation)?;
        Ok(())
    }

    /// Selects the rule variant by name or numeric id.
    pub fn set_variant(&mut self, name: &str) -> Result<(), EngineError> {
        self.config.set_option("Variant", Some(name))?;
        Ok(())
    }

    /// Sets an engine option.
    pub fn set_option(&mut self, name: &str, value: Option<&str>) -> Result<(), EngineError> {
        self.config.set_option(name, value)?;
        Ok(())
    }

    /// Plays a turn in move notation for the side to move.
    ///
    /// Every ply is validated; on error the position is left unchanged.
    pub fn play_turn(&mut self, notation: &str) -> Result<(), EngineError> {
        let turn = parse_turn(notation)?;
        let mut next = self.position;
        for ply in turn.plies() {
            next = next.play(ply, self.config.variant)?;
        }
        self.position = next;
        Ok(())
    }

    /// Searches `position` under `variant` to `depth` plies.
    ///
    /// Fails on a decided position or one with no legal move.
    pub fn search(
        &self,
        position: &Position,
        variant: Variant,
        depth: u32,
    ) -> Result<SearchResult, EngineError> {
        if is_win(&position.board, Side::Red) || is_win(&position.board, Side::Yellow) {
            return Err(EngineError::GameOver);
        }
        if !has_legal_move(position, variant) {
            return Err(EngineError::NoLegalMove);
        }

        let params = SearchParams {
            depth,
            threads: self.config.threads,
            weights: self.config.weights,
        };
        Ok(choose_move(position, variant, &params))
    }

    /// Buffer entry point: best turn for Red on a flat board.
    ///
    /// The returned slice borrows a buffer owned by the engine and is
    /// overwritten by the next call.
    pub fn best_move_buffer(
        &mut self,
        input: &[i32],
        depth: i32,
        variant: i32,
    ) -> Result<&[i32], EngineError> {
        let variant = parse_variant_id(variant)?;
        let depth = parse_depth(depth)?;
        let position = decode_board(input, variant)?;

        let result = self.search(&position, variant, depth)?;
        let turn = result.turn.ok_or(EngineError::NoLegalMove)?;
        encode_turn(turn, &mut self.output);
        Ok(self.output.as_slice())
    }

    /// Handles the handshake: writes id, options, and `hellook`.
    pub fn handle_hello<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "id name dropfour {}", env!("CARGO_PKG_VERSION"))?;
        for option in OPTION_DECLARATIONS {
            writeln!(out, "{}", option)?;
        }
        writeln!(out, "hellook")?;
        out.flush()
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Handles the `go` command: writes one `info` line and `bestmove`.
    ///
    /// A position that cannot be searched answers `bestmove none`.
    pub fn handle_go<W: Write>(&self, out: &mut W, depth: Option<u32>) -> io::Result<()> {
        let depth = depth.unwrap_or(self.config.depth);
        let start = Instant::now();

        let turn = match self.search(&self.position, self.config.variant, depth) {
            Ok(result) => {
                writeln!(
                    out,
                    "info depth {} nodes {} score {} time {}",
                    result.depth,
                    result.nodes,
                    result.score,
                    start.elapsed().as_millis()
                )?;
                log::debug!("{:?} decided by {:?}", result.turn, result.decision);
                result.turn
            }
            Err(e) => {
                log::warn!("go: {}", e);
                None
            }
        };

        match turn {
            Some(turn) => writeln!(out, "bestmove {}", format_turn(turn))?,
            None => writeln!(out, "bestmove none")?,
        }
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{idx, Turn, CELL_COUNT};
    use crate::protocol::buffer::decode_result;

    fn output_of(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn new_engine_has_start_position() {
        let engine = Engine::new();
        assert_eq!(engine.position, Position::start());
        assert_eq!(engine.config, EngineConfig::default());
    }

    #[test]
    fn new_game_resets_position_only() {
        let mut engine = Engine::new();
        engine.set_variant("stock").unwrap();
        engine.set_position("7/7/7/7/7/3x3/0,0/y").unwrap();
        engine.new_game();
        assert_eq!(engine.position, Position::start());
        assert_eq!(engine.config.variant, Variant::Stock);
    }

    #[test]
    fn set_position_invalid_keeps_old() {
        let mut engine = Engine::new();
        engine.set_position("7/7/7/7/7/3x3").unwrap();
        let before = engine.position;
        assert!(matches!(
            engine.set_position("garbage"),
            Err(EngineError::Notation(_))
        ));
        assert_eq!(engine.position, before);
    }

    #[test]
    fn set_variant_accepts_ids_and_rejects_unknown() {
        let mut engine = Engine::new();
        engine.set_variant("1").unwrap();
        assert_eq!(engine.config.variant, Variant::ThreeForOne);
        assert!(engine.set_variant("7").is_err());
        assert_eq!(engine.config.variant, Variant::ThreeForOne);
    }

    #[test]
    fn play_turn_applies_and_validates() {
        let mut engine = Engine::new();
        engine.play_turn("d3").unwrap();
        assert_eq!(engine.position.board.get(5, 3), Some(Side::Red));
        assert_eq!(engine.position.to_move, Side::Yellow);

        let before = engine.position;
        assert!(matches!(
            engine.play_turn("x53"),
            Err(EngineError::Move(MoveError::DestroyNotAllowed(_)))
        ));
        assert_eq!(engine.position, before);
    }

    #[test]
    fn handle_hello_outputs_handshake() {
        let engine = Engine::new();
        let output = output_of(|out| engine.handle_hello(out));
        assert!(output.lines().next().unwrap().starts_with("id name dropfour"));
        assert!(output.contains("option name Depth"));
        assert!(output.contains("option name Variant"));
        assert_eq!(output.lines().last(), Some("hellook"));
    }

    #[test]
    fn handle_isready_outputs_readyok() {
        let engine = Engine::new();
        let output = output_of(|out| engine.handle_isready(out));
        assert_eq!(output.trim(), "readyok");
    }

    #[test]
    fn handle_go_outputs_info_and_bestmove() {
        let engine = Engine::new();
        let output = output_of(|out| engine.handle_go(out, Some(4)));
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[0].starts_with("info depth 4 nodes "));
        assert_eq!(lines.last(), Some(&"bestmove d3"));
    }

    #[test]
    fn handle_go_on_decided_board_answers_none() {
        let mut engine = Engine::new();
        engine.set_position("7/7/7/7/7/xxxx3/0,0/y").unwrap();
        let output = output_of(|out| engine.handle_go(out, None));
        assert_eq!(output.trim(), "bestmove none");
    }

    #[test]
    fn search_rejects_board_where_both_sides_hold_four() {
        let mut engine = Engine::new();
        engine.set_position("7/7/x5o/x5o/x5o/x5o/0,0/r").unwrap();
        assert!(matches!(
            engine.search(&engine.position, Variant::Stock, 2),
            Err(EngineError::GameOver)
        ));
        let output = output_of(|out| engine.handle_go(out, Some(2)));
        assert_eq!(output.trim(), "bestmove none");
    }

    #[test]
    fn buffer_empty_board_plays_center() {
        let mut engine = Engine::new();
        let result = engine.best_move_buffer(&[0; CELL_COUNT], 4, 0).unwrap();
        assert_eq!(result, &[3]);
    }

    #[test]
    fn buffer_blocks_three() {
        let mut engine = Engine::new();
        let mut input = vec![0; CELL_COUNT];
        input[idx(5, 0)] = -1;
        input[idx(5, 1)] = -1;
        input[idx(5, 2)] = -1;
        input[idx(4, 0)] = 1;
        input[idx(4, 1)] = 1;
        let result = engine.best_move_buffer(&input, 4, 0).unwrap();
        assert_eq!(decode_result(result), Ok(Turn::Drop { col: 3 }));
    }

    #[test]
    fn buffer_stock_destroy_is_encoded_with_sentinel() {
        // A Red stock charge removes the yellow piece wedged in column 0,
        // dropping Red's top piece into a vertical four.
        let mut engine = Engine::new();
        let mut input = vec![0; CELL_COUNT];
        input[idx(5, 0)] = 1;
        input[idx(4, 0)] = 1;
        input[idx(3, 0)] = 1;
        input[idx(2, 0)] = -1;
        input[idx(1, 0)] = 1;
        input[idx(5, 6)] = -1;
        input[idx(4, 6)] = -1;
        input[idx(5, 5)] = -1;
        input.extend([1, 0]);
        let result = engine.best_move_buffer(&input, 2, 2).unwrap();
        assert_eq!(result, &[-1, 2, 0]);
    }

    #[test]
    fn buffer_accepts_maximal_stocks() {
        let mut engine = Engine::new();
        for stocks in [[i32::MAX, 0], [0, i32::MAX], [i32::MAX, i32::MAX]] {
            let mut input = vec![0; CELL_COUNT];
            input[idx(5, 3)] = -1;
            input[idx(5, 2)] = 1;
            input.extend(stocks);
            for depth in [1, 2] {
                let result = engine.best_move_buffer(&input, depth, 2).unwrap();
                assert!(decode_result(result).is_ok(), "{:?} depth {}", stocks, depth);
            }
        }
    }

    #[test]
    fn buffer_rejects_bad_input() {
        let mut engine = Engine::new();
        assert!(matches!(
            engine.best_move_buffer(&[0; CELL_COUNT], 4, 9),
            Err(EngineError::Buffer(BufferError::UnknownVariant(9)))
        ));
        assert!(matches!(
            engine.best_move_buffer(&[0; CELL_COUNT], -1, 0),
            Err(EngineError::Buffer(BufferError::NegativeDepth(-1)))
        ));
        assert!(matches!(
            engine.best_move_buffer(&[0; 5], 4, 0),
            Err(EngineError::Buffer(BufferError::WrongLength(5)))
        ));
    }

    #[test]
    fn buffer_rejects_decided_board() {
        let mut engine = Engine::new();
        let mut input = vec![0; CELL_COUNT];
        for col in 0..4 {
            input[idx(5, col)] = -1;
        }
        assert!(matches!(
            engine.best_move_buffer(&input, 4, 0),
            Err(EngineError::GameOver)
        ));
    }

    #[test]
    fn buffer_rejects_full_board_without_stock() {
        let mut engine = Engine::new();
        let mut input = vec![0; CELL_COUNT];
        for row in 0..crate::board::ROWS {
            for col in 0..crate::board::COLS {
                input[idx(row, col)] = if (row + col / 2) % 2 == 0 { 1 } else { -1 };
            }
        }
        assert!(matches!(
            engine.best_move_buffer(&input, 2, 0),
            Err(EngineError::NoLegalMove)
        ));
    }
}
