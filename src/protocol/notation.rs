//! Text notation for positions, moves and turns.
//!
//! Position format: `<rank0>/<rank1>/.../<rank5>[/<red_stock>,<yellow_stock>][/<side>]`
//!
//! Ranks run top row first. Each rank uses `x` for Red, `o` for Yellow and
//! the digits 1-7 for runs of empty cells. The side to move is `r` or `y`
//! and defaults to Red. The empty board is `7/7/7/7/7/7/0,0/r`.
//!
//! Move format: `d<col>` drop, `x<row><col>` destroy, `p` pass. A ThreeForOne
//! drop with its bonus destroy is written as one turn: `d<col>x<row><col>`.

use crate::board::{Board, Move, Position, Side, Turn, COLS, ROWS};

/// Errors that can occur while parsing notation.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("expected 6 to 8 sections separated by '/', got {0}")]
    WrongSectionCount(usize),

    #[error("rank {rank} describes {len} cells, expected 7")]
    RankLength { rank: usize, len: usize },

    #[error("invalid character '{0}' in rank")]
    InvalidChar(char),

    #[error("invalid stock section: '{0}'")]
    InvalidStock(String),

    #[error("invalid side to move: '{0}'")]
    InvalidSide(String),

    #[error("piece at ({row}, {col}) floats over an empty cell")]
    FloatingPiece { row: usize, col: usize },

    #[error("invalid move: '{0}'")]
    InvalidMove(String),
}

/// Parses a position string.
pub fn parse_position(s: &str) -> Result<Position, NotationError> {
    let sections: Vec<&str> = s.trim().split('/').collect();
    if sections.len() < ROWS || sections.len() > ROWS + 2 {
        return Err(NotationError::WrongSectionCount(sections.len()));
    }

    let mut board = Board::empty();
    for (row, rank) in sections[..ROWS].iter().enumerate() {
        parse_rank(rank, row, &mut board)?;
    }
    if let Some((row, col)) = board.floating_piece() {
        return Err(NotationError::FloatingPiece { row, col });
    }

    let mut to_move = Side::Red;
    for extra in &sections[ROWS..] {
        if extra.contains(',') {
            board.stock = parse_stocks(extra)?;
        } else {
            to_move = parse_side(extra)?;
        }
    }

    Ok(Position::new(board, to_move))
}

fn parse_rank(rank: &str, row: usize, board: &mut Board) -> Result<(), NotationError> {
    let mut col = 0;
    for c in rank.chars() {
        if let Some(run) = c.to_digit(10) {
            if run == 0 || run as usize > COLS {
                return Err(NotationError::InvalidChar(c));
            }
            col += run as usize;
        } else {
            let side = Side::from_piece_char(c).ok_or(NotationError::InvalidChar(c))?;
            if col < COLS {
                board.set(row, col, Some(side));
            }
            col += 1;
        }
    }
    if col != COLS {
        return Err(NotationError::RankLength { rank: row, len: col });
    }
    Ok(())
}

fn parse_stocks(s: &str) -> Result<[u32; 2], NotationError> {
    let invalid = || NotationError::InvalidStock(s.to_string());
    let (red, yellow) = s.split_once(',').ok_or_else(invalid)?;
    let red = red.trim().parse::<u32>().map_err(|_| invalid())?;
    let yellow = yellow.trim().parse::<u32>().map_err(|_| invalid())?;
    Ok([red, yellow])
}

fn parse_side(s: &str) -> Result<Side, NotationError> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Side::from_turn_char(c).ok_or_else(|| NotationError::InvalidSide(s.to_string())),
        _ => Err(NotationError::InvalidSide(s.to_string())),
    }
}

/// Encodes a position, always writing the stock and side sections.
pub fn encode_position(position: &Position) -> String {
    let board = &position.board;
    let mut out = String::with_capacity(40);

    for row in 0..ROWS {
        if row > 0 {
            out.push('/');
        }
        let mut empty = 0;
        for col in 0..COLS {
            match board.get(row, col) {
                Some(side) => {
                    if empty > 0 {
                        out.push_str(&empty.to_string());
                        empty = 0;
                    }
                    out.push(side.piece_char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            out.push_str(&empty.to_string());
        }
    }

    out.push_str(&format!(
        "/{},{}/{}",
        board.stock(Side::Red),
        board.stock(Side::Yellow),
        position.to_move.turn_char()
    ));
    out
}

/// Parses a single ply.
pub fn parse_move(s: &str) -> Result<Move, NotationError> {
    let invalid = || NotationError::InvalidMove(s.to_string());
    let s = s.trim();
    if s == "p" {
        return Ok(Move::Pass);
    }
    if let Some(rest) = s.strip_prefix('d') {
        let col = parse_digit(rest, COLS).ok_or_else(invalid)?;
        return Ok(Move::Drop { col });
    }
    if let Some(rest) = s.strip_prefix('x') {
        let mut chars = rest.chars();
        return match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(c), None) => {
                let row = digit(r, ROWS).ok_or_else(invalid)?;
                let col = digit(c, COLS).ok_or_else(invalid)?;
                Ok(Move::Destroy { row, col })
            }
            _ => Err(invalid()),
        };
    }
    Err(invalid())
}

fn parse_digit(s: &str, bound: usize) -> Option<usize> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => digit(c, bound),
        _ => None,
    }
}

fn digit(c: char, bound: usize) -> Option<usize> {
    c.to_digit(10).map(|d| d as usize).filter(|&d| d < bound)
}

/// Formats a single ply.
pub fn format_move(mv: Move) -> String {
    match mv {
        Move::Drop { col } => format!("d{}", col),
        Move::Destroy { row, col } => format!("x{}{}", row, col),
        Move::Pass => "p".to_string(),
    }
}

/// Parses a complete turn, including the combined drop-and-destroy form.
pub fn parse_turn(s: &str) -> Result<Turn, NotationError> {
    let s = s.trim();
    let (first, follow_up) = match s.find('x') {
        Some(i) if i > 0 => (parse_move(&s[..i])?, Some(parse_move(&s[i..])?)),
        _ => (parse_move(s)?, None),
    };
    Turn::from_plies(first, follow_up).ok_or_else(|| NotationError::InvalidMove(s.to_string()))
}

/// Formats a complete turn.
pub fn format_turn(turn: Turn) -> String {
    turn.plies().into_iter().map(format_move).collect()
}
