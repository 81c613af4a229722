//! Flat integer buffer codec.
//!
//! Input layout: 42 cells in row-major order, row 0 on top, each `0`
//! (empty), `1` (Red, the engine's side) or `-1` (Yellow). Two more values
//! may follow: Red's stock, then Yellow's stock. The engine is always Red.
//!
//! Result layout:
//!
//! | Turn                  | Encoding            |
//! |-----------------------|---------------------|
//! | Drop                  | `[col]`             |
//! | Stock destroy         | `[-1, row, col]`    |
//! | Drop + bonus destroy  | `[col, row, col']`  |
//! | Pass                  | `[-1]`              |

use crate::board::{Board, Position, Side, Turn, CELL_COUNT, COLS, ROWS};
use crate::rules::Variant;

/// Column sentinel for a turn that does not drop a piece.
pub const NO_DROP: i32 = -1;

/// Length of a buffer carrying stocks.
pub const STOCK_BUFFER_LEN: usize = CELL_COUNT + 2;

/// Errors raised while decoding buffers.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("expected 42 or 44 values, got {0}")]
    WrongLength(usize),

    #[error("invalid cell value {value} at index {index}")]
    InvalidCell { index: usize, value: i32 },

    #[error("invalid stock value {0}")]
    InvalidStock(i32),

    #[error("piece at ({row}, {col}) floats over an empty cell")]
    FloatingPiece { row: usize, col: usize },

    #[error("unknown variant id {0}")]
    UnknownVariant(i32),

    #[error("negative depth {0}")]
    NegativeDepth(i32),

    #[error("malformed result {0:?}")]
    MalformedResult(Vec<i32>),
}

/// Decodes a board buffer into a position with Red to move.
///
/// Stocks are read only when `variant` uses them; a 44-value buffer is
/// accepted for the other variants and its stocks ignored.
pub fn decode_board(input: &[i32], variant: Variant) -> Result<Position, BufferError> {
    if input.len() != CELL_COUNT && input.len() != STOCK_BUFFER_LEN {
        return Err(BufferError::WrongLength(input.len()));
    }

    let mut board = Board::empty();
    for (index, &value) in input[..CELL_COUNT].iter().enumerate() {
        board.cells[index] = match value {
            0 => None,
            v => Some(
                Side::from_buffer_value(v).ok_or(BufferError::InvalidCell { index, value })?,
            ),
        };
    }

    if let Some((row, col)) = board.floating_piece() {
        return Err(BufferError::FloatingPiece { row, col });
    }

    if variant.uses_stock() && input.len() == STOCK_BUFFER_LEN {
        board.stock[Side::Red as usize] = parse_stock(input[CELL_COUNT])?;
        board.stock[Side::Yellow as usize] = parse_stock(input[CELL_COUNT + 1])?;
    }

    Ok(Position::new(board, Side::Red))
}

fn parse_stock(value: i32) -> Result<u32, BufferError> {
    u32::try_from(value).map_err(|_| BufferError::InvalidStock(value))
}

/// Encodes a board as 44 values: cells then both stocks.
pub fn encode_board(board: &Board) -> Vec<i32> {
    let mut out = Vec::with_capacity(STOCK_BUFFER_LEN);
    out.extend(
        board
            .cells
            .iter()
            .map(|cell| cell.map_or(0, Side::buffer_value)),
    );
    for side in [Side::Red, Side::Yellow] {
        out.push(i32::try_from(board.stock(side)).unwrap_or(i32::MAX));
    }
    out
}

/// Maps a numeric variant selector, rejecting unknown ids.
pub fn parse_variant_id(id: i32) -> Result<Variant, BufferError> {
    Variant::from_id(id).ok_or(BufferError::UnknownVariant(id))
}

/// Validates a search depth.
pub fn parse_depth(depth: i32) -> Result<u32, BufferError> {
    u32::try_from(depth).map_err(|_| BufferError::NegativeDepth(depth))
}

/// Writes `turn` into `out`, replacing its contents.
pub fn encode_turn(turn: Turn, out: &mut Vec<i32>) {
    out.clear();
    match turn {
        Turn::Drop { col } => out.push(col as i32),
        Turn::Destroy { row, col } => out.extend([NO_DROP, row as i32, col as i32]),
        Turn::DropDestroy {
            col,
            target_row,
            target_col,
        } => out.extend([col as i32, target_row as i32, target_col as i32]),
        Turn::Pass => out.push(NO_DROP),
    }
}

/// Decodes an engine result back into a turn.
pub fn decode_result(result: &[i32]) -> Result<Turn, BufferError> {
    let malformed = || BufferError::MalformedResult(result.to_vec());
    let column = |v: i32| usize::try_from(v).ok().filter(|&c| c < COLS);
    let row = |v: i32| usize::try_from(v).ok().filter(|&r| r < ROWS);

    match *result {
        [NO_DROP] => Ok(Turn::Pass),
        [col] => column(col).map(|col| Turn::Drop { col }).ok_or_else(malformed),
        [NO_DROP, r, c] => match (row(r), column(c)) {
            (Some(row), Some(col)) => Ok(Turn::Destroy { row, col }),
            _ => Err(malformed()),
        },
        [col, r, c] => match (column(col), row(r), column(c)) {
            (Some(col), Some(target_row), Some(target_col)) => Ok(Turn::DropDestroy {
                col,
                target_row,
                target_col,
            }),
            _ => Err(malformed()),
        },
        _ => Err(malformed()),
    }
}
