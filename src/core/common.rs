//! Move rejection reasons and per-move results.

use super::bitboard::BitBoard;
use super::config::BOARD_SIZE;
use super::player::Player;

/// Set of board cells, bit `row * 4 + col`.
pub type CellMask = BitBoard<u16, { BOARD_SIZE as usize }>;

/// Why a move was refused. The engine is left untouched in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// Row or column outside the board.
    OutOfBounds { row: usize, col: usize },
    /// Target cell already holds a piece.
    Occupied { row: usize, col: usize },
    /// No direction from the target flanks an opponent run.
    NoFlips { row: usize, col: usize },
}

impl core::fmt::Display for MoveError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MoveError::OutOfBounds { row, col } => {
                write!(f, "Illegal move: ({}, {}) is off the board", row, col)
            }
            MoveError::Occupied { row, col } => {
                write!(f, "Illegal move: ({}, {}) is already occupied", row, col)
            }
            MoveError::NoFlips { row, col } => {
                write!(f, "Illegal move: ({}, {}) flips no pieces", row, col)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MoveError {}

/// What a successful move did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Side that played the move.
    pub mover: Player,
    /// Cells whose pieces changed colour.
    pub flipped: CellMask,
    /// The opponent had no reply and forfeited its turn.
    pub opponent_skipped: bool,
    /// Neither side can move any more.
    pub game_over: bool,
}
