//! Core 4×4 Reversi rules engine (no_std compatible)
//!
//! This module holds the pure game logic: board, flip rule, turn passing and
//! game-over detection. It allocates only for the legal-move list and does
//! no I/O, so it can be hosted in-process or behind a transport.

pub mod bitboard;
pub mod board;
pub mod common;
pub mod config;
pub mod game;
pub mod player;

pub use bitboard::{BitBoard, BitBoardError};
pub use board::{Board, Cell, Position};
pub use common::{CellMask, MoveError, MoveOutcome};
pub use config::*;
pub use game::{GameEngine, GameSnapshot, Scores};
pub use player::Player;
