//! Sources of moves for a game session.
//!
//! - CliController: a person typing coordinates at the terminal
//! - RandomController: uniform pick among legal moves, for self-play runs

use rand::rngs::SmallRng;

use crate::core::{GameSnapshot, MoveError, Position};

/// What the session should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play(Position),
    NewGame,
    Quit,
}

/// Decides moves for whichever side is to move.
pub trait Controller: Send {
    /// Choose the next command. `valid_moves` is never empty while the game
    /// is running.
    fn select_command(
        &mut self,
        rng: &mut SmallRng,
        snapshot: &GameSnapshot,
        valid_moves: &[Position],
    ) -> Command;

    /// Inform the controller its last move was refused.
    fn handle_rejection(&mut self, _position: Position, _err: &MoveError) {}
}

pub mod random;
pub use random::RandomController;

#[cfg(feature = "std")]
pub mod cli;
#[cfg(feature = "std")]
pub use cli::CliController;
