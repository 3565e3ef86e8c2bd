use rand::rngs::SmallRng;
use rand::Rng;

use super::{Command, Controller};
use crate::core::{GameSnapshot, Position};

/// Plays a uniformly random legal move. Quits if asked to move with no
/// legal moves.
#[derive(Debug, Default)]
pub struct RandomController;

impl RandomController {
    pub fn new() -> Self {
        Self
    }
}

impl Controller for RandomController {
    fn select_command(
        &mut self,
        rng: &mut SmallRng,
        _snapshot: &GameSnapshot,
        valid_moves: &[Position],
    ) -> Command {
        if valid_moves.is_empty() {
            return Command::Quit;
        }
        Command::Play(valid_moves[rng.random_range(0..valid_moves.len())])
    }
}
