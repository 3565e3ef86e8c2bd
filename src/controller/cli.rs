#![cfg(feature = "std")]

use std::io::{self, BufRead, Write};

use rand::rngs::SmallRng;

use super::{Command, Controller};
use crate::cli::interface::{coord_to_string, parse_coord};
use crate::core::{GameSnapshot, MoveError, Position};

/// Reads commands from a line-oriented input. Defaults to stdin.
pub struct CliController<R = io::BufReader<io::Stdin>> {
    input: R,
}

impl CliController {
    pub fn new() -> Self {
        Self {
            input: io::BufReader::new(io::stdin()),
        }
    }
}

impl Default for CliController {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: BufRead> CliController<R> {
    /// Read commands from `input` instead of stdin.
    pub fn with_input(input: R) -> Self {
        Self { input }
    }
}

/// Interpret one input line. `Ok(None)` means the line asked for help.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.eq_ignore_ascii_case("help") || line == "?" {
        return Ok(None);
    }
    if line.eq_ignore_ascii_case("new") {
        return Ok(Some(Command::NewGame));
    }
    if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("q") {
        return Ok(Some(Command::Quit));
    }
    parse_coord(line).map(|pos| Some(Command::Play(pos)))
}

fn print_help() {
    println!();
    println!("Commands:");
    println!("  <COLUMN><ROW>  place a piece, e.g. B1 or d3");
    println!("  new            start a new game");
    println!("  quit           leave");
    println!("Columns are A-D from the left, rows 1-4 from the top.");
    println!("Cells marked * are legal for the side to move.");
}

impl<R: BufRead + Send> Controller for CliController<R> {
    fn select_command(
        &mut self,
        _rng: &mut SmallRng,
        snapshot: &GameSnapshot,
        valid_moves: &[Position],
    ) -> Command {
        let hint: Vec<String> = valid_moves.iter().map(|&p| coord_to_string(p)).collect();
        loop {
            print!(
                "\n{} to move [{}] (or 'help'): ",
                snapshot.current_turn,
                hint.join(" ")
            );
            let _ = io::stdout().flush();
            let mut line = String::new();
            match self.input.read_line(&mut line) {
                // End of input leaves the session.
                Ok(0) | Err(_) => return Command::Quit,
                Ok(_) => {}
            }
            match parse_command(&line) {
                Ok(Some(command)) => return command,
                Ok(None) => print_help(),
                Err(e) => println!("✗ Invalid input: {}", e),
            }
        }
    }

    fn handle_rejection(&mut self, position: Position, err: &MoveError) {
        println!("✗ {} is not a legal move: {}", coord_to_string(position), err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameEngine;
    use rand::SeedableRng;

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("new"), Ok(Some(Command::NewGame)));
        assert_eq!(parse_command("Q"), Ok(Some(Command::Quit)));
        assert_eq!(parse_command("help"), Ok(None));
        assert_eq!(
            parse_command("b1\n"),
            Ok(Some(Command::Play(Position::new(0, 1))))
        );
        assert!(parse_command("z9").is_err());
    }

    #[test]
    fn test_reads_until_valid_command() {
        let input = io::Cursor::new("nonsense\nhelp\nA2\n");
        let mut controller = CliController::with_input(input);
        let mut rng = SmallRng::seed_from_u64(0);
        let engine = GameEngine::new();
        let command =
            controller.select_command(&mut rng, &engine.snapshot(), &engine.valid_moves());
        assert_eq!(command, Command::Play(Position::new(1, 0)));
    }

    #[test]
    fn test_end_of_input_quits() {
        let mut controller = CliController::with_input(io::Cursor::new(""));
        let mut rng = SmallRng::seed_from_u64(0);
        let engine = GameEngine::new();
        let command =
            controller.select_command(&mut rng, &engine.snapshot(), &engine.valid_moves());
        assert_eq!(command, Command::Quit);
    }
}
