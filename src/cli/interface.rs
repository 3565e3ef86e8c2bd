//! Text rendering of game state for the terminal.

#![cfg(feature = "std")]

use std::fmt::Write;

use crate::core::{Board, Cell, GameSnapshot, Player, Position, BOARD_SIZE};

/// Coordinate label used on screen, column letter then 1-based row (`B3`).
pub fn coord_to_string(pos: Position) -> String {
    let col = (b'A' + pos.col as u8) as char;
    format!("{}{}", col, pos.row + 1)
}

/// Parse a screen coordinate such as `B3` or `b3`.
pub fn parse_coord(input: &str) -> Result<Position, String> {
    let size = BOARD_SIZE as usize;
    let mut chars = input.trim().chars();
    let col_ch = chars
        .next()
        .ok_or("Empty input")?
        .to_ascii_uppercase();
    if !col_ch.is_ascii_alphabetic() {
        return Err(format!("Invalid column '{}' - must be a letter A-D", col_ch));
    }
    let col = (col_ch as u8 - b'A') as usize;
    if col >= size {
        return Err(format!("Column '{}' out of bounds - must be A-D", col_ch));
    }
    let row_str: String = chars.collect();
    let row: usize = row_str
        .parse()
        .map_err(|_| format!("Invalid row '{}' - must be a number 1-4", row_str))?;
    if row == 0 || row > size {
        return Err(format!("Row {} out of bounds - must be 1-4", row));
    }
    Ok(Position::new(row - 1, col))
}

/// Draw the grid. Legal targets for the side to move are marked `*`.
pub fn render_board(board: &Board, valid_moves: &[Position]) -> String {
    let mut out = String::new();
    out.push_str("    A B C D\n");
    for (r, row) in board.rows().iter().enumerate() {
        let _ = write!(out, "  {}", r + 1);
        for (c, cell) in row.iter().enumerate() {
            let ch = match cell {
                Cell::Black => 'X',
                Cell::White => 'O',
                Cell::Empty if valid_moves.contains(&Position::new(r, c)) => '*',
                Cell::Empty => '.',
            };
            let _ = write!(out, " {}", ch);
        }
        out.push('\n');
    }
    out.push_str("  Legend: X=Black  O=White  *=legal move");
    out
}

/// Score line plus whose turn it is, or the result once the game is over.
pub fn status_line(snapshot: &GameSnapshot) -> String {
    let scores = format!(
        "Black {} - {} White",
        snapshot.black_score, snapshot.white_score
    );
    if snapshot.game_over {
        format!("{} | {}", scores, result_line(snapshot))
    } else {
        format!("{} | {} to move", scores, snapshot.current_turn)
    }
}

/// Final verdict, decided by score alone.
pub fn result_line(snapshot: &GameSnapshot) -> String {
    match snapshot.leader() {
        Some(player) => format!("Game over! {} wins!", player),
        None => "Game over! It's a tie!".to_string(),
    }
}

/// The side whose turn was skipped between two consecutive snapshots, if any.
///
/// After a move the turn should alternate; if `next` still has the same side
/// to move as `previous`, the other side had no legal move. Nothing is
/// reported once the game is over.
pub fn skipped_player(previous: &GameSnapshot, next: &GameSnapshot) -> Option<Player> {
    if next.game_over {
        return None;
    }
    let expected = previous.current_turn.opponent();
    (next.current_turn != expected).then_some(expected)
}
