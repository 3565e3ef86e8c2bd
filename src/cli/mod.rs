//! Terminal presentation layer
//!
//! This module drives a game through any [`GameApi`]:
//! - Interface functions for rendering the board, status and notices
//! - The session loop that forwards controller input as API calls

#![cfg(feature = "std")]

pub mod interface;

pub use interface::*;

use std::io::Write;

use log::debug;
use rand::rngs::SmallRng;

use crate::controller::{Command, Controller};
use crate::core::{GameSnapshot, MoveError};
use crate::protocol::GameApi;

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub final_state: GameSnapshot,
    /// Successful moves in the last game played.
    pub moves_played: usize,
    /// Turns forfeited in the last game played.
    pub skipped_turns: usize,
    /// The last game reached game over (rather than the player quitting).
    pub finished: bool,
}

/// Play until the game ends or the controller quits.
///
/// The board is only ever read back from `api`; the session never edits it.
/// Rejected moves are reported to the controller and play continues. Any
/// other API error ends the session.
pub async fn run_session<W: Write + Send>(
    api: &mut dyn GameApi,
    controller: &mut dyn Controller,
    rng: &mut SmallRng,
    out: &mut W,
) -> anyhow::Result<SessionSummary> {
    let mut snapshot = api.get_board_state().await?;
    let mut moves_played = 0;
    let mut skipped_turns = 0;

    let finished = loop {
        let valid_moves = api.get_valid_moves().await?;
        writeln!(out, "\n{}", render_board(&snapshot.board, &valid_moves))?;
        writeln!(out, "{}", status_line(&snapshot))?;
        if snapshot.game_over {
            break true;
        }

        match controller.select_command(rng, &snapshot, &valid_moves) {
            Command::Quit => break false,
            Command::NewGame => {
                snapshot = api.new_game().await?;
                moves_played = 0;
                skipped_turns = 0;
                writeln!(out, "\nNew game started.")?;
            }
            Command::Play(position) => match api.make_move(position).await {
                Ok(next) => {
                    moves_played += 1;
                    writeln!(
                        out,
                        "{} played {}",
                        snapshot.current_turn,
                        coord_to_string(position)
                    )?;
                    if let Some(player) = skipped_player(&snapshot, &next) {
                        skipped_turns += 1;
                        writeln!(out, "{}'s turn was skipped (no valid moves)", player)?;
                    }
                    snapshot = next;
                }
                Err(e) => match e.downcast_ref::<MoveError>() {
                    Some(err) => {
                        debug!("move {} rejected: {}", position, err);
                        controller.handle_rejection(position, err);
                    }
                    None => return Err(e),
                },
            },
        }
    };

    Ok(SessionSummary {
        final_state: snapshot,
        moves_played,
        skipped_turns,
        finished,
    })
}
