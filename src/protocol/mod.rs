//! Command set of the engine and the messages that carry it over a transport.

#![cfg(feature = "std")]

pub mod domain;

use crate::core::{GameSnapshot, Position};
pub use domain::MoveRejection;

/// Version exchanged in the handshake. Peers with different versions refuse
/// to talk.
pub const PROTOCOL_VERSION: u32 = 1;

/// The operations a host exposes for one game.
///
/// Implemented by [`crate::GameEngine`] for in-process play, by
/// [`crate::Stub`] for a remote host and by [`crate::FallbackApi`] for a
/// remote host backed by a local engine. An illegal `make_move` fails with a
/// [`crate::MoveError`] that callers can recover with
/// `err.downcast_ref::<MoveError>()`; any other error means the host itself
/// could not be reached.
#[async_trait::async_trait]
pub trait GameApi: Send {
    /// Discard the current game and start a fresh one.
    async fn new_game(&mut self) -> anyhow::Result<GameSnapshot>;
    async fn get_board_state(&mut self) -> anyhow::Result<GameSnapshot>;
    /// Legal targets for the side to move, row-major.
    async fn get_valid_moves(&mut self) -> anyhow::Result<Vec<Position>>;
    async fn make_move(&mut self, position: Position) -> anyhow::Result<GameSnapshot>;
}

/// Messages exchanged between a host and a client.
///
/// Every request carries a `seq` that its reply echoes.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Message {
    /// Opening message from the client.
    Handshake { version: u32 },
    /// Host reply to [`Message::Handshake`].
    HandshakeAck { version: u32 },
    NewGame { seq: u64 },
    GetBoardState { seq: u64 },
    GetValidMoves { seq: u64 },
    MakeMove { seq: u64, position: Position },
    /// Reply carrying the game state after a request.
    State { seq: u64, snapshot: GameSnapshot },
    /// Reply to [`Message::GetValidMoves`].
    ValidMoves { seq: u64, moves: Vec<Position> },
    /// Reply to a [`Message::MakeMove`] the rules refused.
    Rejected { seq: u64, reason: MoveRejection },
    /// Request the host could not serve.
    Failure { seq: u64, message: String },
}

impl Message {
    /// Sequence number of a request or reply; `None` for handshake frames.
    pub fn seq(&self) -> Option<u64> {
        match self {
            Message::Handshake { .. } | Message::HandshakeAck { .. } => None,
            Message::NewGame { seq }
            | Message::GetBoardState { seq }
            | Message::GetValidMoves { seq }
            | Message::MakeMove { seq, .. }
            | Message::State { seq, .. }
            | Message::ValidMoves { seq, .. }
            | Message::Rejected { seq, .. }
            | Message::Failure { seq, .. } => Some(*seq),
        }
    }
}
