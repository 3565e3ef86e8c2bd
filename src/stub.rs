#![cfg(feature = "std")]

use anyhow::anyhow;
use log::debug;

use crate::core::{GameSnapshot, MoveError, Position};
use crate::protocol::{GameApi, Message, PROTOCOL_VERSION};
use crate::transport::Transport;

/// Client side of the protocol: a [`GameApi`] backed by a remote host.
pub struct Stub<T: Transport> {
    transport: T,
    next_seq: u64,
    handshaken: bool,
}

impl<T: Transport> Stub<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            next_seq: 0,
            handshaken: false,
        }
    }

    async fn ensure_handshake(&mut self) -> anyhow::Result<()> {
        if self.handshaken {
            return Ok(());
        }
        self.transport
            .send(Message::Handshake {
                version: PROTOCOL_VERSION,
            })
            .await?;
        match self.transport.recv().await? {
            Message::HandshakeAck { version } if version == PROTOCOL_VERSION => {
                self.handshaken = true;
                debug!("[Stub] handshake complete");
                Ok(())
            }
            Message::HandshakeAck { version } => Err(anyhow!(
                "Protocol version mismatch in HandshakeAck: expected {}, got {}",
                PROTOCOL_VERSION,
                version
            )),
            other => Err(anyhow!("Expected HandshakeAck, got {:?}", other)),
        }
    }

    /// Send one request and wait for the reply carrying the same sequence
    /// number.
    ///
    /// Replies to earlier requests that were abandoned (for example after a
    /// receive timeout) are discarded on the way.
    async fn request(
        &mut self,
        build: impl FnOnce(u64) -> Message + Send,
    ) -> anyhow::Result<Message> {
        self.ensure_handshake().await?;
        let seq = self.next_seq;
        self.next_seq += 1;
        self.transport.send(build(seq)).await?;
        loop {
            let reply = self.transport.recv().await?;
            match reply.seq() {
                Some(s) if s == seq => return Ok(reply),
                Some(s) if s < seq => debug!("[Stub] discarding stale reply {}", s),
                Some(s) => {
                    return Err(anyhow!("Sequence mismatch: expected {}, got {}", seq, s))
                }
                None => return Err(anyhow!("Unexpected reply: {:?}", reply)),
            }
        }
    }
}

fn expect_state(reply: Message) -> anyhow::Result<GameSnapshot> {
    match reply {
        Message::State { snapshot, .. } => Ok(snapshot),
        Message::Rejected { reason, .. } => Err(anyhow::Error::new(MoveError::from(reason))),
        Message::Failure { message, .. } => Err(anyhow!("Host error: {}", message)),
        other => Err(anyhow!("Unexpected reply: {:?}", other)),
    }
}

#[async_trait::async_trait]
impl<T: Transport> GameApi for Stub<T> {
    async fn new_game(&mut self) -> anyhow::Result<GameSnapshot> {
        let reply = self.request(|seq| Message::NewGame { seq }).await?;
        expect_state(reply)
    }

    async fn get_board_state(&mut self) -> anyhow::Result<GameSnapshot> {
        let reply = self.request(|seq| Message::GetBoardState { seq }).await?;
        expect_state(reply)
    }

    async fn get_valid_moves(&mut self) -> anyhow::Result<Vec<Position>> {
        match self.request(|seq| Message::GetValidMoves { seq }).await? {
            Message::ValidMoves { moves, .. } => Ok(moves),
            Message::Failure { message, .. } => Err(anyhow!("Host error: {}", message)),
            other => Err(anyhow!("Unexpected reply: {:?}", other)),
        }
    }

    async fn make_move(&mut self, position: Position) -> anyhow::Result<GameSnapshot> {
        let reply = self
            .request(|seq| Message::MakeMove { seq, position })
            .await?;
        expect_state(reply)
    }
}
