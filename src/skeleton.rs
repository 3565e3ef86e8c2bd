#![cfg(feature = "std")]

use anyhow::anyhow;
use log::{debug, info, warn};
use tokio::net::TcpListener;

use crate::core::{GameEngine, MoveError};
use crate::protocol::{GameApi, Message, PROTOCOL_VERSION};
use crate::transport::{is_disconnect, tcp::TcpTransport, Transport};

/// Host side of the protocol: serves one [`GameApi`] to one client.
pub struct Skeleton<E: GameApi, T: Transport> {
    engine: E,
    transport: T,
}

impl<E: GameApi, T: Transport> Skeleton<E, T> {
    pub fn new(engine: E, transport: T) -> Self {
        Self { engine, transport }
    }

    /// Hand back the served engine once the session is over.
    pub fn into_engine(self) -> E {
        self.engine
    }

    async fn handshake(&mut self) -> anyhow::Result<()> {
        match self.transport.recv().await? {
            Message::Handshake { version } if version == PROTOCOL_VERSION => {
                self.transport
                    .send(Message::HandshakeAck {
                        version: PROTOCOL_VERSION,
                    })
                    .await
            }
            Message::Handshake { version } => {
                // Tell the client which version we speak before hanging up.
                let _ = self
                    .transport
                    .send(Message::HandshakeAck {
                        version: PROTOCOL_VERSION,
                    })
                    .await;
                Err(anyhow!(
                    "Protocol version mismatch in Handshake: expected {}, got {}",
                    PROTOCOL_VERSION,
                    version
                ))
            }
            other => Err(anyhow!("Expected Handshake, got {:?}", other)),
        }
    }

    /// Answer requests until the client goes away.
    ///
    /// A clean hang-up ends the session with `Ok`. A frame that cannot be
    /// read (bad encoding, oversized, timed out) ends it with the error.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        self.handshake().await?;
        debug!("[Skeleton] handshake complete");

        loop {
            let msg = match self.transport.recv().await {
                Ok(msg) => msg,
                Err(e) if is_disconnect(&e) => {
                    debug!("[Skeleton] client disconnected: {}", e);
                    return Ok(());
                }
                Err(e) => {
                    warn!("[Skeleton] dropping client after bad read: {}", e);
                    return Err(e);
                }
            };
            let reply = self.dispatch(msg).await;
            self.transport.send(reply).await?;
        }
    }

    async fn dispatch(&mut self, msg: Message) -> Message {
        match msg {
            Message::NewGame { seq } => match self.engine.new_game().await {
                Ok(snapshot) => Message::State { seq, snapshot },
                Err(e) => failure(seq, e),
            },
            Message::GetBoardState { seq } => match self.engine.get_board_state().await {
                Ok(snapshot) => Message::State { seq, snapshot },
                Err(e) => failure(seq, e),
            },
            Message::GetValidMoves { seq } => match self.engine.get_valid_moves().await {
                Ok(moves) => Message::ValidMoves { seq, moves },
                Err(e) => failure(seq, e),
            },
            Message::MakeMove { seq, position } => {
                match self.engine.make_move(position).await {
                    Ok(snapshot) => Message::State { seq, snapshot },
                    Err(e) => match e.downcast_ref::<MoveError>() {
                        Some(err) => {
                            debug!("[Skeleton] rejected move {}: {}", position, err);
                            Message::Rejected {
                                seq,
                                reason: (*err).into(),
                            }
                        }
                        None => failure(seq, e),
                    },
                }
            }
            other => {
                warn!("[Skeleton] unexpected message from client: {:?}", other);
                Message::Failure {
                    seq: other.seq().unwrap_or(0),
                    message: "unexpected message".to_string(),
                }
            }
        }
    }
}

fn failure(seq: u64, err: anyhow::Error) -> Message {
    warn!("[Skeleton] request {} failed: {}", seq, err);
    Message::Failure {
        seq,
        message: err.to_string(),
    }
}

/// Accept clients forever, giving each connection its own fresh game.
pub async fn serve_tcp(listener: TcpListener) -> anyhow::Result<()> {
    loop {
        let (stream, addr) = listener.accept().await?;
        info!("Client connected from {}", addr);
        tokio::spawn(async move {
            let mut skeleton = Skeleton::new(GameEngine::new(), TcpTransport::new(stream));
            match skeleton.run().await {
                Ok(()) => info!("Client {} left", addr),
                Err(e) => warn!("Session with {} ended with an error: {}", addr, e),
            }
        });
    }
}
