#![cfg(feature = "std")]

use log::{info, warn};

use crate::core::{GameEngine, GameSnapshot, MoveError, Position};
use crate::protocol::GameApi;

enum Backend<R> {
    Remote(R),
    Local(GameEngine),
}

/// A [`GameApi`] that plays through a remote host while it answers and
/// switches to an in-process engine as soon as it does not.
///
/// A rejected move is not a host failure: it is returned to the caller and
/// the remote stays in use. After a switch the local engine continues from
/// the last snapshot the host reported, or from a fresh game if none was
/// seen. There is no switching back.
pub struct FallbackApi<R: GameApi> {
    backend: Backend<R>,
    last_seen: Option<GameSnapshot>,
}

impl<R: GameApi> FallbackApi<R> {
    pub fn new(remote: R) -> Self {
        Self {
            backend: Backend::Remote(remote),
            last_seen: None,
        }
    }

    /// Start directly on a local engine, for when the host could not be
    /// reached at all.
    pub fn offline() -> Self {
        Self {
            backend: Backend::Local(GameEngine::new()),
            last_seen: None,
        }
    }

    /// Whether calls are currently served by the local engine.
    pub fn is_offline(&self) -> bool {
        matches!(self.backend, Backend::Local(_))
    }

    fn go_offline(&mut self, err: &anyhow::Error) -> &mut GameEngine {
        warn!("Host unavailable ({}); continuing on the local engine", err);
        let engine = match self.last_seen {
            Some(snapshot) => GameEngine::from_snapshot(snapshot),
            None => GameEngine::new(),
        };
        self.backend = Backend::Local(engine);
        match &mut self.backend {
            Backend::Local(engine) => engine,
            Backend::Remote(_) => unreachable!("backend was just set to local"),
        }
    }

    fn record(&mut self, result: anyhow::Result<GameSnapshot>) -> anyhow::Result<GameSnapshot> {
        if let Ok(snapshot) = &result {
            self.last_seen = Some(*snapshot);
        }
        result
    }
}

fn is_rule_rejection(err: &anyhow::Error) -> bool {
    err.downcast_ref::<MoveError>().is_some()
}

#[async_trait::async_trait]
impl<R: GameApi> GameApi for FallbackApi<R> {
    async fn new_game(&mut self) -> anyhow::Result<GameSnapshot> {
        let result = match &mut self.backend {
            Backend::Remote(remote) => match remote.new_game().await {
                Ok(snapshot) => Ok(snapshot),
                Err(e) => {
                    self.last_seen = None;
                    self.go_offline(&e).new_game().await
                }
            },
            Backend::Local(engine) => engine.new_game().await,
        };
        self.record(result)
    }

    async fn get_board_state(&mut self) -> anyhow::Result<GameSnapshot> {
        let result = match &mut self.backend {
            Backend::Remote(remote) => match remote.get_board_state().await {
                Ok(snapshot) => Ok(snapshot),
                Err(e) => self.go_offline(&e).get_board_state().await,
            },
            Backend::Local(engine) => engine.get_board_state().await,
        };
        self.record(result)
    }

    async fn get_valid_moves(&mut self) -> anyhow::Result<Vec<Position>> {
        match &mut self.backend {
            Backend::Remote(remote) => match remote.get_valid_moves().await {
                Ok(moves) => Ok(moves),
                Err(e) => self.go_offline(&e).get_valid_moves().await,
            },
            Backend::Local(engine) => engine.get_valid_moves().await,
        }
    }

    async fn make_move(&mut self, position: Position) -> anyhow::Result<GameSnapshot> {
        let result = match &mut self.backend {
            Backend::Remote(remote) => match remote.make_move(position).await {
                Ok(snapshot) => Ok(snapshot),
                Err(e) if is_rule_rejection(&e) => Err(e),
                Err(e) => {
                    info!("Retrying move {} locally", position);
                    GameApi::make_move(self.go_offline(&e), position).await
                }
            },
            Backend::Local(engine) => GameApi::make_move(engine, position).await,
        };
        self.record(result)
    }
}
