//! Commonly used types and utilities for ease of import.

pub use crate::{Board, Cell, GameEngine, GameSnapshot, MoveError, Player, Position};

#[cfg(feature = "std")]
pub use crate::{FallbackApi, GameApi, Stub};

#[cfg(feature = "std")]
pub use crate::transport::{in_memory::InMemoryTransport, tcp::TcpTransport, Transport};
