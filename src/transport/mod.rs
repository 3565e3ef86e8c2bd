//! Message transports between a host and its clients.

#![cfg(feature = "std")]

use core::fmt;

use crate::protocol::Message;

/// The peer went away. Transports return this, wrapped in `anyhow`, so a
/// clean hang-up can be told apart from a broken or late frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Disconnected(pub &'static str);

impl fmt::Display for Disconnected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl std::error::Error for Disconnected {}

/// Whether `err` means the peer hung up rather than misbehaved.
pub fn is_disconnect(err: &anyhow::Error) -> bool {
    err.downcast_ref::<Disconnected>().is_some()
}

/// A bidirectional, ordered message channel.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()>;
    async fn recv(&mut self) -> anyhow::Result<Message>;
}

pub mod in_memory;
pub mod tcp;
