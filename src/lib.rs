#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod controller;
pub mod core;
#[cfg(feature = "std")]
pub mod cli;
#[cfg(feature = "std")]
pub mod fallback;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod protocol;
#[cfg(feature = "std")]
pub mod skeleton;
#[cfg(feature = "std")]
pub mod stub;
#[cfg(feature = "std")]
pub mod transport;

pub mod prelude;

pub use crate::core::*;
pub use controller::{Command, Controller, RandomController};

#[cfg(feature = "std")]
pub use cli::{run_session, SessionSummary};
#[cfg(feature = "std")]
pub use controller::CliController;
#[cfg(feature = "std")]
pub use fallback::FallbackApi;
#[cfg(feature = "std")]
pub use logging::{init_logging, LOG_ENV};
#[cfg(feature = "std")]
pub use protocol::{GameApi, Message, MoveRejection, PROTOCOL_VERSION};
#[cfg(feature = "std")]
pub use skeleton::{serve_tcp, Skeleton};
#[cfg(feature = "std")]
pub use stub::Stub;
#[cfg(feature = "std")]
pub use transport::{in_memory::InMemoryTransport, tcp::TcpTransport, Transport};
