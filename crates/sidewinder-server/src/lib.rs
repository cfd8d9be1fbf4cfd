//! # Sidewinder server
//!
//! The network-facing half of Sidewinder: accept WebSocket connections,
//! pair them into games, route their moves through the arbiter, and fan
//! the outcomes back out.
//!
//! ## Architecture
//!
//! One task per connection, one writer task per connection, one shared
//! matchmaker behind a mutex:
//!
//! ```text
//!           accept loop (Server::run)
//!                 │ spawn per socket
//!                 ▼
//!  read loop ──→ Matchmaker (mutex) ──→ per-connection channels
//!    │               │      │                  │
//!    │            registry  arbiter ──→ move log (append-only)
//!    ▼                                         ▼
//!  socket in                              writer task → socket out
//! ```
//!
//! The matchmaker decides *who hears what* and pushes typed messages into
//! each connection's unbounded channel; the writer tasks serialize and
//! transmit. No board state lives in memory between moves — every
//! submission re-derives it from the move log.

mod error;
mod handler;
mod matchmaker;
mod server;
mod transport;

pub use error::{ServerError, TransportError};
pub use matchmaker::{Matchmaker, OutboundSender};
pub use server::{Server, ServerBuilder};
pub use transport::{
    WebSocketConnection, WebSocketListener, WebSocketReceiver, WebSocketSender,
};
