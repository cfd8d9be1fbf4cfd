//! Wire protocol for Sidewinder.
//!
//! This crate defines the "language" spoken over a connection:
//!
//! - **Inbound** ([`ClientMessage`]) — a deliberately tiny text protocol.
//!   A client sends either `new` (rematch request) or `<player>:<x>,<y>`
//!   (move submission), e.g. `1:0,3`.
//! - **Outbound** ([`ServerMessage`]) — JSON objects with fixed shapes
//!   the browser client pattern-matches on: `{"state":"ready"}`,
//!   `{"player":1,"validTiles":[...]}`, move broadcasts, win/draw flags,
//!   and `{"error":"..."}`.
//! - **Errors** ([`ProtocolError`]) — what can go wrong turning text into
//!   messages and back.
//!
//! The protocol layer knows nothing about connections, sessions, or game
//! rules; it only converts between text and typed messages. It sits
//! between the transport (raw frames) and the matchmaker (who to tell
//! what):
//!
//! ```text
//! Transport (text frames) → Protocol (typed messages) → Matchmaker
//! ```

mod error;
mod types;

pub use error::ProtocolError;
pub use types::{ClientMessage, GENERIC_ERROR, ServerMessage, SessionStatus};
