//! Session registry for Sidewinder.
//!
//! This crate tracks which live connections belong to which game. It is
//! the only owner of that association: the matchmaker asks it who plays
//! whom, the broadcaster asks it who should hear a message, and
//! disconnect handling tells it to forget a pairing.
//!
//! # How it fits in the stack
//!
//! ```text
//! Matchmaker (above)  ← pairs connections, routes moves, fans out messages
//!     ↕
//! Registry (this crate)  ← connection ↔ game mapping, nothing else
//!     ↕
//! Move log (below)  ← per-game history, owned elsewhere
//! ```
//!
//! The registry holds ids only — no sockets, no channels, no game state —
//! so tearing down a pairing never races a send and never leaks a
//! connection handle.

mod registry;

pub use registry::{ConnectionId, GameRegistry};
