//! The [`GameRegistry`]: a two-way map between connections and games.

use std::collections::HashMap;
use std::fmt;

use sidewinder_store::GameId;

/// Opaque identifier for a live connection.
///
/// Assigned by the transport when a socket is accepted. A newtype rather
/// than a bare `u64` so connection ids and game ids can't be swapped in
/// a call without the compiler noticing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Creates a `ConnectionId` from a raw `u64`.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying `u64` value.
    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Tracks which connections are playing in which game.
///
/// Two maps, kept in sync by construction: connection → game, and game →
/// the ordered pair of connections registered for it. The pair order is
/// meaningful — the first entry is the first player, who moves on
/// even-indexed turns. Symmetry invariant: a connection maps to a game
/// exactly when that game's pair contains the connection.
///
/// # Concurrency note
///
/// `GameRegistry` is NOT thread-safe by itself — plain `HashMap`s, no
/// interior locking. The matchmaker owns the only instance and guards it
/// (together with the waiting slot) behind one mutex, so pairing and
/// teardown can't interleave. Keeping the registry lock-free avoids a
/// second lock order to reason about.
#[derive(Debug, Default)]
pub struct GameRegistry {
    /// Which game each connection is in. A connection joins at most one.
    game_by_connection: HashMap<ConnectionId, GameId>,

    /// The (first player, second player) pair for each live game.
    connections_by_game: HashMap<GameId, (ConnectionId, ConnectionId)>,
}

impl GameRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new game between two connections.
    ///
    /// Any prior membership of either connection is removed first, so
    /// re-pairing after a finished game (rematch) needs no separate
    /// cleanup call. `first` becomes the first player.
    pub fn new_game(&mut self, game: GameId, first: ConnectionId, second: ConnectionId) {
        self.remove(first);
        self.remove(second);
        self.game_by_connection.insert(first, game);
        self.game_by_connection.insert(second, game);
        self.connections_by_game.insert(game, (first, second));
        tracing::info!(%game, %first, %second, "game registered");
    }

    /// Returns the game a connection is playing in, if any.
    pub fn game_of(&self, conn: ConnectionId) -> Option<GameId> {
        self.game_by_connection.get(&conn).copied()
    }

    /// Returns whether `conn` is the first player of its game, and which
    /// game that is.
    pub fn seat_of(&self, conn: ConnectionId) -> Option<(bool, GameId)> {
        let game = self.game_of(conn)?;
        let (first, _) = self.peers_of(game)?;
        Some((first == conn, game))
    }

    /// Returns the (first, second) connection pair of a game, if the
    /// game still has live connections registered.
    pub fn peers_of(&self, game: GameId) -> Option<(ConnectionId, ConnectionId)> {
        self.connections_by_game.get(&game).copied()
    }

    /// Removes a connection's pairing — and with it the whole game entry,
    /// including the peer's membership. A session without both sides is
    /// not playable, so teardown is all-or-nothing.
    ///
    /// Unknown connections are ignored.
    pub fn remove(&mut self, conn: ConnectionId) {
        let Some(game) = self.game_by_connection.remove(&conn) else {
            return;
        };
        if let Some((first, second)) = self.connections_by_game.remove(&game) {
            self.game_by_connection.remove(&first);
            self.game_by_connection.remove(&second);
        }
        tracing::info!(%game, %conn, "game unregistered");
    }

    /// Returns the number of games with registered connections.
    pub fn len(&self) -> usize {
        self.connections_by_game.len()
    }

    /// Returns `true` if no games are registered.
    pub fn is_empty(&self) -> bool {
        self.connections_by_game.is_empty()
    }
}

// =========================================================================
// Tests
// =========================================================================
