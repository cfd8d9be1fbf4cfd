//! In-memory [`MoveLog`] implementation.

use std::collections::HashMap;

use sidewinder_board::Tile;
use tokio::sync::Mutex;

use crate::{GameId, MoveLog, MoveRecord, UniqueViolation};

/// An in-process move log backed by a mutex-guarded map of per-game
/// vectors.
///
/// The uniqueness check and the append happen under one lock acquisition,
/// which is what makes the (game, tile) constraint atomic here; a
/// database-backed implementation gets the same property from a unique
/// index instead.
pub struct MemoryMoveLog {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    /// Last id handed out; 0 means none yet, so real ids start at 1.
    last_game: u64,
    games: HashMap<GameId, Vec<MoveRecord>>,
}

impl MemoryMoveLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
        }
    }
}

impl Default for MemoryMoveLog {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveLog for MemoryMoveLog {
    async fn create_session(&self) -> GameId {
        let mut inner = self.inner.lock().await;
        inner.last_game += 1;
        let game = GameId(inner.last_game);
        inner.games.insert(game, Vec::new());
        tracing::debug!(%game, "game log created");
        game
    }

    async fn append(&self, game: GameId, tile: Tile) -> Result<MoveRecord, UniqueViolation> {
        let mut inner = self.inner.lock().await;
        let log = inner.games.entry(game).or_default();
        if log.iter().any(|record| record.tile == tile) {
            return Err(UniqueViolation { game, tile });
        }
        let record = MoveRecord { game, tile };
        log.push(record);
        Ok(record)
    }

    async fn list_ordered(&self, game: GameId) -> Vec<MoveRecord> {
        self.inner
            .lock()
            .await
            .games
            .get(&game)
            .cloned()
            .unwrap_or_default()
    }
}

// =========================================================================
// Tests
// =========================================================================
