//! The matchmaker/broadcaster: pairs connections into games, routes
//! their messages, and fans outcomes back out.
//!
//! There is exactly one [`Matchmaker`] per server, guarded by one mutex.
//! That single lock is what keeps the interesting interleavings out:
//! two simultaneous connects can't both claim the waiting slot, and a
//! pairing can't interleave with the teardown of one of its sides. The
//! one race the lock does not cover — two moves in one game validated
//! against the same frontier — is resolved downstream by the move log's
//! uniqueness constraint.
//!
//! Delivery is indirect: the matchmaker never touches a socket. Each
//! connection registers an unbounded channel to its writer task, and
//! "send" here means pushing a typed [`ServerMessage`] into that channel.
//! A closed channel is how a dead connection looks from the inside.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use sidewinder_arbiter::{Arbiter, Outcome};
use sidewinder_board::{Tile, initial_valid_tiles};
use sidewinder_protocol::{ClientMessage, ServerMessage};
use sidewinder_registry::{ConnectionId, GameRegistry};
use sidewinder_store::MoveLog;
use tokio::sync::mpsc;

/// Outbound channel to one connection's writer task.
pub type OutboundSender = mpsc::UnboundedSender<ServerMessage>;

/// Pairs waiting connections, arbitrates their moves, and broadcasts
/// outcomes to game peers.
pub struct Matchmaker<L> {
    /// The single waiting slot. A new connection either takes the waiter
    /// out of it (becoming the second player) or parks here.
    awaiting_opponent: Option<ConnectionId>,

    /// Who is paired with whom. Owned exclusively by the matchmaker.
    registry: GameRegistry,

    /// Outbound channel per live connection.
    senders: HashMap<ConnectionId, OutboundSender>,

    /// Session creation goes straight to the log; move validation goes
    /// through the arbiter (which shares the same log).
    log: Arc<L>,
    arbiter: Arbiter<L>,
}

impl<L: MoveLog> Matchmaker<L> {
    /// Creates a matchmaker over the given move log.
    pub fn new(log: Arc<L>) -> Self {
        Self {
            awaiting_opponent: None,
            registry: GameRegistry::new(),
            senders: HashMap::new(),
            arbiter: Arbiter::new(Arc::clone(&log)),
            log,
        }
    }

    /// Admits a freshly accepted connection: registers its outbound
    /// channel and drops it into matchmaking.
    pub async fn connect(&mut self, conn: ConnectionId, sender: OutboundSender) {
        self.senders.insert(conn, sender);
        self.enter_matchmaking(conn).await;
    }

    /// Either pairs `conn` with a live waiting connection (the waiter
    /// goes first) or parks `conn` in the waiting slot.
    async fn enter_matchmaking(&mut self, conn: ConnectionId) {
        if let Some(waiting) = self.awaiting_opponent.take() {
            // `waiting == conn` happens when the waiter itself asks for a
            // new game; it must not be paired with itself, just re-wait.
            if waiting != conn {
                if self.is_live(waiting) {
                    self.start_game(waiting, conn).await;
                    return;
                }
                // The waiter's writer task is gone; forget the corpse
                // and let `conn` take the slot instead.
                self.senders.remove(&waiting);
            }
        }
        self.awaiting_opponent = Some(conn);
        self.send_to(conn, ServerMessage::ready());
        tracing::info!(%conn, "waiting for an opponent");
    }

    /// Creates a fresh game between two connections and tells each which
    /// seat it holds. `first` moves first.
    async fn start_game(&mut self, first: ConnectionId, second: ConnectionId) {
        let game = self.log.create_session().await;
        let tiles = sorted(initial_valid_tiles());
        self.send_to(first, ServerMessage::game_start(1, tiles.clone()));
        self.send_to(second, ServerMessage::game_start(2, tiles));
        self.registry.new_game(game, first, second);
    }

    /// Routes one inbound text frame.
    pub async fn handle_message(&mut self, conn: ConnectionId, text: &str) {
        match ClientMessage::parse(text) {
            Ok(ClientMessage::Rematch) => self.rematch(conn).await,
            Ok(ClientMessage::Move { player, x, y }) => {
                self.handle_move(conn, player, Tile::new(x, y)).await;
            }
            Err(err) => {
                tracing::debug!(%conn, %err, "unparseable message");
                self.broadcast(conn, ServerMessage::generic_error());
            }
        }
    }

    async fn handle_move(&mut self, conn: ConnectionId, claimed: u8, tile: Tile) {
        // The claimed player number must agree with the seat this
        // connection was actually given. A lie (or a move from a
        // connection with no game at all) is treated like malformed
        // input: a vague error to the whole session.
        let Some((is_first, game)) = self.registry.seat_of(conn) else {
            tracing::debug!(%conn, "move from a connection with no game");
            self.broadcast(conn, ServerMessage::generic_error());
            return;
        };
        if (claimed == 1) != is_first {
            tracing::debug!(%conn, claimed, "claimed seat contradicts the registry");
            self.broadcast(conn, ServerMessage::generic_error());
            return;
        }

        match self.arbiter.submit(game, tile, is_first).await {
            Outcome::Continue { valid_tiles } => self.broadcast(
                conn,
                ServerMessage::move_played(tile, claimed, sorted(valid_tiles)),
            ),
            Outcome::Winner => self.broadcast(conn, ServerMessage::winner(tile, claimed)),
            Outcome::Draw => self.broadcast(conn, ServerMessage::draw(tile, claimed)),
            // Rejections concern only the mover; the peer's view of the
            // game hasn't changed.
            Outcome::Rejected(rejection) => {
                self.send_to(conn, ServerMessage::error(rejection.to_string()));
            }
        }
    }

    /// Starts a fresh game between the same peers, or re-enters
    /// matchmaking if the peer is gone.
    async fn rematch(&mut self, conn: ConnectionId) {
        let peers = self
            .registry
            .game_of(conn)
            .and_then(|game| self.registry.peers_of(game));
        match peers {
            // Seat order carries over: whoever opened last game opens
            // this one.
            Some((first, second)) => self.start_game(first, second).await,
            None => {
                self.registry.remove(conn);
                self.enter_matchmaking(conn).await;
            }
        }
    }

    /// Handles a connection that is gone for good: notify the peer, tear
    /// down the pairing, release the waiting slot if it held it.
    pub fn disconnect(&mut self, conn: ConnectionId) {
        self.broadcast(conn, ServerMessage::abandoned());
        self.registry.remove(conn);
        if self.awaiting_opponent == Some(conn) {
            self.awaiting_opponent = None;
        }
        self.senders.remove(&conn);
        tracing::info!(%conn, "connection departed");
    }

    // -- Delivery ----------------------------------------------------------

    /// Sends `message` to every connection in the sender's game. A
    /// connection without a game broadcasts to no one.
    fn broadcast(&self, conn: ConnectionId, message: ServerMessage) {
        let peers = self
            .registry
            .game_of(conn)
            .and_then(|game| self.registry.peers_of(game));
        if let Some((first, second)) = peers {
            self.send_to(first, message.clone());
            self.send_to(second, message);
        }
    }

    /// Pushes a message into one connection's outbound channel. A closed
    /// or missing channel drops the message; the disconnect path cleans
    /// up the rest shortly.
    fn send_to(&self, conn: ConnectionId, message: ServerMessage) {
        if let Some(sender) = self.senders.get(&conn) {
            let _ = sender.send(message);
        }
    }

    /// A connection is live while its writer task still holds the other
    /// end of the channel.
    fn is_live(&self, conn: ConnectionId) -> bool {
        self.senders
            .get(&conn)
            .is_some_and(|sender| !sender.is_closed())
    }
}

/// Orders a frontier for the wire, so both peers always see the same
/// list and tests can compare exactly.
fn sorted(tiles: HashSet<Tile>) -> Vec<Tile> {
    let mut tiles: Vec<Tile> = tiles.into_iter().collect();
    tiles.sort();
    tiles
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! Matchmaker unit tests, driven without a network: each "connection"
    //! is just an unbounded channel whose receiving end the test holds.
    //! Every send happens synchronously inside the awaited call, so
    //! `try_recv` observes exactly what a client would have been told.

    use super::*;
    use sidewinder_store::MemoryMoveLog;
    use tokio::sync::mpsc::UnboundedReceiver;
    use tokio::sync::mpsc::error::TryRecvError;

    fn conn(id: u64) -> ConnectionId {
        ConnectionId::new(id)
    }

    fn t(x: i16, y: i16) -> Tile {
        Tile::new(x, y)
    }

    fn matchmaker() -> Matchmaker<MemoryMoveLog> {
        Matchmaker::new(Arc::new(MemoryMoveLog::new()))
    }

    /// Connects `id` and returns the receiving end of its channel.
    async fn join(
        mm: &mut Matchmaker<MemoryMoveLog>,
        id: u64,
    ) -> UnboundedReceiver<ServerMessage> {
        let (tx, rx) = mpsc::unbounded_channel();
        mm.connect(conn(id), tx).await;
        rx
    }

    fn next(rx: &mut UnboundedReceiver<ServerMessage>) -> ServerMessage {
        rx.try_recv().expect("expected a pending message")
    }

    fn assert_silent(rx: &mut UnboundedReceiver<ServerMessage>) {
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    /// Connects two players and drains their pairing messages.
    async fn paired(
        mm: &mut Matchmaker<MemoryMoveLog>,
    ) -> (
        UnboundedReceiver<ServerMessage>,
        UnboundedReceiver<ServerMessage>,
    ) {
        let mut rx1 = join(mm, 1).await;
        let mut rx2 = join(mm, 2).await;
        next(&mut rx1); // ready
        next(&mut rx1); // game start
        next(&mut rx2); // game start
        (rx1, rx2)
    }

    // =====================================================================
    // Pairing
    // =====================================================================

    #[tokio::test]
    async fn test_first_connection_waits_ready() {
        let mut mm = matchmaker();
        let mut rx = join(&mut mm, 1).await;

        assert_eq!(next(&mut rx), ServerMessage::ready());
        assert_silent(&mut rx);
    }

    #[tokio::test]
    async fn test_second_connection_pairs_with_the_waiter() {
        let mut mm = matchmaker();
        let mut rx1 = join(&mut mm, 1).await;
        next(&mut rx1); // ready

        let mut rx2 = join(&mut mm, 2).await;

        // The waiter opens; the newcomer answers. Same frontier for both.
        let expected = sorted(initial_valid_tiles());
        assert_eq!(
            next(&mut rx1),
            ServerMessage::game_start(1, expected.clone())
        );
        assert_eq!(next(&mut rx2), ServerMessage::game_start(2, expected));
    }

    #[tokio::test]
    async fn test_third_connection_starts_a_new_wait() {
        let mut mm = matchmaker();
        let _rx1 = join(&mut mm, 1).await;
        let _rx2 = join(&mut mm, 2).await;

        let mut rx3 = join(&mut mm, 3).await;

        assert_eq!(next(&mut rx3), ServerMessage::ready());
    }

    #[tokio::test]
    async fn test_dead_waiter_is_skipped() {
        let mut mm = matchmaker();
        let rx1 = join(&mut mm, 1).await;
        drop(rx1); // the waiter's writer task is gone

        let mut rx2 = join(&mut mm, 2).await;

        // No pairing with a corpse — the newcomer becomes the waiter.
        assert_eq!(next(&mut rx2), ServerMessage::ready());
        assert_silent(&mut rx2);
    }

    // =====================================================================
    // Moves
    // =====================================================================

    #[tokio::test]
    async fn test_accepted_move_broadcast_to_both() {
        let mut mm = matchmaker();
        let (mut rx1, mut rx2) = paired(&mut mm).await;

        mm.handle_message(conn(1), "1:0,0").await;

        let msg = next(&mut rx1);
        assert_eq!(msg, next(&mut rx2), "both peers hear the same move");
        match msg {
            ServerMessage::Move {
                x, y, player, valid_tiles,
            } => {
                assert_eq!((x, y, player), (0, 0, 1));
                assert!(valid_tiles.contains(&t(1, 0)));
                assert!(!valid_tiles.contains(&t(0, 0)));
            }
            other => panic!("expected a move broadcast, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rejection_goes_to_the_sender_only() {
        let mut mm = matchmaker();
        let (mut rx1, mut rx2) = paired(&mut mm).await;

        // Second player honestly identifies itself but it isn't its turn.
        mm.handle_message(conn(2), "2:6,0").await;

        assert_eq!(next(&mut rx2), ServerMessage::error("Turn out of order!"));
        assert_silent(&mut rx1);
    }

    #[tokio::test]
    async fn test_claimed_seat_mismatch_alerts_the_whole_session() {
        let mut mm = matchmaker();
        let (mut rx1, mut rx2) = paired(&mut mm).await;

        // Second player claims to be the first.
        mm.handle_message(conn(2), "1:1,0").await;

        assert_eq!(next(&mut rx1), ServerMessage::generic_error());
        assert_eq!(next(&mut rx2), ServerMessage::generic_error());

        // Nothing was recorded: the real first player can still open.
        mm.handle_message(conn(1), "1:0,0").await;
        assert!(matches!(next(&mut rx1), ServerMessage::Move { .. }));
    }

    #[tokio::test]
    async fn test_malformed_text_alerts_the_whole_session() {
        let mut mm = matchmaker();
        let (mut rx1, mut rx2) = paired(&mut mm).await;

        mm.handle_message(conn(1), "not a move").await;

        assert_eq!(next(&mut rx1), ServerMessage::generic_error());
        assert_eq!(next(&mut rx2), ServerMessage::generic_error());
    }

    #[tokio::test]
    async fn test_move_without_a_game_goes_nowhere() {
        // A waiting (unpaired) connection has no session to alert; its
        // stray move is swallowed.
        let mut mm = matchmaker();
        let mut rx1 = join(&mut mm, 1).await;
        next(&mut rx1); // ready

        mm.handle_message(conn(1), "1:0,0").await;

        assert_silent(&mut rx1);
    }

    #[tokio::test]
    async fn test_winning_move_broadcasts_winner_flag() {
        let mut mm = matchmaker();
        let (mut rx1, mut rx2) = paired(&mut mm).await;

        for text in ["1:0,0", "2:6,0", "1:0,1", "2:6,1", "1:0,2", "2:6,2"] {
            let sender = if text.starts_with('1') { 1 } else { 2 };
            mm.handle_message(conn(sender), text).await;
            next(&mut rx1);
            next(&mut rx2);
        }

        mm.handle_message(conn(1), "1:0,3").await;

        let expected = ServerMessage::winner(t(0, 3), 1);
        assert_eq!(next(&mut rx1), expected);
        assert_eq!(next(&mut rx2), expected);
    }

    // =====================================================================
    // Rematch
    // =====================================================================

    #[tokio::test]
    async fn test_rematch_restarts_with_same_seats_and_fresh_board() {
        let mut mm = matchmaker();
        let (mut rx1, mut rx2) = paired(&mut mm).await;

        // Occupy (0,0) in the first game.
        mm.handle_message(conn(1), "1:0,0").await;
        next(&mut rx1);
        next(&mut rx2);

        mm.handle_message(conn(2), "new").await;

        let expected = sorted(initial_valid_tiles());
        assert_eq!(
            next(&mut rx1),
            ServerMessage::game_start(1, expected.clone()),
            "previous first player keeps the opening seat"
        );
        assert_eq!(next(&mut rx2), ServerMessage::game_start(2, expected));

        // Fresh log: (0,0) is playable again.
        mm.handle_message(conn(1), "1:0,0").await;
        assert!(matches!(next(&mut rx1), ServerMessage::Move { .. }));
    }

    #[tokio::test]
    async fn test_rematch_without_a_game_re_enters_matchmaking() {
        let mut mm = matchmaker();
        let mut rx1 = join(&mut mm, 1).await;
        next(&mut rx1); // ready

        mm.handle_message(conn(1), "new").await;

        assert_eq!(next(&mut rx1), ServerMessage::ready());
    }

    // =====================================================================
    // Disconnect
    // =====================================================================

    #[tokio::test]
    async fn test_disconnect_notifies_peer_and_tears_down() {
        let mut mm = matchmaker();
        let (rx1, mut rx2) = paired(&mut mm).await;
        drop(rx1);

        mm.disconnect(conn(1));

        assert_eq!(next(&mut rx2), ServerMessage::abandoned());

        // The pairing is gone: the survivor's rematch request starts a
        // fresh wait instead of reviving the old game.
        mm.handle_message(conn(2), "new").await;
        assert_eq!(next(&mut rx2), ServerMessage::ready());
    }

    #[tokio::test]
    async fn test_disconnect_of_the_waiter_clears_the_slot() {
        let mut mm = matchmaker();
        let rx1 = join(&mut mm, 1).await;
        drop(rx1);
        mm.disconnect(conn(1));

        // The next connection waits instead of pairing with the ghost.
        let mut rx2 = join(&mut mm, 2).await;
        assert_eq!(next(&mut rx2), ServerMessage::ready());
        assert_silent(&mut rx2);
    }

    #[tokio::test]
    async fn test_survivor_can_play_a_full_new_game_after_abandonment() {
        let mut mm = matchmaker();
        let (rx1, mut rx2) = paired(&mut mm).await;
        drop(rx1);
        mm.disconnect(conn(1));
        next(&mut rx2); // abandoned

        mm.handle_message(conn(2), "new").await;
        next(&mut rx2); // ready

        let mut rx3 = join(&mut mm, 3).await;
        assert!(matches!(
            next(&mut rx2),
            ServerMessage::GameStart { player: 1, .. }
        ));
        assert!(matches!(
            next(&mut rx3),
            ServerMessage::GameStart { player: 2, .. }
        ));

        // The survivor waited, so now it opens.
        mm.handle_message(conn(2), "1:0,0").await;
        assert!(matches!(next(&mut rx2), ServerMessage::Move { .. }));
        assert!(matches!(next(&mut rx3), ServerMessage::Move { .. }));
    }
}
