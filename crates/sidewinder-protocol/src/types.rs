//! Message types for the Sidewinder wire format.
//!
//! Inbound traffic is plain text; outbound traffic is JSON. The outbound
//! shapes are flat objects rather than tagged enums because the client
//! dispatches on which keys are present (`"validTiles" in msg`, `"state"
//! in msg`, ...), so the serde representation here is `untagged` with
//! field names pinned by tests.

use serde::{Deserialize, Serialize};
use sidewinder_board::Tile;

use crate::ProtocolError;

/// The error text clients see when a message is malformed or claims the
/// wrong identity. Deliberately vague — the details go to the log, not
/// to the session.
pub const GENERIC_ERROR: &str = "Unexpected error!";

// ---------------------------------------------------------------------------
// ClientMessage — inbound
// ---------------------------------------------------------------------------

/// A parsed inbound message.
///
/// The text protocol has exactly two forms:
///
/// - `new` — request a rematch (or re-enter matchmaking),
/// - `<player>:<x>,<y>` — submit a move, where `<player>` is the
///   sender's claimed player number (1 or 2) and `x`,`y` are board
///   coordinates, e.g. `2:6,4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientMessage {
    /// Start a fresh game with the same opponent if possible.
    Rematch,

    /// Place a tile. `player` is the claimed identity, which the
    /// matchmaker checks against its own records before trusting it.
    Move { player: u8, x: i16, y: i16 },
}

impl ClientMessage {
    /// Parses one inbound text frame.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Malformed`] for anything that is not one
    /// of the two command forms, including player numbers other than
    /// 1 or 2 and non-integer coordinates.
    pub fn parse(text: &str) -> Result<Self, ProtocolError> {
        if text == "new" {
            return Ok(Self::Rematch);
        }

        let malformed = || ProtocolError::Malformed(text.to_string());

        let (player, coords) = text.split_once(':').ok_or_else(malformed)?;
        let player: u8 = player.parse().map_err(|_| malformed())?;
        if !(player == 1 || player == 2) {
            return Err(malformed());
        }

        let (x, y) = coords.split_once(',').ok_or_else(malformed)?;
        let x: i16 = x.parse().map_err(|_| malformed())?;
        let y: i16 = y.parse().map_err(|_| malformed())?;

        Ok(Self::Move { player, x, y })
    }
}

// ---------------------------------------------------------------------------
// ServerMessage — outbound
// ---------------------------------------------------------------------------

/// A session lifecycle notice, serialized as `{"state": "..."}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// Waiting in the matchmaking slot for an opponent.
    Ready,
    /// The other side of the session disconnected.
    Abandoned,
}

/// An outbound message, serialized to one of the fixed JSON shapes.
///
/// Variant order matters: serde tries untagged variants top to bottom,
/// and a [`Move`](Self::Move) object would also satisfy
/// [`GameStart`](Self::GameStart) (its extra `x`/`y` keys would simply
/// be ignored), so the more specific shapes come first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServerMessage {
    /// An accepted move and the frontier it leaves behind:
    /// `{"x":0,"y":0,"player":1,"validTiles":[...]}`.
    Move {
        x: i16,
        y: i16,
        player: u8,
        #[serde(rename = "validTiles")]
        valid_tiles: Vec<Tile>,
    },

    /// The winning move: `{"x":_,"y":_,"player":_,"winner":true}`.
    Winner { x: i16, y: i16, player: u8, winner: bool },

    /// The board-filling move: `{"x":_,"y":_,"player":_,"draw":true}`.
    Draw { x: i16, y: i16, player: u8, draw: bool },

    /// Sent to each player when a game starts:
    /// `{"player":1,"validTiles":[...]}`.
    GameStart {
        player: u8,
        #[serde(rename = "validTiles")]
        valid_tiles: Vec<Tile>,
    },

    /// `{"state":"ready"}` or `{"state":"abandoned"}`.
    Status { state: SessionStatus },

    /// `{"error":"..."}` — a rejection reason or [`GENERIC_ERROR`].
    Error { error: String },
}

impl ServerMessage {
    /// The notice sent to a connection entering the waiting slot.
    pub fn ready() -> Self {
        Self::Status {
            state: SessionStatus::Ready,
        }
    }

    /// The session-wide notice that a peer disconnected.
    pub fn abandoned() -> Self {
        Self::Status {
            state: SessionStatus::Abandoned,
        }
    }

    /// The per-player game start message.
    pub fn game_start(player: u8, valid_tiles: Vec<Tile>) -> Self {
        Self::GameStart {
            player,
            valid_tiles,
        }
    }

    /// An accepted, game-continuing move.
    pub fn move_played(tile: Tile, player: u8, valid_tiles: Vec<Tile>) -> Self {
        Self::Move {
            x: tile.x,
            y: tile.y,
            player,
            valid_tiles,
        }
    }

    /// The winning move announcement.
    pub fn winner(tile: Tile, player: u8) -> Self {
        Self::Winner {
            x: tile.x,
            y: tile.y,
            player,
            winner: true,
        }
    }

    /// The draw announcement.
    pub fn draw(tile: Tile, player: u8) -> Self {
        Self::Draw {
            x: tile.x,
            y: tile.y,
            player,
            draw: true,
        }
    }

    /// An error message with a specific reason.
    pub fn error(reason: impl Into<String>) -> Self {
        Self::Error {
            error: reason.into(),
        }
    }

    /// The deliberately vague error for malformed or misattributed input.
    pub fn generic_error() -> Self {
        Self::error(GENERIC_ERROR)
    }

    /// Serializes this message to its JSON wire form.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Encode`] if serialization fails.
    pub fn to_json(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! The wire shapes are a contract with the client; these tests pin
    //! the exact JSON produced for each message, and the parser's
    //! accept/reject line for inbound text.

    use super::*;

    fn t(x: i16, y: i16) -> Tile {
        Tile::new(x, y)
    }

    // =====================================================================
    // ClientMessage::parse — accepted forms
    // =====================================================================

    #[test]
    fn test_parse_new_is_rematch() {
        assert_eq!(ClientMessage::parse("new").unwrap(), ClientMessage::Rematch);
    }

    #[test]
    fn test_parse_move_player_one() {
        assert_eq!(
            ClientMessage::parse("1:0,0").unwrap(),
            ClientMessage::Move { player: 1, x: 0, y: 0 }
        );
    }

    #[test]
    fn test_parse_move_player_two_multi_digit_coords() {
        assert_eq!(
            ClientMessage::parse("2:6,13").unwrap(),
            ClientMessage::Move { player: 2, x: 6, y: 13 }
        );
    }

    #[test]
    fn test_parse_move_negative_coordinate() {
        // Off-board coordinates parse fine; the arbiter rejects them as
        // not viable. Parsing only cares about the message form.
        assert_eq!(
            ClientMessage::parse("1:-1,2").unwrap(),
            ClientMessage::Move { player: 1, x: -1, y: 2 }
        );
    }

    // =====================================================================
    // ClientMessage::parse — rejected forms
    // =====================================================================

    #[test]
    fn test_parse_rejects_garbage() {
        for text in ["", "hello", "new game", "1:", ":0,0", "1:0", "1:0,0,0", "1;0,0"] {
            assert!(
                matches!(ClientMessage::parse(text), Err(ProtocolError::Malformed(_))),
                "{text:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_parse_rejects_player_numbers_outside_one_and_two() {
        for text in ["0:0,0", "3:0,0", "-1:0,0", "12:0,0"] {
            assert!(
                ClientMessage::parse(text).is_err(),
                "{text:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_parse_rejects_non_integer_coordinates() {
        for text in ["1:a,0", "1:0,b", "1:0.5,0", "1: 0,0"] {
            assert!(
                ClientMessage::parse(text).is_err(),
                "{text:?} should be malformed"
            );
        }
    }

    // =====================================================================
    // ServerMessage — exact JSON shapes
    // =====================================================================

    #[test]
    fn test_ready_json_shape() {
        let json = serde_json::to_value(ServerMessage::ready()).unwrap();
        assert_eq!(json, serde_json::json!({ "state": "ready" }));
    }

    #[test]
    fn test_abandoned_json_shape() {
        let json = serde_json::to_value(ServerMessage::abandoned()).unwrap();
        assert_eq!(json, serde_json::json!({ "state": "abandoned" }));
    }

    #[test]
    fn test_game_start_json_shape() {
        let msg = ServerMessage::game_start(1, vec![t(0, 0), t(6, 0)]);
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "player": 1,
                "validTiles": [{ "x": 0, "y": 0 }, { "x": 6, "y": 0 }],
            })
        );
    }

    #[test]
    fn test_move_json_shape() {
        let msg = ServerMessage::move_played(t(0, 0), 1, vec![t(1, 0)]);
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "x": 0,
                "y": 0,
                "player": 1,
                "validTiles": [{ "x": 1, "y": 0 }],
            })
        );
    }

    #[test]
    fn test_winner_json_shape() {
        let json = serde_json::to_value(ServerMessage::winner(t(0, 3), 1)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "x": 0, "y": 3, "player": 1, "winner": true })
        );
    }

    #[test]
    fn test_draw_json_shape() {
        let json = serde_json::to_value(ServerMessage::draw(t(6, 6), 2)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "x": 6, "y": 6, "player": 2, "draw": true })
        );
    }

    #[test]
    fn test_error_json_shape() {
        let json = serde_json::to_value(ServerMessage::error("Tile is not viable")).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Tile is not viable" }));
    }

    #[test]
    fn test_generic_error_text() {
        let json = serde_json::to_value(ServerMessage::generic_error()).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Unexpected error!" }));
    }

    // =====================================================================
    // ServerMessage — untagged round trips
    // =====================================================================

    #[test]
    fn test_move_round_trips_and_does_not_collapse_into_game_start() {
        // Move carries every GameStart key plus x/y; the untagged variant
        // ordering must keep it a Move through a round trip.
        let msg = ServerMessage::move_played(t(2, 3), 2, vec![t(1, 3), t(3, 3)]);
        let json = msg.to_json().unwrap();
        let back: ServerMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
    }

    #[test]
    fn test_all_messages_round_trip() {
        let messages = [
            ServerMessage::ready(),
            ServerMessage::abandoned(),
            ServerMessage::game_start(2, vec![t(0, 1)]),
            ServerMessage::move_played(t(5, 5), 1, vec![]),
            ServerMessage::winner(t(1, 1), 1),
            ServerMessage::draw(t(0, 0), 2),
            ServerMessage::generic_error(),
        ];
        for msg in messages {
            let json = msg.to_json().unwrap();
            let back: ServerMessage = serde_json::from_str(&json).unwrap();
            assert_eq!(back, msg, "round trip changed {json}");
        }
    }
}
