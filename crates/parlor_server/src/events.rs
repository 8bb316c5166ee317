//! Messages exchanged over the push channel.
//!
//! Frames are JSON objects tagged by `event`, with the payload under `data`:
//!
//! ```text
//! server -> client  {"event":"board","data":[["x","",""],["","",""],["","",""]]}
//!                   {"event":"turn","data":"o"}
//!                   {"event":"status","data":{"status":"ongoing"}}
//!                   {"event":"ack","data":{"action":"move","accepted":true}}
//! client -> server  {"event":"move","data":{"row":0,"col":0,"player":"x"}}
//!                   {"event":"reset"}
//!                   {"event":"new_game"}
//! ```

use parlor_tictactoe::{Board, GameResult, RawMove, Snapshot, Turn};
use serde::{Deserialize, Serialize};

/// Pushed from the server to every client of a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Full board after a change.
    Board(Board),
    /// Whose turn it is (`""` once the game is over).
    Turn(Turn),
    /// Derived outcome, so clients need not recompute it.
    Status(GameResult),
    /// Reply to a client command.
    Ack(Ack),
}

impl ServerEvent {
    /// The events sent for one state change, in delivery order.
    pub fn from_snapshot(snapshot: &Snapshot) -> [ServerEvent; 3] {
        [
            ServerEvent::Board(snapshot.board),
            ServerEvent::Turn(snapshot.turn),
            ServerEvent::Status(snapshot.result),
        ]
    }
}

/// Sent by a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientCommand {
    /// Place a mark.
    Move(RawMove),
    /// Unconditionally start over.
    Reset,
    /// Start over if the game has ended.
    NewGame,
}

impl ClientCommand {
    /// Which action this command requests.
    pub fn action(&self) -> Action {
        match self {
            ClientCommand::Move(_) => Action::Move,
            ClientCommand::Reset => Action::Reset,
            ClientCommand::NewGame => Action::NewGame,
        }
    }
}

/// The action an [`Ack`] answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// A move.
    Move,
    /// A reset.
    Reset,
    /// A conditional new game.
    NewGame,
    /// A frame that could not be parsed.
    Unknown,
}

/// Whether a client command took effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    /// What was requested.
    pub action: Action,
    /// Whether it was applied.
    pub accepted: bool,
}
