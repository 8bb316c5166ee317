//! First-class move types for tic-tac-toe.
//!
//! A move is the player's intent. It is parsed from whatever the client sent,
//! validated against the current state, and only then applied.

use super::{Mark, Position};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use tracing::instrument;

/// A move: a player placing their mark at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The player making the move.
    pub player: Mark,
    /// Where the mark goes.
    pub position: Position,
}

impl Move {
    /// Creates a new move.
    pub fn new(player: Mark, position: Position) -> Self {
        Self { player, position }
    }

    /// Builds a move from raw coordinates and a player token.
    #[instrument]
    pub fn from_parts(row: i64, col: i64, player: &str) -> Result<Self, MoveError> {
        let position = Position::new(row, col)?;
        let player = Mark::from_str(player)
            .map_err(|_| MoveError::UnknownPlayer(player.to_string()))?;
        Ok(Self::new(player, position))
    }

    /// Parses a move from untyped text fields, as they arrive in a query string.
    #[instrument]
    pub fn parse(row: &str, col: &str, player: &str) -> Result<Self, MoveError> {
        let row = parse_coord("row", row)?;
        let col = parse_coord("col", col)?;
        Self::from_parts(row, col, player)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.position)
    }
}

fn parse_coord(name: &str, text: &str) -> Result<i64, MoveError> {
    text.trim()
        .parse()
        .map_err(|_| MoveError::Malformed(format!("{name} is not an integer: {text:?}")))
}

/// A move request exactly as a client sent it.
///
/// Fields are kept untyped so that malformed input becomes a
/// [`MoveError`] (and therefore a rejected move) rather than a decoding
/// failure in the transport. Works with both JSON bodies and query strings,
/// where every value arrives as text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMove {
    /// Row, as a number or numeric string.
    #[serde(default)]
    pub row: Option<Value>,
    /// Column, as a number or numeric string.
    #[serde(default)]
    pub col: Option<Value>,
    /// Player token, `"x"` or `"o"`.
    #[serde(default)]
    pub player: Option<Value>,
}

impl RawMove {
    /// Validates the shape of the request and produces a typed move.
    #[instrument]
    pub fn into_move(self) -> Result<Move, MoveError> {
        let row = coord_value("row", self.row)?;
        let col = coord_value("col", self.col)?;
        let player = match self.player {
            Some(Value::String(token)) => token,
            Some(other) => return Err(MoveError::UnknownPlayer(other.to_string())),
            None => return Err(MoveError::Malformed("missing player".to_string())),
        };
        Move::from_parts(row, col, &player)
    }
}

impl TryFrom<RawMove> for Move {
    type Error = MoveError;

    fn try_from(raw: RawMove) -> Result<Self, Self::Error> {
        raw.into_move()
    }
}

fn coord_value(name: &str, value: Option<Value>) -> Result<i64, MoveError> {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .ok_or_else(|| MoveError::Malformed(format!("{name} is not an integer: {n}"))),
        Some(Value::String(text)) => parse_coord(name, &text),
        Some(other) => Err(MoveError::Malformed(format!(
            "{name} is not an integer: {other}"
        ))),
        None => Err(MoveError::Malformed(format!("missing {name}"))),
    }
}

/// Why a move was rejected.
///
/// Callers over the wire only ever learn "rejected"; the variant exists for
/// logging and for tests.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// Coordinates outside the 3x3 board.
    #[display("Position ({row}, {col}) is off the board")]
    OutOfBounds {
        /// Requested row.
        row: i64,
        /// Requested column.
        col: i64,
    },

    /// Player token is neither `"x"` nor `"o"`.
    #[display("Unknown player {_0:?}")]
    UnknownPlayer(String),

    /// Request could not be understood.
    #[display("Malformed move: {_0}")]
    Malformed(String),

    /// The square at the position is already occupied.
    #[display("Square {_0} is already occupied")]
    SquareOccupied(Position),

    /// It's not this player's turn.
    #[display("It's not {found}'s turn ({expected} to move)")]
    WrongTurn {
        /// Player whose turn it is.
        expected: Mark,
        /// Player who tried to move.
        found: Mark,
    },

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,
}

impl std::error::Error for MoveError {}
