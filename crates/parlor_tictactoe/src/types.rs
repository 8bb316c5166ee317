//! Core domain types for tic-tac-toe.
//!
//! Every type here has a string wire form matching what browser clients
//! exchange: marks are `"x"` / `"o"`, an empty square is `""`, and a
//! finished game's turn is `""`.

use super::position::Position;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A player's mark.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Mark {
    /// Player X (moves first).
    X,
    /// Player O.
    O,
}

impl Mark {
    /// Returns the opponent's mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum Square {
    /// Nobody has played here.
    #[default]
    Empty,
    /// Square marked by a player.
    Occupied(Mark),
}

impl Square {
    /// Returns the mark in this square, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Square::Empty => None,
            Square::Occupied(mark) => Some(mark),
        }
    }
}

impl From<Square> for &'static str {
    fn from(square: Square) -> Self {
        match square {
            Square::Empty => "",
            Square::Occupied(mark) => mark.into(),
        }
    }
}

impl TryFrom<String> for Square {
    type Error = strum::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            Ok(Square::Empty)
        } else {
            Mark::from_str(&value).map(Square::Occupied)
        }
    }
}

/// 3x3 tic-tac-toe board, serialized as a 3x3 array of strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    /// Squares indexed `[row][col]`.
    squares: [[Square; 3]; 3],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from rows of squares.
    pub fn from_rows(squares: [[Square; 3]; 3]) -> Self {
        Self { squares }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.row()][pos.col()]
    }

    /// Sets the square at the given position.
    pub(crate) fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.row()][pos.col()] = square;
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns the squares as rows.
    pub fn rows(&self) -> &[[Square; 3]; 3] {
        &self.squares
    }

    /// Number of marked squares.
    pub fn marked(&self) -> usize {
        self.squares
            .iter()
            .flatten()
            .filter(|sq| **sq != Square::Empty)
            .count()
    }
}

/// Whose move it is. `Ended` once the game is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum Turn {
    /// The given player may move.
    ToMove(Mark),
    /// No moves are accepted until the game is reset.
    Ended,
}

impl Turn {
    /// The mark allowed to move, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Turn::ToMove(mark) => Some(mark),
            Turn::Ended => None,
        }
    }

    /// True once the game has ended.
    pub fn is_ended(self) -> bool {
        self == Turn::Ended
    }
}

impl Default for Turn {
    fn default() -> Self {
        Turn::ToMove(Mark::X)
    }
}

impl From<Turn> for &'static str {
    fn from(turn: Turn) -> Self {
        match turn {
            Turn::ToMove(mark) => mark.into(),
            Turn::Ended => "",
        }
    }
}

impl TryFrom<String> for Turn {
    type Error = strum::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            Ok(Turn::Ended)
        } else {
            Mark::from_str(&value).map(Turn::ToMove)
        }
    }
}

impl std::fmt::Display for Turn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_wire_form() {
        assert_eq!(serde_json::to_string(&Mark::X).unwrap(), "\"x\"");
        assert_eq!(Mark::from_str("o").unwrap(), Mark::O);
        assert!(Mark::from_str("X").is_err());
        assert!(Mark::from_str("").is_err());
    }

    #[test]
    fn test_empty_board_serializes_as_strings() {
        let json = serde_json::to_value(Board::new()).unwrap();
        assert_eq!(
            json,
            serde_json::json!([["", "", ""], ["", "", ""], ["", "", ""]])
        );
    }

    #[test]
    fn test_board_parses_from_strings() {
        let board: Board =
            serde_json::from_str(r#"[["x","",""],["","o",""],["","","x"]]"#).unwrap();
        assert_eq!(board.marked(), 3);
        assert_eq!(board.rows()[1][1], Square::Occupied(Mark::O));
    }

    #[test]
    fn test_turn_ended_is_empty_string() {
        assert_eq!(serde_json::to_string(&Turn::Ended).unwrap(), "\"\"");
        assert_eq!(
            serde_json::from_str::<Turn>("\"o\"").unwrap(),
            Turn::ToMove(Mark::O)
        );
        assert!(serde_json::from_str::<Turn>("\"z\"").is_err());
    }
}
