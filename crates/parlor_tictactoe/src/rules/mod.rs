//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](super::Board). Nothing here knows about
//! turns or history; the state machine in [`game`](super::game) composes
//! them.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{LINES, check_winner, winning_line};

use super::{Board, Mark, Position};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Outcome of a board, derived on demand and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum GameResult {
    /// Moves remain and nobody has a line.
    Ongoing,
    /// A player completed a line.
    Won {
        /// The player with three in a line.
        winner: Mark,
        /// The completed line, so clients can highlight it.
        line: [Position; 3],
    },
    /// Board full with no line.
    Draw,
}

/// Evaluates the board.
#[instrument(skip(board))]
pub fn result(board: &Board) -> GameResult {
    if let Some((winner, line)) = winning_line(board) {
        GameResult::Won { winner, line }
    } else if is_full(board) {
        GameResult::Draw
    } else {
        GameResult::Ongoing
    }
}

/// True if any line is complete or every square is marked.
#[instrument(skip(board))]
pub fn is_game_ended(board: &Board) -> bool {
    check_winner(board).is_some() || is_full(board)
}
