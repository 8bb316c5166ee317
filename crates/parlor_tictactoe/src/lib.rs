//! Parlor tic-tac-toe - pure game logic
//!
//! The authoritative rules for a two-player 3x3 game: move validation, strict
//! turn alternation, and win/draw detection. No I/O; transports own a
//! [`GameState`] and forward moves to it.
//!
//! # Example
//!
//! ```
//! use parlor_tictactoe::{GameResult, GameState, Mark, Move, Turn, rules::LINES};
//!
//! let mut game = GameState::new();
//! for (row, col, player) in [(0, 0, "x"), (1, 1, "o"), (0, 1, "x"), (1, 0, "o"), (0, 2, "x")] {
//!     assert!(game.try_move(Move::from_parts(row, col, player).unwrap()));
//! }
//! assert_eq!(
//!     game.result(),
//!     GameResult::Won { winner: Mark::X, line: LINES[0] }
//! );
//! assert_eq!(game.turn(), Turn::Ended);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod game;
mod position;
pub mod rules;
mod types;

pub use action::{Move, MoveError, RawMove};
pub use game::{Applied, GameState, Snapshot, apply_move, validate};
pub use position::Position;
pub use rules::{GameResult, is_game_ended};
pub use types::{Board, Mark, Square, Turn};
