//! Turn-managing state machine for tic-tac-toe.
//!
//! States are "x to move", "o to move" and "ended". The only transitions
//! are an accepted move and a reset; once ended, the game stays ended until
//! reset.

use super::action::{Move, MoveError};
use super::rules::{self, GameResult};
use super::types::{Board, Square, Turn};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Checks a move against a board and turn without changing anything.
#[instrument(skip(board), fields(player = %mv.player, position = %mv.position))]
pub fn validate(board: &Board, turn: Turn, mv: Move) -> Result<(), MoveError> {
    let expected = turn.mark().ok_or(MoveError::GameOver)?;
    if expected != mv.player {
        return Err(MoveError::WrongTurn {
            expected,
            found: mv.player,
        });
    }
    if !board.is_empty(mv.position) {
        return Err(MoveError::SquareOccupied(mv.position));
    }
    Ok(())
}

/// Result of the pure [`apply_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applied {
    /// Whether the move was legal.
    pub accepted: bool,
    /// Board after the move (unchanged if rejected).
    pub board: Board,
    /// Turn after the move (unchanged if rejected).
    pub turn: Turn,
}

/// Applies a move to a board and turn, returning the next board and turn.
///
/// Rejected moves return the inputs unchanged with `accepted == false`.
#[instrument(skip(board))]
pub fn apply_move(board: &Board, turn: Turn, mv: Move) -> Applied {
    match validate(board, turn, mv) {
        Ok(()) => {
            let (board, turn) = place(*board, mv);
            Applied {
                accepted: true,
                board,
                turn,
            }
        }
        Err(e) => {
            debug!(error = %e, "Move rejected");
            Applied {
                accepted: false,
                board: *board,
                turn,
            }
        }
    }
}

/// Writes an already validated move and computes the next turn.
fn place(mut board: Board, mv: Move) -> (Board, Turn) {
    board.set(mv.position, Square::Occupied(mv.player));
    let turn = if rules::is_game_ended(&board) {
        Turn::Ended
    } else {
        Turn::ToMove(mv.player.opponent())
    };
    (board, turn)
}

/// Complete state of one game.
///
/// Deserializing replays `history` from an empty board and rejects input
/// whose `board` or `turn` disagree with the replay.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "GameRecord")]
pub struct GameState {
    board: Board,
    turn: Turn,
    history: Vec<Move>,
}

/// Unchecked wire form of a [`GameState`].
#[derive(Deserialize)]
struct GameRecord {
    board: Board,
    turn: Turn,
    history: Vec<Move>,
}

impl TryFrom<GameRecord> for GameState {
    type Error = MoveError;

    fn try_from(record: GameRecord) -> Result<Self, Self::Error> {
        let mut game = GameState::new();
        for mv in record.history {
            game.apply_move(mv)?;
        }
        if game.board != record.board || game.turn != record.turn {
            return Err(MoveError::Malformed(
                "board and turn do not match the move history".to_string(),
            ));
        }
        Ok(game)
    }
}

impl GameState {
    /// Creates a new game with an empty board and X to move.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns whose turn it is.
    pub fn turn(&self) -> Turn {
        self.turn
    }

    /// Moves accepted since the last reset, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Outcome of the current board.
    pub fn result(&self) -> GameResult {
        rules::result(&self.board)
    }

    /// True once no further moves are accepted.
    pub fn is_ended(&self) -> bool {
        self.turn.is_ended()
    }

    /// Clears the board and gives X the first move.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        info!(moves = self.history.len(), "Resetting game");
        *self = Self::new();
    }

    /// Resets only if the current game has ended. Returns whether it did.
    #[instrument(skip(self))]
    pub fn new_game(&mut self) -> bool {
        if self.is_ended() {
            self.reset();
            true
        } else {
            debug!(turn = %self.turn, "New game refused, game still in progress");
            false
        }
    }

    /// Validates and applies a move, returning the resulting outcome.
    ///
    /// # Errors
    ///
    /// Returns the reason the move is illegal; the state is unchanged.
    #[instrument(skip(self), fields(player = %mv.player, position = %mv.position))]
    pub fn apply_move(&mut self, mv: Move) -> Result<GameResult, MoveError> {
        validate(&self.board, self.turn, mv)?;
        let (board, turn) = place(self.board, mv);
        self.board = board;
        self.turn = turn;
        self.history.push(mv);

        let result = self.result();
        info!(turn = %self.turn, result = ?result, "Move applied");
        Ok(result)
    }

    /// Applies a move, collapsing every rejection reason into `false`.
    pub fn try_move(&mut self, mv: Move) -> bool {
        match self.apply_move(mv) {
            Ok(_) => true,
            Err(e) => {
                debug!(error = %e, "Move rejected");
                false
            }
        }
    }

    /// Captures the observable state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board,
            turn: self.turn,
            result: self.result(),
            moves: self.history.len(),
        }
    }
}

/// Observable state after a change, as pushed to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Current board.
    pub board: Board,
    /// Current turn (`""` once ended).
    pub turn: Turn,
    /// Derived outcome.
    pub result: GameResult,
    /// Number of accepted moves since the last reset.
    pub moves: usize,
}
