//! A single shared game and its update channel.

use parking_lot::Mutex;
use parlor_tictactoe::{Board, GameResult, GameState, Move, MoveError, RawMove, Snapshot, Turn};
use tokio::sync::broadcast;
use tracing::{debug, info, instrument, trace};

/// Identifier of a table.
pub type TableId = String;

/// One game, shared by every client connected to it.
///
/// Moves are validated and applied under the lock, and the resulting
/// snapshot is published before the lock is released so subscribers see
/// updates in commit order.
#[derive(Debug)]
pub struct Table {
    id: TableId,
    state: Mutex<GameState>,
    updates: broadcast::Sender<Snapshot>,
}

impl Table {
    /// Creates a table with a fresh game.
    #[instrument]
    pub fn new(id: TableId, capacity: usize) -> Self {
        info!(table = %id, "Opening table");
        let (updates, _) = broadcast::channel(capacity);
        Self {
            id,
            state: Mutex::new(GameState::new()),
            updates,
        }
    }

    /// Table identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current board.
    pub fn board(&self) -> Board {
        *self.state.lock().board()
    }

    /// Whose turn it is.
    pub fn turn(&self) -> Turn {
        self.state.lock().turn()
    }

    /// Outcome of the current board.
    pub fn result(&self) -> GameResult {
        self.state.lock().result()
    }

    /// Everything observable at once.
    pub fn snapshot(&self) -> Snapshot {
        self.state.lock().snapshot()
    }

    /// Applies a move and notifies subscribers on success.
    #[instrument(skip(self), fields(table = %self.id))]
    pub fn submit(&self, mv: Move) -> Result<GameResult, MoveError> {
        let mut state = self.state.lock();
        let result = state.apply_move(mv)?;
        self.publish(state.snapshot());
        Ok(result)
    }

    /// Parses and applies a move from client input. Any failure is `false`.
    #[instrument(skip(self), fields(table = %self.id))]
    pub fn submit_raw(&self, raw: RawMove) -> bool {
        match raw.into_move().and_then(|mv| self.submit(mv)) {
            Ok(_) => true,
            Err(e) => {
                debug!(error = %e, "Move rejected");
                false
            }
        }
    }

    /// Unconditionally starts over. Always `true`.
    #[instrument(skip(self), fields(table = %self.id))]
    pub fn reset(&self) -> bool {
        let mut state = self.state.lock();
        state.reset();
        self.publish(state.snapshot());
        true
    }

    /// Starts over only if the current game has ended.
    #[instrument(skip(self), fields(table = %self.id))]
    pub fn new_game(&self) -> bool {
        let mut state = self.state.lock();
        let restarted = state.new_game();
        if restarted {
            self.publish(state.snapshot());
        }
        restarted
    }

    /// Receives a snapshot after every change.
    pub fn subscribe(&self) -> broadcast::Receiver<Snapshot> {
        self.updates.subscribe()
    }

    /// Number of live subscribers.
    pub fn watchers(&self) -> usize {
        self.updates.receiver_count()
    }

    /// No subscribers, and the game is either untouched or finished.
    pub fn is_idle(&self) -> bool {
        if self.watchers() > 0 {
            return false;
        }
        let state = self.state.lock();
        state.history().is_empty() || state.is_ended()
    }

    fn publish(&self, snapshot: Snapshot) {
        match self.updates.send(snapshot) {
            Ok(receivers) => debug!(receivers, "Published update"),
            Err(_) => trace!("No subscribers for update"),
        }
    }
}
