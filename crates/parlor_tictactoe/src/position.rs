//! Board coordinates.

use super::action::MoveError;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A square's coordinates on the 3x3 board. Always in bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(i64, i64)", into = "(i64, i64)")]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    /// Board side length.
    pub const SIZE: usize = 3;

    /// All 9 positions in row-major order.
    pub const ALL: [Position; 9] = [
        Position::at(0, 0),
        Position::at(0, 1),
        Position::at(0, 2),
        Position::at(1, 0),
        Position::at(1, 1),
        Position::at(1, 2),
        Position::at(2, 0),
        Position::at(2, 1),
        Position::at(2, 2),
    ];

    /// Unchecked constructor for compile-time tables.
    pub(crate) const fn at(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Creates a position, rejecting coordinates outside `0..3`.
    #[instrument]
    pub fn new(row: i64, col: i64) -> Result<Self, MoveError> {
        let in_bounds = |v: i64| (0..Self::SIZE as i64).contains(&v);
        if in_bounds(row) && in_bounds(col) {
            Ok(Self::at(row as u8, col as u8))
        } else {
            Err(MoveError::OutOfBounds { row, col })
        }
    }

    /// Row index (0-2).
    pub fn row(self) -> usize {
        self.row as usize
    }

    /// Column index (0-2).
    pub fn col(self) -> usize {
        self.col as usize
    }
}

impl TryFrom<(i64, i64)> for Position {
    type Error = MoveError;

    fn try_from((row, col): (i64, i64)) -> Result<Self, Self::Error> {
        Position::new(row, col)
    }
}

impl From<Position> for (i64, i64) {
    fn from(pos: Position) -> Self {
        (pos.row as i64, pos.col as i64)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_bounds() {
        let pos = Position::new(2, 1).unwrap();
        assert_eq!((pos.row(), pos.col()), (2, 1));
    }

    #[test]
    fn test_out_of_bounds() {
        assert_eq!(
            Position::new(3, 0),
            Err(MoveError::OutOfBounds { row: 3, col: 0 })
        );
        assert!(Position::new(0, -1).is_err());
        assert!(Position::new(i64::MAX, 0).is_err());
    }

    #[test]
    fn test_all_is_row_major() {
        assert_eq!(Position::ALL[4], Position::at(1, 1));
        assert_eq!(Position::ALL[8], Position::at(2, 2));
    }
}
