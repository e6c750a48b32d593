use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Absolute position of a cell on the board.
///
/// Row 0 is the top row; rows grow downward and columns grow rightward.
/// Coordinates are signed because a piece may be computed partially above
/// the visible board (the I piece spawns with its reference row at -1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CellPosition {
    pub row: i32,
    pub col: i32,
}

impl CellPosition {
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    #[must_use]
    pub const fn translated(self, d_row: i32, d_col: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }
}

/// Offset of a cell relative to a piece's reference point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellOffset {
    pub row: i8,
    pub col: i8,
}

impl CellOffset {
    #[must_use]
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }
}

impl Add<CellOffset> for CellPosition {
    type Output = CellPosition;

    fn add(self, rhs: CellOffset) -> Self::Output {
        self.translated(i32::from(rhs.row), i32::from(rhs.col))
    }
}
