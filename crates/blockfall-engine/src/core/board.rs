use crate::OutOfBoundsError;

use super::{piece::PieceKind, position::CellPosition};

/// Contents of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell locked by a piece of the given kind.
    Piece(PieceKind),
}

impl Cell {
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Numeric identifier of the cell: `0` when empty, the kind's id otherwise.
    #[must_use]
    pub const fn id(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Piece(kind) => kind.id(),
        }
    }

    #[must_use]
    pub const fn kind(self) -> Option<PieceKind> {
        match self {
            Cell::Empty => None,
            Cell::Piece(kind) => Some(kind),
        }
    }
}

/// One row of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardRow {
    cells: [Cell; Board::WIDTH],
}

impl BoardRow {
    const EMPTY: Self = Self {
        cells: [Cell::Empty; Board::WIDTH],
    };

    #[must_use]
    pub fn cells(&self) -> &[Cell; Board::WIDTH] {
        &self.cells
    }

    fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }
}

/// The fixed 20×10 playing field.
///
/// Cells only change when a piece locks ([`Self::set_cell`]), when full rows
/// are compacted away ([`Self::clear_full_rows`]), or on [`Self::reset`].
///
/// All queries are total: positions outside the board are answered rather
/// than rejected, so callers never need a bounds check before asking.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, CellPosition, PieceKind};
///
/// let mut board = Board::new();
/// for col in 0..10 {
///     board.set_cell(CellPosition::new(19, col), PieceKind::I).unwrap();
/// }
/// assert_eq!(board.clear_full_rows(), 1);
/// assert!(board.is_empty(CellPosition::new(19, 0)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [BoardRow; Board::HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub const WIDTH: usize = 10;
    pub const HEIGHT: usize = 20;

    pub const EMPTY: Self = Self {
        rows: [BoardRow::EMPTY; Board::HEIGHT],
    };

    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Returns `true` if `pos` lies within the board.
    #[must_use]
    pub fn is_inside(&self, pos: CellPosition) -> bool {
        Self::index_of(pos).is_some()
    }

    /// Returns `true` if `pos` is inside the board and holds no piece.
    ///
    /// Positions outside the board are never empty.
    #[must_use]
    pub fn is_empty(&self, pos: CellPosition) -> bool {
        self.cell(pos).is_some_and(Cell::is_empty)
    }

    /// Returns the cell at `pos`, or `None` outside the board.
    #[must_use]
    pub fn cell(&self, pos: CellPosition) -> Option<Cell> {
        let (row, col) = Self::index_of(pos)?;
        Some(self.rows[row].cells[col])
    }

    /// Locks one cell with the given piece kind.
    pub fn set_cell(&mut self, pos: CellPosition, kind: PieceKind) -> Result<(), OutOfBoundsError> {
        let (row, col) = Self::index_of(pos).ok_or(OutOfBoundsError {
            row: pos.row,
            col: pos.col,
        })?;
        self.rows[row].cells[col] = Cell::Piece(kind);
        Ok(())
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &BoardRow> {
        self.rows.iter()
    }

    /// Removes every full row and returns how many were removed.
    ///
    /// Rows above a removed row move down by one for each removed row below
    /// them, keeping their relative order, and the top is refilled with empty
    /// rows.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut count = 0;
        for row in (0..Self::HEIGHT).rev() {
            if self.rows[row].is_full() {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows[row + count] = self.rows[row];
            }
        }
        self.rows[..count].fill(BoardRow::EMPTY);
        count
    }

    /// Empties every cell.
    pub fn reset(&mut self) {
        self.rows.fill(BoardRow::EMPTY);
    }

    fn index_of(pos: CellPosition) -> Option<(usize, usize)> {
        let row = usize::try_from(pos.row).ok().filter(|&r| r < Self::HEIGHT)?;
        let col = usize::try_from(pos.col).ok().filter(|&c| c < Self::WIDTH)?;
        Some((row, col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: usize, col: usize) -> CellPosition {
        CellPosition::new(i32::try_from(row).unwrap(), i32::try_from(col).unwrap())
    }

    fn fill_row(board: &mut Board, row: usize, kind: PieceKind) {
        for col in 0..Board::WIDTH {
            board.set_cell(pos(row, col), kind).unwrap();
        }
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        for row in board.rows() {
            assert!(row.cells().iter().all(|cell| cell.is_empty()));
        }
        assert_eq!(board.rows().count(), Board::HEIGHT);
    }

    #[test]
    fn test_is_inside() {
        let board = Board::new();
        assert!(board.is_inside(CellPosition::new(0, 0)));
        assert!(board.is_inside(CellPosition::new(19, 9)));
        assert!(!board.is_inside(CellPosition::new(-1, 0)));
        assert!(!board.is_inside(CellPosition::new(0, -1)));
        assert!(!board.is_inside(CellPosition::new(20, 0)));
        assert!(!board.is_inside(CellPosition::new(0, 10)));
    }

    #[test]
    fn test_is_empty_is_total() {
        let mut board = Board::new();
        assert!(board.is_empty(CellPosition::new(5, 5)));
        assert!(!board.is_empty(CellPosition::new(-1, 5)));
        assert!(!board.is_empty(CellPosition::new(5, 10)));
        assert_eq!(board.cell(CellPosition::new(20, 0)), None);

        board.set_cell(CellPosition::new(5, 5), PieceKind::T).unwrap();
        assert!(!board.is_empty(CellPosition::new(5, 5)));
        assert_eq!(
            board.cell(CellPosition::new(5, 5)),
            Some(Cell::Piece(PieceKind::T))
        );
    }

    #[test]
    fn test_set_cell_out_of_bounds() {
        let mut board = Board::new();
        let err = board
            .set_cell(CellPosition::new(-1, 4), PieceKind::I)
            .unwrap_err();
        assert_eq!(err, OutOfBoundsError { row: -1, col: 4 });
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_cell_ids() {
        assert_eq!(Cell::Empty.id(), 0);
        for kind in PieceKind::ALL {
            assert_eq!(Cell::Piece(kind).id(), kind.id());
            assert_eq!(Cell::Piece(kind).kind(), Some(kind));
        }
        assert_eq!(Cell::Empty.kind(), None);
    }

    #[test]
    fn test_clear_without_full_rows_is_noop() {
        let mut board = Board::new();
        for col in 0..Board::WIDTH - 1 {
            board.set_cell(pos(19, col), PieceKind::L).unwrap();
        }
        board.set_cell(pos(10, 3), PieceKind::O).unwrap();
        let before = board.clone();

        assert_eq!(board.clear_full_rows(), 0);
        assert_eq!(board, before);
        assert_eq!(board.clear_full_rows(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_clear_bottom_row() {
        let mut board = Board::new();
        fill_row(&mut board, 19, PieceKind::I);
        board.set_cell(pos(18, 2), PieceKind::T).unwrap();

        assert_eq!(board.clear_full_rows(), 1);
        assert_eq!(board.cell(pos(19, 2)), Some(Cell::Piece(PieceKind::T)));
        assert!(board.is_empty(pos(18, 2)));
    }

    #[test]
    fn test_clear_separated_rows_preserves_order() {
        let mut board = Board::new();
        // Markers on non-full rows 10, 15 and 17; full rows 12, 16 and 19.
        board.set_cell(pos(10, 0), PieceKind::L).unwrap();
        fill_row(&mut board, 12, PieceKind::I);
        board.set_cell(pos(15, 1), PieceKind::J).unwrap();
        fill_row(&mut board, 16, PieceKind::I);
        board.set_cell(pos(17, 2), PieceKind::S).unwrap();
        fill_row(&mut board, 19, PieceKind::I);

        assert_eq!(board.clear_full_rows(), 3);

        // Each survivor drops by the number of cleared rows below it.
        assert_eq!(board.cell(pos(13, 0)), Some(Cell::Piece(PieceKind::L)));
        assert_eq!(board.cell(pos(17, 1)), Some(Cell::Piece(PieceKind::J)));
        assert_eq!(board.cell(pos(18, 2)), Some(Cell::Piece(PieceKind::S)));

        let occupied = board
            .rows()
            .flat_map(|row| row.cells())
            .filter(|cell| !cell.is_empty())
            .count();
        assert_eq!(occupied, 3);
        for row in board.rows().take(3) {
            assert!(row.cells().iter().all(|cell| cell.is_empty()));
        }
    }

    #[test]
    fn test_clear_consecutive_rows() {
        let mut board = Board::new();
        for row in 16..20 {
            fill_row(&mut board, row, PieceKind::Z);
        }
        board.set_cell(pos(15, 9), PieceKind::O).unwrap();

        assert_eq!(board.clear_full_rows(), 4);
        assert_eq!(board.cell(pos(19, 9)), Some(Cell::Piece(PieceKind::O)));
    }

    #[test]
    fn test_clear_all_rows() {
        let mut board = Board::new();
        for row in 0..Board::HEIGHT {
            fill_row(&mut board, row, PieceKind::T);
        }
        assert_eq!(board.clear_full_rows(), Board::HEIGHT);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_reset() {
        let mut board = Board::new();
        fill_row(&mut board, 3, PieceKind::J);
        board.set_cell(pos(0, 0), PieceKind::S).unwrap();
        board.reset();
        assert_eq!(board, Board::EMPTY);
    }
}
