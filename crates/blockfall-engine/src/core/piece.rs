use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use super::position::{CellOffset, CellPosition};

/// A falling piece: one [`PieceKind`] placed on the board.
///
/// The piece only knows its reference position and which rotation state is
/// active. Offsets come from the kind's static geometry table, so every piece
/// of the same kind shares it. Moving and rotating never validate anything;
/// collision checks belong to [`Game`](crate::Game).
///
/// # Example
///
/// ```
/// use blockfall_engine::{CellPosition, Piece, PieceKind};
///
/// let mut piece = Piece::new(PieceKind::T);
/// piece.move_by(1, -1);
/// piece.rotate();
///
/// let cells = piece.cell_positions();
/// assert_eq!(cells.len(), 4);
/// assert!(cells.contains(&CellPosition::new(1, 3)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    position: CellPosition,
    rotation: PieceRotation,
    previous_rotation: PieceRotation,
}

impl Piece {
    /// Creates a piece at its kind's spawn position in rotation state 0.
    #[must_use]
    pub fn new(kind: PieceKind) -> Self {
        let spawn = kind.spawn_offset();
        Self::with_position(kind, CellPosition::new(spawn.0, spawn.1))
    }

    /// Creates a piece with its reference point at `position`.
    #[must_use]
    pub const fn with_position(kind: PieceKind, position: CellPosition) -> Self {
        Self {
            kind,
            position,
            rotation: PieceRotation(0),
            previous_rotation: PieceRotation(0),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn position(&self) -> CellPosition {
        self.position
    }

    #[must_use]
    pub const fn rotation(&self) -> PieceRotation {
        self.rotation
    }

    /// Translates the reference point.
    pub const fn move_by(&mut self, d_row: i32, d_col: i32) {
        self.position = self.position.translated(d_row, d_col);
    }

    /// Advances to the next rotation state, wrapping after the last one.
    ///
    /// The prior state is remembered so that [`Self::undo_rotation`] can
    /// restore it.
    pub fn rotate(&mut self) {
        self.previous_rotation = self.rotation;
        self.rotation = self.rotation.next(self.kind.rotation_count());
    }

    /// Restores the rotation state recorded by the last [`Self::rotate`].
    ///
    /// Only one level of undo exists: calling this twice in a row, or without
    /// a preceding rotation, leaves the piece unchanged.
    pub fn undo_rotation(&mut self) {
        self.rotation = self.previous_rotation;
    }

    /// Returns the absolute board positions of the piece's four cells.
    #[must_use]
    pub fn cell_positions(&self) -> ArrayVec<CellPosition, 4> {
        self.kind
            .offsets(self.rotation)
            .iter()
            .map(|&offset| self.position + offset)
            .collect()
    }
}

/// Index of the active rotation state.
///
/// State 0 is the spawn orientation, each following state is the previous
/// one turned 90° clockwise. The number of states depends on the kind.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceRotation(u8);

impl PieceRotation {
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[expect(clippy::cast_possible_truncation)]
    const fn next(self, count: usize) -> Self {
        Self(((self.0 as usize + 1) % count) as u8)
    }
}

/// Visual tag of a piece kind.
///
/// The rules never look at it; it exists for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceColor {
    Orange,
    Blue,
    Cyan,
    Yellow,
    Green,
    Purple,
    Red,
}

/// The seven tetromino kinds.
///
/// The discriminant is the identifier stored in board cells (`1..=7`); `0` is
/// reserved for an empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// L-piece.
    L = 1,
    /// J-piece.
    J = 2,
    /// I-piece.
    I = 3,
    /// O-piece.
    O = 4,
    /// S-piece.
    S = 5,
    /// T-piece.
    T = 6,
    /// Z-piece.
    Z = 7,
}

impl PieceKind {
    /// Number of piece kinds (7).
    pub const LEN: usize = 7;

    /// All kinds, ordered by identifier.
    pub const ALL: [PieceKind; Self::LEN] = [
        PieceKind::L,
        PieceKind::J,
        PieceKind::I,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Returns the identifier stored in board cells.
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Looks up a kind by its board identifier.
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_id(3), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_id(0), None);
    /// ```
    #[must_use]
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(PieceKind::L),
            2 => Some(PieceKind::J),
            3 => Some(PieceKind::I),
            4 => Some(PieceKind::O),
            5 => Some(PieceKind::S),
            6 => Some(PieceKind::T),
            7 => Some(PieceKind::Z),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::L => 'L',
            PieceKind::J => 'J',
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::T => 'T',
            PieceKind::Z => 'Z',
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'L' => Some(PieceKind::L),
            'J' => Some(PieceKind::J),
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'S' => Some(PieceKind::S),
            'T' => Some(PieceKind::T),
            'Z' => Some(PieceKind::Z),
            _ => None,
        }
    }

    #[must_use]
    pub const fn color(self) -> PieceColor {
        match self {
            PieceKind::L => PieceColor::Orange,
            PieceKind::J => PieceColor::Blue,
            PieceKind::I => PieceColor::Cyan,
            PieceKind::O => PieceColor::Yellow,
            PieceKind::S => PieceColor::Green,
            PieceKind::T => PieceColor::Purple,
            PieceKind::Z => PieceColor::Red,
        }
    }

    /// Translation from the board origin to the spawn reference point.
    ///
    /// Pieces spawn horizontally centred in the top row. The I piece's spawn
    /// state occupies the second row of its box, so it starts one row higher.
    #[must_use]
    pub const fn spawn_offset(self) -> (i32, i32) {
        match self {
            PieceKind::I => (-1, 3),
            PieceKind::O => (0, 4),
            PieceKind::L | PieceKind::J | PieceKind::S | PieceKind::T | PieceKind::Z => (0, 3),
        }
    }

    /// Number of distinct rotation states.
    #[must_use]
    pub const fn rotation_count(self) -> usize {
        self.rotation_states().len()
    }

    /// Returns the cell offsets of one rotation state.
    ///
    /// `rotation` wraps around the kind's state count.
    #[must_use]
    pub fn offsets(self, rotation: PieceRotation) -> &'static [CellOffset; 4] {
        let states = self.rotation_states();
        &states[rotation.index() % states.len()]
    }

    const fn rotation_states(self) -> &'static [PieceShape] {
        match self {
            PieceKind::L => &L_STATES,
            PieceKind::J => &J_STATES,
            PieceKind::I => &I_STATES,
            PieceKind::O => &O_STATES,
            PieceKind::S => &S_STATES,
            PieceKind::T => &T_STATES,
            PieceKind::Z => &Z_STATES,
        }
    }
}

/// Four cell offsets of one rotation state, `(row, col)` within the piece box.
type PieceShape = [CellOffset; 4];

const fn shape(cells: [(i8, i8); 4]) -> PieceShape {
    let mut shape = [CellOffset::new(0, 0); 4];
    let mut i = 0;
    while i < 4 {
        shape[i] = CellOffset::new(cells[i].0, cells[i].1);
        i += 1;
    }
    shape
}

const L_STATES: [PieceShape; 4] = [
    shape([(0, 2), (1, 0), (1, 1), (1, 2)]),
    shape([(0, 1), (1, 1), (2, 1), (2, 2)]),
    shape([(1, 0), (1, 1), (1, 2), (2, 0)]),
    shape([(0, 0), (0, 1), (1, 1), (2, 1)]),
];

const J_STATES: [PieceShape; 4] = [
    shape([(0, 0), (1, 0), (1, 1), (1, 2)]),
    shape([(0, 1), (0, 2), (1, 1), (2, 1)]),
    shape([(1, 0), (1, 1), (1, 2), (2, 2)]),
    shape([(0, 1), (1, 1), (2, 0), (2, 1)]),
];

const I_STATES: [PieceShape; 4] = [
    shape([(1, 0), (1, 1), (1, 2), (1, 3)]),
    shape([(0, 2), (1, 2), (2, 2), (3, 2)]),
    shape([(2, 0), (2, 1), (2, 2), (2, 3)]),
    shape([(0, 1), (1, 1), (2, 1), (3, 1)]),
];

const O_STATES: [PieceShape; 1] = [shape([(0, 0), (0, 1), (1, 0), (1, 1)])];

const S_STATES: [PieceShape; 4] = [
    shape([(0, 1), (0, 2), (1, 0), (1, 1)]),
    shape([(0, 1), (1, 1), (1, 2), (2, 2)]),
    shape([(1, 1), (1, 2), (2, 0), (2, 1)]),
    shape([(0, 0), (1, 0), (1, 1), (2, 1)]),
];

const T_STATES: [PieceShape; 4] = [
    shape([(0, 1), (1, 0), (1, 1), (1, 2)]),
    shape([(0, 1), (1, 1), (1, 2), (2, 1)]),
    shape([(1, 0), (1, 1), (1, 2), (2, 1)]),
    shape([(0, 1), (1, 0), (1, 1), (2, 1)]),
];

const Z_STATES: [PieceShape; 4] = [
    shape([(0, 0), (0, 1), (1, 1), (1, 2)]),
    shape([(0, 2), (1, 1), (1, 2), (2, 1)]),
    shape([(1, 0), (1, 1), (2, 1), (2, 2)]),
    shape([(0, 1), (1, 0), (1, 1), (2, 0)]),
];

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn rotation(index: usize) -> PieceRotation {
        PieceRotation::new(u8::try_from(index).unwrap())
    }

    fn offset_set(offsets: &[CellOffset; 4]) -> BTreeSet<(i8, i8)> {
        offsets.iter().map(|o| (o.row, o.col)).collect()
    }

    /// Rotates offsets 90° clockwise inside an `size`×`size` box.
    fn rotated_clockwise(offsets: &[CellOffset; 4], size: i8) -> BTreeSet<(i8, i8)> {
        offsets.iter().map(|o| (o.col, size - 1 - o.row)).collect()
    }

    #[test]
    fn test_every_state_has_four_distinct_cells() {
        for kind in PieceKind::ALL {
            for index in 0..kind.rotation_count() {
                let offsets = kind.offsets(rotation(index));
                assert_eq!(offset_set(offsets).len(), 4, "{kind:?} state {index}");
            }
        }
    }

    #[test]
    fn test_states_are_clockwise_rotations_of_one_shape() {
        for kind in PieceKind::ALL {
            let size = match kind {
                PieceKind::I => 4,
                PieceKind::O => 2,
                _ => 3,
            };
            let count = kind.rotation_count();
            for index in 0..count {
                let current = kind.offsets(rotation(index));
                let next = kind.offsets(rotation((index + 1) % count));
                if kind == PieceKind::O {
                    assert_eq!(offset_set(current), offset_set(next));
                } else {
                    assert_eq!(
                        rotated_clockwise(current, size),
                        offset_set(next),
                        "{kind:?} state {index}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_rotation_counts() {
        assert_eq!(PieceKind::O.rotation_count(), 1);
        for kind in PieceKind::ALL.into_iter().filter(|k| *k != PieceKind::O) {
            assert_eq!(kind.rotation_count(), 4);
        }
    }

    #[test]
    fn test_id_roundtrip() {
        for (i, kind) in PieceKind::ALL.into_iter().enumerate() {
            assert_eq!(usize::from(kind.id()), i + 1);
            assert_eq!(PieceKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(PieceKind::from_id(0), None);
        assert_eq!(PieceKind::from_id(8), None);
    }

    #[test]
    fn test_char_conversion() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_char(kind.as_char()), Some(kind));
        }
        assert_eq!(PieceKind::from_char('X'), None);
        assert_eq!(PieceKind::from_char('t'), None);
    }

    #[test]
    fn test_spawn_cells_are_in_top_rows() {
        for kind in PieceKind::ALL {
            let piece = Piece::new(kind);
            for pos in piece.cell_positions() {
                assert!((0..2).contains(&pos.row), "{kind:?} at {pos:?}");
                assert!((3..7).contains(&pos.col), "{kind:?} at {pos:?}");
            }
        }
    }

    #[test]
    fn test_move_by_translates_all_cells() {
        let mut piece = Piece::new(PieceKind::S);
        let before = piece.cell_positions();
        piece.move_by(2, -1);
        let after = piece.cell_positions();
        for (b, a) in before.iter().zip(&after) {
            assert_eq!(b.translated(2, -1), *a);
        }
        assert_eq!(piece.position(), CellPosition::new(2, 2));
    }

    #[test]
    fn test_rotate_wraps_after_full_cycle() {
        for kind in PieceKind::ALL {
            let mut piece = Piece::new(kind);
            let original = piece;
            for _ in 0..kind.rotation_count() {
                piece.rotate();
            }
            assert_eq!(piece.rotation(), original.rotation());
            assert_eq!(piece.cell_positions(), original.cell_positions());
        }
    }

    #[test]
    fn test_undo_rotation_restores_prior_state() {
        let mut piece = Piece::new(PieceKind::T);
        piece.rotate();
        piece.rotate();
        assert_eq!(piece.rotation(), PieceRotation::new(2));
        piece.undo_rotation();
        assert_eq!(piece.rotation(), PieceRotation::new(1));
        // Only one level of history exists.
        piece.undo_rotation();
        assert_eq!(piece.rotation(), PieceRotation::new(1));
    }

    #[test]
    fn test_undo_without_rotation_is_noop() {
        let mut piece = Piece::new(PieceKind::J);
        piece.undo_rotation();
        assert_eq!(piece.rotation(), PieceRotation::default());
    }

    #[test]
    fn test_rotate_wraps_from_last_state() {
        let mut piece = Piece::new(PieceKind::Z);
        for _ in 0..3 {
            piece.rotate();
        }
        assert_eq!(piece.rotation(), PieceRotation::new(3));
        piece.rotate();
        assert_eq!(piece.rotation(), PieceRotation::new(0));
        piece.undo_rotation();
        assert_eq!(piece.rotation(), PieceRotation::new(3));
    }
}
