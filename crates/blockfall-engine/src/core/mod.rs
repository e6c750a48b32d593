//! Board, piece geometry, and cell coordinates.

pub use self::{board::*, piece::*, position::*};

pub(crate) mod board;
pub(crate) mod piece;
pub(crate) mod position;
