//! Rules engine for a falling-block puzzle game.
//!
//! The engine owns a fixed 20×10 [`Board`], the falling [`Piece`], the next
//! piece, and the score. A presentation layer drives it through discrete
//! commands on [`Game`] and reads the results back through its query methods;
//! the engine itself never draws, sleeps, or reads input.
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{Game, PieceSeed};
//!
//! let seed: PieceSeed = "0123456789abcdef0123456789abcdef".parse().unwrap();
//! let mut game = Game::with_seed(seed);
//!
//! game.move_left();
//! game.rotate();
//! game.soft_drop();
//!
//! assert_eq!(game.score(), 1);
//! assert!(!game.is_game_over());
//! ```

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("cell ({row}, {col}) is outside the board")]
pub struct OutOfBoundsError {
    pub row: i32,
    pub col: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParsePieceSeedError {
    #[display("invalid seed: expected 32 hex digits, got {_0}")]
    InvalidLength(#[error(not(source))] usize),
    #[display("invalid seed: {_0:?} is not a hex number")]
    InvalidDigit(#[error(not(source))] String),
}
