//! Game rules built on top of the core data structures.
//!
//! - [`Game`] - board, falling piece, next piece, score, and the command set
//! - [`GameStats`] - score table and lock/line counters
//! - [`PieceBag`] - 7-bag piece supply behind the [`PieceSupply`] trait
//! - [`PieceSeed`] - seed for deterministic piece generation
//!
//! # Game Flow
//!
//! 1. Create a [`Game`], optionally with a seed
//! 2. The presentation layer issues `move_left`/`move_right`/`rotate` from
//!    input and `move_down` from its gravity timer
//! 3. When the piece cannot move down it locks, full rows are cleared, and
//!    the next piece spawns
//! 4. Repeat until the spawned piece does not fit, then `reset`

pub use self::{game::*, game_stats::*, piece_bag::*};

mod game;
mod game_stats;
mod piece_bag;
