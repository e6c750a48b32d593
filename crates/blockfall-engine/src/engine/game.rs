use crate::{
    core::{board::Board, piece::Piece},
    engine::{
        game_stats::GameStats,
        piece_bag::{PieceBag, PieceSeed, PieceSupply},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GameState {
    Playing,
    GameOver,
}

/// A single game: board, falling piece, next piece, score.
///
/// Every command runs to completion before returning. Illegal moves and
/// rotations are reverted silently; the effect of a command is observed
/// through the query methods afterwards.
///
/// Only [`Self::move_down`] (and [`Self::soft_drop`], which calls it) can
/// lock a piece, which happens when the piece cannot move further down. In
/// [`GameState::GameOver`] every command except [`Self::reset`] is ignored.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Game, GameState};
///
/// let mut game = Game::new();
/// let kind = game.current_piece().kind();
///
/// // Gravity until the first piece locks at the bottom.
/// while game.stats().completed_pieces() == 0 {
///     game.move_down();
/// }
///
/// let bottom = game.board().rows().last().unwrap();
/// assert!(bottom.cells().iter().any(|cell| cell.kind() == Some(kind)));
/// assert_eq!(game.state(), GameState::Playing);
/// ```
#[derive(Debug, Clone)]
pub struct Game<S = PieceBag> {
    board: Board,
    current: Piece,
    next: Piece,
    supply: S,
    stats: GameStats,
    state: GameState,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Starts a game with a randomly seeded [`PieceBag`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_supply(PieceBag::new())
    }

    /// Starts a game whose piece sequence is fixed by `seed`.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self::with_supply(PieceBag::with_seed(seed))
    }
}

impl<S> Game<S>
where
    S: PieceSupply,
{
    /// Starts a game drawing pieces from `supply`.
    #[must_use]
    pub fn with_supply(mut supply: S) -> Self {
        let current = Piece::new(supply.next_kind());
        let next = Piece::new(supply.next_kind());
        Self {
            board: Board::new(),
            current,
            next,
            supply,
            stats: GameStats::new(),
            state: GameState::Playing,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn current_piece(&self) -> &Piece {
        &self.current
    }

    #[must_use]
    pub fn next_piece(&self) -> &Piece {
        &self.next
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    pub fn move_left(&mut self) {
        if self.state.is_playing() {
            self.try_move(0, -1);
        }
    }

    pub fn move_right(&mut self) {
        if self.state.is_playing() {
            self.try_move(0, 1);
        }
    }

    /// Moves the current piece one row down, or locks it if it cannot move.
    pub fn move_down(&mut self) {
        if !self.state.is_playing() {
            return;
        }
        if !self.try_move(1, 0) {
            self.lock_piece();
        }
    }

    /// Manual down press: [`Self::move_down`] plus one point.
    ///
    /// The point is added even when the press locks the piece, clears lines,
    /// or ends the game.
    pub fn soft_drop(&mut self) {
        if !self.state.is_playing() {
            return;
        }
        self.move_down();
        self.update_score(0, 1);
    }

    /// Rotates the current piece to its next state if the result fits.
    ///
    /// A single candidate is tried; there are no wall kicks.
    pub fn rotate(&mut self) {
        if !self.state.is_playing() {
            return;
        }
        self.current.rotate();
        if !self.block_fits() {
            log::trace!("rotation of {:?} rejected", self.current.kind());
            self.current.undo_rotation();
        }
    }

    /// Starts over: empty board, fresh supply, new pieces, zero score.
    pub fn reset(&mut self) {
        self.board.reset();
        self.supply.refill();
        self.current = Piece::new(self.supply.next_kind());
        self.next = Piece::new(self.supply.next_kind());
        self.stats = GameStats::new();
        self.state = GameState::Playing;
        log::info!("game reset");
    }

    /// Adds the line-clear bonus for `lines_cleared` and `manual_drop_points`.
    pub fn update_score(&mut self, lines_cleared: usize, manual_drop_points: usize) {
        self.stats.update_score(lines_cleared, manual_drop_points);
    }

    /// Returns `true` if every cell of the current piece is inside the board
    /// and empty.
    #[must_use]
    pub fn block_fits(&self) -> bool {
        self.current
            .cell_positions()
            .iter()
            .all(|&pos| self.board.is_empty(pos))
    }

    /// Translates the current piece, reverting if the result does not fit.
    fn try_move(&mut self, d_row: i32, d_col: i32) -> bool {
        self.current.move_by(d_row, d_col);
        if self.block_fits() {
            return true;
        }
        log::trace!(
            "move ({d_row}, {d_col}) of {:?} rejected",
            self.current.kind()
        );
        self.current.move_by(-d_row, -d_col);
        false
    }

    fn lock_piece(&mut self) {
        let kind = self.current.kind();
        for pos in self.current.cell_positions() {
            // Cells above the visible board are dropped.
            if let Err(err) = self.board.set_cell(pos, kind) {
                log::trace!("skipping locked cell: {err}");
            }
        }

        let next = Piece::new(self.supply.next_kind());
        self.current = std::mem::replace(&mut self.next, next);

        let cleared_lines = self.board.clear_full_rows();
        self.stats.complete_piece_lock(cleared_lines);
        if cleared_lines > 0 {
            self.update_score(cleared_lines, 0);
        }
        log::debug!("locked {kind:?}, cleared {cleared_lines} lines");

        if !self.block_fits() {
            self.state = GameState::GameOver;
            log::info!("game over with score {}", self.stats.score());
        }
    }
}
