/// Score values for simultaneous line clears.
///
/// Index corresponds to the number of lines cleared by one lock:
/// - 0 lines: 0 points
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points
const SCORE_TABLE: [usize; 5] = [0, 100, 300, 500, 800];

/// Returns the line-clear bonus for `lines` rows cleared at once.
///
/// Counts outside the table are worth nothing.
#[must_use]
pub fn line_clear_points(lines: usize) -> usize {
    SCORE_TABLE.get(lines).copied().unwrap_or(0)
}

/// Score and counters for one game.
///
/// - **Score**: line-clear bonuses plus manual drop points
/// - **Completed pieces**: total number of pieces locked
/// - **Line clear distribution**: count of locks by simultaneous clears
///
/// There are no levels, combos, or back-to-back bonuses.
///
/// # Example
///
/// ```
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_lock(2);
/// stats.update_score(2, 0);
/// stats.update_score(0, 1);
///
/// assert_eq!(stats.score(), 301);
/// assert_eq!(stats.total_cleared_lines(), 2);
/// assert_eq!(stats.line_cleared_counter()[2], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameStats {
    score: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl GameStats {
    /// Creates a tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns the number of pieces locked into the board.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of locks by lines cleared.
    ///
    /// `[0]` counts locks that cleared nothing, `[1]` singles, `[2]` doubles,
    /// `[3]` triples and `[4]` tetrises.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Adds the bonus for `lines_cleared` simultaneous lines, then
    /// `manual_drop_points`.
    pub fn update_score(&mut self, lines_cleared: usize, manual_drop_points: usize) {
        self.score += line_clear_points(lines_cleared);
        self.score += manual_drop_points;
    }

    /// Records one locked piece that cleared `cleared_lines` rows.
    ///
    /// Only counters change; the score is updated through
    /// [`Self::update_score`].
    pub fn complete_piece_lock(&mut self, cleared_lines: usize) {
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        if let Some(count) = self.line_cleared_counter.get_mut(cleared_lines) {
            *count += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_table() {
        let cases = [(0, 0), (1, 100), (2, 300), (3, 500), (4, 800), (5, 0)];
        for (lines, points) in cases {
            let mut stats = GameStats::new();
            stats.update_score(lines, 0);
            assert_eq!(stats.score(), points, "{lines} lines");
        }
    }

    #[test]
    fn test_manual_drop_points_always_added() {
        let mut stats = GameStats::new();
        stats.update_score(0, 1);
        assert_eq!(stats.score(), 1);
        stats.update_score(3, 1);
        assert_eq!(stats.score(), 502);
    }

    #[test]
    fn test_complete_piece_lock_counters() {
        let mut stats = GameStats::new();
        stats.complete_piece_lock(0);
        stats.complete_piece_lock(1);
        stats.complete_piece_lock(4);
        stats.complete_piece_lock(1);

        assert_eq!(stats.completed_pieces(), 4);
        assert_eq!(stats.total_cleared_lines(), 6);
        assert_eq!(stats.line_cleared_counter(), &[1, 2, 0, 0, 1]);
        assert_eq!(stats.score(), 0);
    }
}
