use blockfall_engine::{Game, GameState};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout},
    text::{Line, Text},
    widgets::{Block as BlockWidget, Paragraph},
};

use crate::view::widgets::{
    BoardDisplay, KeyBinding, KeyBindingDisplay, PieceDisplay, StatsDisplay, style,
};

const PLAYING_BINDINGS: &[KeyBinding] = &[
    (&["←", "→"], "Move"),
    (&["↓"], "Soft Drop"),
    (&["↑"], "Rotate"),
    (&["q", "Esc"], "Quit"),
];

const GAME_OVER_BINDINGS: &[KeyBinding] = &[(&["any key"], "Restart"), (&["q", "Esc"], "Quit")];

#[derive(Debug)]
pub struct PlayScreen {
    game: Game,
    is_exiting: bool,
}

impl PlayScreen {
    pub fn new(game: Game) -> Self {
        Self {
            game,
            is_exiting: false,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn is_exiting(&self) -> bool {
        self.is_exiting
    }

    /// Applies one key press to the game.
    ///
    /// Returns `true` when the press restarted a finished game.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        let Some(key) = event.as_key_press_event() else {
            return false;
        };
        if is_quit_key(key) {
            self.is_exiting = true;
            return false;
        }

        match self.game.state() {
            GameState::GameOver => {
                self.game.reset();
                true
            }
            GameState::Playing => {
                match key.code {
                    KeyCode::Left => self.game.move_left(),
                    KeyCode::Right => self.game.move_right(),
                    KeyCode::Down => self.game.soft_drop(),
                    KeyCode::Up => self.game.rotate(),
                    _ => {}
                }
                false
            }
        }
    }

    /// Drops the falling piece by one row, as the timer does.
    pub fn apply_gravity(&mut self) {
        if self.game.state().is_playing() {
            self.game.move_down();
        }
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let is_playing = self.game.state().is_playing();

        let mut board = BoardDisplay::new(self.game.board())
            .block(BlockWidget::bordered().title(" BLOCKFALL "));
        if is_playing {
            board = board.falling_piece(self.game.current_piece());
        }
        let next = PieceDisplay::new()
            .piece(self.game.next_piece().kind())
            .block(BlockWidget::bordered().title(" NEXT "));
        let stats =
            StatsDisplay::new(&self.game).block(BlockWidget::bordered().title(" STATS "));
        let bindings = if is_playing {
            PLAYING_BINDINGS
        } else {
            GAME_OVER_BINDINGS
        };
        let help = KeyBindingDisplay::new(bindings);

        let side_width = next.width().max(stats.width());
        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(board.height()), Constraint::Length(1)])
                .areas(frame.area());
        let [board_area, side_area] = Layout::horizontal([
            Constraint::Length(board.width()),
            Constraint::Length(side_width),
        ])
        .flex(Flex::Center)
        .areas(main_area);
        let [next_area, stats_area, banner_area] = Layout::vertical([
            Constraint::Length(next.height()),
            Constraint::Length(stats.height()),
            Constraint::Length(4),
        ])
        .areas(side_area);

        frame.render_widget(&board, board_area);
        frame.render_widget(&next, next_area);
        frame.render_widget(stats, stats_area);
        if !is_playing {
            let banner = Paragraph::new(Text::from(vec![
                Line::styled("GAME OVER", style::GAME_OVER),
                Line::styled("press any key", style::DEFAULT),
            ]))
            .centered()
            .block(BlockWidget::bordered());
            frame.render_widget(banner, banner_area);
        }
        frame.render_widget(help, help_area);
    }
}

fn is_quit_key(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::PieceSeed;

    use super::*;

    fn screen() -> PlayScreen {
        PlayScreen::new(Game::with_seed(PieceSeed::from_bytes([3; 16])))
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn play_until_game_over(screen: &mut PlayScreen) {
        // Nothing moves sideways, so the stack in the spawn columns never
        // completes a row and must reach the top.
        for _ in 0..10_000 {
            if screen.game().is_game_over() {
                return;
            }
            screen.apply_gravity();
        }
        panic!("game did not end");
    }

    #[test]
    fn test_arrow_keys_move_piece() {
        let mut screen = screen();
        let start = screen.game().current_piece().position();

        assert!(!screen.handle_event(&press(KeyCode::Left)));
        assert_eq!(
            screen.game().current_piece().position(),
            start.translated(0, -1)
        );
        screen.handle_event(&press(KeyCode::Right));
        screen.handle_event(&press(KeyCode::Right));
        assert_eq!(
            screen.game().current_piece().position(),
            start.translated(0, 1)
        );
    }

    #[test]
    fn test_down_key_scores_one_point() {
        let mut screen = screen();
        let start = screen.game().current_piece().position();
        screen.handle_event(&press(KeyCode::Down));
        assert_eq!(screen.game().score(), 1);
        assert_eq!(
            screen.game().current_piece().position(),
            start.translated(1, 0)
        );
    }

    #[test]
    fn test_gravity_does_not_score() {
        let mut screen = screen();
        let start = screen.game().current_piece().position();
        screen.apply_gravity();
        assert_eq!(screen.game().score(), 0);
        assert_eq!(
            screen.game().current_piece().position(),
            start.translated(1, 0)
        );
    }

    #[test]
    fn test_quit_keys() {
        for event in [
            press(KeyCode::Char('q')),
            press(KeyCode::Esc),
            Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        ] {
            let mut screen = screen();
            screen.handle_event(&event);
            assert!(screen.is_exiting());
        }

        let mut screen = screen();
        screen.handle_event(&press(KeyCode::Char('c')));
        assert!(!screen.is_exiting());
    }

    #[test]
    fn test_any_key_restarts_after_game_over() {
        let mut screen = screen();
        play_until_game_over(&mut screen);
        assert!(screen.game().stats().completed_pieces() > 0);

        assert!(screen.handle_event(&press(KeyCode::Char('x'))));
        assert!(screen.game().state().is_playing());
        assert_eq!(screen.game().score(), 0);
        assert_eq!(screen.game().stats().completed_pieces(), 0);
        assert!(!screen.is_exiting());
    }

    #[test]
    fn test_quit_after_game_over_does_not_restart() {
        let mut screen = screen();
        play_until_game_over(&mut screen);

        assert!(!screen.handle_event(&press(KeyCode::Char('q'))));
        assert!(screen.is_exiting());
        assert!(screen.game().is_game_over());
    }

    #[test]
    fn test_gravity_stops_after_game_over() {
        let mut screen = screen();
        play_until_game_over(&mut screen);
        let pieces = screen.game().stats().completed_pieces();
        screen.apply_gravity();
        assert_eq!(screen.game().stats().completed_pieces(), pieces);
    }
}
