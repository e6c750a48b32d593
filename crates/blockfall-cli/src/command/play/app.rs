use std::time::Duration;

use blockfall_engine::Game;
use crossterm::event::Event;
use ratatui::Frame;

use crate::{
    command::play::screen::PlayScreen,
    tui::{App, Tui},
};

#[derive(Debug)]
pub struct PlayApp {
    screen: PlayScreen,
    drop_interval: Duration,
}

impl PlayApp {
    pub fn new(game: Game, drop_interval: Duration) -> Self {
        Self {
            screen: PlayScreen::new(game),
            drop_interval,
        }
    }

    pub fn score(&self) -> usize {
        self.screen.game().score()
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        tui.set_tick_interval(Some(self.drop_interval));
    }

    fn should_exit(&self) -> bool {
        self.screen.is_exiting()
    }

    fn handle_event(&mut self, tui: &mut Tui, event: Event) {
        if self.screen.handle_event(&event) {
            // A fresh game gets a full interval before its first drop.
            tui.restart_tick();
        }
    }

    fn draw(&self, frame: &mut Frame) {
        self.screen.draw(frame);
    }

    fn update(&mut self, _tui: &mut Tui) {
        self.screen.apply_gravity();
    }
}
