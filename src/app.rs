use crate::command::Command;
use crate::game::{Direction, GameSession};
use crate::highscores::HighscoreStore;
use crate::ticker::Ticker;
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::time::Instant;

/// The terminal front-end: draws the session, feeds it key presses as
/// intents, and drives its ticks
#[derive(Clone, Debug)]
pub(crate) struct App<R, S> {
    session: GameSession<R, S>,
    ticker: Ticker,
    quitting: bool,
}

impl<R: Rng, S: HighscoreStore> App<R, S> {
    pub(crate) fn new(session: GameSession<R, S>) -> App<R, S> {
        let ticker = Ticker::new(session.tick_interval());
        App {
            session,
            ticker,
            quitting: false,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting {
            self.draw(&mut terminal)?;
            self.process_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(&self.session.snapshot(), frame.area()))?;
        Ok(())
    }

    /// Wait for either the next tick or an input event, whichever comes
    /// first, and handle it
    fn process_input(&mut self) -> io::Result<()> {
        let wait = self.ticker.wait(Instant::now());
        if wait.is_zero() || !poll(wait)? {
            if self.ticker.fire(Instant::now()) {
                let _ = self.session.tick(&mut self.ticker);
            }
        } else {
            self.handle_event(read()?);
        }
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Some(ev) = event.as_key_press_event() else {
            return;
        };
        match Command::from_key_event(ev) {
            Some(Command::Quit) => self.quitting = true,
            Some(Command::Up) => self.session.on_direction_intent(Direction::Up),
            Some(Command::Down) => self.session.on_direction_intent(Direction::Down),
            Some(Command::Left) => self.session.on_direction_intent(Direction::Left),
            Some(Command::Right) => self.session.on_direction_intent(Direction::Right),
            Some(Command::Start) => self.session.on_start_intent(),
            None => (),
        }
    }
}
