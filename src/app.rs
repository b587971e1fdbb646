use std::time::Instant;

use tracing::warn;

use crate::error::SessionError;
use crate::game::GameStatus;
use crate::input::{Direction, GameInput};
use crate::input_buffer::Timestamp;
use crate::session::GameSession;

/// Which screen the terminal front end is showing.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Screen {
    /// Difficulty selection; `selected` indexes the preset table.
    Menu { selected: usize },
    Playing,
}

/// Whether the event loop keeps running.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Front-end state wrapped around a [`GameSession`].
#[derive(Debug)]
pub struct App {
    pub session: GameSession,
    pub screen: Screen,
    epoch: Instant,
}

impl App {
    /// Opens on the difficulty menu.
    #[must_use]
    pub fn new(session: GameSession, epoch: Instant) -> Self {
        Self {
            session,
            screen: Screen::Menu { selected: 0 },
            epoch,
        }
    }

    /// Skips the menu and starts `key` right away.
    pub fn start_with(&mut self, key: &str, now: Instant) -> Result<(), SessionError> {
        self.session.start_game(key, now)?;
        self.screen = Screen::Playing;
        Ok(())
    }

    /// Applies one external input event.
    pub fn handle_input(&mut self, input: GameInput, now: Instant) -> Flow {
        if input == GameInput::Quit {
            self.session.stop();
            return Flow::Quit;
        }

        match self.screen {
            Screen::Menu { selected } => self.handle_menu_input(selected, input, now),
            Screen::Playing => self.handle_game_input(input, now),
        }

        Flow::Continue
    }

    /// Runs due timer callbacks.
    pub fn update(&mut self, now: Instant) {
        let _ = self.session.pump(now);
    }

    fn handle_menu_input(&mut self, selected: usize, input: GameInput, now: Instant) {
        let count = self.session.presets().len();
        match input {
            GameInput::Direction(Direction::Up) => {
                self.screen = Screen::Menu {
                    selected: (selected + count - 1) % count,
                };
            }
            GameInput::Direction(Direction::Down) => {
                self.screen = Screen::Menu {
                    selected: (selected + 1) % count,
                };
            }
            GameInput::Confirm => {
                let Some(key) = self
                    .session
                    .presets()
                    .iter()
                    .nth(selected)
                    .map(|preset| preset.key.clone())
                else {
                    return;
                };
                if let Err(error) = self.start_with(&key, now) {
                    warn!(%error, "could not start game from menu");
                }
            }
            _ => {}
        }
    }

    fn handle_game_input(&mut self, input: GameInput, now: Instant) {
        let game_over = self.session.discrete_state().status == GameStatus::GameOver;
        match input {
            GameInput::Direction(direction) => {
                let timestamp = self.timestamp(now);
                self.session.submit_direction(direction, timestamp);
            }
            GameInput::Confirm if game_over => {
                if let Err(error) = self.session.restart(now) {
                    warn!(%error, "could not restart game");
                }
            }
            GameInput::Menu => {
                self.session.stop();
                let selected = self
                    .session
                    .preset()
                    .and_then(|current| {
                        self.session
                            .presets()
                            .iter()
                            .position(|preset| preset.key == current.key)
                    })
                    .unwrap_or(0);
                self.screen = Screen::Menu { selected };
            }
            _ => {}
        }
    }

    fn timestamp(&self, now: Instant) -> Timestamp {
        u64::try_from(now.saturating_duration_since(self.epoch).as_millis()).unwrap_or(u64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use crate::config::DEFAULT_GRID;
    use crate::difficulty::PresetTable;
    use crate::game::GameStatus;
    use crate::input::{Direction, GameInput};
    use crate::session::GameSession;

    use super::{App, Flow, Screen};

    fn app(epoch: Instant) -> App {
        let session = GameSession::with_options(PresetTable::builtin(), DEFAULT_GRID, Some(1));
        App::new(session, epoch)
    }

    #[test]
    fn menu_selection_wraps_around() {
        let now = Instant::now();
        let mut app = app(now);

        app.handle_input(GameInput::Direction(Direction::Up), now);
        assert_eq!(app.screen, Screen::Menu { selected: 3 });

        app.handle_input(GameInput::Direction(Direction::Down), now);
        assert_eq!(app.screen, Screen::Menu { selected: 0 });
    }

    #[test]
    fn confirm_starts_the_selected_preset() {
        let now = Instant::now();
        let mut app = app(now);

        app.handle_input(GameInput::Direction(Direction::Down), now);
        app.handle_input(GameInput::Confirm, now);

        assert_eq!(app.screen, Screen::Playing);
        assert_eq!(app.session.preset().map(|preset| preset.key.as_str()), Some("medium"));
        assert_eq!(app.session.discrete_state().status, GameStatus::Running);
    }

    #[test]
    fn menu_key_stops_the_game_and_keeps_selection() {
        let now = Instant::now();
        let mut app = app(now);
        app.start_with("hard", now).expect("hard preset exists");

        app.handle_input(GameInput::Menu, now);

        assert_eq!(app.screen, Screen::Menu { selected: 2 });
        assert!(!app.session.is_live());
    }

    #[test]
    fn direction_keys_reach_the_simulation() {
        let start = Instant::now();
        let mut app = app(start);
        app.start_with("expert", start).expect("expert preset exists");

        app.handle_input(GameInput::Direction(Direction::Down), start);
        app.update(start + Duration::from_millis(100));

        assert_eq!(app.session.discrete_state().direction, Direction::Down);
    }

    #[test]
    fn quit_stops_the_session() {
        let now = Instant::now();
        let mut app = app(now);
        app.start_with("easy", now).expect("easy preset exists");

        assert_eq!(app.handle_input(GameInput::Quit, now), Flow::Quit);
        assert!(!app.session.is_live());
    }
}
