use crate::game::Game;
use crate::settings::{data_dir, Settings};
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent};
use log::{info, warn};
use rand::seq::SliceRandom;
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use wordsearch_core::{Line, MatchResult, Position, WordId, BUILTIN_WORD_LISTS};

/// Result of handling a key press
pub enum AppAction {
    Continue,
    Quit,
}

/// The main application state
pub struct App {
    /// Current game
    pub game: Game,
    /// Cell under the cursor
    pub cursor: Position,
    /// First end of a line being drawn
    pub anchor: Option<Position>,
    /// Word picked in the list (target for hints)
    pub selected_word: Option<WordId>,
    /// Cell revealed by the last hint
    pub hint_cell: Option<Position>,
    /// Color theme
    pub theme: Theme,
    /// Persisted preferences
    pub settings: Settings,
    /// Message to display
    pub message: Option<String>,
    /// Message timer
    message_timer: u32,
    /// Whether the completion message has been shown
    win_announced: bool,
}

impl App {
    pub fn new(game: Game, settings: Settings) -> Self {
        let mut app = Self {
            cursor: Position::new(0, 0),
            anchor: None,
            selected_word: game.next_unfound(None),
            hint_cell: None,
            theme: settings.theme.theme(),
            settings,
            message: None,
            message_timer: 0,
            win_announced: false,
            game,
        };
        app.announce_unplaced();
        app
    }

    /// Get the tick rate
    pub fn get_tick_rate(&self) -> Duration {
        Duration::from_millis(100)
    }

    /// Update timers (called every tick)
    pub fn tick(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }
        if self.game.is_completed() && !self.win_announced {
            self.win_announced = true;
            self.show_message(&format!("You found all the words in {}!", self.game.elapsed_string()));
        }
    }

    /// Show a temporary message
    pub fn show_message(&mut self, msg: &str) {
        self.message = Some(msg.to_string());
        self.message_timer = 30; // ~3 seconds at 100ms poll
    }

    fn announce_unplaced(&mut self) {
        if !self.game.unplaced().is_empty() {
            let msg = format!("Could not place: {}", self.game.unplaced().join(", "));
            self.show_message(&msg);
        }
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') => return AppAction::Quit,
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1, 0),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1, 0),
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(0, -1),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(0, 1),
            KeyCode::Char(' ') | KeyCode::Enter => self.mark(),
            KeyCode::Esc => {
                self.anchor = None;
                self.hint_cell = None;
            }
            KeyCode::Tab => {
                self.selected_word = self.game.next_unfound(self.selected_word);
                self.hint_cell = None;
            }
            KeyCode::Char('?') => self.show_hint(),
            KeyCode::Char('n') => self.regenerate(),
            KeyCode::Char('r') => self.random_list(),
            KeyCode::Char('s') => self.save_game(),
            KeyCode::Char('o') => self.load_game(),
            KeyCode::Char('t') => self.cycle_theme(),
            _ => {}
        }
        AppAction::Continue
    }

    fn move_cursor(&mut self, row_delta: isize, col_delta: isize) {
        let max_row = self.game.puzzle().rows().saturating_sub(1) as isize;
        let max_col = self.game.puzzle().cols().saturating_sub(1) as isize;
        let row = (self.cursor.row as isize + row_delta).clamp(0, max_row) as usize;
        let col = (self.cursor.col as isize + col_delta).clamp(0, max_col) as usize;
        self.cursor = Position::new(row, col);
    }

    /// Drop the anchor, or close the line at the cursor and check it
    fn mark(&mut self) {
        let Some(start) = self.anchor.take() else {
            self.anchor = Some(self.cursor);
            return;
        };
        if self.game.is_completed() {
            return;
        }

        let already_found = self.game.puzzle().found_count();
        match self.game.select(start, self.cursor) {
            MatchResult::Match(id) => {
                let word = self
                    .game
                    .puzzle()
                    .registry()
                    .get(id)
                    .map(|w| w.word.clone())
                    .unwrap_or_default();
                if self.game.puzzle().found_count() > already_found {
                    let msg = format!(
                        "Found {word}! ({}/{})",
                        self.game.puzzle().found_count(),
                        self.game.puzzle().word_count()
                    );
                    self.show_message(&msg);
                    self.hint_cell = None;
                    if self.selected_word == Some(id) {
                        self.selected_word = self.game.next_unfound(Some(id));
                    }
                } else {
                    self.show_message(&format!("{word} already found"));
                }
            }
            MatchResult::NoMatch => self.show_message("No word there"),
            MatchResult::InvalidLine => self.show_message("Lines must be straight"),
            MatchResult::OutOfBounds => self.show_message("Line leaves the grid"),
        }
    }

    fn show_hint(&mut self) {
        let Some(id) = self.selected_word else {
            self.show_message("Press Tab to pick a word first");
            return;
        };
        match self.game.hint(id) {
            Some(cell) => {
                self.hint_cell = Some(cell);
                self.show_message("First letter highlighted");
            }
            None => self.show_message("Already found"),
        }
    }

    fn start(&mut self, game: Game) {
        self.game = game;
        self.cursor = Position::new(0, 0);
        self.anchor = None;
        self.hint_cell = None;
        self.selected_word = self.game.next_unfound(None);
        self.win_announced = false;
        self.show_message(&format!("New {} puzzle", self.game.title()));
        self.announce_unplaced();
    }

    /// New puzzle from the same words and size
    fn regenerate(&mut self) {
        let title = self.game.title().to_string();
        let words = self.game.words().to_vec();
        let (rows, cols) = (self.game.puzzle().rows(), self.game.puzzle().cols());
        match Game::new(&title, &words, rows, cols, None) {
            Ok(game) => self.start(game),
            Err(e) => self.show_message(&format!("Generation failed: {e}")),
        }
    }

    /// New puzzle from a randomly chosen built-in list
    fn random_list(&mut self) {
        let Some(list) = BUILTIN_WORD_LISTS.choose(&mut rand::thread_rng()) else {
            return;
        };
        let (rows, cols) = (self.game.puzzle().rows(), self.game.puzzle().cols());
        match Game::new(list.name, &list.to_vec(), rows, cols, None) {
            Ok(game) => self.start(game),
            Err(e) => self.show_message(&format!("Generation failed: {e}")),
        }
    }

    /// Get the save file path
    fn save_path() -> PathBuf {
        data_dir().join("puzzle_save.json")
    }

    /// Save the current game
    fn save_game(&mut self) {
        let path = Self::save_path();
        let result = self
            .game
            .serialize()
            .map_err(std::io::Error::from)
            .and_then(|json| {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&path, json)
            });
        match result {
            Ok(()) => {
                info!("saved puzzle to {}", path.display());
                self.show_message("Puzzle saved");
            }
            Err(e) => {
                warn!("saving to {} failed: {e}", path.display());
                self.show_message("Failed to save");
            }
        }
    }

    /// Load a saved game
    fn load_game(&mut self) {
        match fs::read_to_string(Self::save_path()) {
            Ok(json) => match Game::deserialize(&json) {
                Ok(game) => {
                    self.start(game);
                    self.win_announced = self.game.is_completed();
                    self.show_message("Puzzle loaded");
                }
                Err(e) => {
                    warn!("rejecting save file: {e}");
                    self.show_message("Invalid save file");
                }
            },
            Err(_) => self.show_message("No save file found"),
        }
    }

    fn cycle_theme(&mut self) {
        self.settings.theme = self.settings.theme.next();
        self.theme = self.settings.theme.theme();
        if let Err(e) = self.settings.save() {
            warn!("could not save settings: {e}");
        }
        self.show_message(&format!("{} theme", self.settings.theme.name()));
    }

    /// Cells between the anchor and the cursor, when they form a legal line
    pub fn preview_cells(&self) -> BTreeSet<Position> {
        self.anchor
            .and_then(|anchor| Line::between(anchor, self.cursor))
            .and_then(|line| line.cells(self.game.puzzle().grid()))
            .map(|cells| cells.into_iter().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        let words = vec!["SPARROW".to_string(), "ROBIN".to_string()];
        let game = Game::new("Birds", &words, 10, 10, Some(5)).unwrap();
        App::new(game, Settings::default())
    }

    fn move_to(app: &mut App, target: Position) {
        while app.cursor.row < target.row {
            app.handle_key(key(KeyCode::Down));
        }
        while app.cursor.row > target.row {
            app.handle_key(key(KeyCode::Up));
        }
        while app.cursor.col < target.col {
            app.handle_key(key(KeyCode::Right));
        }
        while app.cursor.col > target.col {
            app.handle_key(key(KeyCode::Left));
        }
    }

    #[test]
    fn test_cursor_clamped_to_grid() {
        let mut app = app();
        app.handle_key(key(KeyCode::Up));
        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.cursor, Position::new(0, 0));
        for _ in 0..20 {
            app.handle_key(key(KeyCode::Char('j')));
            app.handle_key(key(KeyCode::Char('l')));
        }
        assert_eq!(app.cursor, Position::new(9, 9));
    }

    #[test]
    fn test_drawing_a_word_finds_it() {
        let mut app = app();
        let id = app.game.puzzle().registry().id_of("ROBIN").unwrap();
        let p = app.game.puzzle().registry().get(id).unwrap().placement;

        move_to(&mut app, p.end());
        app.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(app.anchor, Some(p.end()));
        move_to(&mut app, p.origin);
        assert_eq!(app.preview_cells().len(), 5);
        app.handle_key(key(KeyCode::Enter));

        assert!(app.anchor.is_none());
        assert!(app.game.puzzle().is_found(id));
        assert_eq!(app.message.as_deref(), Some("Found ROBIN! (1/2)"));
    }

    #[test]
    fn test_escape_cancels_line() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char(' ')));
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Right));
        assert!(app.preview_cells().is_empty());
        app.handle_key(key(KeyCode::Esc));
        assert!(app.anchor.is_none());
        assert_eq!(app.game.puzzle().found_count(), 0);
    }

    #[test]
    fn test_hint_targets_selected_word() {
        let mut app = app();
        let selected = app.selected_word.unwrap();
        app.handle_key(key(KeyCode::Char('?')));
        let origin = app.game.puzzle().registry().get(selected).unwrap().placement.origin;
        assert_eq!(app.hint_cell, Some(origin));
        assert_eq!(app.game.hints_used(), 1);

        app.handle_key(key(KeyCode::Tab));
        assert_ne!(app.selected_word, Some(selected));
        assert!(app.hint_cell.is_none());
    }
}
