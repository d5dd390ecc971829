use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use wordsearch_core::words::MAX_GENERATION_ATTEMPTS;
use wordsearch_core::{GenerateError, Generator, MatchResult, Position, Puzzle, WordId};

/// The game state: a puzzle being solved plus its clock and hint count
#[derive(Clone)]
pub struct Game {
    /// The puzzle and its found-state
    puzzle: Puzzle,
    /// Name of the word list the puzzle was built from
    title: String,
    /// The requested words, for regenerating the same list
    words: Vec<String>,
    /// Words the generator could not fit
    unplaced: Vec<String>,
    /// Start time
    start_time: Instant,
    /// Time banked before `start_time` (from a loaded save)
    elapsed: Duration,
    /// Whether every placed word has been found
    completed: bool,
    /// Number of hints used
    hints_used: usize,
}

impl Game {
    /// Generate a new puzzle, retrying whole generations until every word
    /// fits or the retry budget runs out
    pub fn new(
        title: &str,
        words: &[String],
        rows: usize,
        cols: usize,
        seed: Option<u64>,
    ) -> Result<Self, GenerateError> {
        let mut generator = match seed {
            Some(seed) => Generator::with_seed(seed),
            None => Generator::new(),
        };
        let generation = generator.generate_complete(words, rows, cols, MAX_GENERATION_ATTEMPTS)?;

        Ok(Self {
            completed: is_solved(&generation.puzzle),
            puzzle: generation.puzzle,
            title: title.to_string(),
            words: words.to_vec(),
            unplaced: generation.unplaced,
            start_time: Instant::now(),
            elapsed: Duration::ZERO,
            hints_used: 0,
        })
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn unplaced(&self) -> &[String] {
        &self.unplaced
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn hints_used(&self) -> usize {
        self.hints_used
    }

    /// Get the elapsed time
    pub fn elapsed(&self) -> Duration {
        if self.completed {
            self.elapsed
        } else {
            self.elapsed + self.start_time.elapsed()
        }
    }

    /// Format the elapsed time as MM:SS
    pub fn elapsed_string(&self) -> String {
        let secs = self.elapsed().as_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }

    /// Submit a drawn line
    pub fn select(&mut self, start: Position, end: Position) -> MatchResult {
        let result = self.puzzle.select(start, end);
        if !self.completed && is_solved(&self.puzzle) {
            self.elapsed += self.start_time.elapsed();
            self.completed = true;
        }
        result
    }

    /// Reveal the first cell of an unfound word
    pub fn hint(&mut self, id: WordId) -> Option<Position> {
        let cell = self.puzzle.hint(id)?;
        self.hints_used += 1;
        Some(cell)
    }

    /// The next unfound word after `current`, wrapping around
    pub fn next_unfound(&self, current: Option<WordId>) -> Option<WordId> {
        let count = self.puzzle.word_count();
        let start = current.map_or(0, |id| id.0 + 1);
        (0..count)
            .map(|offset| WordId((start + offset) % count))
            .find(|&id| !self.puzzle.is_found(id))
    }

    /// Serialize the game state for saving
    pub fn serialize(&self) -> serde_json::Result<String> {
        let state = SaveState {
            title: self.title.clone(),
            words: self.words.clone(),
            unplaced: self.unplaced.clone(),
            puzzle: self.puzzle.clone(),
            elapsed_secs: self.elapsed().as_secs(),
            hints_used: self.hints_used,
        };
        serde_json::to_string_pretty(&state)
    }

    /// Deserialize a saved game state
    pub fn deserialize(json: &str) -> serde_json::Result<Self> {
        let state: SaveState = serde_json::from_str(json)?;
        let completed = is_solved(&state.puzzle);
        Ok(Self {
            puzzle: state.puzzle,
            title: state.title,
            words: state.words,
            unplaced: state.unplaced,
            start_time: Instant::now(),
            elapsed: Duration::from_secs(state.elapsed_secs),
            completed,
            hints_used: state.hints_used,
        })
    }
}

/// A puzzle with no placed words has nothing to solve
fn is_solved(puzzle: &Puzzle) -> bool {
    puzzle.word_count() > 0 && puzzle.is_complete()
}

#[derive(Serialize, Deserialize)]
struct SaveState {
    title: String,
    words: Vec<String>,
    #[serde(default)]
    unplaced: Vec<String>,
    puzzle: Puzzle,
    elapsed_secs: u64,
    hints_used: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(words: &[&str]) -> Game {
        let words: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        Game::new("Test", &words, 10, 10, Some(99)).unwrap()
    }

    fn solve(game: &mut Game, word: &str) -> MatchResult {
        let id = game.puzzle().registry().id_of(word).unwrap();
        let p = game.puzzle().registry().get(id).unwrap().placement;
        game.select(p.origin, p.end())
    }

    #[test]
    fn test_completing_stops_clock() {
        let mut game = game(&["APPLE", "PEAR"]);
        assert!(!game.is_completed());

        assert!(matches!(solve(&mut game, "APPLE"), MatchResult::Match(_)));
        assert!(!game.is_completed());
        assert!(matches!(solve(&mut game, "PEAR"), MatchResult::Match(_)));
        assert!(game.is_completed());

        let frozen = game.elapsed();
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(game.elapsed(), frozen);
    }

    #[test]
    fn test_hints_counted_only_when_given() {
        let mut game = game(&["PLUM", "KIWI"]);
        let plum = game.puzzle().registry().id_of("PLUM").unwrap();
        assert!(game.hint(plum).is_some());
        solve(&mut game, "PLUM");
        assert!(game.hint(plum).is_none());
        assert_eq!(game.hints_used(), 1);
    }

    #[test]
    fn test_next_unfound_wraps_and_skips_found() {
        let mut game = game(&["MANGO", "GRAPE", "LIME"]);
        let first = game.next_unfound(None).unwrap();
        assert_eq!(first, WordId(0));
        solve(&mut game, "GRAPE");
        let grape = game.puzzle().registry().id_of("GRAPE").unwrap();
        let after = game.next_unfound(Some(first)).unwrap();
        assert_ne!(after, grape);
        assert_eq!(game.next_unfound(Some(WordId(2))), Some(WordId(0)));
    }

    #[test]
    fn test_save_and_restore() {
        let mut game = game(&["CHERRY", "DATE"]);
        solve(&mut game, "DATE");
        let json = game.serialize().unwrap();

        let restored = Game::deserialize(&json).unwrap();
        assert_eq!(restored.puzzle(), game.puzzle());
        assert_eq!(restored.title(), "Test");
        assert_eq!(restored.words(), game.words());
        assert_eq!(restored.puzzle().found_count(), 1);
        assert!(!restored.is_completed());

        assert!(Game::deserialize("{\"title\":\"x\"}").is_err());
    }

    #[test]
    fn test_nothing_placed_is_not_a_win() {
        let words = vec!["ABCDEFGHIJKLMN".to_string()];
        let game = Game::new("Test", &words, 10, 10, Some(1)).unwrap();
        assert_eq!(game.puzzle().word_count(), 0);
        assert_eq!(game.unplaced(), words.as_slice());
        assert!(!game.is_completed());

        let restored = Game::deserialize(&game.serialize().unwrap()).unwrap();
        assert!(!restored.is_completed());
    }
}
