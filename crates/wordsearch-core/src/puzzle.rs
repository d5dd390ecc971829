use crate::direction::Direction;
use crate::error::{GenerateError, PuzzleError};
use crate::fill::fill_empty_cells;
use crate::grid::{Grid, Position};
use crate::matcher::{match_line, MatchResult};
use crate::placement::{PlacementEngine, PlacementRegistry, PlacementStrategy, WordId};
use crate::words::{is_valid_word, MAX_GRID_SIZE, MAX_PLACEMENT_ATTEMPTS, MIN_GRID_SIZE};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Per-word solving progress. `Found` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WordStatus {
    #[default]
    Unfound,
    Found,
}

/// A generated puzzle and its solving state: the filled grid, where each
/// word sits, and which words have been found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SavedPuzzle", into = "SavedPuzzle")]
pub struct Puzzle {
    grid: Grid,
    registry: PlacementRegistry,
    status: Vec<WordStatus>,
}

impl Puzzle {
    fn new(grid: Grid, registry: PlacementRegistry) -> Self {
        let status = vec![WordStatus::Unfound; registry.len()];
        Self {
            grid,
            registry,
            status,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn registry(&self) -> &PlacementRegistry {
        &self.registry
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    pub fn status(&self, id: WordId) -> Option<WordStatus> {
        self.status.get(id.0).copied()
    }

    pub fn is_found(&self, id: WordId) -> bool {
        self.status(id) == Some(WordStatus::Found)
    }

    pub fn word_count(&self) -> usize {
        self.registry.len()
    }

    pub fn found_count(&self) -> usize {
        self.status.iter().filter(|&&s| s == WordStatus::Found).count()
    }

    /// All registered words found
    pub fn is_complete(&self) -> bool {
        self.status.iter().all(|&s| s == WordStatus::Found)
    }

    /// Check a drawn line and record a find. Selecting a word that is
    /// already found still reports the match but changes nothing.
    pub fn select(&mut self, start: Position, end: Position) -> MatchResult {
        let result = match_line(&self.grid, &self.registry, |id| self.is_found(id), start, end);
        if let MatchResult::Match(id) = result {
            if let Some(status) = self.status.get_mut(id.0) {
                if *status == WordStatus::Unfound {
                    *status = WordStatus::Found;
                    if let Some(w) = self.registry.get(id) {
                        debug!("found {} ({}/{})", w.word, self.found_count(), self.status.len());
                    }
                }
            }
        }
        result
    }

    /// First cell of an unfound word
    pub fn hint(&self, id: WordId) -> Option<Position> {
        if self.is_found(id) {
            return None;
        }
        self.registry.get(id).map(|w| w.placement.origin)
    }

    /// Cells covered by found words, for highlighting
    pub fn found_cells(&self) -> BTreeSet<Position> {
        self.registry
            .iter()
            .filter(|(id, _)| self.is_found(*id))
            .flat_map(|(_, w)| w.placement.cells())
            .collect()
    }

    /// Registered words in placement order with their status
    pub fn words(&self) -> impl Iterator<Item = (WordId, &str, WordStatus)> {
        self.registry
            .iter()
            .map(|(id, w)| (id, w.word.as_str(), self.status(id).unwrap_or_default()))
    }
}

/// Serialised form of a puzzle: letters by row plus each word's placement
/// and found flag. Cell occupants are rebuilt on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SavedPuzzle {
    rows: usize,
    cols: usize,
    letters: Vec<String>,
    words: Vec<SavedWord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SavedWord {
    word: String,
    origin: Position,
    direction: Direction,
    found: bool,
}

impl From<Puzzle> for SavedPuzzle {
    fn from(puzzle: Puzzle) -> Self {
        let words = puzzle
            .registry
            .iter()
            .map(|(id, w)| SavedWord {
                word: w.word.clone(),
                origin: w.placement.origin,
                direction: w.placement.direction,
                found: puzzle.is_found(id),
            })
            .collect();
        Self {
            rows: puzzle.grid.rows(),
            cols: puzzle.grid.cols(),
            letters: puzzle.grid.to_rows(),
            words,
        }
    }
}

impl TryFrom<SavedPuzzle> for Puzzle {
    type Error = PuzzleError;

    fn try_from(saved: SavedPuzzle) -> Result<Self, Self::Error> {
        let found_cols: Vec<usize> = saved.letters.iter().map(|r| r.chars().count()).collect();
        if saved.letters.len() != saved.rows || found_cols.iter().any(|&c| c != saved.cols) {
            return Err(PuzzleError::Dimensions {
                rows: saved.rows,
                cols: saved.cols,
                found_rows: saved.letters.len(),
                found_cols,
            });
        }

        let mut grid = Grid::new(saved.rows, saved.cols);
        for (row, line) in saved.letters.iter().enumerate() {
            for (col, letter) in line.chars().enumerate() {
                if !letter.is_ascii_uppercase() {
                    return Err(PuzzleError::BadLetter { row, col, letter });
                }
                grid.fill_empty(Position::new(row, col), letter)
                    .map_err(|_| PuzzleError::BadLetter { row, col, letter })?;
            }
        }

        let mut registry = PlacementRegistry::default();
        let mut status = Vec::with_capacity(saved.words.len());
        for entry in saved.words {
            if !is_valid_word(&entry.word) || registry.contains(&entry.word) {
                return Err(PuzzleError::BadWord(entry.word));
            }
            let path = grid
                .path(entry.origin, entry.direction, entry.word.len())
                .map_err(|_| PuzzleError::PlacementOutOfBounds(entry.word.clone()))?;
            let id = registry.next_id();
            for (pos, letter) in path.into_iter().zip(entry.word.chars()) {
                grid.try_write(pos, letter, id)
                    .map_err(|_| PuzzleError::PlacementMismatch(entry.word.clone()))?;
            }
            registry.register(&entry.word, entry.origin, entry.direction);
            status.push(if entry.found {
                WordStatus::Found
            } else {
                WordStatus::Unfound
            });
        }

        Ok(Self {
            grid,
            registry,
            status,
        })
    }
}

/// Configuration for puzzle generation
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Random slot draws per word (random retry strategy only)
    pub max_attempts: usize,
    pub strategy: PlacementStrategy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_attempts: MAX_PLACEMENT_ATTEMPTS,
            strategy: PlacementStrategy::RandomRetry,
        }
    }
}

/// One generation run: the finished puzzle plus every word that found no slot
#[derive(Debug, Clone)]
pub struct Generation {
    pub puzzle: Puzzle,
    pub unplaced: Vec<String>,
}

impl Generation {
    /// Every requested word made it onto the grid
    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }
}

/// Word search generator
pub struct Generator {
    config: GeneratorConfig,
    rng: StdRng,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    /// Create a generator seeded from the OS
    pub fn new() -> Self {
        Self::with_config(GeneratorConfig::default())
    }

    pub fn with_config(config: GeneratorConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a generator with a specific seed for reproducibility
    pub fn with_seed(seed: u64) -> Self {
        Self {
            config: GeneratorConfig::default(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config_mut(&mut self) -> &mut GeneratorConfig {
        &mut self.config
    }

    /// Run one generation pass: place the words longest first, then fill the
    /// remaining cells. Words that do not fit are returned in
    /// `Generation::unplaced`, never dropped.
    pub fn generate<S: AsRef<str>>(
        &mut self,
        words: &[S],
        rows: usize,
        cols: usize,
    ) -> Result<Generation, GenerateError> {
        let words = check_input(words, rows, cols)?;

        let mut grid = Grid::new(rows, cols);
        let engine = PlacementEngine::new(self.config.max_attempts, self.config.strategy);
        let report = engine.place_all(&mut grid, &words, &mut self.rng)?;
        fill_empty_cells(&mut grid, &mut self.rng)?;

        info!(
            "generated {rows}x{cols} puzzle with {} of {} words",
            report.registry.len(),
            words.len()
        );
        if !report.unplaced.is_empty() {
            warn!("could not place: {}", report.unplaced.join(", "));
        }

        Ok(Generation {
            puzzle: Puzzle::new(grid, report.registry),
            unplaced: report.unplaced,
        })
    }

    /// Rerun generation up to `max_runs` times until every word is placed.
    /// Returns the first complete run, or else the one with fewest unplaced
    /// words.
    pub fn generate_complete<S: AsRef<str>>(
        &mut self,
        words: &[S],
        rows: usize,
        cols: usize,
        max_runs: usize,
    ) -> Result<Generation, GenerateError> {
        let mut best = self.generate(words, rows, cols)?;
        for run in 1..max_runs {
            if best.is_complete() {
                break;
            }
            debug!("run {run}: {} words unplaced, retrying", best.unplaced.len());
            let next = self.generate(words, rows, cols)?;
            if next.unplaced.len() < best.unplaced.len() {
                best = next;
            }
        }
        Ok(best)
    }
}

/// Generate a puzzle in one pass. With `seed` set the result is reproducible.
pub fn generate<S: AsRef<str>>(
    words: &[S],
    rows: usize,
    cols: usize,
    seed: Option<u64>,
) -> Result<Generation, GenerateError> {
    let mut generator = match seed {
        Some(seed) => Generator::with_seed(seed),
        None => Generator::new(),
    };
    generator.generate(words, rows, cols)
}

fn check_input<S: AsRef<str>>(words: &[S], rows: usize, cols: usize) -> Result<Vec<String>, GenerateError> {
    let size = MIN_GRID_SIZE..=MAX_GRID_SIZE;
    if !size.contains(&rows) || !size.contains(&cols) {
        return Err(GenerateError::InvalidDimensions { rows, cols });
    }
    let mut seen = HashSet::new();
    words
        .iter()
        .map(|w| {
            let word = w.as_ref();
            if !is_valid_word(word) {
                Err(GenerateError::InvalidWord(word.to_string()))
            } else if !seen.insert(word) {
                Err(GenerateError::DuplicateWord(word.to_string()))
            } else {
                Ok(word.to_string())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Letter each placement implies per cell; panics on disagreement
    fn implied_letters(puzzle: &Puzzle) -> HashMap<Position, char> {
        let mut implied = HashMap::new();
        for (_, w) in puzzle.registry().iter() {
            for (pos, letter) in w.placement.cells().into_iter().zip(w.word.chars()) {
                let prev = implied.insert(pos, letter);
                assert!(prev.is_none() || prev == Some(letter), "conflict at {pos}");
            }
        }
        implied
    }

    #[test]
    fn test_cat_dog_scenario() {
        let mut generation = generate(&["CAT", "DOG"], 10, 10, Some(42)).unwrap();
        assert!(generation.is_complete());

        let puzzle = &mut generation.puzzle;
        assert!(puzzle.registry().contains("CAT"));
        assert!(puzzle.registry().contains("DOG"));
        assert!(puzzle.grid().is_filled());

        for word in ["CAT", "DOG"] {
            let id = puzzle.registry().id_of(word).unwrap();
            let p = puzzle.registry().get(id).unwrap().placement;
            assert_eq!(puzzle.select(p.origin, p.end()), MatchResult::Match(id));
        }
        assert!(puzzle.is_complete());
    }

    #[test]
    fn test_cat_catfish_intersect() {
        let mut puzzle = (0..500)
            .map(|seed| generate(&["CAT", "CATFISH"], 10, 10, Some(seed)).unwrap())
            .find(|g| {
                g.is_complete()
                    && g.puzzle.grid().positions().any(|p| {
                        g.puzzle.grid().get(p).unwrap().occupants().len() == 2
                    })
            })
            .expect("some seed makes the words cross")
            .puzzle;

        assert!(puzzle.registry().contains("CAT"));
        assert!(puzzle.registry().contains("CATFISH"));
        implied_letters(&puzzle);

        for word in ["CATFISH", "CAT"] {
            let id = puzzle.registry().id_of(word).unwrap();
            let p = puzzle.registry().get(id).unwrap().placement;
            assert_eq!(puzzle.select(p.origin, p.end()), MatchResult::Match(id), "{word}");
        }
        assert!(puzzle.is_complete());
    }

    #[test]
    fn test_generation_invariants_across_seeds() {
        let words = [
            "ELEPHANT", "GIRAFFE", "ZEBRA", "LION", "HIPPO", "RHINO", "APE", "CHEETAH", "GAZELLE", "OX",
        ];
        for seed in 0..30 {
            let generation = generate(&words, 10, 12, Some(seed)).unwrap();
            let puzzle = &generation.puzzle;

            // Completeness-or-report
            let mut accounted: Vec<&str> = puzzle.words().map(|(_, w, _)| w).collect();
            accounted.extend(generation.unplaced.iter().map(String::as_str));
            accounted.sort_unstable();
            let mut expected = words.to_vec();
            expected.sort_unstable();
            assert_eq!(accounted, expected, "seed {seed}");

            // Bounds and conflict-free
            for (pos, letter) in implied_letters(puzzle) {
                assert!(pos.row < 10 && pos.col < 12);
                assert_eq!(puzzle.grid().letter(pos).unwrap(), Some(letter));
            }

            // Fill completeness
            for pos in puzzle.grid().positions() {
                assert!(puzzle.grid().letter(pos).unwrap().is_some_and(|c| c.is_ascii_uppercase()));
            }
        }
    }

    #[test]
    fn test_match_soundness_and_reversibility() {
        let generation = generate(&["WOMBAT", "KOALA", "EMU", "DINGO"], 12, 12, Some(5)).unwrap();
        for (id, w) in generation.puzzle.registry().iter() {
            let p = w.placement;
            let mut forward = generation.puzzle.clone();
            assert_eq!(forward.select(p.origin, p.end()), MatchResult::Match(id), "{}", w.word);
            let mut backward = generation.puzzle.clone();
            assert_eq!(backward.select(p.end(), p.origin), MatchResult::Match(id), "{}", w.word);
        }
    }

    #[test]
    fn test_select_is_idempotent() {
        let mut puzzle = generate(&["PYTHON", "COBRA"], 10, 10, Some(11)).unwrap().puzzle;
        let id = puzzle.registry().id_of("COBRA").unwrap();
        let p = puzzle.registry().get(id).unwrap().placement;

        assert_eq!(puzzle.select(p.origin, p.end()), MatchResult::Match(id));
        let after_first = puzzle.clone();
        assert_eq!(puzzle.select(p.origin, p.end()), MatchResult::Match(id));
        assert_eq!(puzzle, after_first);
        assert_eq!(puzzle.found_count(), 1);
        assert!(!puzzle.is_complete());
    }

    #[test]
    fn test_select_rejects_bad_lines() {
        let mut puzzle = generate(&["ORCA"], 10, 10, Some(2)).unwrap().puzzle;
        assert_eq!(
            puzzle.select(Position::new(0, 0), Position::new(2, 1)),
            MatchResult::InvalidLine
        );
        assert_eq!(
            puzzle.select(Position::new(9, 9), Position::new(9, 12)),
            MatchResult::OutOfBounds
        );
        assert_eq!(puzzle.found_count(), 0);
    }

    #[test]
    fn test_hint_points_at_first_letter() {
        let mut puzzle = generate(&["SALMON", "TROUT"], 10, 10, Some(8)).unwrap().puzzle;
        let id = puzzle.registry().id_of("TROUT").unwrap();
        let p = puzzle.registry().get(id).unwrap().placement;

        let hint = puzzle.hint(id).unwrap();
        assert_eq!(hint, p.origin);
        assert_eq!(puzzle.grid().letter(hint).unwrap(), Some('T'));

        puzzle.select(p.origin, p.end());
        assert_eq!(puzzle.hint(id), None);
        assert_eq!(puzzle.hint(WordId(99)), None);
    }

    #[test]
    fn test_found_cells_follow_found_words() {
        let mut puzzle = generate(&["MAPLE", "OAK"], 10, 10, Some(4)).unwrap().puzzle;
        assert!(puzzle.found_cells().is_empty());
        let id = puzzle.registry().id_of("MAPLE").unwrap();
        let p = puzzle.registry().get(id).unwrap().placement;
        puzzle.select(p.end(), p.origin);
        assert_eq!(puzzle.found_cells(), p.cells().into_iter().collect());
    }

    #[test]
    fn test_invalid_input() {
        assert_eq!(
            generate(&["CAT"], 9, 10, None).unwrap_err(),
            GenerateError::InvalidDimensions { rows: 9, cols: 10 }
        );
        assert!(generate(&["CAT"], 10, 26, None).is_err());
        assert_eq!(
            generate(&["cat"], 10, 10, None).unwrap_err(),
            GenerateError::InvalidWord("cat".into())
        );
        assert_eq!(
            generate(&["ABCDEFGHIJKLMNOP"], 25, 25, None).unwrap_err(),
            GenerateError::InvalidWord("ABCDEFGHIJKLMNOP".into())
        );
        assert_eq!(
            generate(&["CAT", "DOG", "CAT"], 10, 10, None).unwrap_err(),
            GenerateError::DuplicateWord("CAT".into())
        );
    }

    #[test]
    fn test_oversized_word_reported_unplaced() {
        let generation = generate(&["ABCDEFGHIJKLMN", "CAT"], 10, 10, Some(1)).unwrap();
        assert_eq!(generation.unplaced, vec!["ABCDEFGHIJKLMN".to_string()]);
        assert!(generation.puzzle.grid().is_filled());
        assert_eq!(generation.puzzle.word_count(), 1);
    }

    #[test]
    fn test_generate_complete_retries() {
        let mut generator = Generator::with_seed(17);
        let words: Vec<String> = crate::word_lists::builtin("Christmas").unwrap().to_vec();
        let generation = generator.generate_complete(&words, 12, 12, 20).unwrap();
        assert!(generation.is_complete());
        assert_eq!(generation.puzzle.word_count(), words.len());
    }

    #[test]
    fn test_exhaustive_strategy() {
        let mut generator = Generator::with_seed(3);
        generator.config_mut().strategy = PlacementStrategy::Exhaustive;
        let words = crate::word_lists::builtin("Motorsports").unwrap().to_vec();
        let generation = generator.generate(&words, 15, 15).unwrap();
        assert!(generation.is_complete());
        implied_letters(&generation.puzzle);
    }

    #[test]
    fn test_serde_roundtrip_keeps_found_state() {
        let mut puzzle = generate(&["RED", "GREEN", "BLUE"], 10, 11, Some(21)).unwrap().puzzle;
        let id = puzzle.registry().id_of("GREEN").unwrap();
        let p = puzzle.registry().get(id).unwrap().placement;
        puzzle.select(p.origin, p.end());

        let json = serde_json::to_string(&puzzle).unwrap();
        let restored: Puzzle = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, puzzle);
        assert!(restored.is_found(id));
        assert_eq!(restored.found_count(), 1);
    }

    fn saved_json(letters: &[&str], words: &str) -> String {
        let rows = letters.len();
        let cols = letters.first().map_or(0, |r| r.len());
        format!(
            r#"{{"rows":{rows},"cols":{cols},"letters":{},"words":{words}}}"#,
            serde_json::to_string(letters).unwrap()
        )
    }

    #[test]
    fn test_intersecting_words_restore() {
        // CATFISH across the top, CAT down from its C
        let letters = ["CATFISH", "AQQQQQQ", "TQQQQQQ"];
        let words = r#"[
            {"word":"CATFISH","origin":{"row":0,"col":0},"direction":"E","found":false},
            {"word":"CAT","origin":{"row":0,"col":0},"direction":"S","found":false}
        ]"#;
        let mut puzzle: Puzzle = serde_json::from_str(&saved_json(&letters, words)).unwrap();
        implied_letters(&puzzle);

        let shared = puzzle.grid().get(Position::new(0, 0)).unwrap();
        assert_eq!(shared.occupants().len(), 2);

        let cat = puzzle.registry().id_of("CAT").unwrap();
        assert_eq!(puzzle.select(Position::new(2, 0), Position::new(0, 0)), MatchResult::Match(cat));
        // The first three letters of CATFISH also read CAT
        assert_eq!(puzzle.select(Position::new(0, 0), Position::new(0, 2)), MatchResult::Match(cat));
        assert_eq!(puzzle.found_count(), 1);
    }

    #[test]
    fn test_restore_rejects_corrupt_saves() {
        let letters = ["DOGX", "XXXX"];
        let bad_direction = r#"[{"word":"DOG","origin":{"row":0,"col":0},"direction":"S","found":false}]"#;
        let err = serde_json::from_str::<Puzzle>(&saved_json(&letters, bad_direction));
        assert!(err.is_err());

        let mismatch = r#"[{"word":"DOG","origin":{"row":1,"col":0},"direction":"E","found":false}]"#;
        assert!(serde_json::from_str::<Puzzle>(&saved_json(&letters, mismatch)).is_err());

        let ok = r#"[{"word":"DOG","origin":{"row":0,"col":0},"direction":"E","found":true}]"#;
        let puzzle: Puzzle = serde_json::from_str(&saved_json(&letters, ok)).unwrap();
        assert!(puzzle.is_complete());

        let ragged = saved_json(&["DOG", "XXXX"], ok);
        assert!(serde_json::from_str::<Puzzle>(&ragged).is_err());

        let lowercase = saved_json(&["dogx", "XXXX"], "[]");
        assert!(serde_json::from_str::<Puzzle>(&lowercase).is_err());
    }

    #[test]
    fn test_try_from_reports_error_kind() {
        let saved = SavedPuzzle {
            rows: 1,
            cols: 3,
            letters: vec!["DOG".into()],
            words: vec![SavedWord {
                word: "DOG".into(),
                origin: Position::new(0, 1),
                direction: Direction::E,
                found: false,
            }],
        };
        assert_eq!(
            Puzzle::try_from(saved).unwrap_err(),
            PuzzleError::PlacementOutOfBounds("DOG".into())
        );
    }
}
