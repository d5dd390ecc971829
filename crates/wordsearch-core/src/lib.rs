//! Word search engine
//!
//! Builds a rectangular letter grid with words hidden in any of eight
//! directions, fills the rest with random letters, and checks drawn lines
//! against the hidden words while a puzzle is being solved.
//!
//! ```
//! use wordsearch_core::{generate, MatchResult};
//!
//! let mut generation = generate(&["CAT", "DOG"], 10, 10, Some(7)).unwrap();
//! assert!(generation.unplaced.is_empty());
//!
//! let puzzle = &mut generation.puzzle;
//! let id = puzzle.registry().id_of("CAT").unwrap();
//! let placement = puzzle.registry().get(id).unwrap().placement;
//! assert_eq!(puzzle.select(placement.origin, placement.end()), MatchResult::Match(id));
//! ```

pub mod direction;
pub mod error;
pub mod export;
pub mod fill;
pub mod grid;
pub mod matcher;
pub mod placement;
pub mod puzzle;
pub mod word_lists;
pub mod words;

pub use direction::{Axis, Direction, Sense};
pub use error::{GenerateError, GridError, PuzzleError};
pub use fill::fill_empty_cells;
pub use grid::{Cell, Grid, Position};
pub use matcher::{match_line, Line, MatchResult};
pub use placement::{
    PlacedWord, Placement, PlacementEngine, PlacementRegistry, PlacementReport, PlacementStrategy, WordId,
};
pub use puzzle::{generate, Generation, Generator, GeneratorConfig, Puzzle, WordStatus};
pub use word_lists::{WordList, BUILTIN_WORD_LISTS};
pub use words::validate_words;
