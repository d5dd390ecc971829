use thiserror::Error;

/// Failures of a single grid access or write
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        row: isize,
        col: isize,
        rows: usize,
        cols: usize,
    },
    #[error("cell ({row}, {col}) holds '{existing}', cannot write '{requested}'")]
    LetterConflict {
        row: usize,
        col: usize,
        existing: char,
        requested: char,
    },
}

/// Reasons `generate` refuses to run. A word that merely fails to fit is not
/// an error; it is reported in `Generation::unplaced`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("grid size {rows}x{cols} is outside {min}..={max}", min = crate::words::MIN_GRID_SIZE, max = crate::words::MAX_GRID_SIZE)]
    InvalidDimensions { rows: usize, cols: usize },
    #[error("'{0}' is not an uppercase word of 2 to 15 letters")]
    InvalidWord(String),
    #[error("'{0}' appears more than once in the word list")]
    DuplicateWord(String),
    #[error("grid write failed after a clean dry run: {0}")]
    Grid(#[from] GridError),
}

/// Problems found while restoring a saved puzzle
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    #[error("saved grid is {found_rows} rows of {found_cols:?} letters, expected {rows}x{cols}")]
    Dimensions {
        rows: usize,
        cols: usize,
        found_rows: usize,
        found_cols: Vec<usize>,
    },
    #[error("saved grid has invalid letter '{letter}' at ({row}, {col})")]
    BadLetter { row: usize, col: usize, letter: char },
    #[error("'{0}' is not a valid word")]
    BadWord(String),
    #[error("placement of '{0}' leaves the grid")]
    PlacementOutOfBounds(String),
    #[error("grid letters do not spell '{0}' along its placement")]
    PlacementMismatch(String),
}
