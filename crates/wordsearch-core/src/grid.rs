use crate::direction::Direction;
use crate::error::GridError;
use crate::placement::WordId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A cell coordinate, row first, zero based from the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A single grid cell: its letter (once written) and the words running through it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    letter: Option<char>,
    occupants: BTreeSet<WordId>,
}

impl Cell {
    pub fn letter(&self) -> Option<char> {
        self.letter
    }

    pub fn occupants(&self) -> &BTreeSet<WordId> {
        &self.occupants
    }

    pub fn is_empty(&self) -> bool {
        self.letter.is_none()
    }

    /// True when at least one placed word passes through this cell
    pub fn is_occupied(&self) -> bool {
        !self.occupants.is_empty()
    }
}

/// The rectangular letter grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an all-empty grid
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::default(); rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Check signed coordinates against the grid bounds
    pub fn contains(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }

    fn index(&self, pos: Position) -> Result<usize, GridError> {
        if pos.row < self.rows && pos.col < self.cols {
            Ok(pos.row * self.cols + pos.col)
        } else {
            Err(self.out_of_bounds(pos.row as isize, pos.col as isize))
        }
    }

    fn out_of_bounds(&self, row: isize, col: isize) -> GridError {
        GridError::OutOfBounds {
            row,
            col,
            rows: self.rows,
            cols: self.cols,
        }
    }

    pub fn get(&self, pos: Position) -> Result<&Cell, GridError> {
        let idx = self.index(pos)?;
        Ok(&self.cells[idx])
    }

    pub fn letter(&self, pos: Position) -> Result<Option<char>, GridError> {
        self.get(pos).map(Cell::letter)
    }

    /// The cell `k` steps from `pos` in direction `dir`
    pub fn step(&self, pos: Position, dir: Direction, k: usize) -> Result<Position, GridError> {
        let (dr, dc) = dir.delta();
        let row = pos.row as isize + dr * k as isize;
        let col = pos.col as isize + dc * k as isize;
        if self.contains(row, col) {
            Ok(Position::new(row as usize, col as usize))
        } else {
            Err(self.out_of_bounds(row, col))
        }
    }

    /// Every cell of a `len`-cell straight path starting at `origin`
    pub fn path(&self, origin: Position, dir: Direction, len: usize) -> Result<Vec<Position>, GridError> {
        (0..len).map(|k| self.step(origin, dir, k)).collect()
    }

    /// Dry run of `try_write`: would writing `letter` here succeed?
    pub fn can_write(&self, pos: Position, letter: char) -> Result<(), GridError> {
        match self.get(pos)?.letter {
            Some(existing) if existing != letter => Err(GridError::LetterConflict {
                row: pos.row,
                col: pos.col,
                existing,
                requested: letter,
            }),
            _ => Ok(()),
        }
    }

    /// Write `letter` for `word` into an empty cell, or join a cell that
    /// already holds the same letter. A different letter is a conflict and
    /// leaves the cell untouched.
    pub fn try_write(&mut self, pos: Position, letter: char, word: WordId) -> Result<(), GridError> {
        self.can_write(pos, letter)?;
        let idx = self.index(pos)?;
        let cell = &mut self.cells[idx];
        cell.letter = Some(letter);
        cell.occupants.insert(word);
        Ok(())
    }

    /// Lay `text` along a path starting at `origin`. Either every cell is
    /// written or none is.
    pub fn try_place(
        &mut self,
        origin: Position,
        dir: Direction,
        text: &str,
        word: WordId,
    ) -> Result<(), GridError> {
        let path = self.path(origin, dir, text.chars().count())?;
        for (&pos, letter) in path.iter().zip(text.chars()) {
            self.can_write(pos, letter)?;
        }
        for (pos, letter) in path.into_iter().zip(text.chars()) {
            self.try_write(pos, letter, word)?;
        }
        Ok(())
    }

    /// Give an empty cell a letter with no owning word. Returns false if the
    /// cell already had one.
    pub(crate) fn fill_empty(&mut self, pos: Position, letter: char) -> Result<bool, GridError> {
        let idx = self.index(pos)?;
        let cell = &mut self.cells[idx];
        if cell.letter.is_some() {
            return Ok(false);
        }
        cell.letter = Some(letter);
        Ok(true)
    }

    /// All positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Position::new(row, col)))
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_empty()).count()
    }

    /// True once every cell has a letter
    pub fn is_filled(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    /// One string per row, `'.'` standing in for empty cells
    pub fn to_rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.cols.max(1))
            .take(self.rows)
            .map(|row| row.iter().map(|c| c.letter.unwrap_or('.')).collect())
            .collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.to_rows() {
            let spaced: Vec<String> = row.chars().map(String::from).collect();
            writeln!(f, "{}", spaced.join(" "))?;
        }
        Ok(())
    }
}
