use crate::direction::Direction;
use crate::error::GridError;
use crate::grid::{Grid, Position};
use crate::words::MAX_PLACEMENT_ATTEMPTS;
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::ops::RangeInclusive;

/// Index of a word in its puzzle's registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WordId(pub usize);

/// Where a word sits: its first cell, reading direction, and length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub word: WordId,
    pub origin: Position,
    pub direction: Direction,
    pub length: usize,
}

impl Placement {
    /// The cell `k` letters into the word. Only meaningful for `k < length`
    /// on a placement that fits its grid.
    fn cell(&self, k: usize) -> Position {
        let (dr, dc) = self.direction.delta();
        Position::new(
            (self.origin.row as isize + dr * k as isize) as usize,
            (self.origin.col as isize + dc * k as isize) as usize,
        )
    }

    /// Every cell the word covers, first letter first
    pub fn cells(&self) -> Vec<Position> {
        (0..self.length).map(|k| self.cell(k)).collect()
    }

    /// The cell holding the last letter
    pub fn end(&self) -> Position {
        self.cell(self.length.saturating_sub(1))
    }
}

/// A registered word together with its placement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedWord {
    pub word: String,
    pub placement: Placement,
}

/// Word → placement mapping built during generation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlacementRegistry {
    words: Vec<PlacedWord>,
}

impl PlacementRegistry {
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get(&self, id: WordId) -> Option<&PlacedWord> {
        self.words.get(id.0)
    }

    /// Look a word up by its text
    pub fn id_of(&self, word: &str) -> Option<WordId> {
        self.words.iter().position(|w| w.word == word).map(WordId)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.id_of(word).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (WordId, &PlacedWord)> {
        self.words.iter().enumerate().map(|(i, w)| (WordId(i), w))
    }

    /// Id the next registered word will receive
    pub(crate) fn next_id(&self) -> WordId {
        WordId(self.words.len())
    }

    pub(crate) fn register(&mut self, word: &str, origin: Position, direction: Direction) -> WordId {
        let id = self.next_id();
        self.words.push(PlacedWord {
            word: word.to_string(),
            placement: Placement {
                word: id,
                origin,
                direction,
                length: word.chars().count(),
            },
        });
        id
    }
}

/// How candidate slots are searched for each word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlacementStrategy {
    /// Up to `max_attempts` random (direction, origin) draws per word
    #[default]
    RandomRetry,
    /// Every in-bounds (direction, origin) pair, tried in shuffled order
    Exhaustive,
}

/// Result of one placement pass over a word list
#[derive(Debug, Clone, Default)]
pub struct PlacementReport {
    pub registry: PlacementRegistry,
    /// Words that exhausted their attempts, in processing order
    pub unplaced: Vec<String>,
}

/// Origins for which a word spanning `span` extra cells along an axis with
/// step `delta` stays inside `0..extent`.
fn origin_range(delta: isize, extent: usize, span: usize) -> Option<RangeInclusive<usize>> {
    if extent == 0 {
        return None;
    }
    match delta {
        0 => Some(0..=extent - 1),
        _ if span >= extent => None,
        1 => Some(0..=extent - 1 - span),
        _ => Some(span..=extent - 1),
    }
}

/// Row and column origin ranges that keep a word of `len` letters in bounds
/// when running in `dir`, or `None` if it cannot fit that way at all.
pub fn origin_ranges(
    rows: usize,
    cols: usize,
    dir: Direction,
    len: usize,
) -> Option<(RangeInclusive<usize>, RangeInclusive<usize>)> {
    let span = len.saturating_sub(1);
    let (dr, dc) = dir.delta();
    Some((origin_range(dr, rows, span)?, origin_range(dc, cols, span)?))
}

/// Places words onto a grid, longest first
#[derive(Debug, Clone)]
pub struct PlacementEngine {
    max_attempts: usize,
    strategy: PlacementStrategy,
}

impl Default for PlacementEngine {
    fn default() -> Self {
        Self::new(MAX_PLACEMENT_ATTEMPTS, PlacementStrategy::RandomRetry)
    }
}

impl PlacementEngine {
    pub fn new(max_attempts: usize, strategy: PlacementStrategy) -> Self {
        Self {
            max_attempts,
            strategy,
        }
    }

    /// Place every word, longest first with ties kept in input order. Words
    /// that find no slot are returned in `unplaced`; a failure never stops
    /// the pass.
    pub fn place_all<R: Rng + ?Sized>(
        &self,
        grid: &mut Grid,
        words: &[String],
        rng: &mut R,
    ) -> Result<PlacementReport, GridError> {
        let mut order: Vec<&String> = words.iter().collect();
        order.sort_by_key(|w| Reverse(w.chars().count()));

        let mut report = PlacementReport::default();
        for word in order {
            let id = report.registry.next_id();
            match self.place_one(grid, word, id, rng)? {
                Some((origin, dir)) => {
                    debug!("placed {word} at {origin} heading {dir}");
                    report.registry.register(word, origin, dir);
                }
                None => {
                    debug!("no slot found for {word}");
                    report.unplaced.push(word.clone());
                }
            }
        }
        Ok(report)
    }

    fn place_one<R: Rng + ?Sized>(
        &self,
        grid: &mut Grid,
        word: &str,
        id: WordId,
        rng: &mut R,
    ) -> Result<Option<(Position, Direction)>, GridError> {
        let len = word.chars().count();
        let feasible: Vec<_> = Direction::ALL
            .into_iter()
            .filter_map(|dir| {
                origin_ranges(grid.rows(), grid.cols(), dir, len).map(|(rows, cols)| (dir, rows, cols))
            })
            .collect();

        let slot = match self.strategy {
            PlacementStrategy::RandomRetry => (0..self.max_attempts).find_map(|_| {
                let (dir, rows, cols) = feasible.choose(rng)?;
                let origin = Position::new(rng.gen_range(rows.clone()), rng.gen_range(cols.clone()));
                fits(grid, word, origin, *dir).then_some((origin, *dir))
            }),
            PlacementStrategy::Exhaustive => {
                let mut candidates: Vec<(Position, Direction)> = feasible
                    .iter()
                    .flat_map(|(dir, rows, cols)| {
                        rows.clone()
                            .flat_map(move |r| cols.clone().map(move |c| (Position::new(r, c), *dir)))
                    })
                    .collect();
                candidates.shuffle(rng);
                candidates
                    .into_iter()
                    .find(|&(origin, dir)| fits(grid, word, origin, dir))
            }
        };

        if let Some((origin, dir)) = slot {
            grid.try_place(origin, dir, word, id)?;
        }
        Ok(slot)
    }
}

/// Dry run: does `word` fit at `origin` without clashing letters?
fn fits(grid: &Grid, word: &str, origin: Position, dir: Direction) -> bool {
    grid.path(origin, dir, word.chars().count())
        .map(|path| {
            path.into_iter()
                .zip(word.chars())
                .all(|(pos, letter)| grid.can_write(pos, letter).is_ok())
        })
        .unwrap_or(false)
}
