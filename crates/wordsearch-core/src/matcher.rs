//! Selection matching: turning a drawn start/end pair into a straight line
//! of cells and checking its letters against the registered words.

use crate::direction::Direction;
use crate::grid::{Grid, Position};
use crate::placement::{PlacementRegistry, WordId};
use serde::{Deserialize, Serialize};

/// Outcome of checking a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    /// The line spells a registered word in one of its two senses
    Match(WordId),
    /// A legal line that spells no registered word
    NoMatch,
    /// Start and end do not lie on one of the eight rays
    InvalidLine,
    /// Part of the line falls outside the grid
    OutOfBounds,
}

impl MatchResult {
    pub fn word(self) -> Option<WordId> {
        match self {
            MatchResult::Match(id) => Some(id),
            _ => None,
        }
    }
}

/// A straight selection of `steps + 1` cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    start: Position,
    direction: Direction,
    steps: usize,
}

impl Line {
    /// The line from `start` to `end`, if they are distinct and lie on a
    /// common horizontal, vertical, or diagonal ray.
    pub fn between(start: Position, end: Position) -> Option<Self> {
        let dr = end.row as isize - start.row as isize;
        let dc = end.col as isize - start.col as isize;
        let steps = dr.unsigned_abs().max(dc.unsigned_abs());
        if steps == 0 {
            return None;
        }
        // Each delta must be 0 or exactly `steps` in size
        if ![0, steps].contains(&dr.unsigned_abs()) || ![0, steps].contains(&dc.unsigned_abs()) {
            return None;
        }
        let direction = Direction::from_delta(dr.signum(), dc.signum())?;
        Some(Self {
            start,
            direction,
            steps,
        })
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Number of cells covered
    pub fn len(&self) -> usize {
        self.steps + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Cells of the line on `grid`, or `None` if any falls outside it
    pub fn cells(&self, grid: &Grid) -> Option<Vec<Position>> {
        grid.path(self.start, self.direction, self.len()).ok()
    }
}

/// Check the selection `start`..=`end` against `registry`. Both readings of
/// the line are tried; when both name registered words, one not yet found
/// (per `is_found`) wins. This is pure: recording the find is up to the
/// caller (see `Puzzle::select`).
pub fn match_line(
    grid: &Grid,
    registry: &PlacementRegistry,
    is_found: impl Fn(WordId) -> bool,
    start: Position,
    end: Position,
) -> MatchResult {
    let Some(line) = Line::between(start, end) else {
        return MatchResult::InvalidLine;
    };
    let Some(cells) = line.cells(grid) else {
        return MatchResult::OutOfBounds;
    };

    let mut letters = Vec::with_capacity(cells.len());
    for pos in cells {
        match grid.letter(pos) {
            Ok(Some(letter)) => letters.push(letter),
            // An unfilled cell cannot be part of any word
            Ok(None) => return MatchResult::NoMatch,
            Err(_) => return MatchResult::OutOfBounds,
        }
    }

    // Read the line in both senses of its axis, the drawn sense first
    let (axis, drawn) = line.direction().axis();
    let hits: Vec<WordId> = [drawn, drawn.flip()]
        .into_iter()
        .filter_map(|sense| {
            let text: String = if axis.direction(sense) == line.direction() {
                letters.iter().collect()
            } else {
                letters.iter().rev().collect()
            };
            registry.id_of(&text)
        })
        .collect();

    hits.iter()
        .copied()
        .find(|&id| !is_found(id))
        .or_else(|| hits.first().copied())
        .map_or(MatchResult::NoMatch, MatchResult::Match)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 10x10 grid with DOG east from (0,0), GOD south from (0,2), and CAT
    /// north-west ending at (3,3)
    fn fixture() -> (Grid, PlacementRegistry) {
        let mut grid = Grid::new(10, 10);
        let mut registry = PlacementRegistry::default();
        for (word, origin, dir) in [
            ("DOG", Position::new(0, 0), Direction::E),
            ("GOD", Position::new(0, 2), Direction::S),
            ("CAT", Position::new(5, 5), Direction::NW),
        ] {
            let id = registry.next_id();
            grid.try_place(origin, dir, word, id).unwrap();
            registry.register(word, origin, dir);
        }
        (grid, registry)
    }

    fn never_found(_: WordId) -> bool {
        false
    }

    #[test]
    fn test_line_between_accepts_rays() {
        let line = Line::between(Position::new(5, 5), Position::new(2, 8)).unwrap();
        assert_eq!(line.direction(), Direction::NE);
        assert_eq!(line.len(), 4);

        let line = Line::between(Position::new(5, 5), Position::new(5, 0)).unwrap();
        assert_eq!(line.direction(), Direction::W);
        assert_eq!(line.len(), 6);
    }

    #[test]
    fn test_line_between_rejects_other_angles() {
        assert!(Line::between(Position::new(0, 0), Position::new(1, 2)).is_none());
        assert!(Line::between(Position::new(4, 4), Position::new(0, 1)).is_none());
        assert!(Line::between(Position::new(3, 3), Position::new(3, 3)).is_none());
    }

    #[test]
    fn test_match_forward_and_reverse() {
        let (grid, registry) = fixture();
        let dog = registry.id_of("DOG").unwrap();
        let cat = registry.id_of("CAT").unwrap();

        let r = match_line(&grid, &registry, never_found, Position::new(0, 0), Position::new(0, 2));
        assert_eq!(r, MatchResult::Match(dog));

        let r = match_line(&grid, &registry, never_found, Position::new(3, 3), Position::new(5, 5));
        assert_eq!(r, MatchResult::Match(cat));
        let r = match_line(&grid, &registry, never_found, Position::new(5, 5), Position::new(3, 3));
        assert_eq!(r, MatchResult::Match(cat));
    }

    #[test]
    fn test_match_prefers_unfound_reading() {
        // DOG read backwards spells GOD, which is also registered
        let (grid, registry) = fixture();
        let dog = registry.id_of("DOG").unwrap();
        let god = registry.id_of("GOD").unwrap();

        let start = Position::new(0, 0);
        let end = Position::new(0, 2);
        assert_eq!(match_line(&grid, &registry, never_found, start, end), MatchResult::Match(dog));
        assert_eq!(match_line(&grid, &registry, |id| id == dog, start, end), MatchResult::Match(god));
        assert_eq!(match_line(&grid, &registry, |_| true, start, end), MatchResult::Match(dog));
    }

    #[test]
    fn test_match_rejections() {
        let (grid, registry) = fixture();
        let r = match_line(&grid, &registry, never_found, Position::new(0, 0), Position::new(1, 2));
        assert_eq!(r, MatchResult::InvalidLine);

        let r = match_line(&grid, &registry, never_found, Position::new(0, 0), Position::new(0, 0));
        assert_eq!(r, MatchResult::InvalidLine);

        let r = match_line(&grid, &registry, never_found, Position::new(9, 8), Position::new(9, 11));
        assert_eq!(r, MatchResult::OutOfBounds);

        let r = match_line(&grid, &registry, never_found, Position::new(0, 0), Position::new(0, 1));
        assert_eq!(r, MatchResult::NoMatch);

        // Partial word over empty cells
        let r = match_line(&grid, &registry, never_found, Position::new(0, 0), Position::new(0, 4));
        assert_eq!(r, MatchResult::NoMatch);
    }
}
