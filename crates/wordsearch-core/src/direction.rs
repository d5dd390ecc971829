use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the eight straight directions a word can run in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    /// Up
    N,
    /// Up-right
    NE,
    /// Right
    E,
    /// Down-right
    SE,
    /// Down
    S,
    /// Down-left
    SW,
    /// Left
    W,
    /// Up-left
    NW,
}

/// One of the four lines through a cell, independent of reading sense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Left-right
    Horizontal,
    /// Top-bottom
    Vertical,
    /// Top-left to bottom-right
    Diagonal,
    /// Bottom-left to top-right
    AntiDiagonal,
}

/// Which way along an axis a line is read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sense {
    Forward,
    Backward,
}

impl Sense {
    pub fn flip(self) -> Self {
        match self {
            Sense::Forward => Sense::Backward,
            Sense::Backward => Sense::Forward,
        }
    }
}

impl Direction {
    /// All eight directions, clockwise from north
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    /// Unit step as `(row delta, column delta)`; rows grow downwards
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::N => (-1, 0),
            Direction::NE => (-1, 1),
            Direction::E => (0, 1),
            Direction::SE => (1, 1),
            Direction::S => (1, 0),
            Direction::SW => (1, -1),
            Direction::W => (0, -1),
            Direction::NW => (-1, -1),
        }
    }

    /// Look up the direction for a unit step. Both components must be in
    /// `{-1, 0, 1}` and not both zero.
    pub fn from_delta(dr: isize, dc: isize) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.delta() == (dr, dc))
    }

    pub const fn opposite(self) -> Self {
        match self {
            Direction::N => Direction::S,
            Direction::NE => Direction::SW,
            Direction::E => Direction::W,
            Direction::SE => Direction::NW,
            Direction::S => Direction::N,
            Direction::SW => Direction::NE,
            Direction::W => Direction::E,
            Direction::NW => Direction::SE,
        }
    }

    /// Split into the axis this direction lies on and its sense along it.
    /// The forward sense of each axis points east or south.
    pub const fn axis(self) -> (Axis, Sense) {
        match self {
            Direction::E => (Axis::Horizontal, Sense::Forward),
            Direction::W => (Axis::Horizontal, Sense::Backward),
            Direction::S => (Axis::Vertical, Sense::Forward),
            Direction::N => (Axis::Vertical, Sense::Backward),
            Direction::SE => (Axis::Diagonal, Sense::Forward),
            Direction::NW => (Axis::Diagonal, Sense::Backward),
            Direction::NE => (Axis::AntiDiagonal, Sense::Forward),
            Direction::SW => (Axis::AntiDiagonal, Sense::Backward),
        }
    }

    /// Short identifier such as `"NE"`
    pub const fn name(self) -> &'static str {
        match self {
            Direction::N => "N",
            Direction::NE => "NE",
            Direction::E => "E",
            Direction::SE => "SE",
            Direction::S => "S",
            Direction::SW => "SW",
            Direction::W => "W",
            Direction::NW => "NW",
        }
    }
}

impl Axis {
    pub const ALL: [Axis; 4] = [
        Axis::Horizontal,
        Axis::Vertical,
        Axis::Diagonal,
        Axis::AntiDiagonal,
    ];

    pub const fn direction(self, sense: Sense) -> Direction {
        match (self, sense) {
            (Axis::Horizontal, Sense::Forward) => Direction::E,
            (Axis::Horizontal, Sense::Backward) => Direction::W,
            (Axis::Vertical, Sense::Forward) => Direction::S,
            (Axis::Vertical, Sense::Backward) => Direction::N,
            (Axis::Diagonal, Sense::Forward) => Direction::SE,
            (Axis::Diagonal, Sense::Backward) => Direction::NW,
            (Axis::AntiDiagonal, Sense::Forward) => Direction::NE,
            (Axis::AntiDiagonal, Sense::Backward) => Direction::SW,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
