//! World model: decoded grid snapshot and the value types the agent reasons over
//!
//! A snapshot's text is decoded once into a matrix of [`Cell`]s; every
//! later query (marker lookup, wrapped indexing, toroidal distance) works on
//! that matrix, never on raw characters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::game::constants::markers;
use crate::util::torus::{self, Position};

/// Facing direction of a player or bolt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    North,
    South,
    East,
    West,
}

impl Orientation {
    /// All orientations, in the order heading inference tries them
    pub const ALL: [Orientation; 4] = [
        Orientation::North,
        Orientation::South,
        Orientation::East,
        Orientation::West,
    ];

    /// Unit step for this orientation (north is towards row 0)
    #[inline]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Orientation::North => (0, -1),
            Orientation::South => (0, 1),
            Orientation::East => (1, 0),
            Orientation::West => (-1, 0),
        }
    }

    /// Orientation after a 90 degree counter-clockwise turn
    #[inline]
    pub fn left(self) -> Self {
        match self {
            Orientation::North => Orientation::West,
            Orientation::South => Orientation::East,
            Orientation::East => Orientation::North,
            Orientation::West => Orientation::South,
        }
    }

    /// Orientation after a 90 degree clockwise turn
    #[inline]
    pub fn right(self) -> Self {
        match self {
            Orientation::North => Orientation::East,
            Orientation::South => Orientation::West,
            Orientation::East => Orientation::South,
            Orientation::West => Orientation::North,
        }
    }

    /// Dense index, used for per-orientation bitsets
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Orientation::North => 0,
            Orientation::South => 1,
            Orientation::East => 2,
            Orientation::West => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::North => "north",
            Orientation::South => "south",
            Orientation::East => "east",
            Orientation::West => "west",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single action a player submits per turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    #[serde(rename = "move")]
    Move,
    #[serde(rename = "left")]
    TurnLeft,
    #[serde(rename = "right")]
    TurnRight,
    #[serde(rename = "fire")]
    Fire,
    #[serde(rename = "noop")]
    Noop,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Move,
        Action::TurnLeft,
        Action::TurnRight,
        Action::Fire,
        Action::Noop,
    ];

    /// Wire name, also the final path segment of a turn request
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Move => "move",
            Action::TurnLeft => "left",
            Action::TurnRight => "right",
            Action::Fire => "fire",
            Action::Noop => "noop",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of one grid square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    /// The agent's own marker
    Myself,
    Enemy,
    Wall,
    Battery,
    Bolt,
}

impl Cell {
    /// Decode a marker; anything unrecognized is empty floor
    #[inline]
    pub fn from_marker(c: char) -> Self {
        match c {
            markers::SELF => Cell::Myself,
            markers::ENEMY => Cell::Enemy,
            markers::WALL => Cell::Wall,
            markers::BATTERY => Cell::Battery,
            markers::BOLT => Cell::Bolt,
            _ => Cell::Empty,
        }
    }

    #[inline]
    pub fn marker(self) -> char {
        match self {
            Cell::Empty => markers::EMPTY,
            Cell::Myself => markers::SELF,
            Cell::Enemy => markers::ENEMY,
            Cell::Wall => markers::WALL,
            Cell::Battery => markers::BATTERY,
            Cell::Bolt => markers::BOLT,
        }
    }
}

/// Snapshot text that does not decode into a rectangular matrix
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedGrid {
    #[error("malformed grid: snapshot has no cells")]
    Empty,
    #[error("malformed grid: row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Decoded snapshot of the toroidal grid
///
/// Cells are stored row-major. Coordinates passed to queries are wrapped
/// first, so no query can index out of range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Decode newline-delimited rows of single-character cells
    ///
    /// Width is taken from the first row; every other row must match it.
    pub fn decode(text: &str) -> Result<Self, MalformedGrid> {
        let mut cells = Vec::with_capacity(text.len());
        let mut width = 0;
        let mut height = 0;

        for (row, line) in text.lines().enumerate() {
            let before = cells.len();
            cells.extend(line.chars().map(Cell::from_marker));
            let found = cells.len() - before;

            if row == 0 {
                width = found;
            } else if found != width {
                return Err(MalformedGrid::RaggedRow {
                    row,
                    expected: width,
                    found,
                });
            }
            height += 1;
        }

        if width == 0 || height == 0 {
            return Err(MalformedGrid::Empty);
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width as i32
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height as i32
    }

    /// Number of cells
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Canonicalize a position onto this torus
    #[inline]
    pub fn wrap(&self, position: Position) -> Position {
        position.wrapped(self.width(), self.height())
    }

    /// Row-major index of a (wrapped) position
    #[inline]
    pub fn index_of(&self, position: Position) -> usize {
        let p = self.wrap(position);
        p.y as usize * self.width + p.x as usize
    }

    #[inline]
    fn position_of(&self, index: usize) -> Position {
        Position::new((index % self.width) as i32, (index / self.width) as i32)
    }

    #[inline]
    pub fn cell_at(&self, position: Position) -> Cell {
        self.cells[self.index_of(position)]
    }

    /// Positions holding `kind`, in row-major order
    pub fn positions_of(&self, kind: Cell) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, cell)| **cell == kind)
            .map(move |(i, _)| self.position_of(i))
    }

    /// First match scanning rows top to bottom, columns left to right
    pub fn find_first(&self, kind: Cell) -> Option<Position> {
        self.positions_of(kind).next()
    }

    /// Closest match by wrapped Manhattan range
    ///
    /// Ties go to the match met first in row-major order.
    pub fn find_closest(&self, kind: Cell, from: Position) -> Option<Position> {
        let mut best: Option<(Position, u32)> = None;
        for position in self.positions_of(kind) {
            let range = self.range(from, position);
            match best {
                Some((_, best_range)) if range >= best_range => {}
                _ => best = Some((position, range)),
            }
        }
        best.map(|(position, _)| position)
    }

    /// Shortest signed offset from `source` to `target` on this torus
    #[inline]
    pub fn offset(&self, target: Position, source: Position) -> (i32, i32) {
        torus::shortest_offset(target, source, self.width(), self.height())
    }

    #[inline]
    pub fn range(&self, a: Position, b: Position) -> u32 {
        torus::manhattan_range(a, b, self.width(), self.height())
    }

    /// Re-encode the grid as text, one row per line
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.height);
        for (i, row) in self.cells.chunks(self.width).enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.extend(row.iter().map(|cell| cell.marker()));
        }
        out
    }
}

impl FromStr for Grid {
    type Err = MalformedGrid;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Grid::decode(s)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Everything the server tells the agent about itself for one turn
///
/// Replaced wholesale each turn.
#[derive(Debug, Clone)]
pub struct PlayerTurnState {
    pub health: i64,
    pub energy: i64,
    pub orientation: Orientation,
    pub grid: Grid,
}

impl PlayerTurnState {
    /// Where the agent's marker is, if it is on the grid at all
    pub fn me(&self) -> Option<Position> {
        self.grid.find_first(Cell::Myself)
    }
}
