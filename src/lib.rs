//! Carve rectangular mazes out of a grid of walled cells
//!
//! Every cell starts with all four walls in place. A randomized depth-first
//! walk then knocks down walls until each cell is reachable from every other
//! one through exactly one path. Optionally, a number of extra walls are
//! removed afterwards, which opens up loops.
//!
//! # Examples
//! ## Perfect maze
//! ```
//! use mazemaker::{Direction, GenerateOptions, MazeGenerator};
//!
//! let mut gen = MazeGenerator::new(Some(13));
//! let maze = gen.generate(8, 6, GenerateOptions::default()).unwrap();
//!
//! assert_eq!(maze.cells().count(), 48);
//! // A spanning tree over 48 cells has 47 edges
//! assert_eq!(maze.passage_count(), 47);
//! // The outer border stays closed
//! assert!(maze[(0, 3)].has_wall(Direction::Left));
//! ```
//!
//! ## Maze with loops
//! ```
//! use mazemaker::{GenerateOptions, MazeGenerator};
//!
//! let mut gen = MazeGenerator::new(Some(13));
//! let maze = gen
//!     .generate(8, 6, GenerateOptions::default().with_loops(3))
//!     .unwrap();
//! assert_eq!(maze.passage_count(), 47 + maze.loops_placed());
//! maze.print_report();
//! ```

use std::fmt;
use std::ops::Index;

mod error;
pub mod maze_generator;

pub use error::MazeError;
pub use maze_generator::{GenerateOptions, MazeGenerator};

/// Side of a cell
///
/// `Up` points towards larger `y`, `Right` towards larger `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// All directions, in the order neighbors are examined
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Coordinate change `(dx, dy)` of one step in this direction
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (0, 1),
            Direction::Right => (1, 0),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
        }
    }

    /// Direction pointing back
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        };
        f.write_str(name)
    }
}

/// Wall flags of a single cell, `true` when the wall is present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Walls {
    pub up: bool,
    pub right: bool,
    pub down: bool,
    pub left: bool,
}

impl Walls {
    /// Every wall in place
    pub const CLOSED: Walls = Walls {
        up: true,
        right: true,
        down: true,
        left: true,
    };

    pub fn get(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up,
            Direction::Right => self.right,
            Direction::Down => self.down,
            Direction::Left => self.left,
        }
    }

    pub(crate) fn set(&mut self, direction: Direction, present: bool) {
        let wall = match direction {
            Direction::Up => &mut self.up,
            Direction::Right => &mut self.right,
            Direction::Down => &mut self.down,
            Direction::Left => &mut self.left,
        };
        *wall = present;
    }

    /// Number of walls still standing
    pub fn count(&self) -> usize {
        Direction::ALL.into_iter().filter(|&d| self.get(d)).count()
    }
}

impl Default for Walls {
    fn default() -> Self {
        Walls::CLOSED
    }
}

/// One position of the maze
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
    pub walls: Walls,
}

impl Cell {
    pub(crate) fn new(x: usize, y: usize) -> Self {
        Cell {
            x,
            y,
            walls: Walls::CLOSED,
        }
    }

    pub fn has_wall(&self, direction: Direction) -> bool {
        self.walls.get(direction)
    }
}

/// Position one step away from `(x, y)`, if it is still on a
/// `width` x `height` grid.
pub(crate) fn step_within(
    width: usize,
    height: usize,
    x: usize,
    y: usize,
    direction: Direction,
) -> Option<(usize, usize)> {
    let (dx, dy) = direction.offset();
    let nx = x.checked_add_signed(dx)?;
    let ny = y.checked_add_signed(dy)?;
    (nx < width && ny < height).then_some((nx, ny))
}

/// Finished maze
///
/// Cells are addressed by `(x, y)`, with `0 <= x < width` and
/// `0 <= y < height`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    width: usize,
    height: usize,
    /// Cells by column: `columns[x][y]`
    columns: Vec<Vec<Cell>>,
    /// Loops asked for in [GenerateOptions]
    loops_requested: usize,
    /// Loops actually opened
    loops_placed: usize,
}

impl Maze {
    pub(crate) fn new(
        width: usize,
        height: usize,
        columns: Vec<Vec<Cell>>,
        loops_requested: usize,
        loops_placed: usize,
    ) -> Self {
        Maze {
            width,
            height,
            columns,
            loops_requested,
            loops_placed,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at `(x, y)`, or `None` outside the maze
    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        self.columns.get(x)?.get(y)
    }

    /// Every cell, column by column
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.columns.iter().flatten()
    }

    /// Cell next to `cell` in `direction`, if there is one
    pub fn neighbor(&self, cell: &Cell, direction: Direction) -> Option<&Cell> {
        let (x, y) = step_within(self.width, self.height, cell.x, cell.y, direction)?;
        self.cell(x, y)
    }

    /// Number of removed walls between neighboring cells
    ///
    /// A perfect maze has `width * height - 1` passages, and each placed loop
    /// adds one.
    pub fn passage_count(&self) -> usize {
        self.cells()
            .map(|cell| {
                [Direction::Up, Direction::Right]
                    .into_iter()
                    .filter(|&d| !cell.has_wall(d) && self.neighbor(cell, d).is_some())
                    .count()
            })
            .sum()
    }

    pub fn loops_requested(&self) -> usize {
        self.loops_requested
    }

    pub fn loops_placed(&self) -> usize {
        self.loops_placed
    }

    /// Fail with [MazeError::LoopPlacementIncomplete] if some requested loops
    /// are missing.
    pub fn ensure_loops_placed(&self) -> Result<(), MazeError> {
        if self.loops_placed < self.loops_requested {
            return Err(MazeError::LoopPlacementIncomplete {
                requested: self.loops_requested,
                placed: self.loops_placed,
            });
        }
        Ok(())
    }

    /// Check that the border is closed and that neighbors agree on every
    /// shared wall.
    ///
    /// Neighbors are derived from the coordinates, so this does not rely on
    /// any state left over from generation.
    pub fn validate(&self) -> Result<(), MazeError> {
        for cell in self.cells() {
            for direction in Direction::ALL {
                let wall = cell.has_wall(direction);
                let reason = match self.neighbor(cell, direction) {
                    None if !wall => "perimeter wall is missing",
                    Some(other) if other.has_wall(direction.opposite()) != wall => {
                        "neighbor disagrees about the shared wall"
                    }
                    _ => continue,
                };
                return Err(MazeError::InvariantViolation {
                    x: cell.x,
                    y: cell.y,
                    direction,
                    reason,
                });
            }
        }
        Ok(())
    }

    /// One line summary of the maze
    pub fn report(&self) -> String {
        format!(
            "Generated a {}x{} maze with {} passages and {} of {} loops.",
            self.width,
            self.height,
            self.passage_count(),
            self.loops_placed,
            self.loops_requested
        )
    }

    /// Print report
    pub fn print_report(&self) {
        println!("{}", self.report())
    }
}

impl Index<(usize, usize)> for Maze {
    type Output = Cell;

    fn index(&self, (x, y): (usize, usize)) -> &Cell {
        &self.columns[x][y]
    }
}

/// Generate a maze using a random source seeded from the operating system
pub fn generate(
    width: usize,
    height: usize,
    options: GenerateOptions,
) -> Result<Maze, MazeError> {
    MazeGenerator::new(None).generate(width, height, options)
}
