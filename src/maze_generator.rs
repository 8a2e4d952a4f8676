//! Maze generation

use itertools::{iproduct, Itertools};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::{step_within, Cell, Direction, Maze, MazeError};

/// Random cell picks per loop before loop placement gives up
const LOOP_PLACEMENT_ATTEMPTS: usize = 16;

/// Generation settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Walls to remove after the spanning tree is complete
    ///
    /// Each removed wall opens one cycle. Zero gives a perfect maze.
    pub loops: usize,
}

impl GenerateOptions {
    pub fn with_loops(mut self, loops: usize) -> Self {
        self.loops = loops;
        self
    }
}

/// Maze generator
///
/// Holds the random source, so consecutive calls on the same generator
/// produce different mazes while a fixed seed reproduces the same sequence.
pub struct MazeGenerator<R = StdRng> {
    random: R,
}

impl MazeGenerator<StdRng> {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            random: if let Some(state) = seed {
                StdRng::seed_from_u64(state)
            } else {
                StdRng::from_entropy()
            },
        }
    }
}

impl<R: Rng> MazeGenerator<R> {
    /// Use a caller supplied random source
    pub fn with_rng(random: R) -> Self {
        Self { random }
    }

    /// Generate a `width` x `height` maze
    ///
    /// Uses the recursive backtracker: starting from a random cell, walk to a
    /// random unvisited neighbor, removing the wall in between, and step back
    /// along the path whenever the current cell has no unvisited neighbors
    /// left. The path is kept on an explicit stack.
    ///
    /// Fails with [MazeError::InvalidDimensions] if either side is zero or
    /// the maze would be a single cell. Other errors indicate a bug.
    pub fn generate(
        &mut self,
        width: usize,
        height: usize,
        options: GenerateOptions,
    ) -> Result<Maze, MazeError> {
        let size = match width.checked_mul(height) {
            Some(size) if width > 0 && height > 0 && size > 1 => size,
            _ => return Err(MazeError::InvalidDimensions { width, height }),
        };

        let mut grid = Workspace::new(width, height);
        let start = self.random.gen_range(0..size);
        self.carve_passages(&mut grid, start)?;

        let loops_placed = self.place_loops(&mut grid, options.loops)?;
        if loops_placed < options.loops {
            warn!(
                requested = options.loops,
                placed = loops_placed,
                "Could not place all requested loops"
            );
        }

        let maze = grid.into_maze(options.loops, loops_placed);
        maze.validate()?;
        info!(width, height, loops = loops_placed, "Maze generated");
        Ok(maze)
    }

    /// Depth-first walk over the grid, carving a spanning tree
    fn carve_passages(&mut self, grid: &mut Workspace, start: usize) -> Result<(), MazeError> {
        debug!(x = grid.cells[start].x, y = grid.cells[start].y, "Starting walk");

        let mut path = vec![start];
        grid.visited[start] = true;
        let mut unvisited = grid.cells.len() - 1;

        let mut candidates = Vec::with_capacity(Direction::ALL.len());
        let mut backtracks = 0usize;
        let mut longest_path = 1usize;

        while unvisited > 0 {
            let current = *path.last().ok_or(MazeError::EmptyPath { unvisited })?;

            candidates.clear();
            candidates.extend(grid.unvisited_neighbors(current));

            if candidates.is_empty() {
                path.pop();
                backtracks += 1;
                continue;
            }

            let (direction, next) = candidates[self.random.gen_range(0..candidates.len())];
            grid.carve(current, direction, next)?;
            grid.visited[next] = true;
            unvisited -= 1;
            path.push(next);
            longest_path = longest_path.max(path.len());
        }

        debug!(backtracks, longest_path, "Spanning tree complete");
        Ok(())
    }

    /// Remove up to `requested` extra walls, returning how many were removed
    fn place_loops(&mut self, grid: &mut Workspace, requested: usize) -> Result<usize, MazeError> {
        let mut placed = 0;
        let mut walled = Vec::with_capacity(Direction::ALL.len());

        'placing: while placed < requested {
            if grid.interior_walls == 0 {
                debug!(placed, "No interior walls left");
                break;
            }
            for _ in 0..LOOP_PLACEMENT_ATTEMPTS {
                let cell = self.random.gen_range(0..grid.cells.len());
                walled.clear();
                walled.extend(grid.walled_neighbors(cell));
                if walled.is_empty() {
                    continue;
                }
                let (direction, other) = walled[self.random.gen_range(0..walled.len())];
                grid.carve(cell, direction, other)?;
                placed += 1;
                continue 'placing;
            }
            debug!(placed, "Loop placement attempts exhausted");
            break;
        }
        Ok(placed)
    }
}

/// Mutable grid plus the scratch state that only lives during generation
///
/// Cells are stored column by column, index `x * height + y`.
struct Workspace {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    visited: Vec<bool>,
    /// Neighbor indices, by [Direction::index]
    neighbors: Vec<[Option<usize>; 4]>,
    /// Walls still standing between two cells
    interior_walls: usize,
}

impl Workspace {
    fn new(width: usize, height: usize) -> Self {
        let cells: Vec<Cell> = iproduct!(0..width, 0..height)
            .map(|(x, y)| Cell::new(x, y))
            .collect();
        let neighbors = cells
            .iter()
            .map(|cell| {
                Direction::ALL.map(|direction| {
                    step_within(width, height, cell.x, cell.y, direction)
                        .map(|(x, y)| x * height + y)
                })
            })
            .collect();

        Workspace {
            width,
            height,
            visited: vec![false; cells.len()],
            cells,
            neighbors,
            interior_walls: width * (height - 1) + height * (width - 1),
        }
    }

    fn unvisited_neighbors(&self, index: usize) -> impl Iterator<Item = (Direction, usize)> + '_ {
        self.neighbors_of(index)
            .filter(move |&(_, other)| !self.visited[other])
    }

    fn walled_neighbors(&self, index: usize) -> impl Iterator<Item = (Direction, usize)> + '_ {
        self.neighbors_of(index)
            .filter(move |&(direction, _)| self.cells[index].has_wall(direction))
    }

    fn neighbors_of(&self, index: usize) -> impl Iterator<Item = (Direction, usize)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |d| self.neighbors[index][d.index()].map(|other| (d, other)))
    }

    /// Remove the wall between `from` and its neighbor `to` in `direction`
    ///
    /// Both sides must still be standing.
    fn carve(&mut self, from: usize, direction: Direction, to: usize) -> Result<(), MazeError> {
        for (index, side) in [(from, direction), (to, direction.opposite())] {
            let cell = &self.cells[index];
            if !cell.has_wall(side) {
                return Err(MazeError::InvariantViolation {
                    x: cell.x,
                    y: cell.y,
                    direction: side,
                    reason: "wall was already removed",
                });
            }
        }
        self.cells[from].walls.set(direction, false);
        self.cells[to].walls.set(direction.opposite(), false);
        self.interior_walls -= 1;
        Ok(())
    }

    /// Drop the scratch state and arrange cells by column
    fn into_maze(self, loops_requested: usize, loops_placed: usize) -> Maze {
        let chunks = self.cells.into_iter().chunks(self.height);
        let columns = chunks.into_iter().map(|column| column.collect()).collect();
        Maze::new(
            self.width,
            self.height,
            columns,
            loops_requested,
            loops_placed,
        )
    }
}
