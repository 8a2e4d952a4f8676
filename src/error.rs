//! Maze generation errors

use thiserror::Error;

use crate::Direction;

/// Failure to produce a maze
///
/// [MazeError::InvalidDimensions] is caused by the caller. [MazeError::EmptyPath]
/// and [MazeError::InvariantViolation] mean the generator itself is broken;
/// see [MazeError::is_internal].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    /// Width or height is zero, the maze would have only one cell, or the
    /// cell count does not fit in `usize`.
    #[error("illegal dimensions {width}x{height}: both sides must be positive and the maze must have more than one cell")]
    InvalidDimensions { width: usize, height: usize },

    /// The backtracking path ran out while cells were still unvisited.
    #[error("path became empty with {unvisited} cells still unvisited")]
    EmptyPath { unvisited: usize },

    /// Wall flags disagree with each other or with the grid border.
    #[error("inconsistent {direction} wall at x={x}, y={y}: {reason}")]
    InvariantViolation {
        x: usize,
        y: usize,
        direction: Direction,
        reason: &'static str,
    },

    /// Fewer loops could be opened than were asked for.
    ///
    /// Generation itself never fails with this; it comes from
    /// [crate::Maze::ensure_loops_placed].
    #[error("placed only {placed} of {requested} requested loops")]
    LoopPlacementIncomplete { requested: usize, placed: usize },
}

impl MazeError {
    /// True when the error points at a bug in the generator rather than at
    /// the input.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            MazeError::EmptyPath { .. } | MazeError::InvariantViolation { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::{Direction, MazeError};

    #[test]
    fn only_broken_invariants_are_internal() {
        assert!(!MazeError::InvalidDimensions {
            width: 0,
            height: 3
        }
        .is_internal());
        assert!(!MazeError::LoopPlacementIncomplete {
            requested: 4,
            placed: 1
        }
        .is_internal());
        assert!(MazeError::EmptyPath { unvisited: 2 }.is_internal());
        assert!(MazeError::InvariantViolation {
            x: 0,
            y: 0,
            direction: Direction::Left,
            reason: "perimeter wall is missing",
        }
        .is_internal());
    }

    #[test]
    fn messages_name_the_offending_wall() {
        let err = MazeError::InvariantViolation {
            x: 3,
            y: 1,
            direction: Direction::Up,
            reason: "neighbor disagrees about the shared wall",
        };
        assert_eq!(
            err.to_string(),
            "inconsistent up wall at x=3, y=1: neighbor disagrees about the shared wall"
        );
    }
}
