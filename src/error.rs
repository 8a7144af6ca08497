//! Crate-boundary error type.
//!
//! The error surface here is small enough (four input-validation cases
//! checked at entry) that a hand-rolled `Display`/`Error` impl reads more
//! plainly than pulling in a derive-macro crate for it. `anyhow` remains
//! reserved for the CLI binary's outer edge.

use std::fmt;

use crate::geometry::Position;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapfError {
    /// `starts` and `goals` were not the same length.
    MismatchedAgentCount { starts: usize, goals: usize },
    /// An agent's start or goal cell is not passable.
    BlockedStartOrGoal { agent: usize, position: Position },
    /// An agent's start or goal cell falls outside the grid.
    OutOfBounds { agent: usize, position: Position },
    /// The ASCII grid text itself was malformed (ragged rows, no rows, or an
    /// unrecognized cell character).
    InvalidGrid(String),
}

impl fmt::Display for MapfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapfError::MismatchedAgentCount { starts, goals } => write!(
                f,
                "agent count mismatch: {starts} start(s) but {goals} goal(s)"
            ),
            MapfError::BlockedStartOrGoal { agent, position } => write!(
                f,
                "agent {agent} has a start or goal at blocked cell ({}, {})",
                position.x, position.y
            ),
            MapfError::OutOfBounds { agent, position } => write!(
                f,
                "agent {agent} has a start or goal at out-of-bounds cell ({}, {})",
                position.x, position.y
            ),
            MapfError::InvalidGrid(reason) => write!(f, "invalid grid: {reason}"),
        }
    }
}

impl std::error::Error for MapfError {}
