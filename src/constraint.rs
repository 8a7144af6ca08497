//! Constraints and the per-agent `ConstraintTable` derived from them.

use std::collections::HashSet;

use crate::geometry::{manhattan, Position};

/// A single forbidden move or occupancy for one agent. Modeled as a tagged
/// sum rather than a flat struct with unused sentinel coordinates: a
/// `Vertex` constraint simply has no `to` field to leave zeroed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constraint {
    /// `agent` may not occupy `position` at `time`.
    Vertex {
        agent: usize,
        position: Position,
        time: usize,
    },
    /// `agent` may not traverse `from` -> `to` departing at `time` (arriving
    /// at `time + 1`). Direction matters: the reverse traversal is allowed
    /// unless forbidden by a separate constraint.
    Edge {
        agent: usize,
        from: Position,
        to: Position,
        time: usize,
    },
}

impl Constraint {
    pub fn agent(&self) -> usize {
        match self {
            Constraint::Vertex { agent, .. } => *agent,
            Constraint::Edge { agent, .. } => *agent,
        }
    }

    pub fn time(&self) -> usize {
        match self {
            Constraint::Vertex { time, .. } => *time,
            Constraint::Edge { time, .. } => *time,
        }
    }
}

/// Per-agent index over a constraint list, giving O(1) membership tests.
/// Tuples are used as set elements directly rather than hand-packed
/// integers: correctness follows from `Eq`/`Hash`, not from a bit-width
/// budget per field.
#[derive(Debug, Clone, Default)]
pub struct ConstraintTable {
    forbidden_vertices: HashSet<(usize, usize, usize)>,
    forbidden_edges: HashSet<(usize, usize, usize, usize, usize)>,
}

impl ConstraintTable {
    pub fn build(constraints: &[Constraint], agent: usize) -> ConstraintTable {
        let mut table = ConstraintTable::default();
        for constraint in constraints {
            if constraint.agent() != agent {
                continue;
            }
            match *constraint {
                Constraint::Vertex { position, time, .. } => {
                    table.forbidden_vertices.insert((position.x, position.y, time));
                }
                Constraint::Edge { from, to, time, .. } => {
                    table
                        .forbidden_edges
                        .insert((from.x, from.y, to.x, to.y, time));
                }
            }
        }
        table
    }

    pub fn violates_vertex(&self, position: Position, time: usize) -> bool {
        self.forbidden_vertices.contains(&(position.x, position.y, time))
    }

    pub fn violates_edge(&self, from: Position, to: Position, time: usize) -> bool {
        self.forbidden_edges
            .contains(&(from.x, from.y, to.x, to.y, time))
    }
}

/// Largest `time` among `agent`'s constraints, or 0 if it has none.
pub fn max_constraint_time_for_agent(constraints: &[Constraint], agent: usize) -> usize {
    constraints
        .iter()
        .filter(|c| c.agent() == agent)
        .map(Constraint::time)
        .max()
        .unwrap_or(0)
}

/// Largest `time` among all constraints, or 0 if there are none.
pub fn max_constraint_time_all(constraints: &[Constraint]) -> usize {
    constraints.iter().map(Constraint::time).max().unwrap_or(0)
}

/// A problem-wide lower bound on any agent's path length: the largest
/// single-agent Manhattan distance. Used to seed the low-level horizon.
pub fn lower_bound_len(starts: &[Position], goals: &[Position]) -> usize {
    starts
        .iter()
        .zip(goals.iter())
        .map(|(s, g)| manhattan(*s, *g))
        .max()
        .unwrap_or(0)
}
