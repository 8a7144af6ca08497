//! The high-level Constraint-Tree search.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use tracing::debug;

use crate::agent::Agent;
use crate::constraint::Constraint;
use crate::error::MapfError;
use crate::geometry::Position;
use crate::grid::Grid;
use crate::path::{pad_all_to_same_length, sum_of_costs, Path};
use crate::stat::Stats;

use super::conflict::{detect_first_conflict, ConflictKind};
use super::node::{replan_agent, CTNode, HorizonPolicy};

fn check_position(grid: &Grid, agent: usize, position: Position) -> Result<(), MapfError> {
    if !grid.in_bounds(position.x, position.y) {
        return Err(MapfError::OutOfBounds { agent, position });
    }
    if !grid.passable(position.x, position.y) {
        return Err(MapfError::BlockedStartOrGoal { agent, position });
    }
    Ok(())
}

fn validate_inputs(
    grid: &Grid,
    starts: &[Position],
    goals: &[Position],
) -> Result<(), MapfError> {
    if starts.len() != goals.len() {
        return Err(MapfError::MismatchedAgentCount {
            starts: starts.len(),
            goals: goals.len(),
        });
    }
    for (i, &position) in starts.iter().enumerate() {
        check_position(grid, i, position)?;
    }
    for (i, &position) in goals.iter().enumerate() {
        check_position(grid, i, position)?;
    }
    Ok(())
}

/// Finds a conflict-free plan for every agent, or `Ok(None)` if the
/// instance is solvable-but-unreachable within the search's horizon policy.
/// `Err` signals malformed input (see [`MapfError`]), never a crash.
pub fn cbs(
    grid: &Grid,
    starts: &[Position],
    goals: &[Position],
) -> Result<Option<Vec<Path>>, MapfError> {
    let mut stats = Stats::default();
    cbs_with_stats(grid, starts, goals, HorizonPolicy::default(), &mut stats)
}

/// Same as [`cbs`], but threads a caller-supplied [`HorizonPolicy`] and
/// accumulates expansion counters into a caller-supplied [`Stats`]. The CLI
/// driver uses this entry point so it can report the counters afterward;
/// the core itself never reads a clock or writes anything.
pub fn cbs_with_stats(
    grid: &Grid,
    starts: &[Position],
    goals: &[Position],
    policy: HorizonPolicy,
    stats: &mut Stats,
) -> Result<Option<Vec<Path>>, MapfError> {
    validate_inputs(grid, starts, goals)?;

    let agents: Vec<Agent> = starts
        .iter()
        .zip(goals.iter())
        .enumerate()
        .map(|(id, (&start, &goal))| Agent { id, start, goal })
        .collect();

    let mut next_id: u64 = 1;
    let mut root = CTNode::empty_root(agents.len());

    for i in 0..agents.len() {
        if !replan_agent(&mut root, i, &agents, grid, policy, stats) {
            return Ok(None);
        }
    }
    pad_all_to_same_length(&mut root.paths);
    root.cost = sum_of_costs(&root.paths);

    let mut open = BinaryHeap::new();
    open.push(Reverse(root));

    while let Some(Reverse(current)) = open.pop() {
        stats.high_level_expanded += 1;

        let conflict = match detect_first_conflict(&current.paths) {
            Some(conflict) => conflict,
            None => {
                debug!(node_id = current.id, cost = current.cost, "conflict-free, solution found");
                stats.cost = current.cost;
                return Ok(Some(current.paths));
            }
        };
        debug!(node_id = current.id, cost = current.cost, ?conflict, "splitting on conflict");

        for agent in [conflict.a, conflict.b] {
            let mut child = current.child(next_id);
            next_id += 1;

            let constraint = match conflict.kind {
                ConflictKind::Vertex { position } => Constraint::Vertex {
                    agent,
                    position,
                    time: conflict.time,
                },
                ConflictKind::Edge { from, to } => {
                    // The constraint always forbids *this* agent's
                    // direction of travel: agent `a`'s own from->to, or the
                    // reverse for agent `b`, who was traveling to->from.
                    if agent == conflict.a {
                        Constraint::Edge { agent, from, to, time: conflict.time }
                    } else {
                        Constraint::Edge { agent, from: to, to: from, time: conflict.time }
                    }
                }
            };
            child.constraints.push(constraint);

            if !replan_agent(&mut child, agent, &agents, grid, policy, stats) {
                continue;
            }
            pad_all_to_same_length(&mut child.paths);
            child.cost = sum_of_costs(&child.paths);
            open.push(Reverse(child));
        }
    }

    Ok(None)
}
