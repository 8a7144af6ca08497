//! A Constraint-Tree node: one agent-to-path assignment plus the
//! accumulated constraints that produced it.

use std::cmp::Ordering;

use crate::agent::Agent;
use crate::constraint::{
    lower_bound_len, max_constraint_time_all, max_constraint_time_for_agent, Constraint,
    ConstraintTable,
};
use crate::geometry::Position;
use crate::grid::Grid;
use crate::lowlevel::space_time_a_star;
use crate::path::{makespan, Path};
use crate::stat::Stats;

/// `id` is a monotonically increasing insertion counter, used only to break
/// ties when two nodes have equal cost in the high-level open list.
#[derive(Debug, Clone)]
pub struct CTNode {
    pub id: u64,
    pub constraints: Vec<Constraint>,
    pub paths: Vec<Path>,
    pub cost: usize,
}

// Ordered by cost ascending, ties broken by id ascending - the open list's
// scheduling rule. Only `cost`/`id` participate; `constraints`/`paths` carry
// no ordering of their own.
impl PartialEq for CTNode {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.id == other.id
    }
}

impl Eq for CTNode {}

impl PartialOrd for CTNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CTNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost.cmp(&other.cost).then_with(|| self.id.cmp(&other.id))
    }
}

impl CTNode {
    /// A node with no constraints and an empty path slot per agent, ready
    /// to have every agent's path filled in by `replan_agent`.
    pub fn empty_root(num_agents: usize) -> CTNode {
        CTNode {
            id: 0,
            constraints: Vec::new(),
            paths: vec![Path::new(); num_agents],
            cost: 0,
        }
    }

    /// Copies this node's constraints and paths into a fresh node with the
    /// given id. The caller is expected to append one constraint and
    /// replan one agent next.
    pub fn child(&self, id: u64) -> CTNode {
        CTNode {
            id,
            constraints: self.constraints.clone(),
            paths: self.paths.clone(),
            cost: self.cost,
        }
    }
}

/// Tunables for the horizon policy in [`replan_agent`]: the lower bound on
/// search depth is padded by `buffer` and, on failure, widened and retried
/// up to `max_attempts` times.
#[derive(Debug, Clone, Copy)]
pub struct HorizonPolicy {
    pub buffer: usize,
    pub max_attempts: usize,
}

impl Default for HorizonPolicy {
    fn default() -> Self {
        HorizonPolicy {
            buffer: 10,
            max_attempts: 3,
        }
    }
}

/// Replans `agent`'s path within `node` against `node`'s current
/// constraints, using an iteratively-deepened horizon. Returns `false`
/// (leaving `node.paths[agent]` untouched) if no path is found within
/// `policy.max_attempts` widenings.
pub fn replan_agent(
    node: &mut CTNode,
    agent: usize,
    agents: &[Agent],
    grid: &Grid,
    policy: HorizonPolicy,
    stats: &mut Stats,
) -> bool {
    let starts: Vec<Position> = agents.iter().map(|a| a.start).collect();
    let goals: Vec<Position> = agents.iter().map(|a| a.goal).collect();

    let ct = ConstraintTable::build(&node.constraints, agent);
    let lb = lower_bound_len(&starts, &goals);
    let cur_makespan = makespan(&node.paths);
    let max_ct_for_agent = max_constraint_time_for_agent(&node.constraints, agent);
    let max_ct_all = max_constraint_time_all(&node.constraints);

    let mut max_t = lb
        .max(cur_makespan)
        .max(max_ct_for_agent)
        .max(max_ct_all)
        + policy.buffer;

    for _ in 0..policy.max_attempts {
        let path = space_time_a_star(
            grid,
            agents[agent].start,
            agents[agent].goal,
            max_t,
            &ct,
            stats,
        );
        if !path.is_empty() {
            node.paths[agent] = path;
            return true;
        }
        max_t += policy.buffer;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agents() -> Vec<Agent> {
        vec![Agent {
            id: 0,
            start: Position::new(0, 0),
            goal: Position::new(4, 4),
        }]
    }

    fn open_grid(size: usize) -> Grid {
        let row = ".".repeat(size);
        let rows: Vec<String> = (0..size).map(|_| row.clone()).collect();
        Grid::from_ascii_lines(&rows).unwrap()
    }

    #[test]
    fn replan_fills_in_an_empty_path_slot() {
        let agents = agents();
        let grid = open_grid(5);
        let mut node = CTNode::empty_root(1);
        let mut stats = Stats::default();
        let ok = replan_agent(&mut node, 0, &agents, &grid, HorizonPolicy::default(), &mut stats);
        assert!(ok);
        assert_eq!(node.paths[0][0], Position::new(0, 0));
        assert_eq!(*node.paths[0].last().unwrap(), Position::new(4, 4));
    }

    #[test]
    fn child_shares_parent_state_but_has_its_own_id() {
        let mut root = CTNode::empty_root(1);
        root.id = 7;
        root.cost = 3;
        let child = root.child(8);
        assert_eq!(child.id, 8);
        assert_eq!(child.cost, 3);
        assert_eq!(child.paths.len(), root.paths.len());
    }
}
