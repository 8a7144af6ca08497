//! Single-agent constrained shortest path on the space-time lattice.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};

use tracing::{debug, instrument, trace};

use crate::constraint::ConstraintTable;
use crate::geometry::{manhattan, Position};
use crate::grid::Grid;
use crate::path::{pad_to_length, Path};
use crate::stat::Stats;

/// (x, y, t): a node in the search over positions *and* time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct SpaceTimeState {
    position: Position,
    time: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenNode {
    f: usize,
    g: usize,
    state: SpaceTimeState,
}

// Ascending on f, then ascending on g: ties prefer the node that has made
// less time-progress, deferring deeper expansion until shallower ties are
// exhausted. Wrapped in `Reverse` at the call site to get a min-heap out of
// `BinaryHeap`'s max-heap.
impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f.cmp(&other.f).then_with(|| self.g.cmp(&other.g))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The five unit actions: move to each 4-neighbor, or wait in place.
fn successors(grid: &Grid, position: Position) -> Vec<Position> {
    const DELTAS: [(isize, isize); 5] = [(0, 0), (1, 0), (-1, 0), (0, 1), (0, -1)];

    let mut out = Vec::with_capacity(DELTAS.len());
    for (dx, dy) in DELTAS {
        let nx = position.x as isize + dx;
        let ny = position.y as isize + dy;
        if nx < 0 || ny < 0 {
            continue;
        }
        let (nx, ny) = (nx as usize, ny as usize);
        if grid.passable(nx, ny) {
            out.push(Position::new(nx, ny));
        }
    }
    out
}

/// An arrival at `goal` at `from_time` is goal-safe through `max_t` when no
/// later constraint forbids occupying the goal, and no later constraint
/// forbids the self-edge (waiting) that keeps the agent there.
fn goal_safe(ct: &ConstraintTable, goal: Position, from_time: usize, max_t: usize) -> bool {
    for tau in from_time..=max_t {
        if ct.violates_vertex(goal, tau) {
            return false;
        }
    }
    if from_time < max_t {
        for tau in from_time..max_t {
            if ct.violates_edge(goal, goal, tau) {
                return false;
            }
        }
    }
    true
}

fn reconstruct(
    parent: &HashMap<SpaceTimeState, SpaceTimeState>,
    goal_state: SpaceTimeState,
    max_t: usize,
) -> Path {
    let mut reversed = vec![goal_state.position];
    let mut current = goal_state;
    while let Some(&prev) = parent.get(&current) {
        reversed.push(prev.position);
        current = prev;
    }
    reversed.reverse();
    pad_to_length(&mut reversed, max_t + 1);
    reversed
}

/// Constrained shortest path from `start` to `goal`, respecting `ct`, over a
/// horizon of `max_t` steps. Returns an empty path if none exists. A
/// successful path is padded to exactly `max_t + 1` entries by repeating the
/// goal, so every agent's path shares the planner's horizon.
#[instrument(skip(grid, ct, stats), fields(start = ?start, goal = ?goal, max_t))]
pub fn space_time_a_star(
    grid: &Grid,
    start: Position,
    goal: Position,
    max_t: usize,
    ct: &ConstraintTable,
    stats: &mut Stats,
) -> Path {
    if ct.violates_vertex(start, 0) {
        debug!("start is vertex-constrained at t=0, no path possible");
        return Vec::new();
    }

    let start_state = SpaceTimeState { position: start, time: 0 };
    let mut best_g = HashMap::new();
    best_g.insert(start_state, 0usize);
    let mut parent: HashMap<SpaceTimeState, SpaceTimeState> = HashMap::new();

    let mut open = BinaryHeap::new();
    open.push(Reverse(OpenNode {
        f: manhattan(start, goal),
        g: 0,
        state: start_state,
    }));

    while let Some(Reverse(current)) = open.pop() {
        let state = current.state;
        if current.g > *best_g.get(&state).unwrap_or(&usize::MAX) {
            continue; // stale entry, superseded by a better path to this state
        }
        stats.low_level_expanded += 1;
        trace!(?state, g = current.g, f = current.f, "expand");

        if state.position == goal && goal_safe(ct, goal, state.time, max_t) {
            return reconstruct(&parent, state, max_t);
        }

        if state.time >= max_t {
            continue;
        }

        let next_time = state.time + 1;
        for next_pos in successors(grid, state.position) {
            if ct.violates_vertex(next_pos, next_time) {
                continue;
            }
            if ct.violates_edge(state.position, next_pos, state.time) {
                continue;
            }

            let next_g = current.g + 1;
            let next_state = SpaceTimeState {
                position: next_pos,
                time: next_time,
            };

            let improves = match best_g.get(&next_state) {
                Some(&g) => next_g < g,
                None => true,
            };
            if improves {
                best_g.insert(next_state, next_g);
                parent.insert(next_state, state);
                let f = next_g + manhattan(next_pos, goal);
                open.push(Reverse(OpenNode {
                    f,
                    g: next_g,
                    state: next_state,
                }));
            }
        }
    }

    debug!("open list exhausted, no path within horizon");
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::Constraint;

    fn open_grid(size: usize) -> Grid {
        let row = ".".repeat(size);
        let rows: Vec<String> = (0..size).map(|_| row.clone()).collect();
        Grid::from_ascii_lines(&rows).unwrap()
    }

    #[test]
    fn straight_line_path_on_open_grid() {
        let grid = open_grid(5);
        let ct = ConstraintTable::default();
        let mut stats = Stats::default();
        let path = space_time_a_star(
            &grid,
            Position::new(0, 0),
            Position::new(4, 4),
            8,
            &ct,
            &mut stats,
        );
        assert_eq!(path.len(), 9);
        assert_eq!(path[0], Position::new(0, 0));
        assert_eq!(path[8], Position::new(4, 4));
    }

    #[test]
    fn start_blocked_by_vertex_constraint_fails() {
        let grid = open_grid(3);
        let constraints = vec![Constraint::Vertex {
            agent: 0,
            position: Position::new(0, 0),
            time: 0,
        }];
        let ct = ConstraintTable::build(&constraints, 0);
        let mut stats = Stats::default();
        let path = space_time_a_star(
            &grid,
            Position::new(0, 0),
            Position::new(2, 2),
            10,
            &ct,
            &mut stats,
        );
        assert!(path.is_empty());
    }

    #[test]
    fn vertex_constraint_on_goal_forces_a_delayed_arrival() {
        let grid = open_grid(5);
        let constraints = vec![Constraint::Vertex {
            agent: 0,
            position: Position::new(2, 0),
            time: 2,
        }];
        let ct = ConstraintTable::build(&constraints, 0);
        let mut stats = Stats::default();
        let path = space_time_a_star(
            &grid,
            Position::new(0, 0),
            Position::new(2, 0),
            10,
            &ct,
            &mut stats,
        );
        assert!(path.len() >= 4);
        assert_ne!(path[2], Position::new(2, 0));
        assert_eq!(path[3], Position::new(2, 0));
    }

    #[test]
    fn edge_constraint_blocks_one_directed_traversal() {
        let grid = open_grid(3);
        let constraints = vec![Constraint::Edge {
            agent: 0,
            from: Position::new(0, 0),
            to: Position::new(1, 0),
            time: 0,
        }];
        let ct = ConstraintTable::build(&constraints, 0);
        let mut stats = Stats::default();
        let path = space_time_a_star(
            &grid,
            Position::new(0, 0),
            Position::new(1, 0),
            5,
            &ct,
            &mut stats,
        );
        // Forced to detour since the direct edge is forbidden at t=0.
        assert!(path.len() > 2);
        assert_eq!(*path.last().unwrap(), Position::new(1, 0));
    }

    #[test]
    fn unreachable_goal_returns_empty_path() {
        let grid = Grid::from_ascii_lines(&[".#.", "###", ".#."]).unwrap();
        let ct = ConstraintTable::default();
        let mut stats = Stats::default();
        let path = space_time_a_star(
            &grid,
            Position::new(0, 0),
            Position::new(2, 2),
            20,
            &ct,
            &mut stats,
        );
        assert!(path.is_empty());
    }
}
