//! Scans a set of per-agent paths for the earliest collision between any
//! two agents.

use crate::geometry::Position;
use crate::path::{position_at, Path};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    /// Both agents occupy `position` at `time`.
    Vertex { position: Position },
    /// Agent `a` moves `from -> to` departing at `time` while agent `b`
    /// makes the reverse traversal in the same unit step. `time` is the
    /// departure time, matching `Constraint::Edge`'s `time` field.
    Edge { from: Position, to: Position },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conflict {
    pub a: usize,
    pub b: usize,
    pub time: usize,
    pub kind: ConflictKind,
}

/// Finds the earliest conflict across `paths`, scanning time ascending and,
/// within a timestep, agent pairs in lexicographic order. This scan order is
/// what makes CBS's branching deterministic. Two agents trading places along
/// a chain without directly swapping is not a conflict — only the strict
/// swap (`Edge`) and simultaneous occupancy (`Vertex`) cases are.
pub fn detect_first_conflict(paths: &[Path]) -> Option<Conflict> {
    let horizon = paths.iter().map(|p| p.len()).max().unwrap_or(0);

    for t in 0..horizon {
        for i in 0..paths.len() {
            let pos_i = position_at(&paths[i], t);
            let pos_i_prev = if t > 0 {
                Some(position_at(&paths[i], t - 1))
            } else {
                None
            };

            for j in (i + 1)..paths.len() {
                let pos_j = position_at(&paths[j], t);

                if pos_i == pos_j {
                    return Some(Conflict {
                        a: i,
                        b: j,
                        time: t,
                        kind: ConflictKind::Vertex { position: pos_i },
                    });
                }

                if let Some(pos_i_prev) = pos_i_prev {
                    let pos_j_prev = position_at(&paths[j], t - 1);
                    if pos_i_prev == pos_j && pos_j_prev == pos_i {
                        return Some(Conflict {
                            a: i,
                            b: j,
                            time: t - 1,
                            kind: ConflictKind::Edge {
                                from: pos_i_prev,
                                to: pos_i,
                            },
                        });
                    }
                }
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_conflict_on_empty_or_singleton_path_sets() {
        assert!(detect_first_conflict(&[]).is_none());
        assert!(detect_first_conflict(&[vec![Position::new(0, 0)]]).is_none());
    }

    #[test]
    fn detects_vertex_conflict() {
        let paths = vec![
            vec![Position::new(0, 0), Position::new(1, 0), Position::new(1, 1)],
            vec![Position::new(2, 0), Position::new(1, 0), Position::new(0, 1)],
        ];
        let conflict = detect_first_conflict(&paths).unwrap();
        assert_eq!(conflict.a, 0);
        assert_eq!(conflict.b, 1);
        assert_eq!(conflict.time, 1);
        assert_eq!(
            conflict.kind,
            ConflictKind::Vertex {
                position: Position::new(1, 0)
            }
        );
    }

    #[test]
    fn detects_swap_as_edge_conflict_with_departure_time() {
        let paths = vec![
            vec![Position::new(0, 0), Position::new(1, 0)],
            vec![Position::new(1, 0), Position::new(0, 0)],
        ];
        let conflict = detect_first_conflict(&paths).unwrap();
        assert_eq!(conflict.time, 0, "edge conflict time is the departure time");
        assert_eq!(
            conflict.kind,
            ConflictKind::Edge {
                from: Position::new(0, 0),
                to: Position::new(1, 0),
            }
        );
    }

    #[test]
    fn chained_following_without_swap_is_not_a_conflict() {
        // Agent 0 moves into the cell agent 1 just vacated; no swap.
        let paths = vec![
            vec![Position::new(0, 0), Position::new(1, 0), Position::new(2, 0)],
            vec![Position::new(1, 0), Position::new(2, 0), Position::new(3, 0)],
        ];
        assert!(detect_first_conflict(&paths).is_none());
    }
}
