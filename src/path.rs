//! A `Path` is just a time-indexed sequence of positions; these free
//! functions give it the clamp-at-the-ends and padding semantics the spec
//! describes without wrapping `Vec` in a newtype nobody needs.

use crate::geometry::Position;

pub type Path = Vec<Position>;

/// Position of `path` at time `t`. Querying past the end holds the agent at
/// its last position ("waiting"); an empty path has no well-defined position
/// and is only ever produced to signal low-level search failure.
pub fn position_at(path: &[Position], t: usize) -> Position {
    match path.get(t) {
        Some(pos) => *pos,
        None => *path.last().expect("position_at called on an empty path"),
    }
}

/// Pads `path` in place, by repeating its last element, until it has
/// `len` entries. A no-op if `path` is already at least that long.
pub fn pad_to_length(path: &mut Path, len: usize) {
    if path.is_empty() {
        return;
    }
    let last = *path.last().unwrap();
    while path.len() < len {
        path.push(last);
    }
}

/// Sum-of-costs for a set of paths: Σᵢ (|pathᵢ| − 1).
pub fn sum_of_costs(paths: &[Path]) -> usize {
    paths.iter().map(|p| p.len().saturating_sub(1)).sum()
}

/// Makespan for a set of paths: maxᵢ (|pathᵢ| − 1).
pub fn makespan(paths: &[Path]) -> usize {
    paths.iter().map(|p| p.len().saturating_sub(1)).max().unwrap_or(0)
}

/// Pads every path in `paths` out to the length of the longest one.
pub fn pad_all_to_same_length(paths: &mut [Path]) {
    let target = paths.iter().map(|p| p.len()).max().unwrap_or(0);
    for path in paths.iter_mut() {
        pad_to_length(path, target);
    }
}
