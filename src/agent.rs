use serde::{Deserialize, Serialize};

use crate::geometry::Position;

/// One planning unit: a stable id plus a start and goal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub id: usize,
    pub start: Position,
    pub goal: Position,
}
