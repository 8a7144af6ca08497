//! The high-level search: conflict detection and the Constraint-Tree loop.

mod cbs;
mod conflict;
mod node;

pub use cbs::{cbs, cbs_with_stats};
pub use conflict::{detect_first_conflict, Conflict, ConflictKind};
pub use node::{replan_agent, CTNode, HorizonPolicy};
