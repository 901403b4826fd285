//! The planning lattice: discretization, vertex storage, goal regions,
//! successor expansion, and path extraction.

mod discretizer;
mod goal;
mod graph;
mod state_table;
mod stats;

pub use discretizer::Discretizer;
pub use goal::{GoalRegion, GoalSpec};
pub use graph::{JointLattice, Successor};
pub use state_table::{LatticeState, StateId, StateTable};
pub use stats::{ExpandedState, ExpansionStats};
