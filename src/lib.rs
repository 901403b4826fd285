//! # BhujaPlan: Lattice Search Graph for Manipulator Planning
//!
//! The core search graph of a lattice-based motion planner for an
//! articulated manipulator: a discrete lattice over joint-angle space
//! with lazy vertex allocation, motion-primitive successor expansion,
//! goal-region tests, and path reconstruction. A generic heuristic
//! best-first search consumes the graph through [`JointLattice`].
//!
//! ## Features
//!
//! - **Implicit lattice**: vertices are interned on demand from integer
//!   joint coordinates, so the infinite lattice stays finite and
//!   deterministic under repeated queries
//! - **Absorbing goal**: every goal-satisfying successor funnels into one
//!   reserved sink id, while the true configurations stay recoverable for
//!   path extraction
//! - **Eager and lazy expansion**: full swept-collision validation up
//!   front, or deferred to [`JointLattice::true_cost`]
//! - **External collaborators**: robot model, collision checker,
//!   occupancy grid, action source, and heuristics are traits implemented
//!   outside this crate
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use bhuja_plan::{GoalSpec, JointLattice, LatticeConfig};
//! use bhuja_plan::core::Pose6;
//!
//! let config = LatticeConfig::new(7, vec![0.0698; 7]);
//! let mut lattice = JointLattice::new(config, robot, checker, grid, actions)?;
//!
//! lattice.set_start(&start_angles)?;
//! lattice.set_goal(GoalSpec::Position {
//!     pose: Pose6::from_position(0.6, 0.1, 0.9),
//!     offset: [0.0; 3],
//!     xyz_tolerance: [0.02; 3],
//! })?;
//!
//! // the search loop drives expansion
//! let succs = lattice.successors(lattice.start_id().unwrap())?;
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: joint coordinates, 6-DoF poses, angle math
//! - [`config`]: lattice configuration
//! - [`model`]: traits for the external collaborators
//! - [`lattice`]: discretizer, state table, goal region, and the graph
//!   interface
//!
//! All operations are single-threaded; the lattice owns its vertices and
//! holds shared handles to everything else.

pub mod config;
pub mod core;
pub mod error;
pub mod lattice;
pub mod model;

// Re-export main types at crate root
pub use config::{CostPolicy, LatticeConfig};
pub use error::{LatticeError, Result};
pub use lattice::{GoalRegion, GoalSpec, JointLattice, StateId, Successor};

// Re-export collaborator traits
pub use model::{ActionSource, CollisionChecker, Heuristic, OccupancyGrid, RobotModel};
