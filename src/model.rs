//! External collaborator interfaces.
//!
//! The lattice consumes these capabilities but owns none of them: the
//! robot description, the collision environment, the occupancy grid, the
//! motion primitive source, and the heuristics all live outside this
//! crate. Implementations must outlive the lattice that borrows them.

use crate::core::{GridCell, JointState, Pose6};
use crate::lattice::StateId;

/// A motion primitive: ordered intermediate waypoints in joint space.
/// The last waypoint is the successor configuration.
pub type Action = Vec<JointState>;

/// Joint-limit and forward kinematics queries for the planned robot.
pub trait RobotModel: Send + Sync {
    /// Lower position limit of a joint, radians.
    fn min_pos_limit(&self, joint: usize) -> f64;

    /// Upper position limit of a joint, radians.
    fn max_pos_limit(&self, joint: usize) -> f64;

    /// Whether the joint has position limits. Unlimited joints are treated
    /// as continuous and wrap at a full revolution.
    fn has_pos_limit(&self, joint: usize) -> bool;

    /// Whether every angle respects its joint limits.
    fn check_joint_limits(&self, angles: &[f64]) -> bool;

    /// Pose of the planning link, or `None` when kinematics fail.
    fn planning_link_fk(&self, angles: &[f64]) -> Option<Pose6>;
}

/// Result of a single-configuration collision query.
#[derive(Clone, Copy, Debug)]
pub struct StateValidity {
    /// Whether the configuration is collision-free
    pub valid: bool,
    /// Distance to the nearest obstacle, meters
    pub distance: f64,
}

/// Result of a swept-segment collision query.
#[derive(Clone, Copy, Debug)]
pub struct SweepValidity {
    /// Whether the swept motion is collision-free
    pub valid: bool,
    /// Number of interpolated configurations along the segment
    pub path_length: usize,
    /// Number of collision checks performed
    pub checks: usize,
    /// Minimum obstacle distance observed along the segment, meters
    pub distance: f64,
}

/// Collision queries against the planning scene.
pub trait CollisionChecker: Send + Sync {
    /// Check a single configuration.
    fn is_state_valid(&self, angles: &[f64]) -> StateValidity;

    /// Check the swept motion between two configurations.
    fn is_state_to_state_valid(&self, from: &[f64], to: &[f64]) -> SweepValidity;
}

/// Workspace discretization queries.
pub trait OccupancyGrid: Send + Sync {
    /// Convert a world position to grid cell indices.
    fn world_to_grid(&self, x: f64, y: f64, z: f64) -> GridCell;

    /// Cell edge length, meters.
    fn resolution(&self) -> f64;

    /// Name of the frame grid coordinates are expressed in.
    fn reference_frame(&self) -> &str;
}

/// Source of candidate motion primitives.
pub trait ActionSource: Send + Sync {
    /// Actions applicable at the given configuration, in a reproducible
    /// order. `None` means the source could not produce a list.
    fn actions(&self, angles: &[f64]) -> Option<Vec<Action>>;
}

/// A heuristic consulted by the search through the lattice.
///
/// Heuristics may inspect lattice vertices by id; the lattice only ever
/// calls into a heuristic from its query operations, never during
/// construction or teardown.
pub trait Heuristic: Send + Sync {
    /// Estimated cost from a state to the goal.
    fn goal_heuristic(&self, state_id: StateId) -> i32;

    /// Estimated cost from the start to a state.
    fn start_heuristic(&self, state_id: StateId) -> i32;

    /// Estimated cost between two states.
    fn from_to_heuristic(&self, from: StateId, to: StateId) -> i32;

    /// Metric distance from a workspace position to the goal, meters.
    fn metric_goal_distance(&self, x: f64, y: f64, z: f64) -> f64;

    /// Metric distance from a workspace position to the start, meters.
    fn metric_start_distance(&self, x: f64, y: f64, z: f64) -> f64;
}
