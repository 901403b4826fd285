//! Mock collaborators for lattice integration tests.
//!
//! These stand in for the robot description, collision environment,
//! occupancy grid, action source, and heuristics that live outside the
//! crate in a real planner.

use bhuja_plan::core::Pose6;
use bhuja_plan::model::{Action, StateValidity, SweepValidity};
use bhuja_plan::{ActionSource, CollisionChecker, Heuristic, OccupancyGrid, RobotModel, StateId};

pub type FkFn = fn(&[f64]) -> Option<Pose6>;

/// Robot with per-joint limits (`None` = continuous) and a pluggable
/// forward kinematics map.
pub struct StubRobot {
    pub limits: Vec<Option<(f64, f64)>>,
    pub fk: FkFn,
}

impl RobotModel for StubRobot {
    fn min_pos_limit(&self, joint: usize) -> f64 {
        self.limits[joint].map(|(lo, _)| lo).unwrap_or(0.0)
    }

    fn max_pos_limit(&self, joint: usize) -> f64 {
        self.limits[joint].map(|(_, hi)| hi).unwrap_or(0.0)
    }

    fn has_pos_limit(&self, joint: usize) -> bool {
        self.limits[joint].is_some()
    }

    fn check_joint_limits(&self, angles: &[f64]) -> bool {
        angles
            .iter()
            .zip(&self.limits)
            .all(|(&angle, limit)| match limit {
                Some((lo, hi)) => angle >= *lo && angle <= *hi,
                None => true,
            })
    }

    fn planning_link_fk(&self, angles: &[f64]) -> Option<Pose6> {
        (self.fk)(angles)
    }
}

/// Tip pose tracks joint 0 along x and joint 1 along y.
pub fn fk_xy(angles: &[f64]) -> Option<Pose6> {
    Some(Pose6::from_position(
        angles[0],
        angles.get(1).copied().unwrap_or(0.0),
        0.0,
    ))
}

/// Tip stays at the origin; joint 0 drives roll.
pub fn fk_roll(angles: &[f64]) -> Option<Pose6> {
    Some(Pose6::new(0.0, 0.0, 0.0, angles[0], 0.0, 0.0))
}

/// Collision checker that accepts every configuration and sweep.
pub struct AcceptAll;

impl CollisionChecker for AcceptAll {
    fn is_state_valid(&self, _angles: &[f64]) -> StateValidity {
        StateValidity {
            valid: true,
            distance: 1.0,
        }
    }

    fn is_state_to_state_valid(&self, _from: &[f64], _to: &[f64]) -> SweepValidity {
        SweepValidity {
            valid: true,
            path_length: 10,
            checks: 10,
            distance: 1.0,
        }
    }
}

/// Rejects exactly one swept segment, accepts everything else.
pub struct RejectSweep {
    pub from: Vec<f64>,
    pub to: Vec<f64>,
}

fn angles_eq(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-9)
}

impl CollisionChecker for RejectSweep {
    fn is_state_valid(&self, _angles: &[f64]) -> StateValidity {
        StateValidity {
            valid: true,
            distance: 1.0,
        }
    }

    fn is_state_to_state_valid(&self, from: &[f64], to: &[f64]) -> SweepValidity {
        let valid = !(angles_eq(from, &self.from) && angles_eq(to, &self.to));
        SweepValidity {
            valid,
            path_length: 10,
            checks: 10,
            distance: if valid { 1.0 } else { 0.0 },
        }
    }
}

/// Collision checker that rejects every single configuration.
pub struct RejectStates;

impl CollisionChecker for RejectStates {
    fn is_state_valid(&self, _angles: &[f64]) -> StateValidity {
        StateValidity {
            valid: false,
            distance: 0.01,
        }
    }

    fn is_state_to_state_valid(&self, _from: &[f64], _to: &[f64]) -> SweepValidity {
        SweepValidity {
            valid: true,
            path_length: 10,
            checks: 10,
            distance: 1.0,
        }
    }
}

/// Axis-aligned uniform grid.
pub struct UnitGrid {
    pub resolution: f64,
}

impl OccupancyGrid for UnitGrid {
    fn world_to_grid(&self, x: f64, y: f64, z: f64) -> [i32; 3] {
        [
            (x / self.resolution).floor() as i32,
            (y / self.resolution).floor() as i32,
            (z / self.resolution).floor() as i32,
        ]
    }

    fn resolution(&self) -> f64 {
        self.resolution
    }

    fn reference_frame(&self) -> &str {
        "map"
    }
}

/// Returns the same action list at every configuration.
pub struct ScriptedActions(pub Vec<Action>);

impl ActionSource for ScriptedActions {
    fn actions(&self, _angles: &[f64]) -> Option<Vec<Action>> {
        Some(self.0.clone())
    }
}

/// Action source that always fails.
pub struct FailingActions;

impl ActionSource for FailingActions {
    fn actions(&self, _angles: &[f64]) -> Option<Vec<Action>> {
        None
    }
}

/// Heuristic returning a fixed value everywhere.
pub struct ConstantHeuristic(pub i32);

impl Heuristic for ConstantHeuristic {
    fn goal_heuristic(&self, _state_id: StateId) -> i32 {
        self.0
    }

    fn start_heuristic(&self, _state_id: StateId) -> i32 {
        self.0
    }

    fn from_to_heuristic(&self, _from: StateId, _to: StateId) -> i32 {
        self.0
    }

    fn metric_goal_distance(&self, _x: f64, _y: f64, _z: f64) -> f64 {
        self.0 as f64
    }

    fn metric_start_distance(&self, _x: f64, _y: f64, _z: f64) -> f64 {
        self.0 as f64
    }
}
