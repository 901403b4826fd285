//! Goal region specification and membership tests.

use crate::core::{GridCell, JointState, Pose6};
use crate::model::OccupancyGrid;

/// Default positional/angular tolerance derived for joint-space goals,
/// meters/radians. Wide on purpose: the joint tolerances are the real
/// acceptance criterion.
const JOINT_GOAL_POSE_TOLERANCE: f64 = 0.05;

/// Goal request accepted by the lattice.
#[derive(Clone, Debug)]
pub enum GoalSpec {
    /// Reach a joint configuration within per-joint tolerances.
    JointState {
        /// Target joint angles, radians
        angles: JointState,
        /// Per-joint acceptance tolerance, radians
        tolerances: Vec<f64>,
    },
    /// Reach a workspace position with the planning link tip.
    Position {
        /// Goal pose; only the position participates in acceptance
        pose: Pose6,
        /// Tip offset in the end-effector frame, meters
        offset: [f64; 3],
        /// Per-axis acceptance box, meters
        xyz_tolerance: [f64; 3],
    },
    /// Reach a full 6-DoF pose with the planning link tip.
    Pose {
        /// Goal pose
        pose: Pose6,
        /// Tip offset in the end-effector frame, meters
        offset: [f64; 3],
        /// Per-axis acceptance box, meters
        xyz_tolerance: [f64; 3],
        /// Angular acceptance; only the first entry is consulted, radians
        rpy_tolerance: [f64; 3],
    },
}

#[derive(Clone, Debug)]
enum GoalKind {
    JointState {
        angles: JointState,
        tolerances: Vec<f64>,
    },
    Position,
    Pose {
        rpy_tolerance: f64,
    },
}

/// The currently active goal, with the tip-offset pose and grid cell
/// resolved at set time.
#[derive(Clone, Debug)]
pub struct GoalRegion {
    kind: GoalKind,
    pose: Pose6,
    offset: [f64; 3],
    xyz_tolerance: [f64; 3],
    tgt_off_pose: Pose6,
    cell: GridCell,
}

impl GoalRegion {
    /// Resolve a positional or full-pose goal.
    pub(crate) fn from_pose_spec(
        pose: Pose6,
        offset: [f64; 3],
        xyz_tolerance: [f64; 3],
        rpy_tolerance: Option<[f64; 3]>,
        grid: &dyn OccupancyGrid,
    ) -> Self {
        let tgt_off_pose = pose.with_frame_offset(offset);
        let [x, y, z] = tgt_off_pose.position();
        Self {
            kind: match rpy_tolerance {
                Some(tol) => GoalKind::Pose {
                    rpy_tolerance: tol[0],
                },
                None => GoalKind::Position,
            },
            pose,
            offset,
            xyz_tolerance,
            tgt_off_pose,
            cell: grid.world_to_grid(x, y, z),
        }
    }

    /// Resolve a joint-space goal. `fk_pose` is the planning link pose of
    /// the target configuration; it becomes the positional goal with a
    /// wide default tolerance.
    pub(crate) fn from_joint_spec(
        angles: JointState,
        tolerances: Vec<f64>,
        fk_pose: Pose6,
        grid: &dyn OccupancyGrid,
    ) -> Self {
        let [x, y, z] = fk_pose.position();
        Self {
            kind: GoalKind::JointState { angles, tolerances },
            pose: fk_pose,
            offset: [0.0; 3],
            xyz_tolerance: [JOINT_GOAL_POSE_TOLERANCE; 3],
            tgt_off_pose: fk_pose,
            cell: grid.world_to_grid(x, y, z),
        }
    }

    /// Whether a configuration with the given tip pose satisfies the goal.
    pub fn contains(&self, angles: &[f64], tip_pose: &Pose6) -> bool {
        match &self.kind {
            GoalKind::JointState {
                angles: target,
                tolerances,
            } => target
                .iter()
                .zip(tolerances)
                .zip(angles)
                .all(|((&t, &tol), &a)| (a - t).abs() <= tol),
            GoalKind::Position => self.position_within(tip_pose),
            GoalKind::Pose { rpy_tolerance } => {
                self.position_within(tip_pose)
                    && tip_pose.angular_distance(&self.tgt_off_pose) <= *rpy_tolerance
            }
        }
    }

    /// Whether the tip position lies in the per-axis goal box.
    pub fn position_within(&self, tip_pose: &Pose6) -> bool {
        let [gx, gy, gz] = self.tgt_off_pose.position();
        (tip_pose.x - gx).abs() <= self.xyz_tolerance[0]
            && (tip_pose.y - gy).abs() <= self.xyz_tolerance[1]
            && (tip_pose.z - gz).abs() <= self.xyz_tolerance[2]
    }

    /// Goal pose as given (or derived by FK for joint-space goals).
    #[inline]
    pub fn pose(&self) -> Pose6 {
        self.pose
    }

    /// Goal pose with the tip offset applied.
    #[inline]
    pub fn target_offset_pose(&self) -> Pose6 {
        self.tgt_off_pose
    }

    /// Tip offset in the end-effector frame.
    #[inline]
    pub fn tip_offset(&self) -> [f64; 3] {
        self.offset
    }

    /// Grid cell of the tip-offset goal position.
    #[inline]
    pub fn cell(&self) -> GridCell {
        self.cell
    }

    /// Target joint angles for joint-space goals.
    pub fn joint_target(&self) -> Option<&JointState> {
        match &self.kind {
            GoalKind::JointState { angles, .. } => Some(angles),
            _ => None,
        }
    }
}
