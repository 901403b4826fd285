//! Bidirectional map between joint angles and lattice coordinates.

use crate::config::LatticeConfig;
use crate::core::math::normalize_angle_positive;
use crate::core::{JointCoord, JointState};
use crate::error::{LatticeError, Result};
use crate::model::RobotModel;

/// Per-joint uniform binning of joint-angle space.
///
/// Continuous joints bin the normalized angle in [0, 2π) with a half-bin
/// offset, so bin centers sit at multiples of the bin width and the ring
/// closes at `bins_per_revolution`. Limited joints bin the offset from the
/// lower limit.
#[derive(Clone, Debug)]
pub struct Discretizer {
    delta: Vec<f64>,
    continuous: Vec<bool>,
    min_limits: Vec<f64>,
    bins_per_rev: Vec<i32>,
}

impl Discretizer {
    /// Build from the configured bin widths and the robot's joint limits.
    ///
    /// Fails when a continuous joint has no configured bins-per-revolution
    /// count.
    pub fn new(config: &LatticeConfig, robot: &dyn RobotModel) -> Result<Self> {
        let n = config.num_joints;
        let mut continuous = Vec::with_capacity(n);
        let mut min_limits = Vec::with_capacity(n);
        let mut bins_per_rev = Vec::with_capacity(n);

        for joint in 0..n {
            let is_continuous = !robot.has_pos_limit(joint);
            if is_continuous && config.bins_per_revolution(joint) <= 0 {
                return Err(LatticeError::InvalidConfiguration(format!(
                    "continuous joint {joint} has no coord_vals entry"
                )));
            }
            continuous.push(is_continuous);
            min_limits.push(if is_continuous {
                0.0
            } else {
                robot.min_pos_limit(joint)
            });
            bins_per_rev.push(config.bins_per_revolution(joint));
        }

        Ok(Self {
            delta: config.coord_delta.clone(),
            continuous,
            min_limits,
            bins_per_rev,
        })
    }

    /// Number of planned joints
    #[inline]
    pub fn num_joints(&self) -> usize {
        self.delta.len()
    }

    /// Project joint angles onto the lattice.
    pub fn angles_to_coord(&self, angles: &[f64]) -> JointCoord {
        debug_assert_eq!(angles.len(), self.num_joints());

        let mut bins = Vec::with_capacity(self.num_joints());
        for (joint, &angle) in angles.iter().enumerate() {
            let delta = self.delta[joint];
            let bin = if self.continuous[joint] {
                let pos = normalize_angle_positive(angle);
                let mut bin = ((pos + 0.5 * delta) / delta).floor() as i32;
                // close the ring: the top half-bin belongs to bin 0
                if bin == self.bins_per_rev[joint] {
                    bin = 0;
                }
                bin
            } else {
                ((angle - self.min_limits[joint]) / delta).round() as i32
            };
            bins.push(bin);
        }
        JointCoord::new(bins)
    }

    /// Bin-center joint angles for a coordinate.
    pub fn coord_to_angles(&self, coord: &JointCoord) -> JointState {
        debug_assert_eq!(coord.len(), self.num_joints());

        coord
            .bins()
            .iter()
            .enumerate()
            .map(|(joint, &bin)| {
                let center = bin as f64 * self.delta[joint];
                if self.continuous[joint] {
                    center
                } else {
                    self.min_limits[joint] + center
                }
            })
            .collect()
    }
}
