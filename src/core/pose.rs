//! 6-DoF pose of the planning link.

use nalgebra::{Isometry3, Point3, Translation3, UnitQuaternion};
use serde::{Deserialize, Serialize};

use super::math::normalize_angle;

/// Pose of a robot link: position in meters, orientation as fixed-axis
/// roll/pitch/yaw in radians.
///
/// The rotation convention is `Rz(yaw) · Ry(pitch) · Rx(roll)`, matching
/// the usual mobile/manipulation fixed-axis convention.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose6 {
    /// X position in meters
    pub x: f64,
    /// Y position in meters
    pub y: f64,
    /// Z position in meters
    pub z: f64,
    /// Rotation about the fixed X axis, radians
    pub roll: f64,
    /// Rotation about the fixed Y axis, radians
    pub pitch: f64,
    /// Rotation about the fixed Z axis, radians
    pub yaw: f64,
}

impl Pose6 {
    /// Create a new pose
    #[inline]
    pub fn new(x: f64, y: f64, z: f64, roll: f64, pitch: f64, yaw: f64) -> Self {
        Self {
            x,
            y,
            z,
            roll,
            pitch,
            yaw,
        }
    }

    /// Create a pose from position only (identity orientation)
    #[inline]
    pub fn from_position(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            ..Default::default()
        }
    }

    /// Position as an array
    #[inline]
    pub fn position(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Orientation as a unit quaternion
    #[inline]
    pub fn rotation(&self) -> UnitQuaternion<f64> {
        UnitQuaternion::from_euler_angles(self.roll, self.pitch, self.yaw)
    }

    /// The rigid transform this pose describes
    #[inline]
    pub fn isometry(&self) -> Isometry3<f64> {
        Isometry3::from_parts(Translation3::new(self.x, self.y, self.z), self.rotation())
    }

    /// Apply a translation expressed in this pose's own frame.
    ///
    /// The returned pose has the offset position and this pose's
    /// orientation. Used to express goal criteria relative to a tool tip
    /// rather than the planning link origin.
    pub fn with_frame_offset(&self, offset: [f64; 3]) -> Pose6 {
        let tip = self
            .isometry()
            .transform_point(&Point3::new(offset[0], offset[1], offset[2]));
        Pose6 {
            x: tip.x,
            y: tip.y,
            z: tip.z,
            roll: self.roll,
            pitch: self.pitch,
            yaw: self.yaw,
        }
    }

    /// Magnitude of the rotation taking this pose's orientation to
    /// `other`'s, in [0, π].
    ///
    /// Computed from the quaternion inner product, so antipodal
    /// quaternions (the same physical rotation) give zero distance.
    pub fn angular_distance(&self, other: &Pose6) -> f64 {
        let dot = self
            .rotation()
            .quaternion()
            .dot(other.rotation().quaternion())
            .clamp(-1.0, 1.0);
        normalize_angle(2.0 * dot.acos()).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_frame_offset_identity_orientation() {
        let pose = Pose6::from_position(1.0, 2.0, 3.0);
        let off = pose.with_frame_offset([0.1, 0.0, -0.2]);
        assert_relative_eq!(off.x, 1.1);
        assert_relative_eq!(off.y, 2.0);
        assert_relative_eq!(off.z, 2.8);
        assert_relative_eq!(off.yaw, 0.0);
    }

    #[test]
    fn test_frame_offset_rotated() {
        // yaw of 90°: an x-forward offset lands along +y
        let pose = Pose6::new(0.0, 0.0, 0.0, 0.0, 0.0, FRAC_PI_2);
        let off = pose.with_frame_offset([0.5, 0.0, 0.0]);
        assert_relative_eq!(off.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(off.y, 0.5, epsilon = 1e-12);
        assert_relative_eq!(off.yaw, FRAC_PI_2);
    }

    #[test]
    fn test_angular_distance_small_roll() {
        let a = Pose6::default();
        let b = Pose6::new(0.0, 0.0, 0.0, 0.05, 0.0, 0.0);
        assert_relative_eq!(a.angular_distance(&b), 0.05, epsilon = 1e-9);
    }

    #[test]
    fn test_angular_distance_identity() {
        let a = Pose6::new(1.0, 0.0, 0.0, 0.3, -0.2, 1.1);
        assert_relative_eq!(a.angular_distance(&a), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_angular_distance_half_turn() {
        let a = Pose6::default();
        let b = Pose6::new(0.0, 0.0, 0.0, 0.0, 0.0, PI);
        assert_relative_eq!(a.angular_distance(&b), PI, epsilon = 1e-9);
    }
}
