//! Integer joint coordinates.

use std::fmt;

/// Discrete lattice coordinate: one signed bin index per joint.
///
/// Equality and hashing are structural, so a coordinate uniquely names a
/// lattice vertex. The empty coordinate is reserved as the sentinel for
/// the absorbing goal vertex and is never stored in the coordinate index.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct JointCoord(Vec<i32>);

impl JointCoord {
    /// Create a coordinate from per-joint bin indices
    #[inline]
    pub fn new(bins: Vec<i32>) -> Self {
        Self(bins)
    }

    /// The reserved sentinel coordinate of the absorbing goal vertex
    #[inline]
    pub fn sentinel() -> Self {
        Self(Vec::new())
    }

    /// Whether this is the goal sentinel
    #[inline]
    pub fn is_sentinel(&self) -> bool {
        self.0.is_empty()
    }

    /// Per-joint bin indices
    #[inline]
    pub fn bins(&self) -> &[i32] {
        &self.0
    }

    /// Number of joints
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the coordinate holds no bins
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<i32>> for JointCoord {
    fn from(bins: Vec<i32>) -> Self {
        Self(bins)
    }
}

impl fmt::Display for JointCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, bin) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{bin}")?;
        }
        write!(f, ")")
    }
}
