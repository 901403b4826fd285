//! Configuration for the planning lattice.

mod defaults;

use serde::{Deserialize, Serialize};

use crate::error::{LatticeError, Result};

/// Edge cost policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostPolicy {
    /// Every edge costs `cost_multiplier`
    #[default]
    Flat,
    /// Edge cost scales with the largest angular displacement of the
    /// primitive: `ceil(max_displacement / max_mprim_offset) · cost_multiplier`
    PrimitiveScaled,
}

/// Lattice settings section
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LatticeConfig {
    /// Number of planned joints (coordinate dimensionality)
    pub num_joints: usize,

    /// Bin width per joint, radians
    pub coord_delta: Vec<f64>,

    /// Bins per revolution for continuous joints (ignored for limited
    /// joints; may be empty when no joint is continuous)
    #[serde(default)]
    pub coord_vals: Vec<i32>,

    /// Base edge cost
    #[serde(default = "defaults::cost_multiplier")]
    pub cost_multiplier: i32,

    /// Largest per-primitive angular displacement, radians; only consulted
    /// by [`CostPolicy::PrimitiveScaled`]
    #[serde(default = "defaults::max_mprim_offset")]
    pub max_mprim_offset: f64,

    /// Edge cost policy
    #[serde(default)]
    pub cost_policy: CostPolicy,

    /// Log target for graph lifecycle diagnostics
    #[serde(default = "defaults::graph_log")]
    pub graph_log: String,

    /// Log target for expansion diagnostics
    #[serde(default = "defaults::expands_log")]
    pub expands_log: String,
}

impl LatticeConfig {
    /// Create a configuration with the given discretization and default
    /// costs and log channels.
    pub fn new(num_joints: usize, coord_delta: Vec<f64>) -> Self {
        Self {
            num_joints,
            coord_delta,
            coord_vals: Vec::new(),
            cost_multiplier: defaults::cost_multiplier(),
            max_mprim_offset: defaults::max_mprim_offset(),
            cost_policy: CostPolicy::default(),
            graph_log: defaults::graph_log(),
            expands_log: defaults::expands_log(),
        }
    }

    /// Check structural validity.
    pub fn validate(&self) -> Result<()> {
        if self.num_joints == 0 {
            return Err(LatticeError::InvalidConfiguration(
                "num_joints must be positive".to_string(),
            ));
        }
        if self.coord_delta.len() != self.num_joints {
            return Err(LatticeError::InvalidConfiguration(format!(
                "coord_delta has {} entries for {} joints",
                self.coord_delta.len(),
                self.num_joints
            )));
        }
        if self.coord_delta.iter().any(|&d| d <= 0.0 || !d.is_finite()) {
            return Err(LatticeError::InvalidConfiguration(
                "coord_delta entries must be positive and finite".to_string(),
            ));
        }
        if !self.coord_vals.is_empty() && self.coord_vals.len() != self.num_joints {
            return Err(LatticeError::InvalidConfiguration(format!(
                "coord_vals has {} entries for {} joints",
                self.coord_vals.len(),
                self.num_joints
            )));
        }
        if self.cost_multiplier <= 0 {
            return Err(LatticeError::InvalidConfiguration(
                "cost_multiplier must be positive".to_string(),
            ));
        }
        if self.cost_policy == CostPolicy::PrimitiveScaled && self.max_mprim_offset <= 0.0 {
            return Err(LatticeError::InvalidConfiguration(
                "primitive-scaled cost requires a positive max_mprim_offset".to_string(),
            ));
        }
        Ok(())
    }

    /// Bins per revolution for a joint, or 0 when not configured.
    #[inline]
    pub fn bins_per_revolution(&self, joint: usize) -> i32 {
        self.coord_vals.get(joint).copied().unwrap_or(0)
    }
}
