//! Error types for BhujaPlan

use thiserror::Error;

use crate::lattice::StateId;

/// Planning graph error type
#[derive(Error, Debug)]
pub enum LatticeError {
    /// Start or goal rejected, or a structurally malformed request.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The robot model could not produce a planning link pose.
    #[error("forward kinematics unavailable for the planning link")]
    KinematicsUnavailable,

    /// The action source failed to produce an action list.
    #[error("action source unavailable")]
    ActionSourceUnavailable,

    /// Predecessor queries are not implemented for this graph.
    #[error("backward search is not supported")]
    BackwardSearchUnsupported,

    /// No valid action connects a path predecessor to the goal region.
    #[error("no valid action connects state {0} to the goal region")]
    PathReconstructionFailed(StateId),

    /// An id path contained the goal state in a non-terminal position.
    #[error("the goal state has no successors")]
    GoalHasNoSuccessor,

    /// State id out of range. Indicates a caller bug.
    #[error("state id {0} is out of range")]
    InvalidStateId(StateId),
}

pub type Result<T> = std::result::Result<T, LatticeError>;
