//! Expansion bookkeeping.

use std::time::{Duration, Instant};

use crate::core::Pose6;

use super::StateId;

/// Planning link pose and cached heuristic of one expanded vertex.
#[derive(Clone, Copy, Debug)]
pub struct ExpandedState {
    /// Planning link pose of the expanded configuration
    pub pose: Pose6,
    /// Heuristic value cached on the vertex
    pub heuristic: i32,
}

/// Ordered log of expanded vertices plus the time-to-goal-region latch.
#[derive(Debug)]
pub struct ExpansionStats {
    expanded: Vec<StateId>,
    near_goal: bool,
    goal_set_at: Instant,
}

impl ExpansionStats {
    pub fn new() -> Self {
        Self {
            expanded: Vec::new(),
            near_goal: false,
            goal_set_at: Instant::now(),
        }
    }

    /// Record one expansion.
    #[inline]
    pub fn record_expansion(&mut self, id: StateId) {
        self.expanded.push(id);
    }

    /// Expanded vertex ids in call order.
    #[inline]
    pub fn expanded(&self) -> &[StateId] {
        &self.expanded
    }

    /// Restart the goal clock. Called whenever a goal is set.
    pub fn reset_goal_clock(&mut self) {
        self.near_goal = false;
        self.goal_set_at = Instant::now();
    }

    /// Latch the first entry into the positional goal box. Returns the
    /// elapsed time since the last goal-set on the first call, `None`
    /// afterwards.
    pub fn note_near_goal(&mut self) -> Option<Duration> {
        if self.near_goal {
            return None;
        }
        self.near_goal = true;
        Some(self.goal_set_at.elapsed())
    }

    /// Forget all recorded expansions and the near-goal latch.
    pub fn clear(&mut self) {
        self.expanded.clear();
        self.near_goal = false;
    }
}

impl Default for ExpansionStats {
    fn default() -> Self {
        Self::new()
    }
}
