//! Vertex storage for the planning lattice.

use std::collections::HashMap;

use crate::core::{GridCell, JointCoord, JointState};
use crate::error::{LatticeError, Result};

/// Dense vertex id, assigned in creation order.
pub type StateId = usize;

/// A lattice vertex.
///
/// `state` holds the witness joint angles supplied at first creation; it
/// may differ from the exact bin-center representative of `coord` and is
/// what forward kinematics and path output use.
#[derive(Clone, Debug)]
pub struct LatticeState {
    /// Vertex id
    pub id: StateId,
    /// Lattice coordinate (sentinel for the reserved goal vertex)
    pub coord: JointCoord,
    /// Witness joint angles from first creation
    pub state: JointState,
    /// End-effector cell in the occupancy grid, cached at creation
    pub ee_cell: GridCell,
    /// Obstacle distance at creation time, meters (informational)
    pub clearance: f64,
    /// Last observed heuristic value
    pub heuristic: i32,
}

/// Arena of lattice vertices plus the coordinate index.
///
/// Exactly one vertex exists per coordinate. The reserved absorbing goal
/// vertex is allocated once at construction under the sentinel coordinate
/// and is never entered into the index, so it cannot collide with any real
/// configuration.
#[derive(Debug)]
pub struct StateTable {
    states: Vec<LatticeState>,
    coord_to_id: HashMap<JointCoord, StateId>,
}

impl Default for StateTable {
    fn default() -> Self {
        Self::new()
    }
}

impl StateTable {
    /// Create a table holding only the reserved goal vertex.
    pub fn new() -> Self {
        let mut table = Self {
            states: Vec::new(),
            coord_to_id: HashMap::new(),
        };
        table.allocate(JointCoord::sentinel(), Vec::new(), 0.0, [0; 3]);
        table
    }

    /// Id of the reserved absorbing goal vertex.
    #[inline]
    pub fn goal_id(&self) -> StateId {
        0
    }

    /// Number of vertices, including the reserved goal.
    #[inline]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the table holds only the reserved goal vertex.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.states.len() <= 1
    }

    /// Vertex by id.
    pub fn state(&self, id: StateId) -> Result<&LatticeState> {
        self.states.get(id).ok_or(LatticeError::InvalidStateId(id))
    }

    /// Mutable vertex by id.
    pub fn state_mut(&mut self, id: StateId) -> Result<&mut LatticeState> {
        self.states
            .get_mut(id)
            .ok_or(LatticeError::InvalidStateId(id))
    }

    /// Vertex by coordinate, if interned.
    pub fn get(&self, coord: &JointCoord) -> Option<&LatticeState> {
        self.coord_to_id.get(coord).map(|&id| &self.states[id])
    }

    /// Intern a coordinate. Returns the existing vertex id when the
    /// coordinate is already present; the first binding of witness state,
    /// clearance, and cell wins.
    pub fn get_or_create(
        &mut self,
        coord: JointCoord,
        state: JointState,
        clearance: f64,
        ee_cell: GridCell,
    ) -> StateId {
        if let Some(&id) = self.coord_to_id.get(&coord) {
            return id;
        }
        self.allocate(coord, state, clearance, ee_cell)
    }

    /// Drop every vertex and the index together, then re-reserve the goal.
    pub fn clear(&mut self) {
        self.states.clear();
        self.coord_to_id.clear();
        self.allocate(JointCoord::sentinel(), Vec::new(), 0.0, [0; 3]);
    }

    fn allocate(
        &mut self,
        coord: JointCoord,
        state: JointState,
        clearance: f64,
        ee_cell: GridCell,
    ) -> StateId {
        let id = self.states.len();
        // the goal sentinel stays out of the index
        if !coord.is_sentinel() {
            self.coord_to_id.insert(coord.clone(), id);
        }
        self.states.push(LatticeState {
            id,
            coord,
            state,
            ee_cell,
            clearance,
            heuristic: 0,
        });
        id
    }
}
