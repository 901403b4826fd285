//! The planning graph consumed by a heuristic best-first search.
//!
//! `JointLattice` ties the pieces together: it discretizes joint space,
//! interns vertices on demand, expands motion primitives against the
//! collision model, funnels goal-satisfying successors into the reserved
//! absorbing goal vertex, and reconstructs joint waypoints from an id
//! path after the search finishes.

use std::sync::Arc;

use log::{debug, info, trace, warn};

use crate::config::{CostPolicy, LatticeConfig};
use crate::core::math::shortest_angle_dist;
use crate::core::{JointState, Pose6};
use crate::error::{LatticeError, Result};
use crate::model::{Action, ActionSource, CollisionChecker, Heuristic, OccupancyGrid, RobotModel};

use super::goal::{GoalRegion, GoalSpec};
use super::stats::{ExpandedState, ExpansionStats};
use super::{Discretizer, StateId, StateTable};

/// One outgoing edge of an expanded vertex.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Successor {
    /// Successor vertex id; the reserved goal id when the successor
    /// satisfies the goal
    pub state_id: StateId,
    /// Edge cost
    pub cost: i32,
    /// Whether the cost was computed from a fully validated action
    pub true_cost: bool,
}

/// Discrete lattice over joint-angle space.
///
/// The lattice owns its vertices and nothing else: the robot model,
/// collision checker, occupancy grid, action source, and heuristics are
/// shared collaborators that must outlive it. All operations are
/// single-threaded; mutating queries take `&mut self`.
pub struct JointLattice {
    config: LatticeConfig,
    robot: Arc<dyn RobotModel>,
    checker: Arc<dyn CollisionChecker>,
    grid: Arc<dyn OccupancyGrid>,
    actions: Arc<dyn ActionSource>,
    heuristics: Vec<Arc<dyn Heuristic>>,
    discretizer: Discretizer,
    states: StateTable,
    goal: Option<GoalRegion>,
    start_id: Option<StateId>,
    stats: ExpansionStats,
}

impl JointLattice {
    /// Create a lattice over the given robot and planning scene.
    ///
    /// Allocates the reserved absorbing goal vertex. Heuristics are
    /// registered afterwards with [`add_heuristic`](Self::add_heuristic).
    pub fn new(
        config: LatticeConfig,
        robot: Arc<dyn RobotModel>,
        checker: Arc<dyn CollisionChecker>,
        grid: Arc<dyn OccupancyGrid>,
        actions: Arc<dyn ActionSource>,
    ) -> Result<Self> {
        config.validate()?;
        let discretizer = Discretizer::new(&config, robot.as_ref())?;
        let states = StateTable::new();
        debug!(
            target: config.graph_log.as_str(),
            "lattice created: {} joints, goal state id {}",
            config.num_joints,
            states.goal_id()
        );
        Ok(Self {
            config,
            robot,
            checker,
            grid,
            actions,
            heuristics: Vec::new(),
            discretizer,
            states,
            goal: None,
            start_id: None,
            stats: ExpansionStats::new(),
        })
    }

    /// Register a heuristic. Index 0 is the one delegated to by the
    /// single-heuristic queries.
    pub fn add_heuristic(&mut self, heuristic: Arc<dyn Heuristic>) {
        self.heuristics.push(heuristic);
    }

    /// Number of registered heuristics.
    #[inline]
    pub fn num_heuristics(&self) -> usize {
        self.heuristics.len()
    }

    /// Registered heuristic by index.
    #[inline]
    pub fn heuristic(&self, index: usize) -> Option<&Arc<dyn Heuristic>> {
        self.heuristics.get(index)
    }

    /// Id of the reserved absorbing goal vertex.
    #[inline]
    pub fn goal_id(&self) -> StateId {
        self.states.goal_id()
    }

    /// Id of the current start vertex, if a start has been set.
    #[inline]
    pub fn start_id(&self) -> Option<StateId> {
        self.start_id
    }

    /// The active goal region, if a goal has been set.
    #[inline]
    pub fn goal(&self) -> Option<&GoalRegion> {
        self.goal.as_ref()
    }

    /// The lattice configuration.
    #[inline]
    pub fn config(&self) -> &LatticeConfig {
        &self.config
    }

    /// Vertex introspection by id.
    pub fn state(&self, id: StateId) -> Result<&super::LatticeState> {
        self.states.state(id)
    }

    /// Witness angles of the current start vertex.
    pub fn start_configuration(&self) -> Option<JointState> {
        self.start_id
            .and_then(|id| self.states.state(id).ok())
            .map(|s| s.state.clone())
    }

    // ── heuristic delegation ────────────────────────────────────────────

    /// Heuristic estimate from a state to the goal, via heuristic 0.
    /// Returns 0 when no heuristics are registered. The value is cached
    /// on the vertex.
    pub fn goal_heuristic(&mut self, state_id: StateId) -> Result<i32> {
        let value = match self.heuristics.first() {
            Some(h) => h.goal_heuristic(state_id),
            None => 0,
        };
        self.states.state_mut(state_id)?.heuristic = value;
        Ok(value)
    }

    /// Heuristic estimate from the start to a state, via heuristic 0.
    pub fn start_heuristic(&mut self, state_id: StateId) -> Result<i32> {
        let value = match self.heuristics.first() {
            Some(h) => h.start_heuristic(state_id),
            None => 0,
        };
        self.states.state_mut(state_id)?.heuristic = value;
        Ok(value)
    }

    /// Heuristic estimate between two states, via heuristic 0.
    pub fn from_to_heuristic(&self, from: StateId, to: StateId) -> Result<i32> {
        self.states.state(from)?;
        self.states.state(to)?;
        Ok(match self.heuristics.first() {
            Some(h) => h.from_to_heuristic(from, to),
            None => 0,
        })
    }

    /// Metric distance from a workspace position to the goal, via
    /// heuristic 0. Zero when no heuristics are registered.
    pub fn goal_distance(&self, x: f64, y: f64, z: f64) -> f64 {
        match self.heuristics.first() {
            Some(h) => h.metric_goal_distance(x, y, z),
            None => 0.0,
        }
    }

    /// Metric goal distance of a planning link pose, tip offset applied.
    pub fn goal_distance_from_pose(&self, tip_pose: &Pose6) -> f64 {
        let off = self.target_offset_pose(tip_pose);
        self.goal_distance(off.x, off.y, off.z)
    }

    /// Metric distance from a workspace position to the start, via
    /// heuristic 0. Zero when no heuristics are registered.
    pub fn start_distance(&self, x: f64, y: f64, z: f64) -> f64 {
        match self.heuristics.first() {
            Some(h) => h.metric_start_distance(x, y, z),
            None => 0.0,
        }
    }

    /// Metric start distance of a planning link pose, tip offset applied.
    pub fn start_distance_from_pose(&self, tip_pose: &Pose6) -> f64 {
        let off = self.target_offset_pose(tip_pose);
        self.start_distance(off.x, off.y, off.z)
    }

    // ── kinematics ──────────────────────────────────────────────────────

    /// Pose of the planning link with the active goal's tip offset
    /// applied: position of `T_planning_eef · T_eef_tipoff`, orientation
    /// of the planning link.
    pub fn planning_frame_fk(&self, angles: &[f64]) -> Result<Pose6> {
        let pose = self
            .robot
            .planning_link_fk(angles)
            .ok_or(LatticeError::KinematicsUnavailable)?;
        Ok(pose.with_frame_offset(self.tip_offset()))
    }

    /// Apply the active goal's tip offset to a planning link pose.
    pub fn target_offset_pose(&self, tip_pose: &Pose6) -> Pose6 {
        tip_pose.with_frame_offset(self.tip_offset())
    }

    fn tip_offset(&self) -> [f64; 3] {
        self.goal.as_ref().map(|g| g.tip_offset()).unwrap_or([0.0; 3])
    }

    // ── start and goal binding ──────────────────────────────────────────

    /// Bind the start configuration, re-interning its vertex.
    ///
    /// The configuration must respect joint limits and be collision-free.
    pub fn set_start(&mut self, angles: &[f64]) -> Result<StateId> {
        if angles.len() != self.config.num_joints {
            return Err(LatticeError::InvalidConfiguration(format!(
                "start state has {} joint positions, expected {}",
                angles.len(),
                self.config.num_joints
            )));
        }

        let pose = self.planning_frame_fk(angles)?;

        if !self.robot.check_joint_limits(angles) {
            return Err(LatticeError::InvalidConfiguration(
                "start state violates joint limits".to_string(),
            ));
        }

        let validity = self.checker.is_state_valid(angles);
        if !validity.valid {
            return Err(LatticeError::InvalidConfiguration(format!(
                "start state in collision ({:.3} m to nearest obstacle)",
                validity.distance
            )));
        }

        let coord = self.discretizer.angles_to_coord(angles);
        let cell = self.grid.world_to_grid(pose.x, pose.y, pose.z);
        let id = self
            .states
            .get_or_create(coord, angles.to_vec(), validity.distance, cell);
        self.start_id = Some(id);

        info!(
            target: self.config.graph_log.as_str(),
            "start set: id {} coord {} ee cell ({}, {}, {})",
            id,
            self.states.state(id)?.coord,
            cell[0],
            cell[1],
            cell[2]
        );
        Ok(id)
    }

    /// Replace the active goal region and restart the goal clock.
    pub fn set_goal(&mut self, spec: GoalSpec) -> Result<()> {
        let region = match spec {
            GoalSpec::JointState { angles, tolerances } => {
                if angles.len() != self.config.num_joints
                    || tolerances.len() != self.config.num_joints
                {
                    return Err(LatticeError::InvalidConfiguration(format!(
                        "joint goal has {} angles and {} tolerances for {} joints",
                        angles.len(),
                        tolerances.len(),
                        self.config.num_joints
                    )));
                }
                // the joint goal carries no tip offset, so raw link FK
                // is the derived positional goal
                let fk_pose = self
                    .robot
                    .planning_link_fk(&angles)
                    .ok_or(LatticeError::KinematicsUnavailable)?;
                GoalRegion::from_joint_spec(angles, tolerances, fk_pose, self.grid.as_ref())
            }
            GoalSpec::Position {
                pose,
                offset,
                xyz_tolerance,
            } => GoalRegion::from_pose_spec(pose, offset, xyz_tolerance, None, self.grid.as_ref()),
            GoalSpec::Pose {
                pose,
                offset,
                xyz_tolerance,
                rpy_tolerance,
            } => GoalRegion::from_pose_spec(
                pose,
                offset,
                xyz_tolerance,
                Some(rpy_tolerance),
                self.grid.as_ref(),
            ),
        };

        let cell = region.cell();
        let target = region.target_offset_pose();
        info!(
            target: self.config.graph_log.as_str(),
            "goal set: xyz ({:.3}, {:.3}, {:.3}) m, cell ({}, {}, {}) in {}",
            target.x,
            target.y,
            target.z,
            cell[0],
            cell[1],
            cell[2],
            self.grid.reference_frame()
        );

        self.goal = Some(region);
        self.stats.reset_goal_clock();
        Ok(())
    }

    // ── expansion ───────────────────────────────────────────────────────

    /// Fully validated successor edges of a vertex.
    ///
    /// Every candidate action is checked against joint limits and swept
    /// collision; surviving successors are interned and emitted, with
    /// goal-satisfying ones redirected to the reserved goal id. The goal
    /// vertex is absorbing and expands to nothing.
    pub fn successors(&mut self, state_id: StateId) -> Result<Vec<Successor>> {
        self.expand(state_id, true)
    }

    /// Successor edges without collision or limit validation.
    ///
    /// Edges carry `true_cost = false`; the search is expected to confirm
    /// them later with [`true_cost`](Self::true_cost).
    pub fn lazy_successors(&mut self, state_id: StateId) -> Result<Vec<Successor>> {
        self.expand(state_id, false)
    }

    fn expand(&mut self, state_id: StateId, validate: bool) -> Result<Vec<Successor>> {
        self.states.state(state_id)?;
        self.stats.record_expansion(state_id);

        // the goal is absorbing
        if state_id == self.goal_id() {
            return Ok(Vec::new());
        }

        let parent = self.states.state(state_id)?;
        let parent_state = parent.state.clone();
        debug!(
            target: self.config.expands_log.as_str(),
            "expanding state {}: coord {} ee ({}, {}, {})",
            state_id,
            parent.coord,
            parent.ee_cell[0],
            parent.ee_cell[1],
            parent.ee_cell[2]
        );

        let Some(actions) = self.actions.actions(&parent_state) else {
            warn!(
                target: self.config.expands_log.as_str(),
                "action source failed at state {state_id}"
            );
            return Ok(Vec::new());
        };
        trace!(
            target: self.config.expands_log.as_str(),
            "  {} candidate actions",
            actions.len()
        );

        let mut succs = Vec::new();
        let mut goal_succ_count = 0usize;
        for action in &actions {
            let Some(last) = action.last() else {
                continue;
            };

            let clearance = if validate {
                match self.check_action(&parent_state, action) {
                    Some(clearance) => clearance,
                    None => continue,
                }
            } else {
                0.0
            };

            let succ_coord = self.discretizer.angles_to_coord(last);
            let pose = match self.planning_frame_fk(last) {
                Ok(pose) => pose,
                Err(_) => {
                    warn!(
                        target: self.config.expands_log.as_str(),
                        "planning frame FK failed for a successor of state {state_id}"
                    );
                    continue;
                }
            };
            let cell = self.grid.world_to_grid(pose.x, pose.y, pose.z);

            let succ_id = self
                .states
                .get_or_create(succ_coord, last.clone(), clearance, cell);
            let is_goal = self.is_goal(last, &pose);
            if is_goal {
                goal_succ_count += 1;
            }

            let succ_state = &self.states.state(succ_id)?.state;
            let cost = self.edge_cost(&parent_state, succ_state);
            trace!(
                target: self.config.expands_log.as_str(),
                "  succ id {} cost {} goal {}",
                succ_id,
                cost,
                is_goal
            );

            succs.push(Successor {
                state_id: if is_goal { self.goal_id() } else { succ_id },
                cost,
                true_cost: validate,
            });
        }

        if goal_succ_count > 0 {
            debug!(
                target: self.config.expands_log.as_str(),
                "state {state_id} has {goal_succ_count} goal successors"
            );
        }

        Ok(succs)
    }

    /// Validated cost of the edge between two vertices, regenerated from
    /// the parent's action set. `None` when no surviving action connects
    /// them. Ties among equal-cost actions resolve to the first found.
    pub fn true_cost(&mut self, parent_id: StateId, child_id: StateId) -> Result<Option<i32>> {
        let parent_state = self.states.state(parent_id)?.state.clone();
        let child_coord = self.states.state(child_id)?.coord.clone();
        let goal_edge = child_id == self.goal_id();

        debug!(
            target: self.config.expands_log.as_str(),
            "evaluating transition {parent_id} -> {child_id}"
        );

        let Some(actions) = self.actions.actions(&parent_state) else {
            warn!(
                target: self.config.expands_log.as_str(),
                "action source failed at state {parent_id}"
            );
            return Ok(None);
        };

        let mut best: Option<i32> = None;
        for action in &actions {
            let Some(last) = action.last() else {
                continue;
            };

            let succ_coord = self.discretizer.angles_to_coord(last);
            let pose = match self.planning_frame_fk(last) {
                Ok(pose) => pose,
                Err(_) => continue,
            };

            // keep only actions that reach the queried child
            if goal_edge {
                if !self.is_goal(last, &pose) {
                    continue;
                }
            } else if succ_coord != child_coord {
                continue;
            }

            if self.check_action(&parent_state, action).is_none() {
                continue;
            }

            let succ_state = match self.states.get(&succ_coord) {
                Some(succ) => &succ.state,
                // not interned yet: cost against the action's own endpoint
                None => last,
            };
            let cost = self.edge_cost(&parent_state, succ_state);
            if best.map_or(true, |b| cost < b) {
                best = Some(cost);
            }
        }

        Ok(best)
    }

    /// Predecessor queries are not supported; the lattice is expanded
    /// forward only.
    pub fn predecessors(&self, _state_id: StateId) -> Result<Vec<Successor>> {
        Err(LatticeError::BackwardSearchUnsupported)
    }

    // ── path extraction ─────────────────────────────────────────────────

    /// Reconstruct joint waypoints from a search id path.
    ///
    /// The goal id is a placeholder shared by every goal-satisfying
    /// configuration, so a terminal goal id is resolved by regenerating
    /// the predecessor's actions and taking the cheapest one that lands
    /// in the goal region.
    pub fn extract_path(&mut self, id_path: &[StateId]) -> Result<Vec<JointState>> {
        let (&first, rest) = id_path
            .split_first()
            .ok_or_else(|| LatticeError::InvalidConfiguration("empty id path".to_string()))?;

        if id_path.len() == 1 {
            let angles = if first == self.goal_id() {
                let start_id = self.start_id.ok_or_else(|| {
                    LatticeError::InvalidConfiguration("no start state set".to_string())
                })?;
                self.state_angles(start_id)?
            } else {
                self.state_angles(first)?
            };
            return Ok(vec![angles]);
        }

        if first == self.goal_id() {
            return Err(LatticeError::GoalHasNoSuccessor);
        }

        let mut path = Vec::with_capacity(id_path.len());
        path.push(self.state_angles(first)?);

        let mut prev_id = first;
        for &curr_id in rest {
            if prev_id == self.goal_id() {
                return Err(LatticeError::GoalHasNoSuccessor);
            }

            if curr_id == self.goal_id() {
                path.push(self.recover_goal_waypoint(prev_id)?);
            } else {
                path.push(self.state_angles(curr_id)?);
            }
            prev_id = curr_id;
        }

        Ok(path)
    }

    /// Find the cheapest validated goal-satisfying action at a path
    /// predecessor and return its terminal waypoint.
    fn recover_goal_waypoint(&mut self, prev_id: StateId) -> Result<JointState> {
        let prev_state = self.states.state(prev_id)?.state.clone();

        let actions = self
            .actions
            .actions(&prev_state)
            .ok_or(LatticeError::ActionSourceUnavailable)?;

        let mut best: Option<(i32, JointState)> = None;
        for action in &actions {
            let Some(last) = action.last() else {
                continue;
            };

            let pose = match self.planning_frame_fk(last) {
                Ok(pose) => pose,
                Err(_) => continue,
            };
            if !self.is_goal(last, &pose) {
                continue;
            }
            if self.check_action(&prev_state, action).is_none() {
                continue;
            }

            let succ_coord = self.discretizer.angles_to_coord(last);
            let waypoint = match self.states.get(&succ_coord) {
                Some(succ) => succ.state.clone(),
                None => last.clone(),
            };
            let cost = self.edge_cost(&prev_state, &waypoint);
            if best.as_ref().map_or(true, |(b, _)| cost < *b) {
                best = Some((cost, waypoint));
            }
        }

        match best {
            Some((_, waypoint)) => Ok(waypoint),
            None => Err(LatticeError::PathReconstructionFailed(prev_id)),
        }
    }

    // ── diagnostics ─────────────────────────────────────────────────────

    /// Human-readable rendering of a vertex: bin-center angles, or a
    /// placeholder for the reserved goal.
    pub fn state_string(&self, state_id: StateId) -> Result<String> {
        let state = self.states.state(state_id)?;
        if state_id == self.goal_id() {
            return Ok("<goal state>".to_string());
        }
        let angles = self.discretizer.coord_to_angles(&state.coord);
        let rendered: Vec<String> = angles.iter().map(|a| format!("{a:.3}")).collect();
        Ok(format!("{{ {} }}", rendered.join(", ")))
    }

    /// Expanded vertex ids in call order.
    #[inline]
    pub fn expanded_ids(&self) -> &[StateId] {
        self.stats.expanded()
    }

    /// Planning link pose and cached heuristic for every expanded vertex.
    /// The reserved goal and states whose FK fails are skipped.
    pub fn expanded_states(&self) -> Vec<ExpandedState> {
        self.stats
            .expanded()
            .iter()
            .filter(|&&id| id != self.goal_id())
            .filter_map(|&id| {
                let state = self.states.state(id).ok()?;
                let pose = self.planning_frame_fk(&state.state).ok()?;
                Some(ExpandedState {
                    pose,
                    heuristic: state.heuristic,
                })
            })
            .collect()
    }

    /// Drop every vertex, the coordinate index, and the expansion log.
    /// The goal region binding survives; the start binding does not.
    pub fn clear(&mut self) {
        self.states.clear();
        self.stats.clear();
        self.start_id = None;
    }

    // ── internals ───────────────────────────────────────────────────────

    fn state_angles(&self, state_id: StateId) -> Result<JointState> {
        if state_id == self.goal_id() {
            return Err(LatticeError::InvalidConfiguration(
                "the goal placeholder has no configuration".to_string(),
            ));
        }
        Ok(self.states.state(state_id)?.state.clone())
    }

    /// Goal membership plus the time-to-goal-region statistic.
    fn is_goal(&mut self, angles: &[f64], tip_pose: &Pose6) -> bool {
        let Some(goal) = &self.goal else {
            return false;
        };
        if goal.position_within(tip_pose) {
            if let Some(elapsed) = self.stats.note_near_goal() {
                info!(
                    target: self.config.expands_log.as_str(),
                    "search entered the goal region after {:.4} s and {} expansions",
                    elapsed.as_secs_f64(),
                    self.stats.expanded().len()
                );
            }
        }
        goal.contains(angles, tip_pose)
    }

    /// Validate an action from a parent configuration: joint limits on
    /// every waypoint, then swept collision from the parent to the first
    /// waypoint, then between consecutive waypoints. Returns the minimum
    /// clearance across the validated segments.
    fn check_action(&self, parent: &[f64], action: &Action) -> Option<f64> {
        let first = action.first()?;

        for waypoint in action {
            if !self.robot.check_joint_limits(waypoint) {
                trace!(
                    target: self.config.expands_log.as_str(),
                    "  action violates joint limits"
                );
                return None;
            }
        }

        let sweep = self.checker.is_state_to_state_valid(parent, first);
        if !sweep.valid {
            trace!(
                target: self.config.expands_log.as_str(),
                "  path to first waypoint in collision ({:.3} m, {} checks)",
                sweep.distance,
                sweep.checks
            );
            return None;
        }
        let mut clearance = sweep.distance;

        for pair in action.windows(2) {
            let sweep = self.checker.is_state_to_state_valid(&pair[0], &pair[1]);
            if !sweep.valid {
                trace!(
                    target: self.config.expands_log.as_str(),
                    "  path between waypoints in collision ({:.3} m)",
                    sweep.distance
                );
                return None;
            }
            clearance = clearance.min(sweep.distance);
        }

        Some(clearance)
    }

    fn edge_cost(&self, from: &[f64], to: &[f64]) -> i32 {
        match self.config.cost_policy {
            CostPolicy::Flat => self.config.cost_multiplier,
            CostPolicy::PrimitiveScaled => {
                // largest displacement over the first six joints, skipping
                // the wrist roll at index 4
                let max_diff = from
                    .iter()
                    .zip(to)
                    .take(6)
                    .enumerate()
                    .filter(|(joint, _)| *joint != 4)
                    .map(|(_, (&a, &b))| shortest_angle_dist(a, b))
                    .fold(0.0f64, f64::max);
                let num_prims = (max_diff / self.config.max_mprim_offset).ceil() as i32;
                num_prims * self.config.cost_multiplier
            }
        }
    }
}
