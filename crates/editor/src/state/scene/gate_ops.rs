//! Gate CRUD and drag operations.
//!
//! Mode gating (rejecting edits while locked) lives in `EditorState`;
//! these operations mutate unconditionally.

use glam::DVec3;
use shared::GateKind;

use super::{Gate, GateId, SceneState};
use crate::viewport::picking::snap_to_grid;

impl SceneState {
    /// Place a new gate and return its ID
    pub fn add_gate(&mut self, kind: GateKind, position: DVec3) -> GateId {
        self.snapshot();
        let gate = Gate::new(kind, position, 0.0);
        let id = gate.id.clone();
        tracing::info!(kind = kind.label(), "gate added");
        self.gates.push(gate);
        self.version += 1;
        id
    }

    /// Remove a gate by ID. Returns false if it does not exist.
    pub fn remove_gate(&mut self, id: &str) -> bool {
        if self.get_gate(id).is_none() {
            return false;
        }
        self.snapshot();
        self.gates.retain(|g| g.id != id);
        self.version += 1;
        tracing::info!("gate deleted");
        true
    }

    /// Rotate a gate about the vertical axis. Returns the new yaw.
    /// Not snapshotted: wheel rotation is continuous and not an undo step.
    pub fn rotate_gate(&mut self, id: &str, delta: f64) -> Option<f64> {
        let version = &mut self.version;
        self.gates.iter_mut().find(|g| g.id == id).map(|gate| {
            gate.yaw += delta;
            *version += 1;
            gate.yaw
        })
    }

    /// Save undo state once at the beginning of a drag gesture
    pub fn begin_drag(&mut self) {
        self.snapshot();
        self.version += 1;
    }

    /// Move a dragged gate to a new ground position, snapped to the grid.
    /// Height is not draggable.
    pub fn drag_gate_to(&mut self, id: &str, x: f64, z: f64) {
        let version = &mut self.version;
        if let Some(gate) = self.gates.iter_mut().find(|g| g.id == id) {
            gate.position.x = snap_to_grid(x);
            gate.position.z = snap_to_grid(z);
            *version += 1;
        }
    }

    /// Remove every gate and waypoint and start history over
    pub fn clear_all(&mut self) {
        self.gates.clear();
        self.path.clear();
        self.reset_history();
        self.version += 1;
        tracing::info!("track cleared");
    }
}
