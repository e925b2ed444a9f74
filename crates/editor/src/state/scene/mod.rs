//! Scene state management
//!
//! Live gates and flight path with bounded undo history. Wire-format
//! records live in `shared`; everything here is runtime state.

mod gate_ops;
mod history;
mod path_ops;
mod persistence;

pub use history::MAX_UNDO;
pub use persistence::TrackLibrary;

use glam::DVec3;
use shared::{GateKind, GateRecord};

use crate::path::FlightPath;
use history::Snapshot;

/// Runtime identifier of a placed gate. Never persisted — saved records
/// are identity-free and gates get fresh ids on every load or undo.
pub type GateId = String;

/// A placed gate: the logical entity the host's render nodes map back to
#[derive(Debug, Clone, PartialEq)]
pub struct Gate {
    pub id: GateId,
    pub kind: GateKind,
    /// Ground-relative position; y stays 0 for everything but loaded legacy data
    pub position: DVec3,
    /// Rotation about the vertical axis, radians
    pub yaw: f64,
}

impl Gate {
    pub fn new(kind: GateKind, position: DVec3, yaw: f64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            position,
            yaw,
        }
    }

    /// Wire form of this gate
    pub fn record(&self) -> GateRecord {
        GateRecord {
            kind: self.kind,
            position: self.position.into(),
            rotation: self.yaw,
        }
    }

    /// Rebuild a live gate (fresh id) from its wire form
    pub fn from_record(record: &GateRecord) -> Self {
        Self::new(record.kind, record.position.into(), record.rotation)
    }
}

/// Scene state with gates, path, and undo history
pub struct SceneState {
    pub gates: Vec<Gate>,
    pub path: FlightPath,
    pub(crate) undo_stack: Vec<Snapshot>,
    /// Monotonically increasing version counter for cache invalidation
    pub(crate) version: u64,
}

impl SceneState {
    /// Empty scene with the initial snapshot already on the history stack
    pub fn new() -> Self {
        let mut state = Self {
            gates: vec![],
            path: FlightPath::new(),
            undo_stack: vec![],
            version: 0,
        };
        state.snapshot();
        state
    }

    /// Current scene version (increments on every mutation)
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Get a gate by ID
    pub fn get_gate(&self, id: &str) -> Option<&Gate> {
        self.gates.iter().find(|g| g.id == id)
    }

    /// Get mutable gate by ID
    pub fn get_gate_mut(&mut self, id: &str) -> Option<&mut Gate> {
        self.gates.iter_mut().find(|g| g.id == id)
    }

    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new()
    }
}
