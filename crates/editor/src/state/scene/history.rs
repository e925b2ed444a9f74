//! Undo history: bounded stack of full scene snapshots.
//!
//! A snapshot is taken before every destructive action, so undo granularity
//! is per-gesture — a whole drag or a whole path trace is one step.

use glam::DVec3;
use shared::GateRecord;

use super::{Gate, SceneState};
use crate::path::FlightPath;

/// Undo stack capacity; the oldest snapshot is evicted on overflow
pub const MAX_UNDO: usize = 25;

/// Immutable copy of gates + waypoints at a point in time
#[derive(Debug, Clone)]
pub(crate) struct Snapshot {
    gates: Vec<GateRecord>,
    path_points: Vec<DVec3>,
}

impl SceneState {
    /// Push the current state onto the undo stack. Call before mutating.
    pub fn snapshot(&mut self) {
        self.undo_stack.push(Snapshot {
            gates: self.gates.iter().map(Gate::record).collect(),
            path_points: self.path.points().to_vec(),
        });
        if self.undo_stack.len() > MAX_UNDO {
            self.undo_stack.remove(0);
        }
    }

    /// Restore the state captured before the most recent mutation.
    /// The initial snapshot is never undoable past; returns false when
    /// there is nothing left to undo.
    pub fn undo(&mut self) -> bool {
        if self.undo_stack.len() <= 1 {
            return false;
        }
        let Some(snap) = self.undo_stack.pop() else {
            return false;
        };
        self.restore(&snap);
        true
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() > 1
    }

    /// Drop all history and start over from the current state
    pub(crate) fn reset_history(&mut self) {
        self.undo_stack.clear();
        self.snapshot();
    }

    fn restore(&mut self, snap: &Snapshot) {
        self.gates = snap.gates.iter().map(Gate::from_record).collect();
        self.path = FlightPath::from_points(snap.path_points.clone());
        self.version += 1;
    }
}
