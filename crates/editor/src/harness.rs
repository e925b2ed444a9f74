//! Headless harness for programmatic editing.
//!
//! Drives the editor through the same pointer/wheel entry points a scene
//! host would use, with scripted vertical rays instead of camera rays.

use glam::DVec3;
use shared::GateKind;

use crate::error::EditorError;
use crate::state::{DronePose, EditorMode, EditorState, GateId};
use crate::viewport::picking::Ray;

/// Headless editor harness — scripted gestures over the full editor state
pub struct EditorHarness {
    pub editor: EditorState,
}

impl EditorHarness {
    /// Create a new empty harness
    pub fn new() -> Self {
        Self {
            editor: EditorState::new(),
        }
    }

    // ── Gate manipulation ─────────────────────────────────────

    /// Place a gate on the ground at (x, z) and return its ID
    pub fn add_gate(&mut self, kind: GateKind, x: f64, z: f64) -> Result<GateId, EditorError> {
        self.editor.add_gate(kind, DVec3::new(x, 0.0, z))
    }

    /// Click the field at (x, z): selects a gate there or deselects
    pub fn click_at(&mut self, x: f64, z: f64) {
        self.editor.pointer_down(&Ray::downward(x, z));
        self.editor.pointer_up();
    }

    /// Press on (x, z), drag to (to_x, to_z), release
    pub fn drag(&mut self, x: f64, z: f64, to_x: f64, to_z: f64) {
        self.editor.pointer_down(&Ray::downward(x, z));
        self.editor.pointer_move(&Ray::downward(to_x, to_z));
        self.editor.pointer_up();
    }

    /// Delete the selected gate
    pub fn delete_selected(&mut self) -> Result<bool, EditorError> {
        self.editor.delete_selected()
    }

    /// Number of gates in the scene
    pub fn gate_count(&self) -> usize {
        self.editor.scene.gate_count()
    }

    // ── Modes ─────────────────────────────────────────────────

    /// Lock the layout (no-op if already locked)
    pub fn lock_layout(&mut self) {
        if self.editor.mode() == EditorMode::Edit {
            self.editor.toggle_lock();
        }
    }

    /// Back to edit mode (no-op if already there)
    pub fn unlock_layout(&mut self) {
        if self.editor.mode() != EditorMode::Edit {
            self.editor.toggle_lock();
        }
    }

    /// Enter path drawing (requires a locked layout)
    pub fn start_path_drawing(&mut self) -> Result<(), EditorError> {
        if self.editor.mode() == EditorMode::PathDrawing {
            return Ok(());
        }
        self.editor.toggle_path_drawing()
    }

    /// Leave path drawing, back to locked
    pub fn finish_path_drawing(&mut self) -> Result<(), EditorError> {
        if self.editor.mode() == EditorMode::PathDrawing {
            self.editor.toggle_path_drawing()
        } else {
            Ok(())
        }
    }

    // ── Path ──────────────────────────────────────────────────

    /// Trace one stroke over the given ground positions at the current
    /// path height
    pub fn trace(&mut self, ground_points: &[(f64, f64)]) {
        let mut points = ground_points.iter();
        if let Some(&(x, z)) = points.next() {
            self.editor.pointer_down(&Ray::downward(x, z));
        }
        for &(x, z) in points {
            self.editor.pointer_move(&Ray::downward(x, z));
        }
        self.editor.pointer_up();
    }

    pub fn waypoint_count(&self) -> usize {
        self.editor.scene.path.len()
    }

    pub fn path_length(&self) -> f64 {
        self.editor.scene.path.length()
    }

    pub fn clear_path(&mut self) {
        self.editor.clear_path();
    }

    // ── Playback ──────────────────────────────────────────────

    pub fn toggle_animation(&mut self) -> Result<bool, EditorError> {
        self.editor.toggle_animation()
    }

    pub fn frame(&mut self, dt: f64) -> Option<DronePose> {
        self.editor.frame(dt)
    }

    // ── History & persistence ─────────────────────────────────

    /// Undo the last gesture
    pub fn undo(&mut self) -> bool {
        self.editor.undo()
    }

    /// Export the current scene as track JSON
    pub fn export_track_json(&self, name: &str) -> String {
        let record = self.editor.scene.to_record(name, "", "");
        serde_json::to_string_pretty(&record).unwrap_or_default()
    }

    /// Load track JSON, replacing the scene. The scene is untouched on
    /// parse failure.
    pub fn load_track_json(&mut self, json: &str) -> Result<(), EditorError> {
        self.editor.load_track_json(json)
    }

    /// Simulate startup with a page query string
    pub fn startup_with_query(&mut self, query: &str) -> bool {
        self.editor.startup_from_query(query)
    }
}

impl Default for EditorHarness {
    fn default() -> Self {
        Self::new()
    }
}
