//! Editor state and the pointer/wheel interaction state machine.
//!
//! `EditorState` owns everything the scene host reads each frame: the gate
//! collection, the flight path, selection, mode flags, and playback. All
//! mutation happens synchronously inside these handlers; the host only
//! renders the result.

pub mod animation;
pub mod mode;
pub mod scene;
pub mod selection;

use glam::DVec3;
use shared::{GateKind, TrackRecord};

pub use animation::{AnimationState, DronePose};
pub use mode::EditorMode;
pub use scene::{Gate, GateId, SceneState, TrackLibrary};
pub use selection::SelectionState;

use crate::error::EditorError;
use crate::share;
use crate::viewport::picking::{pick_gate, ray_ground, Ray};

/// Height new waypoints are placed at until the user adjusts it
pub const DEFAULT_PATH_HEIGHT: f64 = 3.0;

/// Waypoint height range reachable with the wheel
pub const PATH_HEIGHT_MIN: f64 = 0.5;
pub const PATH_HEIGHT_MAX: f64 = 15.0;

/// Wheel-to-height and wheel-to-yaw factors
const WHEEL_HEIGHT_STEP: f64 = 0.01;
const WHEEL_ROTATE_STEP: f64 = 0.003;

/// How long the transient rotation/height readout stays visible, seconds
const INDICATOR_LINGER: f64 = 0.6;

/// What a wheel event did, so the host knows whether to zoom the camera
#[derive(Debug, Clone, PartialEq)]
pub enum WheelResponse {
    /// Pending waypoint height changed (path drawing)
    HeightChanged(f64),
    /// A gate was rotated to the given yaw
    GateRotated { id: GateId, yaw: f64 },
    /// Nothing here wanted the event
    Unhandled,
}

/// Transient on-screen readout (rotation angle, waypoint height)
struct Indicator {
    text: String,
    expires_at: f64,
}

/// An in-progress gate drag: which gate, and the grab offset on the
/// ground plane so the gate does not jump under the pointer
struct DragState {
    gate: GateId,
    offset_x: f64,
    offset_z: f64,
}

/// Combined editor state, owned by the embedding host
pub struct EditorState {
    pub scene: SceneState,
    pub selection: SelectionState,
    pub animation: AnimationState,
    mode: EditorMode,
    path_height: f64,
    drag: Option<DragState>,
    trace_active: bool,
    indicator: Option<Indicator>,
    share_loaded: bool,
}

impl EditorState {
    pub fn new() -> Self {
        Self {
            scene: SceneState::new(),
            selection: SelectionState::default(),
            animation: AnimationState::default(),
            mode: EditorMode::Edit,
            path_height: DEFAULT_PATH_HEIGHT,
            drag: None,
            trace_active: false,
            indicator: None,
            share_loaded: false,
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Height at which new waypoints will be placed
    pub fn path_height(&self) -> f64 {
        self.path_height
    }

    /// Slider input for the waypoint height
    pub fn set_path_height(&mut self, height: f64) {
        self.path_height = height.clamp(PATH_HEIGHT_MIN, PATH_HEIGHT_MAX);
    }

    /// A trace stroke is currently being drawn
    pub fn is_tracing(&self) -> bool {
        self.trace_active
    }

    // ── Mode transitions ──────────────────────────────────────

    /// Edit ⇄ Locked. Locking drops the selection; unlocking exits path
    /// drawing first.
    pub fn toggle_lock(&mut self) {
        match self.mode {
            EditorMode::Edit => {
                self.selection.clear();
                self.drag = None;
                self.mode = EditorMode::Locked;
                tracing::info!("layout locked");
            }
            EditorMode::Locked | EditorMode::PathDrawing => {
                self.trace_active = false;
                self.mode = EditorMode::Edit;
                tracing::info!("layout unlocked");
            }
        }
    }

    /// Locked ⇄ PathDrawing. Only reachable from Locked.
    pub fn toggle_path_drawing(&mut self) -> Result<(), EditorError> {
        match self.mode {
            EditorMode::Locked => {
                self.mode = EditorMode::PathDrawing;
                Ok(())
            }
            EditorMode::PathDrawing => {
                self.trace_active = false;
                self.mode = EditorMode::Locked;
                if !self.scene.path.is_empty() {
                    tracing::info!(waypoints = self.scene.path.len(), "path drawing finished");
                }
                Ok(())
            }
            EditorMode::Edit => Err(EditorError::NotLocked),
        }
    }

    // ── Gate actions ──────────────────────────────────────────

    /// Place a gate from the palette and select it
    pub fn add_gate(&mut self, kind: GateKind, position: DVec3) -> Result<GateId, EditorError> {
        if !self.mode.allows_gate_edits() {
            return Err(EditorError::LayoutLocked);
        }
        let id = self.scene.add_gate(kind, position);
        self.selection.select(id.clone());
        Ok(id)
    }

    /// Delete the selected gate. Ok(false) when nothing is selected.
    pub fn delete_selected(&mut self) -> Result<bool, EditorError> {
        if !self.mode.allows_gate_edits() {
            return Err(EditorError::LayoutLocked);
        }
        let Some(id) = self.selection.selected().cloned() else {
            return Ok(false);
        };
        self.scene.remove_gate(&id);
        self.selection.forget(&id);
        self.drag = None;
        Ok(true)
    }

    // ── Pointer protocol ──────────────────────────────────────

    pub fn pointer_down(&mut self, ray: &Ray) {
        match self.mode {
            EditorMode::PathDrawing => {
                if let Some(hit) = ray_ground(ray, 0.0) {
                    self.scene
                        .begin_trace(DVec3::new(hit.x, self.path_height, hit.z));
                    self.trace_active = true;
                }
            }
            EditorMode::Locked => {}
            EditorMode::Edit => {
                if let Some(id) = pick_gate(ray, &self.scene.gates) {
                    self.selection.select(id.clone());
                    self.scene.begin_drag();
                    let gate_pos = self
                        .scene
                        .get_gate(&id)
                        .map(|g| g.position)
                        .unwrap_or_default();
                    let grab = ray_ground(ray, 0.0).unwrap_or(gate_pos);
                    self.drag = Some(DragState {
                        gate: id,
                        offset_x: grab.x - gate_pos.x,
                        offset_z: grab.z - gate_pos.z,
                    });
                } else {
                    self.selection.deselect();
                }
            }
        }
    }

    pub fn pointer_move(&mut self, ray: &Ray) {
        if self.mode == EditorMode::PathDrawing {
            if self.trace_active {
                if let Some(hit) = ray_ground(ray, 0.0) {
                    self.scene
                        .extend_trace(DVec3::new(hit.x, self.path_height, hit.z));
                }
            }
            return;
        }

        if let Some(drag) = &self.drag {
            if self.mode.allows_gate_edits() {
                if let Some(hit) = ray_ground(ray, 0.0) {
                    let id = drag.gate.clone();
                    let x = hit.x - drag.offset_x;
                    let z = hit.z - drag.offset_z;
                    self.scene.drag_gate_to(&id, x, z);
                }
            }
            return;
        }

        if self.mode == EditorMode::Edit {
            self.selection.set_hovered(pick_gate(ray, &self.scene.gates));
        }
    }

    pub fn pointer_up(&mut self) {
        if self.trace_active {
            self.trace_active = false;
            if self.scene.path.len() > 1 {
                tracing::info!(points = self.scene.path.len(), "path traced");
            }
        }
        self.drag = None;
    }

    /// Wheel input. `now` is the host's monotonic clock in seconds and only
    /// feeds the transient readout.
    pub fn wheel(&mut self, delta: f64, now: f64) -> WheelResponse {
        if self.mode == EditorMode::PathDrawing {
            self.path_height = (self.path_height - delta * WHEEL_HEIGHT_STEP)
                .clamp(PATH_HEIGHT_MIN, PATH_HEIGHT_MAX);
            self.show_indicator(format!("{:.1}m", self.path_height), now);
            return WheelResponse::HeightChanged(self.path_height);
        }

        if self.mode.allows_gate_edits() {
            let target = self
                .selection
                .selected()
                .or(self.selection.hovered())
                .cloned();
            if let Some(id) = target {
                // Scrolling over an unselected gate selects it
                if !self.selection.is_selected(&id) {
                    self.selection.select(id.clone());
                }
                if let Some(yaw) = self.scene.rotate_gate(&id, delta * WHEEL_ROTATE_STEP) {
                    let degrees = (yaw.to_degrees() % 360.0).round();
                    self.show_indicator(format!("{degrees}°"), now);
                    return WheelResponse::GateRotated { id, yaw };
                }
            }
        }

        WheelResponse::Unhandled
    }

    /// Text of the transient readout, if it has not faded yet
    pub fn indicator(&self, now: f64) -> Option<&str> {
        self.indicator
            .as_ref()
            .filter(|i| now < i.expires_at)
            .map(|i| i.text.as_str())
    }

    fn show_indicator(&mut self, text: String, now: f64) {
        // A new trigger supersedes the previous fade timer
        self.indicator = Some(Indicator {
            text,
            expires_at: now + INDICATOR_LINGER,
        });
    }

    // ── Playback ──────────────────────────────────────────────

    /// Toggle the drone animation. Returns whether it is now running.
    pub fn toggle_animation(&mut self) -> Result<bool, EditorError> {
        if self.animation.is_running() {
            self.animation.stop();
            Ok(false)
        } else if !self.scene.path.is_flyable() {
            Err(EditorError::PathNotFlyable)
        } else {
            self.animation.start();
            Ok(true)
        }
    }

    /// Per-frame tick. Returns the drone pose while animating, None once
    /// stopped — the host removes the drone object when this goes None.
    pub fn frame(&mut self, dt: f64) -> Option<DronePose> {
        if !self.animation.is_running() {
            return None;
        }
        let Some(curve) = self.scene.path.curve() else {
            // Path no longer flyable: playback disables itself
            self.animation.stop();
            return None;
        };
        self.animation.advance(dt);
        Some(self.animation.pose(&curve))
    }

    // ── Bulk operations ───────────────────────────────────────

    /// Empty the path; stops playback if it was running
    pub fn clear_path(&mut self) {
        self.scene.clear_path();
        self.trace_active = false;
        if self.animation.is_running() {
            self.animation.stop();
        }
    }

    /// Reset the whole editor: gates, path, modes, selection, history
    pub fn clear_all(&mut self) {
        self.scene.clear_all();
        self.selection.clear();
        self.animation.stop();
        self.trace_active = false;
        self.drag = None;
        self.mode = EditorMode::Edit;
    }

    /// Undo the most recent gesture. Selection does not survive a restore
    /// (gate identity is rebuilt), and playback stops if the restored path
    /// is not flyable.
    pub fn undo(&mut self) -> bool {
        if !self.scene.undo() {
            return false;
        }
        self.selection.clear();
        self.drag = None;
        if self.animation.is_running() && !self.scene.path.is_flyable() {
            self.animation.stop();
        }
        true
    }

    /// Replace the scene with a loaded track (already parsed, so this can
    /// never partially apply)
    pub fn load_track(&mut self, record: &TrackRecord) {
        self.animation.stop();
        self.trace_active = false;
        self.drag = None;
        self.mode = EditorMode::Edit;
        self.scene.apply_record(record);
        self.selection.clear();
    }

    /// Parse and load track JSON. On any parse failure the live scene is
    /// left untouched.
    pub fn load_track_json(&mut self, json: &str) -> Result<(), EditorError> {
        let record: TrackRecord = serde_json::from_str(json)?;
        self.load_track(&record);
        Ok(())
    }

    /// Decode-and-load from the page query string, exactly once at startup.
    /// Failures are logged and swallowed, leaving the empty scene.
    pub fn startup_from_query(&mut self, query: &str) -> bool {
        if self.share_loaded {
            return false;
        }
        self.share_loaded = true;
        match share::decode_query(query) {
            Ok(Some(record)) => {
                self.load_track(&record);
                true
            }
            Ok(None) => false,
            Err(e) => {
                tracing::warn!("ignoring malformed share link: {e}");
                false
            }
        }
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_drawing_unreachable_from_edit() {
        let mut e = EditorState::new();
        assert!(matches!(
            e.toggle_path_drawing(),
            Err(EditorError::NotLocked)
        ));
        assert_eq!(e.mode(), EditorMode::Edit);

        e.toggle_lock();
        assert!(e.toggle_path_drawing().is_ok());
        assert_eq!(e.mode(), EditorMode::PathDrawing);
    }

    #[test]
    fn test_unlock_exits_path_drawing() {
        let mut e = EditorState::new();
        e.toggle_lock();
        e.toggle_path_drawing().unwrap();
        e.toggle_lock();
        assert_eq!(e.mode(), EditorMode::Edit);
    }

    #[test]
    fn test_locking_deselects() {
        let mut e = EditorState::new();
        e.add_gate(GateKind::Square, DVec3::ZERO).unwrap();
        assert!(e.selection.selected().is_some());
        e.toggle_lock();
        assert!(e.selection.selected().is_none());
    }

    #[test]
    fn test_add_gate_rejected_while_locked() {
        let mut e = EditorState::new();
        e.toggle_lock();
        assert!(matches!(
            e.add_gate(GateKind::Square, DVec3::ZERO),
            Err(EditorError::LayoutLocked)
        ));
        assert_eq!(e.scene.gate_count(), 0);
    }

    #[test]
    fn test_delete_rejected_while_locked() {
        let mut e = EditorState::new();
        e.add_gate(GateKind::Square, DVec3::ZERO).unwrap();
        e.toggle_lock();
        assert!(matches!(
            e.delete_selected(),
            Err(EditorError::LayoutLocked)
        ));
        assert_eq!(e.scene.gate_count(), 1);
    }

    #[test]
    fn test_pointer_drag_moves_gate_on_grid() {
        let mut e = EditorState::new();
        let id = e.add_gate(GateKind::Square, DVec3::ZERO).unwrap();
        e.pointer_down(&Ray::downward(0.0, 0.0));
        e.pointer_move(&Ray::downward(3.3, -1.2));
        e.pointer_up();
        let gate = e.scene.get_gate(&id).unwrap();
        assert_eq!(gate.position.x, 3.5);
        assert_eq!(gate.position.z, -1.0);
        assert_eq!(gate.position.y, 0.0);
    }

    #[test]
    fn test_pointer_down_on_empty_ground_deselects() {
        let mut e = EditorState::new();
        e.add_gate(GateKind::Square, DVec3::ZERO).unwrap();
        e.pointer_down(&Ray::downward(30.0, 30.0));
        assert!(e.selection.selected().is_none());
    }

    #[test]
    fn test_drag_ignored_while_locked() {
        let mut e = EditorState::new();
        let id = e.add_gate(GateKind::Square, DVec3::ZERO).unwrap();
        e.toggle_lock();
        e.pointer_down(&Ray::downward(0.0, 0.0));
        e.pointer_move(&Ray::downward(5.0, 5.0));
        e.pointer_up();
        assert_eq!(e.scene.get_gate(&id).unwrap().position, DVec3::ZERO);
    }

    #[test]
    fn test_trace_gesture_places_waypoints_at_height() {
        let mut e = EditorState::new();
        e.toggle_lock();
        e.toggle_path_drawing().unwrap();
        e.pointer_down(&Ray::downward(0.0, 0.0));
        e.pointer_move(&Ray::downward(1.0, 0.0));
        e.pointer_move(&Ray::downward(2.0, 0.0));
        e.pointer_up();
        assert_eq!(e.scene.path.len(), 3);
        for p in e.scene.path.points() {
            assert_eq!(p.y, DEFAULT_PATH_HEIGHT);
        }
    }

    #[test]
    fn test_trace_filters_dense_points() {
        let mut e = EditorState::new();
        e.toggle_lock();
        e.toggle_path_drawing().unwrap();
        e.pointer_down(&Ray::downward(0.0, 0.0));
        e.pointer_move(&Ray::downward(0.2, 0.0));
        e.pointer_move(&Ray::downward(0.4, 0.0));
        e.pointer_move(&Ray::downward(1.0, 0.0));
        e.pointer_up();
        assert_eq!(e.scene.path.len(), 2);
    }

    #[test]
    fn test_move_without_down_does_not_trace() {
        let mut e = EditorState::new();
        e.toggle_lock();
        e.toggle_path_drawing().unwrap();
        e.pointer_move(&Ray::downward(1.0, 0.0));
        assert!(e.scene.path.is_empty());
    }

    #[test]
    fn test_wheel_adjusts_height_in_path_drawing() {
        let mut e = EditorState::new();
        e.toggle_lock();
        e.toggle_path_drawing().unwrap();
        let response = e.wheel(-100.0, 0.0);
        assert_eq!(response, WheelResponse::HeightChanged(4.0));
        assert_eq!(e.path_height(), 4.0);
    }

    #[test]
    fn test_wheel_height_clamped() {
        let mut e = EditorState::new();
        e.toggle_lock();
        e.toggle_path_drawing().unwrap();
        e.wheel(1e6, 0.0);
        assert_eq!(e.path_height(), PATH_HEIGHT_MIN);
        e.wheel(-1e6, 0.0);
        assert_eq!(e.path_height(), PATH_HEIGHT_MAX);
    }

    #[test]
    fn test_wheel_rotates_and_auto_selects_hovered() {
        let mut e = EditorState::new();
        let id = e.add_gate(GateKind::Square, DVec3::ZERO).unwrap();
        e.selection.deselect();
        e.pointer_move(&Ray::downward(0.0, 0.0)); // hover
        let response = e.wheel(100.0, 0.0);
        match response {
            WheelResponse::GateRotated { id: rotated, yaw } => {
                assert_eq!(rotated, id);
                assert!((yaw - 0.3).abs() < 1e-12);
            }
            other => panic!("expected rotation, got {other:?}"),
        }
        assert!(e.selection.is_selected(&id));
    }

    #[test]
    fn test_wheel_over_nothing_is_unhandled() {
        let mut e = EditorState::new();
        assert_eq!(e.wheel(100.0, 0.0), WheelResponse::Unhandled);
    }

    #[test]
    fn test_indicator_fades_and_resets() {
        let mut e = EditorState::new();
        e.toggle_lock();
        e.toggle_path_drawing().unwrap();
        e.wheel(-10.0, 1.0);
        assert!(e.indicator(1.5).is_some());
        assert!(e.indicator(1.7).is_none());
        // New trigger supersedes the old timer
        e.wheel(-10.0, 1.5);
        assert!(e.indicator(2.0).is_some());
    }

    #[test]
    fn test_animation_needs_two_waypoints() {
        let mut e = EditorState::new();
        assert!(matches!(
            e.toggle_animation(),
            Err(EditorError::PathNotFlyable)
        ));
        e.scene.begin_trace(DVec3::new(0.0, 3.0, 0.0));
        assert!(matches!(
            e.toggle_animation(),
            Err(EditorError::PathNotFlyable)
        ));
        e.scene.extend_trace(DVec3::new(1.0, 3.0, 0.0));
        assert!(e.toggle_animation().unwrap());
        assert!(e.frame(1.0 / 60.0).is_some());
    }

    #[test]
    fn test_clear_path_stops_animation() {
        let mut e = EditorState::new();
        e.scene.begin_trace(DVec3::new(0.0, 3.0, 0.0));
        e.scene.extend_trace(DVec3::new(1.0, 3.0, 0.0));
        e.toggle_animation().unwrap();
        e.clear_path();
        assert!(!e.animation.is_running());
        assert!(e.frame(1.0 / 60.0).is_none());
        assert_eq!(e.scene.path.length(), 0.0);
    }

    #[test]
    fn test_frame_resumes_at_last_progress() {
        let mut e = EditorState::new();
        e.scene.begin_trace(DVec3::new(0.0, 3.0, 0.0));
        e.scene.extend_trace(DVec3::new(10.0, 3.0, 0.0));
        e.toggle_animation().unwrap();
        e.frame(0.5);
        let progress = e.animation.progress();
        e.toggle_animation().unwrap(); // stop
        assert!(e.frame(0.5).is_none());
        e.toggle_animation().unwrap(); // restart
        assert_eq!(e.animation.progress(), progress);
    }

    #[test]
    fn test_undo_clears_selection() {
        let mut e = EditorState::new();
        e.add_gate(GateKind::Square, DVec3::ZERO).unwrap();
        assert!(e.selection.selected().is_some());
        assert!(e.undo());
        assert!(e.selection.selected().is_none());
        assert_eq!(e.scene.gate_count(), 0);
    }

    #[test]
    fn test_load_track_json_rejects_garbage() {
        let mut e = EditorState::new();
        e.add_gate(GateKind::Square, DVec3::ZERO).unwrap();
        assert!(e.load_track_json("{not json").is_err());
        // Scene untouched
        assert_eq!(e.scene.gate_count(), 1);
    }

    #[test]
    fn test_startup_from_query_runs_once() {
        let mut e = EditorState::new();
        let record = {
            let mut other = EditorState::new();
            other.add_gate(GateKind::Flag, DVec3::ZERO).unwrap();
            other.scene.to_record("Linked", "", "")
        };
        let query = share::encode(&record);

        assert!(e.startup_from_query(&query));
        assert_eq!(e.scene.gate_count(), 1);

        e.clear_all();
        assert!(!e.startup_from_query(&query));
        assert_eq!(e.scene.gate_count(), 0);
    }

    #[test]
    fn test_startup_from_query_fails_silently() {
        let mut e = EditorState::new();
        assert!(!e.startup_from_query("track=%7Bnope"));
        assert_eq!(e.scene.gate_count(), 0);
        assert!(e.scene.path.is_empty());
    }
}
