//! Path tracing operations.
//!
//! A trace gesture starts with `begin_trace` (one snapshot for the whole
//! gesture) and feeds pointer samples through `extend_trace`, which drops
//! points closer than `MIN_POINT_SPACING` to the last accepted one so fast
//! fine-grained pointer motion cannot flood the path.

use glam::DVec3;

use super::SceneState;
use crate::path::MIN_POINT_SPACING;

impl SceneState {
    /// Start a trace gesture: snapshot once, then accept the first waypoint
    /// unconditionally
    pub fn begin_trace(&mut self, point: DVec3) {
        self.snapshot();
        self.path.push(point);
        self.version += 1;
    }

    /// Append a waypoint if it is far enough from the last one.
    /// Returns whether the point was accepted.
    pub fn extend_trace(&mut self, point: DVec3) -> bool {
        match self.path.last() {
            Some(last) if point.distance(last) < MIN_POINT_SPACING => false,
            None => false, // no gesture in progress
            Some(_) => {
                self.path.push(point);
                self.version += 1;
                true
            }
        }
    }

    /// Empty the path (one undo step)
    pub fn clear_path(&mut self) {
        self.snapshot();
        self.path.clear();
        self.version += 1;
        tracing::info!("path cleared");
    }
}
