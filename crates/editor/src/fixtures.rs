//! Factory functions for creating test data.
//!
//! Convenient helpers to construct gate and track records used in tests and
//! by embedding hosts.

use shared::{GateKind, GateRecord, Point3, TrackRecord};

// ── Gate factories ──────────────────────────────────────────────

/// Gate of the given kind on the ground at (x, z)
pub fn gate_record(kind: GateKind, x: f64, z: f64) -> GateRecord {
    GateRecord {
        kind,
        position: Point3::new(x, 0.0, z),
        rotation: 0.0,
    }
}

/// Gate with an explicit yaw
pub fn gate_record_rotated(kind: GateKind, x: f64, z: f64, rotation: f64) -> GateRecord {
    GateRecord {
        kind,
        position: Point3::new(x, 0.0, z),
        rotation,
    }
}

// ── Path factories ──────────────────────────────────────────────

/// `n` waypoints along +x at unit spacing (comfortably above the minimum)
pub fn straight_path(n: usize, height: f64) -> Vec<Point3> {
    (0..n).map(|i| Point3::new(i as f64, height, 0.0)).collect()
}

// ── Track factories ─────────────────────────────────────────────

/// Wrap gates and waypoints into a track record
pub fn track(name: &str, gates: Vec<GateRecord>, path_points: Vec<Point3>) -> TrackRecord {
    TrackRecord {
        name: name.to_string(),
        gates,
        path_points,
        ..Default::default()
    }
}

/// Track with no gates and no path
pub fn empty_track() -> TrackRecord {
    track("Empty", vec![], vec![])
}

/// Small but complete track: a gate slalom with a flyable path through it
pub fn slalom_track() -> TrackRecord {
    track(
        "Slalom",
        vec![
            gate_record(GateKind::Square, 0.0, 0.0),
            gate_record_rotated(GateKind::Arch, 8.0, 4.0, 0.6),
            gate_record_rotated(GateKind::Hurdle, 16.0, -4.0, -0.6),
            gate_record(GateKind::Flag, 24.0, 0.0),
        ],
        vec![
            Point3::new(-4.0, 3.0, 0.0),
            Point3::new(0.0, 3.0, 0.0),
            Point3::new(8.0, 3.5, 4.0),
            Point3::new(16.0, 2.5, -4.0),
            Point3::new(24.0, 3.0, 0.0),
        ],
    )
}
