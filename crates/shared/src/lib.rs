use chrono::{DateTime, Utc};
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Gate variants that can be placed on the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateKind {
    Square,
    Arch,
    Ladder,
    Hurdle,
    Dive,
    Flag,
}

impl GateKind {
    /// Display name shown in gate info panels
    pub fn label(&self) -> &'static str {
        match self {
            GateKind::Square => "Square",
            GateKind::Arch => "Arch",
            GateKind::Ladder => "Ladder",
            GateKind::Hurdle => "Hurdle",
            GateKind::Dive => "Dive",
            GateKind::Flag => "Flag",
        }
    }

    /// Nominal frame extents (width, height, depth) of the built obstacle.
    /// Used for hit-test bounds; the visual mesh is owned by the scene host.
    pub fn dimensions(&self) -> (f64, f64, f64) {
        match self {
            GateKind::Square => (3.0, 3.0, 0.2),
            GateKind::Arch => (3.0, 3.5, 0.2),
            GateKind::Ladder => (2.5, 7.5, 0.2),
            GateKind::Hurdle => (5.0, 1.5, 0.2),
            GateKind::Dive => (3.5, 3.5, 0.9),
            GateKind::Flag => (0.7, 4.0, 1.3),
        }
    }

    /// All placeable kinds, in palette order
    pub fn all() -> &'static [GateKind] {
        &[
            GateKind::Square,
            GateKind::Arch,
            GateKind::Ladder,
            GateKind::Hurdle,
            GateKind::Dive,
            GateKind::Flag,
        ]
    }
}

/// 3-D point in field coordinates (y up, ground at y = 0)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Round each coordinate to `decimals` places (compact share variant)
    pub fn rounded(&self, decimals: u32) -> Self {
        Self {
            x: round_to(self.x, decimals),
            y: round_to(self.y, decimals),
            z: round_to(self.z, decimals),
        }
    }
}

impl From<DVec3> for Point3 {
    fn from(v: DVec3) -> Self {
        Self { x: v.x, y: v.y, z: v.z }
    }
}

impl From<Point3> for DVec3 {
    fn from(p: Point3) -> Self {
        DVec3::new(p.x, p.y, p.z)
    }
}

/// One placed gate as it appears in a saved track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateRecord {
    #[serde(rename = "type")]
    pub kind: GateKind,
    pub position: Point3,
    /// Yaw about the vertical axis, radians. Absent in old records.
    #[serde(default)]
    pub rotation: f64,
}

/// A complete saved track: gate layout plus traced flight path.
///
/// Field names match the JSON records produced by earlier versions of the
/// editor, so existing saves and share links keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub author: String,
    /// Absent in the compact share variant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub gates: Vec<GateRecord>,
    #[serde(default)]
    pub path_points: Vec<Point3>,
}

impl Default for TrackRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            author: String::new(),
            created_at: None,
            gates: vec![],
            path_points: vec![],
        }
    }
}

impl TrackRecord {
    /// Compact variant used for share links: positions rounded to 2 decimals,
    /// rotations to 3, metadata beyond the name stripped.
    pub fn rounded(&self) -> Self {
        Self {
            name: self.name.clone(),
            description: String::new(),
            author: String::new(),
            created_at: None,
            gates: self
                .gates
                .iter()
                .map(|g| GateRecord {
                    kind: g.kind,
                    position: g.position.rounded(2),
                    rotation: round_to(g.rotation, 3),
                })
                .collect(),
            path_points: self.path_points.iter().map(|p| p.rounded(2)).collect(),
        }
    }
}

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_kind_wire_names() {
        assert_eq!(serde_json::to_string(&GateKind::Square).unwrap(), "\"square\"");
        assert_eq!(serde_json::to_string(&GateKind::Flag).unwrap(), "\"flag\"");
        let k: GateKind = serde_json::from_str("\"hurdle\"").unwrap();
        assert_eq!(k, GateKind::Hurdle);
    }

    #[test]
    fn test_gate_record_wire_format() {
        let json = r#"{"type":"arch","position":{"x":5.0,"y":0.0,"z":-2.5},"rotation":1.57}"#;
        let g: GateRecord = serde_json::from_str(json).unwrap();
        assert_eq!(g.kind, GateKind::Arch);
        assert_eq!(g.position, Point3::new(5.0, 0.0, -2.5));
        assert_eq!(g.rotation, 1.57);
    }

    #[test]
    fn test_gate_record_missing_rotation_defaults_to_zero() {
        let json = r#"{"type":"square","position":{"x":0,"y":0,"z":0}}"#;
        let g: GateRecord = serde_json::from_str(json).unwrap();
        assert_eq!(g.rotation, 0.0);
    }

    #[test]
    fn test_track_record_round_trip() {
        let track = TrackRecord {
            name: "Test".into(),
            description: "desc".into(),
            author: "me".into(),
            created_at: Some(Utc::now()),
            gates: vec![GateRecord {
                kind: GateKind::Square,
                position: Point3::new(1.0, 0.0, 2.0),
                rotation: 0.5,
            }],
            path_points: vec![Point3::new(0.0, 3.0, 0.0), Point3::new(1.0, 3.0, 0.0)],
        };
        let json = serde_json::to_string(&track).unwrap();
        let back: TrackRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, track);
    }

    #[test]
    fn test_track_record_uses_camel_case_keys() {
        let track = TrackRecord {
            path_points: vec![Point3::new(0.0, 3.0, 0.0)],
            ..Default::default()
        };
        let json = serde_json::to_string(&track).unwrap();
        assert!(json.contains("\"pathPoints\""));
        assert!(!json.contains("\"path_points\""));
    }

    #[test]
    fn test_compact_share_variant_loads() {
        // Share links omit description/author/createdAt
        let json = r#"{"name":"Shared","gates":[{"type":"flag","position":{"x":1.25,"y":0,"z":3.5},"rotation":0.785}],"pathPoints":[{"x":0,"y":3,"z":0}]}"#;
        let track: TrackRecord = serde_json::from_str(json).unwrap();
        assert_eq!(track.name, "Shared");
        assert!(track.created_at.is_none());
        assert_eq!(track.gates.len(), 1);
        assert_eq!(track.path_points.len(), 1);
    }

    #[test]
    fn test_missing_gates_is_an_error() {
        let json = r#"{"name":"bad"}"#;
        assert!(serde_json::from_str::<TrackRecord>(json).is_err());
    }

    #[test]
    fn test_rounded_truncates_precision() {
        let track = TrackRecord {
            name: "T".into(),
            description: "keep out".into(),
            author: "a".into(),
            created_at: Some(Utc::now()),
            gates: vec![GateRecord {
                kind: GateKind::Dive,
                position: Point3::new(1.23456, 0.0, -7.89123),
                rotation: 0.123456,
            }],
            path_points: vec![Point3::new(0.333333, 3.0, 0.666666)],
        };
        let compact = track.rounded();
        assert_eq!(compact.gates[0].position.x, 1.23);
        assert_eq!(compact.gates[0].position.z, -7.89);
        assert_eq!(compact.gates[0].rotation, 0.123);
        assert_eq!(compact.path_points[0].x, 0.33);
        assert!(compact.description.is_empty());
        assert!(compact.created_at.is_none());
    }

    #[test]
    fn test_dimensions_positive() {
        for kind in GateKind::all() {
            let (w, h, d) = kind.dimensions();
            assert!(w > 0.0 && h > 0.0 && d > 0.0, "{:?}", kind);
        }
    }
}
