//! Save/load between live scene state and `TrackRecord`, plus the on-disk
//! track library.

use std::path::{Path, PathBuf};

use chrono::Utc;
use shared::TrackRecord;

use super::{Gate, SceneState};
use crate::error::StoreError;
use crate::path::FlightPath;

impl SceneState {
    /// Export the current scene as a saveable record
    pub fn to_record(&self, name: &str, description: &str, author: &str) -> TrackRecord {
        TrackRecord {
            name: name.to_string(),
            description: description.to_string(),
            author: author.to_string(),
            created_at: Some(Utc::now()),
            gates: self.gates.iter().map(Gate::record).collect(),
            path_points: self.path.points().iter().map(|p| (*p).into()).collect(),
        }
    }

    /// Replace the live scene with a loaded record (one undo step).
    /// The record is already fully parsed, so this never partially applies.
    pub fn apply_record(&mut self, record: &TrackRecord) {
        self.snapshot();
        self.gates = record.gates.iter().map(Gate::from_record).collect();
        self.path = FlightPath::from_points(
            record.path_points.iter().map(|p| (*p).into()).collect(),
        );
        self.version += 1;
        tracing::info!(
            name = %record.name,
            gates = record.gates.len(),
            waypoints = record.path_points.len(),
            "track loaded"
        );
    }
}

/// Append-only library of saved tracks in a single JSON file
pub struct TrackLibrary {
    file: PathBuf,
}

impl TrackLibrary {
    /// Library stored under an explicit directory (tests, embedding hosts)
    pub fn new(dir: &Path) -> Self {
        Self {
            file: dir.join("tracks.json"),
        }
    }

    /// Library at the platform data directory
    pub fn default_location() -> Result<Self, StoreError> {
        let dirs = directories::ProjectDirs::from("com", "fpv", "fpv-editor")
            .ok_or(StoreError::NoDataDir)?;
        Ok(Self::new(dirs.data_dir()))
    }

    /// All saved tracks; a missing library file is just empty
    pub fn load_all(&self) -> Result<Vec<TrackRecord>, StoreError> {
        if !self.file.exists() {
            return Ok(vec![]);
        }
        let json = std::fs::read_to_string(&self.file)?;
        serde_json::from_str(&json).map_err(StoreError::Corrupt)
    }

    /// Append a record. Prior entries are re-read first and preserved; an
    /// unreadable library is an error, never an overwrite.
    pub fn save(&self, record: TrackRecord) -> Result<(), StoreError> {
        let mut tracks = self.load_all()?;
        tracks.push(record);
        if let Some(parent) = self.file.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&tracks)
            .map_err(StoreError::Corrupt)?;
        std::fs::write(&self.file, json)?;
        tracing::info!(count = tracks.len(), "track library saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;
    use shared::GateKind;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("fpv-editor-test-{tag}"));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_record_round_trip_preserves_scene() {
        let mut s = SceneState::new();
        s.add_gate(GateKind::Square, DVec3::ZERO);
        s.add_gate(GateKind::Arch, DVec3::new(5.0, 0.0, 0.0));
        s.begin_trace(DVec3::new(0.0, 3.0, 0.0));
        s.extend_trace(DVec3::new(2.0, 3.0, 0.0));

        let record = s.to_record("Test", "", "");
        let mut restored = SceneState::new();
        restored.apply_record(&record);

        assert_eq!(restored.gate_count(), 2);
        assert_eq!(restored.gates[0].kind, GateKind::Square);
        assert_eq!(restored.gates[1].kind, GateKind::Arch);
        assert_eq!(restored.gates[1].position, DVec3::new(5.0, 0.0, 0.0));
        assert_eq!(restored.path.len(), 2);
    }

    #[test]
    fn test_apply_record_is_undoable() {
        let mut s = SceneState::new();
        s.add_gate(GateKind::Square, DVec3::ZERO);

        let mut incoming = SceneState::new();
        incoming.add_gate(GateKind::Flag, DVec3::ZERO);
        incoming.add_gate(GateKind::Dive, DVec3::ZERO);
        let record = incoming.to_record("Other", "", "");

        s.apply_record(&record);
        assert_eq!(s.gate_count(), 2);
        assert!(s.undo());
        assert_eq!(s.gate_count(), 1);
        assert_eq!(s.gates[0].kind, GateKind::Square);
    }

    #[test]
    fn test_library_appends_without_dropping() {
        let dir = temp_dir("append");
        let lib = TrackLibrary::new(&dir);
        assert!(lib.load_all().unwrap().is_empty());

        let mut s = SceneState::new();
        s.add_gate(GateKind::Square, DVec3::ZERO);
        lib.save(s.to_record("First", "", "a")).unwrap();
        lib.save(s.to_record("Second", "", "b")).unwrap();

        let tracks = lib.load_all().unwrap();
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].name, "First");
        assert_eq!(tracks[1].name, "Second");
    }

    #[test]
    fn test_library_refuses_to_clobber_corrupt_file() {
        let dir = temp_dir("corrupt");
        let lib = TrackLibrary::new(&dir);
        std::fs::write(dir.join("tracks.json"), "not json").unwrap();

        let s = SceneState::new();
        let err = lib.save(s.to_record("T", "", ""));
        assert!(matches!(err, Err(StoreError::Corrupt(_))));
        // Original bytes untouched
        assert_eq!(
            std::fs::read_to_string(dir.join("tracks.json")).unwrap(),
            "not json"
        );
    }
}
