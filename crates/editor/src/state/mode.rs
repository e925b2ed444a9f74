/// Modal editor state.
///
/// `PathDrawing` is a sub-state of `Locked`: it is only reachable from
/// `Locked` and unlocking drops back through it. Animation playback is an
/// orthogonal flag tracked by `AnimationState`, not a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    /// Gates placeable, draggable, deletable
    #[default]
    Edit,
    /// Gates frozen; path drawing available
    Locked,
    /// Pointer drags trace flight-path waypoints
    PathDrawing,
}

impl EditorMode {
    /// Badge text shown by the host
    pub fn label(&self) -> &'static str {
        match self {
            EditorMode::Edit => "Edit Mode",
            EditorMode::Locked => "Locked",
            EditorMode::PathDrawing => "Drawing Path",
        }
    }

    /// Gate mutations (add, drag, rotate, delete) are only allowed here
    pub fn allows_gate_edits(&self) -> bool {
        matches!(self, EditorMode::Edit)
    }
}
