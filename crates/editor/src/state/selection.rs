use crate::state::scene::GateId;

/// Gate selection state: at most one selected gate, an independently
/// tracked hovered gate. Both are weak references into the live gate
/// collection and are dropped when the gate goes away.
#[derive(Default)]
pub struct SelectionState {
    selected: Option<GateId>,
    hovered: Option<GateId>,
}

impl SelectionState {
    /// Currently selected gate
    pub fn selected(&self) -> Option<&GateId> {
        self.selected.as_ref()
    }

    /// Gate under the pointer
    pub fn hovered(&self) -> Option<&GateId> {
        self.hovered.as_ref()
    }

    /// Check if a gate is selected
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_deref() == Some(id)
    }

    /// Select a gate (replaces any previous selection)
    pub fn select(&mut self, id: GateId) {
        self.selected = Some(id);
    }

    /// Update the hovered gate
    pub fn set_hovered(&mut self, id: Option<GateId>) {
        self.hovered = id;
    }

    /// Clear the selection, keep hover
    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// Clear selection and hover
    pub fn clear(&mut self) {
        self.selected = None;
        self.hovered = None;
    }

    /// Drop any reference to a gate that no longer exists
    pub fn forget(&mut self, id: &str) {
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        if self.hovered.as_deref() == Some(id) {
            self.hovered = None;
        }
    }
}
