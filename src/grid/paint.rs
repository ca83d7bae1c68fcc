use std::collections::HashSet;

use crate::units::UnitId;

/// Drag-to-toggle bookkeeping. Each cell toggles at most once per session,
/// however often the pointer re-enters it.
#[derive(Debug, Default)]
pub enum PaintSession {
    #[default]
    Idle,
    Painting { toggled: HashSet<UnitId> },
}

impl PaintSession {
    /// Starts a session on `id`. Returns the id to toggle.
    pub fn press(&mut self, id: UnitId) -> Option<UnitId> {
        let mut toggled = HashSet::new();
        toggled.insert(id);
        *self = PaintSession::Painting { toggled };
        Some(id)
    }

    /// Pointer moved onto `id` with the button held.
    pub fn enter(&mut self, id: UnitId) -> Option<UnitId> {
        match self {
            PaintSession::Idle => None,
            PaintSession::Painting { toggled } => toggled.insert(id).then_some(id),
        }
    }

    pub fn release(&mut self) {
        *self = PaintSession::Idle;
    }

    pub fn is_painting(&self) -> bool {
        matches!(self, PaintSession::Painting { .. })
    }
}
