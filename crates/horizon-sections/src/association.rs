//! Side table from displayed views to the controller that vended them.
//!
//! The host grid owns its views; this table only records which section
//! controller produced each live view so later lifecycle callbacks, which
//! identify a view but not its controller, can be routed. Entries exist while
//! a view is displayed: they are added when a view is vended (or lazily when a
//! display callback finds none) and removed when the view ends display or its
//! controller is unmapped.

use std::collections::HashMap;

use horizon_sections_core::logging::targets;
use horizon_sections_core::sections_trace;

use crate::grid::CellId;
use crate::section_map::SectionKey;

/// Maps live views to their vending controller.
#[derive(Debug, Default)]
pub struct ViewAssociationTable {
    entries: HashMap<CellId, SectionKey>,
}

impl ViewAssociationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Associates `cell` with `controller`, replacing any previous entry.
    ///
    /// Returns the previously associated controller, which differs from
    /// `controller` when the host reused the view for another section.
    pub fn associate(&mut self, cell: CellId, controller: SectionKey) -> Option<SectionKey> {
        let previous = self.entries.insert(cell, controller);
        sections_trace!(target: targets::DISPLAY, %cell, reassociated = previous.is_some(), "view associated");
        previous
    }

    /// The controller that vended `cell`, if it is still associated.
    pub fn controller_for(&self, cell: CellId) -> Option<SectionKey> {
        self.entries.get(&cell).copied()
    }

    /// Removes the entry for `cell`.
    pub fn dissociate(&mut self, cell: CellId) -> Option<SectionKey> {
        self.entries.remove(&cell)
    }

    /// Drops every entry that refers to `controller`. Returns how many were
    /// removed.
    pub fn remove_controller(&mut self, controller: SectionKey) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, key| *key != controller);
        before - self.entries.len()
    }

    /// Cells currently associated with `controller`, in id order.
    pub fn cells_for(&self, controller: SectionKey) -> Vec<CellId> {
        let mut cells: Vec<CellId> = self
            .entries
            .iter()
            .filter(|(_, key)| **key == controller)
            .map(|(cell, _)| *cell)
            .collect();
        cells.sort_unstable();
        cells
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
