//! Per-section visibility tracking.
//!
//! Cell display callbacks arrive one view at a time. Section controllers also
//! want to know when their section as a whole becomes visible or leaves the
//! screen; this tracker turns the per-cell stream into those edges.

use std::collections::HashSet;

use slotmap::SecondaryMap;

use crate::grid::CellId;
use crate::section_map::SectionKey;

/// Visible cells per section controller.
#[derive(Debug, Default)]
pub struct DisplayTracker {
    visible: SecondaryMap<SectionKey, HashSet<CellId>>,
}

impl DisplayTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `cell` of `controller` is about to be displayed.
    ///
    /// Returns `true` if it is the first visible cell of that controller.
    pub fn will_display(&mut self, controller: SectionKey, cell: CellId) -> bool {
        match self.visible.get_mut(controller) {
            Some(cells) => {
                let was_empty = cells.is_empty();
                cells.insert(cell);
                was_empty
            }
            None => {
                self.visible.insert(controller, HashSet::from([cell]));
                true
            }
        }
    }

    /// Records that `cell` of `controller` left the screen.
    ///
    /// Returns `true` if it was the last visible cell of that controller.
    /// Cells that were never recorded return `false`.
    pub fn did_end_display(&mut self, controller: SectionKey, cell: CellId) -> bool {
        let Some(cells) = self.visible.get_mut(controller) else {
            return false;
        };
        if !cells.remove(&cell) {
            return false;
        }
        if cells.is_empty() {
            self.visible.remove(controller);
            true
        } else {
            false
        }
    }

    /// Controllers with at least one visible cell.
    pub fn visible_keys(&self) -> Vec<SectionKey> {
        self.visible
            .iter()
            .filter(|(_, cells)| !cells.is_empty())
            .map(|(key, _)| key)
            .collect()
    }

    /// Forgets a controller entirely.
    pub fn remove(&mut self, controller: SectionKey) {
        self.visible.remove(controller);
    }

    pub fn clear(&mut self) {
        self.visible.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn test_first_and_last_edges() {
        let mut keys: SlotMap<SectionKey, ()> = SlotMap::with_key();
        let key = keys.insert(());
        let mut tracker = DisplayTracker::new();

        assert!(tracker.will_display(key, CellId::new(1)));
        assert!(!tracker.will_display(key, CellId::new(2)));
        assert_eq!(tracker.visible_keys(), vec![key]);

        assert!(!tracker.did_end_display(key, CellId::new(1)));
        assert!(tracker.did_end_display(key, CellId::new(2)));
        assert!(tracker.visible_keys().is_empty());
    }

    #[test]
    fn test_unknown_cell_is_not_an_edge() {
        let mut keys: SlotMap<SectionKey, ()> = SlotMap::with_key();
        let key = keys.insert(());
        let mut tracker = DisplayTracker::new();

        assert!(!tracker.did_end_display(key, CellId::new(9)));
        tracker.will_display(key, CellId::new(1));
        assert!(!tracker.did_end_display(key, CellId::new(9)));
        assert_eq!(tracker.visible_keys(), vec![key]);
    }

    #[test]
    fn test_redisplay_same_cell_is_not_first() {
        let mut keys: SlotMap<SectionKey, ()> = SlotMap::with_key();
        let key = keys.insert(());
        let mut tracker = DisplayTracker::new();

        assert!(tracker.will_display(key, CellId::new(1)));
        assert!(!tracker.will_display(key, CellId::new(1)));
        assert!(tracker.did_end_display(key, CellId::new(1)));
    }
}
