//! Selection, highlighting, and display lifecycle routing.
//!
//! Each callback goes to the secondary delegate hooks first, with the
//! arguments the grid passed, and then to the section controller.

use std::rc::Rc;
use std::time::Instant;

use horizon_sections_core::logging::targets;
use horizon_sections_core::sections_debug;

use super::{borrow_controller, borrow_controller_mut, ListAdapter};
use crate::controller::SharedController;
use crate::delegate::DelegateHooks;
use crate::diff::ListDiffable;
use crate::grid::{CellId, GridCell};
use crate::index_path::IndexPath;
use crate::section_map::SectionKey;

impl<O: ListDiffable + Clone + 'static> ListAdapter<O> {
    /// Whether the item at `index_path` may be selected. Both the delegate
    /// hook and the controller must agree.
    pub fn should_select_item(&self, index_path: IndexPath) -> bool {
        let _scope = self.enter();
        let delegate_allows = self
            .hooks()
            .is_none_or(|hooks| hooks.should_select(index_path));

        let Some(controller) = self.controller_at(index_path.section) else {
            return false;
        };
        let controller_allows =
            borrow_controller(&controller).is_some_and(|c| c.should_select_item(index_path.item));
        delegate_allows && controller_allows
    }

    pub fn did_select_item(&self, index_path: IndexPath) {
        let _scope = self.enter();
        if let Some(hooks) = self.hooks() {
            hooks.did_select(index_path);
        }
        if let Some(controller) = self.controller_at(index_path.section)
            && let Some(mut controller) = borrow_controller_mut(&controller)
        {
            controller.did_select_item(index_path.item);
        }
    }

    pub fn did_deselect_item(&self, index_path: IndexPath) {
        let _scope = self.enter();
        if let Some(hooks) = self.hooks() {
            hooks.did_deselect(index_path);
        }
        if let Some(controller) = self.controller_at(index_path.section)
            && let Some(mut controller) = borrow_controller_mut(&controller)
        {
            controller.did_deselect_item(index_path.item);
        }
    }

    pub fn did_highlight_item(&self, index_path: IndexPath) {
        let _scope = self.enter();
        if let Some(hooks) = self.hooks() {
            hooks.did_highlight(index_path);
        }
        if let Some(controller) = self.controller_at(index_path.section)
            && let Some(mut controller) = borrow_controller_mut(&controller)
        {
            controller.did_highlight_item(index_path.item);
        }
    }

    pub fn did_unhighlight_item(&self, index_path: IndexPath) {
        let _scope = self.enter();
        if let Some(hooks) = self.hooks() {
            hooks.did_unhighlight(index_path);
        }
        if let Some(controller) = self.controller_at(index_path.section)
            && let Some(mut controller) = borrow_controller_mut(&controller)
        {
            controller.did_unhighlight_item(index_path.item);
        }
    }

    /// The grid is about to display `cell` at `index_path`.
    ///
    /// The owning controller is found through the view association table.
    /// When the association is missing, which happens when the host reattaches
    /// a view without vending it again, the controller is re-derived from
    /// `index_path.section` and the association is restored.
    pub fn will_display_cell(&self, cell: &GridCell, index_path: IndexPath) {
        let _scope = self.enter();
        if let Some(hooks) = self.hooks() {
            hooks.will_display_cell(cell, index_path);
        }

        let Some((key, controller)) = self.controller_for_display(cell.id(), index_path) else {
            return;
        };

        if let Some(perf) = &self.perf {
            perf.will_display_cell(index_path);
        }
        let start = Instant::now();

        let first_visible = self.display.borrow_mut().will_display(key, cell.id());
        let Some(mut section) = borrow_controller_mut(&controller) else {
            return;
        };
        if first_visible {
            section.will_display_section();
        }
        section.will_display_cell(cell, index_path.item);
        let controller_name = section.type_name();
        drop(section);

        if let Some(perf) = &self.perf {
            perf.did_display_cell(controller_name, index_path.item, start.elapsed());
        }
    }

    /// The grid stopped displaying `cell`.
    ///
    /// The association is removed. A view with no association was never
    /// vended by this adapter or belonged to an unmapped controller, so
    /// there is nobody to notify.
    pub fn did_end_displaying_cell(&self, cell: &GridCell, index_path: IndexPath) {
        let _scope = self.enter();
        if let Some(hooks) = self.hooks() {
            hooks.did_end_displaying_cell(cell, index_path);
        }

        let Some(key) = self.associations.borrow_mut().dissociate(cell.id()) else {
            sections_debug!(
                target: targets::DISPLAY,
                cell = %cell.id(),
                index_path = %index_path,
                "end of display for a view with no controller"
            );
            return;
        };
        let controller = self.sections.borrow().controller_for_key(key).cloned();
        let Some(controller) = controller else {
            return;
        };

        if let Some(perf) = &self.perf {
            perf.will_end_display_cell(index_path);
        }
        let start = Instant::now();

        let last_visible = self.display.borrow_mut().did_end_display(key, cell.id());
        let Some(mut section) = borrow_controller_mut(&controller) else {
            return;
        };
        section.did_end_displaying_cell(cell, index_path.item);
        if last_visible {
            section.did_end_displaying_section();
        }
        let controller_name = section.type_name();
        drop(section);

        if let Some(perf) = &self.perf {
            perf.did_end_display_cell(controller_name, index_path.item, start.elapsed());
        }
    }

    fn hooks(&self) -> Option<Rc<DelegateHooks>> {
        self.hooks.borrow().clone()
    }

    /// Looks up the controller of a displayed view, repairing a missing
    /// association from the index path.
    fn controller_for_display(
        &self,
        cell: CellId,
        index_path: IndexPath,
    ) -> Option<(SectionKey, SharedController<O>)> {
        let associated = self.associations.borrow().controller_for(cell);
        if let Some(key) = associated {
            let controller = self.sections.borrow().controller_for_key(key).cloned();
            if let Some(controller) = controller {
                return Some((key, controller));
            }
        }

        let (key, controller) = self.resolve_section(index_path.section)?;
        sections_debug!(
            target: targets::DISPLAY,
            cell = %cell,
            index_path = %index_path,
            "re-associating view that was displayed without being vended"
        );
        self.associations.borrow_mut().associate(cell, key);
        Some((key, controller))
    }
}
