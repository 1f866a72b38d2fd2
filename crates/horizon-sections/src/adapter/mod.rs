//! The list adapter: the surface a host grid calls into.
//!
//! [`ListAdapter`] owns the section map, the view association table, the
//! display tracker, and the interactive move coordinator. Every callback a
//! host grid makes (counts, cell vending, selection, display lifecycle,
//! sizing, layout customization, reordering) lands here and is routed to the
//! section controller that owns the addressed section.
//!
//! # Threading and Reentrancy
//!
//! The adapter lives on the thread that owns the host view hierarchy and is
//! neither `Send` nor `Sync`. All methods take `&self` so a controller or data
//! source holding a reference to the adapter can call back into it; two such
//! reentrant paths are contract violations and are reported through
//! [`contract_assert!`](horizon_sections_core::contract_assert):
//!
//! - Querying counts or vending cells while an object update is being applied.
//! - Requesting a cell while another cell is being dequeued.
//!
//! # Example
//!
//! ```ignore
//! use horizon_sections::{ListAdapter, AdapterConfig};
//!
//! let adapter = ListAdapter::new(MyDataSource::default())
//!     .with_config(AdapterConfig::new().reload_on_first_update(true));
//!
//! adapter.perform_updates(&mut grid);
//! let cell = adapter.cell_for_item(&mut grid, IndexPath::new(0, 0))?;
//! adapter.will_display_cell(&cell, IndexPath::new(0, 0));
//! ```

mod lifecycle;
mod metrics;
mod moves;
mod state;
mod updates;
mod vending;

use std::cell::{Cell, Ref, RefCell, RefMut};
use std::rc::Rc;

use horizon_sections_core::{contract_assert, AssertionModeScope, Signal, ThreadAffinity};

use crate::association::ViewAssociationTable;
use crate::config::AdapterConfig;
use crate::controller::{SectionController, SharedController};
use crate::data_source::AdapterDataSource;
use crate::delegate::DelegateHooks;
use crate::diagnostics::{CrashDiagnostics, LogDiagnostics};
use crate::diff::{IndexDiffer, ListDiffable, Updater};
use crate::display::DisplayTracker;
use crate::grid::CellId;
use crate::index_path::IndexPath;
use crate::interactive_move::InteractiveMoveCoordinator;
use crate::perf::PerformanceDelegate;
use crate::section_map::{SectionKey, SectionMap};

use state::AdapterState;

/// How the grid was brought up to date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateKind {
    /// Every section was rebuilt and the grid reloaded.
    Reload,
    /// A diff batch was applied.
    Batch,
    /// Individual sections were reloaded in place.
    ReloadObjects,
}

/// Notifications emitted by a [`ListAdapter`].
#[derive(Debug)]
pub struct AdapterSignals {
    /// Emitted after an update has been handed to the grid.
    pub updates_finished: Signal<UpdateKind>,
    /// Emitted after an interactive gesture reordered sections.
    /// Args: (from section, to section)
    pub section_moved: Signal<(usize, usize)>,
    /// Emitted after an interactive gesture was put back.
    /// Args: (source, destination) of the reverted gesture
    pub move_reverted: Signal<(IndexPath, IndexPath)>,
}

impl AdapterSignals {
    fn new() -> Self {
        Self {
            updates_finished: Signal::new(),
            section_moved: Signal::new(),
            move_reverted: Signal::new(),
        }
    }
}

/// Drives a sectioned grid from a list of backing objects.
pub struct ListAdapter<O: ListDiffable + Clone + 'static> {
    data_source: RefCell<Box<dyn AdapterDataSource<O>>>,
    updater: Box<dyn Updater<O>>,
    config: AdapterConfig,
    sections: RefCell<SectionMap<O>>,
    associations: RefCell<ViewAssociationTable>,
    display: RefCell<DisplayTracker>,
    moves: Cell<InteractiveMoveCoordinator>,
    state: AdapterState,
    hooks: RefCell<Option<Rc<DelegateHooks>>>,
    perf: Option<Box<dyn PerformanceDelegate>>,
    diagnostics: Box<dyn CrashDiagnostics>,
    signals: AdapterSignals,
    thread: ThreadAffinity,
}

impl<O: ListDiffable + Clone + 'static> ListAdapter<O> {
    /// Creates an adapter with no sections. Call
    /// [`perform_updates`](Self::perform_updates) to load the data source.
    pub fn new(data_source: impl AdapterDataSource<O> + 'static) -> Self {
        Self {
            data_source: RefCell::new(Box::new(data_source)),
            updater: Box::new(IndexDiffer),
            config: AdapterConfig::default(),
            sections: RefCell::new(SectionMap::new()),
            associations: RefCell::new(ViewAssociationTable::new()),
            display: RefCell::new(DisplayTracker::new()),
            moves: Cell::new(InteractiveMoveCoordinator::new()),
            state: AdapterState::default(),
            hooks: RefCell::new(None),
            perf: None,
            diagnostics: Box::new(LogDiagnostics),
            signals: AdapterSignals::new(),
            thread: ThreadAffinity::current(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: AdapterConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the diffing engine.
    pub fn with_updater(mut self, updater: impl Updater<O> + 'static) -> Self {
        self.updater = Box::new(updater);
        self
    }

    /// Replaces the crash diagnostics collaborator.
    pub fn with_diagnostics(mut self, diagnostics: impl CrashDiagnostics + 'static) -> Self {
        self.diagnostics = Box::new(diagnostics);
        self
    }

    /// Installs performance hooks.
    pub fn with_performance_delegate(mut self, perf: impl PerformanceDelegate + 'static) -> Self {
        self.perf = Some(Box::new(perf));
        self
    }

    /// Installs secondary delegate hooks.
    pub fn with_delegate_hooks(self, hooks: DelegateHooks) -> Self {
        self.set_delegate_hooks(Some(hooks));
        self
    }

    /// Replaces or removes the secondary delegate hooks.
    pub fn set_delegate_hooks(&self, hooks: Option<DelegateHooks>) {
        *self.hooks.borrow_mut() = hooks.map(Rc::new);
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    pub fn signals(&self) -> &AdapterSignals {
        &self.signals
    }

    /// Whether an object update is being applied.
    pub fn is_in_update(&self) -> bool {
        self.state.in_update()
    }

    /// Whether a section controller is vending a view.
    pub fn is_dequeuing_cell(&self) -> bool {
        self.state.is_dequeuing()
    }

    // =========================================================================
    // Counts
    // =========================================================================

    /// Number of sections, one per backing object.
    pub fn number_of_sections(&self) -> usize {
        let _scope = self.enter();
        contract_assert!(
            !self.state.in_update(),
            "number of sections queried during an object update"
        );

        match self.sections.try_borrow() {
            Ok(map) => map.len(),
            Err(_) => {
                contract_assert!(false, "section map queried while it is being rebuilt");
                0
            }
        }
    }

    /// Number of items in `section`, as reported live by its controller.
    pub fn number_of_items_in_section(&self, section: usize) -> usize {
        let _scope = self.enter();
        contract_assert!(
            !self.state.in_update(),
            "number of items in section {section} queried during an object update; \
             a section controller probably called back into the grid from did_update_to_object"
        );

        let Some(controller) = self.controller_at(section) else {
            return 0;
        };
        borrow_controller(&controller).map_or(0, |c| c.number_of_items())
    }

    // =========================================================================
    // Section map lookups
    // =========================================================================

    /// The controller for `section`.
    ///
    /// A missing controller for an in-range section means the section map is
    /// inconsistent, which is reported as a contract violation.
    pub fn controller_for_section(&self, section: usize) -> Option<SharedController<O>> {
        let _scope = self.enter();
        self.controller_at(section)
    }

    /// The backing object for `section`.
    pub fn object_for_section(&self, section: usize) -> Option<O> {
        self.sections.borrow().object(section).cloned()
    }

    /// All backing objects in section order.
    pub fn objects(&self) -> Vec<O> {
        self.sections.borrow().objects().to_vec()
    }

    pub fn section_for_controller(&self, controller: &SharedController<O>) -> Option<usize> {
        let map = self.sections.borrow();
        map.key_for_controller(controller)
            .and_then(|key| map.section_for_key(key))
    }

    pub fn section_for_object(&self, object: &O) -> Option<usize> {
        self.sections
            .borrow()
            .section_for_identifier(&object.diff_identifier())
    }

    pub fn controller_for_object(&self, object: &O) -> Option<SharedController<O>> {
        let map = self.sections.borrow();
        map.key_for_identifier(&object.diff_identifier())
            .and_then(|key| map.controller_for_key(key))
            .cloned()
    }

    pub fn object_for_controller(&self, controller: &SharedController<O>) -> Option<O> {
        let map = self.sections.borrow();
        map.key_for_controller(controller)
            .and_then(|key| map.section_for_key(key))
            .and_then(|section| map.object(section))
            .cloned()
    }

    /// The flattened index path of a controller's local `item`.
    pub fn index_path_for_item(
        &self,
        controller: &SharedController<O>,
        item: usize,
    ) -> Option<IndexPath> {
        self.section_for_controller(controller)
            .map(|section| IndexPath::new(section, item))
    }

    /// The controller that vended a currently displayed view.
    pub fn controller_for_cell(&self, cell: CellId) -> Option<SharedController<O>> {
        let key = self.associations.borrow().controller_for(cell)?;
        self.sections.borrow().controller_for_key(key).cloned()
    }

    /// Views vended by `controller` that have not ended display, in id order.
    pub fn visible_cells_for_controller(&self, controller: &SharedController<O>) -> Vec<CellId> {
        let key = self.sections.borrow().key_for_controller(controller);
        key.map(|key| self.associations.borrow().cells_for(key))
            .unwrap_or_default()
    }

    /// Controllers with at least one displayed cell, in section order.
    pub fn visible_controllers(&self) -> Vec<SharedController<O>> {
        let visible = self.display.borrow().visible_keys();
        let map = self.sections.borrow();
        let mut found: Vec<(usize, SharedController<O>)> = visible
            .into_iter()
            .filter_map(|key| {
                let section = map.section_for_key(key)?;
                map.controller_for_key(key)
                    .map(|controller| (section, controller.clone()))
            })
            .collect();
        found.sort_by_key(|(section, _)| *section);
        found.into_iter().map(|(_, controller)| controller).collect()
    }

    // =========================================================================
    // Internal resolution
    // =========================================================================

    /// Resolves `section` to its key and controller, reporting a missing
    /// controller as a contract violation.
    fn resolve_section(&self, section: usize) -> Option<(SectionKey, SharedController<O>)> {
        let map = match self.sections.try_borrow() {
            Ok(map) => map,
            Err(_) => {
                contract_assert!(false, "section {section} resolved while the section map is being rebuilt");
                return None;
            }
        };

        let found = map.key_for_section(section).and_then(|key| {
            map.controller_for_key(key)
                .map(|controller| (key, controller.clone()))
        });
        contract_assert!(
            found.is_some(),
            "no section controller for section {section} ({} sections); \
             check that backing objects have stable and unique diff identifiers",
            map.len()
        );
        found
    }

    /// Checks the calling thread and, when this adapter has its own
    /// assertion mode, installs it until the returned scope drops.
    fn enter(&self) -> Option<AssertionModeScope> {
        self.thread.debug_assert_same_thread();
        self.config.assertion_mode.map(AssertionModeScope::enter)
    }

    fn controller_at(&self, section: usize) -> Option<SharedController<O>> {
        self.resolve_section(section)
            .map(|(_, controller)| controller)
    }
}

impl<O: ListDiffable + Clone + 'static> std::fmt::Debug for ListAdapter<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListAdapter")
            .field("sections", &self.sections.try_borrow().map(|map| map.len()).ok())
            .field("associations", &self.associations.try_borrow().map(|table| table.len()).ok())
            .field("move_state", &self.moves.get().state())
            .field("in_update", &self.state.in_update())
            .field("dequeuing", &self.state.is_dequeuing())
            .finish()
    }
}

/// Borrows a controller for a query, reporting reentrance into a controller
/// that is already executing.
fn borrow_controller<O: 'static>(
    controller: &SharedController<O>,
) -> Option<Ref<'_, dyn SectionController<O> + 'static>> {
    match controller.try_borrow() {
        Ok(controller) => Some(controller),
        Err(_) => {
            contract_assert!(
                false,
                "section controller re-entered the adapter while it was already executing"
            );
            None
        }
    }
}

/// Mutable counterpart of [`borrow_controller`].
fn borrow_controller_mut<O: 'static>(
    controller: &SharedController<O>,
) -> Option<RefMut<'_, dyn SectionController<O> + 'static>> {
    match controller.try_borrow_mut() {
        Ok(controller) => Some(controller),
        Err(_) => {
            contract_assert!(
                false,
                "section controller re-entered the adapter while it was already executing"
            );
            None
        }
    }
}

static_assertions::assert_not_impl_any!(ListAdapter<String>: Send, Sync);
