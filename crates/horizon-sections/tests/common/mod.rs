//! Shared fixtures for adapter integration tests: a recording grid, a
//! configurable section controller, and a data source backed by shared state.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use horizon_sections::{
    shared, AdapterConfig, AdapterDataSource, AdapterResult, CellContext, CellId, CrashDiagnostics,
    EdgeInsets, GridCell, GridView, IndexPath, LayoutAttributes, ListAdapter, SectionController,
    SharedController, Size, SupplementaryKind, SupplementaryViewSource, TransitionDelegate,
    UpdateBatch,
};

/// Everything the recording grid was asked to do.
#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent {
    Dequeue {
        reuse_identifier: String,
        index_path: IndexPath,
    },
    DequeueSupplementary {
        kind: SupplementaryKind,
        index_path: IndexPath,
    },
    ReloadData,
    Batch(UpdateBatch),
    ReloadSections(Vec<usize>),
    MoveItem {
        from: IndexPath,
        to: IndexPath,
    },
    MoveSection {
        from: usize,
        to: usize,
    },
}

/// A grid that hands out fresh view ids and records every call.
#[derive(Debug, Default)]
pub struct RecordingGrid {
    next_id: u64,
    pub events: Vec<GridEvent>,
}

impl RecordingGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take_events(&mut self) -> Vec<GridEvent> {
        std::mem::take(&mut self.events)
    }

    fn next_cell(&mut self, reuse_identifier: &str) -> GridCell {
        self.next_id += 1;
        GridCell::new(CellId::new(self.next_id), reuse_identifier)
    }
}

impl GridView for RecordingGrid {
    fn dequeue_reusable_cell(&mut self, reuse_identifier: &str, index_path: IndexPath) -> GridCell {
        self.events.push(GridEvent::Dequeue {
            reuse_identifier: reuse_identifier.to_string(),
            index_path,
        });
        self.next_cell(reuse_identifier)
    }

    fn dequeue_supplementary_view(
        &mut self,
        kind: SupplementaryKind,
        reuse_identifier: &str,
        index_path: IndexPath,
    ) -> GridCell {
        self.events
            .push(GridEvent::DequeueSupplementary { kind, index_path });
        self.next_cell(reuse_identifier)
    }

    fn reload_data(&mut self) {
        self.events.push(GridEvent::ReloadData);
    }

    fn apply_batch(&mut self, batch: &UpdateBatch) {
        self.events.push(GridEvent::Batch(batch.clone()));
    }

    fn reload_sections(&mut self, sections: &[usize]) {
        self.events.push(GridEvent::ReloadSections(sections.to_vec()));
    }

    fn move_item(&mut self, from: IndexPath, to: IndexPath) {
        self.events.push(GridEvent::MoveItem { from, to });
    }

    fn move_section(&mut self, from: usize, to: usize) {
        self.events.push(GridEvent::MoveSection { from, to });
    }

    fn describe(&self) -> String {
        "recording grid".to_string()
    }
}

/// Knobs and observations for one [`ItemsController`].
pub struct ControllerState {
    pub items: Vec<String>,
    pub events: Vec<String>,
    pub movable: bool,
    pub legal_moves: bool,
    pub selectable: bool,
    pub return_none: bool,
    pub skip_dequeue: bool,
    pub header: bool,
    pub fade_in: bool,
    pub size: Size,
    pub inset: EdgeInsets,
    pub line_spacing: f64,
    /// When set, the controller asks the adapter for another cell while
    /// vending one.
    pub reenter_vend: Option<Weak<ListAdapter<String>>>,
    /// When set, the controller asks the adapter for a cell while it is
    /// being handed a new object.
    pub vend_on_update: Option<Weak<ListAdapter<String>>>,
    /// Results of the cell requests made through the two knobs above.
    pub nested: Vec<AdapterResult<GridCell>>,
}

impl Default for ControllerState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            events: Vec::new(),
            movable: false,
            legal_moves: true,
            selectable: true,
            return_none: false,
            skip_dequeue: false,
            header: false,
            fade_in: false,
            size: Size::new(100.0, 44.0),
            inset: EdgeInsets::ZERO,
            line_spacing: 0.0,
            reenter_vend: None,
            vend_on_update: None,
            nested: Vec::new(),
        }
    }
}

pub type StateHandle = Rc<RefCell<ControllerState>>;

/// A section controller whose behavior is driven by a shared state handle.
pub struct ItemsController {
    pub state: StateHandle,
}

impl ItemsController {
    fn log(&self, event: String) {
        self.state.borrow_mut().events.push(event);
    }
}

impl SectionController<String> for ItemsController {
    fn number_of_items(&self) -> usize {
        self.state.borrow().items.len()
    }

    fn cell_for_item(&mut self, index: usize, ctx: &mut CellContext<'_>) -> Option<GridCell> {
        self.log(format!("cell:{index}"));

        let reenter = self.state.borrow().reenter_vend.clone();
        if let Some(adapter) = reenter.and_then(|weak| weak.upgrade()) {
            let mut other = RecordingGrid::new();
            let nested = adapter.cell_for_item(&mut other, IndexPath::new(ctx.section(), index));
            self.state.borrow_mut().nested.push(nested);
        }

        let state = self.state.borrow();
        if state.return_none {
            None
        } else if state.skip_dequeue {
            Some(GridCell::new(CellId::new(9_999), "ItemCell"))
        } else {
            drop(state);
            Some(ctx.dequeue_reusable_cell("ItemCell", index))
        }
    }

    fn size_for_item(&self, _index: usize) -> Size {
        self.state.borrow().size
    }

    fn did_update_to_object(&mut self, object: &String) {
        self.log(format!("update:{object}"));

        let vend = self.state.borrow().vend_on_update.clone();
        if let Some(adapter) = vend.and_then(|weak| weak.upgrade()) {
            let nested = adapter.cell_for_item(&mut RecordingGrid::new(), IndexPath::new(0, 0));
            self.state.borrow_mut().nested.push(nested);
        }
    }

    fn inset(&self) -> EdgeInsets {
        self.state.borrow().inset
    }

    fn minimum_line_spacing(&self) -> f64 {
        self.state.borrow().line_spacing
    }

    fn can_move_item(&self, _index: usize) -> bool {
        self.state.borrow().movable
    }

    fn can_move_item_to(&self, from: usize, _to: usize) -> bool {
        self.can_move_item(from) && self.state.borrow().legal_moves
    }

    fn move_item(&mut self, from: usize, to: usize) {
        let mut state = self.state.borrow_mut();
        let item = state.items.remove(from);
        state.items.insert(to, item);
        state.events.push(format!("move:{from}->{to}"));
    }

    fn should_select_item(&self, _index: usize) -> bool {
        self.state.borrow().selectable
    }

    fn did_select_item(&mut self, index: usize) {
        self.log(format!("select:{index}"));
    }

    fn did_deselect_item(&mut self, index: usize) {
        self.log(format!("deselect:{index}"));
    }

    fn did_highlight_item(&mut self, index: usize) {
        self.log(format!("highlight:{index}"));
    }

    fn did_unhighlight_item(&mut self, index: usize) {
        self.log(format!("unhighlight:{index}"));
    }

    fn will_display_cell(&mut self, _cell: &GridCell, index: usize) {
        self.log(format!("display:{index}"));
    }

    fn did_end_displaying_cell(&mut self, _cell: &GridCell, index: usize) {
        self.log(format!("end:{index}"));
    }

    fn will_display_section(&mut self) {
        self.log("section-visible".to_string());
    }

    fn did_end_displaying_section(&mut self) {
        self.log("section-hidden".to_string());
    }

    fn supplementary_view_source(&mut self) -> Option<&mut dyn SupplementaryViewSource> {
        if self.state.borrow().header {
            Some(self)
        } else {
            None
        }
    }

    fn transition_delegate(&self) -> Option<&dyn TransitionDelegate> {
        if self.state.borrow().fade_in {
            Some(self)
        } else {
            None
        }
    }
}

impl SupplementaryViewSource for ItemsController {
    fn supported_kinds(&self) -> &[SupplementaryKind] {
        &[SupplementaryKind::Header]
    }

    fn view_for_supplementary(
        &mut self,
        kind: SupplementaryKind,
        index: usize,
        ctx: &mut CellContext<'_>,
    ) -> Option<GridCell> {
        Some(ctx.dequeue_supplementary_view(kind, "Header", index))
    }

    fn size_for_supplementary(&self, _kind: SupplementaryKind, _index: usize) -> Size {
        Size::new(320.0, 30.0)
    }
}

impl TransitionDelegate for ItemsController {
    fn initial_attributes_for_inserted_item(
        &self,
        mut attributes: LayoutAttributes,
        _index: usize,
    ) -> LayoutAttributes {
        attributes.alpha = 0.0;
        attributes
    }
}

/// Shared state behind a [`TestDataSource`].
#[derive(Default)]
pub struct Fixture {
    pub objects: Rc<RefCell<Vec<String>>>,
    pub items: Rc<RefCell<HashMap<String, Vec<String>>>>,
    pub states: Rc<RefCell<HashMap<String, StateHandle>>>,
    pub created: Rc<RefCell<Vec<String>>>,
    pub moved: Rc<RefCell<Vec<(String, usize, usize)>>>,
    /// When set, the data source queries the adapter while creating a
    /// controller, which happens inside an object update.
    pub reenter_update: Rc<RefCell<Option<Weak<ListAdapter<String>>>>>,
    /// Applied to every newly created controller state.
    pub movable: Rc<RefCell<bool>>,
}

impl Fixture {
    /// Creates the shared state and a data source reading from it.
    pub fn new(sections: &[(&str, &[&str])]) -> (Self, TestDataSource) {
        let fixture = Self::default();
        fixture.set_sections(sections);
        let source = TestDataSource {
            objects: fixture.objects.clone(),
            items: fixture.items.clone(),
            states: fixture.states.clone(),
            created: fixture.created.clone(),
            moved: fixture.moved.clone(),
            reenter_update: fixture.reenter_update.clone(),
            movable: fixture.movable.clone(),
        };
        (fixture, source)
    }

    pub fn set_sections(&self, sections: &[(&str, &[&str])]) {
        let mut items = self.items.borrow_mut();
        for (object, section_items) in sections {
            items.insert(
                object.to_string(),
                section_items.iter().map(|item| item.to_string()).collect(),
            );
        }
        *self.objects.borrow_mut() = sections.iter().map(|(object, _)| object.to_string()).collect();
    }

    pub fn set_objects(&self, objects: &[&str]) {
        *self.objects.borrow_mut() = objects.iter().map(|object| object.to_string()).collect();
    }

    /// State of the most recently created controller for `object`.
    pub fn state(&self, object: &str) -> StateHandle {
        self.states
            .borrow()
            .get(object)
            .cloned()
            .unwrap_or_else(|| panic!("no controller was created for {object}"))
    }

    pub fn items(&self, object: &str) -> Vec<String> {
        self.state(object).borrow().items.clone()
    }

    pub fn events(&self, object: &str) -> Vec<String> {
        self.state(object).borrow().events.clone()
    }
}

/// A data source over a [`Fixture`].
pub struct TestDataSource {
    objects: Rc<RefCell<Vec<String>>>,
    items: Rc<RefCell<HashMap<String, Vec<String>>>>,
    states: Rc<RefCell<HashMap<String, StateHandle>>>,
    created: Rc<RefCell<Vec<String>>>,
    moved: Rc<RefCell<Vec<(String, usize, usize)>>>,
    reenter_update: Rc<RefCell<Option<Weak<ListAdapter<String>>>>>,
    movable: Rc<RefCell<bool>>,
}

impl AdapterDataSource<String> for TestDataSource {
    fn objects(&self) -> Vec<String> {
        self.objects.borrow().clone()
    }

    fn section_controller_for(&mut self, object: &String) -> SharedController<String> {
        let adapter = self.reenter_update.borrow().clone();
        if let Some(adapter) = adapter.and_then(|weak| weak.upgrade()) {
            let _ = adapter.number_of_sections();
        }

        let state = Rc::new(RefCell::new(ControllerState {
            items: self.items.borrow().get(object).cloned().unwrap_or_default(),
            movable: *self.movable.borrow(),
            ..ControllerState::default()
        }));
        self.states.borrow_mut().insert(object.clone(), state.clone());
        self.created.borrow_mut().push(object.clone());
        shared(ItemsController { state })
    }

    fn move_object(&mut self, object: &String, from: usize, to: usize) {
        self.moved.borrow_mut().push((object.clone(), from, to));
        let mut objects = self.objects.borrow_mut();
        let moved = objects.remove(from);
        objects.insert(to, moved);
    }
}

/// Crash diagnostics that remember what they were told.
#[derive(Default, Clone)]
pub struct RecordingDiagnostics {
    pub records: Rc<RefCell<Vec<(String, &'static str)>>>,
}

impl CrashDiagnostics for RecordingDiagnostics {
    fn record_nil_cell(&self, grid_description: &str, controller_type: &'static str) {
        self.records
            .borrow_mut()
            .push((grid_description.to_string(), controller_type));
    }
}

/// Collects every emission of a signal.
pub fn record<T: Clone + 'static>(signal: &horizon_sections::Signal<T>) -> Rc<RefCell<Vec<T>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    signal.connect(move |value: &T| sink.borrow_mut().push(value.clone()));
    seen
}

/// Builds an adapter over `sections` and performs the first update.
pub fn loaded_adapter(
    sections: &[(&str, &[&str])],
) -> (Fixture, Rc<ListAdapter<String>>, RecordingGrid) {
    loaded_adapter_with(sections, AdapterConfig::default())
}

/// [`loaded_adapter`] with a custom configuration.
pub fn loaded_adapter_with(
    sections: &[(&str, &[&str])],
    config: AdapterConfig,
) -> (Fixture, Rc<ListAdapter<String>>, RecordingGrid) {
    let (fixture, source) = Fixture::new(sections);
    let adapter = Rc::new(ListAdapter::new(source).with_config(config));
    let mut grid = RecordingGrid::new();
    adapter.perform_updates(&mut grid);
    grid.take_events();
    (fixture, adapter, grid)
}

/// The shared handle of the controller at `section`.
pub fn controller_at(adapter: &ListAdapter<String>, section: usize) -> SharedController<String> {
    adapter
        .controller_for_section(section)
        .unwrap_or_else(|| panic!("no controller at section {section}"))
}

/// Installs a test subscriber so failing tests show adapter logs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("horizon_sections=debug")
        .with_test_writer()
        .try_init();
}
