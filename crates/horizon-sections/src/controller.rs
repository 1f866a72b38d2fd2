//! Section controllers: the per-section owners of items and views.
//!
//! A section controller is created for one backing object and owns that
//! section's items. It reports how many items it has, vends a view for each
//! item, reports layout metrics, and decides whether its items may be
//! reordered. The adapter never reaches into a controller's items; it only
//! forwards controller-local indices.
//!
//! # Implementing a Controller
//!
//! ```
//! use horizon_sections::{CellContext, GridCell, SectionController};
//! use horizon_sections_core::Size;
//!
//! struct LabelsController {
//!     labels: Vec<String>,
//! }
//!
//! impl SectionController<String> for LabelsController {
//!     fn number_of_items(&self) -> usize {
//!         self.labels.len()
//!     }
//!
//!     fn cell_for_item(&mut self, index: usize, ctx: &mut CellContext<'_>) -> Option<GridCell> {
//!         Some(ctx.dequeue_reusable_cell("LabelCell", index))
//!     }
//!
//!     fn size_for_item(&self, _index: usize) -> Size {
//!         Size::new(320.0, 44.0)
//!     }
//!
//!     fn did_update_to_object(&mut self, object: &String) {
//!         self.labels = object.split(',').map(str::to_string).collect();
//!     }
//! }
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use horizon_sections_core::{EdgeInsets, Size};

use crate::grid::{CellId, GridCell, GridView, SupplementaryKind};
use crate::index_path::IndexPath;
use crate::layout::TransitionDelegate;

/// A section controller shared between the adapter and its owner.
///
/// The adapter holds one reference per mapped section; callers may keep
/// clones to inspect or drive the controller directly.
pub type SharedController<O> = Rc<RefCell<dyn SectionController<O>>>;

/// Wraps a controller for hand-off to the adapter.
pub fn shared<O, C>(controller: C) -> SharedController<O>
where
    C: SectionController<O> + 'static,
{
    Rc::new(RefCell::new(controller))
}

/// The capability every section controller provides.
///
/// Only the item count, the view vending, and the item size are required.
/// Everything else has a neutral default.
pub trait SectionController<O> {
    /// Number of items in this section.
    fn number_of_items(&self) -> usize;

    /// Vends the view for the item at `index`.
    ///
    /// Views must be dequeued through `ctx`. Returning `None` is a fatal
    /// integration error.
    fn cell_for_item(&mut self, index: usize, ctx: &mut CellContext<'_>) -> Option<GridCell>;

    /// Size of the item at `index`. Must not contain NaN.
    fn size_for_item(&self, index: usize) -> Size;

    /// Called whenever the backing object is (re)assigned during an update.
    fn did_update_to_object(&mut self, _object: &O) {}

    /// Insets around the section's content.
    fn inset(&self) -> EdgeInsets {
        EdgeInsets::ZERO
    }

    /// Spacing between lines of items.
    fn minimum_line_spacing(&self) -> f64 {
        0.0
    }

    /// Spacing between items on the same line.
    fn minimum_interitem_spacing(&self) -> f64 {
        0.0
    }

    /// Whether the item at `index` may start an interactive move.
    fn can_move_item(&self, _index: usize) -> bool {
        false
    }

    /// Whether moving the item at `from` to `to` is legal.
    fn can_move_item_to(&self, from: usize, _to: usize) -> bool {
        self.can_move_item(from)
    }

    /// Commits a legal move of the item at `from` to `to`.
    fn move_item(&mut self, _from: usize, _to: usize) {}

    /// Whether the item at `index` may be selected.
    fn should_select_item(&self, _index: usize) -> bool {
        true
    }

    fn did_select_item(&mut self, _index: usize) {}

    fn did_deselect_item(&mut self, _index: usize) {}

    fn did_highlight_item(&mut self, _index: usize) {}

    fn did_unhighlight_item(&mut self, _index: usize) {}

    /// A cell of this section is about to be displayed.
    fn will_display_cell(&mut self, _cell: &GridCell, _index: usize) {}

    /// A cell of this section left the screen.
    fn did_end_displaying_cell(&mut self, _cell: &GridCell, _index: usize) {}

    /// The first visible cell of this section is about to be displayed.
    fn will_display_section(&mut self) {}

    /// The last visible cell of this section left the screen.
    fn did_end_displaying_section(&mut self) {}

    /// Optional provider of header and footer views.
    fn supplementary_view_source(&mut self) -> Option<&mut dyn SupplementaryViewSource> {
        None
    }

    /// Optional customization of layout attributes during animations.
    fn transition_delegate(&self) -> Option<&dyn TransitionDelegate> {
        None
    }

    /// Name used in diagnostics.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Header and footer provider for a section.
pub trait SupplementaryViewSource {
    /// The kinds this source provides.
    fn supported_kinds(&self) -> &[SupplementaryKind];

    /// Vends the supplementary view of `kind`. Views must be dequeued
    /// through `ctx`.
    fn view_for_supplementary(
        &mut self,
        kind: SupplementaryKind,
        index: usize,
        ctx: &mut CellContext<'_>,
    ) -> Option<GridCell>;

    /// Size of the supplementary view of `kind`.
    fn size_for_supplementary(&self, kind: SupplementaryKind, index: usize) -> Size;
}

/// Context handed to a controller while it vends a view.
///
/// The context exists only for the duration of one vend call. It tracks which
/// views were dequeued so the adapter can verify that the returned view came
/// from the grid's reuse queue.
pub struct CellContext<'a> {
    grid: &'a mut dyn GridView,
    section: usize,
    dequeued: Vec<CellId>,
}

impl<'a> CellContext<'a> {
    pub(crate) fn new(grid: &'a mut dyn GridView, section: usize) -> Self {
        Self {
            grid,
            section,
            dequeued: Vec::new(),
        }
    }

    /// The section being vended.
    pub fn section(&self) -> usize {
        self.section
    }

    /// Dequeues a reusable cell for the controller-local item `index`.
    pub fn dequeue_reusable_cell(&mut self, reuse_identifier: &str, index: usize) -> GridCell {
        let cell = self
            .grid
            .dequeue_reusable_cell(reuse_identifier, IndexPath::new(self.section, index));
        self.dequeued.push(cell.id());
        cell
    }

    /// Dequeues a reusable supplementary view for the controller-local `index`.
    pub fn dequeue_supplementary_view(
        &mut self,
        kind: SupplementaryKind,
        reuse_identifier: &str,
        index: usize,
    ) -> GridCell {
        let cell = self.grid.dequeue_supplementary_view(
            kind,
            reuse_identifier,
            IndexPath::new(self.section, index),
        );
        self.dequeued.push(cell.id());
        cell
    }

    pub(crate) fn was_dequeued(&self, id: CellId) -> bool {
        self.dequeued.contains(&id)
    }
}

impl std::fmt::Debug for CellContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CellContext")
            .field("section", &self.section)
            .field("dequeued", &self.dequeued)
            .finish()
    }
}
