//! Interactive reordering entry points.

use horizon_sections_core::logging::{span_names, targets};
use horizon_sections_core::{sections_debug, sections_info, sections_warn, PerfSpan};

use super::{borrow_controller, borrow_controller_mut, ListAdapter};
use crate::controller::SharedController;
use crate::diff::ListDiffable;
use crate::grid::GridView;
use crate::index_path::IndexPath;
use crate::interactive_move::{
    InteractiveMoveContext, MoveOutcome, MoveResolution, MoveState, RevertReason, SectionCounts,
};

impl<O: ListDiffable + Clone + 'static> ListAdapter<O> {
    /// Whether the item at `index_path` may start an interactive move.
    pub fn can_move_item(&self, index_path: IndexPath) -> bool {
        let _scope = self.enter();
        let Some(controller) = self.controller_at(index_path.section) else {
            return false;
        };
        borrow_controller(&controller).is_some_and(|c| c.can_move_item(index_path.item))
    }

    /// Starts tracking a drag from `source`. Returns `false` if the item
    /// cannot be moved.
    pub fn begin_interactive_move(&self, source: IndexPath) -> bool {
        if !self.can_move_item(source) {
            return false;
        }
        let mut moves = self.moves.get();
        moves.begin(source);
        self.moves.set(moves);
        sections_debug!(target: targets::MOVE, source = %source, "interactive move started");
        true
    }

    /// Updates the drag's current target.
    pub fn update_interactive_move(&self, target: IndexPath) {
        let _scope = self.enter();
        let mut moves = self.moves.get();
        moves.retarget(target);
        self.moves.set(moves);
    }

    /// Ends the tracked drag at `destination` and resolves it.
    ///
    /// Returns `None` when no drag is being tracked.
    pub fn end_interactive_move(
        &self,
        grid: &mut dyn GridView,
        destination: IndexPath,
    ) -> Option<MoveOutcome> {
        let _scope = self.enter();
        let Some(ctx) = self.moves.get().state().context() else {
            sections_debug!(target: targets::MOVE, "interactive move ended with no move in progress");
            return None;
        };
        Some(self.move_item(grid, ctx.source, destination))
    }

    /// Abandons the tracked drag without touching the model or the grid.
    pub fn cancel_interactive_move(&self) -> Option<InteractiveMoveContext> {
        let _scope = self.enter();
        let mut moves = self.moves.get();
        let ctx = moves.cancel();
        self.moves.set(moves);
        ctx
    }

    pub fn interactive_move_state(&self) -> MoveState {
        self.moves.get().state()
    }

    /// Resolves a move the grid has already committed visually.
    ///
    /// - Same section: the controller decides legality. A legal move is
    ///   committed to the controller only, since the grid already shows it.
    /// - Different sections with one item each: the whole section moves in
    ///   the section map, the data source is notified, and the grid mirrors
    ///   the section move.
    /// - Anything else is put back with a corrective grid move from
    ///   `destination` to `source`.
    pub fn move_item(
        &self,
        grid: &mut dyn GridView,
        source: IndexPath,
        destination: IndexPath,
    ) -> MoveOutcome {
        let _scope = self.enter();
        let _span = PerfSpan::new(span_names::INTERACTIVE_MOVE);

        let source_controller = self.controller_at(source.section);
        let destination_controller = if source.same_section(&destination) {
            source_controller.clone()
        } else {
            self.controller_at(destination.section)
        };

        let count = |controller: &Option<SharedController<O>>| {
            controller
                .as_ref()
                .and_then(borrow_controller)
                .map_or(0, |c| c.number_of_items())
        };
        let counts = SectionCounts {
            source: count(&source_controller),
            destination: count(&destination_controller),
        };

        let mut moves = self.moves.get();
        let resolution = moves.resolve(source, destination, counts, |from, to| {
            source_controller
                .as_ref()
                .and_then(borrow_controller)
                .is_some_and(|c| c.can_move_item_to(from, to))
        });
        self.moves.set(moves);

        let outcome = match resolution {
            MoveResolution::CommitItem { section, from, to } => {
                if let Some(controller) = &source_controller
                    && let Some(mut controller) = borrow_controller_mut(controller)
                {
                    controller.move_item(from, to);
                }
                sections_info!(target: targets::MOVE, section, from, to, "item moved");
                MoveOutcome::MovedItem { section, from, to }
            }
            MoveResolution::ReorderSections { from, to } => {
                match self.reorder_sections(grid, from, to) {
                    Some(outcome) => outcome,
                    None => self.revert(grid, source, destination, RevertReason::CrossSectionItemMove),
                }
            }
            MoveResolution::Revert(reason) => self.revert(grid, source, destination, reason),
        };

        let mut moves = self.moves.get();
        moves.finish();
        self.moves.set(moves);
        outcome
    }

    fn reorder_sections(&self, grid: &mut dyn GridView, from: usize, to: usize) -> Option<MoveOutcome> {
        let moved = self.sections.borrow_mut().move_section(from, to);
        if let Err(err) = moved {
            sections_warn!(target: targets::MOVE, %err, "section reorder rejected by section map");
            return None;
        }

        let object = self.sections.borrow().object(to).cloned();
        if let Some(object) = object {
            self.data_source.borrow_mut().move_object(&object, from, to);
        }
        grid.move_section(from, to);

        sections_info!(target: targets::MOVE, from, to, "section moved");
        self.signals.section_moved.emit((from, to));
        Some(MoveOutcome::MovedSection { from, to })
    }

    fn revert(
        &self,
        grid: &mut dyn GridView,
        source: IndexPath,
        destination: IndexPath,
        reason: RevertReason,
    ) -> MoveOutcome {
        grid.move_item(destination, source);
        self.signals.move_reverted.emit((source, destination));
        MoveOutcome::Reverted {
            source,
            destination,
            reason,
        }
    }
}
