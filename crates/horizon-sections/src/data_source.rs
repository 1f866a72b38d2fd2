//! The adapter's data source.

use crate::controller::SharedController;

/// Supplies backing objects and creates a section controller for each.
///
/// The adapter pulls [`objects`](Self::objects) on every update and asks for
/// a controller only for objects whose identifier it has not seen before.
/// Controllers for surviving identifiers are reused and receive
/// [`did_update_to_object`](crate::SectionController::did_update_to_object).
pub trait AdapterDataSource<O> {
    /// The current list of backing objects, one per section.
    fn objects(&self) -> Vec<O>;

    /// Creates the controller for a newly mapped object.
    fn section_controller_for(&mut self, object: &O) -> SharedController<O>;

    /// Notification that an interactive gesture moved the section backed by
    /// `object` from `from` to `to`. The data source should reorder its own
    /// list so the next update does not undo the move.
    fn move_object(&mut self, _object: &O, _from: usize, _to: usize) {}
}
