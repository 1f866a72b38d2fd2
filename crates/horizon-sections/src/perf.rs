//! Performance hooks bracketing vend, display, and sizing calls.

use std::time::Duration;

use crate::index_path::IndexPath;

/// Receives timing callbacks from the adapter.
///
/// Every method defaults to a no-op; implement only what you measure. The
/// `controller` argument is the controller's [`type_name`](crate::SectionController::type_name).
pub trait PerformanceDelegate {
    fn will_dequeue_cell(&self, _path: IndexPath) {}

    fn did_dequeue_cell(&self, _controller: &'static str, _index: usize, _elapsed: Duration) {}

    fn will_display_cell(&self, _path: IndexPath) {}

    fn did_display_cell(&self, _controller: &'static str, _index: usize, _elapsed: Duration) {}

    fn will_end_display_cell(&self, _path: IndexPath) {}

    fn did_end_display_cell(&self, _controller: &'static str, _index: usize, _elapsed: Duration) {}

    fn will_query_size(&self, _path: IndexPath) {}

    fn did_query_size(&self, _controller: &'static str, _index: usize, _elapsed: Duration) {}
}
