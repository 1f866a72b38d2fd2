//! Horizon Sections - section-controller adapter for grid and list views.
//!
//! A [`ListAdapter`] sits between a host grid view and a list of
//! heterogeneous backing objects. Each object becomes one section, owned by a
//! [`SectionController`] that knows how many items the section has, how to
//! vend a view for each item, and how to size it. The adapter:
//!
//! - Keeps the ordered section map and translates grid index paths into
//!   controller-local item indices.
//! - Diffs object snapshots and applies the resulting batch to the grid.
//! - Remembers which controller vended each displayed view so later display
//!   callbacks can be routed.
//! - Resolves interactive reordering gestures, reverting the ones it cannot
//!   honor.
//!
//! This crate re-exports everything from `horizon-sections-core`.
//!
//! # Example
//!
//! ```
//! use horizon_sections::{
//!     shared, AdapterDataSource, CellContext, GridCell, ListAdapter, SectionController,
//!     SharedController, Size,
//! };
//!
//! struct Row;
//!
//! impl SectionController<String> for Row {
//!     fn number_of_items(&self) -> usize {
//!         1
//!     }
//!
//!     fn cell_for_item(&mut self, index: usize, ctx: &mut CellContext<'_>) -> Option<GridCell> {
//!         Some(ctx.dequeue_reusable_cell("Row", index))
//!     }
//!
//!     fn size_for_item(&self, _index: usize) -> Size {
//!         Size::new(320.0, 44.0)
//!     }
//! }
//!
//! struct Titles(Vec<String>);
//!
//! impl AdapterDataSource<String> for Titles {
//!     fn objects(&self) -> Vec<String> {
//!         self.0.clone()
//!     }
//!
//!     fn section_controller_for(&mut self, _object: &String) -> SharedController<String> {
//!         shared(Row)
//!     }
//! }
//!
//! let adapter = ListAdapter::new(Titles(vec!["Inbox".into(), "Sent".into()]));
//! assert_eq!(adapter.number_of_sections(), 0);
//! ```

pub use horizon_sections_core::*;

mod adapter;
pub mod association;
mod config;
pub mod controller;
mod data_source;
pub mod delegate;
pub mod diagnostics;
pub mod diff;
pub mod display;
mod error;
pub mod grid;
mod index_path;
pub mod interactive_move;
pub mod layout;
pub mod perf;
pub mod section_map;

pub use adapter::{AdapterSignals, ListAdapter, UpdateKind};
pub use association::ViewAssociationTable;
pub use config::AdapterConfig;
pub use controller::{
    shared, CellContext, SectionController, SharedController, SupplementaryViewSource,
};
pub use data_source::AdapterDataSource;
pub use delegate::{DelegateHooks, HookKind};
pub use diagnostics::{CrashDiagnostics, LogDiagnostics};
pub use diff::{IndexDiffer, ListDiffable, UpdateBatch, Updater};
pub use display::DisplayTracker;
pub use error::{AdapterError, AdapterResult};
pub use grid::{CellId, GridCell, GridView, SupplementaryKind};
pub use index_path::IndexPath;
pub use interactive_move::{
    InteractiveMoveContext, InteractiveMoveCoordinator, MoveOutcome, MoveResolution, MoveState,
    RevertReason, SectionCounts,
};
pub use layout::{ElementCategory, LayoutAttributes, TransitionDelegate};
pub use perf::PerformanceDelegate;
pub use section_map::{SectionKey, SectionMap};
