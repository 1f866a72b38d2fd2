//! The host grid view boundary.
//!
//! The host grid owns every view it displays; the adapter only ever sees
//! [`GridCell`] handles. The [`GridView`] trait is the small set of
//! operations the adapter performs on the host: dequeuing reusable views on
//! behalf of section controllers, applying update batches, and mirroring or
//! reverting interactive moves. The reverse direction, the host calling into
//! the adapter for counts, cells, sizes, and lifecycle events, is the
//! [`ListAdapter`](crate::ListAdapter) façade itself.

use std::fmt;

use crate::diff::UpdateBatch;
use crate::index_path::IndexPath;

/// Opaque identity of a view instance owned by the host grid.
///
/// Two handles with the same `CellId` refer to the same live view. The host
/// is free to reuse an id once the view has ended display and is dequeued
/// again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(u64);

impl CellId {
    /// Wraps a host-assigned view identity.
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The host-assigned value.
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cell#{}", self.0)
    }
}

/// A handle to a cell or supplementary view vended through the grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GridCell {
    id: CellId,
    reuse_identifier: String,
}

impl GridCell {
    /// Creates a handle for the view `id` dequeued under `reuse_identifier`.
    pub fn new(id: CellId, reuse_identifier: impl Into<String>) -> Self {
        Self {
            id,
            reuse_identifier: reuse_identifier.into(),
        }
    }

    /// The view identity.
    #[inline]
    pub fn id(&self) -> CellId {
        self.id
    }

    /// The reuse queue this view belongs to. Empty means the view did not
    /// come from a reuse queue.
    #[inline]
    pub fn reuse_identifier(&self) -> &str {
        &self.reuse_identifier
    }
}

/// Kinds of supplementary views a section can provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupplementaryKind {
    /// A view laid out before the section's items.
    Header,
    /// A view laid out after the section's items.
    Footer,
}

impl fmt::Display for SupplementaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Header => write!(f, "header"),
            Self::Footer => write!(f, "footer"),
        }
    }
}

/// Operations the adapter performs on the host grid.
pub trait GridView {
    /// Dequeues (or creates) a reusable cell for `index_path`.
    fn dequeue_reusable_cell(&mut self, reuse_identifier: &str, index_path: IndexPath) -> GridCell;

    /// Dequeues (or creates) a reusable supplementary view.
    fn dequeue_supplementary_view(
        &mut self,
        kind: SupplementaryKind,
        reuse_identifier: &str,
        index_path: IndexPath,
    ) -> GridCell;

    /// Discards all displayed content and queries the adapter from scratch.
    fn reload_data(&mut self);

    /// Animates a batch of section-level changes.
    fn apply_batch(&mut self, batch: &UpdateBatch);

    /// Reloads the given sections in place.
    fn reload_sections(&mut self, sections: &[usize]);

    /// Moves a single item. Used to put an invalid interactive move back.
    fn move_item(&mut self, from: IndexPath, to: IndexPath);

    /// Mirrors a section reorder that the adapter already applied to its
    /// section map.
    fn move_section(&mut self, from: usize, to: usize);

    /// Human-readable description attached to crash diagnostics.
    fn describe(&self) -> String {
        "grid view".to_string()
    }
}

static_assertions::assert_impl_all!(CellId: Copy, Send, Sync, std::hash::Hash);
