//! Secondary delegate hooks.
//!
//! A host that attaches the adapter to its grid can still observe the
//! callbacks the adapter intercepts. Each hook is an independently optional
//! closure; when present it is called with the same arguments the grid passed
//! to the adapter, before the adapter routes the call to a section controller.
//!
//! # Example
//!
//! ```
//! use horizon_sections::{DelegateHooks, HookKind};
//!
//! let hooks = DelegateHooks::new()
//!     .with_did_select(|path| println!("selected {path}"))
//!     .with_should_select(|path| path.item != 0);
//!
//! assert!(hooks.implements(HookKind::DidSelect));
//! assert!(!hooks.implements(HookKind::DidHighlight));
//! ```

use crate::grid::GridCell;
use crate::index_path::IndexPath;

type PathPredicate = Box<dyn Fn(IndexPath) -> bool>;
type PathHook = Box<dyn Fn(IndexPath)>;
type CellHook = Box<dyn Fn(&GridCell, IndexPath)>;

/// Identifies one optional hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookKind {
    ShouldSelect,
    DidSelect,
    DidDeselect,
    DidHighlight,
    DidUnhighlight,
    WillDisplayCell,
    DidEndDisplayingCell,
}

/// Optional callbacks forwarded alongside the adapter's own handling.
#[derive(Default)]
pub struct DelegateHooks {
    should_select: Option<PathPredicate>,
    did_select: Option<PathHook>,
    did_deselect: Option<PathHook>,
    did_highlight: Option<PathHook>,
    did_unhighlight: Option<PathHook>,
    will_display_cell: Option<CellHook>,
    did_end_displaying_cell: Option<CellHook>,
}

impl DelegateHooks {
    /// Creates an empty set of hooks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Vetoes selection. Combined with the controller's answer by logical AND.
    pub fn with_should_select(mut self, f: impl Fn(IndexPath) -> bool + 'static) -> Self {
        self.should_select = Some(Box::new(f));
        self
    }

    pub fn with_did_select(mut self, f: impl Fn(IndexPath) + 'static) -> Self {
        self.did_select = Some(Box::new(f));
        self
    }

    pub fn with_did_deselect(mut self, f: impl Fn(IndexPath) + 'static) -> Self {
        self.did_deselect = Some(Box::new(f));
        self
    }

    pub fn with_did_highlight(mut self, f: impl Fn(IndexPath) + 'static) -> Self {
        self.did_highlight = Some(Box::new(f));
        self
    }

    pub fn with_did_unhighlight(mut self, f: impl Fn(IndexPath) + 'static) -> Self {
        self.did_unhighlight = Some(Box::new(f));
        self
    }

    pub fn with_will_display_cell(mut self, f: impl Fn(&GridCell, IndexPath) + 'static) -> Self {
        self.will_display_cell = Some(Box::new(f));
        self
    }

    pub fn with_did_end_displaying_cell(
        mut self,
        f: impl Fn(&GridCell, IndexPath) + 'static,
    ) -> Self {
        self.did_end_displaying_cell = Some(Box::new(f));
        self
    }

    /// Returns `true` if the hook for `kind` is present.
    pub fn implements(&self, kind: HookKind) -> bool {
        match kind {
            HookKind::ShouldSelect => self.should_select.is_some(),
            HookKind::DidSelect => self.did_select.is_some(),
            HookKind::DidDeselect => self.did_deselect.is_some(),
            HookKind::DidHighlight => self.did_highlight.is_some(),
            HookKind::DidUnhighlight => self.did_unhighlight.is_some(),
            HookKind::WillDisplayCell => self.will_display_cell.is_some(),
            HookKind::DidEndDisplayingCell => self.did_end_displaying_cell.is_some(),
        }
    }

    /// The delegate's selection answer, or `true` if absent.
    pub(crate) fn should_select(&self, path: IndexPath) -> bool {
        self.should_select.as_ref().is_none_or(|f| f(path))
    }

    pub(crate) fn did_select(&self, path: IndexPath) {
        if let Some(f) = &self.did_select {
            f(path);
        }
    }

    pub(crate) fn did_deselect(&self, path: IndexPath) {
        if let Some(f) = &self.did_deselect {
            f(path);
        }
    }

    pub(crate) fn did_highlight(&self, path: IndexPath) {
        if let Some(f) = &self.did_highlight {
            f(path);
        }
    }

    pub(crate) fn did_unhighlight(&self, path: IndexPath) {
        if let Some(f) = &self.did_unhighlight {
            f(path);
        }
    }

    pub(crate) fn will_display_cell(&self, cell: &GridCell, path: IndexPath) {
        if let Some(f) = &self.will_display_cell {
            f(cell, path);
        }
    }

    pub(crate) fn did_end_displaying_cell(&self, cell: &GridCell, path: IndexPath) {
        if let Some(f) = &self.did_end_displaying_cell {
            f(cell, path);
        }
    }
}

impl std::fmt::Debug for DelegateHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DelegateHooks")
            .field("should_select", &self.should_select.is_some())
            .field("did_select", &self.did_select.is_some())
            .field("did_deselect", &self.did_deselect.is_some())
            .field("did_highlight", &self.did_highlight.is_some())
            .field("did_unhighlight", &self.did_unhighlight.is_some())
            .field("will_display_cell", &self.will_display_cell.is_some())
            .field("did_end_displaying_cell", &self.did_end_displaying_cell.is_some())
            .finish()
    }
}
