//! Cell and supplementary view vending.
//!
//! Vending follows one sequence: check reentrancy, resolve the section,
//! bracket the controller call with the dequeuing flag and performance
//! hooks, validate the returned view, and associate it with its controller
//! before handing it to the grid.

use std::time::Instant;

use horizon_sections_core::logging::{span_names, targets};
use horizon_sections_core::{contract_assert, sections_error, sections_trace, PerfSpan};

use super::{borrow_controller, borrow_controller_mut, ListAdapter};
use crate::controller::{CellContext, SharedController};
use crate::diff::ListDiffable;
use crate::error::{AdapterError, AdapterResult};
use crate::grid::{GridCell, GridView, SupplementaryKind};
use crate::index_path::IndexPath;
use crate::section_map::SectionKey;

/// What a controller produced for one vend call.
struct Vended {
    view: Option<GridCell>,
    dequeued: bool,
    controller: &'static str,
}

impl<O: ListDiffable + Clone + 'static> ListAdapter<O> {
    /// Vends the cell for `index_path` from its section controller.
    ///
    /// # Errors
    ///
    /// - [`AdapterError::ReentrantVend`] if called while another cell is
    ///   being dequeued.
    /// - [`AdapterError::SectionOutOfRange`] or [`AdapterError::ItemOutOfRange`]
    ///   if `index_path` does not address an item.
    /// - [`AdapterError::MissingCell`] if the controller returned no cell.
    ///   Crash diagnostics are recorded first.
    pub fn cell_for_item(
        &self,
        grid: &mut dyn GridView,
        index_path: IndexPath,
    ) -> AdapterResult<GridCell> {
        let _scope = self.enter();
        let (key, controller) = self.begin_vend(index_path)?;
        let _span = PerfSpan::new(span_names::VEND);

        if let Some(perf) = &self.perf {
            perf.will_dequeue_cell(index_path);
        }
        let start = Instant::now();

        let vended = {
            let _dequeuing = self.state.enter_dequeue();
            let Some(mut section) = borrow_controller_mut(&controller) else {
                return Err(AdapterError::ReentrantVend {
                    section: index_path.section,
                    item: index_path.item,
                });
            };
            let mut ctx = CellContext::new(&mut *grid, index_path.section);
            let view = section.cell_for_item(index_path.item, &mut ctx);
            Vended {
                dequeued: view.as_ref().is_some_and(|view| ctx.was_dequeued(view.id())),
                view,
                controller: section.type_name(),
            }
        };

        if let Some(perf) = &self.perf {
            perf.did_dequeue_cell(vended.controller, index_path.item, start.elapsed());
        }

        self.finish_vend(grid, key, index_path, vended)
    }

    /// Vends the header or footer for `index_path.section`.
    ///
    /// # Errors
    ///
    /// Same as [`cell_for_item`](Self::cell_for_item), plus
    /// [`AdapterError::NoSupplementarySource`] and
    /// [`AdapterError::UnsupportedSupplementaryKind`] when the controller does
    /// not provide `kind`.
    pub fn supplementary_view(
        &self,
        grid: &mut dyn GridView,
        kind: SupplementaryKind,
        index_path: IndexPath,
    ) -> AdapterResult<GridCell> {
        let _scope = self.enter();
        let (key, controller) = self.begin_supplementary_vend(index_path)?;
        let _span = PerfSpan::new(span_names::VEND);

        let (vended, start) = {
            let _dequeuing = self.state.enter_dequeue();
            let Some(mut section) = borrow_controller_mut(&controller) else {
                return Err(AdapterError::ReentrantVend {
                    section: index_path.section,
                    item: index_path.item,
                });
            };
            let controller_name = section.type_name();
            let Some(source) = section.supplementary_view_source() else {
                return Err(AdapterError::NoSupplementarySource {
                    section: index_path.section,
                });
            };
            if !source.supported_kinds().contains(&kind) {
                return Err(AdapterError::UnsupportedSupplementaryKind {
                    section: index_path.section,
                    kind,
                });
            }

            if let Some(perf) = &self.perf {
                perf.will_dequeue_cell(index_path);
            }
            let start = Instant::now();

            let mut ctx = CellContext::new(&mut *grid, index_path.section);
            let view = source.view_for_supplementary(kind, index_path.item, &mut ctx);
            let vended = Vended {
                dequeued: view.as_ref().is_some_and(|view| ctx.was_dequeued(view.id())),
                view,
                controller: controller_name,
            };
            (vended, start)
        };

        if let Some(perf) = &self.perf {
            perf.did_dequeue_cell(vended.controller, index_path.item, start.elapsed());
        }

        self.finish_vend(grid, key, index_path, vended)
    }

    /// Reentrancy and range checks shared by item vending.
    fn begin_vend(&self, index_path: IndexPath) -> AdapterResult<(SectionKey, SharedController<O>)> {
        let (key, controller) = self.begin_supplementary_vend(index_path)?;

        let count = borrow_controller(&controller).map_or(0, |c| c.number_of_items());
        if index_path.item >= count {
            return Err(AdapterError::ItemOutOfRange {
                section: index_path.section,
                item: index_path.item,
                count,
            });
        }
        Ok((key, controller))
    }

    /// Reentrancy and section checks shared by every vend.
    fn begin_supplementary_vend(
        &self,
        index_path: IndexPath,
    ) -> AdapterResult<(SectionKey, SharedController<O>)> {
        if self.state.is_dequeuing() {
            contract_assert!(
                false,
                "view requested for {index_path} while another view is being dequeued; \
                 section controllers must not ask the grid for cells from cell_for_item"
            );
            return Err(AdapterError::ReentrantVend {
                section: index_path.section,
                item: index_path.item,
            });
        }
        contract_assert!(
            !self.state.in_update(),
            "view requested for {index_path} during an object update"
        );

        self.resolve_section(index_path.section)
            .ok_or_else(|| AdapterError::SectionOutOfRange {
                section: index_path.section,
                count: self.sections.borrow().len(),
            })
    }

    /// Validates a vended view and associates it with its controller.
    fn finish_vend(
        &self,
        grid: &mut dyn GridView,
        key: SectionKey,
        index_path: IndexPath,
        vended: Vended,
    ) -> AdapterResult<GridCell> {
        let Some(view) = vended.view else {
            self.diagnostics
                .record_nil_cell(&grid.describe(), vended.controller);
            sections_error!(
                target: targets::ADAPTER,
                controller = vended.controller,
                index_path = %index_path,
                "section controller returned no view"
            );
            return Err(AdapterError::MissingCell {
                section: index_path.section,
                item: index_path.item,
                controller: vended.controller,
            });
        };

        contract_assert!(
            !view.reuse_identifier().is_empty(),
            "{} vended {} for {index_path} without a reuse identifier",
            vended.controller,
            view.id()
        );
        contract_assert!(
            vended.dequeued,
            "{} vended {} for {index_path} without dequeuing it from the grid",
            vended.controller,
            view.id()
        );

        self.associations.borrow_mut().associate(view.id(), key);
        sections_trace!(
            target: targets::ADAPTER,
            cell = %view.id(),
            index_path = %index_path,
            "view vended"
        );
        Ok(view)
    }
}
