//! Applying object updates to the section map and the grid.

use std::collections::HashSet;

use horizon_sections_core::logging::{span_names, targets};
use horizon_sections_core::{sections_debug, sections_info, sections_warn, PerfSpan};

use super::{borrow_controller_mut, ListAdapter, UpdateKind};
use crate::diff::ListDiffable;
use crate::grid::GridView;
use crate::section_map::SectionKey;

impl<O: ListDiffable + Clone + 'static> ListAdapter<O> {
    /// Brings the sections and the grid up to date with the data source.
    ///
    /// The new object list is diffed against the mapped one. While the
    /// section map is rebuilt the adapter is "in update": controllers for
    /// surviving identifiers are reused and receive
    /// [`did_update_to_object`](crate::SectionController::did_update_to_object),
    /// new identifiers get a controller from the data source. The resulting
    /// batch is then applied to the grid, or the grid is fully reloaded on the
    /// first update when configured.
    pub fn perform_updates(&self, grid: &mut dyn GridView) {
        let _scope = self.enter();
        let _span = PerfSpan::new(span_names::UPDATE);

        let objects = self.fetch_objects();
        let old = self.sections.borrow().objects().to_vec();
        let batch = self.updater.diff(&old, &objects);
        let first_load = !self.state.is_loaded();

        let removed = {
            let _update = self.state.enter_update();
            self.rebuild_sections(objects)
        };
        self.forget_controllers(&removed);
        if !(batch.inserts.is_empty() && batch.deletes.is_empty() && batch.moves.is_empty()) {
            // Section indices shifted under the gesture's source.
            self.abandon_move();
        }

        let kind = if first_load && self.config.reload_on_first_update {
            grid.reload_data();
            UpdateKind::Reload
        } else {
            if !batch.is_empty() {
                grid.apply_batch(&batch);
            }
            UpdateKind::Batch
        };
        self.state.mark_loaded();

        sections_info!(
            target: targets::UPDATE,
            sections = self.sections.borrow().len(),
            inserts = batch.inserts.len(),
            deletes = batch.deletes.len(),
            moves = batch.moves.len(),
            updates = batch.updates.len(),
            ?kind,
            "updates performed"
        );
        self.signals.updates_finished.emit(kind);
    }

    /// Rebuilds every section from scratch and reloads the grid.
    ///
    /// All controllers are recreated through the data source and all view
    /// associations are dropped.
    pub fn reload_data(&self, grid: &mut dyn GridView) {
        let _scope = self.enter();
        let _span = PerfSpan::new(span_names::UPDATE);

        let objects = self.fetch_objects();
        let removed = {
            let _update = self.state.enter_update();
            let removed = self.sections.borrow_mut().reset();
            let entries = objects
                .into_iter()
                .map(|object| {
                    let key = self.create_controller(&object);
                    (object, key)
                })
                .collect();
            self.sections.borrow_mut().update(entries);
            removed
        };

        self.associations.borrow_mut().clear();
        self.display.borrow_mut().clear();
        self.abandon_move();

        grid.reload_data();
        self.state.mark_loaded();

        sections_info!(
            target: targets::UPDATE,
            sections = self.sections.borrow().len(),
            discarded = removed.len(),
            "data reloaded"
        );
        self.signals.updates_finished.emit(UpdateKind::Reload);
    }

    /// Reloads the sections backing `objects` in place.
    ///
    /// Each object replaces the mapped object with the same identifier and is
    /// handed to its controller. Objects that are not mapped are skipped.
    pub fn reload_objects(&self, objects: &[O], grid: &mut dyn GridView) {
        let _scope = self.enter();

        let mut reloaded = Vec::with_capacity(objects.len());
        for object in objects {
            let id = object.diff_identifier();
            let found = {
                let map = self.sections.borrow();
                map.key_for_identifier(&id).and_then(|key| {
                    let section = map.section_for_key(key)?;
                    map.controller_for_key(key)
                        .map(|controller| (section, controller.clone()))
                })
            };
            let Some((section, controller)) = found else {
                sections_debug!(target: targets::UPDATE, ?id, "reload requested for unmapped object");
                continue;
            };

            let _update = self.state.enter_update();
            if let Err(err) = self
                .sections
                .borrow_mut()
                .replace_object(section, object.clone())
            {
                sections_warn!(target: targets::UPDATE, %err, "could not replace section object");
                continue;
            }
            if let Some(mut controller) = borrow_controller_mut(&controller) {
                controller.did_update_to_object(object);
            }
            reloaded.push(section);
        }

        reloaded.sort_unstable();
        reloaded.dedup();
        if !reloaded.is_empty() {
            grid.reload_sections(&reloaded);
        }
        self.signals.updates_finished.emit(UpdateKind::ReloadObjects);
    }

    /// Pulls objects from the data source, dropping repeated identifiers when
    /// configured.
    fn fetch_objects(&self) -> Vec<O> {
        let objects = self.data_source.borrow().objects();
        if !self.config.deduplicate_objects {
            return objects;
        }

        let mut seen = HashSet::with_capacity(objects.len());
        objects
            .into_iter()
            .filter(|object| {
                let id = object.diff_identifier();
                if seen.contains(&id) {
                    sections_warn!(target: targets::UPDATE, ?id, "dropping object with duplicate diff identifier");
                    false
                } else {
                    seen.insert(id);
                    true
                }
            })
            .collect()
    }

    /// Maps `objects` to controllers, reusing controllers by identifier.
    /// Returns the keys of controllers that are no longer mapped.
    fn rebuild_sections(&self, objects: Vec<O>) -> Vec<SectionKey> {
        let mut entries = Vec::with_capacity(objects.len());
        for object in objects {
            let existing = {
                let map = self.sections.borrow();
                map.key_for_identifier(&object.diff_identifier())
                    .and_then(|key| {
                        map.controller_for_key(key)
                            .map(|controller| (key, controller.clone()))
                    })
            };

            let key = match existing {
                Some((key, controller)) => {
                    if let Some(mut controller) = borrow_controller_mut(&controller) {
                        controller.did_update_to_object(&object);
                    }
                    key
                }
                None => self.create_controller(&object),
            };
            entries.push((object, key));
        }

        self.sections.borrow_mut().update(entries)
    }

    /// Asks the data source for a controller and registers it with the map.
    fn create_controller(&self, object: &O) -> SectionKey {
        let controller = self.data_source.borrow_mut().section_controller_for(object);
        if let Some(mut created) = borrow_controller_mut(&controller) {
            created.did_update_to_object(object);
        }
        self.sections.borrow_mut().insert_controller(controller)
    }

    /// Drops every association and display record of unmapped controllers.
    fn forget_controllers(&self, removed: &[SectionKey]) {
        if removed.is_empty() {
            return;
        }

        let mut associations = self.associations.borrow_mut();
        let mut display = self.display.borrow_mut();
        let mut dropped = 0;
        for key in removed {
            dropped += associations.remove_controller(*key);
            display.remove(*key);
        }
        drop(display);
        drop(associations);

        sections_debug!(
            target: targets::UPDATE,
            controllers = removed.len(),
            views = dropped,
            "unmapped section controllers"
        );
    }

    fn abandon_move(&self) {
        let mut moves = self.moves.get();
        if let Some(ctx) = moves.cancel() {
            sections_debug!(
                target: targets::MOVE,
                source = %ctx.source,
                "interactive move abandoned by section update"
            );
        }
        self.moves.set(moves);
    }
}
