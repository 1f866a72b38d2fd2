//! Ordered mapping between sections, backing objects, and controllers.
//!
//! The section index of an entry is its position in the map, so positions are
//! always contiguous `0..len`. Each mapped controller is addressed internally
//! by a generational [`SectionKey`]: once a controller is unmapped, any key
//! still held elsewhere (for example in the view association table) resolves
//! to nothing instead of to whichever controller reused the slot.

use std::collections::HashMap;
use std::rc::Rc;

use horizon_sections_core::logging::targets;
use horizon_sections_core::{contract_assert, sections_debug, SectionsError};
use slotmap::{new_key_type, SecondaryMap, SlotMap};

use crate::controller::SharedController;
use crate::diff::ListDiffable;

new_key_type! {
    /// Stable handle to a mapped section controller.
    ///
    /// Keys stay valid while the controller is mapped, regardless of how its
    /// section index changes.
    pub struct SectionKey;
}

/// The section map.
pub struct SectionMap<O: ListDiffable> {
    objects: Vec<O>,
    keys: Vec<SectionKey>,
    controllers: SlotMap<SectionKey, SharedController<O>>,
    sections: SecondaryMap<SectionKey, usize>,
    by_identifier: HashMap<O::Identifier, SectionKey>,
}

impl<O: ListDiffable + Clone> SectionMap<O> {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            keys: Vec::new(),
            controllers: SlotMap::with_key(),
            sections: SecondaryMap::new(),
            by_identifier: HashMap::new(),
        }
    }

    /// Number of sections.
    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The controller at `section`.
    pub fn controller(&self, section: usize) -> Option<&SharedController<O>> {
        self.key_for_section(section)
            .and_then(|key| self.controllers.get(key))
    }

    pub fn key_for_section(&self, section: usize) -> Option<SectionKey> {
        self.keys.get(section).copied()
    }

    /// The backing object at `section`.
    pub fn object(&self, section: usize) -> Option<&O> {
        self.objects.get(section)
    }

    /// Current section of a mapped controller.
    pub fn section_for_key(&self, key: SectionKey) -> Option<usize> {
        self.sections.get(key).copied()
    }

    pub fn controller_for_key(&self, key: SectionKey) -> Option<&SharedController<O>> {
        self.controllers.get(key)
    }

    pub fn key_for_identifier(&self, id: &O::Identifier) -> Option<SectionKey> {
        self.by_identifier.get(id).copied()
    }

    pub fn section_for_identifier(&self, id: &O::Identifier) -> Option<usize> {
        self.key_for_identifier(id)
            .and_then(|key| self.section_for_key(key))
    }

    /// Finds the key of `controller` by reference identity.
    pub fn key_for_controller(&self, controller: &SharedController<O>) -> Option<SectionKey> {
        self.controllers
            .iter()
            .find(|(_, mapped)| Rc::ptr_eq(mapped, controller))
            .map(|(key, _)| key)
    }

    /// All backing objects in section order.
    pub fn objects(&self) -> &[O] {
        &self.objects
    }

    /// Registers a controller that will be placed by the next
    /// [`update`](Self::update). Until then it has no section.
    pub fn insert_controller(&mut self, controller: SharedController<O>) -> SectionKey {
        self.controllers.insert(controller)
    }

    /// Replaces the ordered contents of the map.
    ///
    /// Every key in `entries` must come from
    /// [`insert_controller`](Self::insert_controller) and appear once.
    /// Controllers not named by `entries` are unmapped; their keys are
    /// returned so callers can drop anything that refers to them.
    pub fn update(&mut self, entries: Vec<(O, SectionKey)>) -> Vec<SectionKey> {
        let mut objects = Vec::with_capacity(entries.len());
        let mut keys = Vec::with_capacity(entries.len());
        let mut sections = SecondaryMap::new();
        let mut by_identifier = HashMap::with_capacity(entries.len());

        for (object, key) in entries {
            if !self.controllers.contains_key(key) {
                contract_assert!(false, "section key {key:?} was never registered with the map");
                continue;
            }

            let id = object.diff_identifier();
            if by_identifier.contains_key(&id) {
                contract_assert!(
                    false,
                    "duplicate diff identifier {id:?} in section map update; \
                     identifiers must be unique"
                );
                continue;
            }
            if sections.contains_key(key) {
                contract_assert!(false, "controller mapped to more than one section");
                continue;
            }

            sections.insert(key, keys.len());
            by_identifier.insert(id, key);
            keys.push(key);
            objects.push(object);
        }

        let removed: Vec<SectionKey> = self
            .controllers
            .keys()
            .filter(|key| !sections.contains_key(*key))
            .collect();
        for key in &removed {
            self.controllers.remove(*key);
        }

        sections_debug!(
            target: targets::SECTION_MAP,
            sections = keys.len(),
            removed = removed.len(),
            "section map updated"
        );

        self.objects = objects;
        self.keys = keys;
        self.sections = sections;
        self.by_identifier = by_identifier;

        removed
    }

    /// Moves the section at `from` so that it ends up at index `to`.
    ///
    /// Sections between the two positions shift by one to keep indices
    /// contiguous.
    pub fn move_section(&mut self, from: usize, to: usize) -> horizon_sections_core::Result<()> {
        SectionsError::check_index(from, self.len())?;
        SectionsError::check_index(to, self.len())?;
        if from == to {
            return Ok(());
        }

        let object = self.objects.remove(from);
        let key = self.keys.remove(from);
        self.objects.insert(to, object);
        self.keys.insert(to, key);

        for section in from.min(to)..=from.max(to) {
            self.sections.insert(self.keys[section], section);
        }

        sections_debug!(target: targets::SECTION_MAP, from, to, "section moved");
        Ok(())
    }

    /// Replaces the object at `section` with a new value of the same identity.
    pub fn replace_object(&mut self, section: usize, object: O) -> horizon_sections_core::Result<()> {
        SectionsError::check_index(section, self.len())?;
        contract_assert!(
            object.diff_identifier() == self.objects[section].diff_identifier(),
            "replacement object changes the identity of section {section}"
        );
        self.objects[section] = object;
        Ok(())
    }

    /// Unmaps everything. Returns the keys that were mapped or registered.
    pub fn reset(&mut self) -> Vec<SectionKey> {
        let removed: Vec<SectionKey> = self.controllers.keys().collect();
        self.objects.clear();
        self.keys.clear();
        self.controllers.clear();
        self.sections.clear();
        self.by_identifier.clear();
        removed
    }
}

impl<O: ListDiffable + Clone> Default for SectionMap<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: ListDiffable> std::fmt::Debug for SectionMap<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SectionMap")
            .field("sections", &self.keys.len())
            .field("controllers", &self.controllers.len())
            .finish()
    }
}
