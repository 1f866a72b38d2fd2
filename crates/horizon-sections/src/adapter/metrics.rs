//! Layout metrics and layout-attribute customization.

use std::time::Instant;

use horizon_sections_core::{contract_assert, EdgeInsets, Size};

use super::{borrow_controller, borrow_controller_mut, ListAdapter};
use crate::diff::ListDiffable;
use crate::grid::SupplementaryKind;
use crate::index_path::IndexPath;
use crate::layout::{ElementCategory, LayoutAttributes, TransitionDelegate};

impl<O: ListDiffable + Clone + 'static> ListAdapter<O> {
    /// Size of the item at `index_path`.
    pub fn size_for_item(&self, index_path: IndexPath) -> Size {
        let _scope = self.enter();
        let Some(controller) = self.controller_at(index_path.section) else {
            return Size::ZERO;
        };
        let Some(section) = borrow_controller(&controller) else {
            return Size::ZERO;
        };

        if let Some(perf) = &self.perf {
            perf.will_query_size(index_path);
        }
        let start = Instant::now();
        let size = section.size_for_item(index_path.item);
        if let Some(perf) = &self.perf {
            perf.did_query_size(section.type_name(), index_path.item, start.elapsed());
        }

        contract_assert!(
            !size.has_nan(),
            "{} returned size {size:?} with NaN for {index_path}",
            section.type_name()
        );
        size
    }

    /// Insets around the content of `section`.
    pub fn inset_for_section(&self, section: usize) -> EdgeInsets {
        let _scope = self.enter();
        let Some(controller) = self.controller_at(section) else {
            return EdgeInsets::ZERO;
        };
        let Some(controller) = borrow_controller(&controller) else {
            return EdgeInsets::ZERO;
        };

        let inset = controller.inset();
        contract_assert!(
            !inset.has_nan(),
            "{} returned inset {inset:?} with NaN for section {section}",
            controller.type_name()
        );
        inset
    }

    /// Spacing between lines of items in `section`.
    pub fn minimum_line_spacing(&self, section: usize) -> f64 {
        let _scope = self.enter();
        let Some(controller) = self.controller_at(section) else {
            return 0.0;
        };
        let spacing = borrow_controller(&controller).map_or(0.0, |c| c.minimum_line_spacing());
        contract_assert!(!spacing.is_nan(), "NaN line spacing for section {section}");
        spacing
    }

    /// Spacing between items on one line in `section`.
    pub fn minimum_interitem_spacing(&self, section: usize) -> f64 {
        let _scope = self.enter();
        let Some(controller) = self.controller_at(section) else {
            return 0.0;
        };
        let spacing =
            borrow_controller(&controller).map_or(0.0, |c| c.minimum_interitem_spacing());
        contract_assert!(!spacing.is_nan(), "NaN interitem spacing for section {section}");
        spacing
    }

    /// Size of the header or footer of `index_path.section`.
    ///
    /// Zero when the controller has no supplementary source or does not
    /// provide `kind`.
    pub fn size_for_supplementary(&self, kind: SupplementaryKind, index_path: IndexPath) -> Size {
        let _scope = self.enter();
        let Some(controller) = self.controller_at(index_path.section) else {
            return Size::ZERO;
        };
        let Some(mut section) = borrow_controller_mut(&controller) else {
            return Size::ZERO;
        };
        let name = section.type_name();
        let Some(source) = section.supplementary_view_source() else {
            return Size::ZERO;
        };
        if !source.supported_kinds().contains(&kind) {
            return Size::ZERO;
        }

        let size = source.size_for_supplementary(kind, index_path.item);
        contract_assert!(
            !size.has_nan(),
            "{name} returned {kind} size {size:?} with NaN for {index_path}"
        );
        size
    }

    /// Starting attributes for an element being inserted.
    ///
    /// Cell attributes go through the controller's transition delegate when
    /// it has one; everything else passes through unchanged.
    pub fn customize_initial_layout_attributes(
        &self,
        attributes: LayoutAttributes,
    ) -> LayoutAttributes {
        self.customize_attributes(attributes, |delegate, attributes, item| {
            delegate.initial_attributes_for_inserted_item(attributes, item)
        })
    }

    /// Final attributes for an element being deleted.
    pub fn customize_final_layout_attributes(
        &self,
        attributes: LayoutAttributes,
    ) -> LayoutAttributes {
        self.customize_attributes(attributes, |delegate, attributes, item| {
            delegate.final_attributes_for_deleted_item(attributes, item)
        })
    }

    fn customize_attributes(
        &self,
        attributes: LayoutAttributes,
        customize: impl FnOnce(&dyn TransitionDelegate, LayoutAttributes, usize) -> LayoutAttributes,
    ) -> LayoutAttributes {
        let _scope = self.enter();
        if attributes.category != ElementCategory::Cell {
            return attributes;
        }

        // Deleted items may address sections that are already gone.
        let controller = self
            .sections
            .borrow()
            .controller(attributes.index_path.section)
            .cloned();
        let Some(controller) = controller else {
            return attributes;
        };
        let Some(section) = borrow_controller(&controller) else {
            return attributes;
        };
        match section.transition_delegate() {
            Some(delegate) => customize(delegate, attributes, attributes.index_path.item),
            None => attributes,
        }
    }
}
