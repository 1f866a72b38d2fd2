//! Layout attributes and their customization during animated updates.

use horizon_sections_core::Rect;

use crate::grid::SupplementaryKind;
use crate::index_path::IndexPath;

/// What a set of layout attributes describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementCategory {
    /// An item cell.
    Cell,
    /// A header or footer.
    Supplementary(SupplementaryKind),
}

/// Geometry and appearance of one laid-out element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutAttributes {
    pub index_path: IndexPath,
    pub category: ElementCategory,
    pub frame: Rect,
    pub alpha: f64,
    pub z_index: i32,
    pub hidden: bool,
}

impl LayoutAttributes {
    /// Fully opaque, visible attributes for a cell at `index_path`.
    pub fn for_cell(index_path: IndexPath, frame: Rect) -> Self {
        Self {
            index_path,
            category: ElementCategory::Cell,
            frame,
            alpha: 1.0,
            z_index: 0,
            hidden: false,
        }
    }

    /// Fully opaque, visible attributes for a supplementary view.
    pub fn for_supplementary(kind: SupplementaryKind, index_path: IndexPath, frame: Rect) -> Self {
        Self {
            category: ElementCategory::Supplementary(kind),
            ..Self::for_cell(index_path, frame)
        }
    }
}

/// Customizes where elements appear from and disappear to.
///
/// A section controller that returns one from
/// [`transition_delegate`](crate::SectionController::transition_delegate) gets
/// a chance to rewrite attributes for its items. Both hooks pass the
/// attributes through unchanged by default.
pub trait TransitionDelegate {
    /// Starting attributes for an item that is being inserted.
    fn initial_attributes_for_inserted_item(
        &self,
        attributes: LayoutAttributes,
        _index: usize,
    ) -> LayoutAttributes {
        attributes
    }

    /// Final attributes for an item that is being deleted.
    fn final_attributes_for_deleted_item(
        &self,
        attributes: LayoutAttributes,
        _index: usize,
    ) -> LayoutAttributes {
        attributes
    }
}
