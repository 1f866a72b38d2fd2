//! Index paths for addressing items in a sectioned grid.
//!
//! The host grid flattens every section controller's items into a two-level
//! address: the section (which controller) and the item (which element of
//! that controller). Translating an `IndexPath` to controller-local terms is
//! just resolving `section` through the section map; the `item` component is
//! already the controller's own index and is forwarded unchanged.

use std::fmt;

/// A `(section, item)` coordinate in the flattened view space.
///
/// # Example
///
/// ```
/// use horizon_sections::IndexPath;
///
/// let path = IndexPath::new(2, 5);
/// assert_eq!(path.section, 2);
/// assert_eq!(path.item, 5);
/// assert_eq!(path.with_item(0), IndexPath::new(2, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct IndexPath {
    /// The section, one per section controller.
    pub section: usize,
    /// The item within the section controller.
    pub item: usize,
}

impl IndexPath {
    /// Creates a new index path.
    #[inline]
    pub const fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }

    /// Same section, different item.
    #[inline]
    pub const fn with_item(self, item: usize) -> Self {
        Self::new(self.section, item)
    }

    /// Same item, different section.
    #[inline]
    pub const fn with_section(self, section: usize) -> Self {
        Self::new(section, self.item)
    }

    /// Returns `true` if both paths address the same section.
    #[inline]
    pub const fn same_section(&self, other: &IndexPath) -> bool {
        self.section == other.section
    }
}

impl From<(usize, usize)> for IndexPath {
    fn from((section, item): (usize, usize)) -> Self {
        Self::new(section, item)
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.section, self.item)
    }
}

static_assertions::assert_impl_all!(IndexPath: Copy, Send, Sync, std::hash::Hash, Ord);
