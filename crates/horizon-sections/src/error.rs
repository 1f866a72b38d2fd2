//! Error types for the section adapter.

use thiserror::Error;

use crate::grid::SupplementaryKind;

/// Errors surfaced by adapter operations.
///
/// Most collaborator mistakes are reported through contract assertions and
/// never reach this type. The variants here cover the cases where the
/// adapter cannot produce the value the host asked for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdapterError {
    /// A section controller returned no view for an item.
    #[error("{controller} returned no cell for item {item} in section {section}")]
    MissingCell {
        /// The section being vended.
        section: usize,
        /// The controller-local item.
        item: usize,
        /// Type name of the offending controller.
        controller: &'static str,
    },

    /// A vend was requested while another vend was in progress.
    #[error("cell requested for [{section}, {item}] while another cell is being dequeued")]
    ReentrantVend {
        /// The requested section.
        section: usize,
        /// The requested item.
        item: usize,
    },

    /// The section index does not address a mapped section.
    #[error("section {section} out of range ({count} sections)")]
    SectionOutOfRange {
        /// The requested section.
        section: usize,
        /// Number of mapped sections.
        count: usize,
    },

    /// The item index exceeds the controller's item count.
    #[error("item {item} out of range for section {section} ({count} items)")]
    ItemOutOfRange {
        /// The section.
        section: usize,
        /// The requested item.
        item: usize,
        /// The controller's item count.
        count: usize,
    },

    /// The section's controller has no supplementary view source.
    #[error("section {section} has no supplementary view source")]
    NoSupplementarySource {
        /// The section.
        section: usize,
    },

    /// The supplementary source does not provide the requested kind.
    #[error("section {section} does not provide {kind} views")]
    UnsupportedSupplementaryKind {
        /// The section.
        section: usize,
        /// The requested kind.
        kind: SupplementaryKind,
    },
}

/// A specialized Result type for adapter operations.
pub type AdapterResult<T> = std::result::Result<T, AdapterError>;
