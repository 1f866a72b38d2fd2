//! Error types for Horizon Sections core.

use std::thread::ThreadId;

use thiserror::Error;

/// The main error type for core operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SectionsError {
    /// An index was outside the valid range of a collection.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// The length of the collection at the time of the call.
        len: usize,
    },

    /// A thread-affine value was touched from a thread that does not own it.
    #[error("owned by thread {owner:?} but accessed from thread {current:?}")]
    WrongThread {
        /// The owning thread.
        owner: ThreadId,
        /// The thread that made the access.
        current: ThreadId,
    },
}

impl SectionsError {
    /// Returns `Ok(())` if `index < len`, otherwise an [`IndexOutOfRange`](Self::IndexOutOfRange) error.
    #[inline]
    pub fn check_index(index: usize, len: usize) -> Result<()> {
        if index < len {
            Ok(())
        } else {
            Err(Self::IndexOutOfRange { index, len })
        }
    }
}

/// A specialized Result type for core operations.
pub type Result<T> = std::result::Result<T, SectionsError>;
