//! Backing-object identity and section-level diffing.
//!
//! Every backing object maps to exactly one section. Between two snapshots of
//! the object list, objects are matched by their [`ListDiffable::diff_identifier`];
//! a matched object whose content changed (`is_equal_to` returns `false`) is
//! reported as an update. The [`Updater`] trait is the boundary to whatever
//! engine computes the batch; [`IndexDiffer`] is the built-in one.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

/// Identity and equality for objects that back sections.
///
/// # Example
///
/// ```
/// use horizon_sections::ListDiffable;
///
/// #[derive(Clone)]
/// struct User {
///     id: u64,
///     name: String,
/// }
///
/// impl ListDiffable for User {
///     type Identifier = u64;
///
///     fn diff_identifier(&self) -> u64 {
///         self.id
///     }
///
///     fn is_equal_to(&self, other: &Self) -> bool {
///         self.name == other.name
///     }
/// }
/// ```
pub trait ListDiffable {
    /// The identity type. Two objects with equal identifiers are the same
    /// section across updates.
    type Identifier: Hash + Eq + Clone + Debug;

    /// Returns the stable identity of this object.
    fn diff_identifier(&self) -> Self::Identifier;

    /// Returns `true` if `other` (same identity) has the same content.
    fn is_equal_to(&self, other: &Self) -> bool;
}

macro_rules! impl_diffable_for_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ListDiffable for $ty {
                type Identifier = $ty;

                fn diff_identifier(&self) -> $ty {
                    self.clone()
                }

                fn is_equal_to(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

impl_diffable_for_value!(String, &'static str, u32, u64, usize, i32, i64);

/// Section-level changes between two object snapshots.
///
/// Indices in `deletes`, `updates`, and the `from` side of `moves` refer to
/// the old snapshot; `inserts` and the `to` side of `moves` refer to the new
/// one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpdateBatch {
    /// Sections inserted, by new index.
    pub inserts: Vec<usize>,
    /// Sections deleted, by old index.
    pub deletes: Vec<usize>,
    /// Sections moved, as `(old index, new index)`.
    pub moves: Vec<(usize, usize)>,
    /// Sections whose object content changed, by old index.
    pub updates: Vec<usize>,
}

impl UpdateBatch {
    /// Creates an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the batch has no changes.
    pub fn is_empty(&self) -> bool {
        self.inserts.is_empty()
            && self.deletes.is_empty()
            && self.moves.is_empty()
            && self.updates.is_empty()
    }
}

/// Computes the batch that transforms one object snapshot into another.
pub trait Updater<O> {
    /// Diffs `old` against `new`.
    fn diff(&self, old: &[O], new: &[O]) -> UpdateBatch;
}

/// The default [`Updater`].
///
/// - Deletes: old identifiers absent from the new snapshot.
/// - Inserts: new identifiers absent from the old snapshot.
/// - Moves: surviving objects whose position relative to the other survivors
///   changed.
/// - Updates: surviving objects whose content changed.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexDiffer;

impl IndexDiffer {
    /// Creates the differ.
    pub fn new() -> Self {
        Self
    }
}

impl<O: ListDiffable> Updater<O> for IndexDiffer {
    fn diff(&self, old: &[O], new: &[O]) -> UpdateBatch {
        let old_ids: Vec<O::Identifier> = old.iter().map(ListDiffable::diff_identifier).collect();
        let new_ids: Vec<O::Identifier> = new.iter().map(ListDiffable::diff_identifier).collect();

        let old_index: HashMap<&O::Identifier, usize> =
            old_ids.iter().enumerate().map(|(i, id)| (id, i)).collect();
        let new_set: HashSet<&O::Identifier> = new_ids.iter().collect();

        let mut batch = UpdateBatch::new();

        batch.deletes = old_ids
            .iter()
            .enumerate()
            .filter(|(_, id)| !new_set.contains(id))
            .map(|(i, _)| i)
            .collect();

        // Survivors in old order, to compare relative positions
        let old_survivors: Vec<&O::Identifier> =
            old_ids.iter().filter(|id| new_set.contains(id)).collect();
        let old_rank: HashMap<&O::Identifier, usize> = old_survivors
            .iter()
            .enumerate()
            .map(|(rank, id)| (*id, rank))
            .collect();

        let mut new_rank = 0;
        for (new_i, id) in new_ids.iter().enumerate() {
            let Some(&old_i) = old_index.get(id) else {
                batch.inserts.push(new_i);
                continue;
            };

            if old_rank.get(id) != Some(&new_rank) {
                batch.moves.push((old_i, new_i));
            }
            if !old[old_i].is_equal_to(&new[new_i]) {
                batch.updates.push(old_i);
            }
            new_rank += 1;
        }

        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    struct Tagged {
        id: u32,
        label: &'static str,
    }

    impl ListDiffable for Tagged {
        type Identifier = u32;

        fn diff_identifier(&self) -> u32 {
            self.id
        }

        fn is_equal_to(&self, other: &Self) -> bool {
            self.label == other.label
        }
    }

    fn diff(old: &[&'static str], new: &[&'static str]) -> UpdateBatch {
        IndexDiffer.diff(old, new)
    }

    #[test]
    fn test_identical_snapshots_are_empty() {
        let batch = diff(&["a", "b", "c"], &["a", "b", "c"]);
        assert!(batch.is_empty());
    }

    #[test]
    fn test_insert_and_delete() {
        let batch = diff(&["a", "b", "c"], &["a", "c", "d"]);
        assert_eq!(batch.deletes, vec![1]);
        assert_eq!(batch.inserts, vec![2]);
        assert!(batch.moves.is_empty());
    }

    #[test]
    fn test_swap_reports_moves() {
        let batch = diff(&["a", "b"], &["b", "a"]);
        assert_eq!(batch.moves, vec![(1, 0), (0, 1)]);
        assert!(batch.inserts.is_empty());
        assert!(batch.deletes.is_empty());
    }

    #[test]
    fn test_shift_from_delete_is_not_a_move() {
        // "b" and "c" change absolute index, but keep their relative order
        let batch = diff(&["a", "b", "c"], &["b", "c"]);
        assert_eq!(batch.deletes, vec![0]);
        assert!(batch.moves.is_empty());
    }

    #[test]
    fn test_content_change_is_update() {
        let old = vec![Tagged { id: 1, label: "one" }, Tagged { id: 2, label: "two" }];
        let new = vec![Tagged { id: 1, label: "one" }, Tagged { id: 2, label: "TWO" }];

        let batch = IndexDiffer.diff(&old, &new);
        assert_eq!(batch.updates, vec![1]);
        assert!(batch.inserts.is_empty() && batch.deletes.is_empty() && batch.moves.is_empty());
    }

    #[test]
    fn test_empty_to_full() {
        let batch = diff(&[], &["a", "b"]);
        assert_eq!(batch.inserts, vec![0, 1]);
        let batch = diff(&["a", "b"], &[]);
        assert_eq!(batch.deletes, vec![0, 1]);
    }
}
