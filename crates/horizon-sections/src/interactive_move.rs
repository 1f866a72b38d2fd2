//! Interactive reordering.
//!
//! The host grid commits a drag visually before the adapter can validate it,
//! so a gesture can never be refused up front. When it ends, the coordinator
//! decides between three outcomes:
//!
//! 1. Source and destination in the same section: ask the controller whether
//!    the local move is legal. Commit it if so, revert the view otherwise.
//! 2. Different sections, each holding exactly one item: treat the gesture
//!    as a whole-section reorder.
//! 3. Any other cross-section gesture: unsupported, revert the view.
//!
//! Reverting means issuing a corrective move from the destination back to
//! the source. The coordinator only decides; the adapter carries out the
//! decision against the section map, the data source, and the grid.

use std::fmt;

use horizon_sections_core::logging::targets;
use horizon_sections_core::sections_debug;

use crate::index_path::IndexPath;

/// Source and destination of an in-flight gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractiveMoveContext {
    pub source: IndexPath,
    pub destination: IndexPath,
}

impl InteractiveMoveContext {
    fn crosses_sections(&self) -> bool {
        !self.source.same_section(&self.destination)
    }
}

/// State of the move coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// The gesture currently targets the section it started in.
    DraggingWithinSection(InteractiveMoveContext),
    /// The gesture currently targets another section.
    DraggingAcrossSections(InteractiveMoveContext),
    /// The gesture ended on an invalid target and the view is being put back.
    Reverting(InteractiveMoveContext),
}

impl MoveState {
    /// The gesture context, if any.
    pub fn context(&self) -> Option<InteractiveMoveContext> {
        match *self {
            Self::Idle => None,
            Self::DraggingWithinSection(ctx)
            | Self::DraggingAcrossSections(ctx)
            | Self::Reverting(ctx) => Some(ctx),
        }
    }

    fn dragging(ctx: InteractiveMoveContext) -> Self {
        if ctx.crosses_sections() {
            Self::DraggingAcrossSections(ctx)
        } else {
            Self::DraggingWithinSection(ctx)
        }
    }
}

/// Why a gesture was put back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RevertReason {
    /// The section controller refused the intra-section move.
    IllegalMove,
    /// An individual item was dropped into another section.
    CrossSectionItemMove,
}

impl fmt::Display for RevertReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IllegalMove => write!(f, "move refused by section controller"),
            Self::CrossSectionItemMove => write!(f, "items cannot move between sections"),
        }
    }
}

/// What the coordinator decided for a finished gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResolution {
    /// Commit an item move inside `section`.
    CommitItem { section: usize, from: usize, to: usize },
    /// Move the whole section `from` to index `to`.
    ReorderSections { from: usize, to: usize },
    /// Put the view back.
    Revert(RevertReason),
}

/// Result of a finished gesture, as reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// An item moved within its section.
    MovedItem { section: usize, from: usize, to: usize },
    /// A single-item section moved.
    MovedSection { from: usize, to: usize },
    /// The gesture was reverted with a corrective move.
    Reverted {
        source: IndexPath,
        destination: IndexPath,
        reason: RevertReason,
    },
}

impl MoveOutcome {
    /// Returns `true` if the model changed.
    pub fn is_committed(&self) -> bool {
        !matches!(self, Self::Reverted { .. })
    }
}

/// Item counts of the two sections a gesture touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionCounts {
    pub source: usize,
    pub destination: usize,
}

/// The move state machine.
#[derive(Debug, Clone, Copy, Default)]
pub struct InteractiveMoveCoordinator {
    state: MoveState,
}

impl InteractiveMoveCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MoveState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state != MoveState::Idle
    }

    /// Starts a gesture at `source`. A gesture already in progress is
    /// abandoned.
    pub fn begin(&mut self, source: IndexPath) {
        if let Some(previous) = self.state.context() {
            sections_debug!(
                target: targets::MOVE,
                source = %previous.source,
                "abandoning unfinished interactive move"
            );
        }
        self.state = MoveState::DraggingWithinSection(InteractiveMoveContext {
            source,
            destination: source,
        });
    }

    /// Updates the gesture's current target. Ignored while idle.
    pub fn retarget(&mut self, destination: IndexPath) {
        match self.state {
            MoveState::DraggingWithinSection(ctx) | MoveState::DraggingAcrossSections(ctx) => {
                self.state = MoveState::dragging(InteractiveMoveContext { destination, ..ctx });
            }
            MoveState::Idle | MoveState::Reverting(_) => {}
        }
    }

    /// Decides the outcome of a gesture from `source` to `destination`.
    ///
    /// `can_move` is consulted only for intra-section gestures and receives
    /// controller-local `(from, to)`. A revert leaves the coordinator in
    /// [`MoveState::Reverting`] until [`finish`](Self::finish).
    pub fn resolve(
        &mut self,
        source: IndexPath,
        destination: IndexPath,
        counts: SectionCounts,
        can_move: impl FnOnce(usize, usize) -> bool,
    ) -> MoveResolution {
        let ctx = InteractiveMoveContext {
            source,
            destination,
        };
        self.state = MoveState::dragging(ctx);

        let resolution = if !ctx.crosses_sections() {
            if can_move(source.item, destination.item) {
                MoveResolution::CommitItem {
                    section: source.section,
                    from: source.item,
                    to: destination.item,
                }
            } else {
                MoveResolution::Revert(RevertReason::IllegalMove)
            }
        } else if counts.source == 1 && counts.destination == 1 {
            MoveResolution::ReorderSections {
                from: source.section,
                to: destination.section,
            }
        } else {
            MoveResolution::Revert(RevertReason::CrossSectionItemMove)
        };

        if let MoveResolution::Revert(reason) = resolution {
            sections_debug!(
                target: targets::MOVE,
                source = %source,
                destination = %destination,
                %reason,
                "reverting interactive move"
            );
            self.state = MoveState::Reverting(ctx);
        }
        resolution
    }

    /// Returns to idle after the resolution has been carried out.
    pub fn finish(&mut self) {
        self.state = MoveState::Idle;
    }

    /// Abandons the gesture without resolving it. Returns the context that
    /// was in progress.
    pub fn cancel(&mut self) -> Option<InteractiveMoveContext> {
        let ctx = self.state.context();
        self.state = MoveState::Idle;
        ctx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SINGLE: SectionCounts = SectionCounts {
        source: 1,
        destination: 1,
    };

    #[test]
    fn test_begin_and_retarget() {
        let mut coordinator = InteractiveMoveCoordinator::new();
        assert_eq!(coordinator.state(), MoveState::Idle);

        coordinator.begin(IndexPath::new(0, 1));
        assert!(matches!(coordinator.state(), MoveState::DraggingWithinSection(_)));

        coordinator.retarget(IndexPath::new(2, 0));
        let MoveState::DraggingAcrossSections(ctx) = coordinator.state() else {
            panic!("expected cross-section drag");
        };
        assert_eq!(ctx.source, IndexPath::new(0, 1));
        assert_eq!(ctx.destination, IndexPath::new(2, 0));

        coordinator.retarget(IndexPath::new(0, 3));
        assert!(matches!(coordinator.state(), MoveState::DraggingWithinSection(_)));
    }

    #[test]
    fn test_retarget_while_idle_is_ignored() {
        let mut coordinator = InteractiveMoveCoordinator::new();
        coordinator.retarget(IndexPath::new(1, 1));
        assert_eq!(coordinator.state(), MoveState::Idle);
    }

    #[test]
    fn test_legal_intra_section_move_commits() {
        let mut coordinator = InteractiveMoveCoordinator::new();
        let resolution = coordinator.resolve(
            IndexPath::new(0, 1),
            IndexPath::new(0, 3),
            SectionCounts {
                source: 4,
                destination: 4,
            },
            |from, to| from == 1 && to == 3,
        );
        assert_eq!(
            resolution,
            MoveResolution::CommitItem {
                section: 0,
                from: 1,
                to: 3
            }
        );
        coordinator.finish();
        assert!(!coordinator.is_active());
    }

    #[test]
    fn test_illegal_intra_section_move_reverts() {
        let mut coordinator = InteractiveMoveCoordinator::new();
        let resolution =
            coordinator.resolve(IndexPath::new(0, 0), IndexPath::new(0, 2), SINGLE, |_, _| false);
        assert_eq!(resolution, MoveResolution::Revert(RevertReason::IllegalMove));
        assert!(matches!(coordinator.state(), MoveState::Reverting(_)));
    }

    #[test]
    fn test_single_item_sections_reorder() {
        let mut coordinator = InteractiveMoveCoordinator::new();
        let resolution = coordinator.resolve(
            IndexPath::new(0, 0),
            IndexPath::new(1, 0),
            SINGLE,
            |_, _| panic!("legality is not consulted across sections"),
        );
        assert_eq!(resolution, MoveResolution::ReorderSections { from: 0, to: 1 });
    }

    #[test]
    fn test_cross_section_item_move_reverts() {
        let mut coordinator = InteractiveMoveCoordinator::new();
        for counts in [
            SectionCounts {
                source: 2,
                destination: 1,
            },
            SectionCounts {
                source: 1,
                destination: 3,
            },
        ] {
            let resolution =
                coordinator.resolve(IndexPath::new(0, 0), IndexPath::new(1, 0), counts, |_, _| true);
            assert_eq!(
                resolution,
                MoveResolution::Revert(RevertReason::CrossSectionItemMove)
            );
            coordinator.finish();
        }
    }

    #[test]
    fn test_cancel_returns_context() {
        let mut coordinator = InteractiveMoveCoordinator::new();
        assert_eq!(coordinator.cancel(), None);

        coordinator.begin(IndexPath::new(3, 3));
        let ctx = coordinator.cancel().unwrap();
        assert_eq!(ctx.source, IndexPath::new(3, 3));
        assert_eq!(coordinator.state(), MoveState::Idle);
    }
}
