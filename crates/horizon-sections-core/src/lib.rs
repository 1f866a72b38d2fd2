//! Core facilities for Horizon Sections.
//!
//! This crate provides the pieces the section adapter builds on:
//!
//! - **Contract assertions**: [`contract_assert!`] with panic-or-log modes
//! - **Logging**: `tracing` targets, span names, and [`PerfSpan`]
//! - **Signals**: direct-invocation [`Signal`] notifications
//! - **Thread affinity**: [`ThreadAffinity`] checks for the single UI thread
//! - **Geometry**: [`Size`], [`Rect`], [`EdgeInsets`] for layout metrics
//!
//! # Signal Example
//!
//! ```
//! use horizon_sections_core::Signal;
//!
//! let updated = Signal::<usize>::new();
//! updated.connect(|sections| println!("now showing {} sections", sections));
//! updated.emit(3);
//! ```

pub mod assertion;
mod error;
pub mod geometry;
pub mod logging;
pub mod signal;
pub mod thread_check;

pub use assertion::{
    assertion_mode, clear_violation_hook, set_assertion_mode, set_violation_hook,
    violation_count, AssertionMode, AssertionModeScope,
};
pub use error::{Result, SectionsError};
pub use geometry::{EdgeInsets, Point, Rect, Size};
pub use logging::PerfSpan;
pub use signal::{ConnectionId, Signal};
pub use thread_check::ThreadAffinity;
