//! Logging facilities for Horizon Sections.
//!
//! This module provides:
//! - Target and span name constants for filtering `tracing` output per subsystem
//! - [`PerfSpan`], an RAII guard that brackets an operation in a span
//! - Convenience macros with a consistent target
//!
//! # Tracing Integration
//!
//! Horizon Sections uses the `tracing` crate for instrumentation. The library
//! never installs a subscriber; to see logs, install one in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_sections=debug")
//!     .init();
//! ```

/// Span names used throughout Horizon Sections for tracing.
pub mod span_names {
    /// A section controller vending a cell or supplementary view.
    pub const VEND: &str = "horizon_sections::vend";
    /// Applying a batch of object updates.
    pub const UPDATE: &str = "horizon_sections::update";
    /// Resolving an interactive move gesture.
    pub const INTERACTIVE_MOVE: &str = "horizon_sections::interactive_move";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal emission.
    pub const SIGNAL: &str = "horizon_sections_core::signal";
    /// Contract assertion reports.
    pub const ASSERTION: &str = "horizon_sections_core::assertion";
    /// Adapter dispatch target.
    pub const ADAPTER: &str = "horizon_sections::adapter";
    /// Section map bookkeeping.
    pub const SECTION_MAP: &str = "horizon_sections::section_map";
    /// Display lifecycle and view association.
    pub const DISPLAY: &str = "horizon_sections::display";
    /// Interactive reordering.
    pub const MOVE: &str = "horizon_sections::move";
    /// Object updates and diffing.
    pub const UPDATE: &str = "horizon_sections::update";
    /// Performance spans.
    pub const PERF: &str = "horizon_sections::perf";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// This is useful for tracking the duration of operations.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: targets::PERF, "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

/// Macros for common tracing patterns.
///
/// These are thin wrappers around the `tracing` macros. The first form logs
/// under the adapter target; `target: ...` overrides it.
#[macro_export]
macro_rules! sections_trace {
    (target: $target:expr, $($arg:tt)*) => {
        tracing::trace!(target: $target, $($arg)*)
    };
    ($($arg:tt)*) => {
        tracing::trace!(target: "horizon_sections::adapter", $($arg)*)
    };
}

#[macro_export]
macro_rules! sections_debug {
    (target: $target:expr, $($arg:tt)*) => {
        tracing::debug!(target: $target, $($arg)*)
    };
    ($($arg:tt)*) => {
        tracing::debug!(target: "horizon_sections::adapter", $($arg)*)
    };
}

#[macro_export]
macro_rules! sections_info {
    (target: $target:expr, $($arg:tt)*) => {
        tracing::info!(target: $target, $($arg)*)
    };
    ($($arg:tt)*) => {
        tracing::info!(target: "horizon_sections::adapter", $($arg)*)
    };
}

#[macro_export]
macro_rules! sections_warn {
    (target: $target:expr, $($arg:tt)*) => {
        tracing::warn!(target: $target, $($arg)*)
    };
    ($($arg:tt)*) => {
        tracing::warn!(target: "horizon_sections::adapter", $($arg)*)
    };
}

#[macro_export]
macro_rules! sections_error {
    (target: $target:expr, $($arg:tt)*) => {
        tracing::error!(target: $target, $($arg)*)
    };
    ($($arg:tt)*) => {
        tracing::error!(target: "horizon_sections::adapter", $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perf_span() {
        // Just ensure it compiles and doesn't panic without a subscriber
        let _span = PerfSpan::new(span_names::VEND);
    }

    #[test]
    fn test_macros_with_subscriber() {
        let subscriber = tracing_subscriber::fmt().with_test_writer().finish();
        tracing::subscriber::with_default(subscriber, || {
            sections_debug!("plain message {}", 1);
            sections_warn!(target: targets::MOVE, section = 2, "targeted message");
            let _span = PerfSpan::new(span_names::UPDATE);
            sections_trace!(target: targets::UPDATE, "inside span");
        });
    }

    #[test]
    fn test_perf_span_uses_perf_target() {
        let subscriber = tracing_subscriber::fmt().with_test_writer().finish();
        tracing::subscriber::with_default(subscriber, || {
            let _span = PerfSpan::new(span_names::VEND);
            let target = tracing::Span::current().metadata().map(|meta| meta.target());
            assert_eq!(target, Some(targets::PERF));
        });
    }
}
