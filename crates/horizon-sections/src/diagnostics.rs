//! Crash diagnostics for fatal vend failures.

use horizon_sections_core::logging::targets;
use horizon_sections_core::sections_error;

/// Attaches context before a fatal integration error is surfaced.
///
/// Called when a section controller returns no view for an item, before the
/// adapter returns [`AdapterError::MissingCell`](crate::AdapterError::MissingCell).
pub trait CrashDiagnostics {
    fn record_nil_cell(&self, grid_description: &str, controller_type: &'static str);
}

/// Default diagnostics: an error-level log entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDiagnostics;

impl CrashDiagnostics for LogDiagnostics {
    fn record_nil_cell(&self, grid_description: &str, controller_type: &'static str) {
        sections_error!(
            target: targets::ADAPTER,
            grid = grid_description,
            controller = controller_type,
            "section controller returned no cell"
        );
    }
}
