//! Contract assertions for collaborator misuse.
//!
//! Section controllers, data sources, and host views all make promises to the
//! adapter: counts are queried outside object updates, vended cells come from
//! the grid's reuse queue, sizes are finite, and so on. When one of those
//! promises is broken the adapter does not try to self-heal. It reports the
//! violation through [`contract_assert!`](crate::contract_assert) and either
//! panics or logs and continues, depending on the [`AssertionMode`].
//!
//! # Modes
//!
//! - [`AssertionMode::Panic`]: the default in debug builds. Violations abort
//!   the current operation with a descriptive panic.
//! - [`AssertionMode::Log`]: the default in release builds. Violations are
//!   logged at error level under [`targets::ASSERTION`] and the caller
//!   continues with its documented fallback.
//!
//! The process-wide mode is set with [`set_assertion_mode`]. An
//! [`AssertionModeScope`] overrides it on the current thread until dropped;
//! adapters configured with their own mode enter one around every call, so
//! one adapter's mode never leaks into another's.
//!
//! # Example
//!
//! ```
//! use horizon_sections_core::contract_assert;
//!
//! fn number_of_items(in_update: bool, count: usize) -> usize {
//!     contract_assert!(!in_update, "item count queried during an object update");
//!     count
//! }
//!
//! assert_eq!(number_of_items(false, 3), 3);
//! ```

use std::cell::Cell;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};

use parking_lot::RwLock;

use crate::logging::targets;

/// How contract violations are surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssertionMode {
    /// Panic with a descriptive message.
    Panic,
    /// Log at error level and continue.
    Log,
}

impl AssertionMode {
    /// The mode used when nothing has been configured.
    pub const fn build_default() -> Self {
        if cfg!(debug_assertions) {
            Self::Panic
        } else {
            Self::Log
        }
    }

    const fn to_raw(self) -> u8 {
        match self {
            Self::Panic => 0,
            Self::Log => 1,
        }
    }

    const fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Self::Panic,
            _ => Self::Log,
        }
    }
}

impl Default for AssertionMode {
    fn default() -> Self {
        Self::build_default()
    }
}

type ViolationHook = Box<dyn Fn(&str) + Send + Sync>;

static MODE: AtomicU8 = AtomicU8::new(AssertionMode::build_default().to_raw());
static VIOLATIONS: AtomicUsize = AtomicUsize::new(0);
static HOOK: RwLock<Option<ViolationHook>> = parking_lot::const_rwlock(None);

thread_local! {
    static SCOPED_MODE: Cell<Option<AssertionMode>> = const { Cell::new(None) };
}

/// Set how contract violations are surfaced, process-wide.
pub fn set_assertion_mode(mode: AssertionMode) {
    MODE.store(mode.to_raw(), Ordering::SeqCst);
}

/// Returns the mode in effect on this thread: the innermost
/// [`AssertionModeScope`], or the process-wide mode.
#[inline]
pub fn assertion_mode() -> AssertionMode {
    SCOPED_MODE
        .with(Cell::get)
        .unwrap_or_else(|| AssertionMode::from_raw(MODE.load(Ordering::Relaxed)))
}

/// Overrides the assertion mode on the current thread while alive.
///
/// Scopes nest; dropping one restores whatever was in effect when it was
/// entered, including during unwinding.
///
/// ```
/// use horizon_sections_core::{assertion_mode, AssertionMode, AssertionModeScope};
///
/// let outer = assertion_mode();
/// {
///     let _scope = AssertionModeScope::enter(AssertionMode::Log);
///     assert_eq!(assertion_mode(), AssertionMode::Log);
/// }
/// assert_eq!(assertion_mode(), outer);
/// ```
#[must_use = "the override ends when the scope is dropped"]
#[derive(Debug)]
pub struct AssertionModeScope {
    previous: Option<AssertionMode>,
    // Restores a thread-local, so it must drop on the thread that made it.
    _thread_bound: PhantomData<*const ()>,
}

impl AssertionModeScope {
    pub fn enter(mode: AssertionMode) -> Self {
        let previous = SCOPED_MODE.with(|scoped| scoped.replace(Some(mode)));
        Self {
            previous,
            _thread_bound: PhantomData,
        }
    }
}

impl Drop for AssertionModeScope {
    fn drop(&mut self) {
        SCOPED_MODE.with(|scoped| scoped.set(self.previous));
    }
}

/// Install a hook invoked with the message of every reported violation.
///
/// The hook runs before the panic or log, which makes it the place to attach
/// extra diagnostic context. Installing a hook replaces the previous one.
pub fn set_violation_hook<F>(hook: F)
where
    F: Fn(&str) + Send + Sync + 'static,
{
    *HOOK.write() = Some(Box::new(hook));
}

/// Remove the violation hook, if any.
pub fn clear_violation_hook() {
    *HOOK.write() = None;
}

/// Total number of violations reported since process start.
pub fn violation_count() -> usize {
    VIOLATIONS.load(Ordering::Relaxed)
}

/// Report a contract violation.
///
/// Called by [`contract_assert!`](crate::contract_assert); use the macro instead
/// of calling this directly so the location is captured.
#[cold]
#[inline(never)]
#[doc(hidden)]
pub fn report_violation(msg: &str, file: &str, line: u32) {
    VIOLATIONS.fetch_add(1, Ordering::Relaxed);

    if let Some(hook) = HOOK.read().as_ref() {
        hook(msg);
    }

    tracing::error!(target: targets::ASSERTION, file, line, "contract violation: {msg}");

    if assertion_mode() == AssertionMode::Panic {
        panic!(
            "\n\
            ══════════════════════════════════════════════════════════════════════\n\
            CONTRACT VIOLATION\n\
            ══════════════════════════════════════════════════════════════════════\n\
            \n\
            {msg}\n\
            \n\
            Location: {file}:{line}\n\
            \n\
            A section controller, data source, or host view broke a contract\n\
            the adapter relies on. Common causes:\n\
            \n\
            1. Calling back into the adapter from inside an update or vend callback\n\
            2. Backing objects whose diff identifiers are not stable or unique\n\
            3. Returning a view that was not dequeued from the grid\n\
            \n\
            ══════════════════════════════════════════════════════════════════════"
        )
    }
}

/// Assert a collaborator contract.
///
/// When the condition is false the violation is reported through
/// [`report_violation`](crate::assertion::report_violation). Whether that
/// panics depends on the current [`AssertionMode`]; in `Log` mode execution
/// continues after the macro, so callers follow it with their fallback path.
///
/// ```
/// use horizon_sections_core::contract_assert;
///
/// let section = 2;
/// let count = 5;
/// contract_assert!(section < count, "section {section} out of range ({count} sections)");
/// ```
#[macro_export]
macro_rules! contract_assert {
    ($cond:expr, $($arg:tt)+) => {
        if !($cond) {
            $crate::assertion::report_violation(&format!($($arg)+), file!(), line!());
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_default_mode_matches_build() {
        if cfg!(debug_assertions) {
            assert_eq!(AssertionMode::default(), AssertionMode::Panic);
        } else {
            assert_eq!(AssertionMode::default(), AssertionMode::Log);
        }
    }

    #[test]
    fn test_raw_round_trip() {
        for mode in [AssertionMode::Panic, AssertionMode::Log] {
            assert_eq!(AssertionMode::from_raw(mode.to_raw()), mode);
        }
    }

    #[test]
    fn test_passing_assertion_does_not_report() {
        let before = violation_count();
        contract_assert!(1 + 1 == 2, "arithmetic is broken");
        // Other tests may report concurrently, so only check we did not panic
        assert!(violation_count() >= before);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "CONTRACT VIOLATION")]
    fn test_failing_assertion_panics_in_debug() {
        let count = 0usize;
        contract_assert!(count > 0, "expected at least one item, got {count}");
    }

    #[test]
    fn test_scopes_nest_and_restore() {
        let global = assertion_mode();
        {
            let _log = AssertionModeScope::enter(AssertionMode::Log);
            {
                let _panic = AssertionModeScope::enter(AssertionMode::Panic);
                assert_eq!(assertion_mode(), AssertionMode::Panic);
            }
            assert_eq!(assertion_mode(), AssertionMode::Log);
            contract_assert!(false, "scoped-log: logged, not raised");
        }
        assert_eq!(assertion_mode(), global);
    }

    #[test]
    fn test_scope_is_restored_by_unwinding() {
        let _log = AssertionModeScope::enter(AssertionMode::Log);
        let result = std::panic::catch_unwind(|| {
            let _panic = AssertionModeScope::enter(AssertionMode::Panic);
            contract_assert!(false, "scoped-panic: section 3 missing");
        });
        assert!(result.is_err());
        assert_eq!(assertion_mode(), AssertionMode::Log);
    }

    #[test]
    #[cfg(debug_assertions)]
    fn test_hook_receives_message() {
        let received = Arc::new(Mutex::new(Vec::new()));
        let received_clone = received.clone();
        set_violation_hook(move |msg| {
            if msg.starts_with("hook-test") {
                received_clone.lock().push(msg.to_string());
            }
        });

        let result = std::panic::catch_unwind(|| {
            contract_assert!(false, "hook-test: section {} missing", 7);
        });
        clear_violation_hook();

        assert!(result.is_err());
        assert_eq!(*received.lock(), vec!["hook-test: section 7 missing".to_string()]);
    }
}
