//! Reentrancy flags scoped to one adapter instance.

use std::cell::Cell;

/// Transient flags checked at the adapter's entry points.
#[derive(Debug, Default)]
pub(crate) struct AdapterState {
    in_update: Cell<bool>,
    dequeuing: Cell<bool>,
    loaded: Cell<bool>,
}

impl AdapterState {
    /// Sets the object-update flag until the guard is dropped.
    pub(crate) fn enter_update(&self) -> FlagGuard<'_> {
        FlagGuard::raise(&self.in_update)
    }

    /// Sets the dequeuing flag until the guard is dropped.
    pub(crate) fn enter_dequeue(&self) -> FlagGuard<'_> {
        FlagGuard::raise(&self.dequeuing)
    }

    pub(crate) fn in_update(&self) -> bool {
        self.in_update.get()
    }

    pub(crate) fn is_dequeuing(&self) -> bool {
        self.dequeuing.get()
    }

    /// Whether the grid has received its first full load.
    pub(crate) fn is_loaded(&self) -> bool {
        self.loaded.get()
    }

    pub(crate) fn mark_loaded(&self) {
        self.loaded.set(true);
    }
}

/// Restores a flag to its previous value when dropped, including on unwind.
pub(crate) struct FlagGuard<'a> {
    flag: &'a Cell<bool>,
    previous: bool,
}

impl<'a> FlagGuard<'a> {
    fn raise(flag: &'a Cell<bool>) -> Self {
        let previous = flag.replace(true);
        Self { flag, previous }
    }
}

impl Drop for FlagGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(self.previous);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_restores_flag() {
        let state = AdapterState::default();
        {
            let _update = state.enter_update();
            assert!(state.in_update());
            assert!(!state.is_dequeuing());
        }
        assert!(!state.in_update());
    }

    #[test]
    fn test_nested_guard_keeps_outer_value() {
        let state = AdapterState::default();
        let outer = state.enter_dequeue();
        {
            let _inner = state.enter_dequeue();
        }
        assert!(state.is_dequeuing());
        drop(outer);
        assert!(!state.is_dequeuing());
    }

    #[test]
    fn test_guard_restores_on_unwind() {
        let state = AdapterState::default();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _update = state.enter_update();
            panic!("controller failed");
        }));
        assert!(result.is_err());
        assert!(!state.in_update());
    }
}
