//! Owner-thread checks for the adapter.
//!
//! The adapter and everything it talks to (section controllers, the host
//! grid, delegate hooks) live on the one thread that owns the view
//! hierarchy. Nothing is locked, so a call from another thread is a bug.
//! [`ThreadAffinity`] remembers the owner; [`check`](ThreadAffinity::check)
//! reports a foreign thread as [`SectionsError::WrongThread`], and adapter
//! entry points turn that into a panic in debug builds.
//!
//! ```
//! use horizon_sections_core::thread_check::ThreadAffinity;
//!
//! struct Counter {
//!     affinity: ThreadAffinity,
//!     value: std::cell::Cell<i32>,
//! }
//!
//! impl Counter {
//!     fn bump(&self) {
//!         self.affinity.debug_assert_same_thread();
//!         self.value.set(self.value.get() + 1);
//!     }
//! }
//!
//! let counter = Counter { affinity: ThreadAffinity::current(), value: Default::default() };
//! counter.bump();
//! assert_eq!(counter.value.get(), 1);
//! ```

use std::thread::{self, ThreadId};

use crate::error::{Result, SectionsError};

/// The thread an adapter was created on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadAffinity {
    owner: ThreadId,
}

impl ThreadAffinity {
    /// Binds to the calling thread.
    #[inline]
    pub fn current() -> Self {
        Self {
            owner: thread::current().id(),
        }
    }

    /// The owning thread.
    #[inline]
    pub fn owner(&self) -> ThreadId {
        self.owner
    }

    /// `Ok` on the owning thread, [`SectionsError::WrongThread`] elsewhere.
    pub fn check(&self) -> Result<()> {
        let current = thread::current().id();
        if current == self.owner {
            Ok(())
        } else {
            Err(SectionsError::WrongThread {
                owner: self.owner,
                current,
            })
        }
    }

    /// Panics off the owning thread in debug builds. Compiles to nothing in
    /// release builds.
    #[inline]
    pub fn debug_assert_same_thread(&self) {
        #[cfg(debug_assertions)]
        if let Err(err) = self.check() {
            wrong_thread(&err);
        }
    }
}

#[cold]
#[inline(never)]
#[cfg(debug_assertions)]
fn wrong_thread(err: &SectionsError) -> ! {
    let name = thread::current().name().unwrap_or("<unnamed>").to_string();
    panic!(
        "\n\
        ══════════════════════════════════════════════════════════════════════\n\
        THREAD AFFINITY VIOLATION\n\
        ══════════════════════════════════════════════════════════════════════\n\
        \n\
        Section adapter {err} (\"{name}\").\n\
        \n\
        Adapters, their section controllers, and the host grid must only be\n\
        used from the thread that owns the view hierarchy. Post the work to\n\
        that thread instead of calling in directly.\n\
        \n\
        ══════════════════════════════════════════════════════════════════════"
    )
}
