//! Signal/slot notifications for Horizon Sections.
//!
//! A [`Signal`] holds any number of slots and calls each of them, in the
//! order they were connected, when it is emitted. Like the adapter that owns
//! it, a signal belongs to one thread: slots are plain `Fn` closures and are
//! invoked synchronously on the emitting call.
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use horizon_sections_core::Signal;
//!
//! let section_moved = Signal::<(usize, usize)>::new();
//! let moves = Rc::new(RefCell::new(Vec::new()));
//!
//! let sink = moves.clone();
//! let id = section_moved.connect(move |&(from, to)| sink.borrow_mut().push((from, to)));
//!
//! section_moved.emit((0, 2));
//! section_moved.disconnect(id);
//! section_moved.emit((2, 0));
//! assert_eq!(*moves.borrow(), vec![(0, 2)]);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use slotmap::{new_key_type, SlotMap};

use crate::logging::targets;

new_key_type! {
    /// Identifies one connection; pass it to [`Signal::disconnect`].
    pub struct ConnectionId;
}

type Slot<Args> = Rc<dyn Fn(&Args)>;

struct Slots<Args> {
    by_id: SlotMap<ConnectionId, Slot<Args>>,
    /// Connection order. Slot map iteration order changes once keys are
    /// recycled, so emission walks this instead.
    order: Vec<ConnectionId>,
}

/// A single-threaded notification with any number of connected slots.
///
/// `Args` is passed by reference to every slot. Use a tuple for several
/// values.
pub struct Signal<Args> {
    slots: RefCell<Slots<Args>>,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args> std::fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.slots.try_borrow().map(|s| s.order.len()).ok())
            .finish()
    }
}

impl<Args: 'static> Signal<Args> {
    pub fn new() -> Self {
        Self {
            slots: RefCell::new(Slots {
                by_id: SlotMap::with_key(),
                order: Vec::new(),
            }),
        }
    }

    /// Connects `slot`, which runs after every slot connected before it.
    pub fn connect(&self, slot: impl Fn(&Args) + 'static) -> ConnectionId {
        let mut slots = self.slots.borrow_mut();
        let id = slots.by_id.insert(Rc::new(slot));
        slots.order.push(id);
        id
    }

    /// Removes a connection. Returns `false` if it was already gone.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        let mut slots = self.slots.borrow_mut();
        if slots.by_id.remove(id).is_none() {
            return false;
        }
        slots.order.retain(|connected| *connected != id);
        true
    }

    pub fn connection_count(&self) -> usize {
        self.slots.borrow().order.len()
    }

    /// Calls every connected slot with `args`.
    ///
    /// Slots are collected before the first call, so a slot may connect or
    /// disconnect on this signal; the change applies from the next emission.
    pub fn emit(&self, args: Args) {
        let snapshot: Vec<Slot<Args>> = {
            let slots = self.slots.borrow();
            slots
                .order
                .iter()
                .filter_map(|id| slots.by_id.get(*id).cloned())
                .collect()
        };
        tracing::trace!(target: targets::SIGNAL, slots = snapshot.len(), "emitting signal");

        for slot in snapshot {
            slot(&args);
        }
    }
}
