#![forbid(unsafe_code)]

//! Subscriber storage shared by [`Subject`](crate::Subject) and
//! [`Observable`](crate::Observable).
//!
//! Each registered callback lives in a strong `Rc<Slot>` owned by the
//! subscription's [`AnyCancellable`]; the producer only keeps `Weak`
//! references. Cancelling clears the slot's `active` flag and releases the
//! strong reference, so a callback never runs after its cancellation, even
//! if it was collected for a delivery already in progress.

use std::cell::Cell;
use std::rc::{Rc, Weak};

use crate::cancel::{AnyCancellable, Cancellable, WeakCancel};

/// A subscriber callback as stored by producers.
pub type Subscriber<T> = Rc<dyn Fn(&T)>;

pub(crate) struct Slot<T> {
    active: Cell<bool>,
    token: WeakCancel,
    callback: Subscriber<T>,
}

impl<T> Slot<T> {
    fn deliver(&self, value: &T) {
        if self.active.get() {
            (self.callback)(value);
        }
    }

    /// Cancel the subscription that registered this slot.
    pub(crate) fn cancel(&self) {
        self.active.set(false);
        if let Some(handle) = self.token.upgrade() {
            handle.cancel();
        }
    }
}

pub(crate) struct SubscriberList<T> {
    slots: Vec<Weak<Slot<T>>>,
}

impl<T> SubscriberList<T> {
    pub(crate) const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Prune released slots and return strong references to the live ones,
    /// in registration order.
    pub(crate) fn live(&mut self) -> Vec<Rc<Slot<T>>> {
        self.slots.retain(|slot| slot.strong_count() > 0);
        self.slots.iter().filter_map(Weak::upgrade).collect()
    }

    /// Registered slots, including released ones not yet pruned.
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
    }
}

impl<T: 'static> SubscriberList<T> {
    pub(crate) fn register(&mut self, callback: Subscriber<T>) -> AnyCancellable {
        let token = AnyCancellable::empty();
        let slot = Rc::new(Slot {
            active: Cell::new(true),
            token: token.downgrade(),
            callback,
        });
        self.slots.push(Rc::downgrade(&slot));
        token.handle().add_teardown(move || {
            slot.active.set(false);
            drop(slot);
        });
        token
    }
}

/// Call every slot with `value`. Must be called with no producer borrow held.
pub(crate) fn deliver_all<T>(slots: &[Rc<Slot<T>>], value: &T) {
    for slot in slots {
        slot.deliver(value);
    }
}

/// Cancel every slot's subscription. Must be called with no producer borrow
/// held.
pub(crate) fn cancel_all<T>(slots: &[Rc<Slot<T>>]) {
    for slot in slots {
        slot.cancel();
    }
}
