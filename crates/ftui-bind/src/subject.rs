#![forbid(unsafe_code)]

//! Passthrough event source.
//!
//! [`Subject<T>`] forwards every value passed to [`send`](Subject::send) to
//! its current subscribers. It keeps no value of its own; subscribers only
//! see values sent after they registered. Widgets use subjects for user
//! events (taps, edits, toggles).
//!
//! # Invariants
//!
//! 1. Subscribers are called in registration order.
//! 2. A subscriber cancelled during a delivery is not called for the rest of
//!    that delivery.
//! 3. After [`complete`](Subject::complete), `send` is a no-op, every
//!    existing subscription is cancelled, and new subscriptions are returned
//!    already cancelled.
//!
//! # Failure Modes
//!
//! - **Re-entrant send**: a subscriber may call `send` on the same subject.
//!   The nested value is delivered depth-first, before the outer delivery
//!   continues with the remaining subscribers.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::cancel::{AnyCancellable, Cancellable};
use crate::publisher::Publisher;
use crate::subscriber::{Subscriber, SubscriberList, cancel_all, deliver_all};

struct SubjectInner<T> {
    subscribers: SubscriberList<T>,
    completed: bool,
}

/// A shared passthrough event source.
///
/// Cloning a `Subject` creates a new handle to the **same** subscriber list.
pub struct Subject<T> {
    inner: Rc<RefCell<SubjectInner<T>>>,
}

impl<T> Clone for Subject<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: 'static> Default for Subject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Subject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Subject")
            .field("subscriber_count", &inner.subscribers.len())
            .field("completed", &inner.completed)
            .finish()
    }
}

impl<T: 'static> Subject<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(SubjectInner {
                subscribers: SubscriberList::new(),
                completed: false,
            })),
        }
    }

    /// Deliver `value` to every live subscriber.
    pub fn send(&self, value: T) {
        let slots = {
            let mut inner = self.inner.borrow_mut();
            if inner.completed {
                return;
            }
            inner.subscribers.live()
        };
        deliver_all(&slots, &value);
    }

    /// Stop the subject. Every current subscription is cancelled, including
    /// bindings fed by it, and later values are ignored.
    pub fn complete(&self) {
        let slots = {
            let mut inner = self.inner.borrow_mut();
            if inner.completed {
                return;
            }
            inner.completed = true;
            let slots = inner.subscribers.live();
            inner.subscribers.clear();
            slots
        };
        debug!(released = slots.len(), "subject completed");
        cancel_all(&slots);
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.inner.borrow().completed
    }

    /// Number of registered subscribers (including cancelled ones not yet
    /// pruned by a `send`).
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}

impl<T: 'static> Publisher for Subject<T> {
    type Output = T;

    fn receive_subscriber(&self, subscriber: Subscriber<T>) -> AnyCancellable {
        let mut inner = self.inner.borrow_mut();
        if inner.completed {
            let token = AnyCancellable::empty();
            token.cancel();
            return token;
        }
        inner.subscribers.register(subscriber)
    }
}
