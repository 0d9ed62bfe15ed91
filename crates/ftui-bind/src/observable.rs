#![forbid(unsafe_code)]

//! Observable value wrapper with change notification and version tracking.
//!
//! # Design
//!
//! [`Observable<T>`] wraps a value of type `T` in shared, reference-counted
//! storage (`Rc<RefCell<..>>`). When the value changes (determined by
//! `PartialEq`), all live subscribers are notified in registration order.
//!
//! As a [`Publisher`], an observable replays its current value to each new
//! subscriber before forwarding changes, so a freshly bound property starts
//! out in sync with its model.
//!
//! # Performance
//!
//! | Operation    | Complexity               |
//! |-------------|--------------------------|
//! | `get()`     | O(1)                     |
//! | `set()`     | O(S) where S = subscribers |
//! | `subscribe()` | O(1) amortized          |
//!
//! # Failure Modes
//!
//! - **Re-entrant set**: Calling `set()` from within a subscriber callback is
//!   allowed; no borrow is held while callbacks run. The nested change is
//!   delivered before the outer notification finishes.
//! - **Subscriber leak**: If tokens are stored indefinitely without being
//!   cancelled, callbacks accumulate. Released subscribers are pruned lazily
//!   during notification.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::cancel::AnyCancellable;
use crate::publisher::Publisher;
use crate::subscriber::{Subscriber, SubscriberList, deliver_all};

/// Shared interior for [`Observable<T>`].
struct ObservableInner<T> {
    value: T,
    version: u64,
    subscribers: SubscriberList<T>,
}

/// A shared, version-tracked value with change notification.
///
/// Cloning an `Observable` creates a new handle to the **same** inner state:
/// both handles see the same value and share subscribers.
///
/// # Invariants
///
/// 1. `version` increments by exactly 1 on each value-changing mutation.
/// 2. `set(v)` where `v == current` is a no-op.
/// 3. Subscribers are notified in registration order.
pub struct Observable<T> {
    inner: Rc<RefCell<ObservableInner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("subscriber_count", &inner.subscribers.len())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Create a new observable with the given initial value.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ObservableInner {
                value,
                version: 0,
                subscribers: SubscriberList::new(),
            })),
        }
    }

    /// Get a clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Access the current value by reference without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Set a new value. If it differs from the current value, the version is
    /// incremented and all live subscribers are notified.
    pub fn set(&self, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return;
            }
            inner.value = value;
            inner.version += 1;
        }
        self.notify();
    }

    /// Modify the value in place via a closure. Subscribers are notified only
    /// if the value actually changed.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let changed = {
            let mut inner = self.inner.borrow_mut();
            let old = inner.value.clone();
            f(&mut inner.value);
            if inner.value != old {
                inner.version += 1;
                true
            } else {
                false
            }
        };
        if changed {
            self.notify();
        }
    }

    /// Subscribe to future changes only. Unlike the [`Publisher`] impl, the
    /// current value is not replayed.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> AnyCancellable {
        self.inner
            .borrow_mut()
            .subscribers
            .register(Rc::new(callback))
    }

    /// Current version number. Useful for dirty-checking in render loops.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Number of registered subscribers (including released ones not yet
    /// pruned).
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    fn notify(&self) {
        let (slots, value) = {
            let mut inner = self.inner.borrow_mut();
            let slots = inner.subscribers.live();
            (slots, inner.value.clone())
        };
        deliver_all(&slots, &value);
    }
}

impl<T: Clone + PartialEq + 'static> Publisher for Observable<T> {
    type Output = T;

    fn receive_subscriber(&self, subscriber: Subscriber<T>) -> AnyCancellable {
        let current = self.get();
        subscriber(&current);
        self.inner.borrow_mut().subscribers.register(subscriber)
    }
}
