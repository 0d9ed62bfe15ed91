#![forbid(unsafe_code)]

//! Cancellation tokens for active subscriptions.
//!
//! # Design
//!
//! Every subscription is represented by a shared [`CancelState`]: a flag
//! plus a list of teardown closures. Two handle types point at it:
//!
//! - [`AnyCancellable`]: the *owning* token. Dropping it cancels.
//! - [`SubscriptionHandle`]: a cloneable, non-owning handle. Dropping it does
//!   nothing; calling [`Cancellable::cancel`] on it cancels.
//!
//! # Invariants
//!
//! 1. Cancellation is idempotent: teardowns run exactly once, on the first
//!    `cancel()`.
//! 2. A teardown added after cancellation runs immediately.
//! 3. No `RefCell` borrow is held while teardowns run, so a teardown may
//!    cancel or extend other subscriptions.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::bindings::Bindings;

type Teardown = Box<dyn FnOnce()>;

/// Shared state behind every cancellation handle.
pub(crate) struct CancelState {
    cancelled: Cell<bool>,
    teardowns: RefCell<Vec<Teardown>>,
}

impl CancelState {
    fn new() -> Rc<Self> {
        Rc::new(Self {
            cancelled: Cell::new(false),
            teardowns: RefCell::new(Vec::new()),
        })
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }

    fn cancel(&self) {
        if self.cancelled.replace(true) {
            return;
        }
        // Take the list out first so teardowns run without a live borrow.
        let teardowns = std::mem::take(&mut *self.teardowns.borrow_mut());
        for teardown in teardowns {
            teardown();
        }
    }

    fn add_teardown(&self, teardown: Teardown) {
        if self.cancelled.get() {
            teardown();
            return;
        }
        self.teardowns.borrow_mut().push(teardown);
    }
}

/// Anything that can terminate a subscription.
pub trait Cancellable {
    /// Terminate the subscription. Calling this more than once is a no-op.
    fn cancel(&self);

    /// Whether [`cancel`](Cancellable::cancel) has run.
    fn is_cancelled(&self) -> bool;
}

/// Owning cancellation token.
///
/// Dropping an `AnyCancellable` cancels the subscription it represents. Keep
/// it alive for as long as the subscription should run, usually by moving it
/// into a [`Bindings`] with [`store_in`](AnyCancellable::store_in).
#[must_use = "dropping an AnyCancellable cancels the subscription immediately"]
pub struct AnyCancellable {
    state: Rc<CancelState>,
}

impl AnyCancellable {
    /// Create a token that runs `teardown` when cancelled.
    pub fn new(teardown: impl FnOnce() + 'static) -> Self {
        let token = Self::empty();
        token.state.add_teardown(Box::new(teardown));
        token
    }

    /// Create a token with no teardown attached yet.
    pub fn empty() -> Self {
        Self {
            state: CancelState::new(),
        }
    }

    /// A non-owning handle to the same subscription.
    #[must_use]
    pub fn handle(&self) -> SubscriptionHandle {
        SubscriptionHandle {
            state: Rc::clone(&self.state),
        }
    }

    /// Move this token into `bindings`, tying the subscription to the
    /// lifetime of whatever owns that collection.
    pub fn store_in(self, bindings: &Bindings) -> SubscriptionHandle {
        bindings.insert(self)
    }

    pub(crate) fn downgrade(&self) -> WeakCancel {
        WeakCancel(Rc::downgrade(&self.state))
    }
}

impl Cancellable for AnyCancellable {
    fn cancel(&self) {
        self.state.cancel();
    }

    fn is_cancelled(&self) -> bool {
        self.state.is_cancelled()
    }
}

impl Drop for AnyCancellable {
    fn drop(&mut self) {
        self.state.cancel();
    }
}

impl fmt::Debug for AnyCancellable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyCancellable")
            .field("cancelled", &self.state.is_cancelled())
            .finish()
    }
}

/// Non-owning, cloneable handle to a subscription.
///
/// Returned by binding operations so callers can end a binding early.
/// Dropping the handle leaves the subscription running.
#[derive(Clone)]
pub struct SubscriptionHandle {
    state: Rc<CancelState>,
}

impl SubscriptionHandle {
    /// A handle that is already cancelled.
    #[must_use]
    pub fn cancelled() -> Self {
        let state = CancelState::new();
        state.cancel();
        Self { state }
    }

    /// Run `teardown` when this subscription is cancelled (immediately if it
    /// already is).
    pub fn add_teardown(&self, teardown: impl FnOnce() + 'static) {
        self.state.add_teardown(Box::new(teardown));
    }

    /// Whether both handles refer to the same subscription.
    #[must_use]
    pub fn same_subscription(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl Cancellable for SubscriptionHandle {
    fn cancel(&self) {
        self.state.cancel();
    }

    fn is_cancelled(&self) -> bool {
        self.state.is_cancelled()
    }
}

impl fmt::Debug for SubscriptionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionHandle")
            .field("cancelled", &self.state.is_cancelled())
            .finish()
    }
}

/// Weak view of a subscription's state, used by sinks so they do not keep
/// their own token alive.
#[derive(Clone)]
pub(crate) struct WeakCancel(Weak<CancelState>);

impl WeakCancel {
    /// A released state counts as cancelled.
    pub(crate) fn is_cancelled(&self) -> bool {
        self.0.upgrade().is_none_or(|state| state.is_cancelled())
    }

    pub(crate) fn upgrade(&self) -> Option<SubscriptionHandle> {
        self.0.upgrade().map(|state| SubscriptionHandle { state })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter() -> (Rc<Cell<u32>>, impl FnOnce() + 'static) {
        let count = Rc::new(Cell::new(0));
        let count_clone = Rc::clone(&count);
        (count, move || count_clone.set(count_clone.get() + 1))
    }

    #[test]
    fn cancel_runs_teardown_once() {
        let (count, teardown) = counter();
        let token = AnyCancellable::new(teardown);
        assert!(!token.is_cancelled());

        token.cancel();
        token.cancel();
        assert!(token.is_cancelled());
        assert_eq!(count.get(), 1);

        drop(token);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn drop_cancels() {
        let (count, teardown) = counter();
        let token = AnyCancellable::new(teardown);
        let handle = token.handle();

        drop(token);
        assert!(handle.is_cancelled());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn dropping_handle_does_not_cancel() {
        let (count, teardown) = counter();
        let token = AnyCancellable::new(teardown);
        drop(token.handle());
        assert!(!token.is_cancelled());
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn handle_cancel_is_idempotent() {
        let (count, teardown) = counter();
        let token = AnyCancellable::new(teardown);
        let handle = token.handle();

        handle.cancel();
        handle.clone().cancel();
        token.cancel();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn teardown_added_after_cancel_runs_immediately() {
        let handle = SubscriptionHandle::cancelled();
        let (count, teardown) = counter();
        handle.add_teardown(teardown);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn teardowns_run_in_insertion_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let token = AnyCancellable::empty();
        for tag in ['A', 'B', 'C'] {
            let log = Rc::clone(&log);
            token.handle().add_teardown(move || log.borrow_mut().push(tag));
        }
        token.cancel();
        assert_eq!(*log.borrow(), vec!['A', 'B', 'C']);
    }

    #[test]
    fn teardown_may_extend_same_subscription() {
        let token = AnyCancellable::empty();
        let handle = token.handle();
        let (count, teardown) = counter();
        let inner = handle.clone();
        handle.add_teardown(move || inner.add_teardown(teardown));

        token.cancel();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn weak_cancel_treats_released_state_as_cancelled() {
        let token = AnyCancellable::empty();
        let weak = token.downgrade();
        assert!(!weak.is_cancelled());
        drop(token);
        assert!(weak.is_cancelled());
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn same_subscription_identity() {
        let a = AnyCancellable::empty();
        let b = AnyCancellable::empty();
        assert!(a.handle().same_subscription(&a.handle()));
        assert!(!a.handle().same_subscription(&b.handle()));
    }

    #[test]
    fn debug_format() {
        let token = AnyCancellable::empty();
        assert!(format!("{token:?}").contains("cancelled: false"));
        token.cancel();
        assert!(format!("{:?}", token.handle()).contains("cancelled: true"));
    }
}
