#![forbid(unsafe_code)]

//! Lifetime-bound binding sink.
//!
//! # Design
//!
//! A [`BindingSink<O, T>`] pairs a `Weak<O>` with a mutation
//! `Fn(&O, &T)`. At construction it places a cancellation token in the
//! owner's [`Bindings`](crate::Bindings); [`bind`](BindingSink::bind) hangs
//! the upstream subscription off that token. When the owner drops, its
//! bindings drop, the token cancels, and the upstream subscription is
//! released.
//!
//! The sink itself holds the owner and the token only weakly, so a
//! subscription never keeps its own owner alive.
//!
//! # Invariants
//!
//! 1. The mutation never runs after the owner has been dropped.
//! 2. The mutation never runs after the binding has been cancelled.
//! 3. Values are applied synchronously, in delivery order.
//! 4. Late values are dropped silently; they are not errors.
//! 5. A sink dropped without being bound cancels its token, so it never
//!    counts as an active binding.
//! 6. A binding ends when its producer completes.

use std::fmt;
use std::rc::{Rc, Weak};

use tracing::trace;

use crate::bindings::BindingOwner;
use crate::cancel::{AnyCancellable, Cancellable, SubscriptionHandle, WeakCancel};
use crate::publisher::Publisher;

/// Subscriber that applies values to a weakly held owner.
pub struct BindingSink<O, T> {
    owner: Weak<O>,
    mutate: Rc<dyn Fn(&O, &T)>,
    token: WeakCancel,
    trace_drops: bool,
}

impl<O: BindingOwner, T: 'static> BindingSink<O, T> {
    /// Create a sink that applies `mutate(&owner, &value)` and register its
    /// cancellation token with `owner`.
    pub fn new(owner: &Rc<O>, mutate: impl Fn(&O, &T) + 'static) -> Self {
        let token = AnyCancellable::empty();
        let weak_token = token.downgrade();
        let bindings = owner.bindings();
        let trace_drops = bindings.config().trace_dropped_values;
        bindings.insert(token);
        Self {
            owner: Rc::downgrade(owner),
            mutate: Rc::new(mutate),
            token: weak_token,
            trace_drops,
        }
    }

    /// Apply `value` to the owner. Returns `false` if the value was dropped
    /// because the owner is gone or the binding was cancelled.
    pub fn receive(&self, value: &T) -> bool {
        if self.token.is_cancelled() {
            self.dropped("binding cancelled");
            return false;
        }
        let Some(owner) = self.owner.upgrade() else {
            self.dropped("owner released");
            return false;
        };
        (self.mutate)(&owner, value);
        true
    }

    /// Whether values would currently be applied.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.token.is_cancelled() && self.owner.strong_count() > 0
    }

    /// Handle for ending this binding early. Already cancelled if the owner
    /// is gone.
    #[must_use]
    pub fn handle(&self) -> SubscriptionHandle {
        self.token
            .upgrade()
            .unwrap_or_else(SubscriptionHandle::cancelled)
    }

    /// Subscribe this sink to `publisher`.
    ///
    /// The binding ends when the returned handle is cancelled, when the owner
    /// drops, or when the producer completes, whichever comes first. Binding
    /// a sink whose owner is already gone subscribes nothing.
    pub fn bind<P>(self, publisher: &P) -> SubscriptionHandle
    where
        P: Publisher<Output = T> + ?Sized,
    {
        let handle = self.handle();
        if !self.is_active() {
            self.dropped("bind after teardown");
            return handle;
        }
        let downstream = self.token.clone();
        let upstream = publisher.receive_subscriber(Rc::new(move |value: &T| {
            self.receive(value);
        }));
        // A finished producer ends the binding too.
        upstream.handle().add_teardown(move || {
            if let Some(binding) = downstream.upgrade() {
                binding.cancel();
            }
        });
        handle.add_teardown(move || drop(upstream));
        handle
    }

    fn dropped(&self, reason: &'static str) {
        if self.trace_drops {
            trace!(reason, "binding sink dropped value");
        }
    }
}

impl<O, T> Drop for BindingSink<O, T> {
    /// A sink dropped before it was bound releases its slot in the owner's
    /// bindings. A bound sink is only dropped once its binding has ended.
    fn drop(&mut self) {
        if let Some(handle) = self.token.upgrade() {
            handle.cancel();
        }
    }
}

impl<O, T> fmt::Debug for BindingSink<O, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingSink")
            .field("owner_alive", &(self.owner.strong_count() > 0))
            .field("cancelled", &self.token.is_cancelled())
            .finish()
    }
}
