#![forbid(unsafe_code)]

//! Per-owner binding collections.
//!
//! # Design
//!
//! A [`Bindings`] is a bag of owning [`AnyCancellable`] tokens. Owners embed
//! one as a field and expose it through [`BindingOwner`]. Because the bag
//! cancels everything it holds when dropped, a binding stored in it cannot
//! outlive the owner.
//!
//! # Invariants
//!
//! 1. Dropping a `Bindings` cancels every token it holds.
//! 2. Tokens inserted into a closed bag (one whose owner is being torn down)
//!    are cancelled immediately.
//! 3. Cancellation never runs while the internal `RefCell` is borrowed, so
//!    teardowns may insert into or clear the same bag.
//!
//! # Failure Modes
//!
//! | Mode | Condition | Behavior |
//! |------|-----------|----------|
//! | Growth | Many short-lived bindings cancelled explicitly | Compacted once `prune_threshold` entries are held |
//! | Owner cycle | A bound closure holds a strong `Rc` to its own owner | Owner never drops; use the sink's `&O` argument instead |

use std::cell::{Cell, RefCell};
use std::fmt;

use tracing::debug;

use crate::cancel::{AnyCancellable, Cancellable, SubscriptionHandle};
use crate::config::BindConfig;

/// An object whose lifetime bounds the bindings that mutate it.
///
/// Implementors hold a [`Bindings`] field and return it here. Owners are
/// shared as `Rc<Self>`; when the last `Rc` drops, the `Bindings` field drops
/// with it and every binding ends.
pub trait BindingOwner: 'static {
    fn bindings(&self) -> &Bindings;
}

/// Bag of subscriptions owned by one object.
pub struct Bindings {
    entries: RefCell<Vec<AnyCancellable>>,
    closed: Cell<bool>,
    config: BindConfig,
}

impl Default for Bindings {
    fn default() -> Self {
        Self::new()
    }
}

impl Bindings {
    /// An empty bag using the process-wide [`BindConfig::global`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(BindConfig::global())
    }

    #[must_use]
    pub fn with_config(config: BindConfig) -> Self {
        Self {
            entries: RefCell::new(Vec::new()),
            closed: Cell::new(false),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &BindConfig {
        &self.config
    }

    /// Take ownership of `token`. Returns a handle for explicit cancellation.
    pub fn insert(&self, token: AnyCancellable) -> SubscriptionHandle {
        let handle = token.handle();
        if self.closed.get() {
            drop(token);
            return handle;
        }
        let mut entries = self.entries.borrow_mut();
        if entries.len() >= self.config.prune_threshold {
            // Entries removed here are already cancelled; dropping them runs
            // no teardowns.
            entries.retain(|entry| !entry.is_cancelled());
        }
        entries.push(token);
        handle
    }

    /// Number of bindings that have not been cancelled.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|entry| !entry.is_cancelled())
            .count()
    }

    /// Number of stored tokens, including cancelled ones not yet compacted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Whether the bag has been torn down.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.get()
    }

    /// Cancel and remove every binding. The bag stays usable.
    ///
    /// Returns how many bindings were still active.
    pub fn cancel_all(&self) -> usize {
        let drained = std::mem::take(&mut *self.entries.borrow_mut());
        let active = drained.iter().filter(|entry| !entry.is_cancelled()).count();
        // Dropping cancels; the borrow above has already ended.
        drop(drained);
        active
    }
}

impl Drop for Bindings {
    fn drop(&mut self) {
        self.closed.set(true);
        let cancelled = self.cancel_all();
        if cancelled > 0 {
            debug!(cancelled, "owner released, bindings cancelled");
        }
    }
}

impl fmt::Debug for Bindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bindings")
            .field("len", &self.len())
            .field("closed", &self.closed.get())
            .finish()
    }
}
