#![forbid(unsafe_code)]

//! Namespacing wrapper for reactive extensions.
//!
//! A type opts in by implementing the [`ReactiveCompatible`] marker. Any
//! `Rc<T>` of such a type then exposes `.rx()`, returning a
//! [`Reactive<'_, T>`] on which extension traits hang their accessors:
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use ftui_bind::{
//!     AsReactive, BindingOwner, BindingSink, Bindings, Reactive, ReactiveCompatible, Subject,
//! };
//!
//! struct Lamp {
//!     lit: Cell<bool>,
//!     bindings: Bindings,
//! }
//!
//! impl BindingOwner for Lamp {
//!     fn bindings(&self) -> &Bindings {
//!         &self.bindings
//!     }
//! }
//!
//! impl ReactiveCompatible for Lamp {}
//!
//! trait LampReactive {
//!     fn lit(&self) -> BindingSink<Lamp, bool>;
//! }
//!
//! impl LampReactive for Reactive<'_, Lamp> {
//!     fn lit(&self) -> BindingSink<Lamp, bool> {
//!         self.sink(|lamp, on| lamp.lit.set(*on))
//!     }
//! }
//!
//! let lamp = Rc::new(Lamp { lit: Cell::new(false), bindings: Bindings::new() });
//! let power = Subject::new();
//! let _ = lamp.rx().lit() << &power;
//! power.send(true);
//! assert!(lamp.lit.get());
//! ```
//!
//! The wrapper only borrows the `Rc`; constructing it costs nothing.

use std::rc::Rc;

use crate::bindings::BindingOwner;
use crate::sink::BindingSink;

/// Marker for types that expose reactive extensions through `.rx()`.
pub trait ReactiveCompatible: 'static {}

/// Borrowed wrapper that namespaces reactive accessors for `Base`.
pub struct Reactive<'a, Base> {
    base: &'a Rc<Base>,
}

impl<Base> Clone for Reactive<'_, Base> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Base> Copy for Reactive<'_, Base> {}

impl<'a, Base> Reactive<'a, Base> {
    #[must_use]
    pub const fn new(base: &'a Rc<Base>) -> Self {
        Self { base }
    }

    /// The wrapped object.
    #[must_use]
    pub const fn base(&self) -> &'a Rc<Base> {
        self.base
    }
}

impl<Base: BindingOwner> Reactive<'_, Base> {
    /// A sink that applies `mutate` to the wrapped object. The building block
    /// for property accessors.
    pub fn sink<T: 'static>(&self, mutate: impl Fn(&Base, &T) + 'static) -> BindingSink<Base, T> {
        BindingSink::new(self.base, mutate)
    }
}

/// Provides `.rx()` on `Rc<T>` for every [`ReactiveCompatible`] `T`.
pub trait AsReactive<Base> {
    fn rx(&self) -> Reactive<'_, Base>;
}

impl<Base: ReactiveCompatible> AsReactive<Base> for Rc<Base> {
    fn rx(&self) -> Reactive<'_, Base> {
        Reactive::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::Bindings;
    use crate::publisher::PublisherExt;
    use crate::subject::Subject;
    use std::cell::Cell;

    struct Counter {
        value: Cell<i64>,
        bindings: Bindings,
    }

    impl BindingOwner for Counter {
        fn bindings(&self) -> &Bindings {
            &self.bindings
        }
    }

    impl ReactiveCompatible for Counter {}

    trait CounterReactive {
        fn value(&self) -> BindingSink<Counter, i64>;
    }

    impl CounterReactive for Reactive<'_, Counter> {
        fn value(&self) -> BindingSink<Counter, i64> {
            self.sink(|counter, v| counter.value.set(*v))
        }
    }

    fn counter() -> Rc<Counter> {
        Rc::new(Counter {
            value: Cell::new(0),
            bindings: Bindings::new(),
        })
    }

    #[test]
    fn rx_wraps_same_instance() {
        let c = counter();
        assert!(Rc::ptr_eq(c.rx().base(), &c));
    }

    #[test]
    fn extension_accessor_binds() {
        let c = counter();
        let source = Subject::new();
        source.bind_to(c.rx().value());

        source.send(12);
        assert_eq!(c.value.get(), 12);
    }

    #[test]
    fn wrapper_is_copy() {
        let c = counter();
        let rx = c.rx();
        let copy = rx;
        assert!(Rc::ptr_eq(rx.base(), copy.base()));
    }

    #[test]
    fn rx_does_not_extend_lifetime() {
        let c = counter();
        let weak = Rc::downgrade(&c);
        let sink = c.rx().value();
        drop(c);
        assert!(weak.upgrade().is_none());
        assert!(!sink.is_active());
    }
}
