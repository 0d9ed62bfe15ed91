#![forbid(unsafe_code)]

//! Producer abstraction and the two combinators bindings need most.
//!
//! A [`Publisher`] accepts a subscriber callback and returns the
//! [`AnyCancellable`] that keeps it registered. Delivery is synchronous: a
//! value reaches every subscriber before `send`/`set` returns.

use std::rc::Rc;

use crate::bindings::BindingOwner;
use crate::cancel::{AnyCancellable, SubscriptionHandle};
use crate::sink::BindingSink;
use crate::subscriber::Subscriber;

/// A source of values over time.
pub trait Publisher {
    type Output: 'static;

    /// Register `subscriber`. It stays registered until the returned token is
    /// cancelled or dropped.
    fn receive_subscriber(&self, subscriber: Subscriber<Self::Output>) -> AnyCancellable;
}

impl<P: Publisher + ?Sized> Publisher for &P {
    type Output = P::Output;

    fn receive_subscriber(&self, subscriber: Subscriber<Self::Output>) -> AnyCancellable {
        (**self).receive_subscriber(subscriber)
    }
}

impl<P: Publisher + ?Sized> Publisher for Rc<P> {
    type Output = P::Output;

    fn receive_subscriber(&self, subscriber: Subscriber<Self::Output>) -> AnyCancellable {
        (**self).receive_subscriber(subscriber)
    }
}

/// Convenience methods available on every [`Publisher`].
pub trait PublisherExt: Publisher {
    /// Subscribe with a plain callback.
    fn sink(&self, callback: impl Fn(&Self::Output) + 'static) -> AnyCancellable {
        self.receive_subscriber(Rc::new(callback))
    }

    /// Transform each value.
    fn map<U, F>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        F: Fn(&Self::Output) -> U + 'static,
        U: 'static,
    {
        Map {
            upstream: self,
            f: Rc::new(f),
        }
    }

    /// Forward only values for which `predicate` returns `true`.
    fn filter<F>(self, predicate: F) -> Filter<Self, F>
    where
        Self: Sized,
        F: Fn(&Self::Output) -> bool + 'static,
    {
        Filter {
            upstream: self,
            predicate: Rc::new(predicate),
        }
    }

    /// Drive `sink` from this publisher. The binding lives as long as the
    /// sink's owner.
    fn bind_to<O>(&self, sink: BindingSink<O, Self::Output>) -> SubscriptionHandle
    where
        O: BindingOwner,
    {
        sink.bind(self)
    }
}

impl<P: Publisher + ?Sized> PublisherExt for P {}

/// Publisher returned by [`PublisherExt::map`].
pub struct Map<P, F> {
    upstream: P,
    f: Rc<F>,
}

impl<P: Clone, F> Clone for Map<P, F> {
    fn clone(&self) -> Self {
        Self {
            upstream: self.upstream.clone(),
            f: Rc::clone(&self.f),
        }
    }
}

impl<P, F, U> Publisher for Map<P, F>
where
    P: Publisher,
    F: Fn(&P::Output) -> U + 'static,
    U: 'static,
{
    type Output = U;

    fn receive_subscriber(&self, subscriber: Subscriber<U>) -> AnyCancellable {
        let f = Rc::clone(&self.f);
        self.upstream
            .receive_subscriber(Rc::new(move |value: &P::Output| subscriber(&f(value))))
    }
}

/// Publisher returned by [`PublisherExt::filter`].
pub struct Filter<P, F> {
    upstream: P,
    predicate: Rc<F>,
}

impl<P: Clone, F> Clone for Filter<P, F> {
    fn clone(&self) -> Self {
        Self {
            upstream: self.upstream.clone(),
            predicate: Rc::clone(&self.predicate),
        }
    }
}

impl<P, F> Publisher for Filter<P, F>
where
    P: Publisher,
    F: Fn(&P::Output) -> bool + 'static,
{
    type Output = P::Output;

    fn receive_subscriber(&self, subscriber: Subscriber<P::Output>) -> AnyCancellable {
        let predicate = Rc::clone(&self.predicate);
        self.upstream
            .receive_subscriber(Rc::new(move |value: &P::Output| {
                if predicate(value) {
                    subscriber(value);
                }
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancel::Cancellable;
    use crate::subject::Subject;
    use std::cell::RefCell;

    fn recorder<T: Clone + 'static>() -> (Rc<RefCell<Vec<T>>>, impl Fn(&T) + 'static) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let log_clone = Rc::clone(&log);
        (log, move |v: &T| log_clone.borrow_mut().push(v.clone()))
    }

    #[test]
    fn sink_receives_values() {
        let subject = Subject::new();
        let (log, record) = recorder::<i32>();
        let _token = subject.sink(record);

        subject.send(1);
        subject.send(2);
        assert_eq!(*log.borrow(), vec![1, 2]);
    }

    #[test]
    fn map_transforms() {
        let subject = Subject::new();
        let (log, record) = recorder::<String>();
        let _token = subject.clone().map(|n: &i32| format!("#{n}")).sink(record);

        subject.send(7);
        assert_eq!(*log.borrow(), vec!["#7".to_string()]);
    }

    #[test]
    fn filter_drops_rejected_values() {
        let subject = Subject::new();
        let (log, record) = recorder::<i32>();
        let _token = subject.clone().filter(|n: &i32| n % 2 == 0).sink(record);

        for n in 1..=6 {
            subject.send(n);
        }
        assert_eq!(*log.borrow(), vec![2, 4, 6]);
    }

    #[test]
    fn chained_combinators() {
        let subject = Subject::new();
        let (log, record) = recorder::<i32>();
        let _token = subject
            .clone()
            .filter(|n: &i32| *n > 0)
            .map(|n| n * 10)
            .sink(record);

        subject.send(-1);
        subject.send(3);
        assert_eq!(*log.borrow(), vec![30]);
    }

    #[test]
    fn cancel_through_combinator_unsubscribes_upstream() {
        let subject = Subject::<i32>::new();
        let token = subject.clone().map(|n| n + 1).sink(|_| {});
        subject.send(0);
        assert_eq!(subject.subscriber_count(), 1);

        token.cancel();
        subject.send(0);
        assert_eq!(subject.subscriber_count(), 0);
    }

    #[test]
    fn reference_and_rc_are_publishers() {
        let subject = Rc::new(Subject::new());
        let (log, record) = recorder::<u8>();
        let _a = (&*subject).sink(record);
        let (log_rc, record_rc) = recorder::<u8>();
        let _b = Rc::clone(&subject).sink(record_rc);

        subject.send(5);
        assert_eq!(*log.borrow(), vec![5]);
        assert_eq!(*log_rc.borrow(), vec![5]);
    }
}
