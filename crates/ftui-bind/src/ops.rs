#![forbid(unsafe_code)]

//! Binding operators.
//!
//! | Direction | Expression | Result |
//! |-----------|------------|--------|
//! | Input (model → UI) | `sink << publisher` | [`SubscriptionHandle`]; lifetime owned by the sink's owner |
//! | Output (UI → effect) | `publisher >> callback` | [`AnyCancellable`]; the caller stores it |
//!
//! The input operator works for any [`Publisher`]. The output operator is
//! implemented per producer type; use [`impl_output_operator!`] to enable it
//! for producers defined in other crates.

use std::ops::Shl;

use crate::bindings::BindingOwner;
use crate::cancel::SubscriptionHandle;
use crate::publisher::Publisher;
use crate::sink::BindingSink;

#[cfg(doc)]
use crate::cancel::AnyCancellable;

impl<O, T, P> Shl<P> for BindingSink<O, T>
where
    O: BindingOwner,
    T: 'static,
    P: Publisher<Output = T>,
{
    type Output = SubscriptionHandle;

    fn shl(self, publisher: P) -> SubscriptionHandle {
        self.bind(&publisher)
    }
}

/// Implement `publisher >> callback` for producer types.
///
/// Each entry is `[generics,] Type`; list generics with a trailing comma, or
/// leave the brackets empty:
///
/// ```ignore
/// ftui_bind::impl_output_operator!(
///     [] MyEvents,
///     ['a,] &'a MyEvents,
/// );
/// ```
#[macro_export]
macro_rules! impl_output_operator {
    ($([$($generics:tt)*] $ty:ty),* $(,)?) => {
        $(
            impl<$($generics)* F> ::core::ops::Shr<F> for $ty
            where
                $ty: $crate::Publisher,
                F: Fn(&<$ty as $crate::Publisher>::Output) + 'static,
            {
                type Output = $crate::AnyCancellable;

                fn shr(self, callback: F) -> $crate::AnyCancellable {
                    $crate::PublisherExt::sink(&self, callback)
                }
            }
        )*
    };
}

impl_output_operator!(
    [T: 'static,] crate::Subject<T>,
    ['a, T: 'static,] &'a crate::Subject<T>,
    [T: Clone + PartialEq + 'static,] crate::Observable<T>,
    ['a, T: Clone + PartialEq + 'static,] &'a crate::Observable<T>,
    [P, G,] crate::Map<P, G>,
    [P, G,] crate::Filter<P, G>,
);
