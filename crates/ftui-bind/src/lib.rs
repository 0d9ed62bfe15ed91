#![forbid(unsafe_code)]

//! Lifetime-bound reactive bindings for FrankenTUI.
//!
//! # Role in FrankenTUI
//! `ftui-bind` connects value producers to widget properties (model → UI)
//! and widget events to callbacks (UI → effects). A binding that mutates an
//! object ends when that object is dropped; it can never write to a dead
//! target.
//!
//! # Primary pieces
//! - [`BindingSink`]: applies values to a weakly held owner.
//! - [`Bindings`] / [`BindingOwner`]: per-owner bag that cancels every
//!   binding when the owner drops.
//! - [`AnyCancellable`] / [`SubscriptionHandle`]: idempotent cancellation.
//! - [`Reactive`] / [`ReactiveCompatible`]: the `.rx()` namespace that
//!   extension traits attach accessors to.
//! - [`Publisher`], [`Subject`], [`Observable`]: minimal synchronous
//!   producers, plus `map` and `filter`.
//! - Operators: `sink << publisher` and `publisher >> callback`.
//!
//! # Threading
//! Everything here is single-threaded (`Rc`/`RefCell`). Values are applied
//! on the caller's thread, synchronously, in delivery order.
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use ftui_bind::{BindingOwner, BindingSink, Bindings, Observable};
//!
//! struct Title {
//!     text: RefCell<String>,
//!     bindings: Bindings,
//! }
//!
//! impl BindingOwner for Title {
//!     fn bindings(&self) -> &Bindings {
//!         &self.bindings
//!     }
//! }
//!
//! let model = Observable::new("draft".to_string());
//! let title = Rc::new(Title { text: RefCell::new(String::new()), bindings: Bindings::new() });
//!
//! let sink = BindingSink::new(&title, |t: &Title, v: &String| *t.text.borrow_mut() = v.clone());
//! let _ = sink << model.clone();
//! assert_eq!(*title.text.borrow(), "draft");
//!
//! model.set("final".to_string());
//! assert_eq!(*title.text.borrow(), "final");
//!
//! drop(title);
//! model.set("ignored".to_string()); // no target, no effect
//! ```

pub mod bindings;
pub mod cancel;
pub mod config;
pub mod observable;
pub mod ops;
pub mod publisher;
pub mod reactive;
pub mod sink;
pub mod subject;
pub mod subscriber;

pub use bindings::{BindingOwner, Bindings};
pub use cancel::{AnyCancellable, Cancellable, SubscriptionHandle};
pub use config::{BindConfig, ConfigError};
pub use observable::Observable;
pub use publisher::{Filter, Map, Publisher, PublisherExt};
pub use reactive::{AsReactive, Reactive, ReactiveCompatible};
pub use sink::BindingSink;
pub use subject::Subject;
pub use subscriber::Subscriber;
