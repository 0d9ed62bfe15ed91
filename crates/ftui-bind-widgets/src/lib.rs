#![forbid(unsafe_code)]

//! Reactive accessors for FrankenTUI widget properties and application
//! lifecycle events.
//!
//! Each widget is shared as `Rc<Widget>` and owns its bindings: once the last
//! `Rc` drops, nothing bound to it fires again. Accessors live behind
//! `.rx()` (see [`ftui_bind::AsReactive`]) through one extension trait per
//! widget, plus [`ViewReactive`] for the properties every widget shares.
//!
//! ```
//! use ftui_bind::{AsReactive, Observable, PublisherExt};
//! use ftui_bind_widgets::{Button, ButtonReactive, Label, LabelReactive, ViewReactive};
//!
//! let count = Observable::new(0u32);
//! let label = Label::new("");
//! let reset = Button::new("Reset");
//!
//! let _ = label.rx().text() << count.clone().map(|n| format!("{n} clicks"));
//! let _ = reset.rx().enabled() << count.clone().map(|n| *n > 0);
//! let counter = count.clone();
//! let _tap = reset.rx().tap() >> move |_: &()| counter.set(0);
//!
//! count.set(3);
//! assert_eq!(label.text(), "3 clicks");
//! reset.tap();
//! assert_eq!(label.text(), "0 clicks");
//! ```

pub mod button;
pub mod label;
pub mod lifecycle;
pub mod switch;
pub mod text_field;
pub mod view;

pub use button::{Button, ButtonReactive};
pub use label::{Label, LabelReactive};
pub use lifecycle::{AppState, Application, ApplicationReactive, LifecycleEvent, Notification};
pub use switch::{Switch, SwitchReactive};
pub use text_field::{TextField, TextFieldReactive};
pub use view::{ViewReactive, ViewState, Widget};
