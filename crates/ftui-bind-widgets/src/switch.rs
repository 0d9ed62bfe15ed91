#![forbid(unsafe_code)]

//! On/off toggle.

use std::cell::Cell;
use std::rc::Rc;

use ftui_bind::{BindingOwner, BindingSink, Bindings, Reactive, ReactiveCompatible, Subject};

use crate::view::{ViewState, Widget};

#[derive(Debug, Default)]
pub struct Switch {
    on: Cell<bool>,
    changes: Subject<bool>,
    view: ViewState,
    bindings: Bindings,
}

impl Switch {
    #[must_use]
    pub fn new(on: bool) -> Rc<Self> {
        Rc::new(Self {
            on: Cell::new(on),
            ..Self::default()
        })
    }

    #[must_use]
    pub fn is_on(&self) -> bool {
        self.on.get()
    }

    /// Set the state without emitting a change.
    pub fn set_on(&self, on: bool) {
        self.on.set(on);
    }

    /// Simulate a user toggle. Emits the new state.
    pub fn toggle(&self) -> bool {
        if !self.view.accepts_input() {
            return false;
        }
        let on = !self.on.get();
        self.on.set(on);
        self.changes.send(on);
        true
    }
}

impl BindingOwner for Switch {
    fn bindings(&self) -> &Bindings {
        &self.bindings
    }
}

impl ReactiveCompatible for Switch {}

impl Widget for Switch {
    fn view(&self) -> &ViewState {
        &self.view
    }
}

pub trait SwitchReactive {
    fn is_on(&self) -> BindingSink<Switch, bool>;
    fn value_changes(&self) -> Subject<bool>;
}

impl SwitchReactive for Reactive<'_, Switch> {
    fn is_on(&self) -> BindingSink<Switch, bool> {
        self.sink(|switch: &Switch, on: &bool| switch.set_on(*on))
    }

    fn value_changes(&self) -> Subject<bool> {
        self.base().changes.clone()
    }
}
