#![forbid(unsafe_code)]

//! Push button: a bindable title and a tap event stream.

use std::cell::RefCell;
use std::rc::Rc;

use ftui_bind::{BindingOwner, BindingSink, Bindings, Reactive, ReactiveCompatible, Subject};

use crate::view::{ViewState, Widget};

#[derive(Debug, Default)]
pub struct Button {
    title: RefCell<String>,
    taps: Subject<()>,
    view: ViewState,
    bindings: Bindings,
}

impl Button {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Rc<Self> {
        Rc::new(Self {
            title: RefCell::new(title.into()),
            ..Self::default()
        })
    }

    #[must_use]
    pub fn title(&self) -> String {
        self.title.borrow().clone()
    }

    pub fn set_title(&self, title: impl Into<String>) {
        *self.title.borrow_mut() = title.into();
    }

    /// Simulate a user tap. Ignored while the button is disabled or hidden.
    /// Returns whether the tap was delivered.
    pub fn tap(&self) -> bool {
        if !self.view.accepts_input() {
            return false;
        }
        self.taps.send(());
        true
    }
}

impl BindingOwner for Button {
    fn bindings(&self) -> &Bindings {
        &self.bindings
    }
}

impl ReactiveCompatible for Button {}

impl Widget for Button {
    fn view(&self) -> &ViewState {
        &self.view
    }
}

pub trait ButtonReactive {
    fn title(&self) -> BindingSink<Button, String>;
    fn tap(&self) -> Subject<()>;
}

impl ButtonReactive for Reactive<'_, Button> {
    fn title(&self) -> BindingSink<Button, String> {
        self.sink(|button: &Button, title: &String| button.set_title(title.as_str()))
    }

    fn tap(&self) -> Subject<()> {
        self.base().taps.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::ViewReactive;
    use ftui_bind::{AsReactive, Observable};
    use std::cell::Cell;

    #[test]
    fn tap_stream_reaches_callback() {
        let button = Button::new("Go");
        let taps = Rc::new(Cell::new(0u32));
        let taps_clone = Rc::clone(&taps);
        let _token = button.rx().tap() >> move |_: &()| taps_clone.set(taps_clone.get() + 1);

        assert!(button.tap());
        assert!(button.tap());
        assert_eq!(taps.get(), 2);
    }

    #[test]
    fn disabled_button_does_not_emit() {
        let button = Button::new("Go");
        let can_submit = Observable::new(false);
        let _ = button.rx().enabled() << can_submit.clone();

        let taps = Rc::new(Cell::new(0u32));
        let taps_clone = Rc::clone(&taps);
        let _token = button.rx().tap() >> move |_: &()| taps_clone.set(taps_clone.get() + 1);

        assert!(!button.tap());
        can_submit.set(true);
        assert!(button.tap());
        assert_eq!(taps.get(), 1);
    }

    #[test]
    fn tap_handlers_stored_on_screen_end_with_it() {
        let screen = Bindings::new();
        let button = Button::new("Go");
        let taps = Rc::new(Cell::new(0u32));
        let taps_clone = Rc::clone(&taps);
        (button.rx().tap() >> move |_: &()| taps_clone.set(taps_clone.get() + 1)).store_in(&screen);

        button.tap();
        drop(screen);
        button.tap();
        assert_eq!(taps.get(), 1);
    }

    #[test]
    fn title_binding() {
        let button = Button::new("");
        let title = Observable::new("Save".to_string());
        let _ = button.rx().title() << &title;
        assert_eq!(button.title(), "Save");
    }
}
