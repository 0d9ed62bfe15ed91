#![forbid(unsafe_code)]

//! Static text widget.

use std::cell::RefCell;
use std::rc::Rc;

use ftui_bind::{BindingOwner, BindingSink, Bindings, Reactive, ReactiveCompatible};

use crate::view::{ViewState, Widget};

#[derive(Debug, Default)]
pub struct Label {
    text: RefCell<String>,
    view: ViewState,
    bindings: Bindings,
}

impl Label {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Rc<Self> {
        Rc::new(Self {
            text: RefCell::new(text.into()),
            ..Self::default()
        })
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    pub fn set_text(&self, text: impl Into<String>) {
        *self.text.borrow_mut() = text.into();
    }
}

impl BindingOwner for Label {
    fn bindings(&self) -> &Bindings {
        &self.bindings
    }
}

impl ReactiveCompatible for Label {}

impl Widget for Label {
    fn view(&self) -> &ViewState {
        &self.view
    }
}

pub trait LabelReactive {
    fn text(&self) -> BindingSink<Label, String>;
}

impl LabelReactive for Reactive<'_, Label> {
    fn text(&self) -> BindingSink<Label, String> {
        self.sink(|label: &Label, text: &String| label.set_text(text.as_str()))
    }
}
