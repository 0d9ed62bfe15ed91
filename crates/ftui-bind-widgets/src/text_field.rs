#![forbid(unsafe_code)]

//! Single-line editable text.
//!
//! Programmatic writes ([`TextField::set_text`], including writes from a
//! binding) do not emit on the change stream; only user edits do. A
//! two-way pairing (`model → field` and `field → model`) therefore cannot
//! loop.

use std::cell::RefCell;
use std::rc::Rc;

use ftui_bind::{BindingOwner, BindingSink, Bindings, Reactive, ReactiveCompatible, Subject};

use crate::view::{ViewState, Widget};

#[derive(Debug, Default)]
pub struct TextField {
    text: RefCell<String>,
    placeholder: RefCell<String>,
    edits: Subject<String>,
    view: ViewState,
    bindings: Bindings,
}

impl TextField {
    #[must_use]
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    /// Replace the text without emitting a change.
    pub fn set_text(&self, text: impl Into<String>) {
        *self.text.borrow_mut() = text.into();
    }

    #[must_use]
    pub fn placeholder(&self) -> String {
        self.placeholder.borrow().clone()
    }

    pub fn set_placeholder(&self, placeholder: impl Into<String>) {
        *self.placeholder.borrow_mut() = placeholder.into();
    }

    /// Simulate the user replacing the contents. Emits the new text unless
    /// the field rejects input or the text is unchanged.
    pub fn type_text(&self, text: impl Into<String>) -> bool {
        if !self.view.accepts_input() {
            return false;
        }
        let text = text.into();
        {
            let mut current = self.text.borrow_mut();
            if *current == text {
                return false;
            }
            current.clone_from(&text);
        }
        self.edits.send(text);
        true
    }
}

impl BindingOwner for TextField {
    fn bindings(&self) -> &Bindings {
        &self.bindings
    }
}

impl ReactiveCompatible for TextField {}

impl Widget for TextField {
    fn view(&self) -> &ViewState {
        &self.view
    }
}

pub trait TextFieldReactive {
    fn text(&self) -> BindingSink<TextField, String>;
    fn placeholder(&self) -> BindingSink<TextField, String>;
    /// User edits, one value per change.
    fn text_changes(&self) -> Subject<String>;
}

impl TextFieldReactive for Reactive<'_, TextField> {
    fn text(&self) -> BindingSink<TextField, String> {
        self.sink(|field: &TextField, text: &String| field.set_text(text.as_str()))
    }

    fn placeholder(&self) -> BindingSink<TextField, String> {
        self.sink(|field: &TextField, text: &String| field.set_placeholder(text.as_str()))
    }

    fn text_changes(&self) -> Subject<String> {
        self.base().edits.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ftui_bind::{AsReactive, Observable};

    #[test]
    fn user_edits_emit_programmatic_writes_do_not() {
        let field = TextField::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = Rc::clone(&seen);
        let _token = field.rx().text_changes()
            >> move |s: &String| seen_clone.borrow_mut().push(s.clone());

        field.set_text("program");
        assert!(field.type_text("user"));
        assert!(!field.type_text("user"));
        assert_eq!(*seen.borrow(), vec!["user"]);
    }

    #[test]
    fn two_way_pairing_does_not_loop() {
        let field = TextField::new();
        let model = Observable::new("start".to_string());

        let _ = field.rx().text() << &model;
        let model_clone = model.clone();
        let _token = field.rx().text_changes() >> move |s: &String| model_clone.set(s.clone());

        assert_eq!(field.text(), "start");
        field.type_text("edited");
        assert_eq!(model.get(), "edited");
        assert_eq!(model.version(), 1);

        model.set("reset".to_string());
        assert_eq!(field.text(), "reset");
    }

    #[test]
    fn placeholder_binding() {
        let field = TextField::new();
        let hint = Observable::new("Search".to_string());
        let _ = field.rx().placeholder() << hint;
        assert_eq!(field.placeholder(), "Search");
    }
}
