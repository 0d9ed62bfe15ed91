#![forbid(unsafe_code)]

//! Properties shared by every widget, and their reactive sinks.

use std::cell::Cell;

use ftui_bind::{BindingOwner, BindingSink, Reactive, ReactiveCompatible};

/// Visibility, opacity, and interactivity common to all widgets.
#[derive(Debug)]
pub struct ViewState {
    hidden: Cell<bool>,
    alpha: Cell<f32>,
    enabled: Cell<bool>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            hidden: Cell::new(false),
            alpha: Cell::new(1.0),
            enabled: Cell::new(true),
        }
    }
}

impl ViewState {
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.hidden.get()
    }

    pub fn set_hidden(&self, hidden: bool) {
        self.hidden.set(hidden);
    }

    #[must_use]
    pub fn alpha(&self) -> f32 {
        self.alpha.get()
    }

    /// Set opacity, clamped to `0.0..=1.0`. `NaN` is treated as fully
    /// transparent.
    pub fn set_alpha(&self, alpha: f32) {
        let alpha = if alpha.is_nan() {
            0.0
        } else {
            alpha.clamp(0.0, 1.0)
        };
        self.alpha.set(alpha);
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }

    /// Whether user interaction can reach the widget.
    #[must_use]
    pub fn accepts_input(&self) -> bool {
        self.is_enabled() && !self.is_hidden()
    }
}

/// A widget: a binding owner with common view state.
pub trait Widget: BindingOwner + ReactiveCompatible {
    fn view(&self) -> &ViewState;
}

/// Reactive sinks available on every widget.
pub trait ViewReactive<W> {
    fn hidden(&self) -> BindingSink<W, bool>;
    fn alpha(&self) -> BindingSink<W, f32>;
    fn enabled(&self) -> BindingSink<W, bool>;
}

impl<W: Widget> ViewReactive<W> for Reactive<'_, W> {
    fn hidden(&self) -> BindingSink<W, bool> {
        self.sink(|w: &W, hidden: &bool| w.view().set_hidden(*hidden))
    }

    fn alpha(&self) -> BindingSink<W, f32> {
        self.sink(|w: &W, alpha: &f32| w.view().set_alpha(*alpha))
    }

    fn enabled(&self) -> BindingSink<W, bool> {
        self.sink(|w: &W, enabled: &bool| w.view().set_enabled(*enabled))
    }
}
