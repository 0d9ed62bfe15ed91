#![forbid(unsafe_code)]

//! Application lifecycle notifications.
//!
//! [`Application`] tracks the coarse run state and broadcasts each
//! transition. Observers either take the whole [`LifecycleEvent`] stream or
//! one [`Notification`] per event kind:
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use ftui_bind::AsReactive;
//! use ftui_bind_widgets::{Application, ApplicationReactive, LifecycleEvent};
//!
//! let app = Application::new();
//! let resumed = Rc::new(Cell::new(0));
//! let resumed_clone = Rc::clone(&resumed);
//! let _token = app.rx().did_become_active() >> move |_: &()| resumed_clone.set(resumed_clone.get() + 1);
//!
//! app.post(LifecycleEvent::DidFinishLaunching);
//! app.post(LifecycleEvent::DidBecomeActive);
//! assert_eq!(resumed.get(), 1);
//! ```
//!
//! # Invariants
//!
//! 1. [`Application::state`] already reflects an event when observers see it.
//! 2. [`LifecycleEvent::WillTerminate`] is the last event delivered; the
//!    stream completes right after it and later posts are ignored.

use std::cell::Cell;
use std::rc::Rc;

use ftui_bind::{
    AnyCancellable, BindingOwner, Bindings, Publisher, Reactive, ReactiveCompatible, Subject,
    Subscriber,
};
use tracing::debug;

/// Coarse run state of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    NotRunning,
    /// In the foreground but not receiving input.
    Inactive,
    Active,
    Background,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    DidFinishLaunching,
    DidBecomeActive,
    WillResignActive,
    DidEnterBackground,
    WillEnterForeground,
    WillTerminate,
}

impl LifecycleEvent {
    /// State the application is in once this event has been posted.
    #[must_use]
    pub const fn resulting_state(self) -> AppState {
        match self {
            Self::DidFinishLaunching | Self::WillResignActive | Self::WillEnterForeground => {
                AppState::Inactive
            }
            Self::DidBecomeActive => AppState::Active,
            Self::DidEnterBackground => AppState::Background,
            Self::WillTerminate => AppState::NotRunning,
        }
    }
}

#[derive(Debug)]
pub struct Application {
    state: Cell<AppState>,
    events: Subject<LifecycleEvent>,
    bindings: Bindings,
}

impl Application {
    #[must_use]
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            state: Cell::new(AppState::NotRunning),
            events: Subject::new(),
            bindings: Bindings::new(),
        })
    }

    #[must_use]
    pub fn state(&self) -> AppState {
        self.state.get()
    }

    /// Record a transition and notify observers. Ignored once the application
    /// has terminated.
    pub fn post(&self, event: LifecycleEvent) {
        if self.events.is_completed() {
            return;
        }
        self.state.set(event.resulting_state());
        debug!(?event, state = ?self.state.get(), "lifecycle event");
        self.events.send(event);
        if event == LifecycleEvent::WillTerminate {
            self.events.complete();
        }
    }
}

impl BindingOwner for Application {
    fn bindings(&self) -> &Bindings {
        &self.bindings
    }
}

impl ReactiveCompatible for Application {}

/// Emits `()` each time the application posts one specific event.
#[derive(Debug, Clone)]
pub struct Notification {
    events: Subject<LifecycleEvent>,
    kind: LifecycleEvent,
}

impl Notification {
    #[must_use]
    pub fn kind(&self) -> LifecycleEvent {
        self.kind
    }
}

impl Publisher for Notification {
    type Output = ();

    fn receive_subscriber(&self, subscriber: Subscriber<()>) -> AnyCancellable {
        let kind = self.kind;
        self.events
            .receive_subscriber(Rc::new(move |event: &LifecycleEvent| {
                if *event == kind {
                    subscriber(&());
                }
            }))
    }
}

ftui_bind::impl_output_operator!([] Notification, ['a,] &'a Notification);

pub trait ApplicationReactive {
    /// Every lifecycle event, in order.
    fn lifecycle(&self) -> Subject<LifecycleEvent>;
    fn notification(&self, kind: LifecycleEvent) -> Notification;

    fn did_finish_launching(&self) -> Notification {
        self.notification(LifecycleEvent::DidFinishLaunching)
    }

    fn did_become_active(&self) -> Notification {
        self.notification(LifecycleEvent::DidBecomeActive)
    }

    fn will_resign_active(&self) -> Notification {
        self.notification(LifecycleEvent::WillResignActive)
    }

    fn did_enter_background(&self) -> Notification {
        self.notification(LifecycleEvent::DidEnterBackground)
    }

    fn will_enter_foreground(&self) -> Notification {
        self.notification(LifecycleEvent::WillEnterForeground)
    }

    fn will_terminate(&self) -> Notification {
        self.notification(LifecycleEvent::WillTerminate)
    }
}

impl ApplicationReactive for Reactive<'_, Application> {
    fn lifecycle(&self) -> Subject<LifecycleEvent> {
        self.base().events.clone()
    }

    fn notification(&self, kind: LifecycleEvent) -> Notification {
        Notification {
            events: self.base().events.clone(),
            kind,
        }
    }
}
