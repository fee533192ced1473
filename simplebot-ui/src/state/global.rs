//! Global Application State
//!
//! Reactive state management using Leptos signals.

use leptos::*;
use simplebot_core::{Handoff, Notice};

/// How long a toast stays up
const TOAST_MS: u32 = 3000;

/// Most toasts shown at once; older ones are dropped first
const MAX_TOASTS: usize = 3;

/// A notice on screen, with the id its timer removes it by
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShownNotice {
    pub id: u64,
    pub notice: Notice,
}

/// Notices currently on screen, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoticeQueue {
    shown: Vec<ShownNotice>,
    next_id: u64,
}

impl NoticeQueue {
    /// Show a notice and return its id
    pub fn push(&mut self, notice: Notice) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.shown.push(ShownNotice { id, notice });
        if self.shown.len() > MAX_TOASTS {
            let excess = self.shown.len() - MAX_TOASTS;
            self.shown.drain(..excess);
        }
        id
    }

    /// Remove a notice; unknown ids are ignored
    pub fn dismiss(&mut self, id: u64) {
        self.shown.retain(|shown| shown.id != id);
    }

    pub fn shown(&self) -> &[ShownNotice] {
        &self.shown
    }
}

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Who logged in and which stream they were given
    pub handoff: RwSignal<Option<Handoff>>,
    /// Toasts on screen
    pub notices: RwSignal<NoticeQueue>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        handoff: create_rw_signal(None),
        notices: create_rw_signal(NoticeQueue::default()),
    };

    provide_context(state);
}

impl GlobalState {
    /// Show a notice; each one clears on its own timer
    pub fn notify(&self, notice: Notice) {
        let mut id = 0;
        self.notices.update(|queue| id = queue.push(notice));

        let notices = self.notices;
        gloo_timers::callback::Timeout::new(TOAST_MS, move || {
            notices.try_update(|queue| queue.dismiss(id));
        })
        .forget();
    }

    pub fn show_success(&self, message: &str) {
        self.notify(Notice::Success(message.to_string()));
    }

    pub fn show_error(&self, message: &str) {
        self.notify(Notice::Error(message.to_string()));
    }

    /// Close a toast before its timer does
    pub fn dismiss(&self, id: u64) {
        self.notices.update(|queue| queue.dismiss(id));
    }
}
