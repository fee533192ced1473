//! Interaction Page State
//!
//! Binds an [`InteractionSession`] to Leptos. The session is the single
//! owner of page state; components read it through [`InteractionState::read`]
//! (which subscribes them to changes) and mutate it through the action
//! methods, which bump a revision signal and route any notices to toasts.

use leptos::*;
use simplebot_core::{
    Direction, Epoch, InteractionSession, Notice, SendError, StreamConfig, TransportEvent,
};
use std::cell::RefCell;
use std::rc::Rc;

use crate::api;
use crate::state::global::GlobalState;
use crate::transport::{picamera, EventSink, PiCameraTransport};

pub type Session = InteractionSession<PiCameraTransport>;

/// Interaction page state provided to the page's components
#[derive(Clone)]
pub struct InteractionState {
    session: Rc<RefCell<Session>>,
    revision: RwSignal<u64>,
    /// Settings for the next connect
    pub stream_config: RwSignal<StreamConfig>,
    global: GlobalState,
}

impl InteractionState {
    pub fn new(global: GlobalState) -> Self {
        Self {
            session: Rc::new(RefCell::new(Session::default())),
            revision: create_rw_signal(0),
            stream_config: create_rw_signal(StreamConfig::default()),
            global,
        }
    }

    /// Read the session, re-running the caller when it changes
    pub fn read<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        self.revision.track();
        f(&self.session.borrow())
    }

    fn update<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        let out = f(&mut self.session.borrow_mut());
        self.revision.try_update(|revision| *revision += 1);
        out
    }

    /// Fetch stream settings from the server, keeping the defaults on failure
    pub fn load_stream_config(&self) {
        let stream_config = self.stream_config;
        spawn_local(async move {
            match api::fetch_stream_config().await {
                Ok(config) => {
                    stream_config.try_set(config);
                }
                Err(e) => {
                    web_sys::console::warn_1(
                        &format!("Using default stream settings: {}", e).into(),
                    );
                }
            }
        });
    }

    // ============ Connection ============

    pub fn connect(&self) {
        web_sys::console::log_1(&"Connection refresh button pressed".into());
        let config = self.stream_config.get_untracked();
        let sink = self.event_sink();

        let result =
            self.update(|session| session.connect_with(|epoch| PiCameraTransport::new(&config, epoch, sink)));

        if let Err(e) = result {
            web_sys::console::error_1(&format!("Failed to start streaming client: {}", e).into());
            self.global.show_error(&format!("Unable to connect to robot: {}", e));
        }
    }

    pub fn disconnect(&self) {
        web_sys::console::log_1(&"Disconnect button pressed".into());
        if self.update(|session| session.disconnect()) {
            picamera::attach_stream(None);
        }
    }

    /// Terminate the streaming client when the page goes away
    pub fn shutdown(&self) {
        self.session.borrow_mut().shutdown();
    }

    /// Library callbacks run as their own microtask, never inside another
    /// session update
    fn event_sink(&self) -> EventSink {
        let state = self.clone();
        Rc::new(move |epoch, event| {
            let state = state.clone();
            spawn_local(async move {
                state.handle_event(epoch, event);
            });
        })
    }

    fn handle_event(&self, epoch: Epoch, event: TransportEvent) {
        let notices = self.update(|session| session.handle_event_from(epoch, event));
        for notice in notices {
            self.global.notify(notice);
        }
    }

    // ============ Commands ============

    pub fn press(&self, direction: Direction) {
        let result = self.update(|session| session.press(direction));
        self.report(result);
    }

    pub fn release(&self, direction: Direction) {
        self.update(|session| session.release(direction));
    }

    pub fn press_key(&self, key: &str) {
        let result = self.update(|session| session.press_key(key));
        self.report(result);
    }

    pub fn release_key(&self, key: &str) {
        self.update(|session| session.release_key(key));
    }

    pub fn submit_find(&self) {
        let result = self.update(|session| session.submit_find());
        self.report(result);
    }

    pub fn toggle_mode(&self) {
        let result = self.update(|session| session.toggle_mode());
        self.report(result);
    }

    pub fn set_command_text(&self, text: String) {
        self.update(|session| session.set_command_text(text));
    }

    pub fn set_text_focus(&self, focused: bool) {
        self.update(|session| session.set_text_focus(focused));
    }

    fn report<T>(&self, result: Result<T, SendError>) {
        if let Err(e) = result {
            web_sys::console::log_1(&format!("Command not sent: {}", e).into());
            self.global.notify(Notice::from(e));
        }
    }
}
